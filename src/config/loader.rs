//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading per-project
//! profit-sharing rules from YAML files.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::ProfitSharingRules;

use super::types::{EngineConfig, EngineMetadata, ProjectRules};
use super::validation::validate_rules;

/// Loads and provides access to profit-sharing configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml          # Rule set metadata
/// └── projects/
///     └── prj_001.yaml     # One project's rules
/// ```
///
/// Rules are validated as they load; warnings are logged and never abort
/// the load.
///
/// # Example
///
/// ```no_run
/// use profit_sharing_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let rules = loader.get_rules("prj_001")?;
/// println!("Formula: {}", rules.formula_type);
/// # Ok::<(), profit_sharing_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `engine.yaml` or the `projects` directory is
    /// missing, or if any file contains invalid YAML. An empty `projects`
    /// directory is accepted.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;
        let projects = Self::load_projects(&path.join("projects"))?;

        for project in &projects {
            for warning in validate_rules(&project.rules) {
                warn!(
                    project_id = %project.project_id,
                    code = %warning.code,
                    severity = ?warning.severity,
                    "{}",
                    warning.message
                );
            }
        }

        info!(
            name = %metadata.name,
            version = %metadata.version,
            projects_count = projects.len(),
            "Profit-sharing configuration loaded"
        );

        Ok(Self {
            config: EngineConfig::new(metadata, projects),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every project file from the projects directory, sorted by file
    /// name so duplicate ids resolve deterministically.
    fn load_projects(projects_dir: &Path) -> EngineResult<Vec<ProjectRules>> {
        let projects_dir_str = projects_dir.display().to_string();

        let entries = fs::read_dir(projects_dir).map_err(|_| EngineError::ConfigNotFound {
            path: projects_dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: projects_dir_str.clone(),
            })?;

            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .iter()
            .map(|path| Self::load_yaml::<ProjectRules>(path))
            .collect()
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Gets a project's configuration by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RulesNotFound`] when the project is not
    /// configured.
    pub fn get_project(&self, project_id: &str) -> EngineResult<&ProjectRules> {
        self.config
            .project(project_id)
            .ok_or_else(|| EngineError::RulesNotFound {
                project_id: project_id.to_string(),
            })
    }

    /// Gets the rules configured for a project.
    pub fn get_rules(&self, project_id: &str) -> EngineResult<&ProfitSharingRules> {
        self.get_project(project_id).map(|project| &project.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FormulaType;
    use rust_decimal::Decimal;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "profit_sharing_loader_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("projects")).unwrap();
        fs::write(
            dir.join("engine.yaml"),
            "name: Test\nversion: \"1\"\ncurrency: MXN\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().currency, "MXN");
        assert_eq!(loader.config().projects().count(), 7);
    }

    #[test]
    fn test_every_formula_type_is_configured() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        for formula_type in FormulaType::ALL {
            assert!(
                loader
                    .config()
                    .projects()
                    .any(|p| p.rules.formula() == Some(formula_type)),
                "No sample project uses {}",
                formula_type
            );
        }
    }

    #[test]
    fn test_get_rules_for_tiered_project() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let rules = loader.get_rules("prj_tiered").unwrap();
        assert_eq!(rules.formula(), Some(FormulaType::Tiered));
        assert_eq!(rules.tiers.len(), 2);
        assert_eq!(rules.tiers[0].max_profit, Some(dec("50000")));
        assert_eq!(rules.tiers[1].percent_rate, dec("10"));
    }

    #[test]
    fn test_get_project_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.get_project("unknown") {
            Err(EngineError::RulesNotFound { project_id }) => {
                assert_eq!(project_id, "unknown");
            }
            other => panic!("Expected RulesNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_project_yaml_returns_parse_error() {
        let dir = scratch_dir("invalid");
        fs::write(dir.join("projects").join("broken.yaml"), "project_id: [unclosed").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("broken.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unknown_formula_type_still_loads() {
        let dir = scratch_dir("unknown_formula");
        fs::write(
            dir.join("projects").join("legacy.yaml"),
            "project_id: legacy\nproject_name: Legacy\nrules:\n  formula_type: PERCENTAGE\n",
        )
        .unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        let rules = loader.get_rules("legacy").unwrap();
        assert_eq!(rules.formula_type, "PERCENTAGE");
        assert_eq!(rules.formula(), None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_non_yaml_files_are_ignored() {
        let dir = scratch_dir("non_yaml");
        fs::write(dir.join("projects").join("README.md"), "# notes").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.config().projects().count(), 0);

        let _ = fs::remove_dir_all(&dir);
    }
}
