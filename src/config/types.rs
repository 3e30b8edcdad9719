//! Configuration types for profit-sharing rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::ProfitSharingRules;

/// Metadata about the engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Human-readable name of the rule set.
    pub name: String,
    /// Version or effective period of the rule set.
    pub version: String,
    /// ISO currency code the amounts are expressed in.
    pub currency: String,
}

/// The rules configured for one project, as stored in `projects/*.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRules {
    /// Identifier of the project.
    pub project_id: String,
    /// Display name of the project.
    pub project_name: String,
    /// The project's profit-sharing rules.
    pub rules: ProfitSharingRules,
}

/// The complete configuration loaded from a directory.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    projects: BTreeMap<String, ProjectRules>,
}

impl EngineConfig {
    /// Creates a new EngineConfig, indexing projects by their id.
    ///
    /// When two entries share an id the later one wins.
    pub fn new(metadata: EngineMetadata, projects: Vec<ProjectRules>) -> Self {
        let projects = projects
            .into_iter()
            .map(|project| (project.project_id.clone(), project))
            .collect();
        Self { metadata, projects }
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns all configured projects, ordered by id.
    pub fn projects(&self) -> impl Iterator<Item = &ProjectRules> {
        self.projects.values()
    }

    /// Returns a project's configuration, if present.
    pub fn project(&self, project_id: &str) -> Option<&ProjectRules> {
        self.projects.get(project_id)
    }
}
