//! Configuration loading and validation for the Profit-Sharing Engine.
//!
//! This module loads per-project rules from YAML files and provides the
//! rule validation used at the configuration boundary.
//!
//! # Example
//!
//! ```no_run
//! use profit_sharing_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded rule set: {}", config.metadata().name);
//! ```

mod loader;
mod types;
mod validation;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, EngineMetadata, ProjectRules};
pub use validation::{RuleWarning, Severity, validate_rules};
