//! Analysis configuration.
//!
//! [`AnalysisConfig`] carries the handful of knobs the three analysis passes
//! honor. Host environments deserialize it from whatever configuration source
//! they own; the core only validates and reads it.

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, SkylineError};

/// Configuration for one analysis session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Display name of the analyzed project
    pub project_name: String,

    /// Top directory of the analyzed project; doubles as the project identity
    pub project_root: String,

    /// Package name assigned to compilation units without a package declaration
    pub default_package_name: String,

    /// Derive per-class metrics in parallel (requires the `parallel` feature)
    pub parallel_metrics: bool,

    /// Register local variables (and parameters) in each method's local table
    pub collect_locals: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            project_name: "project".to_string(),
            project_root: ".".to_string(),
            default_package_name: "(default package)".to_string(),
            parallel_metrics: true,
            collect_locals: true,
        }
    }
}

impl AnalysisConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project name
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    /// Set the project root path
    pub fn with_project_root(mut self, root: impl Into<String>) -> Self {
        self.project_root = root.into();
        self
    }

    /// Set the synthetic package name for units without a package declaration
    pub fn with_default_package_name(mut self, name: impl Into<String>) -> Self {
        self.default_package_name = name.into();
        self
    }

    /// Enable or disable parallel metric derivation
    pub fn with_parallel_metrics(mut self, enabled: bool) -> Self {
        self.parallel_metrics = enabled;
        self
    }

    /// Enable or disable local-variable collection
    pub fn with_collect_locals(mut self, enabled: bool) -> Self {
        self.collect_locals = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.project_name.is_empty() {
            return Err(SkylineError::config_field(
                "project name must not be empty",
                "project_name",
            ));
        }

        if self.default_package_name.is_empty() {
            return Err(SkylineError::config_field(
                "default package name must not be empty",
                "default_package_name",
            ));
        }

        Ok(())
    }
}
