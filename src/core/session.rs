//! Analysis session state.
//!
//! The original generation of this engine kept its entity caches in
//! process-wide statics. [`AnalysisSession`] replaces that: it owns the
//! [`EntityRegistry`] and the configuration, and is passed by reference
//! through the builder, resolver, and metrics passes. Independent sessions
//! can therefore run in one process without sharing state.

use crate::core::config::AnalysisConfig;
use crate::core::errors::Result;
use crate::core::registry::EntityRegistry;

/// Owner of all run-scoped analysis state.
#[derive(Debug)]
pub struct AnalysisSession {
    config: AnalysisConfig,
    registry: EntityRegistry,
}

impl AnalysisSession {
    /// Create a session with a validated configuration.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry: EntityRegistry::new(),
        })
    }

    /// The session configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The session's entity registry.
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Reset all run-scoped state. Must be called between independent
    /// analysis runs over the same session.
    pub fn clear(&self) {
        self.registry.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::SkylineError;
    use crate::model::ids::ClassId;

    #[test]
    fn test_session_validates_config() {
        let config = AnalysisConfig::new().with_default_package_name("");
        let err = AnalysisSession::new(config).unwrap_err();
        assert!(matches!(err, SkylineError::Config { .. }));
    }

    #[test]
    fn test_clear_resets_registry() {
        let session = AnalysisSession::new(AnalysisConfig::default()).unwrap();
        session
            .registry()
            .get_or_create_class("p.A", || ClassId::new(0));

        session.clear();
        assert_eq!(session.registry().lookup_class("p.A"), None);
    }
}
