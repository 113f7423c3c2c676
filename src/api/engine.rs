//! Main analysis engine implementation.

use tracing::info;

use crate::api::results::{AnalysisResults, AnalysisSummary};
use crate::builder::ModelBuilder;
use crate::core::config::AnalysisConfig;
use crate::core::errors::{Result, SkylineError};
use crate::core::session::AnalysisSession;
use crate::frontend::CompilationUnit;
use crate::metrics::MetricsEngine;
use crate::resolver::CrossReferenceResolver;

/// Main skyline analysis engine.
///
/// Owns one [`AnalysisSession`] and runs the three passes in their only
/// legal order: structural building, cross-reference resolution, metric
/// derivation. Each call to [`SkylineEngine::analyze`] is an independent
/// run; the session is cleared before building starts.
pub struct SkylineEngine {
    session: AnalysisSession,
}

impl SkylineEngine {
    /// Create an engine with a validated configuration.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        let session = AnalysisSession::new(config)?;
        info!("skyline engine initialized");
        Ok(Self { session })
    }

    /// The engine's session.
    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    /// Analyze a batch of compilation units belonging to one project.
    ///
    /// Per-entity problems (parse failures, unresolved bindings) degrade the
    /// affected entities and are reported through the binding report; only an
    /// empty input set fails the run as a whole.
    pub fn analyze(&self, units: &[CompilationUnit]) -> Result<AnalysisResults> {
        if units.is_empty() {
            return Err(SkylineError::validation(
                "analysis requires at least one compilation unit",
            ));
        }

        self.session.clear();
        info!(units = units.len(), "starting analysis");

        let structural = ModelBuilder::new(&self.session).build(units);
        let resolved = CrossReferenceResolver::new(&self.session).resolve(structural);
        let metrics = MetricsEngine::new(&self.session).compute(&resolved);

        let summary = AnalysisSummary::from_model(&resolved);
        info!(
            classes = summary.classes,
            methods = summary.methods,
            incomplete = summary.entities_with_incomplete_bindings,
            "analysis complete"
        );

        Ok(AnalysisResults {
            model: resolved,
            metrics,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{TypeDecl, TypeKind};

    #[test]
    fn test_empty_input_is_a_whole_run_failure() {
        let engine = SkylineEngine::new(AnalysisConfig::default()).unwrap();
        let err = engine.analyze(&[]).unwrap_err();
        assert!(matches!(err, SkylineError::Validation { .. }));
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = AnalysisConfig::default().with_project_name("");
        assert!(SkylineEngine::new(config).is_err());
    }

    #[test]
    fn test_single_unit_analysis() {
        let engine = SkylineEngine::new(AnalysisConfig::default()).unwrap();
        let unit = CompilationUnit::new("p/A.x")
            .with_package("p")
            .with_type(TypeDecl::new("A", TypeKind::Class).with_binding("p.A"));
        let results = engine.analyze(&[unit]).unwrap();

        assert_eq!(results.summary.files_processed, 1);
        assert_eq!(results.summary.classes, 1);
        assert!(results.model.binding_report().is_complete());
    }

    #[test]
    fn test_reruns_are_independent() {
        let engine = SkylineEngine::new(AnalysisConfig::default()).unwrap();
        let unit = CompilationUnit::new("p/A.x")
            .with_package("p")
            .with_type(TypeDecl::new("A", TypeKind::Class).with_binding("p.A"));

        let first = engine.analyze(std::slice::from_ref(&unit)).unwrap();
        let second = engine.analyze(std::slice::from_ref(&unit)).unwrap();
        assert_eq!(first.summary.classes, second.summary.classes);
        assert_eq!(first.summary.methods, second.summary.methods);
    }
}
