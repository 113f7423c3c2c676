//! Analysis results and summary structures.

use serde::{Deserialize, Serialize};

use crate::io::export::ModelSnapshot;
use crate::metrics::MetricsReport;
use crate::model::phases::ResolvedModel;

/// Everything one analysis run produces.
///
/// The model and the report stay separate on purpose: the model is the
/// entity graph (identity, structure, relationships), the report is the
/// derived numbers. Both are read-only from here on.
#[derive(Debug)]
pub struct AnalysisResults {
    /// The fully cross-referenced program model
    pub model: ResolvedModel,

    /// Per-entity metric values
    pub metrics: MetricsReport,

    /// Summary of the analysis
    pub summary: AnalysisSummary,
}

impl AnalysisResults {
    /// Capture a deterministic, serializable snapshot of the run for export
    /// collaborators.
    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot::capture(&self.model, &self.metrics)
    }
}

/// Summary counts for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Compilation units that contributed to the model
    pub files_processed: usize,

    /// Compilation units excluded for parse failures
    pub files_skipped: usize,

    /// Packages in the model
    pub packages: usize,

    /// In-project classes (nested and anonymous included)
    pub classes: usize,

    /// In-project methods, constructors, and initializers
    pub methods: usize,

    /// In-project fields and enum constants
    pub fields: usize,

    /// External placeholder classes referenced by the project
    pub external_classes: usize,

    /// Entities whose bindings did not fully resolve
    pub entities_with_incomplete_bindings: usize,
}

impl AnalysisSummary {
    /// Derive the summary counts from a resolved model.
    pub fn from_model(model: &ResolvedModel) -> Self {
        let external_classes = model
            .classes()
            .filter(|(_, class)| !class.is_in_project())
            .count();

        Self {
            files_processed: model.files_processed(),
            files_skipped: model.files_skipped(),
            packages: model.packages().count(),
            classes: model.project_class_count(),
            methods: model.project_method_count(),
            fields: model.project_field_count(),
            external_classes,
            entities_with_incomplete_bindings: model.binding_report().total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ModelBuilder;
    use crate::core::config::AnalysisConfig;
    use crate::core::session::AnalysisSession;
    use crate::frontend::{CompilationUnit, FieldDecl, MethodDecl, TypeDecl, TypeKind, TypeRef};
    use crate::resolver::CrossReferenceResolver;

    #[test]
    fn test_summary_counts() {
        let session = AnalysisSession::new(AnalysisConfig::default()).unwrap();
        let decl = TypeDecl::new("A", TypeKind::Class)
            .with_binding("p.A")
            .with_super_class(TypeRef::resolved("Base", "ext.Base"))
            .with_field(FieldDecl::new("x").with_binding("p.A"))
            .with_method(MethodDecl::new("foo"));
        let unit = CompilationUnit::new("p/A.x").with_package("p").with_type(decl);
        let bad = CompilationUnit::new("p/B.x").with_package("p").failed();

        let structural = ModelBuilder::new(&session).build(&[unit, bad]);
        let resolved = CrossReferenceResolver::new(&session).resolve(structural);
        let summary = AnalysisSummary::from_model(&resolved);

        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.packages, 1);
        assert_eq!(summary.classes, 1);
        assert_eq!(summary.methods, 1);
        assert_eq!(summary.fields, 1);
        assert_eq!(summary.external_classes, 1);
        assert_eq!(summary.entities_with_incomplete_bindings, 0);
    }
}
