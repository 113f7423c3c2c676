//! Phase-typed model views.
//!
//! The model builder returns a [`StructuralModel`]; only the resolver can
//! turn it into a [`ResolvedModel`], and only the latter exposes
//! cross-reference accessors. Asking for callers or coupling before
//! resolution is therefore a type error, not a runtime surprise.

use ahash::AHashMap;
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};

use crate::model::entities::{
    ClassData, EntityOrigin, FieldData, FileData, LocalData, MethodData, PackageData,
};
use crate::model::ids::{ClassId, FieldId, FileId, LocalId, MethodId, PackageId};
use crate::model::store::ModelCore;

/// Aggregated binding-completeness diagnostics from the resolver pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindingReport {
    /// FQNs of classes with at least one unresolved reference
    pub classes_incomplete: Vec<String>,
    /// Keys of methods with at least one unresolved reference
    pub methods_incomplete: Vec<String>,
    /// Keys of fields with at least one unresolved reference
    pub fields_incomplete: Vec<String>,
}

impl BindingReport {
    /// Total number of entities with incomplete bindings.
    pub fn total(&self) -> usize {
        self.classes_incomplete.len() + self.methods_incomplete.len() + self.fields_incomplete.len()
    }

    /// True when every reference resolved.
    pub fn is_complete(&self) -> bool {
        self.total() == 0
    }
}

/// The model after pass 1: structure only.
///
/// Structural attributes (identity, ownership, spans, recorded super-type
/// names) are complete and immutable from here on. Cross-reference edges do
/// not exist yet and are not queryable.
#[derive(Debug)]
pub struct StructuralModel {
    pub(crate) core: ModelCore,
    pub(crate) fqn_index: AHashMap<String, ClassId>,
    pub(crate) files_processed: usize,
    pub(crate) files_skipped: usize,
}

impl StructuralModel {
    /// Project display name.
    pub fn project_name(&self) -> &str {
        &self.core.project_name
    }

    /// Project root path, the project's identity.
    pub fn project_root(&self) -> &str {
        &self.core.project_root
    }

    /// Number of compilation units that contributed to the model.
    pub fn files_processed(&self) -> usize {
        self.files_processed
    }

    /// Number of compilation units excluded for parse failures.
    pub fn files_skipped(&self) -> usize {
        self.files_skipped
    }

    /// Look up a class by fully-qualified name.
    pub fn class_by_fqn(&self, fqn: &str) -> Option<ClassId> {
        self.fqn_index.get(fqn).copied()
    }

    /// Iterate all classes, external stubs included.
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassData)> {
        self.core
            .classes
            .iter()
            .enumerate()
            .map(|(index, data)| (ClassId::new(index), data))
    }

    /// Iterate all packages.
    pub fn packages(&self) -> impl Iterator<Item = (PackageId, &PackageData)> {
        self.core
            .packages
            .iter()
            .enumerate()
            .map(|(index, data)| (PackageId::new(index), data))
    }

    /// Iterate all files.
    pub fn files(&self) -> impl Iterator<Item = (FileId, &FileData)> {
        self.core
            .files
            .iter()
            .enumerate()
            .map(|(index, data)| (FileId::new(index), data))
    }

    /// Look up a package by name.
    pub fn package_by_name(&self, name: &str) -> Option<PackageId> {
        self.core
            .packages
            .iter()
            .position(|package| package.name == name)
            .map(PackageId::new)
    }

    /// Package payload.
    pub fn package(&self, id: PackageId) -> &PackageData {
        self.core.package(id)
    }

    /// File payload.
    pub fn file(&self, id: FileId) -> &FileData {
        self.core.file(id)
    }

    /// Class payload.
    pub fn class(&self, id: ClassId) -> &ClassData {
        self.core.class(id)
    }

    /// Method payload.
    pub fn method(&self, id: MethodId) -> &MethodData {
        self.core.method(id)
    }

    /// Field payload.
    pub fn field(&self, id: FieldId) -> &FieldData {
        self.core.field(id)
    }

    /// Local payload.
    pub fn local(&self, id: LocalId) -> &LocalData {
        self.core.local(id)
    }

    /// Find a method of `class` by signature.
    pub fn method_by_signature(&self, class: ClassId, signature: &str) -> Option<MethodId> {
        self.core
            .class(class)
            .methods
            .iter()
            .copied()
            .find(|&method| self.core.method(method).signature == signature)
    }

    /// Find a field of `class` by name.
    pub fn field_by_name(&self, class: ClassId, name: &str) -> Option<FieldId> {
        self.core
            .class(class)
            .fields
            .iter()
            .copied()
            .find(|&field| self.core.field(field).name == name)
    }

    /// Number of in-project classes.
    pub fn project_class_count(&self) -> usize {
        self.core
            .classes
            .iter()
            .filter(|class| class.origin == EntityOrigin::Project)
            .count()
    }

    /// Number of in-project methods.
    pub fn project_method_count(&self) -> usize {
        self.core
            .methods
            .iter()
            .filter(|method| method.origin == EntityOrigin::Project)
            .count()
    }

    /// Number of in-project fields.
    pub fn project_field_count(&self) -> usize {
        self.core
            .fields
            .iter()
            .filter(|field| field.origin == EntityOrigin::Project)
            .count()
    }
}

/// The model after pass 2: structure plus cross-references.
///
/// Dereferences to [`StructuralModel`] for the structural surface and adds
/// the relationship accessors that only exist once resolution has run.
#[derive(Debug)]
pub struct ResolvedModel {
    pub(crate) structural: StructuralModel,
    pub(crate) binding_report: BindingReport,
}

impl std::ops::Deref for ResolvedModel {
    type Target = StructuralModel;

    fn deref(&self) -> &StructuralModel {
        &self.structural
    }
}

impl ResolvedModel {
    pub(crate) fn core(&self) -> &ModelCore {
        &self.structural.core
    }

    /// Binding-completeness diagnostics collected during resolution.
    pub fn binding_report(&self) -> &BindingReport {
        &self.binding_report
    }

    // ---- class hierarchy ----

    /// Direct super-class, when resolved.
    pub fn super_class_of(&self, id: ClassId) -> Option<ClassId> {
        self.core().class(id).super_class
    }

    /// Direct super-interfaces.
    pub fn super_interfaces_of(&self, id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        self.core().class(id).super_interfaces.iter().copied()
    }

    /// Direct children: classes naming this one as super-class or
    /// super-interface.
    pub fn children_of(&self, id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        self.core().class(id).sub_classes.iter().copied()
    }

    /// Full super-class chain, nearest first.
    pub fn all_superclasses(&self, id: ClassId) -> Vec<ClassId> {
        self.core().all_superclasses(id)
    }

    /// Every transitive descendant.
    pub fn all_subclasses(&self, id: ClassId) -> Vec<ClassId> {
        self.core().all_subclasses(id)
    }

    /// Every interface implemented directly or through ancestors.
    pub fn all_super_interfaces(&self, id: ClassId) -> Vec<ClassId> {
        self.core().all_super_interfaces(id)
    }

    // ---- coupling ----

    /// Classes this class depends on.
    pub fn efferent_classes(&self, id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        self.core().class(id).efferent.iter().copied()
    }

    /// Classes depending on this class.
    pub fn afferent_classes(&self, id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        self.core().class(id).afferent.iter().copied()
    }

    /// In-project subset of [`Self::efferent_classes`].
    pub fn efferent_classes_in_project(&self, id: ClassId) -> Vec<ClassId> {
        self.efferent_classes(id)
            .filter(|&other| self.core().class(other).is_in_project())
            .collect()
    }

    /// In-project subset of [`Self::afferent_classes`].
    pub fn afferent_classes_in_project(&self, id: ClassId) -> Vec<ClassId> {
        self.afferent_classes(id)
            .filter(|&other| self.core().class(other).is_in_project())
            .collect()
    }

    /// Packages this package depends on.
    pub fn efferent_packages(&self, id: PackageId) -> impl Iterator<Item = PackageId> + '_ {
        self.core().package(id).efferent.iter().copied()
    }

    /// Packages depending on this package.
    pub fn afferent_packages(&self, id: PackageId) -> impl Iterator<Item = PackageId> + '_ {
        self.core().package(id).afferent.iter().copied()
    }

    // ---- calls, overrides, accesses ----

    /// Methods called by this method.
    pub fn calls_of(&self, id: MethodId) -> impl Iterator<Item = MethodId> + '_ {
        self.core().method(id).calls.iter().copied()
    }

    /// Methods calling this method.
    pub fn callers_of(&self, id: MethodId) -> impl Iterator<Item = MethodId> + '_ {
        self.core().method(id).called_by.iter().copied()
    }

    /// Fields whose initializers call this method.
    pub fn field_callers_of(&self, id: MethodId) -> impl Iterator<Item = FieldId> + '_ {
        self.core().method(id).called_by_fields.iter().copied()
    }

    /// Ancestor methods this method overrides.
    pub fn overrides_of(&self, id: MethodId) -> impl Iterator<Item = MethodId> + '_ {
        self.core().method(id).overrides.iter().copied()
    }

    /// Descendant methods overriding this method.
    pub fn overridden_by_of(&self, id: MethodId) -> impl Iterator<Item = MethodId> + '_ {
        self.core().method(id).overridden_by.iter().copied()
    }

    /// Fields accessed by this method.
    pub fn accessed_fields_of(&self, id: MethodId) -> impl Iterator<Item = FieldId> + '_ {
        self.core().method(id).accessed_fields.iter().copied()
    }

    /// Methods accessing this field.
    pub fn method_accessors_of(&self, id: FieldId) -> impl Iterator<Item = MethodId> + '_ {
        self.core().field(id).accessed_by_methods.iter().copied()
    }

    /// Fields whose initializers access this field.
    pub fn field_accessors_of(&self, id: FieldId) -> impl Iterator<Item = FieldId> + '_ {
        self.core().field(id).accessed_by_fields.iter().copied()
    }

    /// Fields accessed from this field's initializer.
    pub fn fields_accessed_by_field(&self, id: FieldId) -> impl Iterator<Item = FieldId> + '_ {
        self.core().field(id).accessed_fields.iter().copied()
    }

    /// Methods called from this field's initializer.
    pub fn calls_of_field(&self, id: FieldId) -> impl Iterator<Item = MethodId> + '_ {
        self.core().field(id).calls.iter().copied()
    }

    // ---- graph views ----

    /// Directed class dependency graph over the efferent edges, for
    /// visualization collaborators.
    pub fn dependency_graph(&self) -> DiGraph<ClassId, ()> {
        self.core().dependency_graph()
    }

    /// Inheritance cycles detected in the resolved hierarchy. Empty on
    /// well-formed input.
    pub fn hierarchy_cycles(&self) -> Vec<Vec<ClassId>> {
        self.core().hierarchy_cycles()
    }
}
