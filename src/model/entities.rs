//! Entity payloads stored in the model arenas.
//!
//! Structural attributes (identity, kind, spans, member lists, declaring
//! links) are written once by the model builder. Cross-reference edge sets
//! are crate-private and filled by the resolver through the store's symmetric
//! edge operations; they are published read-only via
//! [`crate::model::ResolvedModel`].

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

use crate::frontend::{Block, Expr, MethodKind, Modifiers, SourceSpan, TypeKind, TypeRef};
use crate::model::ids::{ClassId, FieldId, FileId, LocalId, MethodId, PackageId};

/// Whether an entity was declared inside the analyzed project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityOrigin {
    /// Declared in one of the analyzed compilation units
    Project,
    /// Placeholder for a declaration outside the analyzed file set
    External,
}

/// A recorded name reference, remembering whether the front-end resolved it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRef {
    /// Fully-qualified name when resolved, the source spelling otherwise
    pub name: String,
    /// True when `name` is a resolved fully-qualified name
    pub resolved: bool,
}

impl NameRef {
    /// Record a syntactic type reference.
    pub fn from_type_ref(type_ref: &TypeRef) -> Self {
        match &type_ref.binding {
            Some(binding) => Self {
                name: binding.qualified_name.clone(),
                resolved: true,
            },
            None => Self {
                name: type_ref.name.clone(),
                resolved: false,
            },
        }
    }
}

/// A package.
#[derive(Debug, Clone)]
pub struct PackageData {
    pub(crate) name: String,
    pub(crate) classes: Vec<ClassId>,
    pub(crate) afferent: IndexSet<PackageId>,
    pub(crate) efferent: IndexSet<PackageId>,
}

impl PackageData {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: Vec::new(),
            afferent: IndexSet::new(),
            efferent: IndexSet::new(),
        }
    }

    /// Package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level classes owned by this package.
    pub fn classes(&self) -> &[ClassId] {
        &self.classes
    }
}

/// A source file.
#[derive(Debug, Clone)]
pub struct FileData {
    pub(crate) path: String,
    pub(crate) package: PackageId,
    pub(crate) classes: Vec<ClassId>,
}

impl FileData {
    pub(crate) fn new(path: impl Into<String>, package: PackageId) -> Self {
        Self {
            path: path.into(),
            package,
            classes: Vec::new(),
        }
    }

    /// File path relative to the project root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Package the file's compilation unit declares.
    pub fn package(&self) -> PackageId {
        self.package
    }

    /// Top-level classes declared in this file.
    pub fn classes(&self) -> &[ClassId] {
        &self.classes
    }
}

/// A class, interface, or enum.
#[derive(Debug, Clone)]
pub struct ClassData {
    pub(crate) fqn: String,
    pub(crate) name: String,
    pub(crate) kind: TypeKind,
    pub(crate) modifiers: Modifiers,
    pub(crate) origin: EntityOrigin,
    pub(crate) binding_ok: bool,
    pub(crate) span: Option<SourceSpan>,
    pub(crate) package: Option<PackageId>,
    pub(crate) file: Option<FileId>,
    pub(crate) declaring_class: Option<ClassId>,
    pub(crate) declaring_method: Option<MethodId>,
    pub(crate) super_ref: Option<NameRef>,
    pub(crate) interface_refs: Vec<NameRef>,
    pub(crate) fields: Vec<FieldId>,
    pub(crate) methods: Vec<MethodId>,
    pub(crate) inner_classes: Vec<ClassId>,
    // Cross-reference edges, resolver-owned
    pub(crate) super_class: Option<ClassId>,
    pub(crate) super_interfaces: IndexSet<ClassId>,
    pub(crate) sub_classes: IndexSet<ClassId>,
    pub(crate) afferent: IndexSet<ClassId>,
    pub(crate) efferent: IndexSet<ClassId>,
}

impl ClassData {
    pub(crate) fn new_project(
        fqn: impl Into<String>,
        name: impl Into<String>,
        kind: TypeKind,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            fqn: fqn.into(),
            name: name.into(),
            kind,
            modifiers,
            origin: EntityOrigin::Project,
            binding_ok: true,
            span: None,
            package: None,
            file: None,
            declaring_class: None,
            declaring_method: None,
            super_ref: None,
            interface_refs: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            inner_classes: Vec::new(),
            super_class: None,
            super_interfaces: IndexSet::new(),
            sub_classes: IndexSet::new(),
            afferent: IndexSet::new(),
            efferent: IndexSet::new(),
        }
    }

    pub(crate) fn external_stub(fqn: impl Into<String>) -> Self {
        let fqn = fqn.into();
        let name = simple_name(&fqn).to_string();
        let mut data = Self::new_project(fqn, name, TypeKind::Class, Modifiers::NONE);
        data.origin = EntityOrigin::External;
        data
    }

    /// Fully-qualified name, the stable identity of the class.
    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    /// Simple name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration kind.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Modifier bits.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// False for external placeholder entities.
    pub fn is_in_project(&self) -> bool {
        self.origin == EntityOrigin::Project
    }

    /// False when some reference inside this class failed to resolve.
    pub fn binding_ok(&self) -> bool {
        self.binding_ok
    }

    /// Source span of the declaration.
    pub fn span(&self) -> Option<SourceSpan> {
        self.span
    }

    /// Owning package, when known.
    pub fn package(&self) -> Option<PackageId> {
        self.package
    }

    /// Declaring file, when known.
    pub fn file(&self) -> Option<FileId> {
        self.file
    }

    /// Enclosing class for nested, local, and anonymous classes.
    pub fn declaring_class(&self) -> Option<ClassId> {
        self.declaring_class
    }

    /// Enclosing method for local and anonymous classes.
    pub fn declaring_method(&self) -> Option<MethodId> {
        self.declaring_method
    }

    /// Recorded extends clause.
    pub fn super_ref(&self) -> Option<&NameRef> {
        self.super_ref.as_ref()
    }

    /// Recorded implements clause.
    pub fn interface_refs(&self) -> &[NameRef] {
        &self.interface_refs
    }

    /// Fields owned by this class, in declaration order.
    pub fn fields(&self) -> &[FieldId] {
        &self.fields
    }

    /// Methods (including constructors and initializers) owned by this class.
    pub fn methods(&self) -> &[MethodId] {
        &self.methods
    }

    /// Nested classes owned by this class.
    pub fn inner_classes(&self) -> &[ClassId] {
        &self.inner_classes
    }
}

/// A method, constructor, or initializer block.
#[derive(Debug, Clone)]
pub struct MethodData {
    pub(crate) key: String,
    pub(crate) name: String,
    pub(crate) signature: String,
    pub(crate) kind: MethodKind,
    pub(crate) modifiers: Modifiers,
    pub(crate) origin: EntityOrigin,
    pub(crate) binding_ok: bool,
    pub(crate) span: Option<SourceSpan>,
    pub(crate) declaring_class: ClassId,
    pub(crate) parameter_types: SmallVec<[String; 4]>,
    pub(crate) return_type: Option<String>,
    /// Types named in the signature: parameters, return, thrown, local types
    pub(crate) type_use_refs: Vec<NameRef>,
    pub(crate) locals: Vec<LocalId>,
    pub(crate) body: Option<Arc<Block>>,
    // Cross-reference edges, resolver-owned
    pub(crate) calls: IndexSet<MethodId>,
    pub(crate) called_by: IndexSet<MethodId>,
    pub(crate) called_by_fields: IndexSet<FieldId>,
    pub(crate) overrides: IndexSet<MethodId>,
    pub(crate) overridden_by: IndexSet<MethodId>,
    pub(crate) accessed_fields: IndexSet<FieldId>,
}

impl MethodData {
    pub(crate) fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        signature: impl Into<String>,
        kind: MethodKind,
        declaring_class: ClassId,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            signature: signature.into(),
            kind,
            modifiers: Modifiers::NONE,
            origin: EntityOrigin::Project,
            binding_ok: true,
            span: None,
            declaring_class,
            parameter_types: SmallVec::new(),
            return_type: None,
            type_use_refs: Vec::new(),
            locals: Vec::new(),
            body: None,
            calls: IndexSet::new(),
            called_by: IndexSet::new(),
            called_by_fields: IndexSet::new(),
            overrides: IndexSet::new(),
            overridden_by: IndexSet::new(),
            accessed_fields: IndexSet::new(),
        }
    }

    /// Registry key: declaring-class FQN plus signature.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signature: name plus ordered parameter type list.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Member kind.
    pub fn kind(&self) -> MethodKind {
        self.kind
    }

    /// Modifier bits.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// False for external placeholder entities.
    pub fn is_in_project(&self) -> bool {
        self.origin == EntityOrigin::Project
    }

    /// False when some reference inside this method failed to resolve.
    pub fn binding_ok(&self) -> bool {
        self.binding_ok
    }

    /// Source span of the declaration.
    pub fn span(&self) -> Option<SourceSpan> {
        self.span
    }

    /// The class declaring this method.
    pub fn declaring_class(&self) -> ClassId {
        self.declaring_class
    }

    /// Fully-qualified parameter type names.
    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    /// Fully-qualified return type name.
    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    /// Locals (and parameters) registered for this method.
    pub fn locals(&self) -> &[LocalId] {
        &self.locals
    }

    /// Retained body, used by the resolver and the metrics engine.
    pub(crate) fn body(&self) -> Option<&Arc<Block>> {
        self.body.as_ref()
    }
}

/// A field or enum constant.
#[derive(Debug, Clone)]
pub struct FieldData {
    pub(crate) key: String,
    pub(crate) name: String,
    pub(crate) type_ref: Option<NameRef>,
    pub(crate) modifiers: Modifiers,
    pub(crate) is_enum_constant: bool,
    pub(crate) origin: EntityOrigin,
    pub(crate) binding_ok: bool,
    pub(crate) span: Option<SourceSpan>,
    pub(crate) declaring_class: ClassId,
    pub(crate) initializer: Option<Arc<Expr>>,
    // Cross-reference edges, resolver-owned
    pub(crate) accessed_by_methods: IndexSet<MethodId>,
    pub(crate) accessed_by_fields: IndexSet<FieldId>,
    pub(crate) accessed_fields: IndexSet<FieldId>,
    pub(crate) calls: IndexSet<MethodId>,
}

impl FieldData {
    pub(crate) fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        declaring_class: ClassId,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            type_ref: None,
            modifiers: Modifiers::NONE,
            is_enum_constant: false,
            origin: EntityOrigin::Project,
            binding_ok: true,
            span: None,
            declaring_class,
            initializer: None,
            accessed_by_methods: IndexSet::new(),
            accessed_by_fields: IndexSet::new(),
            accessed_fields: IndexSet::new(),
            calls: IndexSet::new(),
        }
    }

    /// Registry key: declaring-class FQN plus field name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type name, when known.
    pub fn type_name(&self) -> Option<&str> {
        self.type_ref.as_ref().map(|type_ref| type_ref.name.as_str())
    }

    /// Modifier bits.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// True for enum constants.
    pub fn is_enum_constant(&self) -> bool {
        self.is_enum_constant
    }

    /// False for external placeholder entities.
    pub fn is_in_project(&self) -> bool {
        self.origin == EntityOrigin::Project
    }

    /// False when some reference in the initializer failed to resolve.
    pub fn binding_ok(&self) -> bool {
        self.binding_ok
    }

    /// Source span of the declaration.
    pub fn span(&self) -> Option<SourceSpan> {
        self.span
    }

    /// The class declaring this field.
    pub fn declaring_class(&self) -> ClassId {
        self.declaring_class
    }

    /// Retained initializer, used by the resolver and the metrics engine.
    pub(crate) fn initializer(&self) -> Option<&Arc<Expr>> {
        self.initializer.as_ref()
    }
}

/// A local variable or parameter of a method.
#[derive(Debug, Clone)]
pub struct LocalData {
    pub(crate) name: String,
    pub(crate) occurrence: u32,
    pub(crate) type_name: Option<String>,
    pub(crate) modifiers: Modifiers,
    pub(crate) is_parameter: bool,
    pub(crate) declaring_method: MethodId,
    pub(crate) reads: u32,
}

impl LocalData {
    pub(crate) fn new(
        name: impl Into<String>,
        occurrence: u32,
        declaring_method: MethodId,
    ) -> Self {
        Self {
            name: name.into(),
            occurrence,
            type_name: None,
            modifiers: Modifiers::NONE,
            is_parameter: false,
            declaring_method,
            reads: 0,
        }
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Disambiguator among same-named locals of the method.
    pub fn occurrence(&self) -> u32 {
        self.occurrence
    }

    /// Declared type name, when known.
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Modifier bits.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// True for formal parameters.
    pub fn is_parameter(&self) -> bool {
        self.is_parameter
    }

    /// The method declaring this local.
    pub fn declaring_method(&self) -> MethodId {
        self.declaring_method
    }

    /// Number of accesses the resolver attributed to this local.
    pub fn reads(&self) -> u32 {
        self.reads
    }
}

/// Last dot- or dollar-separated segment of a qualified name.
pub(crate) fn simple_name(fqn: &str) -> &str {
    fqn.rsplit(['.', '$']).next().unwrap_or(fqn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::TypeRef;

    #[test]
    fn test_name_ref_prefers_binding() {
        let resolved = NameRef::from_type_ref(&TypeRef::resolved("A", "p.A"));
        assert_eq!(resolved.name, "p.A");
        assert!(resolved.resolved);

        let raw = NameRef::from_type_ref(&TypeRef::named("A"));
        assert_eq!(raw.name, "A");
        assert!(!raw.resolved);
    }

    #[test]
    fn test_external_stub_shape() {
        let stub = ClassData::external_stub("java.util.List");
        assert!(!stub.is_in_project());
        assert_eq!(stub.name(), "List");
        assert_eq!(stub.fqn(), "java.util.List");
        assert!(stub.fields().is_empty());
        assert!(stub.methods().is_empty());
    }

    #[test]
    fn test_simple_name_segments() {
        assert_eq!(simple_name("p.q.Outer$Inner"), "Inner");
        assert_eq!(simple_name("p.A"), "A");
        assert_eq!(simple_name("A"), "A");
    }
}
