//! Pass 1: structural model construction.
//!
//! Consumes the batch of compilation units and populates the entity arenas:
//! packages, files, classes (including nested, local, and anonymous classes
//! discovered inside method bodies), fields, methods, and local tables.
//! Structural links (declaring package/file/class/method, owned members) are
//! set exactly once, here. Cross-entity references are merely recorded as
//! [`NameRef`]s for the resolver; no relationship edges exist yet.
//!
//! Degradation policy: a unit whose parse failed is excluded entirely; a type
//! declaration without a binding is kept under the `.UNKNOWN` placeholder
//! name with cleared modifiers, still counted as part of the project.

use ahash::AHashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::registry::EntityRegistry;
use crate::core::session::AnalysisSession;
use crate::frontend::{
    Block, CompilationUnit, Expr, FieldDecl, InitializerDecl, LocalBinding, LocalVariable,
    MemberDecl, MethodDecl, MethodKind, Modifiers, Statement, TypeDecl, TypeRef,
};
use crate::model::entities::{ClassData, FieldData, FileData, LocalData, MethodData, NameRef};
use crate::model::ids::{ClassId, FileId, MethodId, PackageId};
use crate::model::phases::StructuralModel;
use crate::model::store::ModelCore;

/// Simple name used for declarations whose binding could not be resolved.
const UNKNOWN_NAME: &str = "UNKNOWN";

/// Nesting context threaded through declaration processing.
#[derive(Clone)]
struct TypeContext {
    package: PackageId,
    file: FileId,
    /// Qualified-name prefix contributed by the package; empty in the
    /// default package
    package_prefix: String,
    declaring_class: Option<ClassId>,
    declaring_method: Option<MethodId>,
}

/// Pass 1: builds a [`StructuralModel`] from compilation units.
pub struct ModelBuilder<'a> {
    session: &'a AnalysisSession,
    core: ModelCore,
    fqn_index: AHashMap<String, ClassId>,
    package_index: AHashMap<String, PackageId>,
    anonymous_counters: AHashMap<String, u32>,
    initializer_counters: AHashMap<ClassId, u32>,
    files_processed: usize,
    files_skipped: usize,
}

impl<'a> ModelBuilder<'a> {
    /// Create a builder bound to a session.
    pub fn new(session: &'a AnalysisSession) -> Self {
        let config = session.config();
        Self {
            session,
            core: ModelCore::new(config.project_name.clone(), config.project_root.clone()),
            fqn_index: AHashMap::new(),
            package_index: AHashMap::new(),
            anonymous_counters: AHashMap::new(),
            initializer_counters: AHashMap::new(),
            files_processed: 0,
            files_skipped: 0,
        }
    }

    /// Consume the unit batch and produce the structural model. Units may
    /// arrive in any order; identity dedup makes the result order-independent.
    pub fn build(mut self, units: &[CompilationUnit]) -> StructuralModel {
        for unit in units {
            if unit.parse_failed {
                warn!("excluding '{}' from the model: parse failed", unit.path);
                self.files_skipped += 1;
                continue;
            }
            self.add_unit(unit);
            self.files_processed += 1;
        }

        info!(
            files = self.files_processed,
            skipped = self.files_skipped,
            packages = self.core.packages.len(),
            classes = self.core.classes.len(),
            methods = self.core.methods.len(),
            fields = self.core.fields.len(),
            "structural pass complete"
        );

        StructuralModel {
            core: self.core,
            fqn_index: self.fqn_index,
            files_processed: self.files_processed,
            files_skipped: self.files_skipped,
        }
    }

    fn add_unit(&mut self, unit: &CompilationUnit) {
        let (package_name, package_prefix) = match &unit.package {
            Some(decl) => (decl.name.clone(), decl.name.clone()),
            None => (
                self.session.config().default_package_name.clone(),
                String::new(),
            ),
        };
        let package = self.intern_package(&package_name);
        let file = self.core.push_file(FileData::new(unit.path.clone(), package));
        debug!("modeling '{}' into package '{}'", unit.path, package_name);

        let context = TypeContext {
            package,
            file,
            package_prefix,
            declaring_class: None,
            declaring_method: None,
        };
        for decl in &unit.types {
            self.add_type(decl, &context);
        }
    }

    fn intern_package(&mut self, name: &str) -> PackageId {
        if let Some(&existing) = self.package_index.get(name) {
            return existing;
        }
        let id = self
            .core
            .push_package(crate::model::entities::PackageData::new(name));
        self.package_index.insert(name.to_string(), id);
        id
    }

    /// Qualified-name prefix for members of the current scope.
    fn scope_prefix(&self, context: &TypeContext) -> String {
        match context.declaring_class {
            Some(enclosing) => self.core.class(enclosing).fqn.clone(),
            None => context.package_prefix.clone(),
        }
    }

    fn add_type(&mut self, decl: &TypeDecl, context: &TypeContext) -> ClassId {
        let anonymous = decl.name.is_empty();
        let (fqn, name, modifiers, binding_ok) = if anonymous {
            let prefix = self.scope_prefix(context);
            let counter = self.anonymous_counters.entry(prefix.clone()).or_insert(0);
            *counter += 1;
            let index = *counter;
            (
                format!("{prefix}${index}"),
                format!("${index}"),
                decl.modifiers,
                true,
            )
        } else if let Some(binding) = &decl.binding {
            (
                binding.qualified_name.clone(),
                decl.name.clone(),
                decl.modifiers,
                true,
            )
        } else {
            let prefix = self.scope_prefix(context);
            (
                format!("{prefix}.{UNKNOWN_NAME}"),
                UNKNOWN_NAME.to_string(),
                Modifiers::NONE,
                false,
            )
        };

        let registry = self.session.registry();
        let mut created = false;
        let class_id = {
            let core = &mut self.core;
            registry.get_or_create_class(&fqn, || {
                created = true;
                core.push_class(ClassData::new_project(
                    fqn.clone(),
                    name.clone(),
                    decl.kind,
                    modifiers,
                ))
            })
        };
        if !created {
            // Re-encountered identity: the cached entity stands, structural
            // links are not revisited.
            return class_id;
        }

        self.fqn_index.insert(fqn.clone(), class_id);
        {
            let class = self.core.class_mut(class_id);
            class.binding_ok = binding_ok;
            class.span = decl.span;
            class.package = Some(context.package);
            class.file = Some(context.file);
            class.declaring_class = context.declaring_class;
            class.declaring_method = context.declaring_method;
            class.super_ref = decl.super_class.as_ref().map(NameRef::from_type_ref);
            class.interface_refs = decl.interfaces.iter().map(NameRef::from_type_ref).collect();
        }
        match context.declaring_class {
            Some(outer) => self.core.class_mut(outer).inner_classes.push(class_id),
            None => {
                self.core.package_mut(context.package).classes.push(class_id);
                self.core.file_mut(context.file).classes.push(class_id);
            }
        }

        let member_context = TypeContext {
            declaring_class: Some(class_id),
            declaring_method: None,
            ..context.clone()
        };
        for member in &decl.members {
            match member {
                MemberDecl::Field(field) => self.add_field(field, class_id, &fqn, &member_context),
                MemberDecl::Method(method) => {
                    self.add_method(method, class_id, &fqn, &member_context)
                }
                MemberDecl::Initializer(initializer) => {
                    self.add_initializer(initializer, class_id, &fqn, &member_context)
                }
                MemberDecl::Type(nested) => {
                    self.add_type(nested, &member_context);
                }
            }
        }
        class_id
    }

    fn add_field(
        &mut self,
        decl: &FieldDecl,
        class_id: ClassId,
        class_fqn: &str,
        context: &TypeContext,
    ) {
        let key = EntityRegistry::field_key(class_fqn, &decl.name);
        let registry = self.session.registry();
        let mut created = false;
        let field_id = {
            let core = &mut self.core;
            registry.get_or_create_field(&key, || {
                created = true;
                core.push_field(FieldData::new(key.clone(), decl.name.clone(), class_id))
            })
        };
        if !created {
            return;
        }

        {
            let field = self.core.field_mut(field_id);
            field.modifiers = decl.modifiers;
            field.is_enum_constant = decl.is_enum_constant;
            field.span = decl.span;
            field.type_ref = match &decl.type_ref {
                Some(type_ref) => Some(NameRef::from_type_ref(type_ref)),
                // Enum constants are typed by their declaring enum
                None if decl.is_enum_constant => Some(NameRef {
                    name: class_fqn.to_string(),
                    resolved: true,
                }),
                None => None,
            };
            field.initializer = decl.initializer.as_ref().map(|expr| Arc::new(expr.clone()));
        }
        self.core.class_mut(class_id).fields.push(field_id);

        if let Some(initializer) = &decl.initializer {
            let field_context = TypeContext {
                declaring_class: Some(class_id),
                declaring_method: None,
                ..context.clone()
            };
            self.scan_expression_types(initializer, &field_context);
        }
    }

    fn add_method(
        &mut self,
        decl: &MethodDecl,
        class_id: ClassId,
        class_fqn: &str,
        context: &TypeContext,
    ) {
        let parameter_types: Vec<String> = match &decl.binding {
            Some(binding) => binding.parameter_types.clone(),
            None => decl
                .parameters
                .iter()
                .map(|parameter| {
                    parameter
                        .type_ref
                        .as_ref()
                        .map(|type_ref| NameRef::from_type_ref(type_ref).name)
                        .unwrap_or_else(|| "?".to_string())
                })
                .collect(),
        };
        let signature = format!("{}({})", decl.name, parameter_types.join(","));
        let key = EntityRegistry::method_key(class_fqn, &signature);

        let registry = self.session.registry();
        let mut created = false;
        let method_id = {
            let core = &mut self.core;
            registry.get_or_create_method(&key, || {
                created = true;
                core.push_method(MethodData::new(
                    key.clone(),
                    decl.name.clone(),
                    signature.clone(),
                    decl.kind,
                    class_id,
                ))
            })
        };
        if !created {
            return;
        }

        {
            let method = self.core.method_mut(method_id);
            method.modifiers = decl.modifiers;
            method.span = decl.span;
            method.parameter_types = parameter_types.iter().cloned().collect();
            method.return_type = decl
                .binding
                .as_ref()
                .and_then(|binding| binding.return_type.clone())
                .or_else(|| {
                    decl.return_type
                        .as_ref()
                        .map(|type_ref| NameRef::from_type_ref(type_ref).name)
                });

            let mut type_uses: Vec<NameRef> = decl
                .parameters
                .iter()
                .filter_map(|parameter| parameter.type_ref.as_ref())
                .map(NameRef::from_type_ref)
                .collect();
            if let Some(return_type) = &decl.return_type {
                type_uses.push(NameRef::from_type_ref(return_type));
            }
            type_uses.extend(decl.thrown.iter().map(NameRef::from_type_ref));
            method.type_use_refs = type_uses;
            method.body = decl.body.as_ref().map(|body| Arc::new(body.clone()));
        }
        self.core.class_mut(class_id).methods.push(method_id);

        let mut occurrences: AHashMap<String, u32> = AHashMap::new();
        if self.session.config().collect_locals {
            for parameter in &decl.parameters {
                self.register_local(
                    method_id,
                    &parameter.name,
                    None,
                    parameter.type_ref.as_ref(),
                    parameter.modifiers,
                    true,
                    &mut occurrences,
                );
            }
        }
        if let Some(body) = &decl.body {
            self.scan_body(body, method_id, class_id, context, &mut occurrences);
        }
    }

    fn add_initializer(
        &mut self,
        decl: &InitializerDecl,
        class_id: ClassId,
        class_fqn: &str,
        context: &TypeContext,
    ) {
        let counter = self.initializer_counters.entry(class_id).or_insert(0);
        let index = *counter;
        *counter += 1;

        let signature = format!("<initializer${index}>()");
        let key = EntityRegistry::method_key(class_fqn, &signature);
        let registry = self.session.registry();
        let method_id = {
            let core = &mut self.core;
            registry.get_or_create_method(&key, || {
                core.push_method(MethodData::new(
                    key.clone(),
                    "<initializer>",
                    signature.clone(),
                    MethodKind::Initializer,
                    class_id,
                ))
            })
        };

        {
            let method = self.core.method_mut(method_id);
            method.modifiers = decl.modifiers;
            method.span = decl.span;
            method.body = Some(Arc::new(decl.body.clone()));
        }
        self.core.class_mut(class_id).methods.push(method_id);

        let mut occurrences: AHashMap<String, u32> = AHashMap::new();
        self.scan_body(&decl.body, method_id, class_id, context, &mut occurrences);
    }

    /// Walk a method or initializer body: register declared locals, record
    /// local type uses, and pick up local and anonymous type declarations.
    fn scan_body(
        &mut self,
        body: &Block,
        method_id: MethodId,
        class_id: ClassId,
        context: &TypeContext,
        occurrences: &mut AHashMap<String, u32>,
    ) {
        let collect_locals = self.session.config().collect_locals;
        let body_context = TypeContext {
            declaring_class: Some(class_id),
            declaring_method: Some(method_id),
            ..context.clone()
        };

        let mut type_uses: Vec<NameRef> = Vec::new();
        let mut nested_types: Vec<TypeDecl> = Vec::new();
        let mut declared: Vec<(String, Option<LocalBinding>, Option<TypeRef>, Modifiers)> =
            Vec::new();

        let mut statements: Vec<&Statement> = body.statements.iter().rev().collect();
        while let Some(statement) = statements.pop() {
            match statement {
                Statement::LocalDecl { variables } => {
                    for variable in variables {
                        record_variable(variable, &mut declared, &mut type_uses);
                    }
                }
                Statement::ForEach { variable, .. } => {
                    record_variable(variable, &mut declared, &mut type_uses);
                }
                Statement::Try { catches, .. } => {
                    for catch in catches {
                        record_variable(&catch.parameter, &mut declared, &mut type_uses);
                    }
                }
                Statement::LocalType(nested) => {
                    nested_types.push(nested.clone());
                }
                _ => {}
            }

            let mut expressions: Vec<&Expr> = statement.expressions();
            while let Some(expression) = expressions.pop() {
                if let Expr::New(creation) = expression {
                    if let Some(anonymous) = &creation.anonymous_body {
                        nested_types.push(anonymous.as_ref().clone());
                    }
                }
                expressions.extend(expression.children());
            }

            let mut children = statement.child_statements();
            children.reverse();
            statements.extend(children);
        }

        if collect_locals {
            for (name, binding, type_ref, modifiers) in &declared {
                self.register_local(
                    method_id,
                    name,
                    binding.as_ref(),
                    type_ref.as_ref(),
                    *modifiers,
                    false,
                    occurrences,
                );
            }
        }
        self.core
            .method_mut(method_id)
            .type_use_refs
            .extend(type_uses);
        for nested in &nested_types {
            self.add_type(nested, &body_context);
        }
    }

    /// Anonymous classes can appear in field initializers too.
    fn scan_expression_types(&mut self, expression: &Expr, context: &TypeContext) {
        let mut expressions: Vec<&Expr> = vec![expression];
        let mut nested_types: Vec<TypeDecl> = Vec::new();
        while let Some(expression) = expressions.pop() {
            if let Expr::New(creation) = expression {
                if let Some(anonymous) = &creation.anonymous_body {
                    nested_types.push(anonymous.as_ref().clone());
                }
            }
            expressions.extend(expression.children());
        }
        for nested in &nested_types {
            self.add_type(nested, context);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn register_local(
        &mut self,
        method_id: MethodId,
        name: &str,
        binding: Option<&LocalBinding>,
        type_ref: Option<&TypeRef>,
        modifiers: Modifiers,
        is_parameter: bool,
        occurrences: &mut AHashMap<String, u32>,
    ) {
        let occurrence = match binding {
            Some(binding) => binding.occurrence,
            None => *occurrences.get(name).unwrap_or(&0),
        };
        let counter = occurrences.entry(name.to_string()).or_insert(0);
        *counter = (*counter).max(occurrence + 1);

        let mut data = LocalData::new(name, occurrence, method_id);
        data.type_name = type_ref.map(|type_ref| NameRef::from_type_ref(type_ref).name);
        data.modifiers = modifiers;
        data.is_parameter = is_parameter;
        let local_id = self.core.push_local(data);
        self.core.method_mut(method_id).locals.push(local_id);
    }
}

fn record_variable(
    variable: &LocalVariable,
    declared: &mut Vec<(String, Option<LocalBinding>, Option<TypeRef>, Modifiers)>,
    type_uses: &mut Vec<NameRef>,
) {
    declared.push((
        variable.name.clone(),
        variable.binding.clone(),
        variable.type_ref.clone(),
        variable.modifiers,
    ));
    if let Some(type_ref) = &variable.type_ref {
        type_uses.push(NameRef::from_type_ref(type_ref));
    }
}
