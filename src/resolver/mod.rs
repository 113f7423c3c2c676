//! Pass 2: cross-reference resolution.
//!
//! Runs strictly after the whole project has been structurally modeled, and
//! turns recorded names into entity-to-entity edges: class hierarchy, type
//! uses (class and package coupling), override relationships, method calls,
//! and variable accesses. References that leave the project resolve to
//! external placeholder stubs; references the front-end could not bind mark
//! the containing entity's `binding_ok` flag and are aggregated into a
//! [`BindingReport`], never aborting the pass.
//!
//! All walks over the live graph are iterative with visited sets; see the
//! hierarchy operations on the store.

use ahash::AHashMap;
use tracing::{debug, info, warn};

use crate::core::config::AnalysisConfig;
use crate::core::registry::EntityRegistry;
use crate::core::session::AnalysisSession;
use crate::frontend::{
    Expr, FieldBinding, MethodBinding, MethodKind, Statement, VariableBinding,
};
use crate::model::entities::{EntityOrigin, NameRef};
use crate::model::external::ExternalEntityFactory;
use crate::model::ids::{ClassId, FieldId, MethodId};
use crate::model::phases::{BindingReport, ResolvedModel, StructuralModel};
use crate::model::store::ModelCore;

/// Primitive type names that never become class entities.
const PRIMITIVE_TYPES: &[&str] = &[
    "boolean", "byte", "char", "double", "float", "int", "long", "short", "void",
];

/// Pass 2: consumes a [`StructuralModel`] and produces a [`ResolvedModel`].
pub struct CrossReferenceResolver<'a> {
    session: &'a AnalysisSession,
}

/// Which entity owns the expression currently being resolved.
#[derive(Clone, Copy)]
enum AccessOwner {
    Method(MethodId),
    Field(FieldId),
}

impl<'a> CrossReferenceResolver<'a> {
    /// Create a resolver bound to a session.
    pub fn new(session: &'a AnalysisSession) -> Self {
        Self { session }
    }

    /// Resolve every cross-reference in the model.
    pub fn resolve(self, model: StructuralModel) -> ResolvedModel {
        let StructuralModel {
            core,
            fqn_index,
            files_processed,
            files_skipped,
        } = model;

        let mut resolution = Resolution {
            registry: self.session.registry(),
            config: self.session.config(),
            core,
            fqn_index,
        };

        // Snapshot the project entities; external stubs appended during
        // resolution are targets only and never walked.
        let project_classes: Vec<ClassId> = resolution.project_class_ids();
        let project_methods: Vec<MethodId> = resolution.project_method_ids();
        let project_fields: Vec<FieldId> = resolution.project_field_ids();

        for &class_id in &project_classes {
            resolution.link_hierarchy(class_id);
        }
        for &method_id in &project_methods {
            resolution.resolve_overrides(method_id);
            resolution.resolve_signature_uses(method_id);
            resolution.resolve_method_body(method_id);
        }
        for &field_id in &project_fields {
            resolution.resolve_field_initializer(field_id);
        }

        let cycles = resolution.core.hierarchy_cycles();
        for cycle in &cycles {
            let members: Vec<&str> = cycle
                .iter()
                .map(|&class| resolution.core.class(class).fqn())
                .collect();
            warn!("inheritance cycle in resolved hierarchy: {}", members.join(" -> "));
        }

        let binding_report = resolution.build_report();
        if !binding_report.is_complete() {
            warn!(
                classes = binding_report.classes_incomplete.len(),
                methods = binding_report.methods_incomplete.len(),
                fields = binding_report.fields_incomplete.len(),
                "entities with incomplete bindings"
            );
        }
        info!(
            classes = project_classes.len(),
            methods = project_methods.len(),
            fields = project_fields.len(),
            "cross-reference pass complete"
        );

        ResolvedModel {
            structural: StructuralModel {
                core: resolution.core,
                fqn_index: resolution.fqn_index,
                files_processed,
                files_skipped,
            },
            binding_report,
        }
    }
}

struct Resolution<'a> {
    registry: &'a EntityRegistry,
    config: &'a AnalysisConfig,
    core: ModelCore,
    fqn_index: AHashMap<String, ClassId>,
}

impl Resolution<'_> {
    fn project_class_ids(&self) -> Vec<ClassId> {
        self.core
            .classes
            .iter()
            .enumerate()
            .filter(|(_, class)| class.origin == EntityOrigin::Project)
            .map(|(index, _)| ClassId::new(index))
            .collect()
    }

    fn project_method_ids(&self) -> Vec<MethodId> {
        self.core
            .methods
            .iter()
            .enumerate()
            .filter(|(_, method)| method.origin == EntityOrigin::Project)
            .map(|(index, _)| MethodId::new(index))
            .collect()
    }

    fn project_field_ids(&self) -> Vec<FieldId> {
        self.core
            .fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.origin == EntityOrigin::Project)
            .map(|(index, _)| FieldId::new(index))
            .collect()
    }

    /// Resolve a class FQN to the project entity when one was declared,
    /// falling back to an external stub only when the name is not in the
    /// project.
    fn lookup_or_external_class(&mut self, fqn: &str) -> ClassId {
        if let Some(existing) = self.registry.lookup_class(fqn) {
            return existing;
        }
        let stub = ExternalEntityFactory::class(&mut self.core, self.registry, fqn);
        self.fqn_index.insert(fqn.to_string(), stub);
        stub
    }

    fn method_target(&mut self, binding: &MethodBinding) -> MethodId {
        let signature = format!("{}({})", binding.name, binding.parameter_types.join(","));
        let key = EntityRegistry::method_key(&binding.declaring_class, &signature);
        if let Some(existing) = self.registry.lookup_method(&key) {
            return existing;
        }
        ExternalEntityFactory::method(
            &mut self.core,
            self.registry,
            &binding.declaring_class,
            &binding.name,
            &binding.parameter_types,
        )
    }

    fn field_target(&mut self, binding: &FieldBinding) -> FieldId {
        let key = EntityRegistry::field_key(&binding.declaring_class, &binding.name);
        if let Some(existing) = self.registry.lookup_field(&key) {
            return existing;
        }
        ExternalEntityFactory::field(
            &mut self.core,
            self.registry,
            &binding.declaring_class,
            &binding.name,
        )
    }

    fn mark_class(&mut self, class_id: ClassId) {
        self.core.class_mut(class_id).binding_ok = false;
    }

    fn mark_owner(&mut self, owner: AccessOwner) {
        match owner {
            AccessOwner::Method(method_id) => {
                self.core.method_mut(method_id).binding_ok = false;
            }
            AccessOwner::Field(field_id) => {
                self.core.field_mut(field_id).binding_ok = false;
            }
        }
    }

    /// Record a class-body type use, filtering primitives and array/generic
    /// decoration.
    fn add_type_use(&mut self, class_id: ClassId, name: &str) {
        if let Some(base) = class_use_target(name) {
            let base = base.to_string();
            let target = self.lookup_or_external_class(&base);
            self.core.add_class_dependency(class_id, target);
        }
    }

    // ---- classes ----

    fn link_hierarchy(&mut self, class_id: ClassId) {
        let super_ref = self.core.class(class_id).super_ref.clone();
        if let Some(super_ref) = super_ref {
            if super_ref.resolved {
                let target = self.lookup_or_external_class(&super_ref.name);
                self.core.link_super_class(class_id, target);
                self.core.add_class_dependency(class_id, target);
            } else {
                debug!(
                    "unresolved super-class '{}' on {}",
                    super_ref.name,
                    self.core.class(class_id).fqn()
                );
                self.mark_class(class_id);
            }
        }

        let interface_refs = self.core.class(class_id).interface_refs.clone();
        for interface_ref in interface_refs {
            if interface_ref.resolved {
                let target = self.lookup_or_external_class(&interface_ref.name);
                self.core.link_super_interface(class_id, target);
                self.core.add_class_dependency(class_id, target);
            } else {
                self.mark_class(class_id);
            }
        }

        // Declared field types are class-body type uses.
        let field_ids = self.core.class(class_id).fields.clone();
        for field_id in field_ids {
            let type_ref = self.core.field(field_id).type_ref.clone();
            if let Some(type_ref) = type_ref {
                if type_ref.resolved {
                    self.add_type_use(class_id, &type_ref.name);
                } else {
                    self.core.field_mut(field_id).binding_ok = false;
                }
            }
        }
    }

    // ---- methods ----

    /// Match this method against every ancestor along the super-class chain.
    /// Override chains can skip levels, so the whole chain is walked; static
    /// and private members never participate.
    fn resolve_overrides(&mut self, method_id: MethodId) {
        let method = self.core.method(method_id);
        if method.kind != MethodKind::Method
            || method.modifiers.is_static()
            || method.modifiers.is_private()
        {
            return;
        }
        let signature = method.signature.clone();
        let class_id = method.declaring_class;

        for ancestor in self.core.all_superclasses(class_id) {
            if !self.core.class(ancestor).is_in_project() {
                continue;
            }
            let target = self.core.class(ancestor).methods.iter().copied().find(|&candidate| {
                let data = self.core.method(candidate);
                data.kind == MethodKind::Method
                    && data.signature == signature
                    && !data.modifiers.is_static()
                    && !data.modifiers.is_private()
            });
            if let Some(target) = target {
                self.core.add_override(method_id, target);
            }
        }
    }

    /// Parameter, return, thrown, and local-variable types recorded during
    /// building become class-level uses of the declaring class.
    fn resolve_signature_uses(&mut self, method_id: MethodId) {
        let class_id = self.core.method(method_id).declaring_class;
        let refs: Vec<NameRef> = self.core.method(method_id).type_use_refs.clone();
        for name_ref in refs {
            if name_ref.resolved {
                self.add_type_use(class_id, &name_ref.name);
            } else {
                self.mark_owner(AccessOwner::Method(method_id));
            }
        }
    }

    fn resolve_method_body(&mut self, method_id: MethodId) {
        let Some(body) = self.core.method(method_id).body().cloned() else {
            return;
        };
        let class_id = self.core.method(method_id).declaring_class;

        let mut statements: Vec<&Statement> = body.statements.iter().collect();
        while let Some(statement) = statements.pop() {
            for expression in statement.expressions() {
                self.resolve_expression_tree(expression, AccessOwner::Method(method_id), class_id);
            }
            statements.extend(statement.child_statements());
        }
    }

    fn resolve_field_initializer(&mut self, field_id: FieldId) {
        let Some(initializer) = self.core.field(field_id).initializer().cloned() else {
            return;
        };
        let class_id = self.core.field(field_id).declaring_class;
        self.resolve_expression_tree(&initializer, AccessOwner::Field(field_id), class_id);
    }

    // ---- expressions ----

    fn resolve_expression_tree(&mut self, root: &Expr, owner: AccessOwner, class_id: ClassId) {
        let mut expressions: Vec<&Expr> = vec![root];
        while let Some(expression) = expressions.pop() {
            match expression {
                Expr::Call(call) => match &call.binding {
                    Some(binding) => {
                        let target = self.method_target(binding);
                        match owner {
                            AccessOwner::Method(method_id) => self.core.add_call(method_id, target),
                            AccessOwner::Field(field_id) => {
                                self.core.add_field_call(field_id, target)
                            }
                        }
                        self.add_type_use(class_id, &binding.declaring_class.clone());
                    }
                    None => self.mark_owner(owner),
                },
                Expr::New(creation) => {
                    let type_name = creation.type_ref.as_ref().map(NameRef::from_type_ref);
                    match (&creation.binding, &type_name) {
                        (Some(binding), _) => {
                            let target = self.method_target(binding);
                            match owner {
                                AccessOwner::Method(method_id) => {
                                    self.core.add_call(method_id, target)
                                }
                                AccessOwner::Field(field_id) => {
                                    self.core.add_field_call(field_id, target)
                                }
                            }
                            self.add_type_use(class_id, &binding.declaring_class.clone());
                        }
                        (None, Some(name_ref)) if name_ref.resolved => {
                            self.add_type_use(class_id, &name_ref.name.clone());
                        }
                        _ => self.mark_owner(owner),
                    }
                }
                Expr::VarAccess(access) => match &access.binding {
                    Some(VariableBinding::Field(binding)) => {
                        let target = self.field_target(binding);
                        match owner {
                            AccessOwner::Method(method_id) => {
                                self.core.add_method_field_access(method_id, target)
                            }
                            AccessOwner::Field(field_id) => {
                                self.core.add_field_field_access(field_id, target)
                            }
                        }
                        self.add_type_use(class_id, &binding.declaring_class.clone());
                    }
                    Some(VariableBinding::Local(binding)) => {
                        if self.config.collect_locals {
                            self.resolve_local_access(owner, binding.clone());
                        }
                    }
                    None => self.mark_owner(owner),
                },
                Expr::Cast { type_ref, .. } => {
                    if let Some(type_ref) = type_ref {
                        let name_ref = NameRef::from_type_ref(type_ref);
                        if name_ref.resolved {
                            self.add_type_use(class_id, &name_ref.name);
                        } else {
                            self.mark_owner(owner);
                        }
                    }
                }
                _ => {}
            }
            expressions.extend(expression.children());
        }
    }

    fn resolve_local_access(&mut self, owner: AccessOwner, binding: crate::frontend::LocalBinding) {
        let AccessOwner::Method(method_id) = owner else {
            // Field initializers have no local table.
            self.mark_owner(owner);
            return;
        };
        let found = self
            .core
            .method(method_id)
            .locals
            .iter()
            .copied()
            .find(|&local| {
                let data = self.core.local(local);
                data.name == binding.name && data.occurrence == binding.occurrence
            });
        match found {
            Some(local) => self.core.local_mut(local).reads += 1,
            None => {
                debug!(
                    "no local ({}, {}) in {}",
                    binding.name,
                    binding.occurrence,
                    self.core.method(method_id).key()
                );
                self.mark_owner(owner);
            }
        }
    }

    // ---- diagnostics ----

    fn build_report(&self) -> BindingReport {
        let mut report = BindingReport::default();
        for class in &self.core.classes {
            if class.origin == EntityOrigin::Project && !class.binding_ok {
                report.classes_incomplete.push(class.fqn.clone());
            }
        }
        for method in &self.core.methods {
            if method.origin == EntityOrigin::Project && !method.binding_ok {
                report.methods_incomplete.push(method.key.clone());
            }
        }
        for field in &self.core.fields {
            if field.origin == EntityOrigin::Project && !field.binding_ok {
                report.fields_incomplete.push(field.key.clone());
            }
        }
        report
    }
}

/// Strip array and generic decoration from a used type name; `None` for
/// primitives, which never become class entities.
fn class_use_target(name: &str) -> Option<&str> {
    let mut base = name;
    while let Some(stripped) = base.strip_suffix("[]") {
        base = stripped;
    }
    base = base.split('<').next().unwrap_or(base);
    if base.is_empty() || PRIMITIVE_TYPES.contains(&base) {
        None
    } else {
        Some(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ModelBuilder;
    use crate::core::config::AnalysisConfig;
    use crate::frontend::{
        Block, CompilationUnit, FieldDecl, MethodCall, MethodDecl, Modifiers, TypeDecl, TypeKind,
        TypeRef, VariableAccess,
    };

    fn analyze(units: &[CompilationUnit]) -> ResolvedModel {
        let session = AnalysisSession::new(AnalysisConfig::default()).unwrap();
        let structural = ModelBuilder::new(&session).build(units);
        CrossReferenceResolver::new(&session).resolve(structural)
    }

    fn class_decl(name: &str, package: &str) -> TypeDecl {
        TypeDecl::new(name, TypeKind::Class).with_binding(format!("{package}.{name}"))
    }

    fn unit_with(package: &str, decl: TypeDecl) -> CompilationUnit {
        let path = format!("{package}/{}.x", decl.name);
        CompilationUnit::new(path).with_package(package).with_type(decl)
    }

    #[test]
    fn test_in_project_super_class_is_not_stubbed() {
        let base = class_decl("Base", "p");
        let derived =
            class_decl("Derived", "p").with_super_class(TypeRef::resolved("Base", "p.Base"));
        let model = analyze(&[unit_with("p", base), unit_with("p", derived)]);

        let base_id = model.class_by_fqn("p.Base").unwrap();
        let derived_id = model.class_by_fqn("p.Derived").unwrap();
        assert_eq!(model.super_class_of(derived_id), Some(base_id));
        assert!(model.class(base_id).is_in_project());
        let children: Vec<ClassId> = model.children_of(base_id).collect();
        assert_eq!(children, vec![derived_id]);
    }

    #[test]
    fn test_external_super_class_becomes_stub() {
        let derived = class_decl("Widget", "p")
            .with_super_class(TypeRef::resolved("JPanel", "javax.swing.JPanel"));
        let model = analyze(&[unit_with("p", derived)]);

        let widget_id = model.class_by_fqn("p.Widget").unwrap();
        let parent = model.super_class_of(widget_id).unwrap();
        assert!(!model.class(parent).is_in_project());
        assert_eq!(model.class(parent).fqn(), "javax.swing.JPanel");
        // external parents are coupling targets
        assert!(model.efferent_classes(widget_id).any(|class| class == parent));
        assert!(model.efferent_classes_in_project(widget_id).is_empty());
    }

    #[test]
    fn test_override_detection_skips_levels() {
        let top = class_decl("Top", "p").with_method(
            MethodDecl::new("render").with_body(Block::default()),
        );
        let middle =
            class_decl("Middle", "p").with_super_class(TypeRef::resolved("Top", "p.Top"));
        let bottom = class_decl("Bottom", "p")
            .with_super_class(TypeRef::resolved("Middle", "p.Middle"))
            .with_method(MethodDecl::new("render").with_body(Block::default()));
        let model = analyze(&[
            unit_with("p", top),
            unit_with("p", middle),
            unit_with("p", bottom),
        ]);

        let top_id = model.class_by_fqn("p.Top").unwrap();
        let bottom_id = model.class_by_fqn("p.Bottom").unwrap();
        let top_render = model.method_by_signature(top_id, "render()").unwrap();
        let bottom_render = model.method_by_signature(bottom_id, "render()").unwrap();

        let overrides: Vec<MethodId> = model.overrides_of(bottom_render).collect();
        assert_eq!(overrides, vec![top_render]);
        let overridden_by: Vec<MethodId> = model.overridden_by_of(top_render).collect();
        assert_eq!(overridden_by, vec![bottom_render]);
    }

    #[test]
    fn test_static_methods_do_not_override() {
        let top = class_decl("Top", "p").with_method(
            MethodDecl::new("helper")
                .with_modifiers(Modifiers::STATIC)
                .with_body(Block::default()),
        );
        let bottom = class_decl("Bottom", "p")
            .with_super_class(TypeRef::resolved("Top", "p.Top"))
            .with_method(
                MethodDecl::new("helper")
                    .with_modifiers(Modifiers::STATIC)
                    .with_body(Block::default()),
            );
        let model = analyze(&[unit_with("p", top), unit_with("p", bottom)]);

        let bottom_id = model.class_by_fqn("p.Bottom").unwrap();
        let helper = model.method_by_signature(bottom_id, "helper()").unwrap();
        assert_eq!(model.overrides_of(helper).count(), 0);
    }

    #[test]
    fn test_call_edges_are_symmetric() {
        let callee = class_decl("Service", "p").with_method(
            MethodDecl::new("run").with_body(Block::default()),
        );
        let caller_body = Block::new(vec![Statement::Expression(Expr::Call(
            MethodCall::resolved("run", "p.Service", vec![]),
        ))]);
        let caller = class_decl("Client", "p")
            .with_method(MethodDecl::new("main").with_body(caller_body));
        let model = analyze(&[unit_with("p", callee), unit_with("p", caller)]);

        let service_id = model.class_by_fqn("p.Service").unwrap();
        let client_id = model.class_by_fqn("p.Client").unwrap();
        let run = model.method_by_signature(service_id, "run()").unwrap();
        let main = model.method_by_signature(client_id, "main()").unwrap();

        assert!(model.calls_of(main).any(|method| method == run));
        assert!(model.callers_of(run).any(|method| method == main));

        // the call is also a type use: Client -> Service both directions
        assert!(model.efferent_classes_in_project(client_id).contains(&service_id));
        assert!(model.afferent_classes_in_project(service_id).contains(&client_id));
    }

    #[test]
    fn test_external_callee_is_target_only() {
        let body = Block::new(vec![Statement::Expression(Expr::Call(
            MethodCall::resolved("println", "java.io.PrintStream", vec![]),
        ))]);
        let caller =
            class_decl("Logger", "p").with_method(MethodDecl::new("log").with_body(body));
        let model = analyze(&[unit_with("p", caller)]);

        let logger_id = model.class_by_fqn("p.Logger").unwrap();
        let log = model.method_by_signature(logger_id, "log()").unwrap();
        let callee = model.calls_of(log).next().unwrap();

        let callee_data = model.method(callee);
        assert!(!callee_data.is_in_project());
        // the external method has no outgoing edges of its own
        assert_eq!(model.calls_of(callee).count(), 0);
        assert_eq!(model.accessed_fields_of(callee).count(), 0);
        assert!(model.callers_of(callee).any(|method| method == log));
    }

    #[test]
    fn test_field_access_edges_and_local_reads() {
        let holder =
            class_decl("Holder", "p").with_field(FieldDecl::new("count").with_binding("p.Holder"));
        let body = Block::new(vec![
            Statement::LocalDecl {
                variables: vec![crate::frontend::LocalVariable::new("tmp", 0)],
            },
            Statement::Expression(Expr::Assignment {
                target: Box::new(Expr::VarAccess(VariableAccess::local("tmp", 0))),
                value: Box::new(Expr::VarAccess(VariableAccess::field("count", "p.Holder"))),
            }),
        ]);
        let reader =
            class_decl("Reader", "p").with_method(MethodDecl::new("read").with_body(body));
        let model = analyze(&[unit_with("p", holder), unit_with("p", reader)]);

        let holder_id = model.class_by_fqn("p.Holder").unwrap();
        let reader_id = model.class_by_fqn("p.Reader").unwrap();
        let count = model.field_by_name(holder_id, "count").unwrap();
        let read = model.method_by_signature(reader_id, "read()").unwrap();

        assert!(model.accessed_fields_of(read).any(|field| field == count));
        assert!(model.method_accessors_of(count).any(|method| method == read));

        let tmp = model.method(read).locals()[0];
        assert_eq!(model.local(tmp).reads(), 1);
        assert!(model.binding_report().is_complete());
    }

    #[test]
    fn test_unresolved_references_flag_binding() {
        let body = Block::new(vec![Statement::Expression(Expr::Call(MethodCall::named(
            "mystery",
        )))]);
        let caller =
            class_decl("Fuzzy", "p").with_method(MethodDecl::new("go").with_body(body));
        let unresolved_super =
            class_decl("Odd", "p").with_super_class(TypeRef::named("Vanished"));
        let model = analyze(&[unit_with("p", caller), unit_with("p", unresolved_super)]);

        let fuzzy_id = model.class_by_fqn("p.Fuzzy").unwrap();
        let go = model.method_by_signature(fuzzy_id, "go()").unwrap();
        assert!(!model.method(go).binding_ok());

        let odd_id = model.class_by_fqn("p.Odd").unwrap();
        assert!(!model.class(odd_id).binding_ok());
        assert_eq!(model.super_class_of(odd_id), None);

        let report = model.binding_report();
        assert_eq!(report.methods_incomplete, vec!["p.Fuzzy#go()".to_string()]);
        assert_eq!(report.classes_incomplete, vec!["p.Odd".to_string()]);
        assert_eq!(report.total(), 2);
    }

    #[test]
    fn test_field_initializer_call_and_access_edges() {
        let provider = class_decl("Defaults", "p")
            .with_field(FieldDecl::new("SIZE").with_binding("p.Defaults"))
            .with_method(MethodDecl::new("scale").with_body(Block::default()));
        let consumer = class_decl("Config", "p").with_field(
            FieldDecl::new("limit")
                .with_binding("p.Config")
                .with_initializer(Expr::Binary {
                    left: Box::new(Expr::VarAccess(VariableAccess::field("SIZE", "p.Defaults"))),
                    operator: "+".to_string(),
                    right: Box::new(Expr::Call(MethodCall::resolved("scale", "p.Defaults", vec![]))),
                }),
        );
        let model = analyze(&[unit_with("p", provider), unit_with("p", consumer)]);

        let defaults_id = model.class_by_fqn("p.Defaults").unwrap();
        let config_id = model.class_by_fqn("p.Config").unwrap();
        let size = model.field_by_name(defaults_id, "SIZE").unwrap();
        let limit = model.field_by_name(config_id, "limit").unwrap();
        let scale = model.method_by_signature(defaults_id, "scale()").unwrap();

        assert!(model.fields_accessed_by_field(limit).any(|field| field == size));
        assert!(model.field_accessors_of(size).any(|field| field == limit));
        assert!(model.calls_of_field(limit).any(|method| method == scale));
        assert!(model.field_callers_of(scale).any(|field| field == limit));
        assert!(model.efferent_classes_in_project(config_id).contains(&defaults_id));
    }

    #[test]
    fn test_primitive_and_array_types_never_stub() {
        assert_eq!(class_use_target("int"), None);
        assert_eq!(class_use_target("int[][]"), None);
        assert_eq!(class_use_target("p.A[]"), Some("p.A"));
        assert_eq!(class_use_target("java.util.List<p.A>"), Some("java.util.List"));
        assert_eq!(class_use_target(""), None);
    }

    #[test]
    fn test_package_coupling_follows_class_coupling() {
        let service = class_decl("Service", "core").with_method(
            MethodDecl::new("run").with_body(Block::default()),
        );
        let body = Block::new(vec![Statement::Expression(Expr::Call(
            MethodCall::resolved("run", "core.Service", vec![]),
        ))]);
        let client =
            class_decl("Client", "ui").with_method(MethodDecl::new("main").with_body(body));
        let model = analyze(&[unit_with("core", service), unit_with("ui", client)]);

        let core_package = model.package_by_name("core").unwrap();
        let ui_package = model.package_by_name("ui").unwrap();
        let efferent: Vec<_> = model.efferent_packages(ui_package).collect();
        let afferent: Vec<_> = model.afferent_packages(core_package).collect();
        assert_eq!(efferent, vec![core_package]);
        assert_eq!(afferent, vec![ui_package]);
    }
}
