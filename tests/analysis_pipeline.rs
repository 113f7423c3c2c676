//! End-to-end pipeline tests over the public API: build, resolve, measure.

use skyline_rs::frontend::{
    Block, CompilationUnit, Expr, FieldDecl, MethodCall, MethodDecl, SourceSpan, Statement,
    TypeDecl, TypeKind, TypeRef, VariableAccess,
};
use skyline_rs::io::export::ModelSnapshot;
use skyline_rs::metrics::EntityRef;
use skyline_rs::{AnalysisConfig, AnalysisResults, SkylineEngine};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn engine() -> SkylineEngine {
    init_tracing();
    SkylineEngine::new(AnalysisConfig::default().with_project_name("pipeline-test")).unwrap()
}

fn unit_with(package: &str, decl: TypeDecl) -> CompilationUnit {
    let path = format!("{package}/{}.x", decl.name);
    CompilationUnit::new(path).with_package(package).with_type(decl)
}

/// The scenario from the original model: package `p` with class `A` holding
/// field `x`, class `B extends A`, and `B.foo()` reading `A.x`.
fn round_trip_units() -> Vec<CompilationUnit> {
    let a = TypeDecl::new("A", TypeKind::Class)
        .with_binding("p.A")
        .with_span(SourceSpan::lines(1, 8))
        .with_field(
            FieldDecl::new("x")
                .with_type(TypeRef::resolved("int", "int"))
                .with_binding("p.A"),
        );
    let foo_body = Block::new(vec![Statement::Return(Some(Expr::VarAccess(
        VariableAccess::field("x", "p.A"),
    )))]);
    let b = TypeDecl::new("B", TypeKind::Class)
        .with_binding("p.B")
        .with_span(SourceSpan::lines(1, 12))
        .with_super_class(TypeRef::resolved("A", "p.A"))
        .with_method(MethodDecl::new("foo").with_body(foo_body));
    vec![unit_with("p", a), unit_with("p", b)]
}

fn analyze_round_trip() -> AnalysisResults {
    engine().analyze(&round_trip_units()).unwrap()
}

#[test]
fn round_trip_hierarchy_and_coupling() {
    let results = analyze_round_trip();
    let model = &results.model;

    let a = model.class_by_fqn("p.A").unwrap();
    let b = model.class_by_fqn("p.B").unwrap();

    assert_eq!(model.all_superclasses(b), vec![a]);
    assert_eq!(model.children_of(a).collect::<Vec<_>>(), vec![b]);
    assert!(model.efferent_classes_in_project(b).contains(&a));
    assert!(model.afferent_classes_in_project(a).contains(&b));

    let report = &results.metrics;
    assert_eq!(report.value(EntityRef::Class(b), "dit").unwrap(), 1.0);
    assert_eq!(report.value(EntityRef::Class(a), "noc").unwrap(), 1.0);
}

#[test]
fn round_trip_field_access_edges() {
    let results = analyze_round_trip();
    let model = &results.model;

    let a = model.class_by_fqn("p.A").unwrap();
    let b = model.class_by_fqn("p.B").unwrap();
    let x = model.field_by_name(a, "x").unwrap();
    let foo = model.method_by_signature(b, "foo()").unwrap();

    assert!(model.accessed_fields_of(foo).any(|field| field == x));
    assert!(model.method_accessors_of(x).any(|method| method == foo));
    assert!(model.binding_report().is_complete());
}

#[test]
fn edge_symmetry_across_the_whole_model() {
    let shared = TypeDecl::new("Shared", TypeKind::Class)
        .with_binding("core.Shared")
        .with_field(FieldDecl::new("state").with_binding("core.Shared"))
        .with_method(MethodDecl::new("touch").with_body(Block::new(vec![
            Statement::Expression(Expr::VarAccess(VariableAccess::field("state", "core.Shared"))),
        ])));
    let caller_body = Block::new(vec![
        Statement::Expression(Expr::Call(MethodCall::resolved("touch", "core.Shared", vec![]))),
        Statement::Expression(Expr::VarAccess(VariableAccess::field("state", "core.Shared"))),
    ]);
    let ui = TypeDecl::new("View", TypeKind::Class)
        .with_binding("ui.View")
        .with_method(MethodDecl::new("refresh").with_body(caller_body));
    let results = engine()
        .analyze(&[unit_with("core", shared), unit_with("ui", ui)])
        .unwrap();
    let model = &results.model;

    for (class_id, _) in model.classes() {
        for other in model.efferent_classes(class_id) {
            assert!(
                model.afferent_classes(other).any(|back| back == class_id),
                "efferent edge without afferent inverse"
            );
        }
        for other in model.afferent_classes(class_id) {
            assert!(
                model.efferent_classes(other).any(|back| back == class_id),
                "afferent edge without efferent inverse"
            );
        }
    }

    let core_package = model.package_by_name("core").unwrap();
    let ui_package = model.package_by_name("ui").unwrap();
    assert!(model.afferent_packages(core_package).any(|package| package == ui_package));
    assert!(model.efferent_packages(ui_package).any(|package| package == core_package));

    let shared_id = model.class_by_fqn("core.Shared").unwrap();
    let view_id = model.class_by_fqn("ui.View").unwrap();
    let touch = model.method_by_signature(shared_id, "touch()").unwrap();
    let refresh = model.method_by_signature(view_id, "refresh()").unwrap();
    assert!(model.calls_of(refresh).any(|method| method == touch));
    assert!(model.callers_of(touch).any(|method| method == refresh));
}

#[test]
fn dit_boundaries_through_the_pipeline() {
    let c = TypeDecl::new("C", TypeKind::Class).with_binding("p.C");
    let b = TypeDecl::new("B", TypeKind::Class)
        .with_binding("p.B")
        .with_super_class(TypeRef::resolved("C", "p.C"));
    let a = TypeDecl::new("A", TypeKind::Class)
        .with_binding("p.A")
        .with_super_class(TypeRef::resolved("B", "p.B"));
    let results = engine()
        .analyze(&[unit_with("p", a), unit_with("p", b), unit_with("p", c)])
        .unwrap();

    let report = &results.metrics;
    let class = |fqn: &str| EntityRef::Class(results.model.class_by_fqn(fqn).unwrap());
    assert_eq!(report.value(class("p.A"), "dit").unwrap(), 2.0);
    assert_eq!(report.value(class("p.B"), "dit").unwrap(), 1.0);
    assert_eq!(report.value(class("p.C"), "dit").unwrap(), 0.0);
}

#[test]
fn cyclomatic_boundaries_through_the_pipeline() {
    let straight = MethodDecl::new("straight").with_body(Block::new(vec![Statement::Return(None)]));
    let one_if = MethodDecl::new("oneIf").with_body(Block::new(vec![Statement::If {
        condition: Expr::Literal("true".into()),
        then_branch: Box::new(Statement::Return(None)),
        else_branch: None,
    }]));
    let if_in_for = MethodDecl::new("ifInFor").with_body(Block::new(vec![Statement::For {
        init: vec![],
        condition: Some(Expr::Literal("true".into())),
        update: vec![],
        body: Box::new(Statement::If {
            condition: Expr::Literal("true".into()),
            then_branch: Box::new(Statement::Break),
            else_branch: None,
        }),
    }]));
    let decl = TypeDecl::new("A", TypeKind::Class)
        .with_binding("p.A")
        .with_method(straight)
        .with_method(one_if)
        .with_method(if_in_for);
    let results = engine().analyze(&[unit_with("p", decl)]).unwrap();
    let model = &results.model;
    let report = &results.metrics;

    let a = model.class_by_fqn("p.A").unwrap();
    let metric = |signature: &str, name: &str| {
        let method = model.method_by_signature(a, signature).unwrap();
        report.value(EntityRef::Method(method), name).unwrap()
    };
    assert_eq!(metric("straight()", "cyclomatic_complexity"), 1.0);
    assert_eq!(metric("oneIf()", "cyclomatic_complexity"), 2.0);
    assert_eq!(metric("ifInFor()", "cyclomatic_complexity"), 3.0);
    assert_eq!(metric("ifInFor()", "nesting_depth"), 2.0);
}

#[test]
fn external_entities_are_targets_only() {
    let body = Block::new(vec![
        Statement::Expression(Expr::Call(MethodCall::resolved(
            "currentTimeMillis",
            "java.lang.System",
            vec![],
        ))),
        Statement::Expression(Expr::VarAccess(VariableAccess::field("out", "java.lang.System"))),
    ]);
    let decl = TypeDecl::new("Clock", TypeKind::Class)
        .with_binding("p.Clock")
        .with_method(MethodDecl::new("now").with_body(body));
    let results = engine().analyze(&[unit_with("p", decl)]).unwrap();
    let model = &results.model;

    let system = model.class_by_fqn("java.lang.System").unwrap();
    assert!(!model.class(system).is_in_project());
    assert!(model.efferent_classes(system).next().is_none());

    for &method in model.class(system).methods() {
        assert!(!model.method(method).is_in_project());
        assert_eq!(model.calls_of(method).count(), 0);
        assert_eq!(model.accessed_fields_of(method).count(), 0);
        assert!(model.callers_of(method).count() > 0);
    }
    for &field in model.class(system).fields() {
        assert!(!model.field(field).is_in_project());
        assert_eq!(model.fields_accessed_by_field(field).count(), 0);
        assert!(model.method_accessors_of(field).count() > 0);
    }
}

#[test]
fn two_runs_produce_identical_snapshots() {
    let engine = engine();
    let first = engine.analyze(&round_trip_units()).unwrap();
    let second = engine.analyze(&round_trip_units()).unwrap();

    let snapshot_first = ModelSnapshot::capture(&first.model, &first.metrics);
    let snapshot_second = ModelSnapshot::capture(&second.model, &second.metrics);
    assert_eq!(snapshot_first, snapshot_second);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn aggregates_tolerate_heterogeneous_entities() {
    use approx::assert_relative_eq;

    let results = analyze_round_trip();
    let model = &results.model;
    let report = &results.metrics;

    // lenient lookups: entities without a derived value collapse to the
    // sentinel instead of failing the sum
    let total_loc: f64 = model
        .classes()
        .map(|(id, _)| report.value_or(EntityRef::Class(id), "loc", 0.0))
        .sum();
    let project_loc = report.value_or(EntityRef::Project, "loc", 0.0);
    assert_relative_eq!(total_loc, project_loc);
}
