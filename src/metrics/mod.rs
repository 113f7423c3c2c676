//! Pass 3: metric derivation.
//!
//! Walks the fully resolved model bottom-up: method and field metrics first,
//! then class metrics (own values plus member sums and maxima), then package
//! and project roll-ups. Sums and maxima are tracked independently: every
//! non-max metric of a child contributes to the parent's sum under its own
//! name and to the parent's `max_*` companion, and `max_*` values chain
//! upward so the project-level maximum is the global one.
//!
//! Per-class derivation is read-only over the model and runs on the rayon
//! pool when the `parallel` feature and configuration allow.

pub(crate) mod complexity;
pub mod definitions;
pub(crate) mod oo;
pub mod report;

use rayon::prelude::*;
use tracing::info;

use crate::core::session::AnalysisSession;
use crate::model::entities::EntityOrigin;
use crate::model::ids::{ClassId, FieldId, MethodId};
use crate::model::phases::ResolvedModel;
use crate::model::store::ModelCore;

pub use report::{EntityRef, MetricMap, MetricsReport};

use definitions::{
    CBO, CYCLOMATIC_COMPLEXITY, DIT, LCOM, LOC, NESTING_DEPTH, NOC, NUM_CLASSES, NUM_FIELDS,
    NUM_METHODS, NUM_PACKAGES, RFC, STATEMENT_COUNT, WMC,
};

/// Pass 3: derives a [`MetricsReport`] from a [`ResolvedModel`].
pub struct MetricsEngine<'a> {
    session: &'a AnalysisSession,
}

impl<'a> MetricsEngine<'a> {
    /// Create a metrics engine bound to a session.
    pub fn new(session: &'a AnalysisSession) -> Self {
        Self { session }
    }

    /// Derive every metric for every in-project entity.
    pub fn compute(&self, model: &ResolvedModel) -> MetricsReport {
        let core = model.core();
        let parallel = cfg!(feature = "parallel") && self.session.config().parallel_metrics;

        let method_maps: Vec<MetricMap> = if parallel {
            (0..core.methods.len())
                .into_par_iter()
                .map(|index| method_map(core, MethodId::new(index)))
                .collect()
        } else {
            (0..core.methods.len())
                .map(|index| method_map(core, MethodId::new(index)))
                .collect()
        };

        let field_maps: Vec<MetricMap> = (0..core.fields.len())
            .map(|index| field_map(core, FieldId::new(index)))
            .collect();

        let class_maps: Vec<MetricMap> = if parallel {
            (0..core.classes.len())
                .into_par_iter()
                .map(|index| class_map(core, ClassId::new(index), &method_maps, &field_maps))
                .collect()
        } else {
            (0..core.classes.len())
                .map(|index| class_map(core, ClassId::new(index), &method_maps, &field_maps))
                .collect()
        };

        let mut package_maps: Vec<MetricMap> = vec![MetricMap::new(); core.packages.len()];
        let mut package_class_counts: Vec<usize> = vec![0; core.packages.len()];
        for (index, class) in core.classes.iter().enumerate() {
            if class.origin != EntityOrigin::Project {
                continue;
            }
            let Some(package) = class.package else {
                continue;
            };
            package_class_counts[package.index()] += 1;
            roll_up(&mut package_maps[package.index()], &class_maps[index]);
        }
        for (map, count) in package_maps.iter_mut().zip(&package_class_counts) {
            map.insert(NUM_CLASSES.to_string(), *count as f64);
        }

        let mut project = MetricMap::new();
        for package in &package_maps {
            roll_up(&mut project, package);
        }
        project.insert(NUM_PACKAGES.to_string(), core.packages.len() as f64);

        info!(
            classes = class_maps.iter().filter(|map| !map.is_empty()).count(),
            packages = package_maps.len(),
            parallel,
            "metric derivation complete"
        );

        MetricsReport {
            project,
            packages: package_maps,
            classes: class_maps,
            methods: method_maps,
            fields: field_maps,
        }
    }
}

fn seed(definitions: &[definitions::MetricDefinition]) -> MetricMap {
    definitions
        .iter()
        .map(|definition| (definition.name.to_string(), definition.default_value))
        .collect()
}

fn method_map(core: &ModelCore, id: MethodId) -> MetricMap {
    let method = core.method(id);
    if method.origin != EntityOrigin::Project {
        return MetricMap::new();
    }

    let mut map = seed(definitions::method_metrics());
    if let Some(span) = method.span() {
        map.insert(LOC.to_string(), f64::from(span.line_count()));
    }
    if let Some(body) = method.body() {
        let walked = complexity::analyze_block(body);
        map.insert(
            CYCLOMATIC_COMPLEXITY.to_string(),
            f64::from(walked.cyclomatic),
        );
        map.insert(NESTING_DEPTH.to_string(), f64::from(walked.max_nesting));
        map.insert(STATEMENT_COUNT.to_string(), f64::from(walked.statements));
    }
    map
}

fn field_map(core: &ModelCore, id: FieldId) -> MetricMap {
    let field = core.field(id);
    if field.origin != EntityOrigin::Project {
        return MetricMap::new();
    }

    let mut map = seed(definitions::field_metrics());
    if let Some(span) = field.span() {
        map.insert(LOC.to_string(), f64::from(span.line_count()));
    }
    // An initialized field executes one assignment.
    if field.initializer().is_some() {
        map.insert(STATEMENT_COUNT.to_string(), 1.0);
    }
    map
}

fn class_map(
    core: &ModelCore,
    id: ClassId,
    method_maps: &[MetricMap],
    field_maps: &[MetricMap],
) -> MetricMap {
    let class = core.class(id);
    if class.origin != EntityOrigin::Project {
        return MetricMap::new();
    }

    let mut map = seed(definitions::class_metrics());
    if let Some(span) = class.span() {
        map.insert(LOC.to_string(), f64::from(span.line_count()));
    }
    map.insert(DIT.to_string(), f64::from(oo::dit(core, id)));
    map.insert(NOC.to_string(), f64::from(oo::noc(core, id)));
    map.insert(RFC.to_string(), f64::from(oo::rfc(core, id)));
    map.insert(CBO.to_string(), f64::from(oo::cbo(core, id)));
    map.insert(LCOM.to_string(), oo::lcom(core, id) as f64);

    let methods = oo::project_methods(core, id);
    let fields = oo::project_fields(core, id);
    map.insert(NUM_METHODS.to_string(), methods.len() as f64);
    map.insert(NUM_FIELDS.to_string(), fields.len() as f64);

    let mut wmc = 0.0;
    let mut statements = 0.0;
    for &method in &methods {
        let member = &method_maps[method.index()];
        wmc += member.get(CYCLOMATIC_COMPLEXITY).copied().unwrap_or(0.0);
        statements += member.get(STATEMENT_COUNT).copied().unwrap_or(0.0);
        roll_up_max(&mut map, member);
    }
    for &field in &fields {
        let member = &field_maps[field.index()];
        statements += member.get(STATEMENT_COUNT).copied().unwrap_or(0.0);
        roll_up_max(&mut map, member);
    }
    map.insert(WMC.to_string(), wmc);
    map.insert(STATEMENT_COUNT.to_string(), statements);
    map
}

/// Fold a child map into a parent: non-max metrics are summed under their
/// own name and tracked under `max_*`; `max_*` metrics chain by maximum.
fn roll_up(target: &mut MetricMap, child: &MetricMap) {
    for (name, &value) in child {
        if name.starts_with("max_") {
            update_max(target, name.clone(), value);
        } else {
            *target.entry(name.clone()).or_insert(0.0) += value;
            update_max(target, definitions::max_name(name), value);
        }
    }
}

/// Track only the maxima of a child map (used class ← member, where member
/// sums are accounted selectively).
fn roll_up_max(target: &mut MetricMap, child: &MetricMap) {
    for (name, &value) in child {
        if !name.starts_with("max_") {
            update_max(target, definitions::max_name(name), value);
        }
    }
}

fn update_max(target: &mut MetricMap, name: String, value: f64) {
    let entry = target.entry(name).or_insert(value);
    if value > *entry {
        *entry = value;
    }
}
