//! Metric names and descriptors.
//!
//! Every derived metric has a stable string name used in per-entity metric
//! maps and export snapshots. Roll-up maxima use the same name prefixed with
//! `max_`.

use once_cell::sync::Lazy;
use serde::Serialize;

/// Lines of code covered by the entity's source span.
pub const LOC: &str = "loc";
/// Depth of inheritance tree.
pub const DIT: &str = "dit";
/// Number of children (direct subclasses and implementors).
pub const NOC: &str = "noc";
/// Response for class.
pub const RFC: &str = "rfc";
/// Coupling between objects (afferent closure size).
pub const CBO: &str = "cbo";
/// Lack of cohesion of methods.
pub const LCOM: &str = "lcom";
/// Weighted methods per class (summed cyclomatic complexity).
pub const WMC: &str = "wmc";
/// McCabe cyclomatic complexity of one body.
pub const CYCLOMATIC_COMPLEXITY: &str = "cyclomatic_complexity";
/// Maximum branching-construct nesting depth of one body.
pub const NESTING_DEPTH: &str = "nesting_depth";
/// Executable statement count.
pub const STATEMENT_COUNT: &str = "statement_count";
/// Methods declared by a class.
pub const NUM_METHODS: &str = "num_methods";
/// Fields declared by a class.
pub const NUM_FIELDS: &str = "num_fields";
/// Classes aggregated into a package.
pub const NUM_CLASSES: &str = "num_classes";
/// Packages aggregated into the project.
pub const NUM_PACKAGES: &str = "num_packages";

/// Roll-up name for the maximum of a metric across children.
pub fn max_name(name: &str) -> String {
    if name.starts_with("max_") {
        name.to_string()
    } else {
        format!("max_{name}")
    }
}

/// Descriptor of one derivable metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDefinition {
    /// Stable metric name
    pub name: &'static str,
    /// Human-readable description of what the metric measures
    pub description: &'static str,
    /// Value used when the metric cannot be derived from the entity
    pub default_value: f64,
    /// True if higher values indicate a design problem
    pub higher_is_worse: bool,
}

impl MetricDefinition {
    const fn new(name: &'static str, description: &'static str, default_value: f64) -> Self {
        Self {
            name,
            description,
            default_value,
            higher_is_worse: true,
        }
    }
}

/// Metrics derived per method (and initializer).
pub fn method_metrics() -> &'static [MetricDefinition] {
    static DEFINITIONS: Lazy<Vec<MetricDefinition>> = Lazy::new(|| {
        vec![
            MetricDefinition::new(LOC, "Lines of code", 0.0),
            MetricDefinition::new(
                CYCLOMATIC_COMPLEXITY,
                "McCabe cyclomatic complexity",
                1.0,
            ),
            MetricDefinition::new(NESTING_DEPTH, "Maximum nesting depth", 0.0),
            MetricDefinition::new(STATEMENT_COUNT, "Executable statements", 0.0),
        ]
    });
    &DEFINITIONS
}

/// Metrics derived per field.
pub fn field_metrics() -> &'static [MetricDefinition] {
    static DEFINITIONS: Lazy<Vec<MetricDefinition>> = Lazy::new(|| {
        vec![
            MetricDefinition::new(LOC, "Lines of code", 0.0),
            MetricDefinition::new(STATEMENT_COUNT, "Executable statements", 0.0),
        ]
    });
    &DEFINITIONS
}

/// Metrics derived per class.
pub fn class_metrics() -> &'static [MetricDefinition] {
    static DEFINITIONS: Lazy<Vec<MetricDefinition>> = Lazy::new(|| {
        vec![
            MetricDefinition::new(LOC, "Lines of code", 0.0),
            MetricDefinition::new(DIT, "Depth of inheritance tree", 0.0),
            MetricDefinition::new(NOC, "Number of children", 0.0),
            MetricDefinition::new(RFC, "Response for class", 0.0),
            MetricDefinition::new(CBO, "Coupling between objects", 0.0),
            MetricDefinition::new(LCOM, "Lack of cohesion of methods", 0.0),
            MetricDefinition::new(WMC, "Weighted methods per class", 0.0),
            MetricDefinition::new(NUM_METHODS, "Declared methods", 0.0),
            MetricDefinition::new(NUM_FIELDS, "Declared fields", 0.0),
            MetricDefinition::new(STATEMENT_COUNT, "Executable statements", 0.0),
        ]
    });
    &DEFINITIONS
}

/// Look up a definition by metric name, across every entity kind.
pub fn definition(name: &str) -> Option<&'static MetricDefinition> {
    method_metrics()
        .iter()
        .chain(field_metrics())
        .chain(class_metrics())
        .find(|definition| definition.name == name)
}
