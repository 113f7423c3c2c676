//! Per-entity metric maps and the lookup surface.
//!
//! Lookups come in two strictnesses, and both must exist: strict lookups
//! fail loudly when a metric was never derived (absence is not zero), while
//! lenient lookups take a sentinel for aggregation code that deliberately
//! tolerates heterogeneous entities.

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::errors::{Result, SkylineError};
use crate::model::ids::{ClassId, FieldId, MethodId, PackageId};

/// Metric name → value mapping for one entity.
pub type MetricMap = IndexMap<String, f64>;

/// Addresses one entity in a [`MetricsReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    /// The whole project
    Project,
    /// A package
    Package(PackageId),
    /// A class
    Class(ClassId),
    /// A method
    Method(MethodId),
    /// A field
    Field(FieldId),
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityRef::Project => write!(formatter, "project"),
            EntityRef::Package(id) => write!(formatter, "package #{}", id.index()),
            EntityRef::Class(id) => write!(formatter, "class #{}", id.index()),
            EntityRef::Method(id) => write!(formatter, "method #{}", id.index()),
            EntityRef::Field(id) => write!(formatter, "field #{}", id.index()),
        }
    }
}

/// Every metric derived in one run, indexed by entity.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsReport {
    pub(crate) project: MetricMap,
    pub(crate) packages: Vec<MetricMap>,
    pub(crate) classes: Vec<MetricMap>,
    pub(crate) methods: Vec<MetricMap>,
    pub(crate) fields: Vec<MetricMap>,
}

impl MetricsReport {
    /// The metric map of one entity; `None` when the entity is unknown to
    /// the report (e.g. an external stub).
    pub fn metrics_of(&self, entity: EntityRef) -> Option<&MetricMap> {
        let map = match entity {
            EntityRef::Project => Some(&self.project),
            EntityRef::Package(id) => self.packages.get(id.index()),
            EntityRef::Class(id) => self.classes.get(id.index()),
            EntityRef::Method(id) => self.methods.get(id.index()),
            EntityRef::Field(id) => self.fields.get(id.index()),
        };
        map.filter(|map| !map.is_empty())
    }

    /// Strict lookup: a missing metric is a distinguishable failure, not a
    /// silent zero.
    pub fn value(&self, entity: EntityRef, metric: &str) -> Result<f64> {
        self.metrics_of(entity)
            .and_then(|map| map.get(metric).copied())
            .ok_or_else(|| SkylineError::metric_unavailable(metric, entity.to_string()))
    }

    /// Lenient lookup: absent metrics collapse to the caller's sentinel.
    pub fn value_or(&self, entity: EntityRef, metric: &str, default: f64) -> f64 {
        self.metrics_of(entity)
            .and_then(|map| map.get(metric).copied())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_class_metric(name: &str, value: f64) -> MetricsReport {
        let mut map = MetricMap::new();
        map.insert(name.to_string(), value);
        MetricsReport {
            classes: vec![map],
            ..MetricsReport::default()
        }
    }

    #[test]
    fn test_strict_lookup_hits() {
        let report = report_with_class_metric("loc", 12.0);
        let value = report.value(EntityRef::Class(ClassId::new(0)), "loc").unwrap();
        assert_eq!(value, 12.0);
    }

    #[test]
    fn test_strict_lookup_misses_loudly() {
        let report = report_with_class_metric("loc", 12.0);
        let err = report
            .value(EntityRef::Class(ClassId::new(0)), "lcom")
            .unwrap_err();
        assert!(matches!(err, SkylineError::MetricUnavailable { .. }));

        let err = report
            .value(EntityRef::Method(MethodId::new(9)), "loc")
            .unwrap_err();
        assert!(matches!(err, SkylineError::MetricUnavailable { .. }));
    }

    #[test]
    fn test_lenient_lookup_returns_sentinel() {
        let report = report_with_class_metric("loc", 12.0);
        let value = report.value_or(EntityRef::Class(ClassId::new(0)), "lcom", -1.0);
        assert_eq!(value, -1.0);
    }

    #[test]
    fn test_empty_maps_read_as_absent() {
        let report = MetricsReport {
            classes: vec![MetricMap::new()],
            ..MetricsReport::default()
        };
        assert!(report.metrics_of(EntityRef::Class(ClassId::new(0))).is_none());
    }
}
