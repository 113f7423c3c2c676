//! Deterministic model snapshots for serialization collaborators.
//!
//! The XML/export format itself is the collaborator's concern; the core
//! guarantees an enumeration that is stable across runs: relationship name
//! lists are lexicographically sorted, metric maps are emitted in sorted key
//! order, and the FQN is the join key at every level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::frontend::TypeKind;
use crate::metrics::{EntityRef, MetricsReport};
use crate::model::ids::{ClassId, PackageId};
use crate::model::phases::ResolvedModel;

/// Sorted metric name → value mapping.
pub type MetricValues = BTreeMap<String, f64>;

/// A complete, deterministic view of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    /// The project level
    pub project: ProjectSnapshot,
}

/// Project-level snapshot data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// Project display name
    pub name: String,
    /// Project root path
    pub path: String,
    /// Project-level metric values
    pub metrics: MetricValues,
    /// Packages, sorted by name
    pub packages: Vec<PackageSnapshot>,
}

/// Package-level snapshot data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSnapshot {
    /// Package name
    pub name: String,
    /// Names of packages depending on this one, sorted
    pub afferent: Vec<String>,
    /// Names of packages this one depends on, sorted
    pub efferent: Vec<String>,
    /// Package-level metric values
    pub metrics: MetricValues,
    /// Project classes of the package (nested classes included), sorted by FQN
    pub classes: Vec<ClassSnapshot>,
}

/// Class-level snapshot data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSnapshot {
    /// Fully-qualified name, the join key
    pub fqn: String,
    /// Simple name
    pub name: String,
    /// Class, interface, or enum
    pub kind: TypeKind,
    /// FQN of the resolved super-class
    pub super_class: Option<String>,
    /// FQNs of the resolved super-interfaces, sorted
    pub interfaces: Vec<String>,
    /// FQNs of classes depending on this one, sorted
    pub afferent: Vec<String>,
    /// FQNs of classes this one depends on, sorted
    pub efferent: Vec<String>,
    /// FQNs of direct children, sorted
    pub children: Vec<String>,
    /// Class-level metric values
    pub metrics: MetricValues,
    /// Methods, sorted by signature
    pub methods: Vec<MemberSnapshot>,
    /// Fields, sorted by name
    pub fields: Vec<MemberSnapshot>,
}

/// Method- or field-level snapshot data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    /// Signature (methods) or name (fields)
    pub name: String,
    /// Member-level metric values
    pub metrics: MetricValues,
}

impl ModelSnapshot {
    /// Capture a deterministic snapshot of a resolved model and its metrics.
    pub fn capture(model: &ResolvedModel, report: &MetricsReport) -> Self {
        let mut package_ids: Vec<PackageId> = model.packages().map(|(id, _)| id).collect();
        package_ids.sort_by(|a, b| model.package(*a).name().cmp(model.package(*b).name()));

        let packages = package_ids
            .into_iter()
            .map(|package_id| capture_package(model, report, package_id))
            .collect();

        Self {
            project: ProjectSnapshot {
                name: model.project_name().to_string(),
                path: model.project_root().to_string(),
                metrics: metric_values(report, EntityRef::Project),
                packages,
            },
        }
    }
}

fn capture_package(
    model: &ResolvedModel,
    report: &MetricsReport,
    package_id: PackageId,
) -> PackageSnapshot {
    let mut class_ids: Vec<ClassId> = model
        .classes()
        .filter(|(_, class)| {
            class.is_in_project() && class.package() == Some(package_id)
        })
        .map(|(id, _)| id)
        .collect();
    class_ids.sort_by(|a, b| model.class(*a).fqn().cmp(model.class(*b).fqn()));

    PackageSnapshot {
        name: model.package(package_id).name().to_string(),
        afferent: sorted_names(
            model
                .afferent_packages(package_id)
                .map(|other| model.package(other).name().to_string()),
        ),
        efferent: sorted_names(
            model
                .efferent_packages(package_id)
                .map(|other| model.package(other).name().to_string()),
        ),
        metrics: metric_values(report, EntityRef::Package(package_id)),
        classes: class_ids
            .into_iter()
            .map(|class_id| capture_class(model, report, class_id))
            .collect(),
    }
}

fn capture_class(
    model: &ResolvedModel,
    report: &MetricsReport,
    class_id: ClassId,
) -> ClassSnapshot {
    let class = model.class(class_id);
    let class_fqn = |id: ClassId| model.class(id).fqn().to_string();

    let mut methods: Vec<MemberSnapshot> = class
        .methods()
        .iter()
        .filter(|&&method| model.method(method).is_in_project())
        .map(|&method| MemberSnapshot {
            name: model.method(method).signature().to_string(),
            metrics: metric_values(report, EntityRef::Method(method)),
        })
        .collect();
    methods.sort_by(|a, b| a.name.cmp(&b.name));

    let mut fields: Vec<MemberSnapshot> = class
        .fields()
        .iter()
        .filter(|&&field| model.field(field).is_in_project())
        .map(|&field| MemberSnapshot {
            name: model.field(field).name().to_string(),
            metrics: metric_values(report, EntityRef::Field(field)),
        })
        .collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name));

    ClassSnapshot {
        fqn: class.fqn().to_string(),
        name: class.name().to_string(),
        kind: class.kind(),
        super_class: model.super_class_of(class_id).map(class_fqn),
        interfaces: sorted_names(model.super_interfaces_of(class_id).map(class_fqn)),
        afferent: sorted_names(model.afferent_classes(class_id).map(class_fqn)),
        efferent: sorted_names(model.efferent_classes(class_id).map(class_fqn)),
        children: sorted_names(model.children_of(class_id).map(class_fqn)),
        metrics: metric_values(report, EntityRef::Class(class_id)),
        methods,
        fields,
    }
}

fn metric_values(report: &MetricsReport, entity: EntityRef) -> MetricValues {
    report
        .metrics_of(entity)
        .map(|map| map.iter().map(|(name, &value)| (name.clone(), value)).collect())
        .unwrap_or_default()
}

fn sorted_names(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut names: Vec<String> = names.collect();
    names.sort();
    names
}
