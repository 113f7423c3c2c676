//! Object-oriented design metrics over the resolved model.
//!
//! Definitions follow the classic Chidamber & Kemerer formulations, with the
//! project boundary applied wherever the metric says "in project": external
//! placeholder entities contribute to nothing here.

use ahash::AHashSet;

use crate::model::entities::EntityOrigin;
use crate::model::ids::{ClassId, FieldId, MethodId};
use crate::model::store::ModelCore;

/// Depth of inheritance tree: length of the super-class chain, stopping at
/// the first external or absent parent.
pub(crate) fn dit(core: &ModelCore, class: ClassId) -> u32 {
    core.all_superclasses(class)
        .into_iter()
        .take_while(|&ancestor| core.class(ancestor).is_in_project())
        .count() as u32
}

/// Number of children: classes naming this one as direct super-class or
/// super-interface.
pub(crate) fn noc(core: &ModelCore, class: ClassId) -> u32 {
    core.class(class).sub_classes.len() as u32
}

/// Response for class: own methods plus the distinct in-project methods any
/// of them calls.
pub(crate) fn rfc(core: &ModelCore, class: ClassId) -> u32 {
    let own: Vec<MethodId> = project_methods(core, class);
    let mut called: AHashSet<MethodId> = AHashSet::new();
    for &method in &own {
        for &callee in &core.method(method).calls {
            if core.method(callee).origin == EntityOrigin::Project {
                called.insert(callee);
            }
        }
    }
    (own.len() + called.len()) as u32
}

/// Coupling between objects: size of the transitive closure of in-project
/// afferent classes. Seeds with the direct afferent set and work-lists into
/// each newly added class's afferent set, never revisiting.
pub(crate) fn cbo(core: &ModelCore, class: ClassId) -> u32 {
    let mut closure: AHashSet<ClassId> = AHashSet::new();
    let mut work: Vec<ClassId> = afferent_in_project(core, class);

    while let Some(next) = work.pop() {
        if !closure.insert(next) {
            continue;
        }
        work.extend(afferent_in_project(core, next));
    }
    closure.len() as u32
}

/// Lack of cohesion of methods: over unordered method pairs, every pair of
/// in-project fields accessed by the two methods is counted as cohesive when
/// the fields are identical and non-cohesive otherwise;
/// `lcom = max(non_cohesive - cohesive, 0)`.
pub(crate) fn lcom(core: &ModelCore, class: ClassId) -> u64 {
    let accessed: Vec<Vec<FieldId>> = project_methods(core, class)
        .into_iter()
        .map(|method| {
            core.method(method)
                .accessed_fields
                .iter()
                .copied()
                .filter(|&field| core.field(field).origin == EntityOrigin::Project)
                .collect()
        })
        .collect();

    let mut cohesive: u64 = 0;
    let mut non_cohesive: u64 = 0;
    for i in 0..accessed.len() {
        for j in (i + 1)..accessed.len() {
            for &first in &accessed[i] {
                for &second in &accessed[j] {
                    if first == second {
                        cohesive += 1;
                    } else {
                        non_cohesive += 1;
                    }
                }
            }
        }
    }
    non_cohesive.saturating_sub(cohesive)
}

/// In-project methods declared by a class.
pub(crate) fn project_methods(core: &ModelCore, class: ClassId) -> Vec<MethodId> {
    core.class(class)
        .methods
        .iter()
        .copied()
        .filter(|&method| core.method(method).origin == EntityOrigin::Project)
        .collect()
}

/// In-project fields declared by a class.
pub(crate) fn project_fields(core: &ModelCore, class: ClassId) -> Vec<FieldId> {
    core.class(class)
        .fields
        .iter()
        .copied()
        .filter(|&field| core.field(field).origin == EntityOrigin::Project)
        .collect()
}

fn afferent_in_project(core: &ModelCore, class: ClassId) -> Vec<ClassId> {
    core.class(class)
        .afferent
        .iter()
        .copied()
        .filter(|&other| core.class(other).is_in_project())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{MethodKind, Modifiers, TypeKind};
    use crate::model::entities::{ClassData, FieldData, MethodData};

    fn add_class(core: &mut ModelCore, fqn: &str) -> ClassId {
        core.push_class(ClassData::new_project(
            fqn,
            fqn.rsplit('.').next().unwrap(),
            TypeKind::Class,
            Modifiers::NONE,
        ))
    }

    fn add_method(core: &mut ModelCore, class: ClassId, name: &str) -> MethodId {
        let fqn = core.class(class).fqn().to_string();
        let id = core.push_method(MethodData::new(
            format!("{fqn}#{name}()"),
            name,
            format!("{name}()"),
            MethodKind::Method,
            class,
        ));
        core.class_mut(class).methods.push(id);
        id
    }

    fn add_field(core: &mut ModelCore, class: ClassId, name: &str) -> FieldId {
        let fqn = core.class(class).fqn().to_string();
        let id = core.push_field(FieldData::new(format!("{fqn}#{name}"), name, class));
        core.class_mut(class).fields.push(id);
        id
    }

    #[test]
    fn test_dit_boundaries() {
        let mut core = ModelCore::new("test", ".");
        let a = add_class(&mut core, "p.A");
        let b = add_class(&mut core, "p.B");
        let c = add_class(&mut core, "p.C");
        assert_eq!(dit(&core, c), 0);

        core.link_super_class(a, b);
        core.link_super_class(b, c);
        assert_eq!(dit(&core, a), 2);
        assert_eq!(dit(&core, b), 1);
    }

    #[test]
    fn test_dit_stops_at_external_parent() {
        let mut core = ModelCore::new("test", ".");
        let a = add_class(&mut core, "p.A");
        let external = core.push_class(ClassData::external_stub("java.lang.Object"));
        core.link_super_class(a, external);
        assert_eq!(dit(&core, a), 0);
    }

    #[test]
    fn test_noc_counts_direct_children_only() {
        let mut core = ModelCore::new("test", ".");
        let base = add_class(&mut core, "p.Base");
        let mid = add_class(&mut core, "p.Mid");
        let leaf = add_class(&mut core, "p.Leaf");
        core.link_super_class(mid, base);
        core.link_super_class(leaf, mid);

        assert_eq!(noc(&core, base), 1);
        assert_eq!(noc(&core, mid), 1);
        assert_eq!(noc(&core, leaf), 0);
    }

    #[test]
    fn test_rfc_counts_distinct_project_callees() {
        let mut core = ModelCore::new("test", ".");
        let a = add_class(&mut core, "p.A");
        let b = add_class(&mut core, "p.B");
        let a1 = add_method(&mut core, a, "one");
        let a2 = add_method(&mut core, a, "two");
        let b1 = add_method(&mut core, b, "shared");
        core.add_call(a1, b1);
        core.add_call(a2, b1);

        // 2 own + 1 distinct callee
        assert_eq!(rfc(&core, a), 3);
    }

    #[test]
    fn test_cbo_is_transitive_afferent_closure() {
        let mut core = ModelCore::new("test", ".");
        let a = add_class(&mut core, "p.A");
        let b = add_class(&mut core, "p.B");
        let c = add_class(&mut core, "p.C");
        // b depends on a; c depends on b
        core.add_class_dependency(b, a);
        core.add_class_dependency(c, b);

        assert_eq!(cbo(&core, a), 2);
        assert_eq!(cbo(&core, b), 1);
        assert_eq!(cbo(&core, c), 0);
    }

    #[test]
    fn test_lcom_shared_field_is_cohesive() {
        let mut core = ModelCore::new("test", ".");
        let a = add_class(&mut core, "p.A");
        let m1 = add_method(&mut core, a, "getX");
        let m2 = add_method(&mut core, a, "setX");
        let x = add_field(&mut core, a, "x");
        core.add_method_field_access(m1, x);
        core.add_method_field_access(m2, x);

        assert_eq!(lcom(&core, a), 0);
    }

    #[test]
    fn test_lcom_disjoint_fields_are_not_cohesive() {
        let mut core = ModelCore::new("test", ".");
        let a = add_class(&mut core, "p.A");
        let m1 = add_method(&mut core, a, "getX");
        let m2 = add_method(&mut core, a, "getY");
        let x = add_field(&mut core, a, "x");
        let y = add_field(&mut core, a, "y");
        core.add_method_field_access(m1, x);
        core.add_method_field_access(m2, y);

        assert_eq!(lcom(&core, a), 1);
    }
}
