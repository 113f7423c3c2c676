//! The arena store behind both model phases.
//!
//! All relationship edges are maintained in symmetric pairs; the `add_*` and
//! `link_*` operations here are the only writers, and each updates both
//! directions before returning. Hierarchy walks are iterative with visited
//! sets, so a malformed cyclic hierarchy terminates instead of recursing
//! forever.

use ahash::AHashSet;
use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::model::entities::{
    ClassData, FieldData, FileData, LocalData, MethodData, PackageData,
};
use crate::model::ids::{ClassId, FieldId, FileId, LocalId, MethodId, PackageId};

/// Arena store for one analysis run.
#[derive(Debug, Default)]
pub(crate) struct ModelCore {
    pub(crate) project_name: String,
    pub(crate) project_root: String,
    pub(crate) packages: Vec<PackageData>,
    pub(crate) files: Vec<FileData>,
    pub(crate) classes: Vec<ClassData>,
    pub(crate) methods: Vec<MethodData>,
    pub(crate) fields: Vec<FieldData>,
    pub(crate) locals: Vec<LocalData>,
}

impl ModelCore {
    pub(crate) fn new(project_name: impl Into<String>, project_root: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            project_root: project_root.into(),
            ..Self::default()
        }
    }

    pub(crate) fn package(&self, id: PackageId) -> &PackageData {
        &self.packages[id.index()]
    }

    pub(crate) fn package_mut(&mut self, id: PackageId) -> &mut PackageData {
        &mut self.packages[id.index()]
    }

    pub(crate) fn file(&self, id: FileId) -> &FileData {
        &self.files[id.index()]
    }

    pub(crate) fn file_mut(&mut self, id: FileId) -> &mut FileData {
        &mut self.files[id.index()]
    }

    pub(crate) fn class(&self, id: ClassId) -> &ClassData {
        &self.classes[id.index()]
    }

    pub(crate) fn class_mut(&mut self, id: ClassId) -> &mut ClassData {
        &mut self.classes[id.index()]
    }

    pub(crate) fn method(&self, id: MethodId) -> &MethodData {
        &self.methods[id.index()]
    }

    pub(crate) fn method_mut(&mut self, id: MethodId) -> &mut MethodData {
        &mut self.methods[id.index()]
    }

    pub(crate) fn field(&self, id: FieldId) -> &FieldData {
        &self.fields[id.index()]
    }

    pub(crate) fn field_mut(&mut self, id: FieldId) -> &mut FieldData {
        &mut self.fields[id.index()]
    }

    pub(crate) fn local(&self, id: LocalId) -> &LocalData {
        &self.locals[id.index()]
    }

    pub(crate) fn local_mut(&mut self, id: LocalId) -> &mut LocalData {
        &mut self.locals[id.index()]
    }

    pub(crate) fn push_package(&mut self, data: PackageData) -> PackageId {
        let id = PackageId::new(self.packages.len());
        self.packages.push(data);
        id
    }

    pub(crate) fn push_file(&mut self, data: FileData) -> FileId {
        let id = FileId::new(self.files.len());
        self.files.push(data);
        id
    }

    pub(crate) fn push_class(&mut self, data: ClassData) -> ClassId {
        let id = ClassId::new(self.classes.len());
        self.classes.push(data);
        id
    }

    pub(crate) fn push_method(&mut self, data: MethodData) -> MethodId {
        let id = MethodId::new(self.methods.len());
        self.methods.push(data);
        id
    }

    pub(crate) fn push_field(&mut self, data: FieldData) -> FieldId {
        let id = FieldId::new(self.fields.len());
        self.fields.push(data);
        id
    }

    pub(crate) fn push_local(&mut self, data: LocalData) -> LocalId {
        let id = LocalId::new(self.locals.len());
        self.locals.push(data);
        id
    }

    // ---- symmetric edge operations ----

    /// Record `sub extends sup`, updating both the super link and the
    /// children set of `sup`.
    pub(crate) fn link_super_class(&mut self, sub: ClassId, sup: ClassId) {
        if sub == sup {
            return;
        }
        self.classes[sub.index()].super_class = Some(sup);
        self.classes[sup.index()].sub_classes.insert(sub);
    }

    /// Record `sub implements sup` (or interface extension).
    pub(crate) fn link_super_interface(&mut self, sub: ClassId, sup: ClassId) {
        if sub == sup {
            return;
        }
        self.classes[sub.index()].super_interfaces.insert(sup);
        self.classes[sup.index()].sub_classes.insert(sub);
    }

    /// Record that `from` uses `to`. Updates the class-level efferent and
    /// afferent sets together, and propagates the edge to the owning
    /// packages when both are known and differ.
    pub(crate) fn add_class_dependency(&mut self, from: ClassId, to: ClassId) {
        if from == to {
            return;
        }
        self.classes[from.index()].efferent.insert(to);
        self.classes[to.index()].afferent.insert(from);

        let from_package = self.classes[from.index()].package;
        let to_package = self.classes[to.index()].package;
        if let (Some(from_package), Some(to_package)) = (from_package, to_package) {
            if from_package != to_package {
                self.packages[from_package.index()].efferent.insert(to_package);
                self.packages[to_package.index()].afferent.insert(from_package);
            }
        }
    }

    /// Record a call edge, updating caller and callee together.
    pub(crate) fn add_call(&mut self, caller: MethodId, callee: MethodId) {
        self.methods[caller.index()].calls.insert(callee);
        self.methods[callee.index()].called_by.insert(caller);
    }

    /// Record a call from a field initializer.
    pub(crate) fn add_field_call(&mut self, field: FieldId, callee: MethodId) {
        self.fields[field.index()].calls.insert(callee);
        self.methods[callee.index()].called_by_fields.insert(field);
    }

    /// Record a field access from a method body.
    pub(crate) fn add_method_field_access(&mut self, method: MethodId, field: FieldId) {
        self.methods[method.index()].accessed_fields.insert(field);
        self.fields[field.index()].accessed_by_methods.insert(method);
    }

    /// Record a field access from another field's initializer.
    pub(crate) fn add_field_field_access(&mut self, from: FieldId, to: FieldId) {
        if from == to {
            return;
        }
        self.fields[from.index()].accessed_fields.insert(to);
        self.fields[to.index()].accessed_by_fields.insert(from);
    }

    /// Record that `sub` overrides `sup`.
    pub(crate) fn add_override(&mut self, sub: MethodId, sup: MethodId) {
        if sub == sup {
            return;
        }
        self.methods[sub.index()].overrides.insert(sup);
        self.methods[sup.index()].overridden_by.insert(sub);
    }

    // ---- hierarchy walks ----

    /// Super-class chain from the direct parent outward. Stops at the first
    /// repeated class, so cyclic hierarchies terminate.
    pub(crate) fn all_superclasses(&self, id: ClassId) -> Vec<ClassId> {
        let mut chain = Vec::new();
        let mut visited: AHashSet<ClassId> = AHashSet::new();
        visited.insert(id);

        let mut current = self.classes[id.index()].super_class;
        while let Some(parent) = current {
            if !visited.insert(parent) {
                break;
            }
            chain.push(parent);
            current = self.classes[parent.index()].super_class;
        }
        chain
    }

    /// Every class reachable downward through children sets, excluding the
    /// start class.
    pub(crate) fn all_subclasses(&self, id: ClassId) -> Vec<ClassId> {
        let mut result = Vec::new();
        let mut visited: AHashSet<ClassId> = AHashSet::new();
        visited.insert(id);
        let mut work: Vec<ClassId> = self.classes[id.index()].sub_classes.iter().copied().collect();

        while let Some(next) = work.pop() {
            if !visited.insert(next) {
                continue;
            }
            result.push(next);
            work.extend(self.classes[next.index()].sub_classes.iter().copied());
        }
        result
    }

    /// Every interface reachable through super-interface sets, including
    /// those inherited through the super-class chain.
    pub(crate) fn all_super_interfaces(&self, id: ClassId) -> Vec<ClassId> {
        let mut result = Vec::new();
        let mut visited: AHashSet<ClassId> = AHashSet::new();
        visited.insert(id);

        let mut work: Vec<ClassId> = self.classes[id.index()]
            .super_interfaces
            .iter()
            .copied()
            .collect();
        for ancestor in self.all_superclasses(id) {
            work.extend(self.classes[ancestor.index()].super_interfaces.iter().copied());
        }

        while let Some(next) = work.pop() {
            if !visited.insert(next) {
                continue;
            }
            result.push(next);
            work.extend(self.classes[next.index()].super_interfaces.iter().copied());
        }
        result
    }

    // ---- graph views ----

    /// Directed inheritance graph (child → parent for both extends and
    /// implements edges).
    fn inheritance_graph(&self) -> (DiGraph<ClassId, ()>, Vec<NodeIndex>) {
        let mut graph = DiGraph::new();
        let indices: Vec<NodeIndex> = (0..self.classes.len())
            .map(|index| graph.add_node(ClassId::new(index)))
            .collect();

        for (index, class) in self.classes.iter().enumerate() {
            if let Some(parent) = class.super_class {
                graph.add_edge(indices[index], indices[parent.index()], ());
            }
            for &interface in &class.super_interfaces {
                graph.add_edge(indices[index], indices[interface.index()], ());
            }
        }
        (graph, indices)
    }

    /// Strongly connected components of the inheritance graph with more than
    /// one member. A well-formed hierarchy has none; resolution reports any
    /// that appear.
    pub(crate) fn hierarchy_cycles(&self) -> Vec<Vec<ClassId>> {
        let (graph, _) = self.inheritance_graph();
        kosaraju_scc(&graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                component
                    .into_iter()
                    .map(|index| graph[index])
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Directed class dependency graph over the efferent edges.
    pub(crate) fn dependency_graph(&self) -> DiGraph<ClassId, ()> {
        let mut graph = DiGraph::new();
        let indices: Vec<NodeIndex> = (0..self.classes.len())
            .map(|index| graph.add_node(ClassId::new(index)))
            .collect();

        for (index, class) in self.classes.iter().enumerate() {
            for &target in &class.efferent {
                graph.add_edge(indices[index], indices[target.index()], ());
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{Modifiers, TypeKind};

    fn store_with_classes(names: &[&str]) -> (ModelCore, Vec<ClassId>) {
        let mut core = ModelCore::new("test", ".");
        let ids = names
            .iter()
            .map(|name| {
                core.push_class(ClassData::new_project(
                    format!("p.{name}"),
                    *name,
                    TypeKind::Class,
                    Modifiers::NONE,
                ))
            })
            .collect();
        (core, ids)
    }

    #[test]
    fn test_class_dependency_is_symmetric() {
        let (mut core, ids) = store_with_classes(&["A", "B"]);
        core.add_class_dependency(ids[1], ids[0]);

        assert!(core.class(ids[1]).efferent.contains(&ids[0]));
        assert!(core.class(ids[0]).afferent.contains(&ids[1]));
        assert!(core.class(ids[0]).efferent.is_empty());
    }

    #[test]
    fn test_self_dependency_ignored() {
        let (mut core, ids) = store_with_classes(&["A"]);
        core.add_class_dependency(ids[0], ids[0]);
        assert!(core.class(ids[0]).efferent.is_empty());
        assert!(core.class(ids[0]).afferent.is_empty());
    }

    #[test]
    fn test_package_edges_follow_class_edges() {
        let (mut core, ids) = store_with_classes(&["A", "B"]);
        let pa = core.push_package(PackageData::new("p"));
        let pb = core.push_package(PackageData::new("q"));
        core.class_mut(ids[0]).package = Some(pa);
        core.class_mut(ids[1]).package = Some(pb);

        core.add_class_dependency(ids[1], ids[0]);
        assert!(core.package(pb).efferent.contains(&pa));
        assert!(core.package(pa).afferent.contains(&pb));
    }

    #[test]
    fn test_superclass_chain_walk() {
        let (mut core, ids) = store_with_classes(&["A", "B", "C"]);
        core.link_super_class(ids[0], ids[1]);
        core.link_super_class(ids[1], ids[2]);

        assert_eq!(core.all_superclasses(ids[0]), vec![ids[1], ids[2]]);
        assert!(core.class(ids[2]).sub_classes.contains(&ids[1]));
    }

    #[test]
    fn test_cyclic_hierarchy_terminates() {
        let (mut core, ids) = store_with_classes(&["A", "B"]);
        core.link_super_class(ids[0], ids[1]);
        core.link_super_class(ids[1], ids[0]);

        let chain = core.all_superclasses(ids[0]);
        assert_eq!(chain, vec![ids[1]]);

        let cycles = core.hierarchy_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 2);
    }

    #[test]
    fn test_all_subclasses_transitive() {
        let (mut core, ids) = store_with_classes(&["A", "B", "C"]);
        core.link_super_class(ids[1], ids[0]);
        core.link_super_class(ids[2], ids[1]);

        let mut subs = core.all_subclasses(ids[0]);
        subs.sort();
        assert_eq!(subs, vec![ids[1], ids[2]]);
    }

    #[test]
    fn test_interface_closure_includes_inherited() {
        let (mut core, ids) = store_with_classes(&["A", "Base", "I", "J"]);
        core.link_super_class(ids[0], ids[1]);
        core.link_super_interface(ids[1], ids[2]);
        core.link_super_interface(ids[2], ids[3]);

        let mut interfaces = core.all_super_interfaces(ids[0]);
        interfaces.sort();
        assert_eq!(interfaces, vec![ids[2], ids[3]]);
    }
}
