//! The entity registry: one entity per unique identity, per run.
//!
//! Keys are fully-qualified names (classes) or FQN-derived member keys
//! (methods: declaring class + signature; fields: declaring class + name).
//! `get_or_create` is atomic check-then-create, so concurrent discovery of
//! the same declaration from different syntactic contexts still yields
//! exactly one entity.

use dashmap::DashMap;

use crate::model::ids::{ClassId, FieldId, MethodId};

/// De-duplicating identity store for one analysis run.
///
/// The registry is a pure cache over the model arenas: it maps identities to
/// arena ids and never fails. [`EntityRegistry::clear`] resets it between
/// independent runs.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    classes: DashMap<String, ClassId>,
    methods: DashMap<String, MethodId>,
    fields: DashMap<String, FieldId>,
}

impl EntityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry key for a method: declaring-class FQN plus signature.
    pub fn method_key(class_fqn: &str, signature: &str) -> String {
        format!("{class_fqn}#{signature}")
    }

    /// Registry key for a field: declaring-class FQN plus field name.
    pub fn field_key(class_fqn: &str, name: &str) -> String {
        format!("{class_fqn}#{name}")
    }

    /// Return the cached class for `fqn`, or invoke `create` to build it,
    /// store the result, and return it.
    pub fn get_or_create_class(&self, fqn: &str, create: impl FnOnce() -> ClassId) -> ClassId {
        if let Some(existing) = self.classes.get(fqn) {
            return *existing;
        }
        *self.classes.entry(fqn.to_string()).or_insert_with(create)
    }

    /// Look up a class without ever creating one.
    pub fn lookup_class(&self, fqn: &str) -> Option<ClassId> {
        self.classes.get(fqn).map(|entry| *entry)
    }

    /// Return the cached method for `key`, or invoke `create` to build it.
    pub fn get_or_create_method(&self, key: &str, create: impl FnOnce() -> MethodId) -> MethodId {
        if let Some(existing) = self.methods.get(key) {
            return *existing;
        }
        *self.methods.entry(key.to_string()).or_insert_with(create)
    }

    /// Look up a method without ever creating one.
    pub fn lookup_method(&self, key: &str) -> Option<MethodId> {
        self.methods.get(key).map(|entry| *entry)
    }

    /// Return the cached field for `key`, or invoke `create` to build it.
    pub fn get_or_create_field(&self, key: &str, create: impl FnOnce() -> FieldId) -> FieldId {
        if let Some(existing) = self.fields.get(key) {
            return *existing;
        }
        *self.fields.entry(key.to_string()).or_insert_with(create)
    }

    /// Look up a field without ever creating one.
    pub fn lookup_field(&self, key: &str) -> Option<FieldId> {
        self.fields.get(key).map(|entry| *entry)
    }

    /// Reset all registry state. Required between independent analysis runs.
    pub fn clear(&self) {
        self.classes.clear();
        self.methods.clear();
        self.fields.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_returns_cached_identity() {
        let registry = EntityRegistry::new();
        let mut created = 0;

        let first = registry.get_or_create_class("p.A", || {
            created += 1;
            ClassId::new(0)
        });
        let second = registry.get_or_create_class("p.A", || {
            created += 1;
            ClassId::new(99)
        });

        assert_eq!(first, second);
        assert_eq!(created, 1);
    }

    #[test]
    fn test_lookup_never_creates() {
        let registry = EntityRegistry::new();
        assert_eq!(registry.lookup_class("p.A"), None);

        registry.get_or_create_class("p.A", || ClassId::new(3));
        assert_eq!(registry.lookup_class("p.A"), Some(ClassId::new(3)));
    }

    #[test]
    fn test_member_keys() {
        assert_eq!(EntityRegistry::method_key("p.A", "foo(int)"), "p.A#foo(int)");
        assert_eq!(EntityRegistry::field_key("p.A", "x"), "p.A#x");
    }

    #[test]
    fn test_clear_resets_all_maps() {
        let registry = EntityRegistry::new();
        registry.get_or_create_class("p.A", || ClassId::new(0));
        registry.get_or_create_method("p.A#foo()", || MethodId::new(0));
        registry.get_or_create_field("p.A#x", || FieldId::new(0));

        registry.clear();
        assert_eq!(registry.lookup_class("p.A"), None);
        assert_eq!(registry.lookup_method("p.A#foo()"), None);
        assert_eq!(registry.lookup_field("p.A#x"), None);
    }
}
