//! Placeholder entities for declarations outside the analyzed project.
//!
//! References that resolve to library or otherwise un-analyzed code still
//! need a target entity for relationship edges. The factory creates minimal
//! stand-ins: name and identity only, `is_in_project() == false`, and no
//! internal detail. Stubs are cached through the registry exactly like
//! project entities, so repeated references share one stub.

use crate::core::registry::EntityRegistry;
use crate::frontend::MethodKind;
use crate::model::entities::{ClassData, EntityOrigin, FieldData, MethodData};
use crate::model::ids::{ClassId, FieldId, MethodId};
use crate::model::store::ModelCore;

/// Factory for external placeholder entities.
pub(crate) struct ExternalEntityFactory;

impl ExternalEntityFactory {
    /// Get or create the external class stub for `fqn`.
    pub(crate) fn class(core: &mut ModelCore, registry: &EntityRegistry, fqn: &str) -> ClassId {
        registry.get_or_create_class(fqn, || core.push_class(ClassData::external_stub(fqn)))
    }

    /// Get or create an external method stub declared by `class_fqn`.
    pub(crate) fn method(
        core: &mut ModelCore,
        registry: &EntityRegistry,
        class_fqn: &str,
        name: &str,
        parameter_types: &[String],
    ) -> MethodId {
        let class_id = Self::class(core, registry, class_fqn);
        let signature = format!("{name}({})", parameter_types.join(","));
        let key = EntityRegistry::method_key(class_fqn, &signature);

        let method_id = registry.get_or_create_method(&key, || {
            let mut data =
                MethodData::new(key.clone(), name, signature.clone(), MethodKind::Method, class_id);
            data.origin = EntityOrigin::External;
            data.parameter_types = parameter_types.iter().cloned().collect();
            let id = core.push_method(data);
            core.class_mut(class_id).methods.push(id);
            id
        });
        method_id
    }

    /// Get or create an external field stub declared by `class_fqn`.
    pub(crate) fn field(
        core: &mut ModelCore,
        registry: &EntityRegistry,
        class_fqn: &str,
        name: &str,
    ) -> FieldId {
        let class_id = Self::class(core, registry, class_fqn);
        let key = EntityRegistry::field_key(class_fqn, name);

        registry.get_or_create_field(&key, || {
            let mut data = FieldData::new(key.clone(), name, class_id);
            data.origin = EntityOrigin::External;
            let id = core.push_field(data);
            core.class_mut(class_id).fields.push(id);
            id
        })
    }
}
