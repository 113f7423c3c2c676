//! Arena index newtypes for model entities.
//!
//! Every entity is addressed by a dense index into its arena. Ids are only
//! meaningful within the analysis run that produced them; fully-qualified
//! names are the stable cross-run identity.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub(crate) u32);

        impl $name {
            /// Wrap an arena index.
            pub(crate) fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// The arena index.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

entity_id! {
    /// Index of a package in the model
    PackageId
}

entity_id! {
    /// Index of a source file in the model
    FileId
}

entity_id! {
    /// Index of a class, interface, or enum in the model
    ClassId
}

entity_id! {
    /// Index of a method, constructor, or initializer in the model
    MethodId
}

entity_id! {
    /// Index of a field or enum constant in the model
    FieldId
}

entity_id! {
    /// Index of a local variable or parameter in the model
    LocalId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = ClassId::new(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id, ClassId::new(42));
        assert_ne!(id, ClassId::new(7));
    }
}
