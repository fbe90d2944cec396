use serde::{Deserialize, Serialize};

/// Visibility of a field as reported by the host type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Public,
    NonPublic,
}

/// Options controlling which fields a host reports for a type.
///
/// Static fields are never part of a harvest, so there is no flag for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessFilter {
    pub public: bool,
    pub non_public: bool,
    pub instance: bool,
    /// Only fields declared directly on the type. Inheritance is handled by the
    /// harvester walk, so this is normally set.
    pub declared_only: bool,
}

impl AccessFilter {
    /// Public and non-public instance fields declared on each type.
    pub const DEFAULT: AccessFilter = AccessFilter {
        public: true,
        non_public: true,
        instance: true,
        declared_only: true,
    };

    /// Public instance fields declared on each type.
    pub const PUBLIC: AccessFilter = AccessFilter {
        public: true,
        non_public: false,
        instance: true,
        declared_only: true,
    };

    pub fn admits(&self, accessibility: Accessibility) -> bool {
        match accessibility {
            Accessibility::Public => self.public,
            Accessibility::NonPublic => self.non_public,
        }
    }
}

impl Default for AccessFilter {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One declared instance field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Raw name, possibly decorated (e.g. `<Age>k__BackingField`)
    pub name: String,

    /// Qualified name of the type that declares the field
    pub declaring_type: String,

    /// Qualified name of the field's type
    pub field_type: String,

    pub accessibility: Accessibility,

    /// Position of the field in its declaring type's field table.
    ///
    /// Printers use `(declaring_type, slot)` to read the value from an instance.
    pub slot: usize,
}

/// A harvested field paired with the name it should be displayed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedField {
    pub field: FieldDescriptor,
    pub sanitized_name: String,
}
