//! Harvest module - field enumeration over a host type system.
//!
//! - **Helper**: the hierarchy walk, the harvestable-type policy and backing
//!   field name cleanup via [`helper`]
//! - **Strategies**: ready-made [`FieldHarvester`](crate::traits::FieldHarvester)
//!   implementations built on the helper

pub mod helper;
pub mod strategies;

// Re-export commonly used items
pub use helper::{
    enumerate_fields, get_fields, is_harvestable, is_harvestable_name, sanitize_field_name,
    sanitize_fields, BACKING_FIELD_MARKER, BACKING_FIELD_SUFFIX, NON_HARVESTABLE_PREFIXES,
};

pub use strategies::{AllFieldsHarvester, PublicFieldsHarvester};
