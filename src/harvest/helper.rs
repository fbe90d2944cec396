//! Reusable building blocks for [`FieldHarvester`](crate::traits::FieldHarvester)
//! implementations.
//!
//! Properties are never harvested: they only compute from other state or point
//! at fields, so the fields alone describe an object. Auto-property backing
//! fields are harvested like any other field and renamed for display with
//! [`sanitize_field_name`].

use tracing::{debug, trace};

use crate::model::{AccessFilter, FieldDescriptor, SanitizedField};
use crate::traits::TypeIntrospector;

/// Name suffix the host gives backing fields of auto-implemented properties.
pub const BACKING_FIELD_SUFFIX: &str = ">k__BackingField";

/// Leading character of a decorated backing field name.
pub const BACKING_FIELD_MARKER: char = '<';

/// Namespace prefixes of framework-internal types with no printable state.
///
/// Matched with a plain `starts_with` against the qualified name.
pub const NON_HARVESTABLE_PREFIXES: &[&str] = &[
    "System.Reflection",
    "System.Runtime",
    "System.SignatureStruct",
    "System.Func",
];

/// Returns the instance fields of `ty` and its base types using
/// [`AccessFilter::DEFAULT`].
pub fn get_fields<I>(introspector: &I, ty: Option<&I::Type>) -> Vec<FieldDescriptor>
where
    I: TypeIntrospector + ?Sized,
{
    enumerate_fields(introspector, ty, AccessFilter::DEFAULT)
}

/// Returns the fields of `ty` and its base types, most-base type first.
///
/// Within one type the host's declaration order is kept. The walk stops at the
/// first non-harvestable type: that type and every ancestor above it
/// contribute nothing. A missing type yields an empty list.
///
/// Each field is reported once only when `filter.declared_only` is set. Without
/// it the host already includes inherited fields at every level, so base fields
/// repeat once per derived level.
pub fn enumerate_fields<I>(
    introspector: &I,
    ty: Option<&I::Type>,
    filter: AccessFilter,
) -> Vec<FieldDescriptor>
where
    I: TypeIntrospector + ?Sized,
{
    // Harvestable part of the hierarchy, most-derived first.
    let mut chain = Vec::new();
    let mut current = ty.cloned();
    while let Some(level) = current {
        if !is_harvestable(introspector, &level) {
            trace!(
                type_name = introspector.qualified_name(&level),
                "Stopping field walk at non-harvestable type"
            );
            break;
        }
        current = introspector.base_type(&level);
        chain.push(level);
    }

    let fields: Vec<FieldDescriptor> = chain
        .iter()
        .rev()
        .flat_map(|level| introspector.declared_fields(level, filter))
        .collect();

    if let Some(ty) = ty {
        debug!(
            type_name = introspector.qualified_name(ty),
            levels = chain.len(),
            fields = fields.len(),
            "Harvested fields"
        );
    }
    fields
}

/// Tells if the type carries state worth printing.
pub fn is_harvestable<I>(introspector: &I, ty: &I::Type) -> bool
where
    I: TypeIntrospector + ?Sized,
{
    is_harvestable_name(introspector.qualified_name(ty))
}

/// [`is_harvestable`] for a bare qualified type name.
pub fn is_harvestable_name(type_name: &str) -> bool {
    !NON_HARVESTABLE_PREFIXES
        .iter()
        .any(|prefix| type_name.starts_with(prefix))
}

/// Restores the logical name of an auto-property backing field.
///
/// `<Age>k__BackingField` becomes `Age`. Names without the leading marker are
/// returned unchanged. After the marker is stripped every occurrence of the
/// suffix is removed, so the result is not idempotent for names carrying the
/// marker twice. Distinct fields may end up with the same display name; no
/// deduplication happens here.
pub fn sanitize_field_name(field_name: &str) -> String {
    match field_name.strip_prefix(BACKING_FIELD_MARKER) {
        Some(rest) => rest.replace(BACKING_FIELD_SUFFIX, ""),
        None => field_name.to_string(),
    }
}

/// Pairs each field with its sanitized display name, keeping order.
pub fn sanitize_fields(fields: Vec<FieldDescriptor>) -> Vec<SanitizedField> {
    fields
        .into_iter()
        .map(|field| SanitizedField {
            sanitized_name: sanitize_field_name(&field.name),
            field,
        })
        .collect()
}
