use crate::model::{AccessFilter, FieldDescriptor, SanitizedField};

/// Read-only view of a host type system.
///
/// Implement this over whatever metadata the host provides: runtime reflection
/// where it exists, or a generated table such as
/// [`TypeTable`](crate::registry::TypeTable) where it does not.
pub trait TypeIntrospector {
    /// Handle identifying one type in the host.
    type Type: Clone;

    /// Returns the direct base type, or `None` for a root type.
    fn base_type(&self, ty: &Self::Type) -> Option<Self::Type>;

    /// Returns the fully-qualified name (e.g. `MyApp.Order`).
    fn qualified_name<'a>(&'a self, ty: &'a Self::Type) -> &'a str;

    /// Returns the fields of `ty` admitted by `filter`, in declaration order.
    ///
    /// When `filter.declared_only` is cleared the host also reports inherited
    /// fields, base first.
    fn declared_fields(&self, ty: &Self::Type, filter: AccessFilter) -> Vec<FieldDescriptor>;
}

/// Strategy deciding which fields of a type get printed.
///
/// Printers hold several of these and pick the first one that can handle a
/// given type.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a printer's harvester list can be
/// shared across threads.
pub trait FieldHarvester: Send + Sync {
    type Type;

    /// Returns `true` if this harvester knows how to report `ty`.
    fn can_handle(&self, ty: &Self::Type) -> bool;

    /// Returns the fields of `ty` to print, with display names.
    fn harvest(&self, ty: &Self::Type) -> Vec<SanitizedField>;
}
