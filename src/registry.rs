//! Table-driven type system.
//!
//! [`TypeTable`] implements [`TypeIntrospector`] over a fixed set of type
//! definitions, built in code or loaded from a JSON document. It stands in for
//! runtime reflection: generate one [`TypeDef`] per printable type and the
//! harvester walks the table exactly as it would walk host metadata.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "types": [
//!     { "name": "MyApp.Entity", "fields": [
//!         { "name": "id", "type": "System.Int64", "accessibility": "public" } ] },
//!     { "name": "MyApp.Order", "base": "MyApp.Entity", "fields": [
//!         { "name": "<Total>k__BackingField", "type": "System.Decimal" },
//!         { "name": "Count", "type": "System.Int32", "static": true } ] }
//!   ]
//! }
//! ```
//!
//! `accessibility` defaults to `non_public` and `static` to `false`. Base types
//! may appear after the types deriving from them.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::model::{AccessFilter, Accessibility, FieldDescriptor};
use crate::traits::TypeIntrospector;

// ============================================================================
// Definitions
// ============================================================================

/// Definition of one field in a [`TypeDef`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default = "default_accessibility")]
    pub accessibility: Accessibility,

    #[serde(default, rename = "static")]
    pub is_static: bool,
}

fn default_accessibility() -> Accessibility {
    Accessibility::NonPublic
}

impl FieldDef {
    /// Creates a non-public instance field.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            accessibility: Accessibility::NonPublic,
            is_static: false,
        }
    }

    pub fn public(mut self) -> Self {
        self.accessibility = Accessibility::Public;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// Definition of one type: its name, optional base, and declared fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,

    #[serde(default)]
    pub base: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            fields: Vec::new(),
        }
    }

    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }
}

#[derive(Debug, Deserialize)]
struct TypeTableDocument {
    types: Vec<TypeDef>,
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while building a [`TypeTable`].
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Two definitions share a qualified name
    #[error("Type '{0}' is defined more than once")]
    DuplicateType(String),

    /// A base type is not defined in the table
    #[error("Type '{type_name}' extends unknown type '{base}'")]
    UnknownBaseType { type_name: String, base: String },

    /// Following base types from this type never reaches a root
    #[error("Inheritance cycle through type '{0}'")]
    CyclicInheritance(String),

    /// The JSON document could not be parsed
    #[error("Invalid type table document: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Table
// ============================================================================

/// Handle to a type in a [`TypeTable`].
///
/// Only meaningful for the table that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeHandle(usize);

#[derive(Debug)]
struct TypeEntry {
    name: String,
    base: Option<TypeHandle>,
    fields: Vec<FieldDef>,
}

/// Validated, immutable set of type definitions.
#[derive(Debug, Default)]
pub struct TypeTable {
    types: Vec<TypeEntry>,
    by_name: HashMap<String, TypeHandle>,
}

impl TypeTable {
    /// Builds a table from definitions.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if a name is defined twice, a base type is
    /// missing, or the base chains contain a cycle.
    pub fn from_defs(defs: Vec<TypeDef>) -> Result<Self, RegistryError> {
        let mut by_name = HashMap::with_capacity(defs.len());
        for (index, def) in defs.iter().enumerate() {
            if by_name.insert(def.name.clone(), TypeHandle(index)).is_some() {
                return Err(RegistryError::DuplicateType(def.name.clone()));
            }
        }

        let mut types = Vec::with_capacity(defs.len());
        for def in defs {
            let base = match def.base {
                Some(base) => match by_name.get(&base) {
                    Some(handle) => Some(*handle),
                    None => {
                        return Err(RegistryError::UnknownBaseType {
                            type_name: def.name,
                            base,
                        })
                    }
                },
                None => None,
            };
            types.push(TypeEntry {
                name: def.name,
                base,
                fields: def.fields,
            });
        }

        let table = Self { types, by_name };
        table.check_acyclic()?;

        debug!(types = table.types.len(), "Type table built");
        Ok(table)
    }

    /// Parses a JSON type table document and builds a table from it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Json`] for malformed documents, otherwise the
    /// same errors as [`TypeTable::from_defs`].
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let document: TypeTableDocument = serde_json::from_str(json)?;
        Self::from_defs(document.types)
    }

    /// Finds a type by its qualified name.
    pub fn lookup(&self, name: &str) -> Option<TypeHandle> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn check_acyclic(&self) -> Result<(), RegistryError> {
        // Types already proven to reach a root.
        let mut rooted: HashSet<usize> = HashSet::new();

        for start in 0..self.types.len() {
            let mut path = HashSet::new();
            let mut current = Some(TypeHandle(start));
            while let Some(TypeHandle(index)) = current {
                if rooted.contains(&index) {
                    break;
                }
                if !path.insert(index) {
                    return Err(RegistryError::CyclicInheritance(
                        self.types[index].name.clone(),
                    ));
                }
                current = self.types[index].base;
            }
            rooted.extend(path);
        }
        Ok(())
    }

    fn fields_of(
        &self,
        handle: TypeHandle,
        filter: AccessFilter,
    ) -> impl Iterator<Item = FieldDescriptor> + '_ {
        let entry = &self.types[handle.0];
        entry
            .fields
            .iter()
            .enumerate()
            .filter(move |(_, field)| {
                !field.is_static && filter.instance && filter.admits(field.accessibility)
            })
            .map(move |(slot, field)| FieldDescriptor {
                name: field.name.clone(),
                declaring_type: entry.name.clone(),
                field_type: field.field_type.clone(),
                accessibility: field.accessibility,
                slot,
            })
    }
}

impl TypeIntrospector for TypeTable {
    type Type = TypeHandle;

    fn base_type(&self, ty: &TypeHandle) -> Option<TypeHandle> {
        self.types[ty.0].base
    }

    fn qualified_name<'a>(&'a self, ty: &'a TypeHandle) -> &'a str {
        &self.types[ty.0].name
    }

    fn declared_fields(&self, ty: &TypeHandle, filter: AccessFilter) -> Vec<FieldDescriptor> {
        let mut chain = vec![*ty];
        if !filter.declared_only {
            let mut current = self.types[ty.0].base;
            while let Some(base) = current {
                chain.push(base);
                current = self.types[base.0].base;
            }
        }

        chain
            .into_iter()
            .rev()
            .flat_map(|handle| self.fields_of(handle, filter))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
