use serde::ser::{Serialize, Serializer};
use smol_str::SmolStr;
use std::fmt;
use std::sync::Arc;

use super::dispatch::{accessor_name, Getter, Model, Setter};
use crate::types::{FastMap, FieldMap};
use crate::value::Value;

// ─── AccessorTable ──────────────────────────────────────────────────────────

/// Accessors registered at runtime, keyed by accessor name (`getName`).
#[derive(Clone, Default)]
pub struct AccessorTable {
    getters: FastMap<String, Getter<Record>>,
    setters: FastMap<String, Setter<Record>>,
}

impl AccessorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the getter for `field` (stored as `get<Field>`).
    pub fn with_getter(mut self, field: &str, getter: Getter<Record>) -> Self {
        self.getters.insert(accessor_name("get", field), getter);
        self
    }

    /// Register the setter for `field` (stored as `set<Field>`).
    pub fn with_setter(mut self, field: &str, setter: Setter<Record>) -> Self {
        self.setters.insert(accessor_name("set", field), setter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.getters.is_empty() && self.setters.is_empty()
    }
}

impl fmt::Debug for AccessorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorTable")
            .field("getters", &self.getters.keys().collect::<Vec<_>>())
            .field("setters", &self.setters.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ─── Record ─────────────────────────────────────────────────────────────────

/// General-purpose [`Model`]: declared members plus a shared accessor table.
/// Clones share the table.
#[derive(Debug, Clone, Default)]
pub struct Record {
    members: FieldMap,
    accessors: Arc<AccessorTable>,
}

impl Record {
    /// Declare `fields`, all starting as `Null`.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self::with_fields(
            fields
                .into_iter()
                .map(|f| (Into::<SmolStr>::into(f), Value::Null))
                .collect(),
        )
    }

    /// Declare the keys of `members` with their initial values.
    pub fn with_fields(members: FieldMap) -> Self {
        Self {
            members,
            accessors: Arc::default(),
        }
    }

    pub fn with_accessors(mut self, accessors: AccessorTable) -> Self {
        self.accessors = Arc::new(accessors);
        self
    }

    /// Raw member value, bypassing accessors. Meant for accessor bodies.
    #[inline]
    pub fn member(&self, field: &str) -> Option<&Value> {
        self.members.get(field)
    }

    /// Raw member write, bypassing accessors. Undeclared names are ignored
    /// and reported as `false`.
    pub fn put_member(&mut self, field: &str, value: Value) -> bool {
        match self.members.get_mut(field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

impl Model for Record {
    #[inline]
    fn members(&self) -> &FieldMap {
        &self.members
    }

    #[inline]
    fn members_mut(&mut self) -> &mut FieldMap {
        &mut self.members
    }

    fn getter(&self, accessor: &str) -> Option<Getter<Self>> {
        self.accessors.getters.get(accessor).copied()
    }

    fn setter(&self, accessor: &str) -> Option<Setter<Self>> {
        self.accessors.setters.get(accessor).copied()
    }
}

impl PartialEq for Record {
    /// Members only.
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.members.iter())
    }
}
