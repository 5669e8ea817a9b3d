use smol_str::SmolStr;

use crate::deserialization::from_blob;
use crate::error::ObjectError;
use crate::serialization::fields_to_blob;
use crate::types::FieldMap;
use crate::value::Value;

/// Read accessor: computes a field's public value.
pub type Getter<M> = fn(&M) -> Result<Value, ObjectError>;
/// Write accessor: validates or coerces before storing.
pub type Setter<M> = fn(&mut M, Value) -> Result<(), ObjectError>;

/// `prefix` followed by `field` with its first letter upper-cased
/// (`"get"`, `"name"` → `"getName"`).
pub fn accessor_name(prefix: &str, field: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + field.len());
    out.push_str(prefix);
    let mut chars = field.chars();
    if let Some(first) = chars.next() {
        out.push(first.to_ascii_uppercase());
        out.extend(chars);
    }
    out
}

fn undefined(field: &str, accessor: String) -> ObjectError {
    ObjectError::UndefinedAccessor {
        field: SmolStr::new(field),
        accessor,
    }
}

/// Record with declared fields reached through accessor dispatch.
///
/// Implementors hand out their member map and, optionally, accessors by name
/// (`getName`, `setName`). Everything else is provided:
///
/// - write: setter if present, else direct assignment to a declared member,
///   else [`ObjectError::UndefinedAccessor`];
/// - read mirrors write with the getter;
/// - snapshots (`get_array_copy`, `to_json`, `serialize`) expose the raw
///   members and bypass accessors.
pub trait Model: Sized {
    fn members(&self) -> &FieldMap;
    fn members_mut(&mut self) -> &mut FieldMap;

    #[inline]
    fn getter(&self, _accessor: &str) -> Option<Getter<Self>> {
        None
    }

    #[inline]
    fn setter(&self, _accessor: &str) -> Option<Setter<Self>> {
        None
    }

    // ════════════════════════════════════════════════════════════════════════
    // Dispatch
    // ════════════════════════════════════════════════════════════════════════

    fn get(&self, field: &str) -> Result<Value, ObjectError> {
        let accessor = accessor_name("get", field);
        if let Some(getter) = self.getter(&accessor) {
            return getter(self);
        }
        match self.members().get(field) {
            Some(value) => Ok(value.clone()),
            None => Err(undefined(field, accessor)),
        }
    }

    fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<(), ObjectError> {
        let accessor = accessor_name("set", field);
        if let Some(setter) = self.setter(&accessor) {
            return setter(self, value.into());
        }
        match self.members_mut().get_mut(field) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(undefined(field, accessor)),
        }
    }

    /// Readable and non-null. Only an undefined accessor counts as "not
    /// set"; any other getter failure is returned.
    fn isset(&self, field: &str) -> Result<bool, ObjectError> {
        match self.get(field) {
            Ok(value) => Ok(!value.is_null()),
            Err(ObjectError::UndefinedAccessor { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Write `Null` through the normal path.
    fn unset(&mut self, field: &str) -> Result<(), ObjectError> {
        match self.set(field, Value::Null) {
            Err(ObjectError::UndefinedAccessor { .. }) => Err(ObjectError::InvalidNullAssignment {
                field: SmolStr::new(field),
            }),
            other => other,
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Snapshots
    // ════════════════════════════════════════════════════════════════════════

    /// Overwrite every declared member present in `array`, explicit nulls
    /// included. Unknown names are ignored and setters are not consulted.
    fn exchange_array(&mut self, array: &FieldMap) -> &mut Self {
        for (name, slot) in self.members_mut().iter_mut() {
            if let Some(value) = array.get(name) {
                *slot = value.clone();
            }
        }
        self
    }

    fn get_array_copy(&self) -> FieldMap {
        self.members().clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.members()
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::from(v.clone())))
                .collect(),
        )
    }

    fn serialize(&self) -> Result<Vec<u8>, ObjectError> {
        fields_to_blob(self.members())
    }

    /// Restore members from a blob under the `exchange_array` rule.
    fn unserialize(&mut self, data: &[u8]) -> Result<(), ObjectError> {
        let fields: FieldMap = from_blob(data)?
            .into_iter()
            .map(|(k, v)| (SmolStr::from(k.to_string()), v))
            .collect();
        let restored = fields
            .keys()
            .filter(|name| self.members().contains_key(*name))
            .count();
        if restored < fields.len() {
            tracing::trace!(skipped = fields.len() - restored, "undeclared fields in blob skipped");
        }
        self.exchange_array(&fields);
        tracing::debug!(restored, model = self.class_name(), "model unserialized");
        Ok(())
    }

    /// Type name without its module path.
    fn class_name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base)
    }
}
