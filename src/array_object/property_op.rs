use smol_str::SmolStr;

use super::object::ArrayObject;
use crate::error::ObjectError;
use crate::types::{is_protected, AccessMode, FieldMap};
use crate::value::{Key, Value};

// ─── Property access ────────────────────────────────────────────────────────
//
// ArrayAsProps: every call is forwarded to the matching offset operation.
// StdPropList:  calls work on the object's own properties; reserved names
//               fail with ProtectedField.

fn guard(name: &str) -> Result<(), ObjectError> {
    if is_protected(name) {
        return Err(ObjectError::ProtectedField(SmolStr::new(name)));
    }
    Ok(())
}

impl ArrayObject {
    pub fn get_property(&self, name: &str) -> Result<Option<&Value>, ObjectError> {
        if self.flag == AccessMode::ArrayAsProps {
            return Ok(self.offset_get(name));
        }
        guard(name)?;
        Ok(self.properties.get(name))
    }

    pub fn set_property(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ObjectError> {
        if self.flag == AccessMode::ArrayAsProps {
            self.offset_set(Some(Key::from(name)), value);
            return Ok(());
        }
        self.set_own_property(name, value.into())
    }

    pub fn isset_property(&self, name: &str) -> Result<bool, ObjectError> {
        if self.flag == AccessMode::ArrayAsProps {
            return Ok(self.offset_exists(name));
        }
        guard(name)?;
        Ok(self.properties.get(name).is_some_and(|v| !v.is_null()))
    }

    pub fn unset_property(&mut self, name: &str) -> Result<(), ObjectError> {
        if self.flag == AccessMode::ArrayAsProps {
            self.offset_unset(name);
            return Ok(());
        }
        guard(name)?;
        self.properties.shift_remove(name);
        Ok(())
    }

    /// The object's own properties, in assignment order.
    #[inline]
    pub fn properties(&self) -> &FieldMap {
        &self.properties
    }

    /// Standard-mode write, whatever the current access mode.
    pub(crate) fn set_own_property(&mut self, name: &str, value: Value) -> Result<(), ObjectError> {
        guard(name)?;
        self.properties.insert(SmolStr::new(name), value);
        Ok(())
    }
}
