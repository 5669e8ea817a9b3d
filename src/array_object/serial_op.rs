use cbor4ii::core::Value as Cbor;
use smol_str::SmolStr;

use super::object::ArrayObject;
use crate::deserialization::from_blob;
use crate::error::ObjectError;
use crate::serialization::to_blob;
use crate::types::AccessMode;
use crate::value::Value;

const FLAG: &str = "flag";
const STORAGE: &str = "storage";
const ITERATOR_CLASS: &str = "iteratorClass";
const PROTECTED: &str = "protectedProperties";

impl ArrayObject {
    /// Encode flag, backing store, iterator class and the object's own
    /// properties into one CBOR map.
    pub fn serialize(&self) -> Result<Vec<u8>, ObjectError> {
        let mut entries = Vec::with_capacity(3 + self.properties.len());
        entries.push((Cbor::Text(FLAG.to_string()), Cbor::Integer(self.flag.bits() as i128)));
        entries.push((Cbor::Text(STORAGE.to_string()), Cbor::from(&self.storage)));
        entries.push((
            Cbor::Text(ITERATOR_CLASS.to_string()),
            Cbor::Text(self.get_iterator_class().to_string()),
        ));
        for (name, value) in &self.properties {
            entries.push((Cbor::Text(name.to_string()), Cbor::from(value)));
        }
        to_blob(&Cbor::Map(entries))
    }

    /// Replace this object's state with the one encoded in `data`.
    ///
    /// Entries are applied once each, in blob order. Unknown entries become
    /// own properties under the standard-mode rules, so a reserved name fails
    /// with [`ObjectError::ProtectedField`]. On error `self` is left untouched.
    pub fn unserialize(&mut self, data: &[u8]) -> Result<(), ObjectError> {
        let mut restored = ArrayObject::default();
        for (key, value) in from_blob(data)? {
            let name = SmolStr::from(key.to_string());
            match name.as_str() {
                FLAG => restored.flag = flag_from_value(&value)?,
                STORAGE => {
                    restored.exchange_array(value)?;
                }
                ITERATOR_CLASS => {
                    let class = value.as_str().ok_or_else(|| {
                        ObjectError::InvalidBlob(format!(
                            "iteratorClass must be text, got {}",
                            value.type_name()
                        ))
                    })?;
                    restored.set_iterator_class(class)?;
                }
                PROTECTED => {
                    tracing::trace!("protected property list in blob skipped");
                }
                _ => restored.set_own_property(&name, value)?,
            }
        }
        tracing::debug!(
            len = restored.storage.len(),
            properties = restored.properties.len(),
            "array object unserialized"
        );
        *self = restored;
        Ok(())
    }

    /// Decode a fresh object from a blob produced by [`serialize`](Self::serialize).
    pub fn from_blob(data: &[u8]) -> Result<Self, ObjectError> {
        let mut obj = ArrayObject::default();
        obj.unserialize(data)?;
        Ok(obj)
    }
}

fn flag_from_value(value: &Value) -> Result<AccessMode, ObjectError> {
    let bits = value.as_i64().ok_or_else(|| {
        ObjectError::InvalidBlob(format!("flag must be an integer, got {}", value.type_name()))
    })?;
    AccessMode::try_from(bits)
}

impl TryFrom<&[u8]> for ArrayObject {
    type Error = ObjectError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        ArrayObject::from_blob(data)
    }
}
