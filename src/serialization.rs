use cbor4ii::core::Value as Cbor;

use crate::error::ObjectError;
use crate::ordered_map::OrderedMap;
use crate::types::FieldMap;
use crate::value::{Key, Number, Value};

// ─── Blob layout ────────────────────────────────────────────────────────────
//
//  A blob is one CBOR map. Container blobs carry
//
//    "flag"          → int   (access mode bits)
//    "storage"       → map   (backing store; int keys stay ints, order kept)
//    "iteratorClass" → text
//    <property>      → any   (one entry per extra property)
//
//  Model blobs are the plain field snapshot: field name → value.

// ─── Value → CBOR ───────────────────────────────────────────────────────────

impl From<&Key> for Cbor {
    fn from(key: &Key) -> Self {
        match key {
            Key::Int(i) => Cbor::Integer(*i as i128),
            Key::Str(s) => Cbor::Text(s.to_string()),
        }
    }
}

impl From<&Value> for Cbor {
    fn from(val: &Value) -> Self {
        match val {
            Value::Null => Cbor::Null,
            Value::Bool(b) => Cbor::Bool(*b),
            Value::Number(n) => match n {
                Number::I64(i) => Cbor::Integer(*i as i128),
                Number::U64(u) => Cbor::Integer(*u as i128),
                Number::F64(f) => Cbor::Float(*f),
            },
            Value::Str(s) => Cbor::Text(s.to_string()),
            Value::Map(map) => map.into(),
        }
    }
}

impl From<&OrderedMap> for Cbor {
    fn from(map: &OrderedMap) -> Self {
        Cbor::Map(map.iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Field snapshot as a text-keyed CBOR map.
pub fn fields_to_cbor(fields: &FieldMap) -> Cbor {
    Cbor::Map(
        fields
            .iter()
            .map(|(k, v)| (Cbor::Text(k.to_string()), v.into()))
            .collect(),
    )
}

// ─── Writer ─────────────────────────────────────────────────────────────────

/// Encode a CBOR value into a fresh buffer.
pub fn to_blob(value: &Cbor) -> Result<Vec<u8>, ObjectError> {
    cbor4ii::serde::to_vec(Vec::new(), value).map_err(|e| ObjectError::Cbor(format!("{e:?}")))
}

/// Encode a field snapshot.
pub fn fields_to_blob(fields: &FieldMap) -> Result<Vec<u8>, ObjectError> {
    to_blob(&fields_to_cbor(fields))
}
