use cbor4ii::core::Value as Cbor;
use smol_str::SmolStr;

use crate::error::ObjectError;
use crate::ordered_map::OrderedMap;
use crate::value::{Key, Number, Value};

// ─── CBOR → Value ───────────────────────────────────────────────────────────

fn number_from_cbor(i: i128) -> Number {
    if let Ok(val) = i64::try_from(i) {
        Number::I64(val)
    } else if let Ok(val) = u64::try_from(i) {
        Number::U64(val)
    } else {
        Number::F64(i as f64)
    }
}

/// Map keys: integers that fit `i64` stay integers, text goes through
/// [`Key::parse`], anything else is rejected.
pub fn key_from_cbor(key: Cbor) -> Result<Key, ObjectError> {
    match key {
        Cbor::Integer(i) => match i64::try_from(i) {
            Ok(val) => Ok(Key::Int(val)),
            Err(_) => Ok(Key::Str(SmolStr::from(i.to_string()))),
        },
        Cbor::Text(s) => Ok(Key::from(s)),
        other => Err(ObjectError::InvalidBlob(format!("unsupported map key {other:?}"))),
    }
}

impl TryFrom<Cbor> for Value {
    type Error = ObjectError;

    fn try_from(v: Cbor) -> Result<Self, Self::Error> {
        Ok(match v {
            Cbor::Null => Value::Null,
            Cbor::Bool(b) => Value::Bool(b),
            Cbor::Integer(i) => Value::Number(number_from_cbor(i)),
            Cbor::Float(f) => Value::Number(Number::F64(f)),
            Cbor::Text(s) => Value::Str(SmolStr::from(s)),
            Cbor::Array(arr) => Value::Map(OrderedMap::from_values(
                arr.into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            Cbor::Map(entries) => Value::Map(map_from_entries(entries)?),
            other => {
                return Err(ObjectError::InvalidBlob(format!("unsupported value {other:?}")));
            }
        })
    }
}

fn map_from_entries(entries: Vec<(Cbor, Cbor)>) -> Result<OrderedMap, ObjectError> {
    let mut map = OrderedMap::with_capacity(entries.len());
    for (k, v) in entries {
        map.insert(key_from_cbor(k)?, Value::try_from(v)?);
    }
    Ok(map)
}

// ─── Reader ─────────────────────────────────────────────────────────────────

/// Decode a blob whose top level is a map, keeping entry order.
pub fn from_blob(data: &[u8]) -> Result<OrderedMap, ObjectError> {
    let root: Cbor =
        cbor4ii::serde::from_slice(data).map_err(|e| ObjectError::Cbor(format!("{e:?}")))?;
    match root {
        Cbor::Map(entries) => map_from_entries(entries),
        other => Err(ObjectError::InvalidBlob(format!(
            "expected a map at the top level, got {other:?}"
        ))),
    }
}
