use serde::ser::{Serialize, Serializer};

use crate::collection::Collection;
use crate::error::ObjectError;
use crate::ordered_map::OrderedMap;
use crate::types::*;
use crate::value::{Key, Value};

// ─── ArrayObject ────────────────────────────────────────────────────────────

/// Array wrapper with dual array/property access.
///
/// Holds one backing [`OrderedMap`], an [`AccessMode`] that decides what
/// property-style access reaches, the iteration strategy used by
/// [`get_iterator`](ArrayObject::get_iterator), and the object's own
/// properties (used in [`AccessMode::StdPropList`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayObject {
    pub(crate) storage: OrderedMap,
    pub(crate) flag: AccessMode,
    pub(crate) iterator: IterationStrategy,
    pub(crate) properties: FieldMap,
}

impl ArrayObject {
    pub fn new(storage: OrderedMap) -> Self {
        Self {
            storage,
            ..Self::default()
        }
    }

    pub fn with_options(storage: OrderedMap, options: ArrayObjectOptions) -> Result<Self, ObjectError> {
        Ok(Self {
            storage,
            flag: options.flags,
            iterator: IterationStrategy::resolve(&options.iterator_class)?,
            properties: FieldMap::default(),
        })
    }

    /// Build from any value that can stand in for an array.
    pub fn try_from_value(input: impl Into<Value>) -> Result<Self, ObjectError> {
        Ok(Self::new(into_storage(input.into())?))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Flags and iterator strategy
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn get_flags(&self) -> AccessMode {
        self.flag
    }

    #[inline]
    pub fn set_flags(&mut self, flags: AccessMode) {
        self.flag = flags;
    }

    #[inline]
    pub fn get_iterator_class(&self) -> &'static str {
        self.iterator.class_name()
    }

    /// Select the iteration strategy by class name.
    pub fn set_iterator_class(&mut self, class: &str) -> Result<(), ObjectError> {
        self.iterator = IterationStrategy::resolve(class)?;
        tracing::debug!(iterator = self.iterator.class_name(), "iterator strategy changed");
        Ok(())
    }

    /// Walk `(key, value)` pairs with the configured strategy. Leaves the
    /// shared cursor alone.
    pub fn get_iterator(&self) -> ArrayIter<'_> {
        self.iterator.iter(&self.storage)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Backing store
    // ════════════════════════════════════════════════════════════════════════

    /// Append under the next free integer key.
    pub fn append(&mut self, value: impl Into<Value>) {
        self.storage.push(value);
    }

    /// Swap in a new backing store and return the previous one.
    ///
    /// Accepts a map value, an [`OrderedMap`] or another [`ArrayObject`] (its
    /// store is taken). Scalars fail with [`ObjectError::InvalidInput`] and
    /// leave the current store in place.
    pub fn exchange_array(&mut self, input: impl Into<Value>) -> Result<OrderedMap, ObjectError> {
        let storage = into_storage(input.into())?;
        tracing::debug!(old_len = self.storage.len(), new_len = storage.len(), "backing store exchanged");
        Ok(std::mem::replace(&mut self.storage, storage))
    }

    #[inline]
    pub fn get_array_copy(&self) -> OrderedMap {
        self.storage.clone()
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.storage.len()
    }

    /// JSON view of the backing store.
    pub fn to_json(&self) -> serde_json::Value {
        self.storage.clone().into()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Offset access
    // ════════════════════════════════════════════════════════════════════════

    /// Present with a non-null value.
    pub fn offset_exists(&self, key: impl Into<Key>) -> bool {
        self.storage
            .get(&key.into())
            .is_some_and(|v| !v.is_null())
    }

    pub fn offset_get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.storage.get(&key.into())
    }

    /// `None` as key appends.
    pub fn offset_set(&mut self, key: Option<Key>, value: impl Into<Value>) {
        match key {
            Some(key) => {
                self.storage.insert(key, value);
            }
            None => {
                self.storage.push(value);
            }
        }
    }

    /// Removes only entries that [`offset_exists`](Self::offset_exists)
    /// reports; a key holding `Null` stays.
    pub fn offset_unset(&mut self, key: impl Into<Key>) {
        let key = key.into();
        if self.offset_exists(&key) {
            self.storage.remove(&key);
        }
    }
}

fn into_storage(input: Value) -> Result<OrderedMap, ObjectError> {
    match input {
        Value::Map(map) => Ok(map),
        other => Err(ObjectError::InvalidInput(format!(
            "passed variable is not an array or object ({})",
            other.type_name()
        ))),
    }
}

impl Collection for ArrayObject {
    #[inline]
    fn storage(&self) -> &OrderedMap {
        &self.storage
    }

    #[inline]
    fn storage_mut(&mut self) -> &mut OrderedMap {
        &mut self.storage
    }

    #[inline]
    fn from_storage(storage: OrderedMap) -> Self {
        Self::new(storage)
    }
}

impl From<ArrayObject> for Value {
    fn from(obj: ArrayObject) -> Self {
        Value::Map(obj.storage)
    }
}

impl From<OrderedMap> for ArrayObject {
    fn from(storage: OrderedMap) -> Self {
        Self::new(storage)
    }
}

impl<'a> IntoIterator for &'a ArrayObject {
    type Item = (&'a Key, &'a Value);
    type IntoIter = ArrayIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.get_iterator()
    }
}

impl Serialize for ArrayObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.storage.serialize(serializer)
    }
}
