use crate::ordered_map::OrderedMap;
use crate::value::{Key, Value};

/// Collection operations over a single backing [`OrderedMap`].
///
/// Implementors only expose their store and a way to wrap a new one; every
/// operation is provided. Transforms (`filter`, `map`, `partition`) return new
/// containers of the implementing type and leave `self` untouched.
pub trait Collection: Sized {
    fn storage(&self) -> &OrderedMap;
    fn storage_mut(&mut self) -> &mut OrderedMap;
    /// Wrap a store in a fresh container of this type.
    fn from_storage(storage: OrderedMap) -> Self;

    // ════════════════════════════════════════════════════════════════════════
    // Mutation
    // ════════════════════════════════════════════════════════════════════════

    /// Append an element. Always succeeds.
    fn add(&mut self, element: impl Into<Value>) -> bool {
        self.storage_mut().push(element);
        true
    }

    fn clear(&mut self) {
        self.storage_mut().clear();
    }

    fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        self.storage_mut().insert(key, value);
    }

    /// Remove by key, returning the removed value. A key holding `Null` is
    /// left in place and yields `None`.
    fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        let key = key.into();
        if self.storage().get(&key).is_none_or(Value::is_null) {
            return None;
        }
        self.storage_mut().remove(&key)
    }

    /// Remove the first entry strictly equal to `element`.
    fn remove_element(&mut self, element: &Value) -> bool {
        match self.index_of(element, true) {
            Some(key) => self.storage_mut().remove(&key).is_some(),
            None => false,
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Queries
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    fn is_empty(&self) -> bool {
        self.storage().is_empty()
    }

    fn contains(&self, element: &Value, strict: bool) -> bool {
        self.storage().contains_value(element, strict)
    }

    fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.storage().contains_key(&key.into())
    }

    fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.storage().get(&key.into())
    }

    fn get_keys(&self) -> Vec<Key> {
        self.storage().keys().cloned().collect()
    }

    fn get_values(&self) -> Vec<Value> {
        self.storage().values().cloned().collect()
    }

    fn to_array(&self) -> OrderedMap {
        self.storage().clone()
    }

    /// Key of the first entry matching `element`; `None` when not found.
    fn index_of(&self, element: &Value, strict: bool) -> Option<Key> {
        self.storage().position_of(element, strict).cloned()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Shared cursor
    // ════════════════════════════════════════════════════════════════════════

    /// Rewind the cursor; returns the first value.
    fn first(&mut self) -> Option<&Value> {
        self.storage_mut().reset()
    }

    /// Move the cursor to the end; returns the last value.
    fn last(&mut self) -> Option<&Value> {
        self.storage_mut().end()
    }

    fn key(&self) -> Option<&Key> {
        self.storage().key()
    }

    fn current(&self) -> Option<&Value> {
        self.storage().current()
    }

    #[allow(clippy::should_implement_trait)]
    fn next(&mut self) -> Option<&Value> {
        self.storage_mut().advance()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Predicates and transforms
    // ════════════════════════════════════════════════════════════════════════

    /// True when any entry satisfies `p`. Stops at the first match.
    fn exists<P>(&self, mut p: P) -> bool
    where
        P: FnMut(&Key, &Value) -> bool,
    {
        self.storage().iter().any(|(k, v)| p(k, v))
    }

    /// True when every entry satisfies `p`. Stops at the first failure.
    fn for_all<P>(&self, mut p: P) -> bool
    where
        P: FnMut(&Key, &Value) -> bool,
    {
        self.storage().iter().all(|(k, v)| p(k, v))
    }

    /// Entries whose value satisfies `p`, keys and order kept.
    fn filter<P>(&self, mut p: P) -> Self
    where
        P: FnMut(&Value) -> bool,
    {
        Self::from_storage(
            self.storage()
                .iter()
                .filter(|(_, v)| p(*v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Same keys in the same order, values passed through `f`.
    fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Value) -> Value,
    {
        Self::from_storage(
            self.storage()
                .iter()
                .map(|(k, v)| (k.clone(), f(v)))
                .collect(),
        )
    }

    /// Split into `(matches, non_matches)`; every entry lands in exactly one.
    fn partition<P>(&self, mut p: P) -> (Self, Self)
    where
        P: FnMut(&Key, &Value) -> bool,
    {
        let mut matches = OrderedMap::new();
        let mut no_matches = OrderedMap::new();
        for (k, v) in self.storage().iter() {
            if p(k, v) {
                matches.insert(k.clone(), v.clone());
            } else {
                no_matches.insert(k.clone(), v.clone());
            }
        }
        (Self::from_storage(matches), Self::from_storage(no_matches))
    }

    /// See [`OrderedMap::slice`].
    fn slice(&self, offset: i64, length: Option<i64>, preserve_keys: bool) -> OrderedMap {
        self.storage().slice(offset, length, preserve_keys)
    }
}
