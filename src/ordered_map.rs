use indexmap::IndexMap;
use std::cmp::Ordering;

use crate::compare::natural_cmp;
use crate::value::{Key, Value};

// ─── OrderedMap ─────────────────────────────────────────────────────────────

/// Ordered key → value store with unique keys.
///
/// Iteration follows insertion order until one of the `sort_*` operations
/// reorders the entries in place. Besides the entries the map tracks:
/// - the next free integer key used by [`OrderedMap::push`]
///   (largest integer key + 1, never lowered by removals);
/// - an internal cursor shared by [`reset`](OrderedMap::reset),
///   [`end`](OrderedMap::end), [`current`](OrderedMap::current),
///   [`key`](OrderedMap::key) and [`advance`](OrderedMap::advance).
///
/// Neither takes part in equality.
#[derive(Debug, Clone, Default)]
pub struct OrderedMap {
    entries: IndexMap<Key, Value>,
    next_index: i64,
    cursor: usize,
}

impl OrderedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            next_index: 0,
            cursor: 0,
        }
    }

    /// Build a list: values keyed `0..n`.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut map = Self::new();
        for v in values {
            map.push(v);
        }
        map
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The key the next [`push`](OrderedMap::push) will use.
    #[inline]
    pub fn next_index(&self) -> i64 {
        self.next_index
    }

    // ════════════════════════════════════════════════════════════════════════
    // Key access
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    #[inline]
    pub fn get_index(&self, index: usize) -> Option<(&Key, &Value)> {
        self.entries.get_index(index)
    }

    #[inline]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        if let Key::Int(i) = key {
            if i >= self.next_index {
                self.next_index = i.saturating_add(1);
            }
        }
        self.entries.insert(key, value.into())
    }

    /// Append under the next free integer key and return that key.
    pub fn push(&mut self, value: impl Into<Value>) -> Key {
        let key = Key::Int(self.next_index);
        self.insert(key.clone(), value);
        key
    }

    /// Remove an entry, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        let (index, _, value) = self.entries.shift_remove_full(key)?;
        if index < self.cursor {
            self.cursor -= 1;
        }
        Some(value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_index = 0;
        self.cursor = 0;
    }

    /// First key whose value matches `needle`.
    pub fn position_of(&self, needle: &Value, strict: bool) -> Option<&Key> {
        self.entries
            .iter()
            .find(|(_, v)| v.matches(needle, strict))
            .map(|(k, _)| k)
    }

    #[inline]
    pub fn contains_value(&self, needle: &Value, strict: bool) -> bool {
        self.position_of(needle, strict).is_some()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Iteration
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    #[inline]
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.entries.keys()
    }

    #[inline]
    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.entries.values()
    }

    /// True when the keys are exactly `0..len` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(i, k)| k.as_int() == Some(i as i64))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Internal cursor
    // ════════════════════════════════════════════════════════════════════════

    /// Rewind the cursor and return the first value.
    pub fn reset(&mut self) -> Option<&Value> {
        self.cursor = 0;
        self.current()
    }

    /// Move the cursor to the last entry and return its value.
    pub fn end(&mut self) -> Option<&Value> {
        self.cursor = self.entries.len().saturating_sub(1);
        self.current()
    }

    #[inline]
    pub fn current(&self) -> Option<&Value> {
        self.entries.get_index(self.cursor).map(|(_, v)| v)
    }

    #[inline]
    pub fn key(&self) -> Option<&Key> {
        self.entries.get_index(self.cursor).map(|(k, _)| k)
    }

    /// Step the cursor forward; `None` once it runs past the last entry.
    pub fn advance(&mut self) -> Option<&Value> {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
        }
        self.current()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Slicing
    // ════════════════════════════════════════════════════════════════════════

    /// Extract a run of entries.
    ///
    /// A negative `offset` counts from the end; `None` length runs to the end;
    /// a negative length stops that many entries before the end. Bounds clamp
    /// instead of failing. Without `preserve_keys` integer keys are renumbered
    /// from 0 while string keys are always kept.
    pub fn slice(&self, offset: i64, length: Option<i64>, preserve_keys: bool) -> OrderedMap {
        let num = self.entries.len() as i64;
        if offset > num {
            return OrderedMap::new();
        }
        let start = if offset < 0 { (num + offset).max(0) } else { offset };
        let len = match length {
            None => num - start,
            Some(l) if l < 0 => num - start + l,
            Some(l) => l.min(num - start),
        };
        if len <= 0 {
            return OrderedMap::new();
        }

        let mut out = OrderedMap::with_capacity(len as usize);
        for (k, v) in self.entries.iter().skip(start as usize).take(len as usize) {
            match k {
                Key::Int(_) if !preserve_keys => {
                    out.push(v.clone());
                }
                _ => {
                    out.insert(k.clone(), v.clone());
                }
            }
        }
        out
    }

    // ════════════════════════════════════════════════════════════════════════
    // Sorting (stable, in place, keys retained, cursor rewound)
    // ════════════════════════════════════════════════════════════════════════

    /// Ascending by value, standard ordering.
    pub fn sort_by_value(&mut self) {
        self.sort_entries(|_, a, _, b| a.compare(b));
    }

    /// Ascending by key, standard ordering.
    pub fn sort_by_key(&mut self) {
        self.sort_entries(|a, _, b, _| a.to_value().compare(&b.to_value()));
    }

    /// Ascending by value in natural order.
    pub fn natural_sort(&mut self, case_insensitive: bool) {
        self.sort_entries(|_, a, _, b| natural_cmp(&a.to_text(), &b.to_text(), case_insensitive));
    }

    /// Sort by value with a caller comparator. `None` leaves the map as is.
    pub fn sort_by_custom_value_comparator<F>(&mut self, cmp: Option<F>)
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let Some(mut cmp) = cmp else {
            tracing::trace!("value comparator missing, sort skipped");
            return;
        };
        self.sort_entries(|_, a, _, b| cmp(a, b));
    }

    /// Sort by key with a caller comparator. `None` leaves the map as is.
    pub fn sort_by_custom_key_comparator<F>(&mut self, cmp: Option<F>)
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        let Some(mut cmp) = cmp else {
            tracing::trace!("key comparator missing, sort skipped");
            return;
        };
        self.sort_entries(|a, _, b, _| cmp(a, b));
    }

    /// Reorder entries with `cmp`, which need not be a total order (loose
    /// value ordering is not transitive across types, and caller comparators
    /// may be arbitrary). Equal entries keep their relative order.
    fn sort_entries<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&Key, &Value, &Key, &Value) -> Ordering,
    {
        let entries: Vec<(Key, Value)> = std::mem::take(&mut self.entries).into_iter().collect();
        let mut order: Vec<usize> = (0..entries.len()).collect();
        merge_sort(&mut order, |i, j| {
            let (ka, va) = &entries[i];
            let (kb, vb) = &entries[j];
            cmp(ka, va, kb, vb)
        });

        let mut slots: Vec<Option<(Key, Value)>> = entries.into_iter().map(Some).collect();
        self.entries = order.into_iter().filter_map(|i| slots[i].take()).collect();
        self.cursor = 0;
    }
}

/// Bottom-up stable merge sort over entry positions. Only asks whether the
/// right element is strictly less, so an inconsistent `cmp` yields some
/// permutation instead of a panic.
fn merge_sort<F>(items: &mut Vec<usize>, mut cmp: F)
where
    F: FnMut(usize, usize) -> Ordering,
{
    let len = items.len();
    let mut buf = Vec::with_capacity(len);
    let mut width = 1;
    while width < len {
        buf.clear();
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j) = (start, mid);
            while i < mid && j < end {
                if cmp(items[j], items[i]) == Ordering::Less {
                    buf.push(items[j]);
                    j += 1;
                } else {
                    buf.push(items[i]);
                    i += 1;
                }
            }
            buf.extend_from_slice(&items[i..mid]);
            buf.extend_from_slice(&items[j..end]);
            start = end;
        }
        std::mem::swap(items, &mut buf);
        width *= 2;
    }
}

impl PartialEq for OrderedMap {
    /// Same entries in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|(a, b)| a == b)
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for OrderedMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for OrderedMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for OrderedMap {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedMap {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Build an [`OrderedMap`] from `key => value` pairs, in order.
#[macro_export]
macro_rules! ordered_map {
    () => {
        $crate::OrderedMap::new()
    };
    ($($key:expr => $val:expr),+ $(,)?) => {{
        let mut map = $crate::OrderedMap::new();
        $(
            map.insert($key, $val);
        )+
        map
    }};
}
