use indexmap::IndexMap;
use rustc_hash::FxHasher;
use smol_str::SmolStr;
use std::hash::BuildHasherDefault;

use crate::error::ObjectError;
use crate::ordered_map::OrderedMap;
use crate::value::{Key, Value};

pub type FastMap<K, V> = std::collections::HashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Named fields in declaration order.
pub type FieldMap = IndexMap<SmolStr, Value>;

// ─── Access Flags ───────────────────────────────────────────────────────────

/// Properties keep their normal behavior.
pub const STD_PROP_LIST: i64 = 1;
/// Entries can be read and written as properties.
pub const ARRAY_AS_PROPS: i64 = 2;

/// Internal field names that standard-mode property access must not touch.
pub const PROTECTED_PROPERTIES: [&str; 4] = ["storage", "flag", "iteratorClass", "protectedProperties"];

#[inline]
pub fn is_protected(name: &str) -> bool {
    PROTECTED_PROPERTIES.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    #[default]
    StdPropList,
    ArrayAsProps,
}

impl AccessMode {
    pub fn bits(self) -> i64 {
        match self {
            AccessMode::StdPropList => STD_PROP_LIST,
            AccessMode::ArrayAsProps => ARRAY_AS_PROPS,
        }
    }
}

impl TryFrom<i64> for AccessMode {
    type Error = ObjectError;

    fn try_from(bits: i64) -> Result<Self, Self::Error> {
        match bits {
            STD_PROP_LIST => Ok(AccessMode::StdPropList),
            ARRAY_AS_PROPS => Ok(AccessMode::ArrayAsProps),
            other => Err(ObjectError::InvalidInput(format!("unknown access flag {other}"))),
        }
    }
}

// ─── Iteration Strategies ───────────────────────────────────────────────────

pub const DEFAULT_ITERATOR_CLASS: &str = "ArrayIterator";
pub const REVERSE_ITERATOR_CLASS: &str = "ReverseArrayIterator";

/// Traversal policy selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IterationStrategy {
    /// Current order, first to last.
    #[default]
    Forward,
    /// Current order, last to first.
    Reverse,
}

impl IterationStrategy {
    /// Resolve a strategy from its class name. A leading `\` is ignored.
    pub fn resolve(name: &str) -> Result<Self, ObjectError> {
        match name.strip_prefix('\\').unwrap_or(name) {
            DEFAULT_ITERATOR_CLASS => Ok(IterationStrategy::Forward),
            REVERSE_ITERATOR_CLASS => Ok(IterationStrategy::Reverse),
            _ => Err(ObjectError::InvalidIterator(SmolStr::new(name))),
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            IterationStrategy::Forward => DEFAULT_ITERATOR_CLASS,
            IterationStrategy::Reverse => REVERSE_ITERATOR_CLASS,
        }
    }

    pub fn iter(self, map: &OrderedMap) -> ArrayIter<'_> {
        ArrayIter {
            map,
            front: 0,
            back: map.len(),
            strategy: self,
        }
    }
}

// ─── Options ────────────────────────────────────────────────────────────────

/// Construction options for [`ArrayObject`](crate::ArrayObject).
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayObjectOptions {
    pub flags: AccessMode,
    /// Resolved through [`IterationStrategy::resolve`].
    pub iterator_class: SmolStr,
}

impl Default for ArrayObjectOptions {
    fn default() -> Self {
        Self {
            flags: AccessMode::StdPropList,
            iterator_class: SmolStr::new(DEFAULT_ITERATOR_CLASS),
        }
    }
}

// ─── Iterator ───────────────────────────────────────────────────────────────

/// Borrowing iterator over `(key, value)` pairs. Does not touch the map's
/// cursor, so independent walks never disturb each other.
pub struct ArrayIter<'a> {
    map: &'a OrderedMap,
    front: usize,
    back: usize,
    strategy: IterationStrategy,
}

impl<'a> Iterator for ArrayIter<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        match self.strategy {
            IterationStrategy::Forward => {
                let entry = self.map.get_index(self.front)?;
                self.front += 1;
                Some(entry)
            }
            IterationStrategy::Reverse => {
                self.back -= 1;
                self.map.get_index(self.back)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for ArrayIter<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordered_map;

    #[test]
    fn test_resolve_iterator_class() {
        assert_eq!(IterationStrategy::resolve("ArrayIterator"), Ok(IterationStrategy::Forward));
        assert_eq!(IterationStrategy::resolve("\\ArrayIterator"), Ok(IterationStrategy::Forward));
        assert_eq!(
            IterationStrategy::resolve("ReverseArrayIterator"),
            Ok(IterationStrategy::Reverse)
        );
        assert_eq!(
            IterationStrategy::resolve("NoSuchIterator"),
            Err(ObjectError::InvalidIterator("NoSuchIterator".into()))
        );
    }

    #[test]
    fn test_access_mode_bits() {
        assert_eq!(AccessMode::try_from(1i64), Ok(AccessMode::StdPropList));
        assert_eq!(AccessMode::try_from(2i64), Ok(AccessMode::ArrayAsProps));
        assert!(AccessMode::try_from(3i64).is_err());
        assert_eq!(AccessMode::ArrayAsProps.bits(), ARRAY_AS_PROPS);
    }

    #[test]
    fn test_iter_directions() {
        let map = ordered_map! { "a" => 1, "b" => 2, "c" => 3 };
        let forward: Vec<_> = IterationStrategy::Forward.iter(&map).map(|(k, _)| k.to_string()).collect();
        assert_eq!(forward, vec!["a", "b", "c"]);
        let reverse: Vec<_> = IterationStrategy::Reverse.iter(&map).map(|(k, _)| k.to_string()).collect();
        assert_eq!(reverse, vec!["c", "b", "a"]);
        assert_eq!(IterationStrategy::Reverse.iter(&map).len(), 3);
    }
}
