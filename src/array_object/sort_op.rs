use std::cmp::Ordering;

use super::object::ArrayObject;
use crate::value::{Key, Value};

// Thin delegates onto the backing store; see the OrderedMap sorts for the
// ordering rules.
impl ArrayObject {
    #[inline]
    pub fn sort_by_value(&mut self) {
        self.storage.sort_by_value();
    }

    #[inline]
    pub fn sort_by_key(&mut self) {
        self.storage.sort_by_key();
    }

    /// `natsort`, or `natcasesort` when `case_insensitive`.
    #[inline]
    pub fn natural_sort(&mut self, case_insensitive: bool) {
        self.storage.natural_sort(case_insensitive);
    }

    #[inline]
    pub fn sort_by_custom_value_comparator<F>(&mut self, cmp: Option<F>)
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.storage.sort_by_custom_value_comparator(cmp);
    }

    #[inline]
    pub fn sort_by_custom_key_comparator<F>(&mut self, cmp: Option<F>)
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        self.storage.sort_by_custom_key_comparator(cmp);
    }
}
