// ═══════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════
mod array_object_tests {
    use std::cmp::Ordering;

    use crate::array_object::ArrayObject;
    use crate::collection::Collection;
    use crate::error::ObjectError;
    use crate::ordered_map;
    use crate::ordered_map::OrderedMap;
    use crate::types::*;
    use crate::value::{Key, Value};

    fn make_abc() -> ArrayObject {
        ArrayObject::new(ordered_map! { "a" => 1, "b" => 2, "c" => 3 })
    }

    fn keys_of(obj: &ArrayObject) -> Vec<String> {
        obj.get_keys().iter().map(|k| k.to_string()).collect()
    }

    fn props_mode(storage: OrderedMap) -> ArrayObject {
        let options = ArrayObjectOptions {
            flags: AccessMode::ArrayAsProps,
            ..ArrayObjectOptions::default()
        };
        ArrayObject::with_options(storage, options).unwrap()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Construction and flags
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_defaults() {
        let obj = ArrayObject::default();
        assert_eq!(obj.count(), 0);
        assert_eq!(obj.get_flags(), AccessMode::StdPropList);
        assert_eq!(obj.get_iterator_class(), "ArrayIterator");
        assert!(obj.properties().is_empty());
    }

    #[test]
    fn test_with_options_rejects_unknown_iterator() {
        let options = ArrayObjectOptions {
            iterator_class: "Nope".into(),
            ..ArrayObjectOptions::default()
        };
        assert_eq!(
            ArrayObject::with_options(OrderedMap::new(), options),
            Err(ObjectError::InvalidIterator("Nope".into()))
        );
    }

    #[test]
    fn test_set_iterator_class_keeps_previous_on_error() {
        let mut obj = make_abc();
        obj.set_iterator_class("\\ReverseArrayIterator").unwrap();
        assert_eq!(obj.get_iterator_class(), "ReverseArrayIterator");
        assert!(obj.set_iterator_class("Missing").is_err());
        assert_eq!(obj.get_iterator_class(), "ReverseArrayIterator");
    }

    #[test]
    fn test_iterator_strategies() {
        let mut obj = make_abc();
        let forward: Vec<String> = obj.get_iterator().map(|(k, _)| k.to_string()).collect();
        assert_eq!(forward, vec!["a", "b", "c"]);

        obj.set_iterator_class("ReverseArrayIterator").unwrap();
        let reverse: Vec<i64> = (&obj).into_iter().filter_map(|(_, v)| v.as_i64()).collect();
        assert_eq!(reverse, vec![3, 2, 1]);

        // restartable, and the shared cursor is not moved
        assert_eq!(obj.get_iterator().count(), 3);
        assert_eq!(obj.key(), Some(&Key::from("a")));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Backing store
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_append_uses_next_integer_key() {
        let mut obj = ArrayObject::new(ordered_map! { 0 => "x", 1 => "y" });
        obj.append(10);
        assert_eq!(obj.offset_get(2), Some(&Value::from(10)));
        assert_eq!(obj.count(), 3);
    }

    #[test]
    fn test_exchange_array_returns_previous() {
        let mut obj = make_abc();
        let old = obj.exchange_array(ordered_map! { "z" => 26 }).unwrap();
        assert_eq!(old, ordered_map! { "a" => 1, "b" => 2, "c" => 3 });
        assert_eq!(obj.get_array_copy(), ordered_map! { "z" => 26 });
    }

    #[test]
    fn test_exchange_array_takes_other_object() {
        let mut obj = make_abc();
        let other = ArrayObject::new(ordered_map! { 0 => "only" });
        obj.exchange_array(other).unwrap();
        assert_eq!(keys_of(&obj), vec!["0"]);
    }

    #[test]
    fn test_exchange_array_rejects_scalars() {
        let mut obj = make_abc();
        assert!(matches!(obj.exchange_array(42), Err(ObjectError::InvalidInput(_))));
        assert!(matches!(obj.exchange_array("text"), Err(ObjectError::InvalidInput(_))));
        assert_eq!(obj.count(), 3);
    }

    #[test]
    fn test_get_array_copy_is_detached() {
        let obj = make_abc();
        let mut copy = obj.get_array_copy();
        copy.insert("d", 4);
        assert_eq!(obj.count(), 3);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Offset access
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_offset_exists_ignores_null() {
        let mut obj = make_abc();
        obj.offset_set(Some(Key::from("n")), Value::Null);
        assert!(obj.offset_exists("a"));
        assert!(!obj.offset_exists("n"));
        assert!(obj.contains_key("n"));
        assert!(!obj.offset_exists("missing"));
    }

    #[test]
    fn test_offset_set_none_appends() {
        let mut obj = ArrayObject::new(ordered_map! { 5 => "five" });
        obj.offset_set(None, "six");
        assert_eq!(obj.offset_get(6), Some(&Value::from("six")));
    }

    #[test]
    fn test_offset_unset() {
        let mut obj = make_abc();
        obj.offset_unset("b");
        assert_eq!(keys_of(&obj), vec!["a", "c"]);
        obj.offset_unset("missing");
        assert_eq!(obj.count(), 2);
    }

    #[test]
    fn test_numeric_string_offsets_are_integers() {
        let mut obj = ArrayObject::default();
        obj.offset_set(Some(Key::from("7")), true);
        assert_eq!(obj.offset_get(7), Some(&Value::Bool(true)));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Property access
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_std_mode_properties_are_separate() {
        let mut obj = make_abc();
        obj.set_property("label", "hello").unwrap();
        assert_eq!(obj.get_property("label").unwrap(), Some(&Value::from("hello")));
        assert_eq!(obj.get_property("a").unwrap(), None);
        assert!(!obj.contains_key("label"));
        assert!(obj.isset_property("label").unwrap());

        obj.unset_property("label").unwrap();
        assert!(!obj.isset_property("label").unwrap());
    }

    #[test]
    fn test_std_mode_rejects_protected_names() {
        let mut obj = make_abc();
        for name in PROTECTED_PROPERTIES {
            assert_eq!(
                obj.set_property(name, 1),
                Err(ObjectError::ProtectedField(name.into()))
            );
            assert!(obj.get_property(name).is_err());
            assert!(obj.isset_property(name).is_err());
            assert!(obj.unset_property(name).is_err());
        }
    }

    #[test]
    fn test_props_mode_delegates_to_storage() {
        let mut obj = props_mode(ordered_map! { "a" => 1 });
        obj.set_property("b", 2).unwrap();
        assert_eq!(obj.offset_get("b"), Some(&Value::from(2)));
        assert_eq!(obj.get_property("a").unwrap(), Some(&Value::from(1)));
        assert!(obj.isset_property("b").unwrap());

        // reserved names are plain keys here
        obj.set_property("storage", "kept").unwrap();
        assert_eq!(obj.offset_get("storage"), Some(&Value::from("kept")));

        obj.unset_property("a").unwrap();
        assert!(!obj.contains_key("a"));
        assert!(obj.properties().is_empty());
    }

    #[test]
    fn test_switching_flags_changes_target() {
        let mut obj = make_abc();
        obj.set_property("a", "prop").unwrap();
        obj.set_flags(AccessMode::ArrayAsProps);
        assert_eq!(obj.get_property("a").unwrap(), Some(&Value::from(1)));
        obj.set_flags(AccessMode::StdPropList);
        assert_eq!(obj.get_property("a").unwrap(), Some(&Value::from("prop")));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Sorting
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_sort_by_value_keeps_keys() {
        let mut obj = ArrayObject::new(ordered_map! { "b" => 2, "a" => 1, "c" => 0 });
        obj.sort_by_value();
        assert_eq!(keys_of(&obj), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_by_key() {
        let mut obj = ArrayObject::new(ordered_map! { "b" => 1, "c" => 2, "a" => 3 });
        obj.sort_by_key();
        assert_eq!(keys_of(&obj), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_natural_sorts() {
        let mut obj = ArrayObject::new(ordered_map! {
            0 => "img12.png", 1 => "img10.png", 2 => "IMG2.png", 3 => "img1.png"
        });
        obj.natural_sort(false);
        assert_eq!(keys_of(&obj), vec!["2", "3", "1", "0"]);
        obj.natural_sort(true);
        assert_eq!(keys_of(&obj), vec!["3", "2", "1", "0"]);
    }

    #[test]
    fn test_custom_comparators() {
        let mut obj = make_abc();
        obj.sort_by_custom_value_comparator(Some(|a: &Value, b: &Value| b.compare(a)));
        assert_eq!(keys_of(&obj), vec!["c", "b", "a"]);

        obj.sort_by_custom_key_comparator(Some(|a: &Key, b: &Key| a.to_string().cmp(&b.to_string())));
        assert_eq!(keys_of(&obj), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_comparator_is_a_no_op() {
        let mut obj = ArrayObject::new(ordered_map! { "b" => 2, "a" => 1 });
        obj.sort_by_custom_value_comparator(None::<fn(&Value, &Value) -> Ordering>);
        obj.sort_by_custom_key_comparator(None::<fn(&Key, &Key) -> Ordering>);
        assert_eq!(keys_of(&obj), vec!["b", "a"]);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Collection operations
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_collection_add_and_remove_element() {
        let mut obj = ArrayObject::new(ordered_map! { 0 => 1, 1 => 2, 2 => 3 });
        assert!(obj.remove_element(&Value::from(2)));
        assert_eq!(obj.get_array_copy(), ordered_map! { 0 => 1, 2 => 3 });
        assert!(!obj.remove_element(&Value::from(2)));

        assert!(obj.add(4));
        obj.last();
        assert_eq!(obj.key(), Some(&Key::Int(3)));
    }

    #[test]
    fn test_collection_transforms_return_array_objects() {
        let obj = make_abc();
        let odd = obj.filter(|v| v.as_i64().is_some_and(|n| n % 2 == 1));
        assert_eq!(keys_of(&odd), vec!["a", "c"]);

        let doubled = obj.map(|v| Value::from(v.as_i64().unwrap_or(0) * 2));
        assert_eq!(doubled.get("b"), Some(&Value::from(4)));

        let (big, small) = obj.partition(|_, v| v.as_i64().is_some_and(|n| n > 1));
        assert_eq!(big.count() + small.count(), obj.count());
        assert_eq!(keys_of(&small), vec!["a"]);
    }

    #[test]
    fn test_collection_predicates_short_circuit() {
        let obj = make_abc();
        let mut seen = 0;
        assert!(obj.exists(|_, v| {
            seen += 1;
            v == &Value::from(2)
        }));
        assert_eq!(seen, 2);

        seen = 0;
        assert!(!obj.for_all(|k, _| {
            seen += 1;
            k == &Key::from("a")
        }));
        assert_eq!(seen, 2);
        assert!(obj.for_all(|k, _| !k.is_int()));
    }

    #[test]
    fn test_collection_search_strict_and_loose() {
        let obj = ArrayObject::new(ordered_map! { "x" => "1", "y" => 1 });
        assert_eq!(obj.index_of(&Value::from(1), false), Some(Key::from("x")));
        assert_eq!(obj.index_of(&Value::from(1), true), Some(Key::from("y")));
        assert_eq!(obj.index_of(&Value::from(2), false), None);
        assert!(obj.contains(&Value::from(1.0), false));
        assert!(!obj.contains(&Value::from(1.0), true));
    }

    #[test]
    fn test_collection_remove_skips_null_entries() {
        let mut obj = make_abc();
        obj.set("n", Value::Null);
        assert_eq!(obj.remove("n"), None);
        assert!(obj.contains_key("n"));
        assert_eq!(obj.remove("b"), Some(Value::from(2)));
        assert_eq!(obj.remove("b"), None);
        assert_eq!(keys_of(&obj), vec!["a", "c", "n"]);
    }

    #[test]
    fn test_collection_snapshots_and_clear() {
        let mut obj = make_abc();
        assert_eq!(obj.get_values(), vec![Value::from(1), Value::from(2), Value::from(3)]);
        assert_eq!(obj.to_array(), obj.get_array_copy());
        obj.clear();
        assert!(obj.is_empty());
        obj.append("again");
        assert_eq!(obj.get_keys(), vec![Key::Int(0)]);
    }

    #[test]
    fn test_collection_cursor() {
        let mut obj = make_abc();
        assert_eq!(obj.current(), Some(&Value::from(1)));
        assert_eq!(obj.next(), Some(&Value::from(2)));
        assert_eq!(obj.last(), Some(&Value::from(3)));
        assert_eq!(obj.next(), None);
        assert_eq!(obj.first(), Some(&Value::from(1)));
    }

    #[test]
    fn test_collection_slice() {
        let obj = make_abc();
        assert_eq!(obj.slice(1, None, true), ordered_map! { "b" => 2, "c" => 3 });
        assert_eq!(obj.slice(-1, None, true), ordered_map! { "c" => 3 });
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Serialization
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_serialize_roundtrip() {
        let mut obj = ArrayObject::new(ordered_map! {
            3 => "x", "name" => "Alice", "nested" => ordered_map! { 0 => 1.5, "k" => Value::Null }
        });
        obj.set_iterator_class("ReverseArrayIterator").unwrap();
        obj.set_property("extra", 99).unwrap();
        obj.set_flags(AccessMode::ArrayAsProps);

        let blob = obj.serialize().unwrap();
        let restored = ArrayObject::from_blob(&blob).unwrap();
        assert_eq!(restored, obj);
        assert_eq!(restored.get_flags(), AccessMode::ArrayAsProps);
        assert_eq!(restored.get_iterator_class(), "ReverseArrayIterator");
        // extra entries land on the object, not in the store
        assert_eq!(restored.properties().get("extra"), Some(&Value::from(99)));
        assert!(!restored.contains_key("extra"));
    }

    #[test]
    fn test_unserialize_replaces_state() {
        let source = make_abc();
        let mut target = ArrayObject::new(ordered_map! { "old" => true });
        target.set_property("stale", 1).unwrap();
        target.unserialize(&source.serialize().unwrap()).unwrap();
        assert_eq!(target, source);
    }

    #[test]
    fn test_unserialize_bad_blob_leaves_object() {
        let mut obj = make_abc();
        assert!(obj.unserialize(&[0xff, 0x01]).is_err());
        assert_eq!(obj, make_abc());
    }

    #[test]
    fn test_unserialize_rejects_bad_facets() {
        let blob = crate::serialization::to_blob(&cbor4ii::core::Value::Map(vec![(
            cbor4ii::core::Value::Text("flag".into()),
            cbor4ii::core::Value::Integer(9),
        )]))
        .unwrap();
        assert!(matches!(ArrayObject::from_blob(&blob), Err(ObjectError::InvalidInput(_))));

        let blob = crate::serialization::to_blob(&cbor4ii::core::Value::Map(vec![(
            cbor4ii::core::Value::Text("storage".into()),
            cbor4ii::core::Value::Text("scalar".into()),
        )]))
        .unwrap();
        assert!(matches!(ArrayObject::from_blob(&blob), Err(ObjectError::InvalidInput(_))));
    }

    #[test]
    fn test_to_json() {
        let obj = ArrayObject::new(ordered_map! { 0 => "a", 1 => "b" });
        assert_eq!(obj.to_json(), serde_json::json!(["a", "b"]));
        let obj = make_abc();
        assert_eq!(serde_json::to_string(&obj).unwrap(), r#"{"a":1,"b":2,"c":3}"#);
    }
}
