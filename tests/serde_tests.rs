#![cfg(feature = "serde")]

//! Integration tests for serde support of OrderedMap.

use bst_map::OrderedMap;
use rstest::rstest;

#[rstest]
fn test_json_roundtrip() {
    let map: OrderedMap<String, i32> = [("b", 2), ("a", 1), ("c", 3)]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();

    let json = serde_json::to_string(&map).unwrap();
    let restored: OrderedMap<String, i32> = serde_json::from_str(&json).unwrap();

    assert_eq!(map, restored);
    assert!(restored.check_sanity());
}

#[rstest]
fn test_serializes_in_key_order() {
    let map: OrderedMap<String, i32> = [("zzz", 26), ("abc", 1), ("mmm", 13)]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();

    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"abc":1,"mmm":13,"zzz":26}"#);
}

#[rstest]
fn test_empty_map_roundtrip() {
    let map: OrderedMap<String, String> = OrderedMap::new();
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, "{}");

    let restored: OrderedMap<String, String> = serde_json::from_str(&json).unwrap();
    assert!(restored.is_empty());
}

#[rstest]
fn test_deserialize_duplicate_keys_last_wins() {
    let restored: OrderedMap<String, i32> =
        serde_json::from_str(r#"{"key":1,"other":2,"key":3}"#).unwrap();

    assert_eq!(restored.len(), 2);
    assert_eq!(restored.get("key"), Some(&3));
}

#[rstest]
fn test_deserialize_rejects_non_map() {
    let result: Result<OrderedMap<String, i32>, _> = serde_json::from_str("[1, 2, 3]");
    assert!(result.is_err());
}
