//! Property-based tests for OrderedMap.
//!
//! These tests check OrderedMap against `std::collections::BTreeMap` as a
//! model and verify the ordering invariant after arbitrary operation
//! sequences using proptest.

use bst_map::OrderedMap;
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::ops::Bound;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

#[derive(Debug, Clone)]
enum Operation {
    Insert(i16, i32),
    Remove(i16),
}

/// Small key space so that overwrites and removals of present keys are common.
fn arbitrary_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (any::<i16>().prop_map(|key| key % 64), any::<i32>())
            .prop_map(|(key, value)| Operation::Insert(key, value)),
        2 => any::<i16>().prop_map(|key| Operation::Remove(key % 64)),
    ]
}

fn apply(
    map: &mut OrderedMap<i16, i32>,
    model: &mut BTreeMap<i16, i32>,
    operation: &Operation,
) -> Result<(), TestCaseError> {
    match *operation {
        Operation::Insert(key, value) => {
            prop_assert_eq!(map.insert(key, value), model.insert(key, value));
        }
        Operation::Remove(key) => {
            prop_assert_eq!(map.remove(&key), model.remove(&key).is_some());
        }
    }
    Ok(())
}

// =============================================================================
// Get-Insert Laws
// =============================================================================

proptest! {
    /// Law: get after insert returns the inserted value.
    #[test]
    fn prop_get_insert_law(
        entries in prop::collection::vec((any::<i32>(), any::<i32>()), 0..50),
        key: i32,
        value: i32
    ) {
        let mut map: OrderedMap<i32, i32> = entries.into_iter().collect();
        map.insert(key, value);
        prop_assert_eq!(map.get(&key), Some(&value));
        prop_assert_eq!(map.get_or_default(&key), (value, true));
    }

    /// Law: inserting twice keeps the second value and a single entry.
    #[test]
    fn prop_overwrite_law(
        entries in prop::collection::vec((any::<i32>(), any::<i32>()), 0..50),
        key: i32,
        first: i32,
        second: i32
    ) {
        let mut map: OrderedMap<i32, i32> = entries.into_iter().collect();
        map.insert(key, first);
        let length = map.len();
        prop_assert_eq!(map.insert(key, second), Some(first));
        prop_assert_eq!(map.get(&key), Some(&second));
        prop_assert_eq!(map.len(), length);
    }
}

// =============================================================================
// Remove Laws
// =============================================================================

proptest! {
    /// Law: a removed key is gone and every other key keeps its value.
    #[test]
    fn prop_remove_completeness_law(
        entries in prop::collection::vec((any::<i8>(), any::<i32>()), 1..80),
        index in any::<prop::sample::Index>()
    ) {
        let model: BTreeMap<i8, i32> = entries.iter().copied().collect();
        let mut map: OrderedMap<i8, i32> = entries.into_iter().collect();
        let keys: Vec<i8> = model.keys().copied().collect();
        let removed = keys[index.index(keys.len())];

        prop_assert!(map.remove(&removed));
        prop_assert_eq!(map.get_or_default(&removed), (0, false));
        for (key, value) in model.iter().filter(|(key, _)| **key != removed) {
            prop_assert_eq!(map.get(key), Some(value));
        }
    }

    /// Law: removing every key in any order empties the map, staying sane throughout.
    #[test]
    fn prop_remove_all_law(
        (insertion_order, removal_order) in prop::collection::btree_set(any::<i32>(), 0..60)
            .prop_map(|keys| keys.into_iter().collect::<Vec<i32>>())
            .prop_flat_map(|keys| (Just(keys.clone()).prop_shuffle(), Just(keys).prop_shuffle()))
    ) {
        let mut map: OrderedMap<i32, ()> =
            insertion_order.iter().map(|&key| (key, ())).collect();

        for key in &removal_order {
            prop_assert!(map.remove(key));
            prop_assert!(map.check_sanity());
        }
        prop_assert!(map.is_empty());
        prop_assert_eq!(map.depth(), 0);
    }
}

// =============================================================================
// Ordering Invariant
// =============================================================================

proptest! {
    /// Invariant: any sequence of inserts and removes leaves a valid tree
    /// holding exactly the entries of the model.
    #[test]
    fn prop_operations_match_model(
        operations in prop::collection::vec(arbitrary_operation(), 0..200)
    ) {
        let mut map = OrderedMap::new();
        let mut model = BTreeMap::new();
        for operation in &operations {
            apply(&mut map, &mut model, operation)?;
            prop_assert_eq!(map.validate(), Ok(()));
        }

        prop_assert_eq!(map.len(), model.len());
        let entries: Vec<(i16, i32)> = map.iter().map(|(&key, &value)| (key, value)).collect();
        let expected: Vec<(i16, i32)> = model.into_iter().collect();
        prop_assert_eq!(entries, expected);
    }
}

// =============================================================================
// Lower Nearest Laws
// =============================================================================

proptest! {
    /// Law: lower_nearest returns the value of the greatest key <= query.
    #[test]
    fn prop_lower_nearest_matches_model(
        entries in prop::collection::vec((any::<i32>(), any::<i32>()), 0..80),
        query: i32
    ) {
        let model: BTreeMap<i32, i32> = entries.iter().copied().collect();
        let map: OrderedMap<i32, i32> = entries.into_iter().collect();

        let expected = model.range(..=query).next_back();
        prop_assert_eq!(map.lower_nearest_key_value(&query), expected);
        prop_assert_eq!(
            map.lower_nearest_or_default(&query),
            expected.map_or(0, |(_, &value)| value)
        );
    }

    /// Law: lower_nearest agrees with lexicographic order on strings.
    #[test]
    fn prop_lower_nearest_strings(
        keys in prop::collection::vec("[a-z]{0,4}", 0..30),
        query in "[a-z]{0,5}"
    ) {
        let model: BTreeMap<String, String> =
            keys.iter().map(|key| (key.clone(), key.clone())).collect();
        let map: OrderedMap<String, String> =
            keys.into_iter().map(|key| (key.clone(), key)).collect();

        let expected = model
            .range::<str, _>((Bound::Unbounded, Bound::Included(query.as_str())))
            .next_back()
            .map(|(_, value)| value);
        prop_assert_eq!(map.lower_nearest(query.as_str()), expected);
    }
}
