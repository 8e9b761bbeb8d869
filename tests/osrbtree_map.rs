use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::hash::{BuildHasher, RandomState};

use osrb_tree::osrbtree_map;
use osrb_tree::{AllocError, OSRBTreeMap, Rank};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Keys drawn from a range smaller than `TEST_SIZE` so that operations collide.
fn key_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn entries_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)
}

/// Builds the model with "first insert wins", matching `OSRBTreeMap::insert`.
fn model_of(entries: &[(i64, i64)]) -> BTreeMap<i64, i64> {
    let mut model = BTreeMap::new();
    for &(k, v) in entries {
        model.entry(k).or_insert(v);
    }
    model
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Replace(i64, i64),
    Erase(i64),
    Remove(i64),
    Find(i64),
    Get(i64),
    ContainsKey(i64),
    RankOf(i64),
    GetByRank(usize),
    FirstKeyValue,
    LastKeyValue,
    PopFirst,
    PopLast,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Replace(k, v)),
        2 => key_strategy().prop_map(MapOp::Erase),
        2 => key_strategy().prop_map(MapOp::Remove),
        1 => key_strategy().prop_map(MapOp::Find),
        1 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => key_strategy().prop_map(MapOp::RankOf),
        1 => (0usize..4_000).prop_map(MapOp::GetByRank),
        1 => Just(MapOp::FirstKeyValue),
        1 => Just(MapOp::LastKeyValue),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random operation sequence on both maps and compares every result.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut os_map: OSRBTreeMap<i64, i64> = OSRBTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    let (cursor, inserted) = os_map.insert(*k, *v);
                    let os_value = cursor.value().copied();
                    let bt_inserted = match bt_map.entry(*k) {
                        Entry::Vacant(slot) => {
                            slot.insert(*v);
                            true
                        }
                        Entry::Occupied(_) => false,
                    };
                    prop_assert_eq!(inserted, bt_inserted, "insert({}, {})", k, v);
                    prop_assert_eq!(os_value, bt_map.get(k).copied(), "insert({}, {}) cursor", k, v);
                }
                MapOp::Replace(k, v) => {
                    prop_assert_eq!(os_map.replace(*k, *v), bt_map.insert(*k, *v), "replace({}, {})", k, v);
                }
                MapOp::Erase(k) => {
                    prop_assert_eq!(os_map.erase(k), bt_map.remove(k).is_some(), "erase({})", k);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(os_map.remove(k), bt_map.remove(k), "remove({})", k);
                }
                MapOp::Find(k) => {
                    let cursor = os_map.find(k);
                    prop_assert_eq!(cursor.key_value(), bt_map.get_key_value(k), "find({})", k);
                    prop_assert_eq!(cursor.is_end(), !bt_map.contains_key(k));
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(os_map.get(k), bt_map.get(k), "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(os_map.contains_key(k), bt_map.contains_key(k), "contains_key({})", k);
                }
                MapOp::RankOf(k) => {
                    let expected = bt_map.contains_key(k).then(|| bt_map.range(..*k).count());
                    prop_assert_eq!(os_map.rank_of(k), expected, "rank_of({})", k);
                }
                MapOp::GetByRank(rank) => {
                    prop_assert_eq!(os_map.get_by_rank(*rank), bt_map.iter().nth(*rank), "get_by_rank({})", rank);
                }
                MapOp::FirstKeyValue => {
                    prop_assert_eq!(os_map.first_key_value(), bt_map.first_key_value());
                }
                MapOp::LastKeyValue => {
                    prop_assert_eq!(os_map.last_key_value(), bt_map.last_key_value());
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(os_map.pop_first(), bt_map.pop_first());
                }
                MapOp::PopLast => {
                    prop_assert_eq!(os_map.pop_last(), bt_map.pop_last());
                }
            }
            prop_assert_eq!(os_map.len(), bt_map.len());
            prop_assert_eq!(os_map.is_empty(), bt_map.is_empty());
        }

        prop_assert!(os_map.iter().eq(bt_map.iter()));
    }

    #[test]
    fn iter_matches_btreemap(entries in entries_strategy()) {
        let os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map = model_of(&entries);

        prop_assert!(os_map.iter().eq(bt_map.iter()));
        prop_assert!(os_map.iter().rev().eq(bt_map.iter().rev()));
        prop_assert!(os_map.keys().eq(bt_map.keys()));
        prop_assert!(os_map.values().eq(bt_map.values()));
        prop_assert_eq!(os_map.iter().len(), bt_map.len());
    }

    #[test]
    fn iter_interleaved_next_next_back(entries in entries_strategy(), pattern in any::<u64>()) {
        let os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map = model_of(&entries);

        let mut os_iter = os_map.iter();
        let mut bt_iter = bt_map.iter();
        for step in 0.. {
            let from_back = pattern.rotate_left(step % 64) & 1 == 1;
            let (os_item, bt_item) = if from_back {
                (os_iter.next_back(), bt_iter.next_back())
            } else {
                (os_iter.next(), bt_iter.next())
            };
            prop_assert_eq!(os_item, bt_item);
            prop_assert_eq!(os_iter.len(), bt_iter.len());
            if os_item.is_none() {
                break;
            }
        }
        prop_assert_eq!(os_iter.next(), None);
    }

    #[test]
    fn get_mut_and_iter_mut_match_btreemap(entries in entries_strategy(), probe in key_strategy()) {
        let mut os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut bt_map = model_of(&entries);

        if let Some(v) = os_map.get_mut(&probe) {
            *v = v.wrapping_add(1);
        }
        if let Some(v) = bt_map.get_mut(&probe) {
            *v = v.wrapping_add(1);
        }
        for (k, v) in &mut os_map {
            *v = v.wrapping_mul(*k);
        }
        for (k, v) in &mut bt_map {
            *v = v.wrapping_mul(*k);
        }
        for v in os_map.values_mut().rev().step_by(2) {
            *v ^= 1;
        }
        for v in bt_map.values_mut().rev().step_by(2) {
            *v ^= 1;
        }

        prop_assert!(os_map.iter().eq(bt_map.iter()));
    }

    #[test]
    fn retain_matches_btreemap(entries in entries_strategy()) {
        let mut os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut bt_map = model_of(&entries);

        os_map.retain(|k, v| {
            *v = v.wrapping_add(*k);
            k % 3 != 0
        });
        bt_map.retain(|k, v| {
            *v = v.wrapping_add(*k);
            k % 3 != 0
        });

        prop_assert_eq!(os_map.len(), bt_map.len());
        prop_assert!(os_map.iter().eq(bt_map.iter()));
    }

    #[test]
    fn into_iter_matches_btreemap(entries in entries_strategy()) {
        let os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map = model_of(&entries);

        prop_assert!(os_map.clone().into_keys().eq(bt_map.clone().into_keys()));
        prop_assert!(os_map.clone().into_values().rev().eq(bt_map.clone().into_values().rev()));
        prop_assert!(os_map.into_iter().eq(bt_map));
    }

    #[test]
    fn cursor_remove_matches_retain(entries in entries_strategy()) {
        let mut os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut bt_map = model_of(&entries);

        let mut cursor = os_map.cursor_front_mut();
        let mut visited = 0;
        while let Some(&k) = cursor.key() {
            prop_assert_eq!(cursor.rank(), visited);
            if k % 2 == 0 {
                cursor.remove_current();
            } else {
                cursor.move_next();
                visited += 1;
            }
        }
        bt_map.retain(|k, _| k % 2 != 0);

        prop_assert!(os_map.iter().eq(bt_map.iter()));
    }

    #[test]
    fn insert_then_erase_all_returns_to_empty(
        keys in Just((0i64..1_000).collect::<Vec<_>>()).prop_shuffle(),
        order in Just((0i64..1_000).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let mut map = OSRBTreeMap::new();
        for &k in &keys {
            prop_assert!(map.insert(k, ()).1);
        }
        prop_assert_eq!(map.len(), keys.len());
        for (removed, k) in order.iter().enumerate() {
            prop_assert!(map.erase(k));
            prop_assert!(map.find(k).is_end());
            prop_assert_eq!(map.len(), keys.len() - removed - 1);
        }
        prop_assert!(map.is_empty());
        prop_assert!(map.cursor_front().is_end());
        prop_assert_eq!(map.iter().next(), None);
    }
}

// ─── Order statistics ────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn get_by_rank_matches_sorted_vec(entries in entries_strategy()) {
        let mut os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let sorted: Vec<(i64, i64)> = model_of(&entries).into_iter().collect();

        for (rank, (k, v)) in sorted.iter().enumerate() {
            prop_assert_eq!(os_map.get_by_rank(rank), Some((k, v)));
            prop_assert_eq!(os_map.rank_of(k), Some(rank));
            prop_assert_eq!(os_map[Rank(rank)], *v);
        }
        prop_assert_eq!(os_map.get_by_rank(sorted.len()), None);

        for rank in 0..sorted.len() {
            if let Some((_, v)) = os_map.get_by_rank_mut(rank) {
                *v = i64::try_from(rank).expect("rank fits in i64");
            }
        }
        prop_assert!(os_map.values().copied().eq(0..i64::try_from(sorted.len()).expect("len fits in i64")));
    }
}

// ─── Trait implementations ───────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn eq_ord_and_hash_follow_contents(a in entries_strategy(), b in entries_strategy()) {
        let os_a: OSRBTreeMap<i64, i64> = a.iter().copied().collect();
        let os_b: OSRBTreeMap<i64, i64> = b.iter().copied().collect();
        let bt_a = model_of(&a);
        let bt_b = model_of(&b);

        prop_assert_eq!(os_a == os_b, bt_a == bt_b);
        prop_assert_eq!(os_a.cmp(&os_b), bt_a.cmp(&bt_b));

        // Same contents, different insertion order.
        let reversed: OSRBTreeMap<i64, i64> = bt_a.iter().rev().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(&reversed, &os_a);
        let state = RandomState::new();
        prop_assert_eq!(state.hash_one(&reversed), state.hash_one(&os_a));
    }

    #[test]
    fn extend_keeps_existing_values(a in entries_strategy(), b in entries_strategy()) {
        let mut os_map: OSRBTreeMap<i64, i64> = a.iter().copied().collect();
        os_map.extend(b.iter().map(|(k, v)| (k, v)));
        let combined: Vec<(i64, i64)> = a.iter().chain(b.iter()).copied().collect();

        prop_assert!(os_map.iter().eq(model_of(&combined).iter()));
    }
}

// ─── Concrete scenarios ──────────────────────────────────────────────────────

#[test]
fn insert_and_erase_scenario() {
    let mut map = OSRBTreeMap::new();
    for k in [5, 3, 8, 1, 4, 7, 9] {
        assert!(map.insert(k, k * 100).1);
    }
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(map.len(), 7);

    assert!(map.erase(&5));
    assert!(map.erase(&3));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 4, 7, 8, 9]);
    assert_eq!(map.len(), 5);
    assert!(map.find(&5).is_end());
    assert!(!map.erase(&3));
}

#[test]
fn find_after_insert_returns_matching_entry() {
    let mut map = OSRBTreeMap::new();
    map.insert(String::from("kiwi"), 1);
    map.insert(String::from("apple"), 2);
    let cursor = map.find("kiwi");
    assert_eq!(cursor.key().map(String::as_str), Some("kiwi"));
    assert_eq!(cursor.rank(), 1);
    assert!(map.find("pear").is_end());
}

#[test]
fn with_capacity_reserves_nodes() {
    let mut map = OSRBTreeMap::with_capacity(100);
    let capacity = map.capacity();
    assert!(capacity >= 100);
    for k in 0..100 {
        map.try_insert(k, k).expect("capacity was reserved");
    }
    assert_eq!(map.capacity(), capacity);

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.get(&1), None);
}

#[test]
fn alloc_error_formats() {
    let err = AllocError::CapacityExceeded { max: 7 };
    assert_eq!(err.to_string(), "node storage is full (7 entries)");
}

#[test]
fn default_iterators_are_empty() {
    let iter: osrbtree_map::IntoIter<u8, u8> = Default::default();
    assert_eq!(iter.len(), 0);
    let keys: osrbtree_map::IntoKeys<u8, u8> = Default::default();
    assert_eq!(keys.len(), 0);
    let values: osrbtree_map::ValuesMut<'_, u8, u8> = Default::default();
    assert_eq!(values.len(), 0);
}

#[test]
fn debug_output() {
    let map = OSRBTreeMap::from([(3, "c"), (1, "a")]);
    assert_eq!(format!("{map:?}"), r#"{1: "a", 3: "c"}"#);
    assert_eq!(format!("{:?}", map.find(&3)), r#"Cursor(Some((3, "c")))"#);
    assert_eq!(format!("{:?}", map.cursor_end()), "Cursor(None)");
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn index_rank_out_of_bounds_panics() {
    let map: OSRBTreeMap<i32, i32> = OSRBTreeMap::new();
    let _ = map[Rank(0)];
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn index_missing_key_panics() {
    let map = OSRBTreeMap::from([(1, 1)]);
    let _ = map[&2];
}
