#![cfg(test)]

use std::collections::HashMap as StdHashMap;
use std::hash::BuildHasher;
use std::iter::FusedIterator;

use proptest::prelude::*;

use super::*;
use crate::util::alloc::DropCounter;
use crate::util::hash::{FirstByteState, FixedState};
use crate::util::log;
use crate::util::panic::assert_panics;

#[test]
fn test_put_and_get() {
    let mut map = HashMap::new();

    map.put("abc", 3);
    assert_eq!(map.get("abc"), Some(&3), "A value should be retrievable after put.");
    assert_eq!(map.get("abcd"), None, "A key that was never put should be absent.");

    map.put("abc", 4);
    assert_eq!(map.get("abc"), Some(&4), "The last put for a key should win.");
    assert_eq!(map.len(), 1, "Overwriting shouldn't add a second entry.");
}

#[test]
fn test_delete() {
    let mut map = HashMap::new();

    map.put("abc", 3);
    assert_eq!(map.get("abc"), Some(&3));

    assert_eq!(map.delete("abc"), Some(3), "Delete should hand back the removed value.");
    assert_eq!(map.get("abc"), None, "A deleted key should be absent.");
    assert!(!map.contains("abc"));

    assert_eq!(map.delete("abc"), None, "Deleting an absent key should be a no-op.");
    assert!(map.is_empty());
}

#[test]
fn test_contains() {
    let mut map = HashMap::new();
    assert!(!map.contains("abc"), "A new map shouldn't contain anything.");

    map.put("abc", 3);
    assert!(map.contains("abc"));
}

#[test]
fn test_absent_is_not_zero() {
    let mut map = HashMap::new();
    map.put("", 0);
    map.put("blank", 0);

    assert_eq!(map.get(""), Some(&0), "The empty string should be a valid key.");
    assert_eq!(map.get("blank"), Some(&0));
    assert_eq!(map.get("missing"), None, "Absence should be distinct from a stored zero.");
}

#[test]
fn test_put_keeps_existing_key() {
    let mut map = HashMap::new();
    map.put(String::from("key"), 1);

    assert_eq!(map.put("key", 2), Some(1), "Overwriting should return the previous value.");
    assert_eq!(map.get_entry("key"), Some(("key", &2)));
    assert_eq!(map.delete_entry("key"), Some((String::from("key"), 2)));
}

#[test]
fn test_get_mut() {
    let mut map = HashMap::from([("count", 1)]);

    if let Some(count) = map.get_mut("count") {
        *count += 41;
    }

    assert_eq!(map["count"], 42);
    assert_eq!(map.get_mut("missing"), None);
}

#[test]
fn test_index_missing_key() {
    let map = HashMap::from([("abc", 3)]);
    assert_eq!(map["abc"], 3);

    assert_panics!({
        map["abcd"]
    });
}

#[test]
fn test_hash_collisions() {
    let mut map = HashMap::with_hasher(FixedState(0));
    map.put("zero", 0);
    map.put("one", 1);
    map.put("two", 2);
    map.put("three", 3);

    assert_eq!(map.delete("zero"), Some(0));

    assert_eq!(
        map.iter().map(|(k, _)| k).collect::<Vec<_>>(),
        ["one", "two", "three"],
        "Every entry in a collision run should shift back when the head is removed."
    );
    assert!(map.buckets[3].is_none());

    assert_eq!(map.delete("two"), Some(2));
    assert_eq!(map.get("one"), Some(&1));
    assert_eq!(map.get("three"), Some(&3), "No entries should be lost during removal.");
    assert_eq!(map.get("two"), None);
    assert_eq!(map.len(), 2);
}

#[test]
fn test_hash_collisions_wrap() {
    let mut map = HashMap::with_cap_and_hasher(8, FixedState(5));
    map.put("a", 'a');
    map.put("b", 'b');
    map.put("c", 'c');
    map.put("d", 'd');

    assert_eq!(map.cap(), 8, "Four entries fit in eight buckets without growing.");
    assert_eq!(map.buckets[0].as_ref().map(|e| e.1), Some('d'), "Probing should wrap around.");

    map.delete("a");

    assert_eq!(
        map.iter().map(|(_, v)| *v).collect::<String>(),
        "bcd",
        "Entries should be shifted back across the end of the buckets."
    );
    assert!(map.buckets[0].is_none());
    assert_eq!(map.get("d"), Some(&'d'));
}

#[test]
fn test_delete_keeps_entries_reachable() {
    // Ideal buckets with 8 buckets: "a", "a2" and "a3" -> 1, "b" -> 2, "c" -> 3.
    let mut map = HashMap::with_cap_and_hasher(8, FirstByteState);
    map.put("a", 0);
    map.put("b", 1);
    map.put("c", 2);

    map.delete("a");
    assert_eq!(map.buckets[2].as_ref().map(|e| e.1), Some(1), "\"b\" was already in place.");
    assert_eq!(map.buckets[3].as_ref().map(|e| e.1), Some(2), "\"c\" was already in place.");

    // "c" sits in its ideal bucket between two entries displaced from bucket 1.
    let mut map = HashMap::with_cap_and_hasher(8, FirstByteState);
    map.put("a", 0);
    map.put("a2", 1);
    map.put("c", 2);
    map.put("a3", 3);
    assert_eq!(map.buckets[4].as_ref().map(|e| e.1), Some(3));

    map.delete("a");
    assert_eq!(map.get("a2"), Some(&1));
    assert_eq!(map.get("c"), Some(&2), "An ideally placed entry should stay where it is.");
    assert_eq!(
        map.get("a3"),
        Some(&3),
        "A displaced entry after an ideally placed one should still be reachable."
    );
    assert_eq!(map.buckets[3].as_ref().map(|e| e.1), Some(2));
    assert!(map.buckets[4].is_none(), "The gap should move to the last shifted entry.");

    assert_eq!(map.put("a3", 4), Some(3), "Putting a shifted key should overwrite it.");
    assert_eq!(map.len(), 3, "Putting a shifted key shouldn't store it twice.");
}

#[test]
fn test_overwrite_does_not_grow() {
    let mut map = HashMap::with_cap(5);
    for i in 0..4 {
        map.put(i.to_string(), i);
    }
    assert_eq!(map.cap(), 5, "Four entries fit in five buckets.");

    map.put("0", 10);
    assert_eq!(map.cap(), 5, "Overwriting at the load threshold shouldn't reallocate.");
    assert_eq!(map["0"], 10);

    map.put("4", 4);
    assert_eq!(map.cap(), 10, "A new key at the load threshold should still grow the map.");
    assert_eq!(map.len(), 5);
}

#[test]
fn test_growth() {
    log::init();

    let mut map = HashMap::new();
    assert_eq!(map.cap(), 0, "No buckets should be allocated before the first put.");

    for i in 0..1000_usize {
        map.put(i.to_string(), i);
        assert!(
            map.len() <= map.cap() * 4 / 5,
            "The load factor should be respected after every put."
        );
    }

    assert_eq!(map.len(), 1000);
    for i in 0..1000_usize {
        assert_eq!(map.get(&i.to_string()), Some(&i), "Growing shouldn't lose entries.");
    }
}

#[test]
fn test_reserve() {
    let mut map = HashMap::new();
    map.reserve(10);
    let cap = map.cap();

    for i in 0..10_u32 {
        map.put(i.to_string(), i);
    }
    assert_eq!(map.cap(), cap, "Reserved entries should fit without reallocating.");

    map.reserve(0);
    assert_eq!(map.cap(), cap, "Reserving nothing extra shouldn't reallocate.");

    assert_eq!(map.try_reserve(usize::MAX), Err(CapacityOverflow));
    assert_eq!(
        map.try_reserve(usize::MAX / 8),
        Err(CapacityOverflow),
        "Capacity which can't be allocated should be reported."
    );
    assert_eq!(map.len(), 10, "A failed reservation should leave the map untouched.");

    assert_panics!({
        HashMap::<u8>::new().reserve(usize::MAX)
    });
}

#[test]
fn test_clear() {
    let counter = DropCounter::new();
    let mut map = HashMap::new();
    for i in 0..5 {
        map.put(i.to_string(), counter.track(i));
    }
    let cap = map.cap();

    map.clear();
    assert_eq!(counter.dropped(), 5, "Clearing should drop every value.");
    assert!(map.is_empty());
    assert_eq!(map.cap(), cap, "Clearing should keep the buckets.");
    assert!(!map.contains("0"));
}

#[test]
fn test_drops_values_once() {
    let counter = DropCounter::new();
    let mut map = HashMap::new();
    for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
        map.put(key, counter.track(i));
    }
    assert_eq!(counter.dropped(), 0, "Growing should move values, not drop them.");

    let old = map.put("a", counter.track(4));
    assert_eq!(counter.dropped(), 0, "An overwritten value belongs to the caller.");
    assert_eq!(old.map(|t| t.id), Some(0));
    assert_eq!(counter.dropped(), 1);

    map.delete("b");
    map.delete("missing");
    assert_eq!(counter.dropped(), 2);

    drop(map);
    assert_eq!(counter.dropped(), 5, "Dropping the map should drop each remaining value.");
}

#[test]
fn test_iter() {
    let mut map: HashMap<usize> = (0..5).map(|i| (i.to_string(), i)).collect();

    let mut keys = map.keys().collect::<Vec<_>>();
    keys.sort();
    assert_eq!(keys, ["0", "1", "2", "3", "4"]);
    assert_eq!(map.iter().len(), 5);

    for value in map.values_mut() {
        *value *= 10;
    }
    for (key, value) in &mut map {
        assert_eq!(key.parse::<usize>().map(|k| k * 10), Ok(*value));
    }
    assert_eq!(map.values().sum::<usize>(), 100);

    let mut entries = map.clone().into_iter().collect::<Vec<_>>();
    entries.sort();
    assert_eq!(entries[4], (String::from("4"), 40));

    assert_eq!(map.clone().into_keys().len(), 5);

    let mut keys = map.keys();
    keys.by_ref().for_each(drop);
    assert_eq!(keys.next(), None, "Exhausted iterators should keep returning None.");
    assert_eq!(keys.next(), None);

    assert_eq!(map.into_values().max(), Some(40));
}

#[test]
fn test_iter_fused() {
    fn assert_fused<I: FusedIterator>(_: I) {}

    let mut map = HashMap::from([("a", 1)]);
    assert_fused(map.keys());
    assert_fused(map.values());
    assert_fused(map.values_mut());
    assert_fused(map.clone().into_keys());
    assert_fused(map.into_values());
}

#[test]
fn test_extend() {
    let mut map = HashMap::from([("a", 1)]);
    map.extend([("a", 2), ("b", 3)]);
    map.extend(vec![(String::from("c"), 4)]);

    assert_eq!(map.len(), 3);
    assert_eq!(map["a"], 2, "Extending should overwrite existing keys.");
}

#[test]
fn test_eq() {
    let mut lhs = HashMap::with_hasher(FixedState(7));
    lhs.put("x", 1);
    lhs.put("y", 2);

    let mut rhs = HashMap::with_cap(64);
    rhs.put("y", 2);
    rhs.put("x", 1);

    assert!(lhs == rhs, "Equality shouldn't depend on hasher, capacity or insertion order.");

    rhs.put("x", 0);
    assert!(lhs != rhs);

    rhs.put("x", 1);
    rhs.put("z", 3);
    assert!(lhs != rhs);
}

#[test]
fn test_fmt() {
    let mut map = HashMap::with_cap_and_hasher(4, FirstByteState);
    map.put("a", 1);

    assert_eq!(format!("{map}"), "#{\"a\": 1}");
    assert_eq!(
        format!("{map:?}"),
        "HashMap { buckets: [-, (\"a\": 1), -, -], len: 1, cap: 4, hasher: FirstByteState }"
    );
}

#[test]
fn test_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<HashMap<String>>();
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_passthrough() {
    let map = HashMap::from([("abc", 3), ("", 0)]);

    let json = serde_json::to_string(&map).expect("serializing a map should succeed");
    let parsed: HashMap<i32> = serde_json::from_str(&json).expect("parsing it back should succeed");
    assert_eq!(parsed, map);

    let duplicated: HashMap<i32> = serde_json::from_str(r#"{"a": 1, "a": 2}"#)
        .expect("duplicate keys should be accepted");
    assert_eq!(duplicated.len(), 1);
    assert_eq!(duplicated["a"], 2, "The last duplicate should win.");
}

#[derive(Debug, Clone)]
enum Op {
    Put(String, u8),
    Delete(String),
    Get(String),
}

/// Random operations over keys matching `key`, which should describe a tiny key space so that
/// overwrites and deletes of present keys are common.
fn op(key: &'static str) -> impl Strategy<Value = Op> {
    prop_oneof![
        (key, any::<u8>()).prop_map(|(k, v)| Op::Put(k, v)),
        key.prop_map(Op::Delete),
        key.prop_map(Op::Get),
    ]
}

fn check_against_std<B: BuildHasher>(
    mut map: HashMap<u8, B>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model = StdHashMap::new();

    for op in ops {
        match op {
            Op::Put(key, value) => {
                prop_assert_eq!(map.put(key.clone(), value), model.insert(key.clone(), value));
                prop_assert_eq!(map.get(&key), Some(&value));
            },
            Op::Delete(key) => {
                prop_assert_eq!(map.delete(&key), model.remove(&key));
                prop_assert!(!map.contains(&key));
            },
            Op::Get(key) => {
                prop_assert_eq!(map.get(&key), model.get(&key));
                prop_assert_eq!(map.contains(&key), model.contains_key(&key));
            },
        }
        prop_assert_eq!(map.len(), model.len());
    }

    for (key, value) in &model {
        prop_assert_eq!(map.get(key), Some(value));
    }

    Ok(())
}

proptest! {
    #[test]
    fn behaves_like_std_map(ops in prop::collection::vec(op("[a-c]{0,2}"), 0..200)) {
        check_against_std(HashMap::new(), ops)?;
    }

    #[test]
    fn behaves_like_std_map_when_every_key_collides(
        seed in any::<u64>(),
        ops in prop::collection::vec(op("[a-c]{0,2}"), 0..100),
    ) {
        check_against_std(HashMap::with_hasher(FixedState(seed)), ops)?;
    }

    // Keys sharing a first byte collide while others land nearby, so probe runs mix entries that
    // are displaced with entries sitting in their ideal bucket.
    #[test]
    fn behaves_like_std_map_with_interleaved_runs(
        ops in prop::collection::vec(op("[a-e][a-c]?"), 0..200),
    ) {
        check_against_std(HashMap::with_hasher(FirstByteState), ops)?;
    }
}
