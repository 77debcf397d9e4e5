//! map 行为测试，与具体存储无关
//!
//! 参数化的测试在每轮开始前 clear()，保证每个 n 都从空库开始。

use std::collections::HashMap;

use rand::Rng;
use redis_map::RedisMap;

fn string_range(n: usize) -> Vec<String> {
    (0..n).map(|i| i.to_string()).collect()
}

/// 写入 "0".."n-1"，值等于键
fn put_range(map: &RedisMap, n: usize) {
    for s in string_range(n) {
        map.insert(&s, &s).unwrap();
    }
}

fn reset(map: &RedisMap) {
    map.clear().unwrap();
}

pub fn size_matches_inserted_count(map: &RedisMap) {
    for n in [0, 1, 2, 3, 10, 100, 200] {
        reset(map);
        put_range(map, n);
        assert_eq!(map.len().unwrap(), n, "size after {} inserts", n);
    }
}

pub fn new_map_is_empty(map: &RedisMap) {
    assert_eq!(map.len().unwrap(), 0);
    assert!(map.is_empty().unwrap());
}

pub fn not_empty_after_inserts(map: &RedisMap) {
    for n in [1, 3, 5] {
        reset(map);
        put_range(map, n);
        assert!(!map.is_empty().unwrap());
    }
}

pub fn contains_inserted_key(map: &RedisMap) {
    map.insert("key", "value").unwrap();
    assert!(map.contains_key("key").unwrap());
}

pub fn does_not_contain_missing_key(map: &RedisMap) {
    map.insert("key", "value").unwrap();
    assert!(!map.contains_key("wrongKey").unwrap());
}

pub fn removed_key_is_not_contained(map: &RedisMap) {
    map.insert("key", "value").unwrap();
    map.remove("key").unwrap();
    assert!(!map.contains_key("key").unwrap());
}

pub fn contains_inserted_value(map: &RedisMap) {
    map.insert("key", "value").unwrap();
    assert!(map.contains_value("value").unwrap());
}

pub fn does_not_contain_missing_value(map: &RedisMap) {
    for n in [0, 1, 5, 10] {
        reset(map);
        put_range(map, n);
        assert!(!map.contains_value("-1").unwrap());
    }
}

pub fn get_returns_inserted_values(map: &RedisMap) {
    for n in [1, 5, 10] {
        reset(map);
        put_range(map, n);
        for s in string_range(n) {
            assert_eq!(map.get(&s).unwrap(), Some(s.clone()));
        }
    }
}

pub fn get_missing_key_returns_none(map: &RedisMap) {
    assert_eq!(map.get("-1").unwrap(), None);
}

pub fn insert_returns_previous_value(map: &RedisMap) {
    assert_eq!(map.insert("key", "value").unwrap(), None);
    assert_eq!(
        map.insert("key", "newValue").unwrap(),
        Some("value".to_string())
    );
}

pub fn overwrite_replaces_value_and_keeps_size(map: &RedisMap) {
    map.insert("key", "value").unwrap();
    map.insert("other", "x").unwrap();

    map.insert("key", "newValue").unwrap();

    assert_eq!(map.get("key").unwrap(), Some("newValue".to_string()));
    assert_eq!(map.len().unwrap(), 2);
}

pub fn remove_existing_key(map: &RedisMap) {
    map.insert("key", "value").unwrap();

    let removed = map.remove("key").unwrap();

    assert_eq!(removed, Some("value".to_string()));
    assert_eq!(map.len().unwrap(), 0);
    assert_eq!(map.get("key").unwrap(), None);
    assert!(!map.contains_key("key").unwrap());
    assert!(!map.contains_value("value").unwrap());
}

pub fn remove_decrements_size_by_one(map: &RedisMap) {
    put_range(map, 10);

    map.remove("3").unwrap();

    assert_eq!(map.len().unwrap(), 9);
    assert_eq!(map.get("4").unwrap(), Some("4".to_string()));
}

pub fn remove_missing_key_is_noop(map: &RedisMap) {
    for n in [1, 5, 10] {
        reset(map);
        put_range(map, n);

        let removed = map.remove("wrongKey").unwrap();

        assert_eq!(removed, None);
        assert_eq!(map.len().unwrap(), n);
        let keys = map.keys().unwrap();
        assert!(string_range(n).iter().all(|s| keys.contains(s)));
    }
}

pub fn insert_all_adds_every_entry(map: &RedisMap) {
    for n in [1, 5, 7] {
        reset(map);
        let expected: HashMap<String, String> =
            string_range(n).into_iter().map(|s| (s.clone(), s)).collect();

        map.insert_all(&expected).unwrap();

        for (k, v) in &expected {
            assert_eq!(map.get(k).unwrap().as_ref(), Some(v));
        }
        assert_eq!(map.entries().unwrap(), expected);
    }
}

pub fn clear_empties_map(map: &RedisMap) {
    for n in [0, 1, 10, 50] {
        put_range(map, n);
        map.clear().unwrap();
        assert!(map.is_empty().unwrap());
    }
}

pub fn clear_twice_stays_empty(map: &RedisMap) {
    put_range(map, 10);
    map.clear().unwrap();
    assert!(map.is_empty().unwrap());
    map.clear().unwrap();
    assert!(map.is_empty().unwrap());
}

pub fn keys_are_exactly_the_inserted_keys(map: &RedisMap) {
    for n in [0, 1, 2, 3, 10, 50, 100, 200] {
        reset(map);
        put_range(map, n);

        let keys = map.keys().unwrap();

        assert_eq!(keys.len(), n);
        assert!(string_range(n).iter().all(|s| keys.contains(s)));
    }
}

pub fn keys_ignore_duplicate_inserts(map: &RedisMap) {
    let mut rng = rand::rng();
    for n in [1, 10, 50] {
        reset(map);
        put_range(map, n);
        for _ in 0..n {
            put_range(map, rng.random_range(0..n));
        }

        let keys = map.keys().unwrap();

        assert_eq!(keys.len(), n);
        assert!(string_range(n).iter().all(|s| keys.contains(s)));
    }
}

pub fn values_grouped_by_value(map: &RedisMap) {
    for n in [1, 10, 20] {
        reset(map);
        for i in 0..3 * n {
            map.insert(&i.to_string(), &(i % n).to_string()).unwrap();
        }

        let mut counts: HashMap<String, usize> = HashMap::new();
        for value in map.values().unwrap() {
            *counts.entry(value).or_default() += 1;
        }

        assert_eq!(counts.len(), n);
        assert!(counts.values().all(|c| *c == 3));
    }
}

pub fn entries_match_hash_map(map: &RedisMap) {
    for n in [1, 5, 10, 100] {
        reset(map);
        put_range(map, n);

        let mut expected = HashMap::new();
        for s in string_range(n) {
            expected.insert(s.clone(), s);
        }

        assert_eq!(map.entries().unwrap(), expected);
    }
}
