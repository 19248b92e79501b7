use avl_forest::{AvlMap, AvlSet, KeyError};

#[test]
fn smoke() {
    let mut map = AvlMap::<f64, i32>::new();
    map.set(1.0, 1);
    map.set(3.0, 5);
    map.set(4.0, 5);
    map.set(3.0, 15);
    map.set(4.1, 0);
    map.set(44.0, 123);

    assert_eq!(map.get(&44.0), Some(&123));
    assert_eq!(map.get(&3.0), Some(&15));
    assert_eq!(map.size(), 5);

    let mut keys = Vec::new();
    map.for_each(|_i, n| keys.push(n.k));
    assert_eq!(keys, vec![1.0, 3.0, 4.0, 4.1, 44.0]);
    map.assert_valid().unwrap();
}

#[test]
fn iteration() {
    let mut map = AvlMap::<String, i32>::new();
    assert_eq!(map.first(), None);

    map.set("a".to_string(), 1);
    map.set("b".to_string(), 2);
    map.set("c".to_string(), 3);

    let mut list = Vec::new();
    let mut entry = map.first();
    while let Some(i) = entry {
        list.push((map.key(i).clone(), *map.value(i)));
        entry = map.next(i);
    }
    assert_eq!(
        list,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3)
        ]
    );

    let from_iterator: Vec<(String, i32)> = map
        .iterator()
        .map(|i| (map.key(i).clone(), *map.value(i)))
        .collect();
    assert_eq!(
        from_iterator,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3)
        ]
    );

    // walk backwards from the last entry
    let mut back = Vec::new();
    let mut entry = map.last();
    while let Some(i) = entry {
        back.push(map.key(i).clone());
        entry = map.prev(i);
    }
    assert_eq!(back, vec!["c".to_string(), "b".to_string(), "a".to_string()]);
}

#[test]
fn ladder_insert_delete() {
    let mut map = AvlMap::<i32, i32>::new();

    for i in 0..300 {
        map.set(i, i);
        map.assert_valid().unwrap();
    }
    assert_eq!(map.size(), 300);

    for i in (0..300).step_by(3) {
        assert!(map.del(&i));
        map.assert_valid().unwrap();
    }

    for i in 0..300 {
        if i % 3 == 0 {
            assert_eq!(map.get(&i), None);
        } else {
            assert_eq!(map.get(&i), Some(&i));
        }
    }
}

#[test]
fn descending_and_interleaved_inserts() {
    let mut map = AvlMap::<i32, i32>::new();
    for i in (0..128).rev() {
        map.set(i, -i);
        map.assert_valid().unwrap();
    }
    // pendulum: alternate far-left / far-right keys
    for i in 0..64 {
        map.set(-1000 - i, 0);
        map.set(1000 + i, 0);
        map.assert_valid().unwrap();
    }
    let keys: Vec<i32> = map.iterator().map(|i| *map.key(i)).collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
}

#[test]
fn misc_api() {
    let mut map = AvlMap::<i32, i32>::new();
    assert!(map.is_empty());
    assert_eq!(map.size(), 0);
    assert_eq!(map.get_or_next_lower(&10), None);

    let i10 = map.set(10, 100);
    let i5 = map.set(5, 50);
    let i20 = map.set(20, 200);

    assert!(!map.is_empty());
    assert_eq!(map.find(&5), Some(i5));
    assert_eq!(map.get(&10), Some(&100));
    assert_eq!(map.first().map(|i| *map.key(i)), Some(5));
    assert_eq!(map.last().map(|i| *map.key(i)), Some(20));
    assert_eq!(map.get_or_next_lower(&4), None);
    assert_eq!(map.get_or_next_lower(&19).map(|i| *map.key(i)), Some(10));
    assert_eq!(map.get_or_next_lower(&21).map(|i| *map.key(i)), Some(20));

    *map.get_mut(&10).unwrap() = 101;
    *map.value_mut_by_index(i20) = 201;
    assert_eq!(map.get(&10), Some(&101));
    assert_eq!(map.get(&20), Some(&201));

    assert!(map.has(&10));
    assert!(map.del(&10));
    assert!(!map.del(&10));
    assert_eq!(map.find(&10), None);
    let _ = i10;

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.size(), 0);
    assert_eq!(map.first(), None);
    map.assert_valid().unwrap();
}

#[test]
fn strict_lookup_signals_absence() {
    let mut map = AvlMap::<i32, &str>::new();
    map.set(7, "seven");

    assert_eq!(map.try_get(&7), Ok(&"seven"));
    assert_eq!(map.try_get(&8), Err(KeyError));
}

#[test]
fn round_trip() {
    let mut map = AvlMap::<u64, String>::new();
    for k in [3u64, 141, 59, 26, 535, 89, 79] {
        map.set(k, format!("v{k}"));
        assert_eq!(map.get(&k), Some(&format!("v{k}")));
    }
    for k in [141u64, 26, 3] {
        assert!(map.del(&k));
        assert_eq!(map.get(&k), None);
        map.assert_valid().unwrap();
    }
}

#[test]
fn overwrite_keeps_shape_and_balance() {
    let mut map = AvlMap::<i32, i32>::new();
    for k in [50, 30, 70, 20, 40, 60, 80] {
        map.set(k, k);
    }

    let mut before = Vec::new();
    map.for_each(|i, n| before.push((i, n.k, n.p, n.l, n.r, n.bf)));

    let idx = map.set(30, -30);
    assert_eq!(map.find(&30), Some(idx));
    assert_eq!(map.get(&30), Some(&-30));
    assert_eq!(map.size(), 7);

    let mut after = Vec::new();
    map.for_each(|i, n| after.push((i, n.k, n.p, n.l, n.r, n.bf)));
    assert_eq!(before, after);
    map.assert_valid().unwrap();
}

#[test]
fn ascending_inserts_stay_balanced() {
    let mut map = AvlMap::<i32, ()>::new();
    for k in 1..=7 {
        map.set(k, ());
        map.assert_valid().unwrap();
    }

    // repeated rotations must leave the perfect tree: height 3, root 4
    assert_eq!(map.height(), 3);
    assert_eq!(map.root.map(|i| *map.key(i)), Some(4));
    let keys: Vec<i32> = map.iterator().map(|i| *map.key(i)).collect();
    assert_eq!(keys, vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn remove_two_child_node_promotes_predecessor() {
    let mut map = AvlMap::<i32, ()>::new();
    for k in [10, 20, 30, 40, 50, 25] {
        map.set(k, ());
        map.assert_valid().unwrap();
    }
    // 30 sits at the root with two children; 25 is its in-order predecessor
    assert_eq!(map.root.map(|i| *map.key(i)), Some(30));

    assert!(map.del(&30));
    map.assert_valid().unwrap();

    assert_eq!(map.root.map(|i| *map.key(i)), Some(25));
    let keys: Vec<i32> = map.iterator().map(|i| *map.key(i)).collect();
    assert_eq!(keys, vec![10, 20, 25, 40, 50]);
}

#[test]
fn remove_root_until_empty() {
    let mut map = AvlMap::<i32, ()>::new();
    for k in 0..64 {
        map.set(k, ());
    }
    while let Some(root) = map.root {
        let k = *map.key(root);
        assert!(map.del(&k));
        map.assert_valid().unwrap();
    }
    assert!(map.is_empty());
}

#[test]
fn deleted_slot_is_recycled() {
    let mut map = AvlMap::<i32, i32>::new();
    map.set(1, 1);
    let idx = map.set(2, 2);
    map.set(3, 3);

    assert!(map.del(&2));
    let reused = map.set(4, 4);
    assert_eq!(reused, idx);
    assert_eq!(map.get(&4), Some(&4));
    map.assert_valid().unwrap();
}

#[test]
fn custom_comparator_reverses_order() {
    let mut map = AvlMap::<i32, (), _>::with_comparator(|a: &i32, b: &i32| {
        if a == b {
            0
        } else if a > b {
            -1
        } else {
            1
        }
    });
    for k in [1, 5, 3, 2, 4] {
        map.set(k, ());
        map.assert_valid().unwrap();
    }
    let keys: Vec<i32> = map.iterator().map(|i| *map.key(i)).collect();
    assert_eq!(keys, vec![5, 4, 3, 2, 1]);
}

#[test]
fn set_basics() {
    let mut set = AvlSet::<i32>::new();
    assert!(set.is_empty());

    for v in [4, 1, 9, 4, 7] {
        set.add(v);
    }
    assert_eq!(set.size(), 4);
    assert!(set.has(&9));
    assert!(!set.has(&2));

    assert!(set.del(&9));
    assert!(!set.del(&9));
    set.assert_valid().unwrap();

    let values: Vec<i32> = set.iterator().map(|i| *set.value(i)).collect();
    assert_eq!(values, vec![1, 4, 7]);
    assert_eq!(set.get_or_next_lower(&6).map(|i| *set.value(i)), Some(4));

    set.clear();
    assert!(set.is_empty());
}
