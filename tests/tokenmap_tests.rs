use sovran_tokenmap::{Key, MapError, OnConflict, OnMiss, TokenMap};

#[test]
fn test_identity_not_name_determines_equality() {
    let key_a: Key<i32> = Key::new("shared-name");
    let key_b: Key<i32> = Key::new("shared-name");
    let mut map = TokenMap::new();

    map.set(&key_a, 42);

    // Same name, different identity: key_b misses.
    assert_eq!(key_a.name(), key_b.name());
    assert_ne!(key_a, key_b);
    assert!(!map.has(&key_b));
    assert_eq!(map.get(&key_b), None);
    assert_eq!(map.get(&key_a), Some(&42));
}

#[test]
fn test_round_trip_preserves_value() {
    let text: Key<String> = Key::new("text");
    let numbers: Key<Vec<i64>> = Key::new("numbers");
    let mut map = TokenMap::new();

    map.set(&text, "untouched".to_string());
    map.set(&numbers, vec![-1, 0, 1]);

    assert_eq!(map.get(&text), Some(&"untouched".to_string()));
    assert_eq!(map.get(&numbers), Some(&vec![-1, 0, 1]));
}

#[test]
fn test_overwrite_is_the_default_and_idempotent() {
    let key: Key<u32> = Key::new("slot");
    let mut map = TokenMap::new();

    map.set(&key, 1);
    map.set(&key, 2);
    assert_eq!(map.get(&key), Some(&2));

    // Repeating the same set changes nothing observable.
    map.set(&key, 2);
    assert_eq!(map.get(&key), Some(&2));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_conflict_policy_matrix() -> Result<(), MapError> {
    let key: Key<&str> = Key::new("slot");
    let mut map = TokenMap::new();
    map.set(&key, "v1");

    // Ignore: existing value wins, no error.
    map.set_with(&key, "v2", OnConflict::Ignore)?;
    assert_eq!(map.get(&key), Some(&"v1"));

    // Fail: error, existing value untouched.
    assert!(matches!(
        map.set_with(&key, "v2", OnConflict::Fail),
        Err(MapError::Conflict { .. })
    ));
    assert_eq!(map.get(&key), Some(&"v1"));

    // Overwrite: replaces.
    map.set_with(&key, "v2", OnConflict::Overwrite)?;
    assert_eq!(map.get(&key), Some(&"v2"));
    Ok(())
}

#[test]
fn test_miss_policy_matrix() {
    let key: Key<f64> = Key::new("absent");
    let map = TokenMap::new();

    assert!(!map.has(&key));
    assert_eq!(map.get(&key), None);
    assert!(matches!(map.try_get(&key), Err(MapError::NotFound(_))));
}

#[test]
fn test_remove_correctness() {
    let key: Key<String> = Key::new("entry");
    let mut map = TokenMap::new();

    map.set(&key, "here".to_string());
    assert!(map.remove(&key));
    assert!(!map.has(&key));
    assert_eq!(map.get(&key), None);

    // Removing an absent key is a silent no-op by default...
    assert!(!map.remove(&key));

    // ...and an error only under Fail.
    assert!(map.remove_with(&key, OnMiss::Ignore).is_ok());
    assert!(matches!(
        map.remove_with(&key, OnMiss::Fail),
        Err(MapError::NotFound(_))
    ));
}

#[test]
fn test_operations_never_touch_other_keys() -> Result<(), MapError> {
    let k1: Key<i32> = Key::new("k1");
    let k2: Key<String> = Key::new("k2");
    let mut map = TokenMap::new();

    map.set(&k1, 10);
    map.set(&k2, "stable".to_string());

    map.set(&k1, 11);
    assert_eq!(map.get(&k2), Some(&"stable".to_string()));

    let _ = map.set_with(&k1, 12, OnConflict::Fail);
    assert_eq!(map.get(&k2), Some(&"stable".to_string()));

    map.remove(&k1);
    assert!(!map.has(&k1));
    assert_eq!(map.get(&k2), Some(&"stable".to_string()));
    assert_eq!(map.try_get(&k2)?, "stable");
    Ok(())
}

#[test]
fn test_one_key_works_across_maps() {
    let key: Key<u8> = Key::new("shared");
    let mut first = TokenMap::new();
    let mut second = TokenMap::new();

    first.set(&key, 1);
    second.set(&key, 2);

    // Identity is global, entries are per-map.
    assert_eq!(first.get(&key), Some(&1));
    assert_eq!(second.get(&key), Some(&2));

    first.remove(&key);
    assert_eq!(second.get(&key), Some(&2));
}

#[test]
fn test_cloned_key_addresses_same_entry() {
    let key: Key<i32> = Key::new("origin");
    let copy = key.clone();
    let mut map = TokenMap::new();

    map.set(&key, 5);
    assert_eq!(map.get(&copy), Some(&5));

    map.remove(&copy);
    assert!(!map.has(&key));
}

#[test]
fn test_set_chains() {
    let a: Key<i32> = Key::new("a");
    let b: Key<&str> = Key::new("b");
    let mut map = TokenMap::new();

    map.set(&a, 1).set(&b, "two");

    assert_eq!(map.get(&a), Some(&1));
    assert_eq!(map.get(&b), Some(&"two"));
}

#[test]
fn test_not_found_message_format() {
    let key: Key<u32> = Key::new("missing");
    let map = TokenMap::new();

    let err = map.try_get(&key).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Looking up \"Key(missing)\" yielded no results."
    );
}

#[test]
fn test_conflict_message_format() {
    let key: Key<String> = Key::new("greeting");
    let mut map = TokenMap::new();
    map.set(&key, "hello".to_string());

    let err = map
        .set_with(&key, "goodbye".to_string(), OnConflict::Fail)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Conflict while trying to set Key(greeting) to \"goodbye\"; already set to \"hello\"."
    );
}

#[test]
fn test_errors_implement_std_error() {
    let key: Key<u32> = Key::new("missing");
    let map = TokenMap::new();

    let err = map.try_get(&key).unwrap_err();
    let _as_dyn: &dyn std::error::Error = &err;
}

// The end-to-end walk from the docs: two differently typed keys living in
// one map, with removal leaving the other entry alone.
#[test]
fn test_name_and_age_end_to_end() {
    let name: Key<String> = Key::new("NAME");
    let age: Key<u32> = Key::new("AGE");
    let mut map = TokenMap::new();

    map.set(&name, "Rock".to_string());
    map.set(&age, 42);

    assert_eq!(map.get(&name).map(String::as_str), Some("Rock"));
    assert_eq!(map.get(&age), Some(&42));
    assert!(map.has(&name));

    map.remove(&name);
    assert!(!map.has(&name));
    assert_eq!(map.get(&name), None);
    assert_eq!(map.get(&age), Some(&42));
}
