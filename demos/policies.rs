use sovran_tokenmap::{Key, MapError, OnConflict, OnMiss, TokenMap};

/// A tour of the miss and conflict policies and how their errors read.
fn main() -> Result<(), MapError> {
    let greeting: Key<String> = Key::new("greeting");
    let retries: Key<u32> = Key::new("retries");
    let mut map = TokenMap::new();

    // A miss is None by default...
    match map.get(&greeting) {
        Some(value) => println!("greeting: {}", value),
        None => println!("no greeting yet"),
    }

    // ...and an error when the call site insists the key must be there.
    match map.try_get(&greeting) {
        Ok(value) => println!("greeting: {}", value),
        Err(e) => println!("as expected: {}", e),
    }

    // Plain set overwrites; it also chains.
    map.set(&greeting, "hello".to_string()).set(&retries, 3);

    // Ignore keeps the first registration.
    map.set_with(&greeting, "hi".to_string(), OnConflict::Ignore)?;
    println!("after Ignore: {}", map.try_get(&greeting)?);

    // Fail makes a double registration loud.
    match map.set_with(&greeting, "howdy".to_string(), OnConflict::Fail) {
        Ok(_) => println!("this shouldn't happen - greeting was already set"),
        Err(MapError::Conflict { existing, .. }) => {
            println!("conflict; keeping {}", existing)
        }
        Err(e) => println!("unexpected error: {}", e),
    }

    // Overwrite replaces unconditionally.
    map.set_with(&greeting, "howdy".to_string(), OnConflict::Overwrite)?;
    println!("after Overwrite: {}", map.try_get(&greeting)?);

    // Removing an absent key is silent by default and an error under Fail.
    let missing: Key<bool> = Key::new("missing");
    map.remove_with(&missing, OnMiss::Ignore)?;
    match map.remove_with(&missing, OnMiss::Fail) {
        Ok(_) => println!("this shouldn't happen - key was never set"),
        Err(e) => println!("as expected: {}", e),
    }

    // Two keys with the same display name are still different keys.
    let other_retries: Key<u32> = Key::new("retries");
    match map.get(&other_retries) {
        Some(value) => println!("this shouldn't happen - got {}", value),
        None => println!("same name, different key: miss"),
    }
    println!("original retries key still works: {}", map.try_get(&retries)?);

    println!("map holds {} entries", map.len());
    Ok(())
}
