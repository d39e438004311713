#![allow(dead_code)]

use sovran_tokenmap::{Key, MapError, TokenMap};
use std::collections::HashMap;
use std::sync::LazyLock;

// The keys are the schema: each one names a slot and fixes its type, once,
// next to the type it carries. Everything else is plain function calls.
static USERS: LazyLock<Key<Vec<User>>> = LazyLock::new(|| Key::new("users"));
static CONFIG: LazyLock<Key<HashMap<String, String>>> = LazyLock::new(|| Key::new("config"));
static PAGE_VIEWS: LazyLock<Key<HashMap<String, u32>>> = LazyLock::new(|| Key::new("page_views"));
static STARTUP_TIME: LazyLock<Key<chrono::DateTime<chrono::Local>>> =
    LazyLock::new(|| Key::new("startup_time"));

#[derive(Debug)]
struct User {
    id: u64,
    username: String,
    email: String,
    active: bool,
}

/// Demonstrates using a TokenMap as a typed application context shared by
/// several modules.
fn main() -> Result<(), MapError> {
    let mut context = TokenMap::new();
    initialize_context(&mut context);

    // Add some users
    add_user(
        &mut context,
        User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            active: true,
        },
    )?;
    add_user(
        &mut context,
        User {
            id: 2,
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            active: true,
        },
    )?;

    // Update configuration
    set_config(&mut context, "theme", "dark")?;
    set_config(&mut context, "language", "en-US")?;

    // Record some statistics
    record_page_view(&mut context, "home")?;
    record_page_view(&mut context, "profile")?;
    record_page_view(&mut context, "home")?;

    print_context(&context)?;

    // Update a user in place
    deactivate_user(&mut context, 1)?;
    println!("\nAfter deactivating user 1:");
    for user in context.try_get(&USERS)? {
        println!(
            "User {}: {} <{}> - active: {}",
            user.id, user.username, user.email, user.active
        );
    }

    Ok(())
}

/// Seed every slot the application expects to find.
fn initialize_context(context: &mut TokenMap) {
    let mut config = HashMap::new();
    config.insert("theme".to_string(), "light".to_string());
    config.insert("language".to_string(), "en-US".to_string());
    config.insert("notifications".to_string(), "enabled".to_string());

    context
        .set(&USERS, Vec::new())
        .set(&CONFIG, config)
        .set(&PAGE_VIEWS, HashMap::new())
        .set(&STARTUP_TIME, chrono::Local::now());
}

fn add_user(context: &mut TokenMap, user: User) -> Result<(), MapError> {
    context
        .get_mut(&USERS)
        .ok_or_else(|| MapError::NotFound(USERS.to_string()))?
        .push(user);
    Ok(())
}

fn deactivate_user(context: &mut TokenMap, id: u64) -> Result<(), MapError> {
    let users = context
        .get_mut(&USERS)
        .ok_or_else(|| MapError::NotFound(USERS.to_string()))?;
    if let Some(user) = users.iter_mut().find(|u| u.id == id) {
        user.active = false;
    }
    Ok(())
}

fn set_config(context: &mut TokenMap, key: &str, value: &str) -> Result<(), MapError> {
    context
        .get_mut(&CONFIG)
        .ok_or_else(|| MapError::NotFound(CONFIG.to_string()))?
        .insert(key.to_string(), value.to_string());
    Ok(())
}

fn record_page_view(context: &mut TokenMap, page: &str) -> Result<(), MapError> {
    let views = context
        .get_mut(&PAGE_VIEWS)
        .ok_or_else(|| MapError::NotFound(PAGE_VIEWS.to_string()))?;
    *views.entry(page.to_string()).or_insert(0) += 1;
    Ok(())
}

fn print_context(context: &TokenMap) -> Result<(), MapError> {
    println!("APPLICATION CONTEXT:");
    println!("====================");

    println!("\nUSERS:");
    for user in context.try_get(&USERS)? {
        println!(
            "User {}: {} <{}> - active: {}",
            user.id, user.username, user.email, user.active
        );
    }

    println!("\nCONFIGURATION:");
    for (key, value) in context.try_get(&CONFIG)? {
        println!("{}: {}", key, value);
    }

    println!("\nPAGE VIEWS:");
    let mut total = 0;
    for (page, count) in context.try_get(&PAGE_VIEWS)? {
        println!("{}: {} views", page, count);
        total += count;
    }
    println!("Total page views: {}", total);

    println!(
        "\nStarted at: {}",
        context.try_get(&STARTUP_TIME)?.format("%Y-%m-%d %H:%M:%S")
    );

    Ok(())
}
