//! # sovran-tokenmap
//!
//! A type-safe heterogeneous container keyed by identity tokens.
//!
//! `sovran-tokenmap` lets a single map hold values of many different types
//! without giving up static type safety. The trick is that the type lives
//! on the *key*: a [`Key<T>`] is an opaque token carrying a phantom type
//! parameter, and the compiler, not a runtime check, guarantees that
//! whatever you stored under a `Key<String>` comes back out as a `String`.
//! This is the shape you want under dependency-injection containers, typed
//! context objects, and plugin registries.
//!
//! ## Key Features
//!
//! - **Type-safe**: the value type is fixed at the key's construction site
//!   and enforced entirely at compile time
//! - **Identity-keyed**: every key is unique; two keys with the same display
//!   name are still different keys
//! - **Policy-driven**: what happens on a miss or a conflict is a closed,
//!   named choice ([`OnConflict`], [`OnMiss`]), not a pile of booleans
//! - **No machinery**: no macros and no locks; a plain single-threaded
//!   value you can embed anywhere
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_tokenmap::{Key, TokenMap};
//!
//! // Each key carries the type of value it may be paired with.
//! let name: Key<String> = Key::new("NAME");
//! let age: Key<u32> = Key::new("AGE");
//!
//! let mut map = TokenMap::new();
//! map.set(&name, "Rock".to_string()).set(&age, 42);
//!
//! // Retrieval is fully typed; no casting anywhere.
//! assert_eq!(map.get(&name).map(String::as_str), Some("Rock"));
//! assert_eq!(map.get(&age), Some(&42));
//! assert!(map.has(&name));
//!
//! map.remove(&name);
//! assert!(!map.has(&name));
//! assert_eq!(map.get(&age), Some(&42));
//! ```
//!
//! ### Choosing Miss and Conflict Behavior
//!
//! [`get`](TokenMap::get) answers a miss with `None`; use
//! [`try_get`](TokenMap::try_get) where a miss is a bug. For `set`, the
//! conflict policy travels as a value:
//!
//! ```rust
//! use sovran_tokenmap::{Key, MapError, OnConflict, TokenMap};
//!
//! let endpoint: Key<String> = Key::new("endpoint");
//! let mut map = TokenMap::new();
//!
//! map.set(&endpoint, "https://a.example".to_string());
//!
//! // A second registration is a conflict; make it loud.
//! match map.set_with(&endpoint, "https://b.example".to_string(), OnConflict::Fail) {
//!     Ok(_) => println!("registered"),
//!     Err(MapError::Conflict { existing, .. }) => {
//!         println!("endpoint already registered as {}", existing);
//!     }
//!     Err(e) => println!("unexpected: {}", e),
//! }
//!
//! // The failed set left the original in place.
//! assert_eq!(
//!     map.get(&endpoint).map(String::as_str),
//!     Some("https://a.example")
//! );
//! ```
//!
//! ### Keys as Statics
//!
//! Keys are usually declared once, next to the type they carry, and shared
//! across the codebase:
//!
//! ```rust
//! use std::sync::LazyLock;
//! use sovran_tokenmap::{Key, MapError, TokenMap};
//!
//! static CONFIG: LazyLock<Key<Config>> = LazyLock::new(|| Key::new("CONFIG"));
//! static STARTED: LazyLock<Key<bool>> = LazyLock::new(|| Key::new("STARTED"));
//!
//! struct Config {
//!     verbose: bool,
//! }
//!
//! struct App {
//!     context: TokenMap,
//! }
//!
//! impl App {
//!     fn new() -> Self {
//!         let mut context = TokenMap::new();
//!         context.set(&CONFIG, Config { verbose: true });
//!         Self { context }
//!     }
//!
//!     fn start(&mut self) -> Result<(), MapError> {
//!         self.context.set(&STARTED, true);
//!         let config = self.context.try_get(&CONFIG)?;
//!         if config.verbose {
//!             println!("starting up");
//!         }
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), MapError> {
//!     let mut app = App::new();
//!     app.start()?;
//!     assert!(app.context.has(&STARTED));
//!     Ok(())
//! }
//! ```
//!
//! ### Compile-Time Safety
//!
//! The phantom parameter is the whole contract: a value of the wrong type
//! doesn't fail at runtime, it fails to build.
//!
//! ```compile_fail
//! use sovran_tokenmap::{Key, TokenMap};
//!
//! let age: Key<u32> = Key::new("AGE");
//! let mut map = TokenMap::new();
//! map.set(&age, "not a number"); // `&str` is not `u32`
//! ```
//!
//! At runtime a key is nothing but an identity; the map never validates
//! values against it. Callers who genuinely want an untyped slot can say
//! so with `Key<Box<dyn Any + Send + Sync>>`.
//!
//! ## Concurrency
//!
//! `TokenMap` holds no lock and spawns nothing; every operation completes
//! immediately. It is `Send + Sync` (values are required to be), so an
//! embedding system that shares one map across threads wraps it in its own
//! `Mutex` or `RwLock`; serialization of access belongs to the embedder,
//! not the container. If you want a container that locks internally and
//! checks types at runtime instead, that's `sovran-typemap`.

mod error;
mod key;
mod map;

pub use error::MapError;
pub use key::Key;
pub use map::{OnConflict, OnMiss, TokenMap};

// Re-export std::any for convenience
pub use std::any::Any;
