//! Device-local persistence for the game.
//!
//! The only capability the rest of the workspace needs is a tiny key-value
//! store; `repository` defines it and `sqlite` provides the on-disk backend.
#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
