//! Storage crate: the key-value contract the bot's state lives in, and typed stores on top of it.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`kv`] – `KvStore` trait (get / put with TTL / list by prefix / delete)
//! - [`memory_kv`] – In-process TTL store (tests, single-instance deployments)
//! - [`sqlite_kv`] – SQLite-backed store with atomic conditional writes
//! - [`sqlite_pool`] – SqlitePoolManager
//! - [`models`] – PhotoEntry, ChecklistItem, BrainNote
//! - [`prefs`] – Per-user preferences, each field independently keyed and TTL'd
//! - [`photo_memory`] – Bounded newest-first photo memory
//! - [`checklist`] – Monotonically id'd checklist document
//! - [`brain`] – Notes for retrieval-augmented answers

mod brain;
mod checklist;
mod error;
mod kv;
mod memory_kv;
mod models;
mod photo_memory;
mod prefs;
mod sqlite_kv;
mod sqlite_pool;


pub use brain::BrainStore;
pub use checklist::{ChecklistStore, EMPTY_CHECKLIST_TEXT};
pub use error::StorageError;
pub use kv::KvStore;
pub use memory_kv::InMemoryKv;
pub use models::{BrainNote, ChecklistItem, NoteSource, PhotoEntry};
pub use photo_memory::{PhotoMemoryStore, PHOTO_MEMORY_LIMIT};
pub use prefs::{UserPrefs, UserPrefsStore};
pub use sqlite_kv::SqliteKv;
pub use sqlite_pool::SqlitePoolManager;
