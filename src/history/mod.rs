//! Persisted calculation history.
//!
//! Saved calculations live as a single JSON array under one storage key.
//! [`HistoryStore`] owns that key and exposes append, delete, clear, sorted
//! listing and search over it; the [`KeyValueStore`] trait abstracts the
//! storage substrate underneath.

mod backend;
mod sort;
mod store;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use sort::{SortDirection, SortKey, sort_items};
pub use store::HistoryStore;
