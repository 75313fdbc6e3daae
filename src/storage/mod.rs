//! Key-value persistence for the durable session state.

mod error;
mod persistence;
mod store;

pub use error::StorageError;
pub use persistence::{STORAGE_KEY, StatePersistence};
pub use store::{FileStore, KeyValueStore, MemoryStore};
