//! Key-value storage for notes.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{Config, StoreBackend};
use crate::models::Note;

mod dynamodb;
mod memory;

pub use dynamodb::DynamoDbNoteStore;
pub use memory::InMemoryNoteStore;

/// Put/scan/delete-by-key access to the notes table
///
/// Implementations must be safe to share across concurrent invocations; no
/// ordering or transactional guarantees are expected beyond what the backing
/// store provides.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Unconditionally write a note, replacing any item with the same id
    async fn put(&self, note: &Note) -> Result<()>;

    /// Return every stored note in whatever order the store yields them
    async fn scan(&self) -> Result<Vec<Note>>;

    /// Remove the note with the given id; a missing id is not an error
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Build the store selected by configuration
pub async fn from_config(config: &Config) -> Result<Arc<dyn NoteStore>> {
    match config.store_backend {
        StoreBackend::DynamoDb => Ok(Arc::new(DynamoDbNoteStore::from_config(config).await?)),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory note store, data will not persist");
            Ok(Arc::new(InMemoryNoteStore::new()))
        }
    }
}
