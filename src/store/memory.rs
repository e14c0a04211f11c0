use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::NoteStore;
use crate::models::Note;

/// In-memory note store for local development and tests
///
/// Data lives in a `HashMap` behind `Arc<RwLock<_>>`; clones share the same
/// map and nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNoteStore {
    notes: Arc<RwLock<HashMap<String, Note>>>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notes
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn put(&self, note: &Note) -> Result<()> {
        let mut notes = self.notes.write().await;
        notes.insert(note.id.clone(), note.clone());
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Note>> {
        let notes = self.notes.read().await;
        Ok(notes.values().cloned().collect())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut notes = self.notes.write().await;
        notes.remove(id);
        Ok(())
    }
}
