use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use super::NoteStore;
use crate::config::Config;
use crate::models::Note;

const ATTR_ID: &str = "id";
const ATTR_TEXT: &str = "text";
const ATTR_CREATED_AT: &str = "createdAt";

/// Note store backed by a single DynamoDB table keyed on `id`
#[derive(Clone)]
pub struct DynamoDbNoteStore {
    client: Client,
    table_name: String,
}

impl DynamoDbNoteStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Create a store using the default AWS credential chain
    ///
    /// When `AWS_ENDPOINT_URL` is configured the client talks to that endpoint
    /// instead, which is how DynamoDB Local is reached during development.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(endpoint) = &config.dynamodb_endpoint {
            tracing::info!("Connecting to DynamoDB at: {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        } else {
            tracing::info!("Connecting to AWS DynamoDB");
        }

        let sdk_config = loader.load().await;
        let client = Client::new(&sdk_config);

        tracing::info!("Using DynamoDB table: {}", config.table_name);

        Ok(Self::new(client, config.table_name.clone()))
    }
}

#[async_trait]
impl NoteStore for DynamoDbNoteStore {
    async fn put(&self, note: &Note) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(note_to_item(note)))
            .send()
            .await
            .with_context(|| format!("Failed to put note {} into {}", note.id, self.table_name))?;

        tracing::debug!("Put note with id: {}", note.id);
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Note>> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .with_context(|| format!("Failed to scan {}", self.table_name))?;

        let notes = output
            .items
            .unwrap_or_default()
            .iter()
            .map(item_to_note)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Scanned {} notes", notes.len());
        Ok(notes)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, AttributeValue::S(id.to_string()))
            .send()
            .await
            .with_context(|| format!("Failed to delete note {} from {}", id, self.table_name))?;

        tracing::debug!("Deleted note with id: {}", id);
        Ok(())
    }
}

fn note_to_item(note: &Note) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (ATTR_ID.to_string(), AttributeValue::S(note.id.clone())),
        (ATTR_TEXT.to_string(), AttributeValue::S(note.text.clone())),
        (ATTR_CREATED_AT.to_string(), AttributeValue::S(note.created_at.clone())),
    ])
}

fn item_to_note(item: &HashMap<String, AttributeValue>) -> Result<Note> {
    Ok(Note {
        id: get_string(item, ATTR_ID)?,
        text: get_text(item)?,
        created_at: get_string(item, ATTR_CREATED_AT)?,
    })
}

/// `text` may have been written as a NULL attribute for `{"text": null}`
fn get_text(item: &HashMap<String, AttributeValue>) -> Result<String> {
    match item.get(ATTR_TEXT) {
        Some(AttributeValue::Null(true)) => Ok(String::new()),
        _ => get_string(item, ATTR_TEXT),
    }
}

fn get_string(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| anyhow!("Missing or invalid string attribute: {}", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RunMode, StoreBackend};

    #[test]
    fn test_note_item_conversion() {
        let note = Note::new("remember the milk");

        let item = note_to_item(&note);
        assert_eq!(item.len(), 3);
        assert_eq!(item.get("id"), Some(&AttributeValue::S(note.id.clone())));
        assert_eq!(
            item.get("createdAt"),
            Some(&AttributeValue::S(note.created_at.clone()))
        );

        assert_eq!(item_to_note(&item).unwrap(), note);
    }

    #[test]
    fn test_item_missing_attribute() {
        let mut item = note_to_item(&Note::new("x"));
        item.remove("createdAt");

        let err = item_to_note(&item).unwrap_err();
        assert!(err.to_string().contains("createdAt"));
    }

    #[test]
    fn test_item_with_non_string_attribute() {
        let mut item = note_to_item(&Note::new("x"));
        item.insert("text".to_string(), AttributeValue::N("42".to_string()));

        let err = item_to_note(&item).unwrap_err();
        assert!(err.to_string().contains("text"));
    }

    #[test]
    fn test_item_with_null_text_reads_as_empty() {
        let note = Note::new("x");
        let mut item = note_to_item(&note);
        item.insert("text".to_string(), AttributeValue::Null(true));

        let read = item_to_note(&item).unwrap();
        assert_eq!(read.id, note.id);
        assert_eq!(read.text, "");
        assert_eq!(read.created_at, note.created_at);
    }

    /// Requires DynamoDB Local with a `Notes` table, e.g.
    /// `AWS_ENDPOINT_URL=http://localhost:8000 cargo test -- --ignored`
    #[tokio::test]
    #[ignore]
    async fn test_put_scan_delete_against_dynamodb_local() {
        let config = Config {
            table_name: "Notes".to_string(),
            store_backend: StoreBackend::DynamoDb,
            dynamodb_endpoint: std::env::var("AWS_ENDPOINT_URL").ok(),
            run_mode: RunMode::Local,
            service_port: 3000,
            service_host: "0.0.0.0".to_string(),
        };

        let store = DynamoDbNoteStore::from_config(&config)
            .await
            .expect("Failed to create DynamoDB client");

        let note = Note::new("integration");
        store.put(&note).await.unwrap();

        let notes = store.scan().await.unwrap();
        assert!(notes.contains(&note));

        store.delete(&note.id).await.unwrap();
        let notes = store.scan().await.unwrap();
        assert!(!notes.iter().any(|n| n.id == note.id));
    }
}
