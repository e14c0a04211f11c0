use serde_json::{Map, Value as JsonValue};

use crate::error::DispatchError;
use crate::gateway::GatewayResponse;
use crate::models::{CreateNoteResponse, Note};
use crate::store::NoteStore;

pub const NOTE_CREATED: &str = "Note created";

/// POST /notes - Store a new note built from the request body
///
/// The body must be a JSON object; its optional `text` field becomes the note
/// text. A missing body is treated as `{}`.
pub async fn create_note(
    store: &dyn NoteStore,
    body: Option<&str>,
) -> Result<GatewayResponse, DispatchError> {
    let text = parse_text(body)?;
    let note = Note::new(text);

    store.put(&note).await?;

    tracing::info!("Created note with id: {}", note.id);
    Ok(GatewayResponse::json(
        201,
        &CreateNoteResponse {
            message: NOTE_CREATED.to_string(),
            id: note.id,
        },
    )?)
}

fn parse_text(body: Option<&str>) -> Result<String, DispatchError> {
    let Some(body) = body else {
        return Ok(String::new());
    };

    let fields: Map<String, JsonValue> = serde_json::from_str(body)?;

    match fields.get("text") {
        None | Some(JsonValue::Null) => Ok(String::new()),
        Some(JsonValue::String(text)) => Ok(text.clone()),
        Some(other) => Err(DispatchError::InvalidBody(format!(
            "text must be a string, got {}",
            other
        ))),
    }
}
