use crate::error::DispatchError;
use crate::gateway::GatewayResponse;
use crate::models::MessageResponse;
use crate::store::NoteStore;

pub const NOTE_ID_REQUIRED: &str = "Note ID is required in the path";

/// DELETE /notes/{id} - Remove a note by id
///
/// The delete is unconditional: an id that was never stored still yields 200.
/// A missing or empty id is rejected before the store is touched.
pub async fn delete_note(
    store: &dyn NoteStore,
    id: Option<&str>,
) -> Result<GatewayResponse, DispatchError> {
    let Some(id) = id.filter(|id| !id.is_empty()) else {
        tracing::warn!("Delete rejected: no note id in path");
        return Ok(GatewayResponse::bad_request(NOTE_ID_REQUIRED));
    };

    store.delete(id).await?;

    tracing::info!("Deleted note with id: {}", id);
    Ok(GatewayResponse::json(
        200,
        &MessageResponse {
            message: format!("Note {} deleted", id),
        },
    )?)
}
