use crate::error::DispatchError;
use crate::gateway::GatewayResponse;
use crate::store::NoteStore;

/// GET /notes - Return every stored note
///
/// Issues a single unfiltered scan; there is no pagination and no ordering
/// guarantee.
pub async fn list_notes(store: &dyn NoteStore) -> Result<GatewayResponse, DispatchError> {
    let notes = store.scan().await?;

    tracing::info!("Listed {} notes", notes.len());
    Ok(GatewayResponse::json(200, &notes)?)
}
