use std::sync::Arc;

use crate::error::DispatchError;
use crate::gateway::{GatewayRequest, GatewayResponse};
use crate::handlers::{create_note, delete_note, list_notes};
use crate::routes::Route;
use crate::store::NoteStore;

pub const UNSUPPORTED_ROUTE: &str = "Unsupported method or path";

/// Routes gateway requests to note operations against an injected store
///
/// Holds no per-request state; one dispatcher serves every invocation for the
/// lifetime of the process.
#[derive(Clone)]
pub struct NoteDispatcher {
    store: Arc<dyn NoteStore>,
}

impl NoteDispatcher {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// Handle a single request
    ///
    /// Validation and routing failures come back as 400 responses. A malformed
    /// create body or a failed store call is returned as `DispatchError`.
    pub async fn handle(&self, request: GatewayRequest) -> Result<GatewayResponse, DispatchError> {
        let route = Route::resolve(&request.http_method, request.resource.as_deref());
        tracing::debug!(
            "Dispatching {} {:?} to {:?}",
            request.http_method,
            request.resource,
            route
        );

        match route {
            Route::CreateNote => create_note(self.store.as_ref(), request.body.as_deref()).await,
            Route::ListNotes => list_notes(self.store.as_ref()).await,
            Route::DeleteNote => {
                delete_note(self.store.as_ref(), request.path_parameter("id")).await
            }
            Route::Unsupported => {
                tracing::warn!(
                    "Unsupported method or path: {} {:?}",
                    request.http_method,
                    request.resource
                );
                Ok(GatewayResponse::bad_request(UNSUPPORTED_ROUTE))
            }
        }
    }
}
