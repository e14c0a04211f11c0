//! Local HTTP server.
//!
//! Serves the dispatcher outside Lambda by rebuilding the request descriptor
//! API Gateway would have sent: the matched route template becomes `resource`
//! and captured segments become `pathParameters`.

use std::collections::HashMap;

use anyhow::{Context, Result};
use axum::{
    body::to_bytes,
    extract::{Path, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::dispatch::NoteDispatcher;
use crate::error::DispatchError;
use crate::gateway::{GatewayRequest, GatewayResponse};
use crate::routes;
use crate::state::AppState;

/// Largest request body the local server will read
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn router(dispatcher: NoteDispatcher) -> Router {
    Router::new()
        .route(routes::NOTES, any(notes_handler))
        .route(routes::NOTE_ITEM, any(note_item_handler))
        .fallback(unmatched_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { dispatcher })
}

pub async fn serve(config: &Config, dispatcher: NoteDispatcher) -> Result<()> {
    let addr = format!("{}:{}", config.service_host, config.service_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Local server listening on {}", addr);

    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Local server failed")?;

    tracing::info!("Local server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
}

/// ANY /notes
async fn notes_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, DispatchError> {
    forward(&state, Some(routes::NOTES), HashMap::new(), request).await
}

/// ANY /notes/{id}
async fn note_item_handler(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    request: Request,
) -> Result<Response, DispatchError> {
    forward(&state, Some(routes::NOTE_ITEM), params, request).await
}

/// Anything else reaches the dispatcher without a resource
async fn unmatched_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, DispatchError> {
    forward(&state, None, HashMap::new(), request).await
}

async fn forward(
    state: &AppState,
    resource: Option<&str>,
    path_parameters: HashMap<String, String>,
    request: Request,
) -> Result<Response, DispatchError> {
    let http_method = request.method().to_string();

    let bytes = to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|err| DispatchError::InvalidBody(format!("Failed to read body: {}", err)))?;
    let body = if bytes.is_empty() {
        None
    } else {
        Some(
            String::from_utf8(bytes.to_vec())
                .map_err(|_| DispatchError::InvalidBody("body is not valid UTF-8".to_string()))?,
        )
    };

    let gateway_request = GatewayRequest {
        http_method,
        resource: resource.map(str::to_string),
        body,
        path_parameters: Some(path_parameters),
    };

    let response = state.dispatcher.handle(gateway_request).await.inspect_err(|err| {
        tracing::error!("Request failed: {}", err);
    })?;

    Ok(into_http_response(response))
}

fn into_http_response(response: GatewayResponse) -> Response {
    let status = StatusCode::from_u16(response.status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorResponse;
    use crate::models::{CreateNoteResponse, MessageResponse, Note};
    use crate::store::{InMemoryNoteStore, NoteStore};
    use axum::body::{Body, Bytes};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn setup_test_app() -> (Router, InMemoryNoteStore) {
        let store = InMemoryNoteStore::new();
        let dispatcher = NoteDispatcher::new(Arc::new(store.clone()));
        (router(dispatcher), store)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Body) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn read_body(response: Response) -> Bytes {
        to_bytes(response.into_body(), usize::MAX).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_list_delete_flow() {
        let (app, store) = setup_test_app();

        let response = send(&app, "POST", "/notes", Body::from(r#"{"text":"from http"}"#)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let created: CreateNoteResponse = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(created.message, "Note created");

        let response = send(&app, "GET", "/notes", Body::empty()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let notes: Vec<Note> = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, created.id);
        assert_eq!(notes[0].text, "from http");

        let response = send(&app, "DELETE", &format!("/notes/{}", created.id), Body::empty()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let deleted: MessageResponse = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(deleted.message, format!("Note {} deleted", created.id));

        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_create_with_empty_body() {
        let (app, store) = setup_test_app();

        let response = send(&app, "POST", "/notes", Body::empty()).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let notes = store.scan().await.unwrap();
        assert_eq!(notes[0].text, "");
    }

    #[tokio::test]
    async fn test_unsupported_method_on_known_path() {
        let (app, _store) = setup_test_app();

        for (method, uri) in [("PUT", "/notes"), ("GET", "/notes/abc"), ("PATCH", "/notes/abc")] {
            let response = send(&app, method, uri, Body::empty()).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let error: ErrorResponse = serde_json::from_slice(&read_body(response).await).unwrap();
            assert_eq!(error.error, "Unsupported method or path");
        }
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let (app, _store) = setup_test_app();

        let response = send(&app, "GET", "/health", Body::empty()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ErrorResponse = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(error.error, "Unsupported method or path");
    }

    #[tokio::test]
    async fn test_delete_trailing_slash_is_unsupported() {
        let (app, _store) = setup_test_app();

        let response = send(&app, "DELETE", "/notes/", Body::empty()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_invalid_json() {
        let (app, store) = setup_test_app();

        let response = send(&app, "POST", "/notes", Body::from("{invalid json}")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ErrorResponse = serde_json::from_slice(&read_body(response).await).unwrap();
        assert!(error.error.contains("JSON parse error"));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_create_oversized_body_is_rejected() {
        let (app, store) = setup_test_app();

        let text = "x".repeat(MAX_BODY_BYTES);
        let body = serde_json::json!({ "text": text }).to_string();
        let response = send(&app, "POST", "/notes", Body::from(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ErrorResponse = serde_json::from_slice(&read_body(response).await).unwrap();
        assert!(error.error.contains("Failed to read body"));
        assert_eq!(store.len().await, 0);
    }
}
