use lambda_http::{service_fn, Body, Error, Request, RequestExt, Response};

use crate::dispatch::NoteDispatcher;
use crate::gateway::GatewayRequest;

/// Serve API Gateway proxy events through the Lambda runtime API
///
/// Dispatch errors are handed back to the runtime unchanged, so a malformed
/// body or a store failure surfaces as a failed invocation.
pub async fn run(dispatcher: NoteDispatcher) -> Result<(), Error> {
    let dispatcher = &dispatcher;

    lambda_http::run(service_fn(move |request: Request| async move {
        handle_request(dispatcher, request).await
    }))
    .await
}

async fn handle_request(
    dispatcher: &NoteDispatcher,
    request: Request,
) -> Result<Response<Body>, Error> {
    let request_id = request
        .lambda_context_ref()
        .map(|context| context.request_id.clone())
        .unwrap_or_else(|| "-".to_string());

    let gateway_request = GatewayRequest::from_lambda(&request)?;

    tracing::info!(
        request_id = %request_id,
        "{} {}",
        gateway_request.http_method,
        gateway_request.resource.as_deref().unwrap_or("-")
    );

    match dispatcher.handle(gateway_request).await {
        Ok(response) => {
            tracing::info!(request_id = %request_id, status = response.status_code, "Responded");
            Ok(response.into_lambda()?)
        }
        Err(err) => {
            tracing::error!(request_id = %request_id, "Invocation failed: {}", err);
            Err(err.into())
        }
    }
}
