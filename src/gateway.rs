//! Request and response descriptors exchanged with the dispatcher.
//!
//! Under Lambda both sides are sourced from `lambda_http`: the request from
//! the API Gateway REST proxy event it decodes (including base64 bodies), the
//! response back into the proxy result it encodes.

use std::collections::HashMap;

use lambda_http::http::header::CONTENT_TYPE;
use lambda_http::request::RequestContext;
use lambda_http::{Body, Request, RequestExt, Response};
use serde::Serialize;

use crate::error::DispatchError;

/// The parts of an HTTP request the dispatcher routes on
#[derive(Debug, Clone, Default)]
pub struct GatewayRequest {
    pub http_method: String,
    /// Route template such as `/notes/{id}`, not the concrete path
    pub resource: Option<String>,
    pub body: Option<String>,
    pub path_parameters: Option<HashMap<String, String>>,
}

impl GatewayRequest {
    /// Build from a request decoded by `lambda_http`
    ///
    /// `resource` comes from the REST API request context. Other event sources
    /// carry no route template and fall through to the unsupported route.
    pub fn from_lambda(request: &Request) -> Result<Self, DispatchError> {
        let resource = match request.request_context_ref() {
            Some(RequestContext::ApiGatewayV1(context)) => context.resource_path.clone(),
            _ => None,
        };

        let path_parameters = request.path_parameters_ref().map(|params| {
            params
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect()
        });

        let body = match request.body() {
            Body::Empty => None,
            Body::Text(text) => Some(text.clone()),
            Body::Binary(bytes) => Some(
                String::from_utf8(bytes.clone())
                    .map_err(|_| DispatchError::InvalidBody("body is not valid UTF-8".to_string()))?,
            ),
        };

        Ok(Self {
            http_method: request.method().as_str().to_string(),
            resource,
            body,
            path_parameters,
        })
    }

    /// Look up a path parameter, treating an empty value as absent
    pub fn path_parameter(&self, key: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
impl GatewayRequest {
    pub fn new(http_method: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            resource: Some(resource.into()),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_path_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// A status code and a JSON-encoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status_code: u16,
    pub body: String,
}

impl GatewayResponse {
    /// Serialize `body` as JSON under the given status
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status_code,
            body: serde_json::to_string(body)?,
        })
    }

    /// A 400 response with an `{"error": ...}` body
    pub fn bad_request(error: &str) -> Self {
        Self {
            status_code: 400,
            body: serde_json::json!({ "error": error }).to_string(),
        }
    }

    /// Convert into the response `lambda_http` encodes as the proxy result
    pub fn into_lambda(self) -> Result<Response<Body>, lambda_http::http::Error> {
        Response::builder()
            .status(self.status_code)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::Text(self.body))
    }
}
