// Error responses for the HTTP API
use crate::application::weather_provider::ProviderError;
use crate::domain::location::QueryError;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Failed to build response")]
    Response(StatusCode),
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Query(e) => json_error(StatusCode::BAD_REQUEST, &e.to_string()),
            ApiError::Provider(ProviderError::MissingApiKey) => {
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Server missing OpenWeather API key")
            }
            ApiError::Provider(ProviderError::Upstream { status, body }) => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let body = if body.is_empty() {
                    "Upstream error".to_string()
                } else {
                    body
                };
                (status, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
            }
            ApiError::Provider(ProviderError::Transport(e)) => {
                tracing::error!("Proxy failure: {}", e);
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Proxy failure")
            }
            ApiError::Provider(ProviderError::Decode(e)) => {
                tracing::error!("Upstream payload could not be decoded: {}", e);
                json_error(StatusCode::BAD_GATEWAY, "Invalid upstream payload")
            }
            ApiError::MethodNotAllowed => {
                let mut response = json_error(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
                response
                    .headers_mut()
                    .insert(header::ALLOW, HeaderValue::from_static("GET"));
                response
            }
            ApiError::Response(status) => status.into_response(),
        }
    }
}
