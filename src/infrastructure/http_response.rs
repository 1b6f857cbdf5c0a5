// HTTP response utilities for JSON + optional Brotli encoding
use crate::application::weather_provider::RawPayload;
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, HeaderValue, Response, StatusCode},
};
use serde::Serialize;
use tokio::io::AsyncReadExt;

pub const PROXY_CACHE_CONTROL: &str = "s-maxage=300, stale-while-revalidate=3600";
pub const PROXY_ALLOW_METHODS: &str = "GET, OPTIONS";
const VARY: &str = "Accept-Encoding, Origin";
const JSON: &str = "application/json";

/// True when the client lists `br` in Accept-Encoding with a non-zero weight
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT_ENCODING)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(','))
        .any(|coding| {
            let mut parts = coding.split(';').map(str::trim);
            let name = parts.next().unwrap_or_default();
            name.eq_ignore_ascii_case("br") && quality(parts) > 0.0
        })
}

// Missing or unparsable q means 1
fn quality<'a>(params: impl Iterator<Item = &'a str>) -> f32 {
    params
        .filter_map(|p| p.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("q"))
        .and_then(|(_, value)| value.trim().parse::<f32>().ok())
        .unwrap_or(1.0)
}

async fn brotli(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = BrotliEncoder::new(data);
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

/// Build a response, Brotli-compressing the body when asked
async fn encoded_response(
    body: Vec<u8>,
    content_type: &str,
    compress: bool,
    extra_headers: &[(HeaderName, &'static str)],
) -> Result<Response<Body>, StatusCode> {
    let (body_bytes, content_encoding) = if compress {
        let compressed = brotli(&body).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!("Compressed {} -> {} bytes", body.len(), compressed.len());
        (compressed, Some("br"))
    } else {
        (body, None)
    };

    let content_type =
        HeaderValue::from_str(content_type).unwrap_or_else(|_| HeaderValue::from_static(JSON));

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, body_bytes.len())
        .header(header::VARY, VARY);

    if let Some(encoding) = content_encoding {
        response_builder = response_builder.header(header::CONTENT_ENCODING, encoding);
    }
    for (name, value) in extra_headers {
        response_builder = response_builder.header(name.clone(), *value);
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Serialize a view model to JSON with optional compression
pub async fn json_response<T: Serialize>(data: &T, compress: bool) -> Result<Response<Body>, StatusCode> {
    let body = serde_json::to_vec(data).map_err(|e| {
        tracing::error!("JSON serialization error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    encoded_response(body, JSON, compress, &[]).await
}

/// Relay an upstream body with the edge-cache headers the browser app relies on
pub async fn proxy_response(payload: RawPayload, compress: bool) -> Result<Response<Body>, StatusCode> {
    let content_type = payload.content_type.as_deref().unwrap_or(JSON).to_string();

    encoded_response(
        payload.body.into_bytes(),
        &content_type,
        compress,
        &[
            (header::CACHE_CONTROL, PROXY_CACHE_CONTROL),
            (header::ACCESS_CONTROL_ALLOW_METHODS, PROXY_ALLOW_METHODS),
        ],
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_compression::tokio::bufread::BrotliDecoder;

    async fn body_bytes(response: Response<Body>) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body")
            .to_vec()
    }

    #[test]
    fn test_accepts_brotli() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
        assert!(accepts_brotli(&headers));
    }

    #[test]
    fn test_accepts_brotli_honours_quality() {
        let accepts = |value: &'static str| {
            let mut headers = HeaderMap::new();
            headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static(value));
            accepts_brotli(&headers)
        };

        assert!(!accepts("br;q=0"));
        assert!(!accepts("gzip, br; q=0.0"));
        assert!(accepts("gzip;q=1.0, br;q=0.5"));
        assert!(accepts("BR"));
        assert!(!accepts("gzip, brotli-ish"));
        assert!(!accepts("identity"));
    }

    #[tokio::test]
    async fn test_json_response_uncompressed() {
        let response = json_response(&serde_json::json!({"ok": true}), false)
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
        assert_eq!(body_bytes(response).await, br#"{"ok":true}"#.to_vec());
    }

    #[tokio::test]
    async fn test_json_response_brotli_round_trip() {
        let data = serde_json::json!({"city": "Recife", "days": [1, 2, 3, 4, 5]});
        let response = json_response(&data, true).await.expect("response");
        assert_eq!(
            response.headers().get(header::CONTENT_ENCODING).and_then(|v| v.to_str().ok()),
            Some("br")
        );

        let compressed = body_bytes(response).await;
        let mut decoder = BrotliDecoder::new(compressed.as_slice());
        let mut decoded = Vec::new();
        decoder.read_to_end(&mut decoded).await.expect("decode");

        let parsed: serde_json::Value = serde_json::from_slice(&decoded).expect("json");
        assert_eq!(parsed, data);
    }

    #[tokio::test]
    async fn test_proxy_response_sets_cache_headers() {
        let payload = RawPayload {
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: r#"{"name":"Recife"}"#.to_string(),
        };
        let response = proxy_response(payload, false).await.expect("response");
        let headers = response.headers();

        assert_eq!(headers.get(header::CACHE_CONTROL).and_then(|v| v.to_str().ok()), Some(PROXY_CACHE_CONTROL));
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).and_then(|v| v.to_str().ok()),
            Some("GET, OPTIONS")
        );
        assert_eq!(headers.get(header::VARY).and_then(|v| v.to_str().ok()), Some("Accept-Encoding, Origin"));
        assert_eq!(
            headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json; charset=utf-8")
        );
    }
}
