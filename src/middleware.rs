//! Request ID middleware for correlating logs with requests.
//!
//! Each request gets an id: the caller's `x-request-id` header when it is a
//! usable value, otherwise a fresh UUID v4. A tracing span carrying the id wraps
//! the whole request lifecycle, and the id is echoed back on the response.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use http::HeaderValue;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{MAX_REQUEST_ID_LEN, REQUEST_ID_HEADER};

/// Reuse the inbound id only if it is short, non-empty visible ASCII.
fn inbound_request_id(request: &Request) -> Option<String> {
    let value = request.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    let valid = !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|b| b.is_ascii_graphic());
    valid.then(|| value.to_string())
}

/// Middleware that assigns a request ID and creates a request span.
///
/// This should be the outermost layer so the span also covers the framework's
/// own 404/405 responses.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let request_id = inbound_request_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        // Both id sources are visible ASCII, so this conversion cannot fail in practice.
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_id(id: &str) -> Request {
        http::Request::builder()
            .uri("/")
            .header(REQUEST_ID_HEADER, id)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn inbound_id_is_reused() {
        let request = request_with_id("abc-123");
        assert_eq!(inbound_request_id(&request).as_deref(), Some("abc-123"));
    }

    #[test]
    fn missing_id_is_none() {
        let request = http::Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(inbound_request_id(&request), None);
    }

    #[test]
    fn oversized_or_spaced_ids_are_ignored() {
        let long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        assert_eq!(inbound_request_id(&request_with_id(&long)), None);
        assert_eq!(inbound_request_id(&request_with_id("has space")), None);
        assert_eq!(inbound_request_id(&request_with_id("")), None);
    }
}
