//! `/api` reverse proxy to the answer24 backend.
//!
//! The browser only ever talks to this origin. Requests under `/api/` are
//! replayed against `BACKEND_URL` with the same method, path, query string
//! and body. Only an allow-list of request headers travels upstream; the
//! upstream status, body and content type come back unchanged.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures (refused connection, timeout, truncated body) answer
//! `502 Bad Gateway` with the backend's own envelope shape so the client
//! decodes them like any other rejection.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Request headers forwarded upstream. Everything else (cookies, host,
/// hop-by-hop headers) stays at the edge.
pub const FORWARDED_REQUEST_HEADERS: [HeaderName; 4] =
    [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT, header::ACCEPT_LANGUAGE];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("backend timed out")]
    Timeout,
    #[error("backend response unreadable: {0}")]
    BadResponse(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "message": self.to_string(),
            "data": null,
        });
        (StatusCode::BAD_GATEWAY, Json(body)).into_response()
    }
}

/// Upstream URL for an incoming `/api/...` request.
pub(crate) fn upstream_url(backend_url: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
    format!("{backend_url}{path_and_query}")
}

/// Copy the allow-listed headers from an incoming request.
pub(crate) fn forwarded_headers(incoming: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in &FORWARDED_REQUEST_HEADERS {
        for value in incoming.get_all(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// `ANY /api/{*path}`: forward to the backend and relay its answer.
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let url = upstream_url(&state.config.backend_url, &uri);

    let mut request = state
        .http
        .request(method.clone(), &url)
        .headers(forwarded_headers(&headers));
    if !body.is_empty() {
        request = request.body(body);
    }

    let upstream = request.send().await.map_err(|e| {
        tracing::error!(%method, path = uri.path(), error = %e, "backend request failed");
        if e.is_timeout() { ProxyError::Timeout } else { ProxyError::Unreachable(e.to_string()) }
    })?;

    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = upstream.bytes().await.map_err(|e| {
        tracing::error!(%method, path = uri.path(), error = %e, "backend response read failed");
        if e.is_timeout() { ProxyError::Timeout } else { ProxyError::BadResponse(e.to_string()) }
    })?;

    if !status.is_success() {
        tracing::debug!(%method, path = uri.path(), status = status.as_u16(), "backend returned non-success");
    }

    let mut response = (status, bytes).into_response();
    match content_type {
        Some(content_type) => {
            response.headers_mut().insert(header::CONTENT_TYPE, content_type);
        }
        None => {
            response.headers_mut().remove(header::CONTENT_TYPE);
        }
    }
    Ok(response)
}
