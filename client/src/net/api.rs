//! REST calls to the answer24 auth endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` to same-origin
//! `/api/...` routes, which the server proxies to the backend.
//! Server-side (SSR): stubs returning `AuthApiError::Unavailable`.
//!
//! ERROR HANDLING
//! ==============
//! Response bodies are decoded by the pure `parse_*` helpers so envelope
//! handling is testable without a browser. A `success: false` envelope is a
//! rejection carrying the backend's message; a 401 is always `Unauthorized`
//! so callers can drop the stored session.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::types::{ApiEnvelope, AuthPayload, LoginRequest, RegisterRequest, User};

pub const LOGIN_ENDPOINT: &str = "/api/login";
pub const REGISTER_ENDPOINT: &str = "/api/register";
pub const PROFILE_ENDPOINT: &str = "/api/profile";
pub const LOGOUT_ENDPOINT: &str = "/api/logout";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("session rejected by backend")]
    Unauthorized,
    #[error("backend returned status {0}")]
    Status(u16),
    #[error("{0}")]
    Rejected(String),
    #[error("response did not include a session token")]
    MissingToken,
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("not available on server")]
    Unavailable,
}

/// `Authorization` header value for `token`.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Decode a login/registration response into a session payload.
///
/// # Errors
///
/// Fails on rejection envelopes, non-2xx bodies that are not envelopes, and
/// payloads whose token is missing or blank.
pub fn parse_auth_response(status: u16, body: &str) -> Result<AuthPayload, AuthApiError> {
    let payload = decode_envelope::<AuthPayload>(status, body).map_err(|e| match e {
        AuthApiError::Malformed(_) if looks_like_success_without_token(body) => AuthApiError::MissingToken,
        other => other,
    })?;
    let Some(payload) = payload else {
        return Err(AuthApiError::MissingToken);
    };
    if payload.token.trim().is_empty() {
        return Err(AuthApiError::MissingToken);
    }
    Ok(payload)
}

/// Decode a profile response into a user record.
///
/// # Errors
///
/// Fails on 401, rejection envelopes, and success envelopes without `data`.
pub fn parse_profile_response(status: u16, body: &str) -> Result<User, AuthApiError> {
    decode_envelope::<User>(status, body)?
        .ok_or_else(|| AuthApiError::Malformed("profile response has no data".to_owned()))
}

fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, AuthApiError> {
    if status == 401 {
        return Err(AuthApiError::Unauthorized);
    }
    let ok_status = (200..300).contains(&status);
    match serde_json::from_str::<ApiEnvelope<T>>(body) {
        Ok(envelope) if envelope.success && ok_status => Ok(envelope.data),
        Ok(envelope) => Err(AuthApiError::Rejected(rejection_message(&envelope.message, status))),
        Err(_) if !ok_status => Err(AuthApiError::Status(status)),
        Err(e) => Err(AuthApiError::Malformed(e.to_string())),
    }
}

/// Success envelope whose `data` lacks a usable token (e.g. `"token": null`).
fn looks_like_success_without_token(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body).is_ok_and(|v| {
        v.get("success").and_then(serde_json::Value::as_bool) == Some(true)
            && v.get("data").and_then(|d| d.get("token")).and_then(serde_json::Value::as_str).is_none()
    })
}

fn rejection_message(message: &str, status: u16) -> String {
    let message = message.trim();
    if message.is_empty() { format!("request rejected ({status})") } else { message.to_owned() }
}

/// Exchange credentials for a session via `POST /api/login`.
///
/// # Errors
///
/// See [`parse_auth_response`]; transport failures map to `Transport`.
pub async fn login(request: &LoginRequest) -> Result<AuthPayload, AuthApiError> {
    #[cfg(feature = "hydrate")]
    {
        let (status, body) = post_json(LOGIN_ENDPOINT, request).await?;
        parse_auth_response(status, &body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(AuthApiError::Unavailable)
    }
}

/// Create an account and session via `POST /api/register`.
///
/// # Errors
///
/// See [`parse_auth_response`].
pub async fn register(request: &RegisterRequest) -> Result<AuthPayload, AuthApiError> {
    #[cfg(feature = "hydrate")]
    {
        let (status, body) = post_json(REGISTER_ENDPOINT, request).await?;
        parse_auth_response(status, &body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(AuthApiError::Unavailable)
    }
}

/// Fetch the current user's profile via `GET /api/profile`.
///
/// # Errors
///
/// `Unauthorized` when the backend no longer accepts `token`.
pub async fn fetch_profile(token: &str) -> Result<User, AuthApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(PROFILE_ENDPOINT)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| AuthApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| AuthApiError::Transport(e.to_string()))?;
        parse_profile_response(status, &body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err(AuthApiError::Unavailable)
    }
}

/// Tell the backend to revoke `token` via `POST /api/logout`. Best effort.
pub async fn logout(token: &str) {
    #[cfg(feature = "hydrate")]
    {
        let result = gloo_net::http::Request::post(LOGOUT_ENDPOINT)
            .header("Authorization", &bearer(token))
            .send()
            .await;
        if let Err(e) = result {
            log::warn!("logout request failed: {e}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
    }
}

#[cfg(feature = "hydrate")]
async fn post_json<T: serde::Serialize>(url: &str, payload: &T) -> Result<(u16, String), AuthApiError> {
    let resp = gloo_net::http::Request::post(url)
        .json(payload)
        .map_err(|e| AuthApiError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| AuthApiError::Transport(e.to_string()))?;
    let status = resp.status();
    let body = resp.text().await.map_err(|e| AuthApiError::Transport(e.to_string()))?;
    Ok((status, body))
}
