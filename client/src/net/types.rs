//! Wire DTOs shared with the answer24 REST backend.
//!
//! DESIGN
//! ======
//! Every backend response uses the same `{ success, message, data }`
//! envelope. The user record stays an untyped JSON object with lenient
//! accessors, so a cached record survives a storage round trip exactly and a
//! profile shape the client does not expect never ends a session.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Standard backend response envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the backend accepted the request.
    pub success: bool,
    /// Human-readable status message, possibly empty.
    #[serde(default)]
    pub message: String,
    /// Response payload; absent on most failures.
    pub data: Option<T>,
}

/// Cached user profile paired with the session token.
///
/// Kept as the raw JSON object the backend sent. The typed accessors are
/// lenient: a missing or non-string value reads as `None`, and nothing is
/// dropped when the record is written back to storage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(Map<String, Value>);

impl User {
    /// Minimal record with only an id.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self::default().with("id", id.into())
    }

    /// Builder-style field insert, replacing any previous value.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_owned(), value.into());
        self
    }

    /// Backend user identifier. Numeric ids are rendered as strings.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    /// Tenant role (`customer`, `partner`, `admin`, ...) when sent as a string.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.str_field("role")
    }

    /// Name to show in UI chrome, falling back to email and then id.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name()
            .or(self.email())
            .map(str::to_owned)
            .or_else(|| self.id())
            .unwrap_or_default()
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// `data` payload of a successful login or registration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

/// Credentials for `POST /api/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /api/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
