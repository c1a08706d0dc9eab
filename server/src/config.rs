//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while building the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required env var {var}")]
    Missing { var: &'static str },

    /// A variable is set but its value cannot be used.
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    /// The outbound HTTP client could not be constructed.
    #[error("http client build failed: {0}")]
    HttpClient(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Backend origin without a trailing slash, e.g. `https://api.answer24.nl`.
    pub backend_url: String,
    pub timeouts: BackendTimeouts,
    pub cors_permissive: bool,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Required:
    /// - `BACKEND_URL`: `http` or `https` origin of the answer24 backend
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BACKEND_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BACKEND_CONNECT_TIMEOUT_SECS`: default 10
    /// - `CORS_PERMISSIVE`: default on
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `BACKEND_URL` is missing or not an
    /// http(s) URL, or when `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::Invalid { var: "PORT", reason: e.to_string() })?,
            None => DEFAULT_PORT,
        };

        let backend_url = parse_backend_url(lookup("BACKEND_URL").as_deref())?;

        let timeouts = BackendTimeouts {
            request_secs: parse_u64(lookup("BACKEND_REQUEST_TIMEOUT_SECS").as_deref(), DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("BACKEND_CONNECT_TIMEOUT_SECS").as_deref(), DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS),
        };

        let cors_permissive = lookup("CORS_PERMISSIVE")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(true);

        Ok(Self { port, backend_url, timeouts, cors_permissive })
    }
}

fn parse_backend_url(raw: Option<&str>) -> Result<String, ConfigError> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty()).ok_or(ConfigError::Missing { var: "BACKEND_URL" })?;
    let url = raw.trim_end_matches('/');
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| ConfigError::Invalid { var: "BACKEND_URL", reason: "expected an http or https URL".into() })?;
    if rest.is_empty() {
        return Err(ConfigError::Invalid { var: "BACKEND_URL", reason: "missing host".into() });
    }
    Ok(url.to_string())
}

fn parse_u64(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
