use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn from_lookup_applies_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[("BACKEND_URL", "https://api.answer24.nl")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend_url, "https://api.answer24.nl");
    assert_eq!(
        cfg.timeouts,
        BackendTimeouts {
            request_secs: DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS,
        }
    );
    assert!(cfg.cors_permissive);
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("BACKEND_URL", "http://localhost:8000/"),
        ("BACKEND_REQUEST_TIMEOUT_SECS", "5"),
        ("BACKEND_CONNECT_TIMEOUT_SECS", "2"),
        ("CORS_PERMISSIVE", "off"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.backend_url, "http://localhost:8000");
    assert_eq!(cfg.timeouts, BackendTimeouts { request_secs: 5, connect_secs: 2 });
    assert!(!cfg.cors_permissive);
}

#[test]
fn from_lookup_requires_backend_url() {
    let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::Missing { var: "BACKEND_URL" }));

    let err = ServerConfig::from_lookup(lookup(&[("BACKEND_URL", "   ")])).unwrap_err();
    assert!(matches!(err, ConfigError::Missing { var: "BACKEND_URL" }));
}

#[test]
fn from_lookup_rejects_non_http_backend() {
    for bad in ["ftp://files.example", "api.answer24.nl", "https://"] {
        let err = ServerConfig::from_lookup(lookup(&[("BACKEND_URL", bad)])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "BACKEND_URL", .. }), "expected rejection for {bad:?}");
    }
}

#[test]
fn from_lookup_rejects_bad_port() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "http"), ("BACKEND_URL", "https://api.answer24.nl")])).unwrap_err();
    assert!(err.to_string().contains("PORT"));
}

#[test]
fn from_lookup_falls_back_on_unparseable_timeouts() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("BACKEND_URL", "https://api.answer24.nl"),
        ("BACKEND_REQUEST_TIMEOUT_SECS", "soon"),
    ]))
    .unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS);
}

#[test]
fn from_lookup_keeps_cors_default_on_unknown_flag() {
    let cfg = ServerConfig::from_lookup(lookup(&[("BACKEND_URL", "https://api.answer24.nl"), ("CORS_PERMISSIVE", "maybe")]))
        .unwrap();
    assert!(cfg.cors_permissive);
}

#[test]
fn from_env_reads_process_environment() {
    // Shares BACKEND_URL with no other test; the lookup-based tests never touch the process env.
    unsafe {
        std::env::set_var("BACKEND_URL", "https://env.answer24.test/");
        std::env::remove_var("PORT");
    }
    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.backend_url, "https://env.answer24.test");
    unsafe { std::env::remove_var("BACKEND_URL") };
}

#[test]
fn parse_bool_true_variants() {
    for val in ["1", "true", "yes", "on", "TRUE", " On "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
}

#[test]
fn parse_bool_false_variants() {
    for val in ["0", "false", "no", "off", "No"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
}

#[test]
fn parse_bool_unknown_is_none() {
    assert_eq!(parse_bool("maybe"), None);
    assert_eq!(parse_bool(""), None);
}
