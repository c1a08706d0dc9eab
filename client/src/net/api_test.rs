use super::*;

#[test]
fn bearer_formats_header_value() {
    assert_eq!(bearer("abc123"), "Bearer abc123");
}

// =============================================================
// parse_auth_response
// =============================================================

#[test]
fn auth_success_yields_payload() {
    let body = r#"{"success": true, "message": "Welcome", "data": {"user": {"id": "1", "name": "Ann"}, "token": "abc123"}}"#;
    let payload = parse_auth_response(200, body).unwrap();
    assert_eq!(payload.token, "abc123");
    assert_eq!(payload.user.id().as_deref(), Some("1"));
    assert_eq!(payload.user.name(), Some("Ann"));
}

#[test]
fn auth_rejection_carries_backend_message() {
    let body = r#"{"success": false, "message": "Invalid credentials", "data": null}"#;
    assert_eq!(parse_auth_response(422, body), Err(AuthApiError::Rejected("Invalid credentials".to_owned())));
}

#[test]
fn auth_rejection_without_message_mentions_status() {
    let body = r#"{"success": false}"#;
    assert_eq!(parse_auth_response(400, body), Err(AuthApiError::Rejected("request rejected (400)".to_owned())));
}

#[test]
fn auth_blank_token_is_missing_token() {
    let body = r#"{"success": true, "message": "", "data": {"user": {"id": "1"}, "token": "  "}}"#;
    assert_eq!(parse_auth_response(200, body), Err(AuthApiError::MissingToken));
}

#[test]
fn auth_null_or_absent_token_is_missing_token() {
    let null_token = r#"{"success": true, "data": {"user": {"id": "1"}, "token": null}}"#;
    let no_token = r#"{"success": true, "data": {"user": {"id": "1"}}}"#;
    let no_data = r#"{"success": true, "message": "ok"}"#;
    assert_eq!(parse_auth_response(200, null_token), Err(AuthApiError::MissingToken));
    assert_eq!(parse_auth_response(200, no_token), Err(AuthApiError::MissingToken));
    assert_eq!(parse_auth_response(200, no_data), Err(AuthApiError::MissingToken));
}

#[test]
fn auth_non_envelope_error_body_reports_status() {
    assert_eq!(parse_auth_response(502, "<html>Bad Gateway</html>"), Err(AuthApiError::Status(502)));
}

#[test]
fn auth_non_envelope_success_body_is_malformed() {
    assert!(matches!(parse_auth_response(200, "not json"), Err(AuthApiError::Malformed(_))));
}

#[test]
fn auth_401_is_unauthorized() {
    let body = r#"{"success": false, "message": "Unauthenticated."}"#;
    assert_eq!(parse_auth_response(401, body), Err(AuthApiError::Unauthorized));
}

// =============================================================
// parse_profile_response
// =============================================================

#[test]
fn profile_success_yields_user() {
    let body = r#"{"success": true, "data": {"id": 7, "email": "ann@example.com", "role": "customer", "plan": "gold"}}"#;
    let user = parse_profile_response(200, body).unwrap();
    assert_eq!(user.id().as_deref(), Some("7"));
    assert_eq!(user.role(), Some("customer"));
    assert_eq!(serde_json::to_value(&user).unwrap()["plan"], "gold");
}

#[test]
fn auth_success_accepts_structured_profile_fields() {
    let body = r#"{"success": true, "data": {"token": "abc123", "user": {"uuid": "u-1", "name": "Ann", "role": {"slug": "customer"}}}}"#;
    let payload = parse_auth_response(200, body).unwrap();
    assert_eq!(payload.token, "abc123");
    assert_eq!(payload.user.id(), None);
    assert_eq!(payload.user.role(), None);
    assert_eq!(serde_json::to_value(&payload.user).unwrap()["role"]["slug"], "customer");
}

#[test]
fn profile_401_is_unauthorized_even_without_body() {
    assert_eq!(parse_profile_response(401, ""), Err(AuthApiError::Unauthorized));
}

#[test]
fn profile_success_without_data_is_malformed() {
    assert!(matches!(parse_profile_response(200, r#"{"success": true}"#), Err(AuthApiError::Malformed(_))));
}

#[test]
fn error_messages_are_human_readable() {
    assert_eq!(AuthApiError::Status(500).to_string(), "backend returned status 500");
    assert_eq!(AuthApiError::Rejected("Email taken".to_owned()).to_string(), "Email taken");
    assert_eq!(AuthApiError::Unavailable.to_string(), "not available on server");
}
