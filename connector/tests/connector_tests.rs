/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use connector::*;
use console::{AssignmentBackend, BackendError};
use reqwest::StatusCode;

#[test]
fn test_success_unwraps_message() {
    let body = br#"{"error":false,"message":"200 ALIVE"}"#;
    let message: String = decode_body(StatusCode::OK, body).unwrap();
    assert_eq!(message, "200 ALIVE");
}

#[test]
fn test_structured_error_is_kept_verbatim() {
    let body = br#"{"error":"Assignment already exists","details":"Active assignment covers this target"}"#;
    let result: Result<String, _> = decode_body(StatusCode::CONFLICT, body);

    assert_eq!(
        result,
        Err(BackendError::Server {
            error: "Assignment already exists".to_string(),
            details: Some("Active assignment covers this target".to_string()),
        })
    );
}

#[test]
fn test_error_without_details() {
    let body = br#"{"error":"School not found"}"#;
    let result: Result<String, _> = decode_body(StatusCode::BAD_REQUEST, body);

    assert_eq!(
        result,
        Err(BackendError::Server {
            error: "School not found".to_string(),
            details: None,
        })
    );
}

#[test]
fn test_auth_statuses_become_authentication_failures() {
    let body = br#"{"error":"Unable to decode token"}"#;
    let result: Result<String, _> = decode_body(StatusCode::UNAUTHORIZED, body);
    assert_eq!(
        result,
        Err(BackendError::Authentication("Unable to decode token".to_string()))
    );

    let result: Result<String, _> = decode_body(StatusCode::FORBIDDEN, b"nope");
    assert!(matches!(result, Err(BackendError::Authentication(_))));
}

#[test]
fn test_unparseable_bodies_degrade_to_malformed() {
    let result: Result<String, _> = decode_body(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
    assert_eq!(result, Err(BackendError::Malformed));

    let result: Result<Vec<String>, _> = decode_body(StatusCode::OK, br#"{"unexpected":true}"#);
    assert_eq!(result, Err(BackendError::Malformed));
}

#[tokio::test]
async fn test_missing_token_fails_without_request() {
    let backend = HttpBackend::new(RequestConfig {
        server_url: "http://127.0.0.1:9".to_string(),
        token: None,
    });

    let result = backend.list_assignments(false).await;
    assert!(matches!(result, Err(BackendError::Authentication(_))));
}
