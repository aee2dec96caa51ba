//! Auth payload and claims focused tests.

use chrono::{Duration, Utc};
use serde_json::json;
use validator::Validate;

use crate::auth::{Claims, CreateUserRequest, LoginRequest, RegisterRequest, UpdateUserRequest};

#[test]
fn claims_sets_expiration_and_iat() {
    let expires_at = Utc::now() + Duration::minutes(30);
    let before = Utc::now().timestamp();
    let claims = Claims::new(42, "alice", "a@x.com", "iss", "aud", expires_at);
    let after = Utc::now().timestamp();

    assert_eq!(claims.sub, 42);
    assert_eq!(claims.name, "alice");
    assert_eq!(claims.email, "a@x.com");
    assert!(claims.iat >= before);
    assert!(claims.iat <= after);
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[test]
fn claims_get_distinct_token_ids() {
    let expires_at = Utc::now() + Duration::hours(1);
    let first = Claims::new(1, "u", "u@x.com", "iss", "aud", expires_at);
    let second = Claims::new(1, "u", "u@x.com", "iss", "aud", expires_at);

    assert_ne!(first.jti, second.jti);
}

#[test]
fn register_request_rejects_short_username() {
    let req = RegisterRequest {
        username: "ab".to_string(),
        email: "user@example.com".to_string(),
        password: "Passw0rd!".to_string(),
    };
    assert!(req.validate().is_err());
}

#[test]
fn register_request_rejects_bad_email() {
    let req = RegisterRequest {
        username: "alice".to_string(),
        email: "not-an-email".to_string(),
        password: "Passw0rd!".to_string(),
    };
    assert!(req.validate().is_err());
}

#[test]
fn register_request_accepts_valid_input() {
    let req = RegisterRequest {
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        password: "Passw0rd!".to_string(),
    };
    assert!(req.validate().is_ok());
}

#[test]
fn login_request_validates_email_only() {
    let req = LoginRequest {
        email: "bad".to_string(),
        password: String::new(),
    };
    assert!(req.validate().is_err());

    let req = LoginRequest {
        email: "ok@example.com".to_string(),
        password: String::new(),
    };
    assert!(req.validate().is_ok());
}

#[test]
fn create_user_request_defaults_role_to_reader() {
    let req: CreateUserRequest = serde_json::from_value(json!({
        "username": "teller",
        "email": "teller@example.com",
        "password": "Passw0rd!"
    }))
    .expect("deserialize request");
    assert_eq!(req.role, "reader");
}

#[test]
fn update_user_request_supports_partial_updates() {
    let req: UpdateUserRequest = serde_json::from_value(json!({
        "role": "writer"
    }))
    .expect("deserialize request");
    assert!(req.username.is_none());
    assert!(req.email.is_none());
    assert!(req.password.is_none());
    assert_eq!(req.role.as_deref(), Some("writer"));
}
