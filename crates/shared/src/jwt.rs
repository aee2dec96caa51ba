//! JWT token generation and validation.
//!
//! Access tokens are short-lived HS256 JWTs bound to a configured issuer and
//! audience. Refresh tokens are opaque and live in the database, not here.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::auth::Claims;

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Issuer embedded in and required from every token.
    pub issuer: String,
    /// Audience embedded in and required from every token.
    pub audience: String,
    /// Access token expiration in minutes.
    pub access_token_expires_minutes: i64,
    /// Refresh token expiration in days.
    pub refresh_token_expires_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            issuer: "cashup-api".to_string(),
            audience: "cashup-client".to_string(),
            access_token_expires_minutes: 15,
            refresh_token_expires_days: 7,
        }
    }
}

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

/// JWT service for access token operations.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generates an access token for a user.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_access_token(
        &self,
        user_id: i32,
        username: &str,
        email: &str,
    ) -> Result<String, JwtError> {
        let expires_at = Utc::now() + Duration::minutes(self.config.access_token_expires_minutes);
        let claims = Claims::new(
            user_id,
            username,
            email,
            &self.config.issuer,
            &self.config.audience,
            expires_at,
        );

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates and decodes a token.
    ///
    /// Verifies signature, issuer, audience, and expiry with zero clock-skew
    /// leeway.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::DecodingError` for any other validation failure.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }

    /// Returns the access token lifetime in minutes.
    #[must_use]
    pub const fn access_token_expires_minutes(&self) -> i64 {
        self.config.access_token_expires_minutes
    }

    /// Returns the refresh token lifetime in days.
    #[must_use]
    pub const fn refresh_token_expires_days(&self) -> i64 {
        self.config.refresh_token_expires_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            ..JwtConfig::default()
        })
    }

    #[test]
    fn test_generate_access_token() {
        let service = create_test_service();
        let token = service
            .generate_access_token(7, "alice", "alice@example.com")
            .unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_validate_token_round_trip() {
        let service = create_test_service();
        let token = service
            .generate_access_token(7, "alice", "alice@example.com")
            .unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id(), 7);
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.iss, "cashup-api");
        assert_eq!(claims.aud, "cashup-client");
    }

    #[test]
    fn test_unique_token_ids() {
        let service = create_test_service();
        let first = service
            .generate_access_token(7, "alice", "alice@example.com")
            .unwrap();
        let second = service
            .generate_access_token(7, "alice", "alice@example.com")
            .unwrap();

        let a = service.validate_token(&first).unwrap();
        let b = service.validate_token(&second).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service();
        let result = service.validate_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = create_test_service();
        let other = JwtService::new(JwtConfig {
            secret: "a-different-secret".to_string(),
            ..JwtConfig::default()
        });

        let token = service
            .generate_access_token(1, "bob", "bob@example.com")
            .unwrap();
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::DecodingError(_))
        ));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let service = create_test_service();
        let other = JwtService::new(JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            issuer: "someone-else".to_string(),
            ..JwtConfig::default()
        });

        let token = service
            .generate_access_token(1, "bob", "bob@example.com")
            .unwrap();
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::DecodingError(_))
        ));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let service = create_test_service();
        let other = JwtService::new(JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            audience: "another-app".to_string(),
            ..JwtConfig::default()
        });

        let token = service
            .generate_access_token(1, "bob", "bob@example.com")
            .unwrap();
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::DecodingError(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::new(JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            access_token_expires_minutes: -1,
            ..JwtConfig::default()
        });

        let token = service
            .generate_access_token(1, "bob", "bob@example.com")
            .unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::Expired)
        ));
    }
}
