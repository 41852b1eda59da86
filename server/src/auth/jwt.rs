//! JWT token service
//!
//! Issues and verifies HS256 access tokens. Expiry is checked exactly
//! once, inside signature verification.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Employee id (subject)
    pub sub: String,
    /// Employee email
    pub email: String,
    /// Role name
    pub role: String,
    /// Permissions, comma separated `resource:action` pairs
    pub permissions: String,
    /// Expiration timestamp (seconds)
    pub exp: i64,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    issuer: String,
    expires_in_secs: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str, issuer: impl Into<String>, expires_in_secs: i64) -> Self {
        Self {
            issuer: issuer.into(),
            expires_in_secs,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Generate a token for an authenticated employee
    pub fn generate_token(
        &self,
        employee_id: i64,
        email: &str,
        role: &str,
        permissions: &[String],
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.expires_in_secs);

        let claims = Claims {
            sub: employee_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            permissions: permissions.join(","),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Verify and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {e}")),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an `Authorization` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-key-test-secret-key-test", "hrms-test", 3600)
    }

    #[test]
    fn test_generation_and_validation() {
        let svc = service();
        let permissions = vec!["attendance:read".to_string()];

        let token = svc
            .generate_token(42, "jane@example.com", "Employee", &permissions)
            .expect("Failed to generate test token");

        let claims = svc.validate_token(&token).expect("Failed to validate");
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "jane@example.com");
        assert_eq!(claims.role, "Employee");
        assert_eq!(claims.permissions, "attendance:read");
        assert_eq!(claims.iss, "hrms-test");
    }

    #[test]
    fn test_expired_token_rejected() {
        let svc = JwtService::new("test-secret-key-test-secret-key-test", "hrms-test", -120);
        let token = svc
            .generate_token(1, "a@b.com", "Employee", &[])
            .expect("Failed to generate test token");

        match svc.validate_token(&token) {
            Err(JwtError::ExpiredToken) => {}
            other => panic!("expected ExpiredToken, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service()
            .generate_token(1, "a@b.com", "Employee", &[])
            .expect("Failed to generate test token");

        let other = JwtService::new("another-secret-key-another-secret-ok", "hrms-test", 3600);
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let token = service()
            .generate_token(1, "a@b.com", "Employee", &[])
            .expect("Failed to generate test token");

        let other = JwtService::new("test-secret-key-test-secret-key-test", "someone-else", 3600);
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
