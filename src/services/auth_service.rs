use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

const TOKEN_TTL_DAYS: i64 = 7;

// One claims shape for parents and contributors. The sub is resolved against
// the users or contributors table by whoever consumes the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct AuthService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| AppError::Internal("JWT_SECRET must be set".to_string()))?;
        Ok(Self::new(&secret))
    }

    pub fn issue_token(&self, sub: Uuid, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

pub fn is_valid_email(email: &str) -> bool {
    let re = EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));
    re.is_match(email)
}

/// Extractor for routes that require a bearer token.
pub struct AuthUser(pub Claims);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claims = claims_from_parts(parts, state).ok_or(AppError::Unauthorized)?;
        Ok(AuthUser(claims))
    }
}

/// Extractor for routes where a token changes behavior but is not required,
/// like gift creation. Never rejects; bad tokens read as anonymous.
pub struct OptionalAuthUser(pub Option<Claims>);

#[axum::async_trait]
impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(claims_from_parts(parts, state)))
    }
}

fn claims_from_parts(parts: &Parts, state: &AppState) -> Option<Claims> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    state.auth.decode_token(token).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip_preserves_claims() {
        let auth = AuthService::new("test-secret");
        let sub = Uuid::new_v4();

        let token = auth.issue_token(sub, "parent@example.com").unwrap();
        let claims = auth.decode_token(&token).unwrap();

        assert_eq!(claims.sub, sub);
        assert_eq!(claims.email, "parent@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let auth = AuthService::new("test-secret");
        let other = AuthService::new("other-secret");

        let token = other.issue_token(Uuid::new_v4(), "parent@example.com").unwrap();

        assert!(auth.decode_token(&token).is_err());
    }

    #[test]
    fn test_password_hash_verifies_and_rejects() {
        let hash = hash_password("hunter2!").unwrap();

        assert_ne!(hash, "hunter2!");
        assert!(verify_password("hunter2!", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("grandma@example.com"));
        assert!(is_valid_email("a.b+c@mail.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email(""));
    }
}
