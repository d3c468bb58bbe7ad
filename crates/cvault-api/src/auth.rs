//! Bearer-token authentication.
//!
//! Users are provisioned through the environment (`USER_1`, `USER_2`, ...
//! each `username:argon2-hash`); a successful login returns an HS256 JWT
//! that every folder/video endpoint requires as a bearer token. The gate
//! is pass/fail: there are no roles or per-user visibility rules.

use std::collections::HashMap;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
}

/// A token issued by a successful login.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in_secs: i64,
}

/// Token issuing and verification.
pub struct TokenAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
    /// username -> argon2 PHC hash
    users: HashMap<String, String>,
}

impl TokenAuth {
    pub fn new(secret: &str, expiry_hours: i64, users: HashMap<String, String>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours),
            users,
        }
    }

    /// Build from config plus `USER_n` environment entries.
    pub fn from_env(secret: &str, expiry_hours: i64) -> Self {
        let users = load_users_from_env();
        if users.is_empty() {
            warn!("No users loaded; set USER_1=username:argon2-hash and friends");
        } else {
            debug!("Loaded {} users", users.len());
        }
        Self::new(secret, expiry_hours, users)
    }

    /// Verify credentials and issue a token.
    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken, ApiError> {
        if username.is_empty() || password.is_empty() {
            return Err(ApiError::bad_request("Username and password required"));
        }

        let hash = self
            .users
            .get(username)
            .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

        if !verify_password(password, hash) {
            return Err(ApiError::unauthorized("Invalid credentials"));
        }

        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::internal(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_in_secs: self.expiry.num_seconds(),
        })
    }

    /// Verify a bearer token.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| ApiError::unauthorized(format!("Invalid or expired token: {}", e)))?;
        Ok(data.claims)
    }
}

/// Read `USER_1`, `USER_2`, ... until the first gap.
fn load_users_from_env() -> HashMap<String, String> {
    let mut users = HashMap::new();
    let mut i = 1;
    while let Ok(entry) = std::env::var(format!("USER_{}", i)) {
        match entry.split_once(':') {
            Some((username, hash)) if !username.is_empty() && !hash.is_empty() => {
                users.insert(username.to_string(), hash.to_string());
            }
            _ => warn!("USER_{} is not in username:hash form, skipping", i),
        }
        i += 1;
    }
    users
}

fn verify_password(password: &str, phc_hash: &str) -> bool {
    match PasswordHash::new(phc_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash is not a valid PHC string: {}", e);
            false
        }
    }
}

/// Authenticated user extracted from the Authorization header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Invalid Authorization header format"))?;

        let claims = state.auth.verify(token)?;

        Ok(AuthUser {
            username: claims.sub,
        })
    }
}
