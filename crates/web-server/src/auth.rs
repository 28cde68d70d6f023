use crate::{error::AppError, AppState};
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{DateTime, TimeDelta, Utc};
use configuration::AuthSettings;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use thiserror::Error;

// Create a type alias for the HMAC-SHA256 implementation.
type HmacSha256 = Hmac<Sha256>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingCredentials,
    #[error("Authorization scheme must be Bearer")]
    InvalidScheme,
    #[error("Malformed access token")]
    Malformed,
    #[error("Invalid token signature")]
    BadSignature,
    #[error("Access token has expired")]
    Expired,
    #[error("Invalid signing key")]
    InvalidKey,
    #[error("Token lifetime is out of range")]
    InvalidLifetime,
}

/// Issues and verifies bearer tokens of the form `<user_id>.<expires_unix>.<hex signature>`.
///
/// The signature is an HMAC-SHA256 over `<user_id>.<expires_unix>`. No server-side
/// session exists; a token is valid until it expires.
#[derive(Clone)]
pub struct TokenSigner {
    mac: HmacSha256,
    ttl: TimeDelta,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl_minutes: i64) -> Result<Self, AuthError> {
        let mac =
            HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| AuthError::InvalidKey)?;
        let ttl = TimeDelta::try_minutes(ttl_minutes)
            .filter(|ttl| *ttl > TimeDelta::zero())
            .ok_or(AuthError::InvalidLifetime)?;
        Ok(Self { mac, ttl })
    }

    pub fn from_settings(settings: &AuthSettings) -> Result<Self, AuthError> {
        Self::new(&settings.secret_key, settings.token_ttl_minutes)
    }

    /// Issues a token for `user_id` using the configured lifetime.
    pub fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or(AuthError::InvalidLifetime)?;
        Ok(self.issue_until(user_id, expires_at))
    }

    pub fn issue_until(&self, user_id: i64, expires_at: DateTime<Utc>) -> String {
        let payload = format!("{}.{}", user_id, expires_at.timestamp());
        format!("{}.{}", payload, self.sign(&payload))
    }

    /// Returns the user id carried by a valid, unexpired token.
    pub fn verify(&self, token: &str) -> Result<i64, AuthError> {
        self.verify_at(token, Utc::now())
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<i64, AuthError> {
        let mut parts = token.splitn(3, '.');
        let (Some(user), Some(expires), Some(signature)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::Malformed);
        };

        let signature = hex::decode(signature).map_err(|_| AuthError::Malformed)?;
        let mut mac = self.mac.clone();
        mac.update(format!("{user}.{expires}").as_bytes());
        mac.verify_slice(&signature).map_err(|_| AuthError::BadSignature)?;

        let user_id: i64 = user.parse().map_err(|_| AuthError::Malformed)?;
        let expires: i64 = expires.parse().map_err(|_| AuthError::Malformed)?;
        if expires <= now.timestamp() {
            return Err(AuthError::Expired);
        }
        Ok(user_id)
    }

    fn sign(&self, payload: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

/// The authenticated caller, extracted from the `Authorization: Bearer` header.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub i64);

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingCredentials)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidScheme)?
            .trim();
        if token.is_empty() {
            return Err(AuthError::Malformed.into());
        }

        Ok(CurrentUser(state.signer.verify(token)?))
    }
}
