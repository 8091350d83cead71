use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::AppState;
use crate::data::models::{ApiError, User};
use crate::data::repositories::UserRepository;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Hex SHA-256 of an API key; only this digest is stored.
pub fn hash_api_key(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

/// Fresh random key of the form `ak_<48 hex chars>`.
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; 24];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("ak_{}", hex::encode(bytes))
}

/// The user owning the request's `X-API-Key`.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing API Key".into()))?;

        let mut conn = state.pool.get()?;
        match UserRepository::find_by_key_hash(&mut conn, &hash_api_key(key))? {
            Some(user) => Ok(AuthUser(user)),
            None => {
                log::warn!("Rejected request with unknown API key");
                Err(ApiError::Unauthorized("Invalid API Key".into()))
            }
        }
    }
}
