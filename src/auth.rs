use crate::{errors::ApiError, states::AppState};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Header the browser client stores its token under.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub email: String,
    pub exp: usize,
}

pub fn create_token(
    user_id: &Uuid,
    email: &str,
    secret: &str,
    ttl_hours: i64,
) -> Result<String, ApiError> {
    let expiration = Duration::try_hours(ttl_hours)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .and_then(|at| usize::try_from(at.timestamp()).ok())
        .ok_or_else(|| ApiError::InternalError("Failed to calculate expiration".into()))?;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::InternalError(format!("Token Creation failed: {}", e)))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized)
}

/// Pulls the raw token out of `Authorization: Bearer` or `x-auth-token`.
pub fn token_from_headers(headers: &HeaderMap) -> Result<&str, ApiError> {
    if let Some(auth_header) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        return auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized);
    }

    headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)
}

/// A verified caller. Obtained once when a session starts and handed to
/// whatever issues requests on the caller's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    caller: Uuid,
}

impl Session {
    pub fn from_token(token: &str, secret: &str) -> Result<Self, ApiError> {
        let claims = decode_token(token, secret)?;
        let caller = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::Unauthorized)?;
        Ok(Self { caller })
    }

    pub fn caller(&self) -> Uuid {
        self.caller
    }
}

/// Extractor for handlers that need an authenticated caller.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers)?;
        let session = Session::from_token(token, &state.config.jwt_secret)?;
        Ok(AuthUser(session.caller()))
    }
}
