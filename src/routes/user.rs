use crate::{
    AppState,
    auth::{AuthUser, create_token},
    dto::{AuthResponse, LoginRequest, MessageResponse, SignupRequest, UserResponse},
    errors::ApiError,
    models::User,
};
use axum::{Json, extract::State};
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

const DEFAULT_AVATAR: &str = "https://www.gravatar.com/avatar/?s=200&r=pg&d=mm";

/// POST /api/users
/// Body: { "name": "...", "email": "...", "password": "...", "avatar": "..."? }
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    if state.users.find_by_email(&payload.email).is_some() {
        return Err(ApiError::UserAlreadyExists);
    }

    let hashed_password = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| ApiError::InternalError(format!("Password hashing failed: {}", e)))?;

    let user = User {
        id: Uuid::new_v4(),
        name: payload.name,
        email: payload.email,
        avatar: payload.avatar.unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        hashed_password,
        created_at: Utc::now().timestamp(),
    };

    let token = create_token(
        &user.id,
        &user.email,
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )?;

    state.users.register(user.clone())?;

    info!("New user registered: {}", user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/auth
/// Body: { "email": "...", "password": "..." }
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let user = state
        .users
        .find_by_email(&payload.email)
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = verify(&payload.password, &user.hashed_password)
        .map_err(|e| ApiError::InternalError(format!("Password verification failed: {}", e)))?;

    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = create_token(
        &user.id,
        &user.email,
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )?;

    info!("User logged in: {}", user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/auth
pub async fn get_current_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .get(caller)
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}

/// DELETE /api/profile
/// Removes the account together with every post it wrote.
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.engine.delete_posts_by(caller).await?;

    state
        .users
        .remove(caller)
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    info!("User deleted: {}", caller);

    Ok(Json(MessageResponse {
        msg: "User deleted",
    }))
}
