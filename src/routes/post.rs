use crate::{
    AppState,
    auth::AuthUser,
    dto::{MessageResponse, TextRequest},
    errors::ApiError,
    models::{Comment, Like, Post},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

/// POST /api/posts
/// Body: { "text": "..." }
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(payload): Json<TextRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let post = state.engine.create_post(caller, payload.text).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/posts
pub async fn get_posts(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.engine.list_posts().await?))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.engine.get_post(&id).await?))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.engine.delete_post(&id, caller).await?;

    Ok(Json(MessageResponse {
        msg: "Post removed",
    }))
}

/// PUT /api/posts/like/{id}
pub async fn like_post(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, ApiError> {
    Ok(Json(state.engine.like_post(&id, caller).await?))
}

/// PUT /api/posts/unlike/{id}
pub async fn unlike_post(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, ApiError> {
    Ok(Json(state.engine.unlike_post(&id, caller).await?))
}

/// POST /api/posts/comment/{id}
/// Body: { "text": "..." }
pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<TextRequest>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    Ok(Json(state.engine.add_comment(&id, caller, payload.text).await?))
}

/// DELETE /api/posts/comment/{id}/{comment_id}
pub async fn remove_comment(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    Ok(Json(
        state.engine.remove_comment(&id, &comment_id, caller).await?,
    ))
}
