pub mod health;
pub mod post;
pub mod user;

use crate::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let body_limit = RequestBodyLimitLayer::new(state.config.max_body_bytes);

    Router::new()
        // Public routes (no auth required)
        .route("/health", get(health::health_check))
        .route("/api/users", post(user::signup))
        .route("/api/auth", post(user::login).get(user::get_current_user))
        // Protected routes (auth required)
        .route("/api/profile", delete(user::delete_account))
        .route("/api/posts", post(post::create_post).get(post::get_posts))
        .route(
            "/api/posts/{id}",
            get(post::get_post).delete(post::delete_post),
        )
        .route("/api/posts/like/{id}", put(post::like_post))
        .route("/api/posts/unlike/{id}", put(post::unlike_post))
        .route("/api/posts/comment/{id}", post(post::add_comment))
        .route(
            "/api/posts/comment/{id}/{comment_id}",
            delete(post::remove_comment),
        )
        .with_state(state)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
