use devconnect::{AppState, config::Config, logging, routes};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = Config::load().inspect_err(|e| error!("Configuration error: {}", e))?;
    let addr = config.addr();
    let delete_policy = config.delete_policy;

    let app = routes::app(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Post delete policy: {:?}", delete_policy);
    info!("API Endpoints:");
    info!("  GET    /health                            - Health check");
    info!("  POST   /api/users                         - Create account");
    info!("  POST   /api/auth                          - Login");
    info!("  GET    /api/auth                          - Current user (auth)");
    info!("  DELETE /api/profile                       - Delete account and posts (auth)");
    info!("  POST   /api/posts                         - Create post (auth)");
    info!("  GET    /api/posts                         - List posts, newest first (auth)");
    info!("  GET    /api/posts/:id                     - Get post (auth)");
    info!("  DELETE /api/posts/:id                     - Delete post (auth)");
    info!("  PUT    /api/posts/like/:id                - Like post (auth)");
    info!("  PUT    /api/posts/unlike/:id              - Unlike post (auth)");
    info!("  POST   /api/posts/comment/:id             - Comment on post (auth)");
    info!("  DELETE /api/posts/comment/:id/:comment_id - Remove own comment (auth)");

    axum::serve(listener, app).await?;
    Ok(())
}
