use crate::{
    config::Config,
    engine::PostEngine,
    models::Post,
    store::MemoryStore,
    users::UserDirectory,
};
use std::sync::Arc;

pub type SharedEngine = Arc<PostEngine<MemoryStore<Post>>>;

/// Shared across all requests. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub users: UserDirectory,
    pub engine: SharedEngine,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let users = UserDirectory::new();
        let engine = PostEngine::new(MemoryStore::new(), users.clone(), config.delete_policy);

        Self {
            config: Arc::new(config),
            users,
            engine: Arc::new(engine),
        }
    }
}
