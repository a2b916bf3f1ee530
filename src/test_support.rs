use uuid::Uuid;

use crate::{
    engine::{DeletePolicy, PostEngine},
    models::{Post, User},
    store::MemoryStore,
    users::UserDirectory,
};

pub fn user(name: &str) -> User {
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{name}@example.com"),
        avatar: format!("https://avatars.example.com/{name}"),
        hashed_password: String::new(),
        created_at: 0,
    }
}

/// An engine over an empty in-memory store with the given users registered.
pub fn engine_with(
    names: &[&str],
    policy: DeletePolicy,
) -> (PostEngine<MemoryStore<Post>>, Vec<User>) {
    let directory = UserDirectory::new();
    let users: Vec<User> = names.iter().map(|name| user(name)).collect();
    for u in &users {
        directory
            .register(u.clone())
            .expect("test users have unique emails");
    }
    (PostEngine::new(MemoryStore::new(), directory, policy), users)
}
