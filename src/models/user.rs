use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthorSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub created_at: i64,
}

impl User {
    /// Copies the identity fields embedded into new posts and comments.
    pub fn snapshot(&self) -> AuthorSnapshot {
        AuthorSnapshot {
            name: self.name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}
