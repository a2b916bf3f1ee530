use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Document;

/// Author identity captured when a post or comment is written.
///
/// Later profile edits do not flow back into existing posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSnapshot {
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author_id: Uuid,
    #[serde(flatten)]
    pub author: AuthorSnapshot,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    #[serde(flatten)]
    pub author: AuthorSnapshot,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Newest first, at most one entry per user.
    pub likes: Vec<Like>,
    /// Newest first.
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn new(author_id: Uuid, author: AuthorSnapshot, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            author,
            text,
            created_at: Utc::now(),
            likes: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn liked_by(&self, user_id: Uuid) -> bool {
        self.likes.iter().any(|like| like.user_id == user_id)
    }

    pub fn comment(&self, comment_id: Uuid) -> Option<&Comment> {
        self.comments.iter().find(|comment| comment.id == comment_id)
    }
}

impl Document for Post {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
