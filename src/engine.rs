//! Post interaction engine.
//!
//! The only code that mutates persisted posts. Every operation is one
//! read-modify-write against the store; nothing is retried and every
//! failure comes back as an [`ApiError`].

use std::str::FromStr;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    errors::ApiError,
    models::{Comment, Like, Post},
    store::DocumentStore,
    users::UserDirectory,
};

/// Who may delete a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Any authenticated caller. Matches the behaviour the API has always had.
    #[default]
    AnyAuthenticated,
    /// Only the post's author; everyone else gets `Forbidden`.
    OwnerOnly,
}

impl FromStr for DeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(DeletePolicy::AnyAuthenticated),
            "owner" => Ok(DeletePolicy::OwnerOnly),
            other => Err(format!("unknown delete policy `{other}` (expected `any` or `owner`)")),
        }
    }
}

/// Ids arrive as raw strings; anything that is not a UUID cannot name a document.
fn parse_id(raw: &str, not_found: fn() -> ApiError) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| not_found())
}

fn require_text(text: &str) -> Result<(), ApiError> {
    if text.is_empty() {
        return Err(ApiError::ValidationError("Text is required".into()));
    }
    Ok(())
}

pub struct PostEngine<S> {
    posts: S,
    users: UserDirectory,
    delete_policy: DeletePolicy,
}

impl<S: DocumentStore<Post>> PostEngine<S> {
    pub fn new(posts: S, users: UserDirectory, delete_policy: DeletePolicy) -> Self {
        Self {
            posts,
            users,
            delete_policy,
        }
    }

    async fn load(&self, post_id: &str) -> Result<Post, ApiError> {
        let id = parse_id(post_id, ApiError::post_not_found)?;
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(ApiError::post_not_found)
    }

    pub async fn create_post(&self, caller: Uuid, text: String) -> Result<Post, ApiError> {
        require_text(&text)?;
        let author = self.users.snapshot(caller).ok_or(ApiError::Unauthorized)?;

        let post = Post::new(caller, author, text);
        self.posts.insert(post.clone()).await?;

        info!("Post created: {} by user {}", post.id, caller);
        Ok(post)
    }

    /// All posts, newest first.
    pub async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        Ok(self.posts.find_newest_first().await?)
    }

    pub async fn get_post(&self, post_id: &str) -> Result<Post, ApiError> {
        self.load(post_id).await
    }

    pub async fn delete_post(&self, post_id: &str, caller: Uuid) -> Result<(), ApiError> {
        let post = self.load(post_id).await?;

        if self.delete_policy == DeletePolicy::OwnerOnly && post.author_id != caller {
            return Err(ApiError::Forbidden("User not authorized".into()));
        }

        self.posts
            .delete_by_id(post.id)
            .await?
            .ok_or_else(ApiError::post_not_found)?;

        info!("Post deleted: {} by user {}", post.id, caller);
        Ok(())
    }

    pub async fn like_post(&self, post_id: &str, caller: Uuid) -> Result<Vec<Like>, ApiError> {
        let mut post = self.load(post_id).await?;

        if post.liked_by(caller) {
            return Err(ApiError::Conflict("Post already liked".into()));
        }

        post.likes.insert(0, Like { user_id: caller });
        self.posts.update(post.clone()).await?;

        info!("Post liked: {} by user {}", post.id, caller);
        Ok(post.likes)
    }

    pub async fn unlike_post(&self, post_id: &str, caller: Uuid) -> Result<Vec<Like>, ApiError> {
        let mut post = self.load(post_id).await?;

        let Some(index) = post.likes.iter().position(|like| like.user_id == caller) else {
            return Err(ApiError::Conflict("Post has not yet been liked".into()));
        };

        post.likes.remove(index);
        self.posts.update(post.clone()).await?;

        info!("Post unliked: {} by user {}", post.id, caller);
        Ok(post.likes)
    }

    pub async fn add_comment(
        &self,
        post_id: &str,
        caller: Uuid,
        text: String,
    ) -> Result<Vec<Comment>, ApiError> {
        require_text(&text)?;
        let mut post = self.load(post_id).await?;
        let author = self.users.snapshot(caller).ok_or(ApiError::Unauthorized)?;

        let comment = Comment {
            id: Uuid::new_v4(),
            author_id: caller,
            author,
            text,
            created_at: Utc::now(),
        };
        let comment_id = comment.id;

        post.comments.insert(0, comment);
        self.posts.update(post.clone()).await?;

        info!("Comment {} added to post {} by user {}", comment_id, post.id, caller);
        Ok(post.comments)
    }

    pub async fn remove_comment(
        &self,
        post_id: &str,
        comment_id: &str,
        caller: Uuid,
    ) -> Result<Vec<Comment>, ApiError> {
        let mut post = self.load(post_id).await?;
        let comment_id = parse_id(comment_id, ApiError::comment_not_found)?;

        let comment = post
            .comment(comment_id)
            .ok_or_else(ApiError::comment_not_found)?;

        if comment.author_id != caller {
            return Err(ApiError::Forbidden("User not authorized".into()));
        }

        post.comments.retain(|comment| comment.id != comment_id);
        self.posts.update(post.clone()).await?;

        info!("Comment {} removed from post {} by user {}", comment_id, post.id, caller);
        Ok(post.comments)
    }

    /// Removes every post written by `author`. Used when an account is deleted.
    pub async fn delete_posts_by(&self, author: Uuid) -> Result<usize, ApiError> {
        let removed = self
            .posts
            .delete_where(&move |post: &Post| post.author_id == author)
            .await?;

        info!("Removed {} posts of deleted user {}", removed, author);
        Ok(removed)
    }
}
