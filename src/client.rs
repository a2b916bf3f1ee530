//! Interaction client: one engine call per user action, result fed into
//! the [`FeedCache`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::Session,
    engine::PostEngine,
    errors::ApiError,
    feed::{FeedCache, FeedEvent, FeedState},
    models::{Comment, Like, Post},
    store::DocumentStore,
};

/// The operations a client can ask of the engine on behalf of one caller.
#[async_trait]
pub trait PostApi: Send + Sync {
    async fn create_post(&self, text: String) -> Result<Post, ApiError>;
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError>;
    async fn get_post(&self, id: Uuid) -> Result<Post, ApiError>;
    async fn delete_post(&self, id: Uuid) -> Result<(), ApiError>;
    async fn like_post(&self, id: Uuid) -> Result<Vec<Like>, ApiError>;
    async fn unlike_post(&self, id: Uuid) -> Result<Vec<Like>, ApiError>;
    async fn add_comment(&self, id: Uuid, text: String) -> Result<Vec<Comment>, ApiError>;
    async fn remove_comment(&self, id: Uuid, comment_id: Uuid) -> Result<Vec<Comment>, ApiError>;
}

/// Talks to an in-process engine as the session's caller.
pub struct LocalApi<S> {
    engine: Arc<PostEngine<S>>,
    session: Session,
}

impl<S> LocalApi<S> {
    pub fn new(engine: Arc<PostEngine<S>>, session: Session) -> Self {
        Self { engine, session }
    }
}

#[async_trait]
impl<S: DocumentStore<Post>> PostApi for LocalApi<S> {
    async fn create_post(&self, text: String) -> Result<Post, ApiError> {
        self.engine.create_post(self.session.caller(), text).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.engine.list_posts().await
    }

    async fn get_post(&self, id: Uuid) -> Result<Post, ApiError> {
        self.engine.get_post(&id.to_string()).await
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), ApiError> {
        self.engine
            .delete_post(&id.to_string(), self.session.caller())
            .await
    }

    async fn like_post(&self, id: Uuid) -> Result<Vec<Like>, ApiError> {
        self.engine
            .like_post(&id.to_string(), self.session.caller())
            .await
    }

    async fn unlike_post(&self, id: Uuid) -> Result<Vec<Like>, ApiError> {
        self.engine
            .unlike_post(&id.to_string(), self.session.caller())
            .await
    }

    async fn add_comment(&self, id: Uuid, text: String) -> Result<Vec<Comment>, ApiError> {
        self.engine
            .add_comment(&id.to_string(), self.session.caller(), text)
            .await
    }

    async fn remove_comment(
        &self,
        id: Uuid,
        comment_id: Uuid,
    ) -> Result<Vec<Comment>, ApiError> {
        self.engine
            .remove_comment(
                &id.to_string(),
                &comment_id.to_string(),
                self.session.caller(),
            )
            .await
    }
}

pub struct InteractionClient<A> {
    api: A,
    cache: FeedCache,
}

impl<A: PostApi> InteractionClient<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: FeedCache::new(),
        }
    }

    pub fn state(&self) -> &FeedState {
        self.cache.snapshot()
    }

    fn apply(&mut self, result: Result<FeedEvent, ApiError>) -> &FeedState {
        let event = result.unwrap_or_else(|err| {
            warn!("Post interaction failed: {}", err);
            FeedEvent::Failed((&err).into())
        });
        self.cache.dispatch(event);
        self.cache.snapshot()
    }

    pub async fn get_posts(&mut self) -> &FeedState {
        let result = self.api.list_posts().await.map(FeedEvent::PostsLoaded);
        self.apply(result)
    }

    pub async fn get_post(&mut self, id: Uuid) -> &FeedState {
        let result = self.api.get_post(id).await.map(FeedEvent::PostLoaded);
        self.apply(result)
    }

    pub async fn add_post(&mut self, text: impl Into<String>) -> &FeedState {
        let result = self
            .api
            .create_post(text.into())
            .await
            .map(FeedEvent::PostCreated);
        self.apply(result)
    }

    pub async fn delete_post(&mut self, id: Uuid) -> &FeedState {
        let result = self
            .api
            .delete_post(id)
            .await
            .map(|()| FeedEvent::PostDeleted(id));
        self.apply(result)
    }

    pub async fn add_like(&mut self, id: Uuid) -> &FeedState {
        let result = self
            .api
            .like_post(id)
            .await
            .map(|likes| FeedEvent::LikesUpdated { id, likes });
        self.apply(result)
    }

    pub async fn remove_like(&mut self, id: Uuid) -> &FeedState {
        let result = self
            .api
            .unlike_post(id)
            .await
            .map(|likes| FeedEvent::LikesUpdated { id, likes });
        self.apply(result)
    }

    pub async fn add_comment(&mut self, post_id: Uuid, text: impl Into<String>) -> &FeedState {
        let result = self
            .api
            .add_comment(post_id, text.into())
            .await
            .map(FeedEvent::CommentAdded);
        self.apply(result)
    }

    pub async fn delete_comment(&mut self, post_id: Uuid, comment_id: Uuid) -> &FeedState {
        let result = self
            .api
            .remove_comment(post_id, comment_id)
            .await
            .map(FeedEvent::CommentRemoved);
        self.apply(result)
    }
}
