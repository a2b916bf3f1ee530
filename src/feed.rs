//! Client-side mirror of the posts the engine has returned.
//!
//! State only changes through [`reduce`]. The cache never works out like
//! or comment membership itself; it copies whatever the engine sent back.

use serde::Serialize;
use uuid::Uuid;

use crate::{
    errors::ApiError,
    models::{Comment, Like, Post},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub status: u16,
    pub msg: String,
}

impl From<&ApiError> for ErrorPayload {
    fn from(err: &ApiError) -> Self {
        Self {
            status: err.status().as_u16(),
            msg: err.public_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedState {
    pub posts: Vec<Post>,
    pub post: Option<Post>,
    pub loading: bool,
    pub error: Option<ErrorPayload>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            post: None,
            loading: true,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    PostsLoaded(Vec<Post>),
    PostLoaded(Post),
    PostCreated(Post),
    PostDeleted(Uuid),
    LikesUpdated { id: Uuid, likes: Vec<Like> },
    CommentAdded(Vec<Comment>),
    CommentRemoved(Vec<Comment>),
    Failed(ErrorPayload),
}

/// Applies one event. Total: every event is valid in every state.
pub fn reduce(mut state: FeedState, event: FeedEvent) -> FeedState {
    match event {
        FeedEvent::PostsLoaded(posts) => state.posts = posts,
        FeedEvent::PostLoaded(post) => state.post = Some(post),
        FeedEvent::PostCreated(post) => state.posts.insert(0, post),
        FeedEvent::PostDeleted(id) => state.posts.retain(|post| post.id != id),
        FeedEvent::LikesUpdated { id, likes } => {
            if let Some(post) = state.posts.iter_mut().find(|post| post.id == id) {
                post.likes = likes;
            }
        }
        // No detail view open means there is nothing to patch
        FeedEvent::CommentAdded(comments) | FeedEvent::CommentRemoved(comments) => {
            if let Some(post) = state.post.as_mut() {
                post.comments = comments;
            }
        }
        FeedEvent::Failed(error) => state.error = Some(error),
    }
    state.loading = false;
    state
}

/// Owns a [`FeedState`] and is the single place events are applied.
#[derive(Debug, Default)]
pub struct FeedCache {
    state: FeedState,
}

impl FeedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, event: FeedEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, event);
    }

    pub fn snapshot(&self) -> &FeedState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::AuthorSnapshot, test_support::user};
    use chrono::Utc;

    fn post(text: &str) -> Post {
        let author = user("ada");
        Post::new(author.id, author.snapshot(), text.into())
    }

    fn comment(text: &str) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            author: AuthorSnapshot {
                name: "bob".into(),
                avatar: String::new(),
            },
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn starts_loading_and_empty() {
        let state = FeedState::default();
        assert!(state.loading);
        assert!(state.posts.is_empty());
        assert!(state.post.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn loaded_then_deleted_leaves_the_other_post() {
        let (p1, p2) = (post("one"), post("two"));
        let mut cache = FeedCache::new();

        cache.dispatch(FeedEvent::PostsLoaded(vec![p1.clone(), p2.clone()]));
        assert!(!cache.snapshot().loading);
        cache.dispatch(FeedEvent::PostDeleted(p1.id));

        assert_eq!(cache.snapshot().posts, vec![p2]);
        assert!(!cache.snapshot().loading);
    }

    #[test]
    fn delete_before_any_load_is_harmless() {
        let p1 = post("one");
        let state = reduce(FeedState::default(), FeedEvent::PostDeleted(p1.id));
        let state = reduce(state, FeedEvent::PostsLoaded(vec![p1.clone()]));
        assert_eq!(state.posts, vec![p1]);
        assert!(!state.loading);
    }

    #[test]
    fn created_posts_go_to_the_front() {
        let (old, new) = (post("old"), post("new"));
        let state = reduce(FeedState::default(), FeedEvent::PostsLoaded(vec![old.clone()]));
        let state = reduce(state, FeedEvent::PostCreated(new.clone()));
        assert_eq!(state.posts, vec![new, old]);
    }

    #[test]
    fn likes_update_replaces_only_the_matching_post() {
        let (p1, p2) = (post("one"), post("two"));
        let liker = Uuid::new_v4();
        let state = reduce(
            FeedState::default(),
            FeedEvent::PostsLoaded(vec![p1.clone(), p2.clone()]),
        );

        let likes = vec![Like { user_id: liker }];
        let state = reduce(
            state,
            FeedEvent::LikesUpdated {
                id: p2.id,
                likes: likes.clone(),
            },
        );

        assert_eq!(state.posts[0], p1);
        assert_eq!(state.posts[1].likes, likes);
        assert_eq!(state.posts[1].text, "two");
    }

    #[test]
    fn likes_update_for_unknown_post_is_a_no_op() {
        let p1 = post("one");
        let before = reduce(FeedState::default(), FeedEvent::PostsLoaded(vec![p1]));
        let after = reduce(
            before.clone(),
            FeedEvent::LikesUpdated {
                id: Uuid::new_v4(),
                likes: vec![Like {
                    user_id: Uuid::new_v4(),
                }],
            },
        );
        assert_eq!(after, before);
    }

    #[test]
    fn comment_events_replace_comments_wholesale() {
        let detail = post("detail");
        let state = reduce(FeedState::default(), FeedEvent::PostLoaded(detail.clone()));

        let added = vec![comment("b"), comment("a")];
        let state = reduce(state, FeedEvent::CommentAdded(added.clone()));
        assert_eq!(state.post.as_ref().unwrap().comments, added);

        let remaining = vec![added[1].clone()];
        let state = reduce(state, FeedEvent::CommentRemoved(remaining.clone()));
        let shown = state.post.unwrap();
        assert_eq!(shown.comments, remaining);
        assert_eq!(shown.id, detail.id);
    }

    #[test]
    fn comment_event_without_detail_view_only_clears_loading() {
        let state = reduce(FeedState::default(), FeedEvent::CommentAdded(vec![comment("x")]));
        assert!(state.post.is_none());
        assert!(!state.loading);
    }

    #[test]
    fn failure_keeps_data_and_records_error() {
        let p1 = post("one");
        let state = reduce(FeedState::default(), FeedEvent::PostsLoaded(vec![p1.clone()]));
        let payload = ErrorPayload::from(&ApiError::Conflict("Post already liked".into()));

        let state = reduce(state, FeedEvent::Failed(payload.clone()));
        assert_eq!(state.posts, vec![p1]);
        assert_eq!(state.error, Some(payload));
        assert_eq!(state.error.unwrap().status, 409);
    }
}
