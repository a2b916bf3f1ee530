mod post;
mod user;

pub use post::{AuthorSnapshot, Comment, Like, Post};
pub use user::User;
