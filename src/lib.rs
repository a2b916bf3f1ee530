//! Posts, likes and comments for a developer social network.
//!
//! - [`engine`] owns every rule about likes, comments and deletion
//! - [`store`] is the document store the engine reads and writes
//! - [`feed`] mirrors engine results on the client side
//! - [`client`] issues engine calls and feeds the results into the cache
//! - [`routes`] exposes the engine over HTTP

pub mod auth;
pub mod client;
pub mod config;
pub mod dto;
pub mod engine;
pub mod errors;
pub mod feed;
pub mod logging;
pub mod models;
pub mod routes;
pub mod states;
pub mod store;
pub mod users;

#[cfg(test)]
mod test_support;

pub use states::AppState;
