//! Forum view layer
//!
//! Client-side state for a forum: paginated post feeds and vote widgets.
//! Uses hexagonal (ports & adapters) architecture, so the components can be
//! driven by any UI host and tested against in-memory mocks.

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;

#[cfg(test)]
mod test_utils;

pub use app::{FeedLoader, FeedSnapshot, Locale, Messages, VoteOptions, VoteWidget};
pub use config::Config;
pub use domain::entities::{FeedIdentity, FeedKind, Post, PostId, Rating, VoteTarget};
