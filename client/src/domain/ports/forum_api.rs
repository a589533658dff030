//! Forum API port trait
//!
//! Defines the remote API surface the view components consume. The transport
//! is up to the adapter.

use async_trait::async_trait;

use crate::domain::entities::{FeedPage, IndividualVote, VoteOutcome, VoteTarget};
use crate::error::ApiError;

#[async_trait]
pub trait ForumApi: Send + Sync {
    /// Posts of one site
    async fn feed_by_site(&self, site: &str, page: u32, per_page: u32)
        -> Result<FeedPage, ApiError>;

    /// Posts from the sites the user subscribed to
    async fn feed_subscriptions(&self, page: u32, per_page: u32) -> Result<FeedPage, ApiError>;

    /// Posts from every site
    async fn feed_all(&self, page: u32, per_page: u32) -> Result<FeedPage, ApiError>;

    /// Watched posts; `all` includes the ones without new comments
    async fn feed_watch(&self, all: bool, page: u32, per_page: u32)
        -> Result<FeedPage, ApiError>;

    /// Posts written by a user
    async fn user_posts(&self, username: &str, page: u32, per_page: u32)
        -> Result<FeedPage, ApiError>;

    /// Every individual vote on a target
    async fn vote_list(&self, target: VoteTarget) -> Result<Vec<IndividualVote>, ApiError>;

    /// Cast (or retract, with 0) the current user's vote
    async fn cast_vote(&self, target: VoteTarget, value: i64) -> Result<VoteOutcome, ApiError>;
}
