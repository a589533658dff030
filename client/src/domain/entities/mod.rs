//! Domain entities
//!
//! Pure models for what the view layer shows: posts, feed pages and votes.

pub mod feed;
pub mod post;
pub mod vote;

pub use feed::{page_count, FeedIdentity, FeedKind, FeedPage};
pub use post::{Post, PostId, PostPatch, Rating};
pub use vote::{
    IndividualVote, TargetKind, VoteAggregate, VoteOutcome, VoteState, VoteSummary, VoteTarget,
};
