//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use crate::domain::entities::{FeedIdentity, FeedKind, FeedPage, IndividualVote, Post, Rating};

/// Create a test post with a title and no vote
pub fn test_post(id: i64, rating: i64) -> Post {
    Post::new(id, Rating::new(rating, None)).with_field("title", format!("Post {}", id))
}

/// Create a page of posts with consecutive ids starting at `first_id`
pub fn test_page(first_id: i64, count: usize, total: u64) -> FeedPage {
    FeedPage {
        posts: (0..count as i64)
            .map(|i| test_post(first_id + i, 0))
            .collect(),
        total,
    }
}

/// Identity for the first page of a feed, 20 posts per page
pub fn test_identity(kind: FeedKind, entity_id: &str) -> FeedIdentity {
    FeedIdentity::new(entity_id, Some(kind), 1, 20).unwrap()
}

/// Create a test identity for a specific page
pub fn test_identity_page(kind: FeedKind, entity_id: &str, page: u32, page_size: u32) -> FeedIdentity {
    FeedIdentity::new(entity_id, Some(kind), page, page_size).unwrap()
}

/// Two plus votes, one minus and one retracted
pub fn test_votes() -> Vec<IndividualVote> {
    vec![
        IndividualVote::new("alice", 1),
        IndividualVote::new("bob", 1),
        IndividualVote::new("carol", -1),
        IndividualVote::new("dave", 0),
    ]
}
