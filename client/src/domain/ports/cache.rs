//! Feed cache port trait
//!
//! A key→value store consulted for instant rendering before the network
//! answers. Misses are normal; a cache must never fail the caller.

use serde::Serialize;

use crate::domain::entities::{FeedIdentity, FeedPage};

/// Domain tag for feed pages
pub const FEED_CACHE_DOMAIN: &str = "feed";

/// (domain tag, identity tuple)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CacheKey {
    pub domain: &'static str,
    pub identity: FeedIdentity,
}

impl CacheKey {
    pub fn feed(identity: &FeedIdentity) -> Self {
        Self {
            domain: FEED_CACHE_DOMAIN,
            identity: identity.clone(),
        }
    }
}

pub trait FeedCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<FeedPage>;

    fn put(&self, key: CacheKey, page: FeedPage);
}
