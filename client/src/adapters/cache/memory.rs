//! In-process feed cache

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::entities::FeedPage;
use crate::domain::ports::{CacheKey, FeedCache};

/// Feed pages kept for the lifetime of the process
#[derive(Default)]
pub struct InMemoryFeedCache {
    pages: RwLock<HashMap<CacheKey, FeedPage>>,
}

impl InMemoryFeedCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl FeedCache for InMemoryFeedCache {
    fn get(&self, key: &CacheKey) -> Option<FeedPage> {
        let pages = self.pages.read().unwrap_or_else(PoisonError::into_inner);
        pages.get(key).cloned()
    }

    fn put(&self, key: CacheKey, page: FeedPage) {
        let mut pages = self.pages.write().unwrap_or_else(PoisonError::into_inner);
        pages.insert(key, page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FeedIdentity, FeedKind, Post, PostId, Rating};

    fn key(page: u32) -> CacheKey {
        CacheKey::feed(&FeedIdentity::new("main", Some(FeedKind::Site), page, 20).unwrap())
    }

    #[test]
    fn stores_by_full_identity() {
        let cache = InMemoryFeedCache::new();
        let page = FeedPage {
            posts: vec![Post::new(PostId(1), Rating::default())],
            total: 1,
        };

        cache.put(key(1), page.clone());

        assert_eq!(cache.get(&key(1)), Some(page));
        assert_eq!(cache.get(&key(2)), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn put_replaces_previous_entry() {
        let cache = InMemoryFeedCache::new();
        cache.put(
            key(1),
            FeedPage {
                posts: vec![],
                total: 0,
            },
        );
        cache.put(
            key(1),
            FeedPage {
                posts: vec![],
                total: 9,
            },
        );

        assert_eq!(cache.get(&key(1)).map(|p| p.total), Some(9));
        assert_eq!(cache.len(), 1);
    }
}
