//! Feed domain entities
//!
//! A feed is addressed by a `FeedIdentity`; any change to one of its fields
//! means a different page of a different feed and therefore a new fetch.

use serde::{Deserialize, Serialize};

use super::Post;
use crate::error::DomainError;

/// Which feed to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedKind {
    All,
    Subscriptions,
    Site,
    Watch,
    WatchAll,
    UserProfile,
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedKind::All => write!(f, "all"),
            FeedKind::Subscriptions => write!(f, "subscriptions"),
            FeedKind::Site => write!(f, "site"),
            FeedKind::Watch => write!(f, "watch"),
            FeedKind::WatchAll => write!(f, "watch-all"),
            FeedKind::UserProfile => write!(f, "user-profile"),
        }
    }
}

impl std::str::FromStr for FeedKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(FeedKind::All),
            "subscriptions" => Ok(FeedKind::Subscriptions),
            "site" => Ok(FeedKind::Site),
            "watch" => Ok(FeedKind::Watch),
            "watch-all" => Ok(FeedKind::WatchAll),
            "user-profile" => Ok(FeedKind::UserProfile),
            _ => Err(DomainError::Validation(format!(
                "Unknown feed kind: {}. Use: all, subscriptions, site, watch, watch-all, user-profile",
                s
            ))),
        }
    }
}

/// Full address of one feed page. Also the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedIdentity {
    /// Site name for `Site`, username for `UserProfile`, ignored otherwise
    pub entity_id: String,
    /// `None` means the host has not decided yet; nothing gets fetched
    pub kind: Option<FeedKind>,
    pub page: u32,
    pub page_size: u32,
}

impl FeedIdentity {
    pub fn new(
        entity_id: impl Into<String>,
        kind: Option<FeedKind>,
        page: u32,
        page_size: u32,
    ) -> Result<Self, DomainError> {
        if page == 0 {
            return Err(DomainError::Validation(
                "page numbers start at 1".to_string(),
            ));
        }
        if page_size == 0 {
            return Err(DomainError::Validation(
                "page size must be positive".to_string(),
            ));
        }
        Ok(Self {
            entity_id: entity_id.into(),
            kind,
            page,
            page_size,
        })
    }
}

/// One page of posts plus the total number of posts in the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub total: u64,
}

impl FeedPage {
    pub fn page_count(&self, page_size: u32) -> u64 {
        page_count(self.total, page_size)
    }
}

/// `floor((total - 1) / page_size) + 1`, and 0 for an empty feed.
pub fn page_count(total: u64, page_size: u32) -> u64 {
    if total == 0 || page_size == 0 {
        return 0;
    }
    (total - 1) / u64::from(page_size) + 1
}
