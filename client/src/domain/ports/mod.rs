//! Domain ports (traits)
//!
//! Port traits define the collaborators the view components require.
//! Adapters provide concrete implementations of these traits.

pub mod cache;
pub mod forum_api;
pub mod notifier;

pub use cache::{CacheKey, FeedCache, FEED_CACHE_DOMAIN};
pub use forum_api::ForumApi;
pub use notifier::{Notification, Notifier, Severity, ToastPlacement};
