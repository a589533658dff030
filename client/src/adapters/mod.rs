//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod cache;
pub mod http;
pub mod notifier;

pub use cache::{InMemoryFeedCache, JsonFileCache};
pub use http::HttpForumApi;
pub use notifier::TracingNotifier;
