//! Feed cache adapters

pub mod file;
pub mod memory;

pub use file::JsonFileCache;
pub use memory::InMemoryFeedCache;
