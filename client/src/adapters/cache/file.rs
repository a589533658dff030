//! Durable feed cache backed by one JSON file per key
//!
//! File names are the hex SHA-256 of the serialized key, so any identity maps
//! to a safe, fixed-length name. Read or write failures are logged and turn
//! into misses.

use std::fs;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::domain::entities::FeedPage;
use crate::domain::ports::{CacheKey, FeedCache};

/// Reads and writes happen synchronously on the caller's thread. Pages are
/// small, so `FeedLoader::refresh` calls it inline rather than through
/// `spawn_blocking`.
pub struct JsonFileCache {
    dir: PathBuf,
}

impl JsonFileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &CacheKey) -> Option<PathBuf> {
        let encoded = match serde_json::to_vec(key) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Failed to encode cache key {:?}: {}", key, e);
                return None;
            }
        };
        let digest = Sha256::digest(&encoded);
        Some(self.dir.join(format!("{}.json", hex::encode(digest))))
    }
}

impl FeedCache for JsonFileCache {
    fn get(&self, key: &CacheKey) -> Option<FeedPage> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read cache file {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::warn!("Ignoring corrupt cache file {}: {}", path.display(), e);
                None
            }
        }
    }

    fn put(&self, key: CacheKey, page: FeedPage) {
        let Some(path) = self.path_for(&key) else {
            return;
        };

        let write = || -> std::io::Result<()> {
            fs::create_dir_all(&self.dir)?;
            let bytes = serde_json::to_vec(&page)?;
            fs::write(&path, bytes)
        };

        if let Err(e) = write() {
            tracing::warn!("Failed to write cache file {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FeedIdentity, FeedKind, Post, PostId, Rating};

    fn key(kind: FeedKind) -> CacheKey {
        CacheKey::feed(&FeedIdentity::new("main", Some(kind), 1, 20).unwrap())
    }

    #[test]
    fn survives_a_new_instance() {
        let tmp = tempfile::TempDir::new().unwrap();
        let page = FeedPage {
            posts: vec![Post::new(PostId(3), Rating::new(4, Some(1))).with_field("title", "cached")],
            total: 31,
        };

        JsonFileCache::new(tmp.path()).put(key(FeedKind::All), page.clone());

        let reopened = JsonFileCache::new(tmp.path());
        assert_eq!(reopened.get(&key(FeedKind::All)), Some(page));
        assert_eq!(reopened.get(&key(FeedKind::Watch)), None);
    }

    #[test]
    fn corrupt_file_is_a_miss() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cache = JsonFileCache::new(tmp.path());
        let path = cache.path_for(&key(FeedKind::All)).unwrap();
        fs::write(&path, b"{ not json").unwrap();

        assert_eq!(cache.get(&key(FeedKind::All)), None);
    }

    #[test]
    fn creates_missing_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cache = JsonFileCache::new(tmp.path().join("nested/feed"));

        cache.put(
            key(FeedKind::Subscriptions),
            FeedPage {
                posts: vec![],
                total: 0,
            },
        );

        assert!(cache.get(&key(FeedKind::Subscriptions)).is_some());
    }
}
