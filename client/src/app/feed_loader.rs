//! Feed loader
//!
//! Loads one page of a feed, exposes loading/error/pagination state, and lets
//! hosts patch an already loaded post without a refetch.
//!
//! Callers re-run `refresh` whenever any part of the identity changes. Every
//! refresh takes a new generation number; a response that comes back after a
//! newer refresh started is dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::app::messages::Messages;
use crate::app::vote_widget::{RatingCallback, RatingChange};
use crate::domain::entities::{FeedIdentity, FeedKind, FeedPage, Post, PostId, PostPatch, Rating};
use crate::domain::ports::{CacheKey, FeedCache, ForumApi};
use crate::error::{ApiError, DomainError};

/// What a failed fetch does to the loading flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingOnError {
    /// Leave it raised, so the host keeps showing its spinner next to the error
    #[default]
    Keep,
    Clear,
}

impl std::str::FromStr for LoadingOnError {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep" => Ok(LoadingOnError::Keep),
            "clear" => Ok(LoadingOnError::Clear),
            _ => Err(DomainError::Validation(format!(
                "Unknown loading policy: {}. Use: keep, clear",
                s
            ))),
        }
    }
}

/// A failed fetch: message for the user plus the underlying cause
#[derive(Debug, Clone)]
pub struct FeedFailure {
    pub message: String,
    pub cause: Arc<ApiError>,
}

/// Read-only view of the loader
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    /// Identity of the most recent refresh
    pub identity: Option<FeedIdentity>,
    /// `None` until something was loaded or found in the cache
    pub posts: Option<Arc<Vec<Post>>>,
    pub loading: bool,
    pub page_count: u64,
    pub error: Option<FeedFailure>,
}

impl Default for FeedSnapshot {
    fn default() -> Self {
        Self {
            identity: None,
            posts: None,
            loading: true,
            page_count: 0,
            error: None,
        }
    }
}

/// How a refresh ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Loaded,
    Failed,
    /// A newer refresh started while this one was in flight
    Superseded,
    /// No feed kind, nothing fetched
    Skipped,
}

#[derive(Default)]
struct FeedState {
    snapshot: FeedSnapshot,
    generation: u64,
}

struct Inner {
    api: Arc<dyn ForumApi>,
    cache: Arc<dyn FeedCache>,
    messages: Messages,
    loading_on_error: LoadingOnError,
    state: Mutex<FeedState>,
}

/// Cheap to clone; clones share state
#[derive(Clone)]
pub struct FeedLoader {
    inner: Arc<Inner>,
}

impl FeedLoader {
    pub fn new(api: Arc<dyn ForumApi>, cache: Arc<dyn FeedCache>) -> Self {
        Self::with_options(api, cache, Messages::default(), LoadingOnError::default())
    }

    pub fn with_options(
        api: Arc<dyn ForumApi>,
        cache: Arc<dyn FeedCache>,
        messages: Messages,
        loading_on_error: LoadingOnError,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                cache,
                messages,
                loading_on_error,
                state: Mutex::new(FeedState::default()),
            }),
        }
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.state().snapshot.clone()
    }

    /// Load the page `identity` points at
    pub async fn refresh(&self, identity: FeedIdentity) -> RefreshOutcome {
        let Some(kind) = identity.kind else {
            tracing::debug!(entity_id = %identity.entity_id, "No feed kind, skipping fetch");
            return RefreshOutcome::Skipped;
        };

        let key = CacheKey::feed(&identity);
        let cached = self.inner.cache.get(&key);

        let generation = {
            let mut state = self.state();
            state.generation += 1;
            state.snapshot.loading = true;
            state.snapshot.identity = Some(identity.clone());
            if let Some(cached) = cached {
                state.snapshot.page_count = cached.page_count(identity.page_size);
                state.snapshot.posts = Some(Arc::new(cached.posts));
            }
            state.generation
        };

        tracing::debug!(
            %kind,
            entity_id = %identity.entity_id,
            page = identity.page,
            page_size = identity.page_size,
            generation,
            "Fetching feed"
        );

        let result = self.fetch(kind, &identity).await;

        let mut state = self.state();
        if state.generation != generation {
            tracing::debug!(
                %kind,
                generation,
                current = state.generation,
                "Discarding superseded feed response"
            );
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(page) => {
                state.snapshot.posts = Some(Arc::new(page.posts.clone()));
                state.snapshot.page_count = page.page_count(identity.page_size);
                state.snapshot.loading = false;
                state.snapshot.error = None;
                drop(state);

                tracing::debug!(%kind, posts = page.posts.len(), total = page.total, "Feed loaded");
                self.inner.cache.put(key, page);
                RefreshOutcome::Loaded
            }
            Err(e) => {
                tracing::warn!(%kind, entity_id = %identity.entity_id, "Feed error: {}", e);
                state.snapshot.error = Some(FeedFailure {
                    message: self.inner.messages.feed_load_failed().to_string(),
                    cause: Arc::new(e),
                });
                if self.inner.loading_on_error == LoadingOnError::Clear {
                    state.snapshot.loading = false;
                }
                RefreshOutcome::Failed
            }
        }
    }

    /// Shallow-merge `patch` into the loaded post with `id`.
    ///
    /// Returns false, leaving the posts untouched, when nothing is loaded or
    /// no post has that id.
    pub fn update_post(&self, id: PostId, patch: &PostPatch) -> bool {
        let mut state = self.state();

        let updated = {
            let Some(posts) = state.snapshot.posts.as_ref() else {
                return false;
            };
            let Some(index) = posts.iter().position(|p| p.id == id) else {
                return false;
            };
            let mut next = Vec::clone(posts);
            next[index] = posts[index].merged(patch);
            next
        };

        state.snapshot.posts = Some(Arc::new(updated));
        true
    }

    /// Host callback for a vote widget on post `id`: keeps the loaded copy of
    /// the post's rating in step with the widget.
    pub fn rating_sync(&self, id: PostId) -> RatingCallback {
        let loader = self.clone();
        Arc::new(move |change: RatingChange| {
            let patch = PostPatch::rating(Rating::new(change.rating, change.vote));
            if !loader.update_post(id, &patch) {
                tracing::debug!(post = %id, "Rating change for a post that is not loaded");
            }
        })
    }

    async fn fetch(&self, kind: FeedKind, identity: &FeedIdentity) -> Result<FeedPage, ApiError> {
        let api = &self.inner.api;
        let (page, per_page) = (identity.page, identity.page_size);

        match kind {
            FeedKind::All => api.feed_all(page, per_page).await,
            FeedKind::Subscriptions => api.feed_subscriptions(page, per_page).await,
            FeedKind::Site => api.feed_by_site(&identity.entity_id, page, per_page).await,
            FeedKind::Watch => api.feed_watch(false, page, per_page).await,
            FeedKind::WatchAll => api.feed_watch(true, page, per_page).await,
            FeedKind::UserProfile => api.user_posts(&identity.entity_id, page, per_page).await,
        }
    }

    fn state(&self) -> MutexGuard<'_, FeedState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
