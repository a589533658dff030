//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing. They record
//! every call so tests can verify which endpoint a component hit, and each
//! endpoint can be held open until the test releases it.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, RwLock};
use tokio::sync::oneshot;

use crate::domain::entities::{FeedPage, IndividualVote, Post, Rating, VoteOutcome, VoteTarget};
use crate::domain::ports::{ForumApi, Notification, Notifier};
use crate::error::ApiError;

// ============================================================================
// Forum API
// ============================================================================

/// A call the mock received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    FeedBySite {
        site: String,
        page: u32,
        per_page: u32,
    },
    FeedSubscriptions {
        page: u32,
        per_page: u32,
    },
    FeedAll {
        page: u32,
        per_page: u32,
    },
    FeedWatch {
        all: bool,
        page: u32,
        per_page: u32,
    },
    UserPosts {
        username: String,
        page: u32,
        per_page: u32,
    },
    VoteList(VoteTarget),
    CastVote {
        target: VoteTarget,
        value: i64,
    },
}

/// Endpoint groups that can be held or made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Feed,
    VoteList,
    CastVote,
}

#[derive(Default)]
pub struct MockForumApi {
    calls: Mutex<Vec<ApiCall>>,
    gates: Mutex<HashMap<Endpoint, oneshot::Receiver<()>>>,
    failing: RwLock<HashSet<Endpoint>>,
    feed_total: RwLock<u64>,
    feed_page: RwLock<Option<FeedPage>>,
    votes: RwLock<Vec<IndividualVote>>,
    /// target -> (rating, current user's vote) as the server sees it
    targets: Mutex<HashMap<VoteTarget, (i64, i64)>>,
    /// Added to the rating on every cast, as if other users voted meanwhile
    concurrent_delta: RwLock<i64>,
}

impl MockForumApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total reported by every feed endpoint
    pub fn with_feed_total(self, total: u64) -> Self {
        *self.feed_total.write().unwrap() = total;
        self
    }

    /// Return this page from every feed endpoint instead of a generated one
    pub fn with_feed_page(self, page: FeedPage) -> Self {
        *self.feed_page.write().unwrap() = Some(page);
        self
    }

    pub fn with_votes(self, votes: Vec<IndividualVote>) -> Self {
        *self.votes.write().unwrap() = votes;
        self
    }

    pub fn with_target(self, target: VoteTarget, rating: i64, vote: i64) -> Self {
        self.targets.lock().unwrap().insert(target, (rating, vote));
        self
    }

    pub fn with_concurrent_delta(self, delta: i64) -> Self {
        *self.concurrent_delta.write().unwrap() = delta;
        self
    }

    pub fn with_failure(self, endpoint: Endpoint) -> Self {
        self.set_failing(endpoint, true);
        self
    }

    pub fn set_failing(&self, endpoint: Endpoint, failing: bool) {
        let mut set = self.failing.write().unwrap();
        if failing {
            set.insert(endpoint);
        } else {
            set.remove(&endpoint);
        }
    }

    /// Hold the next call to `endpoint` until the returned sender fires
    pub fn hold(&self, endpoint: Endpoint) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(endpoint, rx);
        tx
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Feed pages contain one post whose id encodes the page: page 2 -> 201
    pub fn generated_post_id(page: u32) -> i64 {
        i64::from(page) * 100 + 1
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    async fn pass_gate(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        let gate = self.gates.lock().unwrap().remove(&endpoint);
        if let Some(rx) = gate {
            let _ = rx.await;
        }

        if self.failing.read().unwrap().contains(&endpoint) {
            return Err(ApiError::Api {
                status: 500,
                message: format!("{:?} is down", endpoint),
            });
        }
        Ok(())
    }

    async fn feed(&self, call: ApiCall, page: u32) -> Result<FeedPage, ApiError> {
        self.record(call);
        self.pass_gate(Endpoint::Feed).await?;

        if let Some(fixed) = self.feed_page.read().unwrap().clone() {
            return Ok(fixed);
        }
        Ok(FeedPage {
            posts: vec![Post::new(Self::generated_post_id(page), Rating::new(0, None))],
            total: *self.feed_total.read().unwrap(),
        })
    }
}

#[async_trait]
impl ForumApi for MockForumApi {
    async fn feed_by_site(
        &self,
        site: &str,
        page: u32,
        per_page: u32,
    ) -> Result<FeedPage, ApiError> {
        self.feed(
            ApiCall::FeedBySite {
                site: site.to_string(),
                page,
                per_page,
            },
            page,
        )
        .await
    }

    async fn feed_subscriptions(&self, page: u32, per_page: u32) -> Result<FeedPage, ApiError> {
        self.feed(ApiCall::FeedSubscriptions { page, per_page }, page)
            .await
    }

    async fn feed_all(&self, page: u32, per_page: u32) -> Result<FeedPage, ApiError> {
        self.feed(ApiCall::FeedAll { page, per_page }, page).await
    }

    async fn feed_watch(&self, all: bool, page: u32, per_page: u32) -> Result<FeedPage, ApiError> {
        self.feed(
            ApiCall::FeedWatch {
                all,
                page,
                per_page,
            },
            page,
        )
        .await
    }

    async fn user_posts(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<FeedPage, ApiError> {
        self.feed(
            ApiCall::UserPosts {
                username: username.to_string(),
                page,
                per_page,
            },
            page,
        )
        .await
    }

    async fn vote_list(&self, target: VoteTarget) -> Result<Vec<IndividualVote>, ApiError> {
        self.record(ApiCall::VoteList(target));
        self.pass_gate(Endpoint::VoteList).await?;
        Ok(self.votes.read().unwrap().clone())
    }

    async fn cast_vote(&self, target: VoteTarget, value: i64) -> Result<VoteOutcome, ApiError> {
        self.record(ApiCall::CastVote { target, value });
        self.pass_gate(Endpoint::CastVote).await?;

        let delta = *self.concurrent_delta.read().unwrap();
        let mut targets = self.targets.lock().unwrap();
        let entry = targets.entry(target).or_insert((0, 0));
        entry.0 = entry.0 - entry.1 + value + delta;
        entry.1 = value;

        Ok(VoteOutcome {
            vote: entry.1,
            rating: entry.0,
        })
    }
}

// ============================================================================
// Notifier
// ============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}
