//! Forum session
//!
//! One feed loader plus one vote widget per target, wired together the way a
//! page wires them: votes on a post patch that post in the loaded feed, and a
//! reloaded feed pushes its ratings back into idle widgets.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{anyhow, Context, Result};
use forum_view::adapters::{HttpForumApi, InMemoryFeedCache, JsonFileCache, TracingNotifier};
use forum_view::app::{
    FeedLoader, Messages, PopupSummary, PopupView, RefreshOutcome, VoteOptions, VotePhase,
    VoteWidget,
};
use forum_view::domain::entities::{
    FeedIdentity, FeedKind, IndividualVote, Post, PostId, Rating, TargetKind, VoteTarget,
};
use forum_view::domain::ports::{FeedCache, ForumApi, Notifier};
use forum_view::Config;

/// Above this many widgets, idle ones off the loaded page are evicted
const MAX_WIDGETS: usize = 256;

#[derive(Clone)]
pub struct ForumSession {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn ForumApi>,
    notifier: Arc<dyn Notifier>,
    loader: FeedLoader,
    messages: Messages,
    page_size: u32,
    widgets: Mutex<HashMap<VoteTarget, Arc<VoteWidget>>>,
}

impl ForumSession {
    /// Create a session from environment variables
    ///
    /// See `Config::from_env` for the variables. FORUM_API_TOKEN is optional;
    /// without it feeds are fetched anonymously and votes will be refused.
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env();
        tracing::info!(
            api_url = %config.api_url,
            locale = %config.locale,
            authenticated = config.api_token.is_some(),
            "Loaded configuration"
        );

        let api = Arc::new(HttpForumApi::new(
            config.api_url.clone(),
            config.api_token.clone(),
        ));
        Self::new(&config, api, Arc::new(TracingNotifier))
    }

    pub fn new(
        config: &Config,
        api: Arc<dyn ForumApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let cache: Arc<dyn FeedCache> = match &config.cache_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir).with_context(|| {
                    format!("Failed to create cache directory {}", dir.display())
                })?;
                Arc::new(JsonFileCache::new(dir.clone()))
            }
            None => Arc::new(InMemoryFeedCache::new()),
        };

        let messages = Messages::new(config.locale);
        let loader =
            FeedLoader::with_options(api.clone(), cache, messages, config.loading_on_error);

        Ok(Self {
            inner: Arc::new(Inner {
                api,
                notifier,
                loader,
                messages,
                page_size: config.page_size,
                widgets: Mutex::new(HashMap::new()),
            }),
        })
    }

    /// Load one feed page and render it
    pub async fn feed(
        &self,
        kind: &str,
        entity_id: &str,
        page: u32,
        per_page: Option<u32>,
    ) -> Result<String> {
        let kind: FeedKind = kind.parse()?;
        let identity = FeedIdentity::new(
            entity_id,
            Some(kind),
            page,
            per_page.unwrap_or(self.inner.page_size),
        )?;

        let outcome = self.inner.loader.refresh(identity).await;
        let snapshot = self.inner.loader.snapshot();
        match outcome {
            RefreshOutcome::Loaded => {}
            RefreshOutcome::Failed => {
                let failure = snapshot.error.context("Feed failed without an error")?;
                return Err(anyhow!("{}: {}", failure.message, failure.cause));
            }
            RefreshOutcome::Superseded => {
                return Err(anyhow!("Feed request was superseded by a newer one"))
            }
            RefreshOutcome::Skipped => return Err(anyhow!("No feed kind given")),
        }

        let posts = snapshot.posts.unwrap_or_default();
        for post in posts.iter() {
            self.sync_widget(post);
        }
        let on_page = posts.iter().map(|post| post.id).collect::<HashSet<_>>();
        self.evict_idle_widgets(&on_page, false);
        Ok(render_feed(page, snapshot.page_count, &posts))
    }

    /// Cast (or retract) a vote
    pub async fn vote(
        &self,
        target_type: &str,
        target_id: i64,
        value: i64,
        double: bool,
    ) -> Result<String> {
        let target = VoteTarget::new(target_type.parse::<TargetKind>()?, target_id);
        let widget = self.widget(
            target,
            Some(VoteOptions {
                double,
                voting_disabled: false,
            }),
        );

        let outcome = widget
            .cast_vote(value)
            .await
            .with_context(|| format!("Vote on {} failed", target))?;

        let verb = if outcome.vote == 0 { "Retracted" } else { "Voted" };
        Ok(format!(
            "{} on {}: rating {:+}, your vote {:+}",
            verb, target, outcome.rating, outcome.vote
        ))
    }

    /// Load and render who voted how
    pub async fn votes(&self, target_type: &str, target_id: i64) -> Result<String> {
        let target = VoteTarget::new(target_type.parse::<TargetKind>()?, target_id);
        let widget = self.widget(target, None);

        widget.hide_popup();
        let view = widget
            .toggle_popup()
            .await
            .with_context(|| format!("Failed to load votes for {}", target))?;
        let summary = widget.popup_summary();
        widget.hide_popup();

        match (view, summary) {
            (PopupView::Open { .. }, Some(summary)) => Ok(render_votes(target, &summary)),
            _ => Err(anyhow!("Vote list for {} was discarded", target)),
        }
    }

    /// Widget for `target`. Passing options that differ from the existing
    /// widget's rebuilds it from its current state, unless it is mid-vote.
    fn widget(&self, target: VoteTarget, options: Option<VoteOptions>) -> Arc<VoteWidget> {
        let mut widgets = self.widgets();

        let rating = match widgets.get(&target) {
            Some(existing) => {
                let keep = existing.phase() == VotePhase::Voting
                    || options.map_or(true, |o| o == existing.options());
                if keep {
                    return existing.clone();
                }
                let state = existing.state();
                Rating::new(state.current_rating, state.current_vote)
            }
            None => self.rating_from_feed(target).unwrap_or_default(),
        };

        tracing::debug!(vote_target = %target, "Creating vote widget");
        let mut widget = VoteWidget::new(
            target,
            rating,
            self.inner.api.clone(),
            self.inner.notifier.clone(),
        )
        .with_options(options.unwrap_or_default())
        .with_messages(self.inner.messages);
        if target.kind == TargetKind::Post {
            widget = widget.on_vote(self.inner.loader.rating_sync(PostId(target.id)));
        }

        if widgets.len() >= MAX_WIDGETS {
            drop(widgets);
            self.evict_idle_widgets(&self.posts_on_page(), true);
            widgets = self.widgets();
        }

        let widget = Arc::new(widget);
        widgets.insert(target, widget.clone());
        widget
    }

    /// Drop idle widgets for posts not in `on_page`; with `all_kinds`, idle
    /// comment and user widgets go too.
    fn evict_idle_widgets(&self, on_page: &HashSet<PostId>, all_kinds: bool) {
        let mut widgets = self.widgets();
        let before = widgets.len();
        widgets.retain(|target, widget| {
            let kept = match target.kind {
                TargetKind::Post => on_page.contains(&PostId(target.id)),
                _ => !all_kinds,
            };
            kept || widget.phase() == VotePhase::Voting
        });

        let evicted = before - widgets.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = widgets.len(), "Evicted idle vote widgets");
        }
    }

    fn posts_on_page(&self) -> HashSet<PostId> {
        self.inner
            .loader
            .snapshot()
            .posts
            .map(|posts| posts.iter().map(|post| post.id).collect())
            .unwrap_or_default()
    }

    fn rating_from_feed(&self, target: VoteTarget) -> Option<Rating> {
        if target.kind != TargetKind::Post {
            return None;
        }
        let posts = self.inner.loader.snapshot().posts?;
        posts
            .iter()
            .find(|post| post.id == PostId(target.id))
            .map(|post| post.rating)
    }

    fn sync_widget(&self, post: &Post) {
        let widget = self.widgets().get(&VoteTarget::post(post.id.0)).cloned();
        if let Some(widget) = widget {
            widget.sync_from_host(post.rating);
        }
    }

    fn widgets(&self) -> MutexGuard<'_, HashMap<VoteTarget, Arc<VoteWidget>>> {
        self.inner
            .widgets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn render_feed(page: u32, page_count: u64, posts: &[Post]) -> String {
    if posts.is_empty() {
        return format!("Page {}/{}: no posts", page, page_count);
    }

    let mut out = format!("Page {}/{}\n", page, page_count);
    for post in posts {
        let title = post
            .fields
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("(untitled)");
        out.push_str(&format!("#{} [{:+}] {}", post.id, post.rating.value, title));
        if let Some(vote) = post.rating.vote.filter(|v| *v != 0) {
            out.push_str(&format!(" (your vote {:+})", vote));
        }
        out.push('\n');
    }
    out
}

fn render_votes(target: VoteTarget, summary: &PopupSummary) -> String {
    let mut out = format!("{} rating {:+}\n", target, summary.rating);
    if summary.positive_votes.is_empty() && summary.negative_votes.is_empty() {
        out.push_str(summary.empty_text);
        out.push('\n');
        return out;
    }

    for (line, votes) in [
        (&summary.positive_line, &summary.positive_votes),
        (&summary.negative_line, &summary.negative_votes),
    ] {
        out.push_str(line);
        out.push('\n');
        for IndividualVote { voter_name, value } in votes {
            out.push_str(&format!("  {} {:+}\n", voter_name, value));
        }
    }
    out
}
