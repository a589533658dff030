//! Vote widget
//!
//! Rating control for one post, comment or user. Votes are applied
//! optimistically, then either replaced by the server's numbers or rolled
//! back. A details popup lazily loads the individual votes and splits them
//! into plus and minus buckets.
//!
//! The vote axis (`Idle`/`Voting`) and the popup axis
//! (`Closed`/`Loading`/`Open`) are independent.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::app::messages::Messages;
use crate::app::styles::{list_value_tone, Tone, VoteStyles};
use crate::domain::entities::{
    IndividualVote, Rating, VoteAggregate, VoteOutcome, VoteState, VoteTarget,
};
use crate::domain::ports::{ForumApi, Notification, Notifier, ToastPlacement};
use crate::error::{PopupError, VoteError};

const SINGLE_VALUES: [i64; 3] = [-1, 0, 1];
const DOUBLE_VALUES: [i64; 5] = [-2, -1, 0, 1, 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangePhase {
    /// Applied locally, server not asked yet
    Optimistic,
    /// Server's authoritative numbers
    Confirmed,
    /// Server refused; values are the ones from before the attempt
    RolledBack,
}

/// What the host hears on every local rating change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingChange {
    pub rating: i64,
    /// `None` only when rolling back to a state without a vote
    pub vote: Option<i64>,
    pub phase: ChangePhase,
}

pub type RatingCallback = Arc<dyn Fn(RatingChange) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteOptions {
    /// Allow ±2 votes
    pub double: bool,
    pub voting_disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VotePhase {
    Idle,
    Voting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerHit {
    InsidePopup,
    Outside,
}

/// Popup state as seen from outside
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupView {
    Closed,
    Loading,
    Open {
        votes: Vec<IndividualVote>,
        aggregate: VoteAggregate,
    },
}

/// Everything the popup shows, already localised
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopupSummary {
    pub rating: i64,
    pub tone: Tone,
    pub positive_line: String,
    pub negative_line: String,
    pub positive_votes: Vec<IndividualVote>,
    pub negative_votes: Vec<IndividualVote>,
    /// Placeholder for an empty bucket
    pub empty_text: &'static str,
}

enum PopupState {
    Closed,
    Loading {
        session: u64,
    },
    Open {
        votes: Vec<IndividualVote>,
        aggregate: VoteAggregate,
    },
}

impl PopupState {
    fn view(&self) -> PopupView {
        match self {
            PopupState::Closed => PopupView::Closed,
            PopupState::Loading { .. } => PopupView::Loading,
            PopupState::Open { votes, aggregate } => PopupView::Open {
                votes: votes.clone(),
                aggregate: aggregate.clone(),
            },
        }
    }
}

struct WidgetState {
    vote: VoteState,
    phase: VotePhase,
    popup: PopupState,
    popup_session: u64,
}

pub struct VoteWidget {
    target: VoteTarget,
    options: VoteOptions,
    api: Arc<dyn ForumApi>,
    notifier: Arc<dyn Notifier>,
    messages: Messages,
    on_vote: Option<RatingCallback>,
    state: Mutex<WidgetState>,
}

impl VoteWidget {
    pub fn new(
        target: VoteTarget,
        rating: Rating,
        api: Arc<dyn ForumApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            target,
            options: VoteOptions::default(),
            api,
            notifier,
            messages: Messages::default(),
            on_vote: None,
            state: Mutex::new(WidgetState {
                vote: VoteState::new(rating.vote, rating.value),
                phase: VotePhase::Idle,
                popup: PopupState::Closed,
                popup_session: 0,
            }),
        }
    }

    pub fn with_options(mut self, options: VoteOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn on_vote(mut self, callback: RatingCallback) -> Self {
        self.on_vote = Some(callback);
        self
    }

    pub fn options(&self) -> VoteOptions {
        self.options
    }

    pub fn state(&self) -> VoteState {
        self.lock().vote
    }

    pub fn phase(&self) -> VotePhase {
        self.lock().phase
    }

    pub fn popup(&self) -> PopupView {
        self.lock().popup.view()
    }

    pub fn styles(&self) -> VoteStyles {
        VoteStyles::for_vote(self.state().current_vote)
    }

    /// Values the buttons may cast
    pub fn allowed_values(&self) -> &'static [i64] {
        if self.options.double {
            &DOUBLE_VALUES
        } else {
            &SINGLE_VALUES
        }
    }

    /// Tooltip for the vote buttons, only when voting is disabled
    pub fn button_hint(&self) -> Option<&'static str> {
        self.options
            .voting_disabled
            .then(|| self.messages.voting_disabled())
    }

    /// Cast `value`, or retract the vote if it equals the current one.
    ///
    /// The new rating is visible (and sent to the host) before the request
    /// goes out. A failed request restores the exact previous state.
    pub async fn cast_vote(&self, value: i64) -> Result<VoteOutcome, VoteError> {
        if self.options.voting_disabled {
            return Err(VoteError::VotingDisabled);
        }
        if !self.allowed_values().contains(&value) {
            return Err(VoteError::InvalidVote {
                value,
                double: self.options.double,
            });
        }

        let (previous, optimistic) = {
            let mut state = self.lock();
            if state.phase == VotePhase::Voting {
                return Err(VoteError::VoteInFlight);
            }

            let previous = state.vote;
            let effective = if previous.current_vote == Some(value) {
                0
            } else {
                value
            };
            let rating = previous.current_rating - previous.vote_value() + effective;

            state.vote = VoteState::new(Some(effective), rating);
            state.phase = VotePhase::Voting;
            (previous, state.vote)
        };

        // Rolls back if this future is dropped before the server answers
        let pending = PendingVote {
            widget: self,
            previous,
            settled: false,
        };
        self.notify_host(optimistic, ChangePhase::Optimistic);

        let effective = optimistic.vote_value();
        tracing::debug!(vote_target = %self.target, vote = effective, "Casting vote");

        match self.api.cast_vote(self.target, effective).await {
            Ok(outcome) => {
                pending.confirm(VoteState::new(Some(outcome.vote), outcome.rating));
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(vote_target = %self.target, vote = effective, "Vote failed: {}", e);
                pending.roll_back();
                self.notifier.notify(
                    Notification::warning(self.messages.vote_not_counted())
                        .at(ToastPlacement::BottomRight),
                );
                Err(VoteError::Submission(e))
            }
        }
    }

    /// Open the popup (loading the votes) or close it if it is showing.
    pub async fn toggle_popup(&self) -> Result<PopupView, PopupError> {
        let session = {
            let mut state = self.lock();
            if !matches!(state.popup, PopupState::Closed) {
                state.popup = PopupState::Closed;
                return Ok(PopupView::Closed);
            }
            state.popup_session += 1;
            let session = state.popup_session;
            state.popup = PopupState::Loading { session };
            session
        };

        let loading = PendingPopup {
            widget: self,
            session,
        };
        tracing::debug!(vote_target = %self.target, session, "Loading vote list");
        let result = self.api.vote_list(self.target).await;
        std::mem::forget(loading);

        let mut state = self.lock();
        let current = matches!(state.popup, PopupState::Loading { session: s } if s == session);
        if !current {
            tracing::debug!(vote_target = %self.target, session, "Discarding vote list for a closed popup");
            return Ok(state.popup.view());
        }

        match result {
            Ok(votes) => {
                let aggregate = VoteAggregate::from_votes(&votes);
                if state.phase == VotePhase::Idle {
                    state.vote.current_rating = votes.iter().map(|v| v.value).sum();
                }
                state.popup = PopupState::Open { votes, aggregate };
                Ok(state.popup.view())
            }
            Err(e) => {
                state.popup = PopupState::Closed;
                drop(state);

                tracing::warn!(vote_target = %self.target, "Vote list failed: {}", e);
                self.notifier
                    .notify(Notification::error(self.messages.vote_list_load_failed()));
                Err(PopupError::VoteListLoad(e))
            }
        }
    }

    /// Close the popup and forget the loaded votes
    pub fn hide_popup(&self) {
        self.lock().popup = PopupState::Closed;
    }

    /// Document-wide pointer press. Returns true when it closed the popup.
    pub fn pointer_down(&self, button: PointerButton, hit: PointerHit) -> bool {
        if button != PointerButton::Primary || hit != PointerHit::Outside {
            return false;
        }
        let mut state = self.lock();
        if matches!(state.popup, PopupState::Closed) {
            return false;
        }
        state.popup = PopupState::Closed;
        true
    }

    /// Adopt the host's canonical rating. Ignored while a vote is in flight.
    pub fn sync_from_host(&self, rating: Rating) -> bool {
        let mut state = self.lock();
        if state.phase == VotePhase::Voting {
            tracing::debug!(vote_target = %self.target, "Ignoring host rating during a vote");
            return false;
        }
        state.vote = VoteState::new(rating.vote, rating.value);
        true
    }

    /// Localised popup contents, once the votes are loaded
    pub fn popup_summary(&self) -> Option<PopupSummary> {
        let state = self.lock();
        let PopupState::Open { aggregate, .. } = &state.popup else {
            return None;
        };

        Some(PopupSummary {
            rating: state.vote.current_rating,
            tone: list_value_tone(state.vote.current_vote),
            positive_line: self.messages.positive_summary(&aggregate.positive),
            negative_line: self.messages.negative_summary(&aggregate.negative),
            positive_votes: aggregate.positive_votes.clone(),
            negative_votes: aggregate.negative_votes.clone(),
            empty_text: self.messages.empty_vote_list(),
        })
    }

    fn notify_host(&self, vote: VoteState, phase: ChangePhase) {
        if let Some(callback) = &self.on_vote {
            callback(RatingChange {
                rating: vote.current_rating,
                vote: vote.current_vote,
                phase,
            });
        }
    }

    fn settle(&self, vote: VoteState, phase: ChangePhase) {
        {
            let mut state = self.lock();
            state.vote = vote;
            state.phase = VotePhase::Idle;
        }
        self.notify_host(vote, phase);
    }

    fn lock(&self) -> MutexGuard<'_, WidgetState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An unresolved cast. Dropping it unsettled restores the pre-vote state.
struct PendingVote<'a> {
    widget: &'a VoteWidget,
    previous: VoteState,
    settled: bool,
}

impl PendingVote<'_> {
    fn confirm(mut self, confirmed: VoteState) {
        self.settled = true;
        self.widget.settle(confirmed, ChangePhase::Confirmed);
    }

    fn roll_back(mut self) {
        self.settled = true;
        self.widget.settle(self.previous, ChangePhase::RolledBack);
    }
}

impl Drop for PendingVote<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!(vote_target = %self.widget.target, "Vote cancelled in flight, rolling back");
            self.widget.settle(self.previous, ChangePhase::RolledBack);
        }
    }
}

/// A vote list request. Dropping it closes the popup if it still waits for
/// this session.
struct PendingPopup<'a> {
    widget: &'a VoteWidget,
    session: u64,
}

impl Drop for PendingPopup<'_> {
    fn drop(&mut self) {
        let mut state = self.widget.lock();
        if matches!(state.popup, PopupState::Loading { session } if session == self.session) {
            tracing::debug!(vote_target = %self.widget.target, session = self.session, "Vote list load cancelled");
            state.popup = PopupState::Closed;
        }
    }
}
