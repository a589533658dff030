//! Application layer
//!
//! The stateful view components and the pure helpers they render with.
//! Components talk to the outside world only through domain ports.

pub mod feed_loader;
pub mod messages;
pub mod placement;
pub mod styles;
pub mod vote_widget;

pub use feed_loader::{FeedFailure, FeedLoader, FeedSnapshot, LoadingOnError, RefreshOutcome};
pub use messages::{Locale, Messages};
pub use placement::{choose_placement, AnchorRect, Placement, ViewportMetrics, POPUP_OFFSET_PX};
pub use styles::{list_value_tone, Tone, VoteStyles};
pub use vote_widget::{
    ChangePhase, PointerButton, PointerHit, PopupSummary, PopupView, RatingCallback, RatingChange,
    VoteOptions, VotePhase, VoteWidget,
};
