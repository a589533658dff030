//! Voter popup placement
//!
//! The popup opens below the rating unless that would run past the end of
//! the document, in which case it opens above.

use serde::Serialize;

/// Distance between the rating and the popup edge, in pixels
pub const POPUP_OFFSET_PX: u32 = 30;

/// Anchor (the rating element) geometry relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorRect {
    /// Top edge relative to the viewport
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportMetrics {
    /// How far the document is scrolled
    pub scroll_top: f64,
    /// Total scrollable document height
    pub scroll_height: f64,
    /// Rendered height of the popup
    pub popup_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Above,
    Below,
}

pub fn choose_placement(anchor: AnchorRect, viewport: ViewportMetrics) -> Placement {
    let y = anchor.top + viewport.scroll_top;
    if y + anchor.height + viewport.popup_height > viewport.scroll_height {
        Placement::Above
    } else {
        Placement::Below
    }
}
