//! Visual state of the rating controls, as a pure function of the vote

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Neutral,
    Plus,
    Minus,
    /// The opposite direction of an existing vote
    Disabled,
}

/// Tone of every element of the rating widget. `minus2`/`plus2` only exist
/// in double mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VoteStyles {
    pub value: Tone,
    pub minus: Tone,
    pub plus: Tone,
    pub minus2: Tone,
    pub plus2: Tone,
}

impl VoteStyles {
    pub fn for_vote(vote: Option<i64>) -> Self {
        let mut styles = Self::default();
        match vote.unwrap_or(0) {
            v if v < 0 => {
                styles.value = Tone::Minus;
                styles.minus = Tone::Minus;
                styles.plus = Tone::Disabled;
                styles.plus2 = Tone::Disabled;
                if v < -1 {
                    styles.minus2 = Tone::Minus;
                }
            }
            v if v > 0 => {
                styles.value = Tone::Plus;
                styles.plus = Tone::Plus;
                styles.minus = Tone::Disabled;
                styles.minus2 = Tone::Disabled;
                if v > 1 {
                    styles.plus2 = Tone::Plus;
                }
            }
            _ => {}
        }
        styles
    }
}

/// Tone of the rating shown in the popup header
pub fn list_value_tone(vote: Option<i64>) -> Tone {
    match vote.unwrap_or(0) {
        v if v > 0 => Tone::Plus,
        v if v < 0 => Tone::Minus,
        _ => Tone::Neutral,
    }
}
