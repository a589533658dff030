//! Unified error types for the forum view layer
//!
//! This module defines error types for each layer:
//! - `DomainError`: Invalid domain values (bad feed identity, unknown kinds)
//! - `ApiError`: Remote forum API errors
//! - `VoteError`: Vote casting errors surfaced to the caller
//! - `PopupError`: Voter-list popup errors surfaced to the caller

use thiserror::Error;

/// Domain layer errors - pure validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Forum API client errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid token")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Errors returned by `VoteWidget::cast_vote`
#[derive(Debug, Error)]
pub enum VoteError {
    #[error("Voting is disabled for this target")]
    VotingDisabled,

    #[error("Vote value {value} is not allowed (double mode: {double})")]
    InvalidVote { value: i64, double: bool },

    #[error("A vote for this target is still in flight")]
    VoteInFlight,

    #[error("Vote submission failed: {0}")]
    Submission(#[source] ApiError),
}

/// Errors returned by `VoteWidget::toggle_popup`
#[derive(Debug, Error)]
pub enum PopupError {
    #[error("Failed to load vote list: {0}")]
    VoteListLoad(#[source] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_messages() {
        let err = ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");
        assert_eq!(ApiError::RateLimited.to_string(), "Rate limited");
    }

    #[test]
    fn vote_error_wraps_api_source() {
        let err = VoteError::Submission(ApiError::Unauthorized);
        assert!(err.to_string().contains("Unauthorized"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
