//! Vote domain entities
//!
//! Votes are cast on posts, comments and users. A vote value is a small
//! signed integer; 0 means "no vote".

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Type of target being voted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Post,
    Comment,
    User,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Post => write!(f, "post"),
            TargetKind::Comment => write!(f, "comment"),
            TargetKind::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for TargetKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "post" => Ok(TargetKind::Post),
            "comment" => Ok(TargetKind::Comment),
            "user" => Ok(TargetKind::User),
            _ => Err(DomainError::Validation(format!(
                "Unknown vote target: {}. Use: post, comment, user",
                s
            ))),
        }
    }
}

/// The thing a vote widget is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteTarget {
    pub kind: TargetKind,
    pub id: i64,
}

impl VoteTarget {
    pub fn new(kind: TargetKind, id: i64) -> Self {
        Self { kind, id }
    }

    pub fn post(id: i64) -> Self {
        Self::new(TargetKind::Post, id)
    }

    pub fn comment(id: i64) -> Self {
        Self::new(TargetKind::Comment, id)
    }

    pub fn user(id: i64) -> Self {
        Self::new(TargetKind::User, id)
    }
}

impl std::fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.kind, self.id)
    }
}

/// One voter's vote, as listed in the voter popup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualVote {
    #[serde(rename = "username")]
    pub voter_name: String,
    #[serde(rename = "vote")]
    pub value: i64,
}

impl IndividualVote {
    pub fn new(voter_name: impl Into<String>, value: i64) -> Self {
        Self {
            voter_name: voter_name.into(),
            value,
        }
    }
}

/// The server's answer to a cast vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub vote: i64,
    pub rating: i64,
}

/// Vote state owned by a single vote widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteState {
    pub current_vote: Option<i64>,
    pub current_rating: i64,
}

impl VoteState {
    pub fn new(current_vote: Option<i64>, current_rating: i64) -> Self {
        Self {
            current_vote,
            current_rating,
        }
    }

    /// The vote as a plain number, absent counting as 0
    pub fn vote_value(&self) -> i64 {
        self.current_vote.unwrap_or(0)
    }
}

/// Number of voters and the sum of their votes in one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VoteSummary {
    pub voter_count: u32,
    pub value_sum: i64,
}

/// Votes split by sign. Zero votes land in neither bucket.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct VoteAggregate {
    pub positive_votes: Vec<IndividualVote>,
    pub negative_votes: Vec<IndividualVote>,
    pub positive: VoteSummary,
    pub negative: VoteSummary,
}

impl VoteAggregate {
    pub fn from_votes(votes: &[IndividualVote]) -> Self {
        let mut aggregate = Self::default();

        for vote in votes {
            let (bucket, summary) = match vote.value {
                0 => continue,
                v if v > 0 => (&mut aggregate.positive_votes, &mut aggregate.positive),
                _ => (&mut aggregate.negative_votes, &mut aggregate.negative),
            };
            bucket.push(vote.clone());
            summary.voter_count += 1;
            summary.value_sum += vote.value;
        }

        aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn aggregate_excludes_zero_votes() {
        let votes = vec![
            IndividualVote::new("a", 1),
            IndividualVote::new("b", 1),
            IndividualVote::new("c", -1),
            IndividualVote::new("d", 0),
        ];

        let aggregate = VoteAggregate::from_votes(&votes);

        assert_eq!(
            aggregate.positive,
            VoteSummary {
                voter_count: 2,
                value_sum: 2
            }
        );
        assert_eq!(
            aggregate.negative,
            VoteSummary {
                voter_count: 1,
                value_sum: -1
            }
        );
        assert_eq!(aggregate.positive_votes.len(), 2);
        assert_eq!(aggregate.negative_votes[0].voter_name, "c");
    }

    #[test]
    fn aggregate_keeps_input_order_and_double_votes() {
        let votes = vec![
            IndividualVote::new("zed", 2),
            IndividualVote::new("amy", 1),
            IndividualVote::new("bob", -2),
        ];

        let aggregate = VoteAggregate::from_votes(&votes);

        let names: Vec<_> = aggregate
            .positive_votes
            .iter()
            .map(|v| v.voter_name.as_str())
            .collect();
        assert_eq!(names, vec!["zed", "amy"]);
        assert_eq!(aggregate.positive.value_sum, 3);
        assert_eq!(aggregate.negative.value_sum, -2);
    }

    #[test]
    fn aggregate_of_nothing_is_empty() {
        let aggregate = VoteAggregate::from_votes(&[]);
        assert_eq!(aggregate, VoteAggregate::default());
    }

    #[test]
    fn individual_vote_wire_names() {
        let vote: IndividualVote =
            serde_json::from_value(json!({ "username": "alice", "vote": -1 })).unwrap();
        assert_eq!(vote, IndividualVote::new("alice", -1));
    }

    #[test]
    fn target_kind_from_str() {
        assert_eq!("post".parse::<TargetKind>().unwrap(), TargetKind::Post);
        assert_eq!("Comment".parse::<TargetKind>().unwrap(), TargetKind::Comment);
        assert_eq!("user".parse::<TargetKind>().unwrap(), TargetKind::User);
        assert!("thread".parse::<TargetKind>().is_err());
    }

    #[test]
    fn vote_target_display() {
        assert_eq!(VoteTarget::comment(12).to_string(), "comment-12");
    }
}
