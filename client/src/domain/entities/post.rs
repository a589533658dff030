//! Post domain entity
//!
//! Only the id and the rating are interpreted here. Every other field the
//! forum sends (title, author, content, ...) is carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unique identifier for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl From<i64> for PostId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rating of a post, comment or user as seen by the current user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rating {
    /// Sum of all votes
    pub value: i64,
    /// The current user's own vote, absent when they have not voted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote: Option<i64>,
}

impl Rating {
    pub fn new(value: i64, vote: Option<i64>) -> Self {
        Self { value, vote }
    }
}

/// A post as returned by the feed endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub rating: Rating,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Post {
    pub fn new(id: impl Into<PostId>, rating: Rating) -> Self {
        Self {
            id: id.into(),
            rating,
            fields: Map::new(),
        }
    }

    /// Builder-style helper for attaching an opaque field
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Shallow merge: every field present in `patch` replaces the post's own.
    pub fn merged(&self, patch: &PostPatch) -> Post {
        let mut post = self.clone();
        if let Some(rating) = patch.rating {
            post.rating = rating;
        }
        for (key, value) in &patch.fields {
            post.fields.insert(key.clone(), value.clone());
        }
        post
    }
}

/// Partial fields for `FeedLoader::update_post`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPatch {
    pub rating: Option<Rating>,
    pub fields: Map<String, Value>,
}

impl PostPatch {
    pub fn rating(rating: Rating) -> Self {
        Self {
            rating: Some(rating),
            fields: Map::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}
