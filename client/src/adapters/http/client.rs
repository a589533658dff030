//! Forum API client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{FeedPage, IndividualVote, TargetKind, VoteOutcome, VoteTarget};
use crate::domain::ports::ForumApi;
use crate::error::ApiError;

/// reqwest-backed implementation of `ForumApi`
pub struct HttpForumApi {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpForumApi {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: for<'de> Deserialize<'de>,
    {
        let mut request = self.http.post(self.api_url(path)).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(ApiError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(ApiError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ApiError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Request types for the forum API
#[derive(Serialize)]
struct PageRequest {
    page: u32,
    perpage: u32,
}

#[derive(Serialize)]
struct SiteFeedRequest<'a> {
    site: &'a str,
    page: u32,
    perpage: u32,
}

#[derive(Serialize)]
struct WatchFeedRequest {
    all: bool,
    page: u32,
    perpage: u32,
}

#[derive(Serialize)]
struct UserPostsRequest<'a> {
    username: &'a str,
    page: u32,
    perpage: u32,
}

#[derive(Serialize)]
struct VoteListRequest {
    #[serde(rename = "type")]
    kind: TargetKind,
    id: i64,
}

#[derive(Serialize)]
struct CastVoteRequest {
    #[serde(rename = "type")]
    kind: TargetKind,
    id: i64,
    vote: i64,
}

/// Response types from the forum API
#[derive(Deserialize)]
struct VoteListResponse {
    votes: Vec<IndividualVote>,
}

#[async_trait]
impl ForumApi for HttpForumApi {
    async fn feed_by_site(
        &self,
        site: &str,
        page: u32,
        per_page: u32,
    ) -> Result<FeedPage, ApiError> {
        self.post(
            "/feed/posts",
            &SiteFeedRequest {
                site,
                page,
                perpage: per_page,
            },
        )
        .await
    }

    async fn feed_subscriptions(&self, page: u32, per_page: u32) -> Result<FeedPage, ApiError> {
        self.post(
            "/feed/subscriptions",
            &PageRequest {
                page,
                perpage: per_page,
            },
        )
        .await
    }

    async fn feed_all(&self, page: u32, per_page: u32) -> Result<FeedPage, ApiError> {
        self.post(
            "/feed/all",
            &PageRequest {
                page,
                perpage: per_page,
            },
        )
        .await
    }

    async fn feed_watch(&self, all: bool, page: u32, per_page: u32) -> Result<FeedPage, ApiError> {
        self.post(
            "/feed/watch",
            &WatchFeedRequest {
                all,
                page,
                perpage: per_page,
            },
        )
        .await
    }

    async fn user_posts(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<FeedPage, ApiError> {
        self.post(
            "/user/posts",
            &UserPostsRequest {
                username,
                page,
                perpage: per_page,
            },
        )
        .await
    }

    async fn vote_list(&self, target: VoteTarget) -> Result<Vec<IndividualVote>, ApiError> {
        let response: VoteListResponse = self
            .post(
                "/vote/list",
                &VoteListRequest {
                    kind: target.kind,
                    id: target.id,
                },
            )
            .await?;
        Ok(response.votes)
    }

    async fn cast_vote(&self, target: VoteTarget, value: i64) -> Result<VoteOutcome, ApiError> {
        self.post(
            "/vote/set",
            &CastVoteRequest {
                kind: target.kind,
                id: target.id,
                vote: value,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let api = HttpForumApi::new("https://forum.example/api/v1/".to_string(), None);
        assert_eq!(api.base_url(), "https://forum.example/api/v1");
        assert_eq!(api.api_url("/feed/all"), "https://forum.example/api/v1/feed/all");
    }

    #[test]
    fn cast_vote_request_serialization() {
        let req = CastVoteRequest {
            kind: TargetKind::Comment,
            id: 42,
            vote: -1,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"type":"comment","id":42,"vote":-1}"#);
    }

    #[test]
    fn site_feed_request_serialization() {
        let req = SiteFeedRequest {
            site: "main",
            page: 2,
            perpage: 20,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""site":"main""#));
        assert!(json.contains(r#""perpage":20"#));
    }
}
