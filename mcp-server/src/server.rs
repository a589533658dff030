//! Forum MCP Server implementation

use crate::session::ForumSession;
use anyhow::Result;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// Forum MCP Server
///
/// Provides tools for reading feeds and voting.
#[derive(Clone)]
pub struct ForumServer {
    session: ForumSession,
    tool_router: ToolRouter<Self>,
}

impl ForumServer {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            session: ForumSession::from_env()?,
            tool_router: Self::tool_router(),
        })
    }
}

// --- Tool Parameter Types ---

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FeedParams {
    /// Feed kind: "all", "subscriptions", "site", "watch", "watch-all" or "user-profile"
    pub kind: String,
    /// Site name for "site", username for "user-profile"
    #[serde(default)]
    pub id: String,
    /// 1-based page number, defaults to 1
    #[serde(default)]
    pub page: Option<u32>,
    /// Posts per page, defaults to FORUM_PAGE_SIZE
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct VoteParams {
    /// Type of target: "post", "comment" or "user"
    pub target_type: String,
    /// Numeric id of the target
    pub target_id: i64,
    /// Vote value: -1, 0 or 1 (-2..2 with double). Repeating your current vote retracts it.
    pub value: i64,
    /// Allow double votes
    #[serde(default)]
    pub double: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TargetParams {
    /// Type of target: "post", "comment" or "user"
    pub target_type: String,
    /// Numeric id of the target
    pub target_id: i64,
}

#[tool_router]
impl ForumServer {
    #[tool(description = "Read one page of a post feed. Shows ids, ratings and your own votes.")]
    async fn feed(&self, params: Parameters<FeedParams>) -> Result<CallToolResult, McpError> {
        let p = params.0;
        match self
            .session
            .feed(&p.kind, &p.id, p.page.unwrap_or(1), p.per_page)
            .await
        {
            Ok(content) => Ok(CallToolResult::success(vec![Content::text(content)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!("{:#}", e))])),
        }
    }

    #[tool(description = "Vote on a post, comment or user. Casting your current vote again retracts it.")]
    async fn vote(&self, params: Parameters<VoteParams>) -> Result<CallToolResult, McpError> {
        let p = params.0;
        match self
            .session
            .vote(&p.target_type, p.target_id, p.value, p.double)
            .await
        {
            Ok(response) => Ok(CallToolResult::success(vec![Content::text(response)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!("{:#}", e))])),
        }
    }

    #[tool(description = "List who voted on a post, comment or user, split into pluses and minuses.")]
    async fn votes(&self, params: Parameters<TargetParams>) -> Result<CallToolResult, McpError> {
        match self
            .session
            .votes(&params.0.target_type, params.0.target_id)
            .await
        {
            Ok(response) => Ok(CallToolResult::success(vec![Content::text(response)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!("{:#}", e))])),
        }
    }
}

#[tool_handler]
impl ServerHandler for ForumServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "forum".into(),
                title: Some("Forum MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"Forum reader and voting tools

SETUP: set FORUM_API_URL and FORUM_API_TOKEN. Without a token feeds are
read anonymously and votes are refused by the server.

TOOLS:
- 'feed' - read a page of posts (kind: all, subscriptions, site, watch, watch-all, user-profile)
- 'vote' - vote on a post, comment or user; repeat the same value to retract
- 'votes' - see who voted and how

Votes on posts from the last loaded feed update that feed immediately."#
                    .into(),
            ),
        }
    }
}
