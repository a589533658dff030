//! Forum MCP Server
//!
//! Exposes the forum view components as tools for AI agents:
//! - Reading post feeds
//! - Voting on posts, comments and users
//! - Listing who voted how

mod server;
mod session;

use anyhow::Result;
use rmcp::ServiceExt;
use server::ForumServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is used for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting forum MCP server");

    let server = ForumServer::from_env()?;

    // Serve over stdio - pass as tuple (stdin, stdout)
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;

    service.waiting().await?;

    Ok(())
}
