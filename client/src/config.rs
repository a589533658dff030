use std::env;
use std::path::PathBuf;

use crate::app::{Locale, LoadingOnError};

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the forum API
    pub api_url: String,
    /// Bearer token for the current user, anonymous when absent
    pub api_token: Option<String>,
    /// Posts per feed page
    pub page_size: u32,
    pub locale: Locale,
    /// Directory for the durable feed cache; in-memory cache when absent
    pub cache_dir: Option<PathBuf>,
    /// Whether a failed feed fetch keeps the loading flag raised
    pub loading_on_error: LoadingOnError,
}

impl Config {
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_url: env::var("FORUM_API_URL")
                .unwrap_or_else(|_| "http://localhost:5001/api/v1".to_string()),
            api_token: env::var("FORUM_API_TOKEN").ok().filter(|t| !t.is_empty()),
            page_size: env::var("FORUM_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(Self::DEFAULT_PAGE_SIZE),
            locale: env::var("FORUM_LOCALE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            cache_dir: env::var("FORUM_CACHE_DIR").ok().map(PathBuf::from),
            loading_on_error: env::var("FORUM_FEED_ERROR_LOADING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5001/api/v1".to_string(),
            api_token: None,
            page_size: Self::DEFAULT_PAGE_SIZE,
            locale: Locale::default(),
            cache_dir: None,
            loading_on_error: LoadingOnError::default(),
        }
    }
}
