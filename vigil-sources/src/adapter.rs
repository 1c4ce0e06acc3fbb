//! The source adapter seam

use async_trait::async_trait;
use thiserror::Error;

use vigil_core::Article;

/// Errors from fetching or parsing a source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{adapter} returned HTTP {status}")]
    Status { adapter: String, status: u16 },

    #[error("Failed to parse {adapter} response: {message}")]
    Parse { adapter: String, message: String },
}

impl SourceError {
    pub(crate) fn parse(adapter: &str, message: impl ToString) -> Self {
        SourceError::Parse {
            adapter: adapter.to_string(),
            message: message.to_string(),
        }
    }
}

/// What to fetch: a free-text query over a trailing window of days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceQuery {
    pub query: String,
    pub days: u32,
}

impl SourceQuery {
    pub fn new(query: impl Into<String>, days: u32) -> Self {
        Self {
            query: query.into(),
            days,
        }
    }
}

/// A producer of articles.
///
/// Feed-style adapters (RSS, Reddit) carry their own targeting and only use
/// the window from the query.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Name used in logs
    fn name(&self) -> String;

    /// Fetch articles for the query
    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<Article>, SourceError>;
}
