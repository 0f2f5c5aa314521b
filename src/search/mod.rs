//! Web search capability consumed by the research step.
use crate::articles::SearchResult;

mod tavily;

pub use tavily::TavilyClient;

/// How hard the provider should dig for each query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchDepth {
    #[default]
    Shallow,
    Deep,
}

impl SearchDepth {
    /// Accept both our names and the provider's (`basic`/`advanced`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shallow" | "basic" => Some(SearchDepth::Shallow),
            "deep" | "advanced" => Some(SearchDepth::Deep),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub depth: SearchDepth,
    pub max_results: u32,
    pub include_raw_content: bool,
}

#[derive(Debug)]
pub enum SearchError {
    Request(reqwest::Error),
    Status { status: u16, body: String },
    Decode(String),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::Request(e) => write!(f, "search request failed: {e}"),
            SearchError::Status { status, body } => {
                write!(f, "search provider answered {status}: {body}")
            }
            SearchError::Decode(e) => write!(f, "could not decode search results: {e}"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Anything that can turn a query into a list of documents.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, SearchError>;
}
