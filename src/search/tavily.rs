use serde::{Deserialize, Serialize};

use super::{SearchDepth, SearchError, SearchOptions, SearchProvider};
use crate::articles::SearchResult;
use crate::http::endpoint;

/// Tavily search over its JSON HTTP API.
pub struct TavilyClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    search_depth: &'static str,
    max_results: u32,
    include_raw_content: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

fn depth_name(depth: SearchDepth) -> &'static str {
    match depth {
        SearchDepth::Shallow => "basic",
        SearchDepth::Deep => "advanced",
    }
}

fn request_body<'a>(query: &'a str, options: &SearchOptions) -> SearchRequest<'a> {
    SearchRequest {
        query,
        search_depth: depth_name(options.depth),
        max_results: options.max_results,
        include_raw_content: options.include_raw_content,
    }
}

fn decode_results(body: &str) -> Result<Vec<SearchResult>, SearchError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()))?;
    Ok(response.results)
}

impl TavilyClient {
    pub fn new(http: reqwest::Client, api_key: &str, base_url: &str) -> Self {
        Self {
            http,
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl SearchProvider for TavilyClient {
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::debug!(query, depth = ?options.depth, max_results = options.max_results, "tavily search");

        let response = self
            .http
            .post(endpoint(&self.base_url, "search"))
            .bearer_auth(&self.api_key)
            .json(&request_body(query, options))
            .send()
            .await
            .map_err(SearchError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(SearchError::Request)?;
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let results = decode_results(&body)?;
        tracing::info!(count = results.len(), "tavily returned results");
        Ok(results)
    }
}
