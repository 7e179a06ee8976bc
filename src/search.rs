use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const SEARCH_URL: &str = "https://api.tavily.com/search";

/// Tavily web-search client.
pub struct TavilyClient {
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct SearchRequest {
    api_key: String,
    query: String,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    content: String,
}

impl TavilyClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Run one search and join the result snippets with blank lines,
    /// preserving API order. Zero results yield an empty string.
    pub async fn search(&self, query: &str, max_results: u32) -> Result<String> {
        let request = SearchRequest {
            api_key: self.api_key.clone(),
            query: query.to_string(),
            max_results,
        };

        let resp: SearchResponse = self
            .client
            .post(SEARCH_URL)
            .json(&request)
            .send()
            .await
            .context("Tavily request failed")?
            .error_for_status()
            .context("Tavily returned an error status")?
            .json()
            .await
            .context("Failed to decode Tavily response")?;

        let joined = resp
            .results
            .into_iter()
            .map(|r| r.content)
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(joined)
    }
}
