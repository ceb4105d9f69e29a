//! MediaWiki search retriever.
//!
//! A single `action=query` request with `generator=search` and
//! `prop=extracts` returns the top-ranked articles for a query together
//! with plain-text intro extracts. The API returns pages keyed by page id;
//! the `index` field carries the search rank, so results are re-sorted
//! before being mapped to passages.

use agentwiki_config::RetrieverConfig;
use agentwiki_core::error::RetrieverError;
use agentwiki_core::retriever::{Passage, Retriever};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

const RETRIEVER_DESCRIPTION: &str = "The search engine searches Wikipedia, \
the free online encyclopedia. It returns short plain-text excerpts from the \
articles that best match the query. Use concise keyword queries naming the \
entities or facts you need, rather than full questions.";

/// Wikipedia retriever backed by the MediaWiki query API.
pub struct WikipediaRetriever {
    name: String,
    api_url: String,
    top_k: usize,
    extract_chars: u32,
    client: reqwest::Client,
}

impl WikipediaRetriever {
    /// Create a retriever from config.
    pub fn new(config: &RetrieverConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(concat!("agentwiki/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "wikipedia".into(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            top_k: config.top_k,
            extract_chars: config.extract_chars,
            client,
        }
    }

    /// Override the API URL (e.g., for a non-English Wikipedia or tests).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sort pages by search rank and map them to passages.
    fn pages_to_passages(pages: HashMap<String, WikiPage>) -> Vec<Passage> {
        let mut pages: Vec<WikiPage> = pages.into_values().collect();
        pages.sort_by_key(|p| p.index);

        pages
            .into_iter()
            .filter_map(|p| {
                let extract = p.extract?;
                let extract = extract.trim();
                if extract.is_empty() {
                    return None;
                }
                Some(Passage::new(extract, p.title))
            })
            .collect()
    }
}

#[async_trait]
impl Retriever for WikipediaRetriever {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        RETRIEVER_DESCRIPTION
    }

    async fn search(&self, query: &str) -> Result<Vec<Passage>, RetrieverError> {
        debug!(retriever = %self.name, %query, "Executing search");

        let limit = self.top_k.to_string();
        let exchars = self.extract_chars.to_string();
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("generator", "search"),
            ("gsrsearch", query),
            ("gsrlimit", limit.as_str()),
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("exintro", "1"),
            ("exchars", exchars.as_str()),
            ("exlimit", "max"),
        ];

        let response = self
            .client
            .get(&self.api_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| RetrieverError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            warn!(status, body = %body, "MediaWiki API error");
            return Err(RetrieverError::ApiError {
                status_code: status,
                message: body,
            });
        }

        let api_resp: WikiQueryResponse = response
            .json()
            .await
            .map_err(|e| RetrieverError::InvalidResponse(e.to_string()))?;

        // No `query` key means the search matched nothing.
        let passages = match api_resp.query {
            Some(q) => Self::pages_to_passages(q.pages),
            None => Vec::new(),
        };

        debug!(count = passages.len(), "Search returned passages");
        Ok(passages)
    }
}

// --- MediaWiki API types ---

#[derive(Debug, Deserialize)]
struct WikiQueryResponse {
    #[serde(default)]
    query: Option<WikiQuery>,
}

#[derive(Debug, Deserialize)]
struct WikiQuery {
    #[serde(default)]
    pages: HashMap<String, WikiPage>,
}

#[derive(Debug, Deserialize)]
struct WikiPage {
    title: String,
    /// Search rank within the result set.
    #[serde(default)]
    index: u32,
    #[serde(default)]
    extract: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> RetrieverConfig {
        RetrieverConfig::default()
    }

    #[test]
    fn constructor_trims_trailing_slash() {
        let retriever =
            WikipediaRetriever::new(&test_config()).with_api_url("https://es.wikipedia.org/w/api.php/");
        assert_eq!(retriever.api_url, "https://es.wikipedia.org/w/api.php");
        assert_eq!(retriever.name(), "wikipedia");
    }

    #[test]
    fn description_mentions_the_corpus() {
        let retriever = WikipediaRetriever::new(&test_config());
        assert!(retriever.description().contains("Wikipedia"));
    }

    #[test]
    fn pages_sorted_by_search_rank() {
        let resp: WikiQueryResponse = serde_json::from_str(
            r#"{
                "query": {
                    "pages": {
                        "7204": {"pageid": 7204, "title": "Spain", "index": 2, "extract": "Spain is a country in Europe."},
                        "41188": {"pageid": 41188, "title": "Madrid", "index": 1, "extract": "Madrid is the capital of Spain."}
                    }
                }
            }"#,
        )
        .unwrap();

        let passages = WikipediaRetriever::pages_to_passages(resp.query.unwrap().pages);
        assert_eq!(passages.len(), 2);
        assert_eq!(passages[0].source, "Madrid");
        assert_eq!(passages[1].source, "Spain");
    }

    #[test]
    fn pages_without_extracts_are_dropped() {
        let resp: WikiQueryResponse = serde_json::from_str(
            r#"{
                "query": {
                    "pages": {
                        "1": {"pageid": 1, "title": "Empty", "index": 1},
                        "2": {"pageid": 2, "title": "Blank", "index": 2, "extract": "   "},
                        "3": {"pageid": 3, "title": "Real", "index": 3, "extract": "Content."}
                    }
                }
            }"#,
        )
        .unwrap();

        let passages = WikipediaRetriever::pages_to_passages(resp.query.unwrap().pages);
        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].source, "Real");
    }

    #[test]
    fn empty_result_set_parses() {
        let resp: WikiQueryResponse = serde_json::from_str(r#"{"batchcomplete": ""}"#).unwrap();
        assert!(resp.query.is_none());
    }
}
