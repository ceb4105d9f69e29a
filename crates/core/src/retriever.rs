//! Retriever trait — the abstraction over document search backends.
//!
//! A Retriever executes a search query against an external corpus and
//! returns matching passages in relevance order. The agent loop treats it
//! as a black box: no retry, no backoff, failures propagate unchanged.

use crate::error::RetrieverError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A retrieved text fragment treated as evidence for the final answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// The passage text
    pub content: String,

    /// Source identifier (e.g., the article title)
    pub source: String,
}

impl Passage {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
        }
    }
}

/// The core Retriever trait.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// The unique name of this retriever (e.g., "wikipedia").
    fn name(&self) -> &str;

    /// A description of the corpus and how to query it, injected into the
    /// agent's instruction prompt.
    fn description(&self) -> &str;

    /// Execute a search query and return matching passages, best first.
    async fn search(&self, query: &str) -> std::result::Result<Vec<Passage>, RetrieverError>;
}
