//! Model trait — the abstraction over hosted LLM backends.
//!
//! A Model knows how to send a rendered prompt to an LLM and return the raw
//! text completion. The agent loop calls `generate()` without knowing which
//! backend is being used.

use crate::error::ModelError;
use crate::message::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A fully rendered generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The model to use (e.g., "claude-3-sonnet-20240229")
    pub model: String,

    /// The prompt messages
    pub messages: Vec<Message>,

    /// Temperature (0.0 = deterministic)
    #[serde(default)]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Stop sequences. The backend truncates the completion immediately
    /// before the first occurrence of any of these — the caller never sees
    /// text past the marker.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
}

/// The core Model trait.
///
/// Every LLM backend implements this trait. The returned string is the raw
/// completion, already cut off at the first stop-sequence occurrence.
#[async_trait]
pub trait Model: Send + Sync + std::fmt::Debug {
    /// A human-readable name for this backend (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Send a request and get the raw text completion.
    async fn generate(&self, request: GenerateRequest) -> std::result::Result<String, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_serialization() {
        let req = GenerateRequest {
            model: "claude-3-sonnet-20240229".into(),
            messages: vec![Message::user("question")],
            temperature: 0.0,
            max_tokens: Some(1024),
            stop: vec!["</search_query>".into()],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("claude-3-sonnet"));
        assert!(json.contains("</search_query>"));
    }

    #[test]
    fn empty_stop_is_omitted() {
        let req = GenerateRequest {
            model: "m".into(),
            messages: vec![],
            temperature: 0.0,
            max_tokens: None,
            stop: vec![],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("stop"));
        assert!(!json.contains("max_tokens"));
    }
}
