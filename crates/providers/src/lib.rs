//! Hosted model clients for agentwiki.
//!
//! The only backend currently implemented is the Anthropic Messages API,
//! which is what the assistant was designed against: the agent loop relies
//! on `stop_sequences` truncating the completion immediately before the
//! stop marker.

pub mod anthropic;

pub use anthropic::AnthropicModel;

use agentwiki_config::AppConfig;
use agentwiki_core::{Model, ModelError};
use std::sync::Arc;

/// Build the process-wide model client from config.
///
/// Constructed once at startup and shared read-only between requests.
pub fn build_model(config: &AppConfig) -> Result<Arc<dyn Model>, ModelError> {
    let api_key = config
        .api_key
        .clone()
        .ok_or_else(|| ModelError::NotConfigured("no API key in config or environment".into()))?;

    Ok(Arc::new(AnthropicModel::new(api_key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_model_requires_api_key() {
        let config = AppConfig::default();
        let err = build_model(&config).unwrap_err();
        assert!(matches!(err, ModelError::NotConfigured(_)));
    }

    #[test]
    fn build_model_with_key() {
        let config = AppConfig {
            api_key: Some("sk-ant-test".into()),
            ..AppConfig::default()
        };
        let model = build_model(&config).unwrap();
        assert_eq!(model.name(), "anthropic");
    }
}
