// Translation backends and the per-segment fallback policy
//
// - Google: Google Translate web endpoint
// - Ollama: local LLM through Ollama's generate API
// - SegmentTranslator: sanitizes, retries, and keeps the source text on failure

pub mod google;
pub mod ollama;
pub mod segment;

use async_trait::async_trait;
use std::time::Duration;

pub use segment::*;
use crate::config::{TranslateConfig, TranslatorBackend};
use crate::error::Result;

/// A translation service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` between two language codes (e.g. "ja" -> "zh-tw")
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String>;
}

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    pub fn create_translator(config: &TranslateConfig) -> Result<Box<dyn Translator>> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(match config.backend {
            TranslatorBackend::Google => Box::new(google::GoogleTranslator::new(
                client,
                config.google_endpoint.clone(),
            )),
            TranslatorBackend::Ollama => Box::new(ollama::OllamaTranslator::new(
                client,
                config.ollama_endpoint.clone(),
                config.ollama_model.clone(),
            )),
        })
    }
}

/// Convert language code to full language name for clearer prompts
pub fn language_code_to_name(code: &str) -> String {
    match code.to_lowercase().as_str() {
        "ja" => "Japanese".to_string(),
        "zh-tw" | "zh-hant" => "Traditional Chinese (Taiwan)".to_string(),
        "zh-cn" | "zh-hans" => "Simplified Chinese".to_string(),
        "zh" => "Chinese".to_string(),
        "ko" => "Korean".to_string(),
        "en" => "English".to_string(),
        _ => code.to_string(), // Fallback to the code itself if not found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code_to_name() {
        assert_eq!(language_code_to_name("ja"), "Japanese");
        assert_eq!(language_code_to_name("zh-TW"), "Traditional Chinese (Taiwan)");
        assert_eq!(language_code_to_name("xx"), "xx");
    }

    #[test]
    fn test_factory_builds_each_backend() {
        let mut config = TranslateConfig::default();
        assert!(TranslatorFactory::create_translator(&config).is_ok());

        config.backend = TranslatorBackend::Ollama;
        assert!(TranslatorFactory::create_translator(&config).is_ok());
    }
}
