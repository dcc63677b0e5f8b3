use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, JasubError};
use super::{Translator, language_code_to_name};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    pub text: String,
}

/// Translation through a local Ollama model, asking for JSON output
pub struct OllamaTranslator {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaTranslator {
    pub fn new(client: Client, endpoint: String, model: String) -> Self {
        Self { client, endpoint, model }
    }

    fn build_prompt(&self, text: &str, source_language: &str, target_language: &str) -> String {
        let source_name = language_code_to_name(source_language);
        let target_name = language_code_to_name(target_language);

        format!(
            "You are a professional subtitle translator.\n\
             \n\
             Translate the following {} subtitle line to {} ONLY.\n\
             The target language is: {} (language code: {})\n\
             \n\
             Return ONLY the translation in JSON format as {{\"text\":\"your {} translation here\"}}.\n\
             Do not include any explanations, alternatives, or text in other languages.\n\
             \n\
             Text to translate: \"{}\"\n",
            source_name, target_name, target_name, target_language, target_name, text
        )
    }
}

#[async_trait]
impl Translator for OllamaTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: self.build_prompt(text, source_language, target_language),
            stream: false,
            format: "json".to_string(),
        };

        let url = format!("{}/api/generate", self.endpoint.trim_end_matches('/'));
        debug!("Sending translation request to: {}", url);

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| JasubError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(JasubError::Translation(format!(
                "Ollama API error {}: {}", status, error_text
            )));
        }

        let generated: GenerateResponse = response.json().await
            .map_err(|e| JasubError::Translation(format!("Failed to parse response: {}", e)))?;

        debug!("Raw Ollama response: {}", generated.response);
        extract_translation(&generated.response)
    }
}

/// Pull the translation out of a model reply.
///
/// Prefers the requested `{"text": ...}` object; otherwise takes the first
/// non-empty line of the raw reply.
pub fn extract_translation(raw_response: &str) -> Result<String> {
    let raw_response = raw_response.trim();

    if raw_response.is_empty() {
        return Err(JasubError::Translation("Empty translation received".to_string()));
    }

    if let Ok(result) = serde_json::from_str::<TranslationResult>(raw_response) {
        let text = result.text.trim();
        if text.is_empty() {
            return Err(JasubError::Translation("Empty translation received".to_string()));
        }
        return Ok(text.to_string());
    }

    raw_response
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .ok_or_else(|| JasubError::Translation("Empty translation received".to_string()))
}
