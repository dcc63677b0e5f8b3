use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, JasubError};
use super::Translator;

/// Google Translate web endpoint (`translate_a/single`, client `gtx`)
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String> {
        let source = normalize_language_code(source_language);
        let target = normalize_language_code(target_language);
        debug!("Sending translation request to: {} ({} -> {})", self.endpoint, source, target);

        let response = self.client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| JasubError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(JasubError::Translation(format!(
                "Google Translate error {}: {}", status, error_text
            )));
        }

        let body: Value = response.json().await
            .map_err(|e| JasubError::Translation(format!("Failed to parse response: {}", e)))?;

        parse_translation(&body)
    }
}

/// Google expects region subtags in upper case (`zh-TW`)
pub fn normalize_language_code(code: &str) -> String {
    match code.split_once('-') {
        Some((language, region)) => {
            format!("{}-{}", language.to_lowercase(), region.to_uppercase())
        }
        None => code.to_lowercase(),
    }
}

/// Join the translated chunks of a `translate_a/single` response.
///
/// The body looks like `[[["早安","おはよう",null,null,10]],null,"ja",...]`;
/// long input comes back split over several inner entries.
pub fn parse_translation(body: &Value) -> Result<String> {
    let chunks = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| JasubError::Translation("Unexpected response shape".to_string()))?;

    let translated: String = chunks
        .iter()
        .filter_map(|chunk| chunk.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(JasubError::Translation("Empty translation received".to_string()));
    }

    Ok(translated)
}
