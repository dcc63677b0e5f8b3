use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::{Result, JasubError};

// Default values for optional configuration keys
fn default_show_progress() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub transcriber: TranscriberConfig,
    pub translate: TranslateConfig,
    pub media: MediaConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Which transcription tool to run
    pub backend: TranscriberBackend,
    /// Path to transcriber binary (e.g., whisper or whisper-cli)
    pub binary_path: String,
    /// Model name (OpenAI whisper) or model file path (whisper.cpp)
    pub model: String,
    /// Spoken language of the input
    pub language: String,
    /// Temperature for transcription
    pub temperature: f32,
    /// Extra attempts after a failed transcription
    #[serde(default)]
    pub max_retries: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriberBackend {
    /// OpenAI whisper command-line tool
    OpenAi,
    /// whisper.cpp command-line tool
    WhisperCpp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Which translation service to call
    pub backend: TranslatorBackend,
    pub source_language: String,
    pub target_language: String,
    /// Google Translate web endpoint
    pub google_endpoint: String,
    /// Ollama endpoint URL
    pub ollama_endpoint: String,
    /// LLM model to use with Ollama
    pub ollama_model: String,
    /// Extra attempts per segment before falling back to the source text
    pub max_retries: u32,
    /// HTTP timeout per translation request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslatorBackend {
    /// Google Translate web endpoint
    Google,
    /// Local Ollama model
    Ollama,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    pub binary_path: String,
    /// Sample rate of the extracted waveform
    pub sample_rate: u32,
    /// Channel count of the extracted waveform
    pub channels: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Parent directory for per-run temporary workspaces (system temp dir if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_root: Option<PathBuf>,
    /// Draw a progress bar while translating segments
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            backend: TranscriberBackend::OpenAi,
            binary_path: "whisper".to_string(),
            model: "base".to_string(),
            language: "ja".to_string(),
            temperature: 0.0,
            max_retries: 0,
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            backend: TranslatorBackend::Google,
            source_language: "ja".to_string(),
            target_language: "zh-tw".to_string(),
            google_endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            ollama_endpoint: "http://localhost:11434".to_string(),
            ollama_model: "llama3.2:3b".to_string(),
            max_retries: 2,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            binary_path: "ffmpeg".to_string(),
            sample_rate: 16000,
            channels: 1,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            temp_root: None,
            show_progress: default_show_progress(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| JasubError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| JasubError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| JasubError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| JasubError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_defaults_match_japanese_to_traditional_chinese() {
        let config = Config::default();
        assert_eq!(config.transcriber.backend, TranscriberBackend::OpenAi);
        assert_eq!(config.transcriber.model, "base");
        assert_eq!(config.transcriber.language, "ja");
        assert_eq!(config.translate.source_language, "ja");
        assert_eq!(config.translate.target_language, "zh-tw");
        assert_eq!(config.media.sample_rate, 16000);
        assert_eq!(config.media.channels, 1);
        assert!(config.output.show_progress);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = assert_fs::TempDir::new().unwrap();
        let path = temp.child("jasub.toml");

        let mut config = Config::default();
        config.translate.backend = TranslatorBackend::Ollama;
        config.translate.max_retries = 0;
        config.save_to_file(path.path()).unwrap();

        let written = std::fs::read_to_string(path.path()).unwrap();
        assert!(written.contains("[translate]"));
        let loaded = Config::from_file(path.path()).unwrap();
        assert_eq!(loaded.translate.backend, TranslatorBackend::Ollama);
        assert_eq!(loaded.translate.max_retries, 0);
    }

    #[test]
    fn test_optional_keys_fall_back_to_defaults() {
        let temp = assert_fs::TempDir::new().unwrap();
        let path = temp.child("jasub.toml");
        path.write_str(
            r#"
[transcriber]
backend = "WhisperCpp"
binary_path = "whisper-cli"
model = "models/ggml-base.bin"
language = "ja"
temperature = 0.0

[translate]
backend = "Google"
source_language = "ja"
target_language = "zh-tw"
google_endpoint = "https://translate.googleapis.com/translate_a/single"
ollama_endpoint = "http://localhost:11434"
ollama_model = "llama3.2:3b"
max_retries = 1

[media]
binary_path = "ffmpeg"
sample_rate = 16000
channels = 1
"#,
        )
        .unwrap();

        let config = Config::from_file(path.path()).unwrap();
        assert_eq!(config.transcriber.backend, TranscriberBackend::WhisperCpp);
        assert_eq!(config.transcriber.max_retries, 0);
        assert_eq!(config.translate.timeout_secs, 60);
        assert!(config.output.temp_root.is_none());
        assert!(config.output.show_progress);
    }

    #[test]
    fn test_from_file_reports_config_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let path = temp.child("broken.toml");
        path.write_str("[transcriber\n").unwrap();

        assert!(matches!(
            Config::from_file(path.path()),
            Err(JasubError::Config(_))
        ));
    }
}
