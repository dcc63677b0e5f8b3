// Transcription backends
//
// - OpenAi: the OpenAI whisper command-line tool
// - WhisperCpp: whisper.cpp's whisper-cli
//
// Each backend parses its own JSON output into service-specific structs and
// maps them onto `Segment` through `TranscriptionMapper`.

pub mod common;
pub mod openai;
pub mod whisper_cpp;

use async_trait::async_trait;
use std::path::Path;

pub use common::*;
use crate::config::{TranscriberBackend, TranscriberConfig};
use crate::error::Result;
use crate::transcript::Segment;

/// Main trait for transcription operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a waveform into segments ordered by start time
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<Vec<Segment>>;
}

/// Factory for creating transcriber instances
pub struct TranscriberFactory;

impl TranscriberFactory {
    pub fn create_transcriber(config: TranscriberConfig) -> Box<dyn Transcriber> {
        match config.backend {
            TranscriberBackend::OpenAi => Box::new(openai::OpenAiTranscriber::new(config)),
            TranscriberBackend::WhisperCpp => {
                Box::new(whisper_cpp::WhisperCppTranscriber::new(config))
            }
        }
    }
}
