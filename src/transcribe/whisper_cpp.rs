use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::process::Command;
use tracing::info;

use crate::config::TranscriberConfig;
use crate::error::{Result, JasubError};
use crate::transcript::Segment;
use super::{Transcriber, common::{collect_segments, read_tool_json, run_tool, TranscriptionMapper}};

// Structs for parsing whisper.cpp JSON output (`-oj`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppOutput {
    pub transcription: Vec<WhisperCppSegment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppSegment {
    pub offsets: WhisperCppOffsets,
    pub text: String,
}

/// Offsets in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppOffsets {
    pub from: i64,
    pub to: i64,
}

pub struct WhisperCppMapper;

impl TranscriptionMapper<WhisperCppOutput> for WhisperCppMapper {
    fn to_segments(whisper_output: WhisperCppOutput) -> Result<Vec<Segment>> {
        collect_segments(whisper_output.transcription.into_iter().map(|seg| {
            (
                seg.offsets.from as f64 / 1000.0,
                seg.offsets.to as f64 / 1000.0,
                seg.text,
            )
        }))
    }
}

/// Runs whisper.cpp's `whisper-cli`
pub struct WhisperCppTranscriber {
    config: TranscriberConfig,
}

impl WhisperCppTranscriber {
    pub fn new(config: TranscriberConfig) -> Self {
        Self { config }
    }

    fn build_command(&self, audio_path: &Path, output_prefix: &Path, language: &str) -> Command {
        let mut cmd = Command::new(&self.config.binary_path);
        cmd.arg("-m").arg(&self.config.model)
            .arg("-l").arg(language)
            .arg("-tp").arg(self.config.temperature.to_string())
            .arg("-oj")
            .arg("-of").arg(output_prefix)
            .arg("-f").arg(audio_path);
        cmd
    }
}

#[async_trait]
impl Transcriber for WhisperCppTranscriber {
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<Vec<Segment>> {
        info!("Transcribing {} with whisper.cpp model {}", audio_path.display(), self.config.model);

        let temp_dir = tempfile::tempdir()
            .map_err(|e| JasubError::Transcription(format!("Failed to create temp directory: {}", e)))?;
        let output_prefix = temp_dir.path().join("out");

        run_tool(self.build_command(audio_path, &output_prefix, language), "whisper.cpp").await?;

        let output: WhisperCppOutput = read_tool_json(&output_prefix.with_extension("json")).await?;
        let segments = WhisperCppMapper::to_segments(output)?;

        info!("Transcription produced {} segments", segments.len());
        Ok(segments)
    }
}
