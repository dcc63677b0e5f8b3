// OpenAI whisper command-line tool

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::TranscriberConfig;
use crate::error::{Result, JasubError};
use crate::transcript::Segment;
use super::{Transcriber, common::{collect_segments, read_tool_json, run_tool, TranscriptionMapper}};

/// OpenAI whisper JSON output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiWhisperOutput {
    #[serde(default)]
    pub text: String,
    pub segments: Vec<OpenAiWhisperSegment>,
    pub language: Option<String>,
}

/// OpenAI whisper segment format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiWhisperSegment {
    pub id: Option<u64>,
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub avg_logprob: Option<f64>,
    pub no_speech_prob: Option<f64>,
}

pub struct OpenAiWhisperMapper;

impl TranscriptionMapper<OpenAiWhisperOutput> for OpenAiWhisperMapper {
    fn to_segments(whisper_output: OpenAiWhisperOutput) -> Result<Vec<Segment>> {
        collect_segments(
            whisper_output
                .segments
                .into_iter()
                .map(|seg| (seg.start, seg.end, seg.text)),
        )
    }
}

/// Runs `whisper` and reads its JSON result
pub struct OpenAiTranscriber {
    config: TranscriberConfig,
}

impl OpenAiTranscriber {
    pub fn new(config: TranscriberConfig) -> Self {
        Self { config }
    }

    fn build_command(&self, audio_path: &Path, output_dir: &Path, language: &str) -> Command {
        let mut cmd = Command::new(&self.config.binary_path);
        cmd.arg(audio_path)
            .arg("--model").arg(&self.config.model)
            .arg("--language").arg(language)
            .arg("--output_dir").arg(output_dir)
            .arg("--output_format").arg("json")
            .arg("--temperature").arg(self.config.temperature.to_string());
        cmd
    }
}

#[async_trait]
impl Transcriber for OpenAiTranscriber {
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<Vec<Segment>> {
        info!("Transcribing {} with whisper model '{}'", audio_path.display(), self.config.model);

        let temp_dir = tempfile::tempdir()
            .map_err(|e| JasubError::Transcription(format!("Failed to create temp directory: {}", e)))?;
        let output_dir = temp_dir.path();

        run_tool(self.build_command(audio_path, output_dir, language), "whisper").await?;

        let audio_stem = audio_path.file_stem()
            .ok_or_else(|| JasubError::Transcription("Invalid audio filename".to_string()))?;
        let json_file = output_dir.join(format!("{}.json", audio_stem.to_string_lossy()));

        let output: OpenAiWhisperOutput = read_tool_json(&json_file).await?;
        debug!("whisper detected language: {:?}", output.language);

        let segments = OpenAiWhisperMapper::to_segments(output)?;
        info!("Transcription produced {} segments", segments.len());
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "text": " こんにちは ありがとう",
        "segments": [
            {"id": 0, "seek": 0, "start": 1.0, "end": 3.5, "text": " こんにちは", "tokens": [50364], "temperature": 0.0, "avg_logprob": -0.2, "compression_ratio": 0.8, "no_speech_prob": 0.01},
            {"id": 1, "seek": 0, "start": 3.5, "end": 6.0, "text": " ありがとう", "tokens": [50365], "temperature": 0.0, "avg_logprob": -0.3, "compression_ratio": 0.8, "no_speech_prob": 0.02}
        ],
        "language": "ja"
    }"#;

    #[test]
    fn test_mapper_converts_segments() {
        let output: OpenAiWhisperOutput = serde_json::from_str(SAMPLE).unwrap();
        let segments = OpenAiWhisperMapper::to_segments(output).unwrap();

        assert_eq!(segments, vec![
            Segment::new(1.0, 3.5, "こんにちは").unwrap(),
            Segment::new(3.5, 6.0, "ありがとう").unwrap(),
        ]);
    }

    #[test]
    fn test_mapper_accepts_silence() {
        let output: OpenAiWhisperOutput =
            serde_json::from_str(r#"{"text": "", "segments": [], "language": "ja"}"#).unwrap();
        assert!(OpenAiWhisperMapper::to_segments(output).unwrap().is_empty());
    }

    #[test]
    fn test_build_command_arguments() {
        let transcriber = OpenAiTranscriber::new(TranscriberConfig::default());
        let cmd = transcriber.build_command(Path::new("audio.wav"), Path::new("/tmp/out"), "ja");
        let args: Vec<String> = cmd
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        assert_eq!(cmd.as_std().get_program(), "whisper");
        assert_eq!(args, vec![
            "audio.wav", "--model", "base", "--language", "ja", "--output_dir", "/tmp/out",
            "--output_format", "json", "--temperature", "0",
        ]);
    }

    #[tokio::test]
    async fn test_missing_binary_is_transcription_error() {
        let transcriber = OpenAiTranscriber::new(TranscriberConfig {
            binary_path: "/nonexistent/jasub-whisper".to_string(),
            ..TranscriberConfig::default()
        });
        let err = transcriber.transcribe(Path::new("audio.wav"), "ja").await.unwrap_err();
        assert!(matches!(err, JasubError::Transcription(_)));
    }
}
