use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, JasubError};
use crate::text::sanitize_bytes;
use crate::transcript::Segment;

/// Trait for converting service-specific transcription output to segments
pub trait TranscriptionMapper<T> {
    fn to_segments(service_result: T) -> Result<Vec<Segment>>;
}

/// Build segments from raw (start, end, text) triples.
///
/// Text is trimmed and blank segments are skipped; order is preserved.
pub fn collect_segments<I>(raw: I) -> Result<Vec<Segment>>
where
    I: IntoIterator<Item = (f64, f64, String)>,
{
    let mut segments = Vec::new();
    for (start, end, text) in raw {
        let text = text.trim();
        if text.is_empty() {
            debug!("Skipping blank segment at {:.3}s", start);
            continue;
        }
        let segment = Segment::new(start, end, text)
            .map_err(|e| JasubError::Transcription(e.to_string()))?;
        segments.push(segment);
    }
    Ok(segments)
}

/// Run a transcription tool to completion
pub async fn run_tool(mut cmd: Command, tool_name: &str) -> Result<()> {
    debug!("Executing {}: {:?}", tool_name, cmd);

    let output = cmd
        .output()
        .await
        .map_err(|e| JasubError::Transcription(format!("Failed to execute {}: {}", tool_name, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(JasubError::Transcription(format!(
            "{} failed: {}",
            tool_name,
            stderr.trim()
        )));
    }

    Ok(())
}

/// Read a tool's JSON output, dropping any invalid UTF-8 before parsing
pub async fn read_tool_json<T: DeserializeOwned>(json_file: &Path) -> Result<T> {
    if !json_file.exists() {
        return Err(JasubError::Transcription(format!(
            "Transcription output not found: {}",
            json_file.display()
        )));
    }

    let bytes = tokio::fs::read(json_file)
        .await
        .map_err(|e| JasubError::Transcription(format!("Failed to read output: {}", e)))?;

    serde_json::from_str(&sanitize_bytes(&bytes))
        .map_err(|e| JasubError::Transcription(format!("Failed to parse transcription JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        text: String,
    }

    #[test]
    fn test_collect_segments_trims_and_skips_blank() {
        let segments = collect_segments(vec![
            (0.0, 1.0, " こんにちは ".to_string()),
            (1.0, 1.5, "   ".to_string()),
            (1.5, 3.0, "ありがとう".to_string()),
        ])
        .unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "こんにちは");
        assert_eq!(segments[1].start, 1.5);
    }

    #[test]
    fn test_collect_segments_rejects_inverted_timing() {
        let err = collect_segments(vec![(3.0, 2.0, "あ".to_string())]).unwrap_err();
        assert!(matches!(err, JasubError::Transcription(_)));
    }

    #[tokio::test]
    async fn test_read_tool_json_drops_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut bytes = r#"{"text": "おは"#.as_bytes().to_vec();
        bytes.push(0xfe);
        bytes.extend_from_slice("よう\"}".as_bytes());
        std::fs::write(&path, bytes).unwrap();

        let probe: Probe = read_tool_json(&path).await.unwrap();
        assert_eq!(probe.text, "おはよう");
    }

    #[tokio::test]
    async fn test_read_tool_json_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Probe> = read_tool_json(&dir.path().join("none.json")).await;
        assert!(matches!(result, Err(JasubError::Transcription(_))));
    }

    #[tokio::test]
    async fn test_run_tool_missing_binary() {
        let cmd = Command::new("/nonexistent/jasub-whisper");
        let err = run_tool(cmd, "whisper").await.unwrap_err();
        assert!(matches!(err, JasubError::Transcription(_)));
    }
}
