use thiserror::Error;

#[derive(Error, Debug)]
pub enum JasubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Audio extraction failed: {0}")]
    Extraction(String),

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid segment: {0}")]
    InvalidSegment(String),
}

pub type Result<T> = std::result::Result<T, JasubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        let err = JasubError::Extraction("Invalid data found when processing input".to_string());
        assert_eq!(
            err.to_string(),
            "Audio extraction failed: Invalid data found when processing input"
        );

        let err: JasubError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, JasubError::Io(_)));
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
