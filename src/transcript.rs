use serde::{Deserialize, Serialize};

use crate::error::{JasubError, Result};

/// One transcribed utterance, in seconds from the start of the video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Segment {
    /// Build a segment, rejecting timings and text the subtitle writer cannot represent.
    pub fn new<S: Into<String>>(start: f64, end: f64, text: S) -> Result<Self> {
        let text = text.into();

        if !start.is_finite() || start < 0.0 {
            return Err(JasubError::InvalidSegment(format!(
                "start must be a non-negative number of seconds, got {}",
                start
            )));
        }
        if !end.is_finite() || end < start {
            return Err(JasubError::InvalidSegment(format!(
                "end ({}) must not precede start ({})",
                end, start
            )));
        }
        if text.trim().is_empty() {
            return Err(JasubError::InvalidSegment(format!(
                "empty text at {:.3}s",
                start
            )));
        }

        Ok(Self { start, end, text })
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
