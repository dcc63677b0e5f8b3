use std::fmt;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

use crate::error::Result;
use crate::transcript::Segment;

/// One numbered SRT entry
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{} --> {}\n{}\n\n",
            self.index,
            format_timecode(self.start),
            format_timecode(self.end),
            self.text
        )
    }
}

/// Ordered, immutable SRT document.
///
/// Cue numbers come from position alone; nothing is reordered, merged or
/// deduplicated on the way in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleDocument {
    cues: Vec<Cue>,
}

impl SubtitleDocument {
    pub fn from_segments(segments: &[Segment]) -> Self {
        let cues = segments
            .iter()
            .enumerate()
            .map(|(position, segment)| Cue {
                index: position + 1,
                start: segment.start,
                end: segment.end,
                text: segment.text.clone(),
            })
            .collect();

        Self { cues }
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Render the document as SRT text
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Write the rendered document as UTF-8
    pub async fn write_to<P: AsRef<Path>>(&self, output_path: P) -> Result<()> {
        let output_path = output_path.as_ref();
        info!("Writing SRT file: {}", output_path.display());

        fs::write(output_path, self.render()).await?;

        debug!("Wrote {} cues", self.cues.len());
        Ok(())
    }
}

impl fmt::Display for SubtitleDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cue in &self.cues {
            write!(f, "{}", cue)?;
        }
        Ok(())
    }
}

/// Format seconds as an SRT timecode (HH:MM:SS,mmm).
///
/// Rounds to the nearest millisecond before splitting into fields. Hours are
/// not wrapped. Negative or non-finite input is clamped to zero.
pub fn format_timecode(seconds: f64) -> String {
    let total_milliseconds = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };
    let hours = total_milliseconds / 3_600_000;
    let minutes = (total_milliseconds % 3_600_000) / 60_000;
    let secs = (total_milliseconds % 60_000) / 1_000;
    let millis = total_milliseconds % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}
