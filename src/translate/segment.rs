use indicatif::ProgressBar;
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::TranslateConfig;
use crate::error::{JasubError, Result};
use crate::subtitle::format_timecode;
use crate::text::sanitize;
use crate::transcript::Segment;
use super::Translator;

/// Non-fatal report of a segment that kept its source text
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationNotice {
    /// 1-based cue number the segment will get in the document
    pub cue: usize,
    pub start: f64,
    pub reason: String,
}

impl fmt::Display for TranslationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cue {} at {}: translation failed, kept original text ({})",
            self.cue,
            format_timecode(self.start),
            self.reason
        )
    }
}

/// Result of translating a whole transcript
#[derive(Debug, Default)]
pub struct TranslatedSegments {
    pub segments: Vec<Segment>,
    pub notices: Vec<TranslationNotice>,
}

/// Translates segments one by one, never letting a failure escape.
pub struct SegmentTranslator {
    translator: Box<dyn Translator>,
    source_language: String,
    target_language: String,
    max_retries: u32,
}

impl SegmentTranslator {
    pub fn new(translator: Box<dyn Translator>, config: &TranslateConfig) -> Self {
        Self {
            translator,
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            max_retries: config.max_retries,
        }
    }

    /// Translate one piece of text.
    ///
    /// On failure returns the unchanged source text together with the last error.
    /// Text that sanitizes to nothing is never sent to the translator.
    pub async fn translate_text(&self, text: &str) -> std::result::Result<String, (String, JasubError)> {
        let clean = sanitize(text);
        if clean.trim().is_empty() {
            return Err((
                text.to_string(),
                JasubError::Translation("No translatable text after sanitizing".to_string()),
            ));
        }

        match self.translate_with_retries(&clean).await {
            Ok(translation) => Ok(translation),
            Err(e) => Err((text.to_string(), e)),
        }
    }

    async fn translate_with_retries(&self, text: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            let result = self.translator
                .translate(text, &self.source_language, &self.target_language)
                .await
                .and_then(|translation| {
                    let translation = translation.trim();
                    if translation.is_empty() {
                        Err(JasubError::Translation("Empty translation received".to_string()))
                    } else {
                        Ok(translation.to_string())
                    }
                });

            match result {
                Ok(translation) => return Ok(translation),
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    debug!("Translation attempt {} failed, retrying: {}", attempt, e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Translate every segment in order, keeping source text where translation fails
    pub async fn translate_all(&self, segments: Vec<Segment>, progress: &ProgressBar) -> TranslatedSegments {
        info!(
            "Translating {} segments from {} to {}",
            segments.len(), self.source_language, self.target_language
        );

        let mut translated = TranslatedSegments {
            segments: Vec::with_capacity(segments.len()),
            notices: Vec::new(),
        };

        for (position, mut segment) in segments.into_iter().enumerate() {
            debug!("Segment {} source: {}", position + 1, segment.text);

            match self.translate_text(&segment.text).await {
                Ok(translation) => {
                    debug!("Segment {} target: {}", position + 1, translation);
                    segment.text = translation;
                }
                Err((fallback, e)) => {
                    let notice = TranslationNotice {
                        cue: position + 1,
                        start: segment.start,
                        reason: e.to_string(),
                    };
                    warn!("{}", notice);
                    segment.text = fallback;
                    translated.notices.push(notice);
                }
            }

            translated.segments.push(segment);
            progress.inc(1);
        }

        translated
    }
}
