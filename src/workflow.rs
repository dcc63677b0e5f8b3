use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Result, JasubError};
use crate::media::{is_supported_video, MediaProcessor, MediaProcessorFactory, VIDEO_EXTENSIONS};
use crate::subtitle::SubtitleDocument;
use crate::transcribe::{Transcriber, TranscriberFactory};
use crate::transcript::Segment;
use crate::translate::{SegmentTranslator, TranslationNotice, Translator, TranslatorFactory};
use crate::workspace::RunWorkspace;

/// Pipeline stages, entered strictly in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Transcoded,
    Transcribed,
    Translated,
    Serialized,
    Delivered,
    CleanedUp,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Transcoded => "transcoded",
            Stage::Transcribed => "transcribed",
            Stage::Translated => "translated",
            Stage::Serialized => "serialized",
            Stage::Delivered => "delivered",
            Stage::CleanedUp => "cleaned-up",
        };
        f.write_str(name)
    }
}

/// Where the finished subtitle file goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    File(PathBuf),
    Stdout,
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delivery::File(path) => write!(f, "{}", path.display()),
            Delivery::Stdout => f.write_str("stdout"),
        }
    }
}

/// Summary of a completed run
#[derive(Debug)]
pub struct RunReport {
    pub run_id: Uuid,
    pub cues: usize,
    pub delivered_to: Delivery,
    pub notices: Vec<TranslationNotice>,
}

pub struct Workflow {
    config: Config,
    media: Box<dyn MediaProcessor>,
    transcriber: Box<dyn Transcriber>,
    translator: SegmentTranslator,
}

impl Workflow {
    pub fn new(config: Config) -> Result<Self> {
        let media = MediaProcessorFactory::create_processor(config.media.clone());
        let transcriber = TranscriberFactory::create_transcriber(config.transcriber.clone());
        let translator = TranslatorFactory::create_translator(&config.translate)?;

        Ok(Self::with_components(config, media, transcriber, translator))
    }

    pub fn with_components(
        config: Config,
        media: Box<dyn MediaProcessor>,
        transcriber: Box<dyn Transcriber>,
        translator: Box<dyn Translator>,
    ) -> Self {
        let translator = SegmentTranslator::new(translator, &config.translate);
        Self {
            config,
            media,
            transcriber,
            translator,
        }
    }

    /// Turn one video into a translated subtitle file.
    ///
    /// Extraction and transcription failures abort the run; translation
    /// failures only produce notices. The run workspace is removed on every
    /// path out of this function.
    pub async fn process(&self, input_path: &Path, delivery: &Delivery) -> Result<RunReport> {
        if !input_path.exists() {
            return Err(JasubError::FileNotFound(input_path.display().to_string()));
        }
        if !is_supported_video(input_path) {
            return Err(JasubError::UnsupportedFormat(format!(
                "{} (expected one of: {})",
                input_path.display(),
                VIDEO_EXTENSIONS.join(", ")
            )));
        }
        self.media.check_availability()?;

        let workspace = RunWorkspace::create(self.config.output.temp_root.as_deref())?;
        let span = info_span!("run", id = %workspace.run_id());

        self.run(workspace, input_path, delivery).instrument(span).await
    }

    async fn run(
        &self,
        workspace: RunWorkspace,
        input_path: &Path,
        delivery: &Delivery,
    ) -> Result<RunReport> {
        info!("Processing video file: {}", input_path.display());

        let video_path = workspace.stage_video(input_path).await?;
        enter(Stage::Received);

        let audio_path = workspace.audio_path();
        self.media.extract_audio(&video_path, &audio_path).await?;
        enter(Stage::Transcoded);

        let segments = self.transcribe_with_retries(&audio_path).await?;
        enter(Stage::Transcribed);

        let progress = self.progress_bar(segments.len());
        let translated = self.translator.translate_all(segments, &progress).await;
        progress.finish_and_clear();
        enter(Stage::Translated);

        let document = SubtitleDocument::from_segments(&translated.segments);
        let subtitle_path = workspace.subtitle_path();
        document.write_to(&subtitle_path).await?;
        enter(Stage::Serialized);

        deliver(&subtitle_path, delivery).await?;
        enter(Stage::Delivered);

        let report = RunReport {
            run_id: workspace.run_id(),
            cues: document.len(),
            delivered_to: delivery.clone(),
            notices: translated.notices,
        };

        workspace.close()?;
        enter(Stage::CleanedUp);

        if report.notices.is_empty() {
            info!("Generated {} cues", report.cues);
        } else {
            warn!(
                "Generated {} cues, {} kept their original text",
                report.cues,
                report.notices.len()
            );
        }
        Ok(report)
    }

    /// Extract the audio track only
    pub async fn extract_audio(&self, video_path: &Path, audio_path: &Path) -> Result<()> {
        if !video_path.exists() {
            return Err(JasubError::FileNotFound(video_path.display().to_string()));
        }
        self.media.check_availability()?;
        self.media.extract_audio(video_path, audio_path).await
    }

    /// Transcribe an existing waveform into an untranslated subtitle file
    pub async fn transcribe_audio(&self, audio_path: &Path, delivery: &Delivery) -> Result<usize> {
        if !audio_path.exists() {
            return Err(JasubError::FileNotFound(audio_path.display().to_string()));
        }

        let workspace = RunWorkspace::create(self.config.output.temp_root.as_deref())?;
        let segments = self.transcribe_with_retries(audio_path).await?;

        let document = SubtitleDocument::from_segments(&segments);
        let subtitle_path = workspace.subtitle_path();
        document.write_to(&subtitle_path).await?;
        deliver(&subtitle_path, delivery).await?;

        workspace.close()?;
        Ok(document.len())
    }

    async fn transcribe_with_retries(&self, audio_path: &Path) -> Result<Vec<Segment>> {
        let language = &self.config.transcriber.language;
        let max_retries = self.config.transcriber.max_retries;
        let mut attempt = 0;

        loop {
            match self.transcriber.transcribe(audio_path, language).await {
                Ok(segments) => return Ok(segments),
                Err(e) if attempt < max_retries => {
                    attempt += 1;
                    warn!("Transcription attempt {} failed, retrying: {}", attempt, e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.output.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} segments ({eta})",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

fn enter(stage: Stage) {
    info!(%stage, "Entered stage {}", stage);
}

async fn deliver(subtitle_path: &Path, delivery: &Delivery) -> Result<()> {
    match delivery {
        Delivery::File(destination) => {
            if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).await?;
            }
            fs::copy(subtitle_path, destination).await?;
            info!("Subtitle file saved to {}", destination.display());
        }
        Delivery::Stdout => {
            let content = fs::read(subtitle_path).await?;
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&content).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
