use async_trait::async_trait;
use std::path::Path;
use std::process::Command;
use tracing::info;

use crate::config::MediaConfig;
use crate::error::{Result, JasubError};
use super::{MediaProcessor, MediaCommandBuilder};

/// FFmpeg-backed media processor
pub struct FfmpegProcessor {
    config: MediaConfig,
    command_builder: MediaCommandBuilder,
}

impl FfmpegProcessor {
    pub fn new(config: MediaConfig) -> Self {
        let command_builder = MediaCommandBuilder::new(&config.binary_path);

        Self {
            config,
            command_builder,
        }
    }
}

#[async_trait]
impl MediaProcessor for FfmpegProcessor {
    async fn extract_audio(&self, video_path: &Path, audio_path: &Path) -> Result<()> {
        info!("Extracting audio from {} to {}", video_path.display(), audio_path.display());

        let command = self.command_builder.extract_audio(
            video_path,
            audio_path,
            self.config.sample_rate,
            self.config.channels,
        );
        command.execute().await?;

        if !audio_path.exists() {
            return Err(JasubError::Extraction(format!(
                "ffmpeg reported success but {} was not created",
                audio_path.display()
            )));
        }

        info!("Audio extraction completed");
        Ok(())
    }

    fn check_availability(&self) -> Result<()> {
        let check = self.command_builder.version_check();
        let output = Command::new(&check.binary_path)
            .args(&check.args)
            .output()
            .map_err(|e| JasubError::Extraction(format!("Media processor not found: {}", e)))?;

        if output.status.success() {
            info!("Media processor is available");
            Ok(())
        } else {
            Err(JasubError::Extraction("Media processor version check failed".to_string()))
        }
    }
}
