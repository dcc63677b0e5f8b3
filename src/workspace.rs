use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, JasubError};

const AUDIO_FILE: &str = "audio.wav";
const SUBTITLE_FILE: &str = "subtitles.srt";

/// Temporary directory holding every artifact of one run.
///
/// The directory and its contents are removed when this guard is closed or
/// dropped, whichever comes first.
pub struct RunWorkspace {
    run_id: Uuid,
    dir: TempDir,
}

impl RunWorkspace {
    /// Create a workspace under `root`, or the system temp directory
    pub fn create(root: Option<&Path>) -> Result<Self> {
        let run_id = Uuid::new_v4();
        let prefix = format!("jasub-{}-", run_id);

        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);
        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };

        debug!("Created run workspace {}", dir.path().display());
        Ok(Self { run_id, dir })
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Place the input video in the workspace, hard-linking when possible
    pub async fn stage_video(&self, source: &Path) -> Result<PathBuf> {
        if !source.is_file() {
            return Err(JasubError::FileNotFound(source.display().to_string()));
        }

        let extension = source
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let staged = self.dir.path().join(format!("input.{}", extension));

        if let Err(e) = tokio::fs::hard_link(source, &staged).await {
            debug!("Hard link failed ({}), copying input instead", e);
            tokio::fs::copy(source, &staged).await?;
        }

        Ok(staged)
    }

    pub fn audio_path(&self) -> PathBuf {
        self.dir.path().join(AUDIO_FILE)
    }

    pub fn subtitle_path(&self) -> PathBuf {
        self.dir.path().join(SUBTITLE_FILE)
    }

    /// Remove the workspace now, reporting any failure
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close()?;
        info!("Removed run workspace {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[tokio::test]
    async fn test_stage_video_and_close() {
        let root = assert_fs::TempDir::new().unwrap();
        let video = root.child("Clip.MP4");
        video.write_binary(b"not really a video").unwrap();

        let workspace = RunWorkspace::create(Some(root.path())).unwrap();
        let workspace_path = workspace.path().to_path_buf();
        assert!(workspace_path.starts_with(root.path()));

        let staged = workspace.stage_video(video.path()).await.unwrap();
        assert_eq!(staged.file_name().unwrap(), "input.mp4");
        assert_eq!(std::fs::read(&staged).unwrap(), b"not really a video");
        assert_eq!(workspace.audio_path(), workspace_path.join("audio.wav"));
        assert_eq!(workspace.subtitle_path(), workspace_path.join("subtitles.srt"));

        workspace.close().unwrap();
        assert!(!workspace_path.exists());
        // The original is untouched
        assert!(video.path().exists());
    }

    #[tokio::test]
    async fn test_stage_missing_video() {
        let workspace = RunWorkspace::create(None).unwrap();
        let err = workspace
            .stage_video(Path::new("/nonexistent/clip.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, JasubError::FileNotFound(_)));
    }

    #[test]
    fn test_drop_removes_workspace() {
        let workspace = RunWorkspace::create(None).unwrap();
        let path = workspace.path().to_path_buf();
        std::fs::write(workspace.audio_path(), b"RIFF").unwrap();
        assert!(path.exists());

        drop(workspace);
        assert!(!path.exists());
    }

    #[test]
    fn test_workspace_names_carry_run_id() {
        let workspace = RunWorkspace::create(None).unwrap();
        let name = workspace.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(&format!("jasub-{}-", workspace.run_id())));
    }
}
