use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::config::{TranscriberBackend, TranslatorBackend};
use crate::workflow::Delivery;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Turn a Japanese video into a Traditional Chinese SRT file
    Process {
        /// Input video file (mp4, avi, mov, mkv, webm)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        /// Spoken language of the video
        #[arg(long)]
        source_lang: Option<String>,

        /// Subtitle language
        #[arg(long)]
        target_lang: Option<String>,

        /// Translation backend
        #[arg(long, value_enum)]
        translator: Option<TranslatorChoice>,

        /// Transcription backend
        #[arg(long, value_enum)]
        transcriber: Option<TranscriberChoice>,
    },

    /// Extract the mono 16 kHz audio track from a video file
    Extract {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,

        /// Output audio file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Transcribe an audio file to an untranslated SRT file
    Transcribe {
        /// Input audio file
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        /// Spoken language of the audio
        #[arg(long)]
        source_lang: Option<String>,
    },

    /// Write the default configuration as TOML
    Config {
        /// Destination file
        #[arg(short, long, default_value = "jasub.toml")]
        output: PathBuf,
    },
}

#[derive(ClapArgs)]
pub struct OutputArgs {
    /// Output subtitle file
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the subtitle document instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

impl OutputArgs {
    /// Resolve the delivery target, defaulting to `<stem>.<suffix>.srt` beside the input
    pub fn delivery(&self, input: &Path, suffix: &str) -> Delivery {
        if self.stdout {
            return Delivery::Stdout;
        }
        match &self.output {
            Some(path) => Delivery::File(path.clone()),
            None => {
                let stem = input
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "subtitles".to_string());
                Delivery::File(input.with_file_name(format!("{}.{}.srt", stem, suffix)))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TranslatorChoice {
    Google,
    Ollama,
}

impl From<TranslatorChoice> for TranslatorBackend {
    fn from(choice: TranslatorChoice) -> Self {
        match choice {
            TranslatorChoice::Google => TranslatorBackend::Google,
            TranslatorChoice::Ollama => TranslatorBackend::Ollama,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TranscriberChoice {
    #[value(name = "openai")]
    OpenAi,
    WhisperCpp,
}

impl From<TranscriberChoice> for TranscriberBackend {
    fn from(choice: TranscriberChoice) -> Self {
        match choice {
            TranscriberChoice::OpenAi => TranscriberBackend::OpenAi,
            TranscriberChoice::WhisperCpp => TranscriberBackend::WhisperCpp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_process_defaults() {
        let args = Args::try_parse_from(["jasub", "process", "-i", "videos/talk.mp4"]).unwrap();
        match args.command {
            Commands::Process { input, output, translator, transcriber, .. } => {
                assert_eq!(input, PathBuf::from("videos/talk.mp4"));
                assert!(translator.is_none());
                assert!(transcriber.is_none());
                assert_eq!(
                    output.delivery(&input, "zh-tw"),
                    Delivery::File(PathBuf::from("videos/talk.zh-tw.srt"))
                );
            }
            _ => panic!("expected process command"),
        }
    }

    #[test]
    fn test_parse_backends() {
        let args = Args::try_parse_from([
            "jasub", "-v", "process", "-i", "a.mov", "--translator", "ollama",
            "--transcriber", "whisper-cpp", "--stdout",
        ])
        .unwrap();
        assert!(args.verbose);
        match args.command {
            Commands::Process { input, output, translator, transcriber, .. } => {
                assert!(matches!(translator, Some(TranslatorChoice::Ollama)));
                assert!(matches!(transcriber, Some(TranscriberChoice::WhisperCpp)));
                assert_eq!(output.delivery(&input, "zh-tw"), Delivery::Stdout);
            }
            _ => panic!("expected process command"),
        }
    }

    #[test]
    fn test_output_and_stdout_conflict() {
        assert!(Args::try_parse_from([
            "jasub", "process", "-i", "a.mp4", "-o", "a.srt", "--stdout",
        ])
        .is_err());
    }

    #[test]
    fn test_explicit_output_path() {
        let args = Args::try_parse_from(["jasub", "transcribe", "-i", "a.wav", "-o", "subs/a.srt"]).unwrap();
        match args.command {
            Commands::Transcribe { input, output, .. } => {
                assert_eq!(
                    output.delivery(&input, "ja"),
                    Delivery::File(PathBuf::from("subs/a.srt"))
                );
            }
            _ => panic!("expected transcribe command"),
        }
    }
}
