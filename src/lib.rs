//! jasub - Japanese speech to Traditional Chinese subtitles
//!
//! Extracts audio with ffmpeg, transcribes it with whisper, translates every
//! segment with a fall-back-to-source policy and writes an SRT document.

pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod subtitle;
pub mod text;
pub mod transcribe;
pub mod transcript;
pub mod translate;
pub mod workflow;
pub mod workspace;
