//! FFmpeg CLI wrapper for lyric video rendering.
//!
//! This crate provides:
//! - Audio probing via `ffprobe`
//! - Even timing of lyric lines across the audio duration
//! - Caption layout and `drawtext` overlay filters
//! - Type-safe FFmpeg command building and execution
//! - Progress parsing from `-progress pipe:2`

pub mod caption;
pub mod command;
pub mod composition;
pub mod error;
pub mod filters;
pub mod probe;
pub mod progress;
pub mod timeline;

pub use caption::{wrap_text, FontSource};
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use composition::{CaptionOverlay, LyricComposition};
pub use error::{MediaError, MediaResult};
pub use probe::{probe_audio, AudioInfo};
pub use progress::FfmpegProgress;
pub use timeline::{plan_slices, slice_duration, LyricSlice};
