//! Shared data models for the LyricFlow backend.
//!
//! This crate provides Serde-serializable types for:
//! - Jobs, generate requests and job status records
//! - Style and platform presets
//! - Encoding configuration

pub mod encoding;
pub mod job;
pub mod job_status;
pub mod style;

// Re-export common types
pub use encoding::{EncodingConfig, CAPTION_MARGIN_PX, LINE_FADE_SECS};
pub use job::{GenerateRequest, JobId};
pub use job_status::{JobRecord, JobStatus, JobUpdate, TransitionError};
pub use style::{FontWeight, FrameSize, LyricStyle, Platform, RgbColor, StylePreset};
