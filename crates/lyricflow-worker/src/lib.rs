//! Lyric video assembler.
//!
//! This crate provides:
//! - The assembly pipeline from audio and lyrics to an encoded MP4
//! - Progress reporting through the job store
//! - A task-per-job executor

pub mod assembler;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;

pub use assembler::VideoAssembler;
pub use config::RenderConfig;
pub use error::{WorkerError, WorkerResult};
pub use executor::JobExecutor;
pub use logging::JobLogger;
