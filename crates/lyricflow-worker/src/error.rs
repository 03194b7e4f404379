//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Audio file not found")]
    AudioNotFound,

    #[error("Could not create work directory: {0}")]
    WorkDir(String),

    #[error(transparent)]
    Media(#[from] lyricflow_media::MediaError),

    #[error("Job store error: {0}")]
    Store(#[from] lyricflow_store::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn work_dir(msg: impl Into<String>) -> Self {
        Self::WorkDir(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_not_found_message() {
        assert_eq!(WorkerError::AudioNotFound.to_string(), "Audio file not found");
    }

    #[test]
    fn test_media_errors_are_transparent() {
        let err: WorkerError = lyricflow_media::MediaError::FfmpegNotFound.into();
        assert_eq!(err.to_string(), "FFmpeg not found in PATH");
    }
}
