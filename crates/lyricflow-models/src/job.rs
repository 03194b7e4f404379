//! Job identifiers and generate requests.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{LyricStyle, Platform};

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the rendered video for this job.
    pub fn output_filename(&self) -> String {
        format!("{}.mp4", self.0)
    }

    /// Download path served by the API for this job's video.
    pub fn download_url(&self) -> String {
        format!("/download/{}", self.output_filename())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Request body for `POST /generate`.
///
/// Style and platform keys are free-form: unknown or missing keys fall back
/// to the default preset instead of failing the request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerateRequest {
    /// Stored name returned by the upload endpoint
    pub audio_filename: String,

    /// Lyric lines in display order
    pub lyrics: Vec<String>,

    /// Style preset key
    #[serde(default)]
    pub style: String,

    /// Platform preset key
    #[serde(default)]
    pub platform: String,
}

impl GenerateRequest {
    /// Resolved style preset (default on miss).
    pub fn lyric_style(&self) -> LyricStyle {
        LyricStyle::resolve(&self.style)
    }

    /// Resolved platform preset (default on miss).
    pub fn target_platform(&self) -> Platform {
        Platform::resolve(&self.platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_paths() {
        let id = JobId::from_string("abc-123");
        assert_eq!(id.output_filename(), "abc-123.mp4");
        assert_eq!(id.download_url(), "/download/abc-123.mp4");
    }

    #[test]
    fn test_job_ids_are_unique() {
        assert_ne!(JobId::new(), JobId::new());
    }

    #[test]
    fn test_generate_request_defaults() {
        let req: GenerateRequest = serde_json::from_str(
            r#"{"audio_filename": "a.mp3", "lyrics": ["one", "two"]}"#,
        )
        .unwrap();

        assert_eq!(req.lyrics.len(), 2);
        assert_eq!(req.lyric_style(), LyricStyle::Aesthetic);
        assert_eq!(req.target_platform(), Platform::Reels);
    }

    #[test]
    fn test_generate_request_resolves_keys() {
        let req = GenerateRequest {
            audio_filename: "a.mp3".into(),
            lyrics: vec![],
            style: "DARK".into(),
            platform: "Square".into(),
        };

        assert_eq!(req.lyric_style(), LyricStyle::Dark);
        assert_eq!(req.target_platform(), Platform::Square);
    }
}
