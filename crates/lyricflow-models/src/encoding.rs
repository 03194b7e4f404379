//! Video encoding configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default video codec (H.264)
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
/// Default audio codec
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
/// Default encoding preset
pub const DEFAULT_PRESET: &str = "medium";
/// Default output frame rate
pub const DEFAULT_FPS: u32 = 24;
/// Default encoder thread count
pub const DEFAULT_THREADS: u32 = 4;

/// Fade-in/fade-out length applied to each lyric line (seconds)
pub const LINE_FADE_SECS: f64 = 0.3;
/// Horizontal space left free around wrapped captions (pixels, total)
pub const CAPTION_MARGIN_PX: u32 = 100;

/// Video encoding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EncodingConfig {
    /// Video codec (e.g., "libx264")
    #[serde(default = "default_video_codec")]
    pub codec: String,

    /// Encoding preset (e.g., "fast", "medium", "slow")
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Output frame rate
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Encoder threads
    #[serde(default = "default_threads")]
    pub threads: u32,

    /// Audio codec
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,
}

fn default_video_codec() -> String {
    DEFAULT_VIDEO_CODEC.to_string()
}
fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}
fn default_fps() -> u32 {
    DEFAULT_FPS
}
fn default_threads() -> u32 {
    DEFAULT_THREADS
}
fn default_audio_codec() -> String {
    DEFAULT_AUDIO_CODEC.to_string()
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            preset: DEFAULT_PRESET.to_string(),
            fps: DEFAULT_FPS,
            threads: DEFAULT_THREADS,
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
        }
    }
}

impl EncodingConfig {
    /// Convert to FFmpeg output arguments.
    pub fn to_ffmpeg_args(&self) -> Vec<String> {
        vec![
            "-c:v".to_string(),
            self.codec.clone(),
            "-preset".to_string(),
            self.preset.clone(),
            "-r".to_string(),
            self.fps.to_string(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-threads".to_string(),
            self.threads.to_string(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-movflags".to_string(),
            "+faststart".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncodingConfig::default();
        assert_eq!(config.codec, "libx264");
        assert_eq!(config.audio_codec, "aac");
        assert_eq!(config.fps, 24);
        assert_eq!(config.preset, "medium");
    }

    #[test]
    fn test_ffmpeg_args() {
        let args = EncodingConfig::default().to_ffmpeg_args();
        let pos = args.iter().position(|a| a == "-c:v").unwrap();
        assert_eq!(args[pos + 1], "libx264");
        let pos = args.iter().position(|a| a == "-r").unwrap();
        assert_eq!(args[pos + 1], "24");
        assert!(args.contains(&"aac".to_string()));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: EncodingConfig = serde_json::from_str(r#"{"preset": "fast"}"#).unwrap();
        assert_eq!(config.preset, "fast");
        assert_eq!(config.threads, 4);
    }
}
