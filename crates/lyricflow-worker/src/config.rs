//! Render configuration.

use std::path::{Path, PathBuf};

use lyricflow_media::FontSource;
use lyricflow_models::{EncodingConfig, FontWeight};

const DEFAULT_FONT_REGULAR: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";
const DEFAULT_FONT_BOLD: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

/// Settings shared by every assembler task.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Directory holding uploaded audio
    pub upload_dir: PathBuf,
    /// Directory receiving rendered videos
    pub output_dir: PathBuf,
    /// Encoder settings
    pub encoding: EncodingConfig,
    /// Font file for normal-weight styles
    pub font_regular: PathBuf,
    /// Font file for bold styles
    pub font_bold: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("outputs"),
            encoding: EncodingConfig::default(),
            font_regular: PathBuf::from(DEFAULT_FONT_REGULAR),
            font_bold: PathBuf::from(DEFAULT_FONT_BOLD),
        }
    }
}

impl RenderConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = EncodingConfig::default();

        Self {
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("outputs")),
            encoding: EncodingConfig {
                fps: std::env::var("RENDER_FPS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|fps| *fps > 0)
                    .unwrap_or(defaults.fps),
                preset: std::env::var("RENDER_PRESET").unwrap_or(defaults.preset),
                threads: std::env::var("RENDER_THREADS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.threads),
                ..EncodingConfig::default()
            },
            font_regular: std::env::var("FONT_REGULAR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_FONT_REGULAR)),
            font_bold: std::env::var("FONT_BOLD")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_FONT_BOLD)),
        }
    }

    /// Use different upload and output directories.
    pub fn with_dirs(mut self, upload_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        self.upload_dir = upload_dir.as_ref().to_path_buf();
        self.output_dir = output_dir.as_ref().to_path_buf();
        self
    }

    /// Font for a caption weight; falls back to fontconfig when the
    /// configured file is missing.
    pub fn font_for(&self, weight: FontWeight) -> FontSource {
        let path = match weight {
            FontWeight::Bold => &self.font_bold,
            FontWeight::Normal => &self.font_regular,
        };
        FontSource::resolve(Some(path.as_path()), weight)
    }
}
