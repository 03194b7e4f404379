//! Style and platform preset definitions.
//!
//! Both preset families are looked up by case-insensitive key. Parsing an
//! unknown key is an error, but [`LyricStyle::resolve`] and
//! [`Platform::resolve`] fall back to the default preset instead, which is
//! what request handling uses.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// RGB background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    /// FFmpeg color literal, e.g. `0xFFB6C1`.
    pub fn to_ffmpeg(&self) -> String {
        format!("0x{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Caption font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Resolved styling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StylePreset {
    /// Solid background color
    pub background: RgbColor,
    /// Text color (FFmpeg color name)
    pub text_color: &'static str,
    /// Font size in pixels
    pub font_size: u32,
    /// Font weight
    pub font_weight: FontWeight,
}

/// Available caption styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum LyricStyle {
    /// Pink background, white bold text
    #[default]
    Aesthetic,
    /// Near-black background, gold text
    Elegant,
    /// Red background, large white text
    Bold,
    /// Navy background, cyan text
    Dark,
    /// Off-white background, black text
    Minimal,
    /// Violet background, white text
    Lyrical,
}

impl LyricStyle {
    /// All available styles.
    pub const ALL: &'static [LyricStyle] = &[
        LyricStyle::Aesthetic,
        LyricStyle::Elegant,
        LyricStyle::Bold,
        LyricStyle::Dark,
        LyricStyle::Minimal,
        LyricStyle::Lyrical,
    ];

    /// Look up a style by key, falling back to the default on a miss.
    pub fn resolve(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LyricStyle::Aesthetic => "aesthetic",
            LyricStyle::Elegant => "elegant",
            LyricStyle::Bold => "bold",
            LyricStyle::Dark => "dark",
            LyricStyle::Minimal => "minimal",
            LyricStyle::Lyrical => "lyrical",
        }
    }

    /// Styling parameters for this style.
    pub const fn preset(&self) -> StylePreset {
        match self {
            LyricStyle::Aesthetic => StylePreset {
                background: RgbColor(255, 182, 193),
                text_color: "white",
                font_size: 60,
                font_weight: FontWeight::Bold,
            },
            LyricStyle::Elegant => StylePreset {
                background: RgbColor(25, 25, 25),
                text_color: "gold",
                font_size: 55,
                font_weight: FontWeight::Normal,
            },
            LyricStyle::Bold => StylePreset {
                background: RgbColor(255, 0, 0),
                text_color: "white",
                font_size: 70,
                font_weight: FontWeight::Bold,
            },
            LyricStyle::Dark => StylePreset {
                background: RgbColor(15, 15, 30),
                text_color: "cyan",
                font_size: 58,
                font_weight: FontWeight::Bold,
            },
            LyricStyle::Minimal => StylePreset {
                background: RgbColor(245, 245, 245),
                text_color: "black",
                font_size: 50,
                font_weight: FontWeight::Normal,
            },
            LyricStyle::Lyrical => StylePreset {
                background: RgbColor(138, 43, 226),
                text_color: "white",
                font_size: 62,
                font_weight: FontWeight::Bold,
            },
        }
    }
}

impl fmt::Display for LyricStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LyricStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aesthetic" => Ok(LyricStyle::Aesthetic),
            "elegant" => Ok(LyricStyle::Elegant),
            "bold" => Ok(LyricStyle::Bold),
            "dark" => Ok(LyricStyle::Dark),
            "minimal" => Ok(LyricStyle::Minimal),
            "lyrical" => Ok(LyricStyle::Lyrical),
            _ => Err(StyleParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown style: {0}")]
pub struct StyleParseError(String);

/// Output frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    /// Portrait 9:16 at 1080p
    pub const PORTRAIT: FrameSize = FrameSize {
        width: 1080,
        height: 1920,
    };

    /// Square 1:1 at 1080p
    pub const SQUARE: FrameSize = FrameSize {
        width: 1080,
        height: 1080,
    };
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Target platform for the rendered video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Instagram Reels
    #[default]
    Reels,
    /// YouTube Shorts
    Shorts,
    /// TikTok
    Tiktok,
    /// Square feed post
    Square,
}

impl Platform {
    /// Look up a platform by key, falling back to the default on a miss.
    pub fn resolve(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Reels => "reels",
            Platform::Shorts => "shorts",
            Platform::Tiktok => "tiktok",
            Platform::Square => "square",
        }
    }

    /// Frame dimensions for this platform.
    pub const fn frame_size(&self) -> FrameSize {
        match self {
            Platform::Reels | Platform::Shorts | Platform::Tiktok => FrameSize::PORTRAIT,
            Platform::Square => FrameSize::SQUARE,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reels" => Ok(Platform::Reels),
            "shorts" => Ok(Platform::Shorts),
            "tiktok" => Ok(Platform::Tiktok),
            "square" => Ok(Platform::Square),
            _ => Err(PlatformParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown platform: {0}")]
pub struct PlatformParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_parse() {
        assert_eq!("elegant".parse::<LyricStyle>().unwrap(), LyricStyle::Elegant);
        assert_eq!("LYRICAL".parse::<LyricStyle>().unwrap(), LyricStyle::Lyrical);
        assert!("neon".parse::<LyricStyle>().is_err());
    }

    #[test]
    fn test_style_resolve_falls_back() {
        assert_eq!(LyricStyle::resolve("Minimal"), LyricStyle::Minimal);
        assert_eq!(LyricStyle::resolve("neon"), LyricStyle::Aesthetic);
        assert_eq!(LyricStyle::resolve(""), LyricStyle::Aesthetic);
        assert_eq!(LyricStyle::resolve(" dark "), LyricStyle::Aesthetic);
    }

    #[test]
    fn test_style_round_trips_through_key() {
        for style in LyricStyle::ALL {
            assert_eq!(LyricStyle::resolve(style.as_str()), *style);
        }
    }

    #[test]
    fn test_style_presets() {
        let aesthetic = LyricStyle::Aesthetic.preset();
        assert_eq!(aesthetic.background, RgbColor(255, 182, 193));
        assert_eq!(aesthetic.text_color, "white");
        assert_eq!(aesthetic.font_size, 60);
        assert_eq!(aesthetic.font_weight, FontWeight::Bold);

        let elegant = LyricStyle::Elegant.preset();
        assert_eq!(elegant.text_color, "gold");
        assert_eq!(elegant.font_weight, FontWeight::Normal);

        assert_eq!(LyricStyle::Bold.preset().font_size, 70);
        assert_eq!(LyricStyle::Minimal.preset().text_color, "black");
    }

    #[test]
    fn test_rgb_to_ffmpeg() {
        assert_eq!(RgbColor(255, 182, 193).to_ffmpeg(), "0xFFB6C1");
        assert_eq!(RgbColor(15, 15, 30).to_ffmpeg(), "0x0F0F1E");
    }

    #[test]
    fn test_platform_frames() {
        assert_eq!(Platform::Reels.frame_size(), FrameSize::PORTRAIT);
        assert_eq!(Platform::Shorts.frame_size(), FrameSize::PORTRAIT);
        assert_eq!(Platform::Tiktok.frame_size(), FrameSize::PORTRAIT);
        assert_eq!(Platform::Square.frame_size(), FrameSize::SQUARE);
        assert_eq!(FrameSize::PORTRAIT.to_string(), "1080x1920");
    }

    #[test]
    fn test_platform_resolve_falls_back() {
        assert_eq!(Platform::resolve("TikTok"), Platform::Tiktok);
        assert_eq!(Platform::resolve("youtube"), Platform::Reels);
        assert_eq!(Platform::resolve(" square"), Platform::Reels);
    }
}
