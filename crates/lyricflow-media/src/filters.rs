//! FFmpeg filter expressions for lyric videos.
//!
//! Filter graphs go through two rounds of unescaping inside FFmpeg: once
//! when the graph is split into filters and once when each filter's
//! options are parsed. [`quote_filter_value`] produces literals that
//! survive both.

use lyricflow_models::{FrameSize, RgbColor};

use crate::caption::FontSource;

/// Label of the composited video stream.
pub const VIDEO_OUTPUT_LABEL: &str = "v";

/// Quote a literal (file path, font pattern) for use as a filter option.
pub fn quote_filter_value(value: &str) -> String {
    let option_escaped = value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace(':', "\\:");
    format!("'{}'", option_escaped.replace('\'', "'\\''"))
}

/// Solid-color background source spanning `duration` seconds.
pub fn color_source(color: RgbColor, frame: FrameSize, fps: u32, duration: f64) -> String {
    format!(
        "color=c={}:s={}:r={}:d={:.3}",
        color.to_ffmpeg(),
        frame,
        fps,
        duration
    )
}

/// `enable` expression restricting a filter to `[start, end)`.
pub fn enable_expr(start: f64, end: f64) -> String {
    format!("between(t,{:.3},{:.3})", start, end)
}

/// Opacity ramp: linear fade-in over `fade` seconds after `start`, linear
/// fade-out over the last `fade` seconds before `end`.
pub fn fade_alpha_expr(start: f64, end: f64, fade: f64) -> String {
    if fade <= 0.0 {
        return "1".to_string();
    }

    format!(
        "if(lt(t,{s:.3}+{f:.3}),(t-{s:.3})/{f:.3},if(gt(t,{e:.3}-{f:.3}),({e:.3}-t)/{f:.3},1))",
        s = start,
        e = end,
        f = fade
    )
}

/// Vertical offset of row `row` in a block of `rows` rows centred in the
/// frame.
pub fn row_y_expr(row: usize, rows: usize, font_size: u32) -> String {
    let pitch = f64::from(font_size) * crate::caption::LINE_HEIGHT_FACTOR;
    let block = pitch * rows as f64;
    format!("(h-{:.1})/2+{:.1}", block, pitch * row as f64)
}

/// One `drawtext` overlay row.
#[derive(Debug, Clone)]
pub struct DrawText<'a> {
    /// File holding the row's text
    pub textfile: &'a str,
    pub font: &'a FontSource,
    pub font_size: u32,
    pub font_color: &'a str,
    /// Vertical position expression
    pub y: String,
    pub start: f64,
    pub end: f64,
    pub fade: f64,
}

impl DrawText<'_> {
    /// Render as a `drawtext` filter, horizontally centred.
    pub fn to_filter(&self) -> String {
        let font = match self.font {
            FontSource::File(path) => {
                format!("fontfile={}", quote_filter_value(&path.to_string_lossy()))
            }
            FontSource::Family(pattern) => format!("font={}", quote_filter_value(pattern)),
        };

        format!(
            "drawtext=textfile={}:expansion=none:{}:fontsize={}:fontcolor={}:x=(w-text_w)/2:y={}:enable='{}':alpha='{}'",
            quote_filter_value(self.textfile),
            font,
            self.font_size,
            self.font_color,
            self.y,
            enable_expr(self.start, self.end),
            fade_alpha_expr(self.start, self.end, self.fade),
        )
    }
}

/// Chain `filters` on `input` into the labelled output stream.
pub fn chain_filters(input: &str, filters: &[String], output: &str) -> String {
    if filters.is_empty() {
        format!("[{}]null[{}]", input, output)
    } else {
        format!("[{}]{}[{}]", input, filters.join(","), output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_color_source() {
        let src = color_source(RgbColor(255, 182, 193), FrameSize::PORTRAIT, 24, 30.0);
        assert_eq!(src, "color=c=0xFFB6C1:s=1080x1920:r=24:d=30.000");
    }

    #[test]
    fn test_quote_filter_value() {
        assert_eq!(quote_filter_value("/tmp/job/line.txt"), "'/tmp/job/line.txt'");
        assert_eq!(quote_filter_value("Sans:bold"), "'Sans\\:bold'");
        assert_eq!(quote_filter_value("it's"), "'it\\'\\''s'");
    }

    #[test]
    fn test_fade_alpha() {
        let expr = fade_alpha_expr(10.0, 20.0, 0.3);
        assert_eq!(
            expr,
            "if(lt(t,10.000+0.300),(t-10.000)/0.300,if(gt(t,20.000-0.300),(20.000-t)/0.300,1))"
        );
        assert_eq!(fade_alpha_expr(0.0, 1.0, 0.0), "1");
    }

    #[test]
    fn test_row_positions_are_centred() {
        assert_eq!(row_y_expr(0, 1, 60), "(h-75.0)/2+0.0");
        assert_eq!(row_y_expr(1, 2, 60), "(h-150.0)/2+75.0");
    }

    #[test]
    fn test_drawtext_filter() {
        let font = FontSource::File(PathBuf::from("/usr/share/fonts/DejaVuSans-Bold.ttf"));
        let filter = DrawText {
            textfile: "/tmp/job/line-0000-00.txt",
            font: &font,
            font_size: 60,
            font_color: "white",
            y: row_y_expr(0, 1, 60),
            start: 0.0,
            end: 10.0,
            fade: 0.3,
        }
        .to_filter();

        assert!(filter.starts_with("drawtext=textfile='/tmp/job/line-0000-00.txt':"));
        assert!(filter.contains("fontfile='/usr/share/fonts/DejaVuSans-Bold.ttf'"));
        assert!(filter.contains(":fontsize=60:fontcolor=white:x=(w-text_w)/2:"));
        assert!(filter.contains(":enable='between(t,0.000,10.000)':"));
        assert!(filter.ends_with("(10.000-t)/0.300,1))'"));
    }

    #[test]
    fn test_chain_filters() {
        assert_eq!(chain_filters("0:v", &[], "v"), "[0:v]null[v]");
        let filters = vec!["drawtext=a".to_string(), "drawtext=b".to_string()];
        assert_eq!(
            chain_filters("0:v", &filters, "v"),
            "[0:v]drawtext=a,drawtext=b[v]"
        );
    }
}
