//! Lyric video composition: background, caption overlays and audio.

use std::path::{Path, PathBuf};

use lyricflow_models::{EncodingConfig, FrameSize, StylePreset, CAPTION_MARGIN_PX, LINE_FADE_SECS};
use tracing::debug;

use crate::caption::{chars_per_row, wrap_text, FontSource};
use crate::command::FfmpegCommand;
use crate::error::MediaResult;
use crate::filters::{chain_filters, color_source, row_y_expr, DrawText, VIDEO_OUTPUT_LABEL};
use crate::timeline::LyricSlice;

/// File name of the filter graph script inside the work directory.
const FILTER_SCRIPT_NAME: &str = "filtergraph.txt";

/// Caption overlay for one lyric line.
#[derive(Debug, Clone)]
pub struct CaptionOverlay {
    pub slice: LyricSlice,
    /// Wrapped rows, top to bottom
    pub rows: Vec<String>,
    /// One `drawtext` filter per row
    pub filters: Vec<String>,
}

impl CaptionOverlay {
    /// Lay out `slice` and write each row's text into `workdir`.
    pub async fn build(
        slice: LyricSlice,
        style: &StylePreset,
        frame: FrameSize,
        font: &FontSource,
        workdir: &Path,
    ) -> MediaResult<Self> {
        let max_width = frame.width.saturating_sub(CAPTION_MARGIN_PX);
        let max_chars = chars_per_row(style.font_size, style.font_weight, max_width);
        let rows = wrap_text(&slice.text, max_chars);
        let fade = slice.fade_secs(LINE_FADE_SECS);

        let mut filters = Vec::with_capacity(rows.len());
        for (row, text) in rows.iter().enumerate() {
            let textfile = workdir.join(format!("line-{:04}-{:02}.txt", slice.index, row));
            tokio::fs::write(&textfile, text).await?;

            let textfile = textfile.to_string_lossy();
            let filter = DrawText {
                textfile: &textfile,
                font,
                font_size: style.font_size,
                font_color: style.text_color,
                y: row_y_expr(row, rows.len(), style.font_size),
                start: slice.start,
                end: slice.end,
                fade,
            }
            .to_filter();
            filters.push(filter);
        }

        Ok(Self { slice, rows, filters })
    }
}

/// Background plus caption overlays over a fixed duration.
#[derive(Debug, Clone)]
pub struct LyricComposition {
    style: StylePreset,
    frame: FrameSize,
    duration: f64,
    fps: u32,
    overlays: Vec<CaptionOverlay>,
}

impl LyricComposition {
    /// Solid background of `frame` size in the style's color.
    pub fn new(style: StylePreset, frame: FrameSize, duration: f64, fps: u32) -> Self {
        Self {
            style,
            frame,
            duration,
            fps,
            overlays: Vec::new(),
        }
    }

    pub fn push_overlay(&mut self, overlay: CaptionOverlay) {
        self.overlays.push(overlay);
    }

    /// Background source for the `lavfi` input.
    pub fn background_source(&self) -> String {
        color_source(self.style.background, self.frame, self.fps, self.duration)
    }

    /// Filter graph compositing every overlay onto input 0.
    pub fn filter_graph(&self) -> String {
        let filters: Vec<String> = self
            .overlays
            .iter()
            .flat_map(|o| o.filters.iter().cloned())
            .collect();
        chain_filters("0:v", &filters, VIDEO_OUTPUT_LABEL)
    }

    /// Write the filter script into `workdir` and build the encode command
    /// muxing `audio` into `output`.
    pub async fn into_command(
        self,
        audio: &Path,
        output: &Path,
        workdir: &Path,
        encoding: &EncodingConfig,
    ) -> MediaResult<FfmpegCommand> {
        let script: PathBuf = workdir.join(FILTER_SCRIPT_NAME);
        let graph = self.filter_graph();
        tokio::fs::write(&script, &graph).await?;

        debug!(
            overlays = self.overlays.len(),
            script = %script.display(),
            "Wrote filter graph"
        );

        Ok(FfmpegCommand::new(output)
            .lavfi_input(self.background_source())
            .input(audio)
            .filter_complex_script(&script)
            .map(format!("[{}]", VIDEO_OUTPUT_LABEL))
            .map("1:a")
            .output_args(encoding.to_ffmpeg_args())
            .duration(self.duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::plan_slices;
    use lyricflow_models::LyricStyle;

    fn family_font() -> FontSource {
        FontSource::Family("Sans:bold".to_string())
    }

    #[tokio::test]
    async fn test_overlays_follow_slices() {
        let dir = tempfile::tempdir().unwrap();
        let style = LyricStyle::Aesthetic.preset();
        let font = family_font();

        let mut composition = LyricComposition::new(style, FrameSize::PORTRAIT, 30.0, 24);
        for slice in plan_slices(&["a", "b", "c"], 30.0) {
            let overlay = CaptionOverlay::build(slice, &style, FrameSize::PORTRAIT, &font, dir.path())
                .await
                .unwrap();
            composition.push_overlay(overlay);
        }

        let graph = composition.filter_graph();
        assert!(graph.starts_with("[0:v]drawtext="));
        assert!(graph.ends_with("[v]"));
        assert!(graph.contains("between(t,0.000,10.000)"));
        assert!(graph.contains("between(t,10.000,20.000)"));
        assert!(graph.contains("between(t,20.000,30.000)"));

        let text = tokio::fs::read_to_string(dir.path().join("line-0001-00.txt"))
            .await
            .unwrap();
        assert_eq!(text, "b");
    }

    #[tokio::test]
    async fn test_long_line_wraps_into_rows() {
        let dir = tempfile::tempdir().unwrap();
        let style = LyricStyle::Bold.preset();
        let slice = plan_slices(
            &["I keep on running through the city lights and I never look back again"],
            12.0,
        )
        .remove(0);

        let overlay = CaptionOverlay::build(slice, &style, FrameSize::SQUARE, &family_font(), dir.path())
            .await
            .unwrap();

        assert!(overlay.rows.len() > 1);
        assert_eq!(overlay.filters.len(), overlay.rows.len());
        assert!(dir.path().join("line-0000-01.txt").exists());
    }

    #[tokio::test]
    async fn test_empty_composition_command() {
        let dir = tempfile::tempdir().unwrap();
        let composition =
            LyricComposition::new(LyricStyle::Minimal.preset(), FrameSize::SQUARE, 5.0, 24);
        assert_eq!(composition.filter_graph(), "[0:v]null[v]");

        let cmd = composition
            .into_command(
                Path::new("song.mp3"),
                Path::new("out.mp4"),
                dir.path(),
                &EncodingConfig::default(),
            )
            .await
            .unwrap();

        let args = cmd.build_args();
        assert_eq!(cmd.input_count(), 2);
        assert!(args.contains(&"color=c=0xF5F5F5:s=1080x1080:r=24:d=5.000".to_string()));
        assert!(args.contains(&"-filter_complex_script".to_string()));
        assert!(args.contains(&"1:a".to_string()));
        assert!(dir.path().join(FILTER_SCRIPT_NAME).exists());
    }
}
