//! Even partitioning of the audio duration across lyric lines.

use serde::{Deserialize, Serialize};

/// Time span during which one lyric line is on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricSlice {
    /// Position of the line in the lyric sheet
    pub index: usize,
    /// Line text as submitted
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl LyricSlice {
    /// Slice length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Fade length for this slice: `fade` seconds, shortened to half the
    /// slice so fade-in and fade-out never overlap.
    pub fn fade_secs(&self, fade: f64) -> f64 {
        fade.min(self.duration() / 2.0).max(0.0)
    }
}

/// Length of each slice. With no lines the whole duration is one span.
pub fn slice_duration(total_secs: f64, line_count: usize) -> f64 {
    if line_count == 0 {
        total_secs
    } else {
        total_secs / line_count as f64
    }
}

/// Lay `lines` evenly across `total_secs`; line `i` starts at `i * (D / N)`.
pub fn plan_slices<S: AsRef<str>>(lines: &[S], total_secs: f64) -> Vec<LyricSlice> {
    let per_line = slice_duration(total_secs, lines.len());

    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let start = index as f64 * per_line;
            LyricSlice {
                index,
                text: line.as_ref().to_string(),
                start,
                end: start + per_line,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_lines_over_thirty_seconds() {
        let slices = plan_slices(&["a", "b", "c"], 30.0);

        assert_eq!(slices.len(), 3);
        let starts: Vec<f64> = slices.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0.0, 10.0, 20.0]);
        for slice in &slices {
            assert!((slice.duration() - 10.0).abs() < 1e-9);
            assert!((slice.fade_secs(0.3) - 0.3).abs() < 1e-9);
        }
        assert_eq!(slices[1].text, "b");
    }

    #[test]
    fn test_slices_cover_duration() {
        for (count, total) in [(1usize, 7.5f64), (7, 183.27), (12, 0.9), (100, 241.0)] {
            let lines: Vec<String> = (0..count).map(|i| format!("line {i}")).collect();
            let slices = plan_slices(&lines, total);

            let sum: f64 = slices.iter().map(LyricSlice::duration).sum();
            assert!((sum - total).abs() < 1e-6, "sum {sum} != {total}");

            let per_line = total / count as f64;
            for (i, slice) in slices.iter().enumerate() {
                assert!((slice.start - i as f64 * per_line).abs() < 1e-9);
            }
            assert!((slices.last().unwrap().end - total).abs() < 1e-6);
        }
    }

    #[test]
    fn test_no_lines() {
        let lines: [&str; 0] = [];
        assert!(plan_slices(&lines, 12.0).is_empty());
        assert_eq!(slice_duration(12.0, 0), 12.0);
    }

    #[test]
    fn test_short_slices_shorten_fades() {
        let slices = plan_slices(&["a", "b"], 0.4);
        assert!((slices[0].fade_secs(0.3) - 0.1).abs() < 1e-9);
    }
}
