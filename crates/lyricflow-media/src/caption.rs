//! Caption text layout: font selection and word wrapping.

use std::path::{Path, PathBuf};

use lyricflow_models::FontWeight;

/// Row pitch as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.25;

/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH_REGULAR: f64 = 0.55;
const GLYPH_WIDTH_BOLD: f64 = 0.6;

/// Font used for `drawtext`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// TrueType/OpenType file on disk
    File(PathBuf),
    /// Fontconfig pattern, e.g. `Sans:bold`
    Family(String),
}

impl FontSource {
    /// Use `path` when it exists, otherwise fall back to the fontconfig
    /// sans family with the requested weight.
    pub fn resolve(path: Option<&Path>, weight: FontWeight) -> Self {
        match path {
            Some(p) if p.is_file() => FontSource::File(p.to_path_buf()),
            _ => FontSource::Family(
                match weight {
                    FontWeight::Bold => "Sans:bold",
                    FontWeight::Normal => "Sans",
                }
                .to_string(),
            ),
        }
    }
}

/// Approximate number of characters that fit in `max_width` pixels.
pub fn chars_per_row(font_size: u32, weight: FontWeight, max_width: u32) -> usize {
    let advance = match weight {
        FontWeight::Bold => GLYPH_WIDTH_BOLD,
        FontWeight::Normal => GLYPH_WIDTH_REGULAR,
    } * f64::from(font_size.max(1));

    ((f64::from(max_width) / advance).floor() as usize).max(1)
}

/// Greedy word wrap of a lyric line into rows of at most `max_chars`
/// characters. Explicit newlines start a new row; words longer than a row
/// are split. Blank input yields no rows.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut rows = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            // Break words that can never fit
            while word.len() > max_chars {
                if current_len > 0 {
                    rows.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(max_chars);
                rows.push(word.into_iter().collect());
                word = rest;
            }

            if word.is_empty() {
                continue;
            }

            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };

            if needed > max_chars {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }

        if current_len > 0 {
            rows.push(current);
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_single_row() {
        assert_eq!(wrap_text("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_on_word_boundaries() {
        let rows = wrap_text("the quick brown fox jumps over the lazy dog", 15);
        assert_eq!(rows, vec!["the quick brown", "fox jumps over", "the lazy dog"]);
        assert!(rows.iter().all(|r| r.chars().count() <= 15));
    }

    #[test]
    fn test_long_word_is_split() {
        let rows = wrap_text("a supercalifragilistic b", 8);
        assert_eq!(rows, vec!["a", "supercal", "ifragili", "stic b"]);
    }

    #[test]
    fn test_explicit_newlines_and_blank() {
        assert_eq!(wrap_text("one\ntwo", 40), vec!["one", "two"]);
        assert!(wrap_text("   ", 40).is_empty());
        assert!(wrap_text("", 40).is_empty());
    }

    #[test]
    fn test_multibyte_characters_count_as_one() {
        let rows = wrap_text("añoranza corazón", 8);
        assert_eq!(rows, vec!["añoranza", "corazón"]);
    }

    #[test]
    fn test_chars_per_row() {
        // 980px at 60px bold (36px per glyph)
        assert_eq!(chars_per_row(60, FontWeight::Bold, 980), 27);
        assert_eq!(chars_per_row(50, FontWeight::Normal, 980), 35);
        assert_eq!(chars_per_row(500, FontWeight::Bold, 10), 1);
    }

    #[test]
    fn test_font_fallback() {
        let font = FontSource::resolve(Some(Path::new("/nonexistent/font.ttf")), FontWeight::Bold);
        assert_eq!(font, FontSource::Family("Sans:bold".to_string()));
        assert_eq!(
            FontSource::resolve(None, FontWeight::Normal),
            FontSource::Family("Sans".to_string())
        );
    }
}
