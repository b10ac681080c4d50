//! Greedy word wrap and block measurement.
//!
//! Line lengths are counted in characters and compared against
//! `floor(width / char_width)`, the same approximation the metrics table makes.

use serde::{Deserialize, Serialize};

use crate::text::font_metrics::FontSizeMetrics;

/// Marker prepended to each bullet-list item before wrapping.
pub const BULLET_MARKER: &str = "• ";

/// A block of text wrapped at one font size and width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDimensions {
    pub lines: Vec<String>,
    pub line_height: f32,
    pub total_height: f32,
    /// Mean characters per line, `0.0` when there are no lines.
    pub average_line_length: f32,
    /// Coarse diagnostic: `total_height > container_width * 0.8`.
    /// Never used to decide whether a size fits.
    pub overflow: bool,
}

impl TextDimensions {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn from_lines(lines: Vec<String>, metrics: &FontSizeMetrics, container_width: f32) -> Self {
        let total_height = lines.len() as f32 * metrics.line_height;
        let average_line_length = if lines.is_empty() {
            0.0
        } else {
            let total_chars: usize = lines.iter().map(|l| l.chars().count()).sum();
            total_chars as f32 / lines.len() as f32
        };

        TextDimensions {
            lines,
            line_height: metrics.line_height,
            total_height,
            average_line_length,
            overflow: total_height > container_width * 0.8,
        }
    }
}

/// Greedy word wrap at `container_width` for one font size.
///
/// Words are whitespace-delimited. A word is appended (with one separating
/// space) while the line stays within `max_chars_per_line`; otherwise the line
/// is flushed. Words longer than a full line are hard-split into fixed-width
/// chunks, and the last chunk stays open so following words can join it.
/// Whitespace-only text and non-positive widths produce no lines.
pub fn wrap_text(text: &str, container_width: f32, metrics: &FontSizeMetrics) -> Vec<String> {
    let max_chars = metrics.max_chars_per_line(container_width);
    if max_chars == 0 {
        return vec![];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            let mut chunks = chars.chunks(max_chars).peekable();
            current_len = 0;
            while let Some(chunk) = chunks.next() {
                let piece: String = chunk.iter().collect();
                if chunks.peek().is_some() {
                    lines.push(piece);
                } else {
                    current_len = chunk.len();
                    current = piece;
                }
            }
            continue;
        }

        let needed = if current_len == 0 {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if needed <= max_chars {
            if current_len > 0 {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
        } else {
            // Current line is full: flush it and start a new line with this word.
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Wraps `text` and derives the block's height and line statistics.
pub fn calculate_text_dimensions(
    text: &str,
    metrics: &FontSizeMetrics,
    container_width: f32,
) -> TextDimensions {
    let lines = wrap_text(text, container_width, metrics);
    TextDimensions::from_lines(lines, metrics, container_width)
}

/// Measures a bullet list. Each item is prefixed with [`BULLET_MARKER`] and
/// wrapped on its own, so items never share a line.
pub fn measure_bullets<S: AsRef<str>>(
    items: &[S],
    container_width: f32,
    metrics: &FontSizeMetrics,
) -> TextDimensions {
    let lines: Vec<String> = items
        .iter()
        .map(|item| item.as_ref().trim())
        .filter(|item| !item.is_empty())
        .flat_map(|item| wrap_text(&format!("{BULLET_MARKER}{item}"), container_width, metrics))
        .collect();
    TextDimensions::from_lines(lines, metrics, container_width)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
