//! Word-preserving truncation with an ellipsis.

pub const ELLIPSIS: &str = "...";

const ELLIPSIS_LEN: usize = 3;

/// Shortens `text` to at most `max_length` characters, ellipsis included.
///
/// Text that already fits is returned unchanged. With `preserve_words`, whole
/// words are kept while they and the ellipsis fit; when not even the first word
/// fits (or `preserve_words` is off) the text is cut at a character boundary.
pub fn truncate_text_intelligently(text: &str, max_length: usize, preserve_words: bool) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    if max_length <= ELLIPSIS_LEN {
        return ".".repeat(max_length);
    }

    if preserve_words {
        let mut kept = String::new();
        let mut kept_len = 0usize;
        for word in text.split_whitespace() {
            let word_len = word.chars().count();
            let candidate = if kept_len == 0 {
                word_len
            } else {
                kept_len + 1 + word_len
            };
            if candidate + ELLIPSIS_LEN > max_length {
                break;
            }
            if kept_len > 0 {
                kept.push(' ');
            }
            kept.push_str(word);
            kept_len = candidate;
        }
        if kept_len > 0 {
            kept.push_str(ELLIPSIS);
            return kept;
        }
    }

    let cut: String = text.chars().take(max_length - ELLIPSIS_LEN).collect();
    format!("{}{ELLIPSIS}", cut.trim_end())
}

/// Character budget for the fit-failure retry: `ratio` of the original length.
pub fn retry_budget(text: &str, ratio: f32) -> usize {
    let len = text.chars().count() as f32;
    (len * ratio.clamp(0.0, 1.0)).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_unchanged() {
        assert_eq!(truncate_text_intelligently("Hello", 10, true), "Hello");
        assert_eq!(truncate_text_intelligently("Hello", 5, true), "Hello");
    }

    #[test]
    fn test_word_preserving_truncation() {
        let out = truncate_text_intelligently("The quick brown fox jumps", 15, true);
        // "The quick" (9) + "..." fits; "The quick brown" (15) + "..." does not
        assert_eq!(out, "The quick...");
        assert!(out.chars().count() <= 15);
    }

    #[test]
    fn test_falls_back_to_hard_cut_when_no_word_fits() {
        let out = truncate_text_intelligently("Incomprehensibilities abound", 10, true);
        assert_eq!(out, "Incompr...");
        assert_eq!(out.chars().count(), 10);
    }

    #[test]
    fn test_hard_cut_without_word_preservation() {
        let out = truncate_text_intelligently("The quick brown fox", 12, false);
        assert_eq!(out, "The quick...");
    }

    #[test]
    fn test_tiny_budgets() {
        assert_eq!(truncate_text_intelligently("Hello world", 0, true), "");
        assert_eq!(truncate_text_intelligently("Hello world", 2, true), "..");
        assert_eq!(truncate_text_intelligently("Hello world", 3, true), "...");
    }

    #[test]
    fn test_multibyte_text_counts_characters() {
        let text = "Größenänderung während der Präsentation";
        let out = truncate_text_intelligently(text, 20, true);
        assert_eq!(out, "Größenänderung...");
        assert!(out.chars().count() <= 20);
    }

    #[test]
    fn test_retry_budget_is_three_quarters() {
        assert_eq!(retry_budget("abcdefgh", 0.75), 6);
        assert_eq!(retry_budget("", 0.75), 0);
        assert_eq!(retry_budget("abcd", 2.0), 4, "ratio is clamped to 1.0");
    }
}
