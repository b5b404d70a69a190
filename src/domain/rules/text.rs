/// Flattens line breaks, strips the ends and shortens to at most `limit`
/// characters without cutting through a word.
///
/// A missing value trims to the empty string. When no word boundary exists
/// inside the limit the result is empty rather than a partial word.
pub fn trim_text(text: Option<&str>, limit: usize) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let flattened = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
    let cleaned = flattened.trim();

    let chars: Vec<char> = cleaned.chars().collect();
    if chars.len() <= limit {
        return cleaned.to_string();
    }

    let cut = (0..=limit)
        .rev()
        .find(|&k| is_word_boundary(&chars, k))
        .unwrap_or(0);

    chars[..cut].iter().collect::<String>().trim_end().to_string()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_boundary(chars: &[char], k: usize) -> bool {
    let before = k > 0 && is_word_char(chars[k - 1]);
    let after = k < chars.len() && is_word_char(chars[k]);
    before != after
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_text_is_empty() {
        assert_eq!(trim_text(None, 100), "");
    }

    #[test]
    fn test_short_text_is_only_cleaned() {
        assert_eq!(trim_text(Some("  Meet at gate  "), 100), "Meet at gate");
        assert_eq!(trim_text(Some("Line one\nLine two"), 100), "Line one Line two");
        assert_eq!(trim_text(Some("a\r\nb"), 100), "a b");
    }

    #[test]
    fn test_newline_is_replaced_before_measuring() {
        // 5 + 1 + 5 chars once the newline becomes a space.
        assert_eq!(trim_text(Some("hello\nworld"), 11), "hello world");
        assert_eq!(trim_text(Some("hello\nworld"), 10), "hello");
    }

    #[test]
    fn test_long_text_cuts_on_word_boundary() {
        let text = "word ".repeat(24);
        assert_eq!(text.len(), 120);

        let trimmed = trim_text(Some(&text), 100);
        assert!(trimmed.chars().count() <= 100);
        assert_eq!(trimmed, "word ".repeat(20).trim_end());
    }

    #[test]
    fn test_never_splits_a_word() {
        let text = "Please call the passenger on arrival, driver should hold a sign with \
                    the company logo and wait at the international arrivals exit";
        let trimmed = trim_text(Some(text), 50);
        assert!(trimmed.chars().count() <= 50);
        assert!(text.starts_with(&trimmed));
        let next = text[trimmed.len()..].chars().next();
        assert!(next.map_or(true, |c| !is_word_char(c)));
        assert_eq!(trimmed, "Please call the passenger on arrival, driver");
    }

    #[test]
    fn test_punctuation_before_cut_is_kept() {
        assert_eq!(trim_text(Some("hello, world"), 7), "hello,");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "Ærø Ærø Ærø";
        assert_eq!(trim_text(Some(text), 7), "Ærø Ærø");
    }

    #[test]
    fn test_single_overlong_word_trims_to_empty() {
        assert_eq!(trim_text(Some("Supercalifragilistic"), 5), "");
    }
}
