//! Result highlighting.
//!
//! Every occurrence of the search term is wrapped in `<b>…</b>`, keeping the
//! original casing of the matched slice. Matching is case-insensitive,
//! left-to-right and non-overlapping. An empty term or text, or a term that
//! never occurs, leaves the text unchanged.

pub const BOLD_OPEN: &str = "<b>";
pub const BOLD_CLOSE: &str = "</b>";

/// Wrap each case-insensitive occurrence of `term` in bold tags.
pub fn highlight(text: &str, term: &str) -> String {
    wrap_matches(text, term, |slice, out| out.push_str(slice))
}

/// Same matching as [`highlight`], but every emitted slice of `text` is
/// HTML-escaped first, so only the bold tags are markup.
pub fn highlight_escaped(text: &str, term: &str) -> String {
    wrap_matches(text, term, push_escaped)
}

fn push_escaped(slice: &str, out: &mut String) {
    for c in slice.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

fn wrap_matches(text: &str, term: &str, emit: impl Fn(&str, &mut String)) -> String {
    let mut out = String::with_capacity(text.len() + BOLD_OPEN.len() + BOLD_CLOSE.len());
    if text.is_empty() || term.is_empty() {
        emit(text, &mut out);
        return out;
    }

    let needle: Vec<char> = term.chars().collect();
    let mut last = 0;
    let mut cursor = 0;
    while let Some((start, end)) = find_from(text, cursor, &needle) {
        emit(&text[last..start], &mut out);
        out.push_str(BOLD_OPEN);
        emit(&text[start..end], &mut out);
        out.push_str(BOLD_CLOSE);
        last = end;
        cursor = end;
    }
    emit(&text[last..], &mut out);
    out
}

/// First case-insensitive match of `needle` at or after byte `from`,
/// returned as a byte range into `text`.
fn find_from(text: &str, from: usize, needle: &[char]) -> Option<(usize, usize)> {
    let rest = &text[from..];
    for (offset, _) in rest.char_indices() {
        let start = from + offset;
        let mut hay = text[start..].char_indices();
        let mut matched = true;
        let mut end = start;
        for &want in needle {
            match hay.next() {
                Some((i, got)) if chars_eq(got, want) => end = start + i + got.len_utf8(),
                _ => {
                    matched = false;
                    break;
                }
            }
        }
        if matched {
            return Some((start, end));
        }
    }
    None
}

fn chars_eq(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_original_case() {
        assert_eq!(highlight("Red Shoes", "red"), "<b>Red</b> Shoes");
        assert_eq!(highlight("Red Shoes", "SHOES"), "Red <b>Shoes</b>");
    }

    #[test]
    fn test_non_overlapping_left_to_right() {
        assert_eq!(highlight("aaa", "aa"), "<b>aa</b>a");
        assert_eq!(highlight("aaaa", "aa"), "<b>aa</b><b>aa</b>");
    }

    #[test]
    fn test_identity_cases() {
        assert_eq!(highlight("", "red"), "");
        assert_eq!(highlight("Red", ""), "Red");
        assert_eq!(highlight("Blue", "red"), "Blue");
    }

    #[test]
    fn test_numeric_price_highlight() {
        assert_eq!(highlight("10000", "100"), "<b>100</b>00");
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(highlight("Crème BRÛLÉE", "brûlée"), "Crème <b>BRÛLÉE</b>");
    }

    #[test]
    fn test_escaped_variant_neutralizes_markup() {
        assert_eq!(
            highlight_escaped("<script>red</script>", "red"),
            "&lt;script&gt;<b>red</b>&lt;/script&gt;"
        );
        assert_eq!(highlight_escaped("Tom & Jerry", ""), "Tom &amp; Jerry");
    }

    #[test]
    fn test_escaped_match_spanning_special_chars() {
        assert_eq!(highlight_escaped("a<b>c", "<b>"), "a<b>&lt;b&gt;</b>c");
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn strip_tags(s: &str) -> String {
        s.replace(BOLD_OPEN, "").replace(BOLD_CLOSE, "")
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_strip_restores_input(text in "[a-zA-Z0-9 ]{0,40}", term in "[a-zA-Z]{1,4}") {
            prop_assert_eq!(strip_tags(&highlight(&text, &term)), text);
        }

        #[test]
        fn prop_length_grows_by_tag_width(text in "[a-cA-C ]{0,40}", term in "[a-c]{1,3}") {
            let out = highlight(&text, &term);
            let occurrences = out.matches(BOLD_OPEN).count();
            prop_assert_eq!(out.len(), text.len() + 7 * occurrences);
        }

        #[test]
        fn prop_empty_term_is_identity(text in ".{0,40}") {
            prop_assert_eq!(highlight(&text, ""), text);
        }

        #[test]
        fn prop_absent_term_is_identity(text in "[a-m ]{0,40}", term in "[n-z]{1,5}") {
            prop_assert_eq!(highlight(&text, &term), text);
        }

        #[test]
        fn prop_escaped_output_has_no_foreign_tags(text in "[a-z<>&\"' ]{0,40}", term in "[a-z]{1,3}") {
            let out = highlight_escaped(&text, &term);
            let stripped = strip_tags(&out);
            prop_assert!(!stripped.contains('<'));
            prop_assert!(!stripped.contains('>'));
        }
    }
}
