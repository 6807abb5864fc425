//! Text normalization for snippet comparison.
//!
//! Two canonical forms are used:
//! - strict: whitespace collapsed, curly quotes straightened. Tolerates
//!   reformatting but not content changes.
//! - loose: lowercased with whitespace, comments and quotes erased. Tolerates
//!   minifiers at the cost of precision; a hit on this form is always reported
//!   as a fuzzy match.
//!
//! Every function here is pure and total.

use regex::Regex;
use std::sync::LazyLock;

use crate::utils::compile_regex_unsafe;

static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?s)<!--.*?-->", "HTML_COMMENT"));
static REPEATED_SEMICOLONS: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r";{2,}", "REPEATED_SEMICOLONS"));

/// Maps a typographic quote to its straight equivalent; other chars pass through.
fn straighten_quote(c: char) -> char {
    match c {
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => '"',
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => '\'',
        other => other,
    }
}

/// Whether `c` is one of the typographic quotes straightened by `canonicalize_quotes`.
pub fn is_smart_quote(c: char) -> bool {
    straighten_quote(c) != c
}

/// Collapses every whitespace run to a single space and trims both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replaces curly quotes with straight quotes.
///
/// The mapping is char-for-char, so a char index into the input is also a
/// char index into the output.
pub fn canonicalize_quotes(s: &str) -> String {
    s.chars().map(straighten_quote).collect()
}

/// Strict canonical form: `canonicalize_quotes(collapse_whitespace(s))`.
pub fn normalize_strict(s: &str) -> String {
    canonicalize_quotes(&collapse_whitespace(s))
}

/// Loose canonical form used for minification-tolerant matching.
pub fn normalize_loose(s: &str) -> String {
    let lowered = s.to_lowercase();
    let without_comments = HTML_COMMENT.replace_all(&lowered, "");
    let compact: String = without_comments
        .chars()
        .filter(|c| !c.is_whitespace())
        .filter(|c| !matches!(c, '"' | '\'' | '`') && !is_smart_quote(*c))
        .collect();
    // Whitespace is already gone, so `) {` and `} )` have become `){` and `})`.
    REPEATED_SEMICOLONS.replace_all(&compact, ";").into_owned()
}

/// Decodes the handful of entities that commonly wrap pixel code.
pub fn decode_basic_entities(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strict_collapses_whitespace_and_quotes() {
        let input = "  fbq(\u{2018}init\u{2019},\n\t\u{201C}123\u{201D});  ";
        assert_eq!(normalize_strict(input), "fbq('init', \"123\");");
    }

    #[test]
    fn test_loose_erases_formatting() {
        let formatted = "<!-- pixel -->\nfbq('init', '123');;\nif (x) {\n  go();\n}\n";
        assert_eq!(normalize_loose(formatted), "fbq(init,123);if(x){go();}");
    }

    #[test]
    fn test_loose_strips_multiline_comments() {
        assert_eq!(normalize_loose("a<!--\nhidden\n-->b"), "ab");
    }

    #[test]
    fn test_loose_matches_minified_variant() {
        let pretty = "ttq.load( 'ABC' );\nttq.page();";
        let minified = "ttq.load(\"ABC\");ttq.page();";
        assert_eq!(normalize_loose(pretty), normalize_loose(minified));
        assert_ne!(normalize_strict(pretty), normalize_strict(minified));
    }

    #[test]
    fn test_decode_basic_entities() {
        assert_eq!(
            decode_basic_entities("fbq(&quot;track&quot;, &#39;Lead&#39;) &lt;b&gt; &amp;"),
            "fbq(\"track\", 'Lead') <b> &"
        );
    }

    #[test]
    fn test_smart_quote_detection() {
        assert!(is_smart_quote('\u{201C}'));
        assert!(is_smart_quote('\u{2019}'));
        assert!(!is_smart_quote('"'));
        assert!(!is_smart_quote('a'));
    }

    proptest! {
        #[test]
        fn test_strict_is_idempotent(s in "\\PC{0,200}") {
            let once = normalize_strict(&s);
            prop_assert_eq!(normalize_strict(&once), once.clone());
        }

        #[test]
        fn test_loose_is_idempotent(s in "[a-z;(){} '\"\\n]{0,200}") {
            let once = normalize_loose(&s);
            prop_assert_eq!(normalize_loose(&once), once.clone());
        }

        #[test]
        fn test_quote_canonicalization_preserves_char_count(s in "\\PC{0,200}") {
            prop_assert_eq!(canonicalize_quotes(&s).chars().count(), s.chars().count());
        }

        #[test]
        fn test_loose_has_no_whitespace_or_quotes(s in "\\PC{0,200}") {
            let loose = normalize_loose(&s);
            prop_assert!(!loose.chars().any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '`')));
        }
    }
}
