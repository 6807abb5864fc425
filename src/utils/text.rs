//! Text windows that never split a UTF-8 character.

/// Returns the slice of `text` spanning `before` chars ahead of byte offset
/// `start` through `after` chars past byte offset `end`, clamped to the text.
///
/// `start` and `end` must lie on char boundaries (regex match offsets do).
/// Out-of-range or inverted offsets are clamped rather than panicking.
pub fn context_window(text: &str, start: usize, end: usize, before: usize, after: usize) -> &str {
    let end = floor_boundary(text, end.min(text.len()));
    let start = floor_boundary(text, start.min(end));

    let from = if before == 0 {
        start
    } else {
        text[..start]
            .char_indices()
            .rev()
            .take(before)
            .last()
            .map_or(start, |(i, _)| i)
    };
    let to = text[end..]
        .char_indices()
        .nth(after)
        .map_or(text.len(), |(i, _)| end + i);

    &text[from..to]
}

/// The first `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}

fn floor_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_window_clamps_at_both_ends() {
        let text = "abcdefghij";
        assert_eq!(context_window(text, 4, 5, 2, 2), "cdefg");
        assert_eq!(context_window(text, 1, 2, 100, 100), text);
        assert_eq!(context_window(text, 0, 0, 0, 3), "abc");
    }

    #[test]
    fn test_window_counts_chars_not_bytes() {
        let text = "ééé fbq ééé";
        let start = text.find("fbq").unwrap();
        assert_eq!(context_window(text, start, start + 3, 2, 2), "é fbq é");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("hello", 3), "hel");
        assert_eq!(preview("hé", 5), "hé");
        assert_eq!(preview("日本語", 2), "日本");
    }

    proptest! {
        #[test]
        fn test_window_never_panics(
            text in "\\PC{0,80}",
            start in 0usize..200,
            len in 0usize..50,
            before in 0usize..50,
            after in 0usize..50,
        ) {
            let _ = context_window(&text, start, start + len, before, after);
        }
    }
}
