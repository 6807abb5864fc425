//! Parsed page model.
//!
//! `PageDocument` keeps the HTML exactly as fetched, the source text of its
//! `<head>` and `<body>` sections, and every `<script>` parsed with `scraper`
//! in document order. The parsed tree itself is dropped so the document can
//! cross await points.
//!
//! Sections are cut from the source text rather than re-serialized from the
//! tree: html5ever rewrites markup on output (`async` becomes `async=""`,
//! `&` in attributes becomes `&amp;`), and snippets are compared against what
//! the site actually serves.

use scraper::{ElementRef, Html, Selector};
use std::ops::Range;
use std::sync::LazyLock;

use crate::utils::parse_selector_unsafe;

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("script", "SCRIPT_SELECTOR"));

/// A `<script>` element found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTag {
    /// The `src` attribute, when the script is external
    pub src: Option<String>,
    /// Inner content (empty for most external scripts)
    pub content: String,
    /// Whether the element sits inside `<head>`
    pub in_head: bool,
}

impl ScriptTag {
    pub fn is_inline(&self) -> bool {
        self.src.is_none()
    }
}

/// The fetched HTML of one page plus the views detection queries.
#[derive(Debug, Clone)]
pub struct PageDocument {
    raw: String,
    head: Range<usize>,
    body: Range<usize>,
    scripts: Vec<ScriptTag>,
}

impl PageDocument {
    /// Parses `html`. Parsing is lenient and never fails; a page with neither
    /// a `<head>` nor a `<body>` tag has empty sections.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let (head, body) = source_sections(html);

        let scripts = document
            .select(&SCRIPT_SELECTOR)
            .map(|script| ScriptTag {
                src: script
                    .value()
                    .attr("src")
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
                content: script.inner_html(),
                in_head: is_inside_head(&script),
            })
            .collect();

        Self {
            raw: html.to_string(),
            head,
            body,
            scripts,
        }
    }

    /// The HTML exactly as fetched.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Source text between `<head ...>` and `</head>`.
    pub fn head(&self) -> &str {
        &self.raw[self.head.clone()]
    }

    /// Source text between `<body ...>` and `</body>`.
    pub fn body(&self) -> &str {
        &self.raw[self.body.clone()]
    }

    /// Every script in document order.
    pub fn scripts(&self) -> &[ScriptTag] {
        &self.scripts
    }

    /// Scripts with a `src` attribute, paired with their URL.
    pub fn external_scripts(&self) -> impl Iterator<Item = (&str, &ScriptTag)> {
        self.scripts
            .iter()
            .filter_map(|s| s.src.as_deref().map(|src| (src, s)))
    }

    /// Scripts without a `src` attribute.
    pub fn inline_scripts(&self) -> impl Iterator<Item = &ScriptTag> {
        self.scripts.iter().filter(|s| s.is_inline())
    }
}

/// Byte ranges of the head and body content in the source text.
///
/// An unclosed head ends where the body tag starts. Without a body tag the
/// body is whatever follows `</head>`. Tag names are matched ASCII
/// case-insensitively, so `<header>` never opens the head.
fn source_sections(raw: &str) -> (Range<usize>, Range<usize>) {
    let lower = raw.to_ascii_lowercase();
    let len = lower.len();

    let head = find_open_tag(&lower, "head", 0).map(|(_, content)| {
        let end = lower[content..]
            .find("</head")
            .map(|i| content + i)
            .or_else(|| find_open_tag(&lower, "body", content).map(|(tag, _)| tag))
            .unwrap_or(len);
        content..end
    });

    let body_search_from = head.as_ref().map_or(0, |h| h.end);
    let body_start = match find_open_tag(&lower, "body", body_search_from) {
        Some((_, content)) => Some(content),
        None => head
            .as_ref()
            .and_then(|h| lower[h.end..].find('>').map(|gt| h.end + gt + 1))
            .filter(|_| lower[body_search_from..].starts_with("</head")),
    };
    let body = body_start.map(|start| {
        let end = lower
            .rfind("</body")
            .filter(|&end| end >= start)
            .or_else(|| lower[start..].find("</html").map(|i| start + i))
            .unwrap_or(len);
        start..end
    });

    (head.unwrap_or(0..0), body.unwrap_or(0..0))
}

/// Finds `<name` followed by `>`, `/` or whitespace at or after `from`.
/// Returns the tag start and the offset just past its closing `>`.
fn find_open_tag(lower: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let needle = format!("<{name}");
    let mut offset = from;
    while let Some(i) = lower[offset..].find(&needle) {
        let tag = offset + i;
        let after_name = tag + needle.len();
        match lower[after_name..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace() => {
                return lower[after_name..]
                    .find('>')
                    .map(|gt| (tag, after_name + gt + 1));
            }
            _ => offset = after_name,
        }
    }
    None
}

fn is_inside_head(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().name() == "head")
}
