//! External loader and inline call-token detection.

use crate::config::INLINE_PREVIEW_CHARS;
use crate::document::PageDocument;
use crate::platform::PlatformCatalog;
use crate::utils::preview;

use super::placement::Location;

/// Placement label for a pixel recognized only by an inline call token.
pub const INLINE_SCRIPT_LABEL: &str = "Found in inline script";

/// Evidence that the platform's script is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalHit {
    /// A `<script src>` URL matched a loader pattern.
    Loader { url: String, location: Location },
    /// An inline script contains the platform's call token.
    InlineCall { preview: String },
}

impl ExternalHit {
    pub fn placement_label(&self) -> &'static str {
        match self {
            ExternalHit::Loader { location, .. } => location.label(),
            ExternalHit::InlineCall { .. } => INLINE_SCRIPT_LABEL,
        }
    }

    pub fn context(&self) -> String {
        match self {
            ExternalHit::Loader { url, .. } => format!("External script detected: {url}"),
            ExternalHit::InlineCall { preview } => format!("{preview}..."),
        }
    }
}

/// Loader URLs first (document order, first hit wins), then inline call tokens.
pub fn detect_external(document: &PageDocument, catalog: &PlatformCatalog) -> Option<ExternalHit> {
    let loader = document.external_scripts().find_map(|(url, script)| {
        catalog
            .external_script_patterns
            .iter()
            .any(|pattern| pattern.is_match(url))
            .then(|| {
                let in_head = script.in_head || document.head().contains(url);
                ExternalHit::Loader {
                    url: url.to_string(),
                    location: if in_head { Location::Head } else { Location::Body },
                }
            })
    });
    if loader.is_some() {
        return loader;
    }

    let token = catalog.inline_call_token?;
    document
        .inline_scripts()
        .find(|script| script.content.contains(token))
        .map(|script| ExternalHit::InlineCall {
            preview: preview(&script.content, INLINE_PREVIEW_CHARS).to_string(),
        })
}
