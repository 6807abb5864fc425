//! Placement classification and URL trigger evaluation.

use crate::document::PageDocument;
use crate::models::{DetectionStrategy, Placement};
use crate::normalize::{normalize_loose, normalize_strict};

/// Label used when a matching pixel ID stands in for an unclear placement.
pub const PIXEL_ID_PLACEMENT_LABEL: &str = "Found via Pixel ID search";

/// Where matched code was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Both,
    Head,
    Body,
    Unclear,
}

impl Location {
    pub fn label(self) -> &'static str {
        match self {
            Location::Both => "Found in both <head> and <body> sections",
            Location::Head => "Found in <head> section",
            Location::Body => "Found in <body> section",
            Location::Unclear => "Found in page but placement unclear",
        }
    }

    /// Whether this location satisfies a section expectation.
    ///
    /// Code found in both sections satisfies either expectation. URL trigger
    /// expectations are never satisfied by location alone.
    pub fn satisfies(self, expectation: Placement) -> bool {
        match expectation {
            Placement::Unspecified => true,
            Placement::Head => matches!(self, Location::Head | Location::Both),
            Placement::Body => matches!(self, Location::Body | Location::Both),
            Placement::UrlTrigger => false,
        }
    }
}

/// Classifies where `snippet` lives in the page source.
///
/// A fuzzy-tier hit is classified with loose-normalized sections, since the
/// strict forms are known not to contain it.
pub fn classify(document: &PageDocument, snippet: &str, tier: DetectionStrategy) -> Location {
    let normalize: fn(&str) -> String = if tier == DetectionStrategy::Fuzzy {
        normalize_loose
    } else {
        normalize_strict
    };
    let needle = normalize(snippet);
    if needle.is_empty() {
        return Location::Unclear;
    }

    let in_head = normalize(document.head()).contains(&needle);
    let in_body = normalize(document.body()).contains(&needle);
    match (in_head, in_body) {
        (true, true) => Location::Both,
        (true, false) => Location::Head,
        (false, true) => Location::Body,
        (false, false) => Location::Unclear,
    }
}

/// Result of a "page URL contains" trigger rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvaluation {
    pub rule: String,
    pub matches: bool,
}

impl TriggerEvaluation {
    /// Literal, case-sensitive containment of the trimmed rule in `url`.
    /// An empty rule never matches.
    pub fn evaluate(url: &str, rule: &str) -> Self {
        let rule = rule.trim();
        Self {
            rule: rule.to_string(),
            matches: !rule.is_empty() && url.contains(rule),
        }
    }

    pub fn label(&self) -> String {
        if self.matches {
            format!("URL matches rule: contains \"{}\"", self.rule)
        } else {
            format!("URL does not match rule: contains \"{}\"", self.rule)
        }
    }
}

/// Placement findings for a snippet hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementAssessment {
    pub location: Location,
    pub trigger: Option<TriggerEvaluation>,
    pub label: String,
    pub correct: bool,
}

impl PlacementAssessment {
    /// Combines the location with the expectation. A URL trigger expectation
    /// replaces the location-based verdict entirely.
    pub fn assess(location: Location, expectation: Placement, url: &str, trigger_rule: Option<&str>) -> Self {
        if expectation == Placement::UrlTrigger {
            let trigger = TriggerEvaluation::evaluate(url, trigger_rule.unwrap_or_default());
            return Self {
                location,
                label: trigger.label(),
                correct: trigger.matches,
                trigger: Some(trigger),
            };
        }
        Self {
            location,
            trigger: None,
            label: location.label().to_string(),
            correct: location.satisfies(expectation),
        }
    }

    /// Accepts an unclear location on the strength of a matching pixel ID.
    pub fn rescue_with_pixel_id(&mut self) {
        if self.trigger.is_none() && self.location == Location::Unclear {
            self.label = PIXEL_ID_PLACEMENT_LABEL.to_string();
            self.correct = true;
        }
    }
}
