//! Issue collection and troubleshooting text.

use std::collections::HashSet;

use crate::models::Placement;
use crate::normalize::{decode_basic_entities, is_smart_quote};
use crate::platform::PlatformCatalog;

use super::placement::{Location, PlacementAssessment};

/// Troubleshooting text when nothing needs fixing.
pub const NO_ISSUES_DETECTED: &str = "No specific issues detected";

pub const EVENT_SNIPPET_MISSING: &str = "Event snippet not found on the page";

/// Checks on the user's own (strict-normalized) snippet.
pub fn snippet_issues(
    snippet: &str,
    platform: &str,
    catalog: &PlatformCatalog,
    event_name: Option<&str>,
) -> Vec<String> {
    let mut issues = Vec::new();

    if snippet.contains("\"\"") {
        issues.push(
            "Double quotes detected - should be single quotes or proper escaped quotes".to_string(),
        );
    }
    if snippet.contains("&quot;") {
        issues.push("HTML entities detected - should use proper quotes".to_string());
    }
    if let Some(token) = catalog.required_token {
        if !snippet.contains(token) {
            issues.push(format!("{platform} pixel should contain {token} function"));
        }
    }
    if let Some(event) = event_name {
        if !snippet.to_lowercase().contains(&event.to_lowercase()) {
            issues.push(format!("Event name \"{event}\" not found in pixel snippet"));
        }
    }

    issues
}

/// Checks on the code actually found on the page.
pub fn page_code_issues(code: &str, event_name: Option<&str>) -> Vec<String> {
    let mut issues = Vec::new();

    if code.contains("\"\"") {
        issues.push("Page code contains doubled quotes (\"\") which can break pixels".to_string());
    }
    if code.chars().any(is_smart_quote) {
        issues.push(
            "Smart quotes detected (e.g., \u{201C} \u{201D} \u{2018} \u{2019}) - replace with straight quotes"
                .to_string(),
        );
    }
    if let Some(event) = event_name {
        if !code.to_lowercase().contains(&event.to_lowercase()) {
            issues.push(format!("Event name \"{event}\" not found in detected code"));
        }
    }

    issues
}

/// Whether the event name appears anywhere on the page, case-insensitively,
/// either as served or after basic entity decoding.
pub fn event_name_present(html: &str, event_name: &str) -> bool {
    let lower_event = event_name.to_lowercase();
    let lower_html = html.to_lowercase();
    lower_html.contains(&lower_event) || decode_basic_entities(&lower_html).contains(&lower_event)
}

/// Drops every event-name issue when the event name is present on the page.
pub fn apply_event_name_override(issues: &mut Vec<String>, html: &str, event_name: Option<&str>) {
    if let Some(event) = event_name {
        if event_name_present(html, event) {
            issues.retain(|issue| !issue.to_lowercase().contains("event name"));
        }
    }
}

/// Removes repeated issues, keeping the first occurrence of each.
pub fn dedup_issues(issues: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    issues
        .into_iter()
        .filter(|issue| seen.insert(issue.clone()))
        .collect()
}

/// How to fix a placement that does not meet the expectation.
fn placement_advice(assessment: &PlacementAssessment, expectation: Placement) -> Option<String> {
    if assessment.correct {
        return None;
    }
    if let Some(trigger) = &assessment.trigger {
        return Some(format!(
            "The page URL does not contain \"{}\"; update the trigger rule or test a page where it fires",
            trigger.rule
        ));
    }
    match (expectation, assessment.location) {
        (Placement::Head, Location::Body) => {
            Some("Move the pixel code from the <body> section to the <head> section".to_string())
        }
        (Placement::Body, Location::Head) => {
            Some("Move the pixel code from the <head> section to the <body> section".to_string())
        }
        (Placement::Head, Location::Unclear) => {
            Some("Place the pixel code inside the <head> section".to_string())
        }
        (Placement::Body, Location::Unclear) => {
            Some("Place the pixel code inside the <body> section".to_string())
        }
        _ => None,
    }
}

/// Builds the ordered troubleshooting text: placement correction, the issue
/// list, then the platform's best-practice notes.
pub fn troubleshooting(
    assessment: &PlacementAssessment,
    expectation: Placement,
    issues: &[String],
    catalog: &PlatformCatalog,
) -> String {
    let mut advice: Vec<String> = placement_advice(assessment, expectation).into_iter().collect();

    if !issues.is_empty() {
        advice.push("Fix the following issues:".to_string());
        advice.extend(issues.iter().map(|issue| format!("\u{2022} {issue}")));
    }
    advice.extend(catalog.best_practices.iter().map(|note| note.to_string()));

    if advice.is_empty() {
        NO_ISSUES_DETECTED.to_string()
    } else {
        advice.join("\n")
    }
}
