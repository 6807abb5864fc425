//! Terminal rendering of a verdict.

use colored::*;

use crate::models::{Verdict, VerdictStatus};

/// Process exit code for a verdict: 0 pass, 1 fail, 2 error.
pub fn exit_code(verdict: &Verdict) -> i32 {
    match verdict.status {
        VerdictStatus::Pass => 0,
        VerdictStatus::Fail => 1,
        VerdictStatus::Error => 2,
    }
}

/// Renders a verdict for a terminal. Optional sections are omitted when absent.
pub fn render_verdict(verdict: &Verdict) -> String {
    let badge = match verdict.status {
        VerdictStatus::Pass => " PASS ".black().on_green(),
        VerdictStatus::Fail => " FAIL ".white().on_red(),
        VerdictStatus::Error => " ERROR ".white().on_magenta(),
    };

    let mut lines = vec![
        format!("{} {}", badge.bold(), verdict.summary.bold()),
        format!("{} {}", "Placement:".cyan(), verdict.detected_placement),
    ];
    let mut detection = format!("{} {}", "Method:".cyan(), verdict.method);
    if let Some(strategy) = verdict.strategy {
        detection.push_str(&format!(" ({strategy})"));
    }
    lines.push(detection);

    if let Some(code) = &verdict.matched_code {
        lines.push(format!("{}\n  {}", "Matched code:".cyan(), code.dimmed()));
    }

    if let Some(outcome) = &verdict.pixel_id_outcome {
        let line = match (outcome.found, outcome.is_match) {
            (true, true) => format!("{} found", outcome.expected_id).green(),
            (true, false) => format!(
                "expected {}, found {}",
                outcome.expected_id,
                outcome.found_id.as_deref().unwrap_or_default()
            )
            .red(),
            (false, _) => format!("{} not found", outcome.expected_id).yellow(),
        };
        lines.push(format!("{} {}", "Pixel ID:".cyan(), line));
    }

    if let Some(outcome) = &verdict.event_snippet_outcome {
        let line = if outcome.found {
            "found".green()
        } else {
            "not found".red()
        };
        lines.push(format!("{} {}", "Event snippet:".cyan(), line));
    }

    if !verdict.issues.is_empty() {
        lines.push(format!("{}", "Issues:".yellow().bold()));
        lines.extend(verdict.issues.iter().map(|issue| format!("  - {issue}")));
    }

    lines.push(format!("{}", "Troubleshooting:".cyan()));
    lines.extend(verdict.troubleshooting.lines().map(|line| format!("  {line}")));

    lines.join("\n")
}
