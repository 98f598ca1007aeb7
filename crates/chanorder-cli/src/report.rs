//! Progress lines printed to stdout.

use chanorder_sort::{Event, OrderReport, RefreshOutcome};

pub fn event_line(event: &Event) -> Option<String> {
    match event {
        Event::PassComplete { .. } => None,
        Event::NotYetSorted { attempt, .. } => Some(format!(
            "pass {}: list still not perfect, retrying...",
            attempt
        )),
        Event::Sorted { attempts, channels } => Some(format!(
            "✔ Sorted after {} pass{} (total {} channels).",
            attempts,
            if *attempts > 1 { "es" } else { "" },
            channels
        )),
        Event::Refresh(outcome) => Some(refresh_line(outcome)),
        Event::Exhausted { passes } => Some(format!(
            "Reached MAX_PASSES ({}) but list still not fully ordered; \
             try increasing MAX_PASSES or PAUSE_MS.",
            passes
        )),
    }
}

fn refresh_line(outcome: &RefreshOutcome) -> String {
    match outcome {
        RefreshOutcome::Started { .. } => "↻  Guide refresh started.".to_string(),
        RefreshOutcome::TaskNotFound => {
            "⚠  No task containing 'guide' found in ScheduledTasks".to_string()
        }
        RefreshOutcome::UnexpectedStatus { status, .. } => {
            format!("⚠  Guide refresh returned HTTP {}", status)
        }
    }
}

pub fn check_line(report: &OrderReport) -> String {
    if report.ok {
        return format!("✔ Channel order is ascending ({} channels).", report.channels());
    }
    match report.first_violation() {
        Some(i) => format!(
            "⚠  Channel order breaks at position {}: {} before {}",
            i,
            display_number(&report.numbers[i]),
            display_number(&report.numbers[i + 1])
        ),
        None => "⚠  Channel order is not ascending".to_string(),
    }
}

fn display_number(number: &Option<String>) -> &str {
    number.as_deref().unwrap_or("(none)")
}
