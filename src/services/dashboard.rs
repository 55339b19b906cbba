use crate::domain::models::{Card, CategoryFilter, CompletionReport, Month, OpenSummary};
use crate::services::aggregate::select_month;
use crate::services::matcher::{matched_values, matches_filter};
use indexmap::IndexMap;

fn zeroed(keys: &[String]) -> IndexMap<String, usize> {
    keys.iter().map(|k| (k.clone(), 0)).collect()
}

/// In-scope cards that have not reached the terminal phase, regardless of creation date.
pub fn open_summary(
    cards: &[Card],
    filter: &CategoryFilter,
    terminal_phase: &str,
    tracked_phases: &[String],
) -> OpenSummary {
    let open: Vec<Card> = cards
        .iter()
        .filter(|c| matches_filter(c, filter) && c.current_phase != terminal_phase)
        .cloned()
        .collect();

    let mut counts_by_category = IndexMap::new();
    let mut phases_count = zeroed(tracked_phases);
    for card in &open {
        for value in matched_values(card, filter) {
            *counts_by_category.entry(value.to_string()).or_insert(0) += 1;
        }
        if let Some(n) = phases_count.get_mut(&card.current_phase) {
            *n += 1;
        }
    }

    OpenSummary {
        total_cards: open.len(),
        counts_by_category,
        phases_count,
        cards: open,
    }
}

/// Per-category totals and concluded counts for cards created in `month`.
pub fn monthly_completion(
    cards: &[Card],
    month: Month,
    filter: &CategoryFilter,
    terminal_phase: &str,
) -> CompletionReport {
    let (selected, skipped) = select_month(cards, month, filter);
    let mut totals = zeroed(&filter.allowed_values);
    let mut completed = zeroed(&filter.allowed_values);
    for card in selected {
        let done = card.current_phase == terminal_phase;
        for value in matched_values(card, filter) {
            *totals.entry(value.to_string()).or_insert(0) += 1;
            if done {
                *completed.entry(value.to_string()).or_insert(0) += 1;
            }
        }
    }
    CompletionReport {
        month,
        totals,
        completed,
        skipped_records: skipped.len(),
    }
}
