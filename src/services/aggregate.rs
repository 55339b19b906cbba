use crate::domain::models::{Card, CategoryFilter, Month, MonthlyAggregate, RecordSkip};
use crate::services::matcher::{matched_values, matches_filter};
use chrono::{DateTime, Datelike};

/// Calendar month of an ISO-8601 timestamp, read in the timestamp's own offset.
pub fn month_of(timestamp: &str) -> Result<Month, chrono::ParseError> {
    let dt = DateTime::parse_from_rfc3339(timestamp)
        .or_else(|_| DateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%z"))?;
    Ok(Month {
        year: dt.year(),
        month: dt.month(),
    })
}

pub enum MonthCheck {
    Undated,
    Unparsable(RecordSkip),
    In(Month),
}

pub fn check_month(card: &Card) -> MonthCheck {
    let Some(created_at) = card.created_at.as_deref().filter(|s| !s.is_empty()) else {
        return MonthCheck::Undated;
    };
    match month_of(created_at) {
        Ok(m) => MonthCheck::In(m),
        Err(e) => {
            tracing::warn!(card_id = %card.id, created_at, error = %e, "skipping card with unparsable created_at");
            MonthCheck::Unparsable(RecordSkip {
                card_id: card.id.clone(),
                reason: format!("unparsable created_at {:?}: {}", created_at, e),
            })
        }
    }
}

/// Cards created in `month` that pass `filter`, in fetch order, plus skip diagnostics.
pub fn select_month<'a>(
    cards: &'a [Card],
    month: Month,
    filter: &CategoryFilter,
) -> (Vec<&'a Card>, Vec<RecordSkip>) {
    let mut selected = Vec::new();
    let mut skipped = Vec::new();
    for card in cards {
        match check_month(card) {
            MonthCheck::Undated => continue,
            MonthCheck::Unparsable(skip) => skipped.push(skip),
            MonthCheck::In(m) if m == month && matches_filter(card, filter) => selected.push(card),
            MonthCheck::In(_) => {}
        }
    }
    (selected, skipped)
}

pub fn aggregate(
    cards: &[Card],
    month: Month,
    filter: &CategoryFilter,
    terminal_phase: &str,
) -> MonthlyAggregate {
    let (selected, skipped) = select_month(cards, month, filter);
    let mut out = MonthlyAggregate {
        skipped,
        ..MonthlyAggregate::default()
    };

    for card in selected {
        *out
            .phase_histogram
            .entry(card.current_phase.clone())
            .or_insert(0) += 1;
        for value in matched_values(card, filter) {
            *out.counts_by_category.entry(value.to_string()).or_insert(0) += 1;
        }
        if card.current_phase == terminal_phase {
            out.concluded_titles.push(card.title.clone());
        }
        out.cards.push(card.clone());
    }
    out.total_cards = out.cards.len();

    tracing::info!(
        %month,
        total_cards = out.total_cards,
        skipped = out.skipped.len(),
        "aggregated month"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CardField;

    fn card(id: &str, created_at: Option<&str>, cats: &[&str], phase: &str) -> Card {
        Card {
            id: id.to_string(),
            title: format!("title {}", id),
            fields: cats
                .iter()
                .map(|v| CardField {
                    name: "Cat".to_string(),
                    value: Some(v.to_string()),
                })
                .collect(),
            current_phase: phase.to_string(),
            created_at: created_at.map(str::to_string),
        }
    }

    fn filter(values: &[&str]) -> CategoryFilter {
        CategoryFilter {
            field: "Cat".to_string(),
            allowed_values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn march() -> Month {
        "2024-03".parse().expect("month")
    }

    #[test]
    fn worked_example_counts_only_the_target_month() {
        let cards = vec![
            card("1", Some("2024-03-05T10:00:00-03:00"), &["A"], "Done"),
            card("2", Some("2024-04-01T00:00:00-03:00"), &["A"], "Done"),
        ];
        let agg = aggregate(&cards, march(), &filter(&["A"]), "Done");
        assert_eq!(agg.total_cards, 1);
        assert_eq!(agg.counts_by_category.get("A"), Some(&1));
        assert_eq!(agg.counts_by_category.len(), 1);
        assert_eq!(agg.phase_histogram.get("Done"), Some(&1));
        assert_eq!(agg.concluded_titles, vec!["title 1".to_string()]);
        assert_eq!(agg.cards[0].id, "1");
    }

    #[test]
    fn month_is_read_in_the_timestamp_offset() {
        assert_eq!(month_of("2024-03-31T23:30:00-03:00").unwrap(), march());
        assert_eq!(month_of("2024-04-01T01:00:00+03:00").unwrap().month, 4);
        assert_eq!(month_of("2024-03-01T00:00:00Z").unwrap(), march());
        assert!(month_of("2024-03-01 garbage").is_err());
        assert_eq!(month_of("2024-03-01T00:00:00-0300").unwrap(), march());
    }

    #[test]
    fn unparsable_timestamp_is_skipped_not_fatal() {
        let cards = vec![
            card("bad", Some("05/03/2024"), &["A"], "Done"),
            card("ok", Some("2024-03-06T09:00:00-03:00"), &["A"], "Triagem"),
            card("undated", None, &["A"], "Done"),
            card("blank", Some(""), &["A"], "Done"),
        ];
        let agg = aggregate(&cards, march(), &filter(&["A"]), "Done");
        assert_eq!(agg.total_cards, 1);
        assert_eq!(agg.cards[0].id, "ok");
        assert_eq!(agg.skipped.len(), 1);
        assert_eq!(agg.skipped[0].card_id, "bad");
        assert!(agg.concluded_titles.is_empty());
    }

    #[test]
    fn card_with_two_categories_fans_out() {
        let cards = vec![
            card("1", Some("2024-03-05T10:00:00-03:00"), &["A", "B"], "Triagem"),
            card("2", Some("2024-03-07T10:00:00-03:00"), &["B"], "Triagem"),
        ];
        let agg = aggregate(&cards, march(), &filter(&["A", "B"]), "Done");
        assert_eq!(agg.total_cards, 2);
        assert_eq!(agg.counts_by_category.get("A"), Some(&1));
        assert_eq!(agg.counts_by_category.get("B"), Some(&2));
        assert_eq!(agg.phase_histogram.get("Triagem"), Some(&2));
    }

    #[test]
    fn category_filter_excludes_other_values() {
        let cards = vec![
            card("1", Some("2024-03-05T10:00:00-03:00"), &["Z"], "Done"),
            card("2", Some("2024-03-05T10:00:00-03:00"), &[], "Done"),
        ];
        let agg = aggregate(&cards, march(), &filter(&["A"]), "Done");
        assert_eq!(agg.total_cards, 0);
    }

    #[test]
    fn empty_month_is_a_valid_empty_aggregate() {
        let cards = vec![card("1", Some("2023-03-05T10:00:00-03:00"), &["A"], "Done")];
        let agg = aggregate(&cards, march(), &filter(&["A"]), "Done");
        assert_eq!(agg, MonthlyAggregate::default());
        assert_eq!(aggregate(&[], march(), &filter(&["A"]), "Done").total_cards, 0);
    }

    #[test]
    fn aggregate_is_idempotent_and_order_preserving() {
        let cards = vec![
            card("3", Some("2024-03-09T10:00:00-03:00"), &["B"], "Done"),
            card("1", Some("2024-03-01T10:00:00-03:00"), &["A"], "Pendente"),
            card("2", Some("2024-03-02T10:00:00-03:00"), &["A"], "Done"),
        ];
        let f = filter(&["A", "B"]);
        let first = aggregate(&cards, march(), &f, "Done");
        let second = aggregate(&cards, march(), &f, "Done");
        assert_eq!(first, second);
        assert_eq!(first.concluded_titles, ["title 3", "title 2"]);
        let keys: Vec<&String> = first.phase_histogram.keys().collect();
        assert_eq!(keys, ["Done", "Pendente"]);
        let keys: Vec<&String> = first.counts_by_category.keys().collect();
        assert_eq!(keys, ["B", "A"]);
    }
}
