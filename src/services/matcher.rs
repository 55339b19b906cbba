use crate::domain::models::{Card, CategoryFilter};

/// True when some field of `card` is named `name` and carries one of `allowed_values`.
pub fn matches(card: &Card, name: &str, allowed_values: &[String]) -> bool {
    card.fields.iter().any(|f| {
        f.name == name
            && f.value
                .as_deref()
                .map(|v| allowed_values.iter().any(|a| a == v))
                .unwrap_or(false)
    })
}

pub fn matches_filter(card: &Card, filter: &CategoryFilter) -> bool {
    matches(card, &filter.field, &filter.allowed_values)
}

/// Allowed values carried by the card's matching fields, each once, in field order.
pub fn matched_values<'a>(card: &Card, filter: &'a CategoryFilter) -> Vec<&'a str> {
    let mut out: Vec<&'a str> = Vec::new();
    for f in card.fields.iter().filter(|f| f.name == filter.field) {
        let Some(value) = f.value.as_deref() else {
            continue;
        };
        if let Some(allowed) = filter.allowed_values.iter().find(|a| *a == value) {
            if !out.contains(&allowed.as_str()) {
                out.push(allowed);
            }
        }
    }
    out
}

/// Keeps cards satisfying every `(name, value)` pair.
pub fn filter_cards(cards: &[Card], filters: &[(String, String)]) -> Vec<Card> {
    cards
        .iter()
        .filter(|card| {
            filters.iter().all(|(name, value)| {
                card.fields
                    .iter()
                    .any(|f| f.name == *name && f.value.as_deref() == Some(value.as_str()))
            })
        })
        .cloned()
        .collect()
}
