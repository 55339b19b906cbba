use crate::domain::constants::{CATEGORY_CHART_COLORS, PHASE_CHART_COLORS};
use crate::domain::models::{ChartSpec, MonthlyAggregate, ReportPayload};
use indexmap::IndexMap;

fn chart(
    title: &str,
    series: &IndexMap<String, usize>,
    colors: &[&str],
    xlabel: &str,
    ylabel: &str,
) -> ChartSpec {
    ChartSpec {
        title: title.to_string(),
        labels: series.keys().cloned().collect(),
        values: series.values().copied().collect(),
        colors: colors.iter().map(|c| c.to_string()).collect(),
        xlabel: xlabel.to_string(),
        ylabel: ylabel.to_string(),
    }
}

/// Category series in configured order, zero-filled, so each category keeps its
/// slot and colour from one month to the next.
fn category_series(
    counts: &IndexMap<String, usize>,
    allowed_values: &[String],
) -> IndexMap<String, usize> {
    allowed_values
        .iter()
        .map(|v| (v.clone(), counts.get(v).copied().unwrap_or(0)))
        .collect()
}

pub fn chart_specs(aggregate: &MonthlyAggregate, allowed_values: &[String]) -> Vec<ChartSpec> {
    vec![
        chart(
            "Distribution by Type",
            &category_series(&aggregate.counts_by_category, allowed_values),
            &CATEGORY_CHART_COLORS,
            "Type",
            "Count",
        ),
        chart(
            "Cards by Phase",
            &aggregate.phase_histogram,
            &PHASE_CHART_COLORS,
            "Phase",
            "Count",
        ),
    ]
}

pub fn assemble(
    aggregate: &MonthlyAggregate,
    allowed_values: &[String],
) -> (ReportPayload, Vec<ChartSpec>) {
    let payload = ReportPayload {
        total_cards: aggregate.total_cards,
        counts_by_category: aggregate.counts_by_category.clone(),
        phases_count: aggregate.phase_histogram.clone(),
        concluded_titles: aggregate.concluded_titles.clone(),
        cards: aggregate.cards.clone(),
    };
    (payload, chart_specs(aggregate, allowed_values))
}
