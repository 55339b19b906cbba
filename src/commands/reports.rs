use crate::commands::ingest::fetch_cards;
use crate::*;

fn join_counts(counts: &indexmap::IndexMap<String, usize>) -> String {
    counts
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn build_monthly_report(cards: &[Card], month: Month, settings: &Settings) -> MonthlyReport {
    let filter = settings.report.category_filter();
    let agg = aggregate(cards, month, &filter, &settings.report.terminal_phase);
    let (payload, chart_specs) = assemble(&agg, &filter.allowed_values);
    MonthlyReport {
        month,
        payload,
        chart_specs,
        skipped_records: agg.skipped.len(),
    }
}

pub fn handle_report_commands(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Monthly { month } => {
            let month: Month = month.parse()?;
            let settings = load_settings(cli.config.as_deref(), cli.pipe.as_deref())?;
            let cards = fetch_cards(&settings)?;
            let report = build_monthly_report(&cards, month, &settings);
            print_one(cli.json, report, |r| {
                let mut lines = vec![
                    format!("month: {}", r.month),
                    format!("total_cards: {}", r.payload.total_cards),
                    format!("by category: {}", join_counts(&r.payload.counts_by_category)),
                    format!("by phase: {}", join_counts(&r.payload.phases_count)),
                ];
                if !r.payload.concluded_titles.is_empty() {
                    lines.push("concluded:".to_string());
                    lines.extend(r.payload.concluded_titles.iter().map(|t| format!("- {}", t)));
                }
                if r.skipped_records > 0 {
                    lines.push(format!("skipped_records: {}", r.skipped_records));
                }
                lines.join("\n")
            })?;
        }
        Commands::Completion { month } => {
            let month: Month = month.parse()?;
            let settings = load_settings(cli.config.as_deref(), cli.pipe.as_deref())?;
            let cards = fetch_cards(&settings)?;
            let report = monthly_completion(
                &cards,
                month,
                &settings.report.category_filter(),
                &settings.report.terminal_phase,
            );
            print_one(cli.json, report, |r| {
                let mut lines: Vec<String> = r
                    .totals
                    .iter()
                    .map(|(k, total)| {
                        let done = r.completed.get(k).copied().unwrap_or(0);
                        format!("{}\t{}\t{}/{}", r.month, k, done, total)
                    })
                    .collect();
                if r.skipped_records > 0 {
                    lines.push(format!("skipped_records: {}", r.skipped_records));
                }
                lines.join("\n")
            })?;
        }
        Commands::Open => {
            let settings = load_settings(cli.config.as_deref(), cli.pipe.as_deref())?;
            let cards = fetch_cards(&settings)?;
            let summary = open_summary(
                &cards,
                &settings.report.category_filter(),
                &settings.report.terminal_phase,
                &settings.report.tracked_phases,
            );
            print_one(cli.json, summary, |s| {
                format!(
                    "open: {}\nby category: {}\nby phase: {}",
                    s.total_cards,
                    join_counts(&s.counts_by_category),
                    join_counts(&s.phases_count)
                )
            })?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}
