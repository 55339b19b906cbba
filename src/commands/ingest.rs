use crate::*;

pub fn parse_filter(raw: &str) -> Result<(String, String), ReportError> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.to_string(), value.to_string()))
        }
        _ => Err(ReportError::InvalidFilter(raw.to_string())),
    }
}

pub fn fetch_cards(settings: &Settings) -> anyhow::Result<Vec<Card>> {
    let source = pipefy::open_source(&settings.api, settings.token.as_deref())?;
    let cards = pipefy::fetch_all(
        source.as_ref(),
        &settings.report.pipe_id,
        settings.api.page_size,
    )
    .map_err(ReportError::from)?;
    Ok(cards)
}

pub fn handle_ingest_commands(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Cards { filters } => {
            let filters = filters
                .iter()
                .map(|f| parse_filter(f))
                .collect::<Result<Vec<_>, _>>()?;
            let settings = load_settings(cli.config.as_deref(), cli.pipe.as_deref())?;
            let cards = fetch_cards(&settings)?;
            let cards = if filters.is_empty() {
                cards
            } else {
                filter_cards(&cards, &filters)
            };
            print_out(cli.json, &cards, |c| {
                format!("{}\t{}\t{}", c.id, c.current_phase, c.title)
            })?;
        }
        Commands::Config => {
            let settings = load_settings(cli.config.as_deref(), cli.pipe.as_deref())?;
            print_one(cli.json, redacted(&settings), |s| {
                format!(
                    "endpoint: {}\npage_size: {}\npipe_id: {}\ncategory_field: {}\nallowed_values: {}\nterminal_phase: {}\ntoken: {}",
                    s.api.endpoint,
                    s.api.page_size,
                    s.report.pipe_id,
                    s.report.category_field,
                    s.report.allowed_values.join(", "),
                    s.report.terminal_phase,
                    s.token
                )
            })?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}
