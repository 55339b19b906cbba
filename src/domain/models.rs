use crate::error::ReportError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// One name/value attribute of a card. Upstream sends `null` for unset
/// values; those never match a filter.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CardField {
    pub name: String,
    pub value: Option<String>,
}

/// Snapshot of a single card as fetched from the pipe.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub fields: Vec<CardField>,
    pub current_phase: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    pub field: String,
    pub allowed_values: Vec<String>,
}

/// Calendar month selector, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = ReportError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ReportError::InvalidMonth(raw.to_string());
        let (year, month) = raw.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4
            || month.len() != 2
            || !year.bytes().all(|b| b.is_ascii_digit())
            || !month.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Month::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for Month {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RecordSkip {
    pub card_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyAggregate {
    pub total_cards: usize,
    pub counts_by_category: IndexMap<String, usize>,
    pub phase_histogram: IndexMap<String, usize>,
    pub concluded_titles: Vec<String>,
    pub cards: Vec<Card>,
    pub skipped: Vec<RecordSkip>,
}

/// Externally visible shape of a [`MonthlyAggregate`].
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ReportPayload {
    pub total_cards: usize,
    pub counts_by_category: IndexMap<String, usize>,
    pub phases_count: IndexMap<String, usize>,
    pub concluded_titles: Vec<String>,
    pub cards: Vec<Card>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    pub colors: Vec<String>,
    pub xlabel: String,
    pub ylabel: String,
}

#[derive(Serialize)]
pub struct MonthlyReport {
    pub month: Month,
    #[serde(flatten)]
    pub payload: ReportPayload,
    pub chart_specs: Vec<ChartSpec>,
    pub skipped_records: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct OpenSummary {
    pub total_cards: usize,
    pub counts_by_category: IndexMap<String, usize>,
    pub phases_count: IndexMap<String, usize>,
    pub cards: Vec<Card>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub month: Month,
    pub totals: IndexMap<String, usize>,
    pub completed: IndexMap<String, usize>,
    pub skipped_records: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub report: ReportSection,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiSection {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page_size: default_page_size(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportSection {
    #[serde(default = "default_pipe_id")]
    pub pipe_id: String,
    #[serde(default = "default_category_field")]
    pub category_field: String,
    #[serde(default = "default_allowed_values")]
    pub allowed_values: Vec<String>,
    #[serde(default = "default_terminal_phase")]
    pub terminal_phase: String,
    #[serde(default = "default_tracked_phases")]
    pub tracked_phases: Vec<String>,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            pipe_id: default_pipe_id(),
            category_field: default_category_field(),
            allowed_values: default_allowed_values(),
            terminal_phase: default_terminal_phase(),
            tracked_phases: default_tracked_phases(),
        }
    }
}

impl ReportSection {
    pub fn category_filter(&self) -> CategoryFilter {
        CategoryFilter {
            field: self.category_field.clone(),
            allowed_values: self.allowed_values.clone(),
        }
    }
}

/// Resolved settings after file, environment and flag overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSection,
    pub report: ReportSection,
    pub token: Option<String>,
}

#[derive(Serialize)]
pub struct SettingsView {
    pub api: ApiSection,
    pub report: ReportSection,
    pub token: &'static str,
}

fn default_endpoint() -> String {
    crate::domain::constants::DEFAULT_ENDPOINT.to_string()
}

fn default_page_size() -> u32 {
    crate::domain::constants::DEFAULT_PAGE_SIZE
}

fn default_pipe_id() -> String {
    crate::domain::constants::DEFAULT_PIPE_ID.to_string()
}

fn default_category_field() -> String {
    crate::domain::constants::DEFAULT_CATEGORY_FIELD.to_string()
}

fn default_allowed_values() -> Vec<String> {
    crate::domain::constants::DEFAULT_ALLOWED_VALUES
        .iter()
        .map(|v| v.to_string())
        .collect()
}

fn default_terminal_phase() -> String {
    crate::domain::constants::DEFAULT_TERMINAL_PHASE.to_string()
}

fn default_tracked_phases() -> Vec<String> {
    crate::domain::constants::DEFAULT_TRACKED_PHASES
        .iter()
        .map(|v| v.to_string())
        .collect()
}
