use crate::pipefy::IngestError;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("ingestion failed: {0}")]
    Ingestion(#[from] IngestError),
    #[error("invalid month selector (expected YYYY-MM): {0}")]
    InvalidMonth(String),
    #[error("invalid filter (expected NAME=VALUE): {0}")]
    InvalidFilter(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ReportError {
    pub fn code(&self) -> &'static str {
        match self {
            ReportError::Ingestion(_) => "INGESTION_FAILED",
            ReportError::InvalidMonth(_) | ReportError::InvalidFilter(_) => "INVALID_INPUT",
            ReportError::Config(_) => "CONFIG_ERROR",
        }
    }
}

/// Maps any command failure onto a stable machine-readable code.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<ReportError>() {
        return e.code();
    }
    if err.downcast_ref::<IngestError>().is_some() {
        return "INGESTION_FAILED";
    }
    "INTERNAL"
}
