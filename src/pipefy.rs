use crate::domain::models::{ApiSection, Card, CardField};
use crate::error::ReportError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CARDS_QUERY: &str = r#"
query ($pipeId: ID!, $first: Int!, $after: String) {
  cards(pipe_id: $pipeId, first: $first, after: $after) {
    edges {
      node {
        id
        title
        fields {
          name
          value
        }
        current_phase {
          name
        }
        created_at
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
"#;

#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("upstream returned errors: {0}")]
    Upstream(String),
    #[error("malformed response envelope: {0}")]
    Malformed(String),
    #[error("replay source: {0}")]
    Replay(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<'a> {
    pub pipe_id: &'a str,
    pub first: u32,
    pub after: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardsPage {
    pub cards: Vec<Card>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One round trip of the upstream cards query.
pub trait PageSource {
    fn fetch_page(&self, request: &PageRequest<'_>) -> Result<CardsPage, IngestError>;
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<CardsData>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct CardsData {
    cards: Option<CardConnection>,
}

#[derive(Deserialize)]
struct CardConnection {
    edges: Vec<CardEdge>,
    #[serde(rename = "pageInfo")]
    page_info: PageInfo,
}

#[derive(Deserialize)]
struct CardEdge {
    node: CardNode,
}

#[derive(Deserialize)]
struct CardNode {
    id: String,
    title: String,
    #[serde(default)]
    fields: Option<Vec<CardField>>,
    current_phase: PhaseRef,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Deserialize)]
struct PhaseRef {
    name: String,
}

#[derive(Deserialize)]
struct PageInfo {
    #[serde(rename = "hasNextPage")]
    has_next_page: bool,
    #[serde(rename = "endCursor")]
    end_cursor: Option<String>,
}

impl From<CardNode> for Card {
    fn from(node: CardNode) -> Self {
        Card {
            id: node.id,
            title: node.title,
            fields: node.fields.unwrap_or_default(),
            current_phase: node.current_phase.name,
            created_at: node.created_at,
        }
    }
}

fn decode_page(resp: GraphQlResponse) -> Result<CardsPage, IngestError> {
    if let Some(errors) = resp.errors.filter(|e| !e.is_empty()) {
        let msgs: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        return Err(IngestError::Upstream(msgs.join("; ")));
    }
    let conn = resp
        .data
        .and_then(|d| d.cards)
        .ok_or_else(|| IngestError::Malformed("missing data.cards".to_string()))?;
    Ok(CardsPage {
        cards: conn.edges.into_iter().map(|e| Card::from(e.node)).collect(),
        has_next_page: conn.page_info.has_next_page,
        end_cursor: conn.page_info.end_cursor,
    })
}

pub fn parse_page(body: &str) -> Result<CardsPage, IngestError> {
    let resp: GraphQlResponse =
        serde_json::from_str(body).map_err(|e| IngestError::Malformed(e.to_string()))?;
    decode_page(resp)
}

/// Drains every page of `pipe_id`, threading each page's cursor into the next request.
pub fn fetch_all<S: PageSource + ?Sized>(
    source: &S,
    pipe_id: &str,
    page_size: u32,
) -> Result<Vec<Card>, IngestError> {
    let mut all_cards = Vec::new();
    let mut cursor: Option<String> = None;
    let mut has_next_page = true;
    let mut pages = 0usize;

    while has_next_page {
        let page = source.fetch_page(&PageRequest {
            pipe_id,
            first: page_size,
            after: cursor.as_deref(),
        })?;
        pages += 1;
        tracing::debug!(
            page = pages,
            records = page.cards.len(),
            has_next_page = page.has_next_page,
            "fetched cards page"
        );
        all_cards.extend(page.cards);
        has_next_page = page.has_next_page;
        cursor = page.end_cursor;
        if has_next_page && cursor.is_none() {
            return Err(IngestError::Malformed(
                "hasNextPage is true but endCursor is missing".to_string(),
            ));
        }
    }

    tracing::info!(pipe_id, pages, cards = all_cards.len(), "fetched all cards");
    Ok(all_cards)
}

pub struct HttpPageSource {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: String,
}

impl HttpPageSource {
    pub fn new(
        endpoint: &str,
        token: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, IngestError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        })
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page(&self, request: &PageRequest<'_>) -> Result<CardsPage, IngestError> {
        let body = serde_json::json!({
            "query": CARDS_QUERY,
            "variables": {
                "pipeId": request.pipe_id,
                "first": request.first,
                "after": request.after,
            }
        });
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(IngestError::Status(status));
        }
        parse_page(&resp.text()?)
    }
}

/// Serves recorded GraphQL responses from a local JSON array, one element per page.
pub struct ReplayPageSource {
    origin: PathBuf,
    pages: Vec<CardsPage>,
}

impl ReplayPageSource {
    pub fn load(path: &Path) -> Result<Self, IngestError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw, path)
    }

    pub fn from_json(raw: &str, origin: &Path) -> Result<Self, IngestError> {
        let bodies: Vec<serde_json::Value> = serde_json::from_str(raw)
            .map_err(|e| IngestError::Replay(format!("{}: {}", origin.display(), e)))?;
        let mut pages = Vec::with_capacity(bodies.len());
        for body in bodies {
            let resp: GraphQlResponse = serde_json::from_value(body)
                .map_err(|e| IngestError::Malformed(e.to_string()))?;
            pages.push(decode_page(resp)?);
        }
        Ok(Self {
            origin: origin.to_path_buf(),
            pages,
        })
    }
}

impl PageSource for ReplayPageSource {
    fn fetch_page(&self, request: &PageRequest<'_>) -> Result<CardsPage, IngestError> {
        let index = match request.after {
            None => 0,
            Some(cursor) => self
                .pages
                .iter()
                .position(|p| p.end_cursor.as_deref() == Some(cursor))
                .map(|i| i + 1)
                .ok_or_else(|| IngestError::Replay(format!("unknown cursor: {}", cursor)))?,
        };
        self.pages.get(index).cloned().ok_or_else(|| {
            IngestError::Replay(format!(
                "{} has no page {} (recorded pages: {})",
                self.origin.display(),
                index,
                self.pages.len()
            ))
        })
    }
}

pub fn is_remote(endpoint: &str) -> bool {
    endpoint.starts_with("http://") || endpoint.starts_with("https://")
}

/// Picks the page source for an endpoint: URLs go over HTTP, anything else is a replay file.
pub fn open_source(
    api: &ApiSection,
    token: Option<&str>,
) -> Result<Box<dyn PageSource>, ReportError> {
    if is_remote(&api.endpoint) {
        let token = token.ok_or_else(|| {
            ReportError::Config(format!(
                "{} must be set to query {}",
                crate::domain::constants::TOKEN_ENV,
                api.endpoint
            ))
        })?;
        let timeout = api.timeout_ms.map(Duration::from_millis);
        return Ok(Box::new(HttpPageSource::new(&api.endpoint, token, timeout)?));
    }
    Ok(Box::new(ReplayPageSource::load(Path::new(&api.endpoint))?))
}
