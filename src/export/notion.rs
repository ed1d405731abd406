//! Notion workspace sync.
//!
//! Creates one page per note in a caller-specified database: summary as the
//! title property, category as a select property, and the source text (capped
//! to the remote body-size limit) as a single paragraph block. One blocking
//! call per record, no batching and no rollback: a failure partway leaves the
//! earlier pages committed.

use crate::config::NotionSettings;
use crate::error::{Result, TavleError};
use crate::notes::NoteRecord;
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, instrument, warn};

const NOTION_PAGES_URL: &str = "https://api.notion.com/v1/pages";

/// A remote workspace that can hold one page per note.
#[async_trait]
pub trait Workspace: Send + Sync {
    async fn create_page(&self, note: &NoteRecord) -> Result<()>;
}

/// Notion API client for a single database.
pub struct NotionClient {
    http: reqwest::Client,
    token: String,
    database_id: String,
    settings: NotionSettings,
}

impl NotionClient {
    pub fn new(token: &str, database_id: &str, settings: NotionSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.to_string(),
            database_id: database_id.to_string(),
            settings,
        }
    }

    fn page_body(&self, note: &NoteRecord) -> serde_json::Value {
        json!({
            "parent": { "database_id": self.database_id },
            "properties": {
                (self.settings.title_property.as_str()): {
                    "title": [{ "text": { "content": note.summary } }]
                },
                (self.settings.category_property.as_str()): {
                    "select": { "name": note.category.to_string() }
                }
            },
            "children": [{
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [{
                        "type": "text",
                        "text": { "content": truncate_chars(&note.source_text, self.settings.body_max_chars) }
                    }]
                }
            }]
        })
    }
}

#[async_trait]
impl Workspace for NotionClient {
    #[instrument(skip(self, note), fields(filename = %note.filename))]
    async fn create_page(&self, note: &NoteRecord) -> Result<()> {
        debug!("Creating Notion page");

        let response = self
            .http
            .post(NOTION_PAGES_URL)
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.settings.api_version)
            .json(&self.page_body(note))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(TavleError::Notion(format!("{}: {}", status, body)))
        }
    }
}

/// Outcome of syncing a batch: success count plus per-record failures.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub succeeded: usize,
    /// (filename, error message) for each record that failed.
    pub failures: Vec<(String, String)>,
}

impl SyncReport {
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failures.len()
    }
}

/// Push notes to the workspace one at a time, in order.
///
/// Failures are recorded per record and the loop continues; already-created
/// pages are never rolled back (at-least-once semantics).
pub async fn sync_notes(workspace: &dyn Workspace, notes: &[NoteRecord]) -> SyncReport {
    let mut report = SyncReport::default();

    for note in notes {
        match workspace.create_page(note).await {
            Ok(()) => report.succeeded += 1,
            Err(e) => {
                warn!("Sync failed for {}: {}", note.filename, e);
                report.failures.push((note.filename.clone(), e.to_string()));
            }
        }
    }

    report
}

/// Truncate to a maximum number of characters, respecting char boundaries.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
