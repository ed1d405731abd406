//! Process command implementation.
//!
//! Runs the whole batch: extract -> classify for every file, then prints the
//! board and runs whichever exports were requested.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::TavleError;
use crate::export::{render_markdown, sync_notes, DropboxClient, NotionClient};
use crate::extract::{MediaKind, UploadedFile};
use crate::notes::{CategoryFilter, NoteRecord, NoteStore};
use crate::pipeline::Pipeline;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

/// Options for the process command beyond the input files.
#[derive(Debug, Default)]
pub struct ProcessOptions {
    pub keyword: Option<String>,
    pub category: CategoryFilter,
    pub export: Option<String>,
    pub sync_notion: bool,
    pub notion_token: Option<String>,
    pub notion_db: Option<String>,
    pub backup_dropbox: bool,
    pub dropbox_token: Option<String>,
}

/// Run the process command.
pub async fn run_process(files: &[PathBuf], opts: ProcessOptions, settings: Settings) -> Result<()> {
    // Read and classify all inputs up front so unsupported extensions are
    // rejected before any network call.
    let mut uploads = Vec::with_capacity(files.len());
    for path in files {
        uploads.push(UploadedFile::from_path(path).await?);
    }

    let has_images = uploads.iter().any(|f| f.kind == MediaKind::Image);
    preflight::check(Operation::Process { has_images })?;

    // Missing sync credentials abort before any processing happens.
    validate_sync_credentials(&opts)?;

    Output::info(&format!("Processing {} file(s)...", uploads.len()));

    let pipeline = Pipeline::new(&settings);
    let spinner = Output::spinner("Processing files (OCR/ASR/GPT)...");
    let store = match pipeline.process_batch(&uploads).await {
        Ok(store) => store,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };
    spinner.finish_and_clear();
    Output::success("All files processed");

    let filtered = store.filter(opts.keyword.as_deref(), &opts.category);
    print_board(&store, &filtered);

    if let Some(path) = &opts.export {
        let path = Settings::expand_path(path);
        let doc = render_markdown(&filtered);
        std::fs::write(&path, &doc)?;
        Output::success(&format!(
            "Exported {} note(s) to {}",
            filtered.len(),
            path.display()
        ));
    }

    if opts.sync_notion {
        run_notion_sync(&opts, &settings, &filtered).await;
    }

    if opts.backup_dropbox {
        run_dropbox_backup(&opts, &filtered).await?;
    }

    Ok(())
}

/// Check that every requested sync has its credentials before any network
/// call is made.
fn validate_sync_credentials(opts: &ProcessOptions) -> crate::error::Result<()> {
    if opts.sync_notion && (opts.notion_token.is_none() || opts.notion_db.is_none()) {
        return Err(TavleError::Config(
            "Notion sync requires --notion-token and --notion-db".to_string(),
        ));
    }
    if opts.backup_dropbox && opts.dropbox_token.is_none() {
        return Err(TavleError::Config(
            "Dropbox backup requires --dropbox-token".to_string(),
        ));
    }
    Ok(())
}

/// Print stats and the grouped board.
fn print_board(store: &NoteStore, filtered: &[NoteRecord]) {
    let topics = NoteStore::distinct_categories(filtered);

    Output::header("Notes Board");
    Output::kv("Uploaded", &store.len().to_string());
    Output::kv("After filter", &filtered.len().to_string());
    Output::kv("Topics", &topics.len().to_string());

    for (category, group) in NoteStore::group_by_category(filtered) {
        Output::header(&format!("{} ({})", category, group.len()));
        for note in &group {
            Output::note(&note.filename, &note.summary, &note.source_text);
        }
    }
}

/// Push the filtered notes to Notion one record at a time.
///
/// Per-record failures are reported and the loop continues; already-created
/// pages are not rolled back.
async fn run_notion_sync(opts: &ProcessOptions, settings: &Settings, filtered: &[NoteRecord]) {
    // Credentials were validated before processing started.
    let token = opts.notion_token.as_deref().unwrap_or_default();
    let db = opts.notion_db.as_deref().unwrap_or_default();
    let client = NotionClient::new(token, db, settings.notion.clone());

    let spinner = Output::spinner("Syncing to Notion...");
    let report = sync_notes(&client, filtered).await;
    spinner.finish_and_clear();

    for (filename, error) in &report.failures {
        Output::error(&format!("Sync failed: {} - {}", filename, error));
    }
    Output::success(&format!(
        "Synced {}/{} note(s) to Notion",
        report.succeeded,
        report.attempted()
    ));
}

/// Render a Markdown snapshot and upload it to Dropbox.
///
/// A failure is reported and then re-raised so the command exits nonzero.
async fn run_dropbox_backup(opts: &ProcessOptions, filtered: &[NoteRecord]) -> Result<()> {
    let token = opts.dropbox_token.as_deref().unwrap_or_default();
    let client = DropboxClient::new(token);

    let mut snapshot = tempfile::NamedTempFile::new()?;
    snapshot.write_all(render_markdown(filtered).as_bytes())?;

    let dest_path = format!("/notes_backup_{}.md", chrono::Utc::now().timestamp());

    let spinner = Output::spinner("Backing up to Dropbox...");
    let result = client.upload_file(snapshot.path(), &dest_path).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            Output::success(&format!("Backed up to Dropbox: {}", dest_path));
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Dropbox backup failed: {}", e));
            Err(e.into())
        }
    }
}
