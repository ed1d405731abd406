//! Export adapters for note batches.
//!
//! Three independent outputs: a Markdown document, per-record pages in a
//! Notion database, and a file backup to Dropbox.

mod dropbox;
mod markdown;
mod notion;

pub use dropbox::DropboxClient;
pub use markdown::render_markdown;
pub use notion::{sync_notes, NotionClient, SyncReport, Workspace};
