//! CLI module for Tavle.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::notes::CategoryFilter;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tavle - AI Notes Board
///
/// Turns images, audio clips, and text files into a classified, searchable
/// notes board. The name "Tavle" comes from the Norwegian/Scandinavian word
/// for "board."
#[derive(Parser, Debug)]
#[command(name = "tavle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process uploads into a notes board (extract, summarize, classify)
    Process {
        /// Image, audio, or text files to process (png, jpg, jpeg, mp3, wav, txt)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Keyword filter: case-insensitive match against the extracted text
        #[arg(short, long)]
        keyword: Option<String>,

        /// Category filter ('all' shows everything)
        #[arg(long, default_value = "all")]
        category: CategoryFilter,

        /// Write the filtered board to a Markdown file
        #[arg(
            short,
            long,
            value_name = "PATH",
            num_args = 0..=1,
            default_missing_value = "notes_export.md"
        )]
        export: Option<String>,

        /// Sync filtered notes to a Notion database
        #[arg(long)]
        sync_notion: bool,

        /// Notion integration token (required with --sync-notion)
        #[arg(long)]
        notion_token: Option<String>,

        /// Notion database ID (required with --sync-notion)
        #[arg(long)]
        notion_db: Option<String>,

        /// Back up the filtered board as Markdown to Dropbox
        #[arg(long)]
        backup_dropbox: bool,

        /// Dropbox access token (required with --backup-dropbox)
        #[arg(long)]
        dropbox_token: Option<String>,
    },

    /// Check system requirements and configuration
    Doctor,
}
