//! Tavle - AI Notes Board
//!
//! A CLI tool that turns uploaded images, audio clips, and text files into a
//! classified, searchable notes board.
//!
//! The name "Tavle" comes from the Norwegian/Scandinavian word for "board."
//!
//! # Overview
//!
//! Tavle allows you to:
//! - Extract text from images (OCR), audio (Whisper), and plain text files
//! - Summarize and classify each note into a topic via a chat model
//! - Filter notes by keyword and category, grouped by topic
//! - Export the board to Markdown, sync it to Notion, or back it up to Dropbox
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `extract` - Text extraction (OCR, speech-to-text, UTF-8 decode)
//! - `classify` - Summarize-and-classify via a chat model
//! - `cache` - Bounded memoization for classifier replies
//! - `notes` - Note records and the in-memory batch repository
//! - `export` - Markdown, Notion, and Dropbox adapters
//! - `pipeline` - Batch coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use tavle::config::Settings;
//! use tavle::extract::UploadedFile;
//! use tavle::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(&settings);
//!
//!     let file = UploadedFile::new("hello.txt", b"Hello world".to_vec())?;
//!     let note = pipeline.process_file(&file).await?;
//!     println!("{}: {}", note.category, note.summary);
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod notes;
pub mod openai;
pub mod pipeline;

pub use error::{Result, TavleError};
