//! Configuration module for Tavle.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{ClassifyPrompts, Prompts};
pub use settings::{
    ClassifierSettings, GeneralSettings, NotionSettings, OcrSettings, Settings,
    TranscriptionSettings,
};
