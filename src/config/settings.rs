//! Configuration settings for Tavle.

use super::Prompts;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub ocr: OcrSettings,
    pub transcription: TranscriptionSettings,
    pub classifier: ClassifierSettings,
    pub notion: NotionSettings,
    pub prompts: Prompts,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// OCR settings for image uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Tesseract language string passed via `-l`.
    pub languages: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            // Mixed traditional Chinese + English.
            languages: "chi_tra+eng".to_string(),
        }
    }
}

/// Speech-to-text settings for audio uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Whisper model to use.
    pub model: String,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            model: "whisper-1".to_string(),
        }
    }
}

/// Summarizer/classifier settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Chat model used for summarize-and-classify.
    pub model: String,
    /// Maximum number of cached classifier replies.
    pub cache_entries: usize,
    /// Cached reply lifetime in seconds.
    pub cache_ttl_seconds: u64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            cache_entries: 128,
            cache_ttl_seconds: 3600,
        }
    }
}

/// Notion workspace sync settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotionSettings {
    /// Notion API version header value.
    pub api_version: String,
    /// Name of the title property the summary is written to.
    pub title_property: String,
    /// Name of the select property the category is written to.
    pub category_property: String,
    /// Maximum characters of source text written into the page body.
    pub body_max_chars: usize,
}

impl Default for NotionSettings {
    fn default() -> Self {
        Self {
            api_version: "2022-06-28".to_string(),
            title_property: "Summary".to_string(),
            category_property: "Category".to_string(),
            body_max_chars: 1900,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tavle")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.classifier.model, "gpt-4");
        assert_eq!(settings.classifier.cache_entries, 128);
        assert_eq!(settings.notion.body_max_chars, 1900);
        assert_eq!(settings.ocr.languages, "chi_tra+eng");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [classifier]
            model = "gpt-4o-mini"
            "#,
        )
        .unwrap();
        assert_eq!(settings.classifier.model, "gpt-4o-mini");
        assert_eq!(settings.classifier.cache_entries, 128);
        assert_eq!(settings.transcription.model, "whisper-1");
    }

    #[test]
    fn test_prompt_override_from_toml() {
        let settings: Settings = toml::from_str(
            r#"
            [prompts.classify]
            user = "Summarize this: {{text}}"
            "#,
        )
        .unwrap();
        let rendered = settings.prompts.render_classify("note body");
        assert_eq!(rendered, "Summarize this: note body");
        // Untouched sections keep their defaults.
        assert_eq!(settings.classifier.model, "gpt-4");
    }
}
