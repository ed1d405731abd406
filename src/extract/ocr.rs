//! Tesseract-based OCR implementation.
//!
//! Shells out to the `tesseract` CLI, which must be installed and on PATH
//! (`tavle doctor` checks this). Configured for mixed traditional-Chinese +
//! English by default; no post-processing, no confidence threshold.

use super::Ocr;
use crate::error::{Result, TavleError};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// OCR engine backed by the tesseract CLI.
pub struct TesseractOcr {
    /// Language string passed via `-l` (e.g. "chi_tra+eng").
    languages: String,
}

impl TesseractOcr {
    pub fn new(languages: &str) -> Self {
        Self {
            languages: languages.to_string(),
        }
    }

    /// Run tesseract on an image file, printing recognized text to stdout.
    async fn run_tesseract(&self, image_path: &Path) -> Result<String> {
        let result = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.languages)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        match result {
            Ok(out) if out.status.success() => {
                Ok(String::from_utf8_lossy(&out.stdout).into_owned())
            }
            Ok(out) => {
                let err = String::from_utf8_lossy(&out.stderr);
                Err(TavleError::ToolFailed(format!("tesseract: {}", err.trim())))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TavleError::ToolNotFound("tesseract".into()))
            }
            Err(e) => Err(TavleError::Extraction(format!("tesseract error: {}", e))),
        }
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new("chi_tra+eng")
    }
}

#[async_trait]
impl Ocr for TesseractOcr {
    #[instrument(skip(self, image), fields(filename = %filename))]
    async fn recognize(&self, filename: &str, image: &[u8]) -> Result<String> {
        debug!("Running OCR ({} bytes)", image.len());

        // Tesseract reads from a file, so stage the bytes in a temp dir that
        // is cleaned up when it goes out of scope.
        let temp_dir = tempfile::tempdir()?;
        let image_path = temp_dir.path().join(filename);
        tokio::fs::write(&image_path, image).await?;

        self.run_tesseract(&image_path).await
    }
}
