//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and credentials are available before
//! starting a batch that would otherwise fail midway.

use crate::error::{Result, TavleError};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Processing a batch always needs the OpenAI key; OCR also needs
    /// tesseract when the batch contains images.
    Process { has_images: bool },
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Process { has_images } => {
            check_api_key()?;
            if has_images {
                check_tool("tesseract")?;
            }
        }
    }
    Ok(())
}

/// Check if the OpenAI API key is configured.
pub fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() && key != "YOUR_OPENAI_API_KEY" => Ok(()),
        Ok(_) => Err(TavleError::Config(
            "OPENAI_API_KEY is not a usable key. Set it with: export OPENAI_API_KEY='sk-...'"
                .to_string(),
        )),
        Err(_) => Err(TavleError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

/// Check if an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(TavleError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TavleError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(TavleError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
