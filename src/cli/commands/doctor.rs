//! Doctor command - verify system requirements and configuration.

use crate::cli::preflight::{check_api_key, check_tool};
use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
///
/// `config_path` is the file settings were loaded from (`--config` if given,
/// otherwise the default location).
pub fn run_doctor(settings: &Settings, config_path: Option<&Path>) -> anyhow::Result<()> {
    Output::header("Tavle Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    checks.push(match check_tool("tesseract") {
        Ok(()) => CheckResult::ok("tesseract", "installed"),
        Err(e) => CheckResult::error(
            "tesseract",
            &e.to_string(),
            "Install tesseract with your package manager (e.g. apt install tesseract-ocr tesseract-ocr-chi-tra)",
        ),
    });

    checks.push(match check_api_key() {
        Ok(()) => CheckResult::ok("OPENAI_API_KEY", "configured"),
        Err(e) => CheckResult::error(
            "OPENAI_API_KEY",
            &e.to_string(),
            "export OPENAI_API_KEY='sk-...'",
        ),
    });

    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Settings::default_config_path);
    checks.push(if config_path.exists() {
        CheckResult::ok("config", &format!("loaded from {}", config_path.display()))
    } else {
        CheckResult::ok("config", "using built-in defaults")
    });

    checks.push(CheckResult::ok(
        "classifier model",
        &settings.classifier.model,
    ));
    checks.push(CheckResult::ok(
        "OCR languages",
        &settings.ocr.languages,
    ));

    for check in &checks {
        check.print();
    }

    let failures = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Error)
        .count();

    println!();
    if failures == 0 {
        Output::success("All checks passed");
    } else {
        Output::error(&format!("{} check(s) failed", failures));
    }

    Ok(())
}
