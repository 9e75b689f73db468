//! Configuration loading and parsing
//!
//! Everything is optional: a run without `--config` uses the defaults below.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub pdf: PdfConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Document title; " for <date>" is appended when filtering by date
    #[serde(default = "default_title")]
    pub title: String,
    /// Output format used when `--format` is not given
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            format: OutputFormat::default(),
        }
    }
}

fn default_title() -> String {
    "Poll Summary".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
}

/// External HTML -> PDF converter
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PdfConfig {
    /// Program name or path, looked up on PATH
    #[serde(default = "default_pdf_command")]
    pub command: String,
    /// Arguments; `{output}` is replaced with the target path
    #[serde(default = "default_pdf_args")]
    pub args: Vec<String>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            command: default_pdf_command(),
            args: default_pdf_args(),
        }
    }
}

fn default_pdf_command() -> String {
    "weasyprint".to_string()
}

fn default_pdf_args() -> Vec<String> {
    vec!["-".to_string(), "{output}".to_string()]
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [report]
            title = "Weekly Polls"
            format = "json"

            [pdf]
            command = "wkhtmltopdf"
            args = ["--quiet", "-", "{output}"]
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.report.title, "Weekly Polls");
        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.pdf.command, "wkhtmltopdf");
        assert_eq!(config.pdf.args.len(), 3);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.report.title, "Poll Summary");
        assert_eq!(config.report.format, OutputFormat::Html);
        assert_eq!(config.pdf.command, "weasyprint");
        assert_eq!(config.pdf.args, vec!["-", "{output}"]);
    }

    #[test]
    fn test_partial_section() {
        let config: AppConfig = toml::from_str("[pdf]\ncommand = \"chromium-pdf\"\n").unwrap();
        assert_eq!(config.pdf.command, "chromium-pdf");
        assert_eq!(config.pdf.args, vec!["-", "{output}"]);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[report]\ntitle = \"Club Votes\"").unwrap();
        file.flush().unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.report.title, "Club Votes");
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config(Path::new("/no/such/config.toml")).is_err());
    }
}
