//! Chat Poll Summary CLI
//!
//! Command-line front end for the chat-poll-extractor library. It reads an
//! exported chat transcript, extracts its polls and:
//! - Prints an HTML summary (default) or a JSON dump to stdout
//! - Or converts the HTML summary to PDF with an external tool (`--pdf`)

use anyhow::{Context, Result};
use chat_poll_extractor::{ExtractorConfig, PollExtractor};
use clap::Parser;
use std::path::PathBuf;

mod config;
mod report;

use config::{AppConfig, OutputFormat};
use report::CommandConverter;

/// Chat Poll Summary - Extract and summarize polls from chat exports
#[derive(Parser, Debug)]
#[command(name = "poll-summary")]
#[command(about = "Extract and summarize polls from an exported chat transcript", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the exported chat transcript
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Only include polls posted on this date (DD/MM/YYYY)
    #[arg(long, value_name = "DD/MM/YYYY")]
    date: Option<String>,

    /// Write the summary as PDF to this path instead of printing HTML
    #[arg(long, value_name = "PATH")]
    pdf: Option<PathBuf>,

    /// Output format when printing to stdout
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("Chat Poll Summary v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using extractor library v{}", chat_poll_extractor::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(date) = &args.date {
        check_date_format(date);
    }

    let extract_config = ExtractorConfig::new().with_optional_date_filter(args.date.clone());
    let polls = PollExtractor::new()
        .extract_file(&args.file, &extract_config)
        .with_context(|| format!("Failed to extract polls from {:?}", args.file))?;

    let date = args.date.as_deref();

    if let Some(pdf_path) = &args.pdf {
        let html = report::format_html_summary(&polls, date, &app_config.report.title);
        let converter = CommandConverter::from_config(&app_config.pdf);
        if report::generate_pdf(&converter, &html, pdf_path) {
            println!("PDF summary written to {}", pdf_path.display());
        }
        return Ok(());
    }

    match args.format.unwrap_or(app_config.report.format) {
        OutputFormat::Html => {
            let html = report::format_html_summary(&polls, date, &app_config.report.title);
            println!("{}", html);
        }
        OutputFormat::Json => {
            let json = report::format_json(&polls).context("Failed to serialize polls")?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Warn about a `--date` that does not look like DD/MM/YYYY
///
/// The value is still used as-is: dates are matched literally against the
/// transcript headers.
fn check_date_format(date: &str) {
    let looks_right = date.len() == 10
        && chrono::NaiveDate::parse_from_str(date, "%d/%m/%Y").is_ok();
    if !looks_right {
        log::warn!(
            "--date {:?} is not a DD/MM/YYYY date; it will only match headers with exactly this text",
            date
        );
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_minimal_args() {
        let args = Args::try_parse_from(["poll-summary", "chat.txt"]).unwrap();
        assert_eq!(args.file, PathBuf::from("chat.txt"));
        assert!(args.date.is_none());
        assert!(args.pdf.is_none());
        assert!(args.format.is_none());
    }

    #[test]
    fn test_parse_all_args() {
        let args = Args::try_parse_from([
            "poll-summary",
            "chat.txt",
            "--date",
            "05/05/2024",
            "--pdf",
            "out.pdf",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.date.as_deref(), Some("05/05/2024"));
        assert_eq!(args.pdf, Some(PathBuf::from("out.pdf")));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_file_is_required() {
        assert!(Args::try_parse_from(["poll-summary"]).is_err());
    }
}
