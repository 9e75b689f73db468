//! PDF output
//!
//! HTML -> PDF conversion is delegated to an external program. The converter
//! reads the document on stdin and writes the PDF to the target path.

use crate::config::PdfConfig;
use std::ffi::OsString;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Placeholder in converter arguments replaced with the output path
const OUTPUT_PLACEHOLDER: &str = "{output}";

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("PDF converter '{command}' not found: {source}")]
    ConverterNotFound {
        command: String,
        #[source]
        source: which::Error,
    },

    #[error("Failed to run PDF converter '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF converter '{command}' failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Anything that can turn an HTML document into a PDF file
pub trait PdfConverter {
    fn convert(&self, html: &str, output: &Path) -> Result<(), PdfError>;
}

/// Converter backed by an external command (weasyprint by default)
#[derive(Debug, Clone)]
pub struct CommandConverter {
    command: String,
    args: Vec<String>,
}

impl CommandConverter {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &PdfConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    /// Arguments with `{output}` substituted; the path is appended when no
    /// argument mentions it
    fn build_args(&self, output: &Path) -> Vec<OsString> {
        let mut has_output = false;
        let mut args: Vec<OsString> = self
            .args
            .iter()
            .map(|arg| {
                if arg == OUTPUT_PLACEHOLDER {
                    has_output = true;
                    output.as_os_str().to_os_string()
                } else if arg.contains(OUTPUT_PLACEHOLDER) {
                    has_output = true;
                    OsString::from(arg.replace(OUTPUT_PLACEHOLDER, &output.to_string_lossy()))
                } else {
                    OsString::from(arg)
                }
            })
            .collect();

        if !has_output {
            args.push(output.as_os_str().to_os_string());
        }
        args
    }
}

impl PdfConverter for CommandConverter {
    fn convert(&self, html: &str, output: &Path) -> Result<(), PdfError> {
        let program = which::which(&self.command).map_err(|source| PdfError::ConverterNotFound {
            command: self.command.clone(),
            source,
        })?;
        let args = self.build_args(output);
        log::debug!("Running PDF converter {:?} {:?}", program, args);

        let spawn_err = |source: std::io::Error| PdfError::Spawn {
            command: self.command.clone(),
            source,
        };

        // stderr goes to a file so a chatty converter cannot block on a full
        // pipe while we are still writing its stdin
        let mut stderr_file = tempfile::tempfile().map_err(spawn_err)?;
        let stderr_sink = stderr_file.try_clone().map_err(spawn_err)?;

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::from(stderr_sink))
            .spawn()
            .map_err(spawn_err)?;

        // stdin is dropped at the end of this block, closing the pipe
        let write_result = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(html.as_bytes()),
            None => Ok(()),
        };

        // Always reap the child, even when the write failed
        let status = child.wait().map_err(spawn_err)?;

        if !status.success() {
            return Err(PdfError::Failed {
                command: self.command.clone(),
                status,
                stderr: read_stderr(&mut stderr_file),
            });
        }
        write_result.map_err(spawn_err)?;

        Ok(())
    }
}

/// Captured converter diagnostics, trimmed; empty if unreadable
fn read_stderr(file: &mut File) -> String {
    let mut stderr = Vec::new();
    if let Err(e) = file
        .seek(SeekFrom::Start(0))
        .and_then(|_| file.read_to_end(&mut stderr))
    {
        log::debug!("Could not read converter stderr: {}", e);
    }
    String::from_utf8_lossy(&stderr).trim().to_string()
}

/// Convert `html` to a PDF at `output`
///
/// Returns false when conversion fails. The error is reported here and not
/// propagated; whatever the converter already wrote to `output` is left as is.
pub fn generate_pdf(converter: &dyn PdfConverter, html: &str, output: &Path) -> bool {
    log::info!("Generating PDF: {:?}", output);
    match converter.convert(html, output) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("PDF conversion failed: {:?}", e);
            eprintln!("Error generating PDF: {}", e);
            false
        }
    }
}
