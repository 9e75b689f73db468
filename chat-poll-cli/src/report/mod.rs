//! Report generation
//!
//! Renders extracted polls as an HTML summary or a JSON dump, and hands HTML
//! to an external converter for PDF output.

pub mod html;
pub mod json;
pub mod pdf;

pub use html::format_html_summary;
pub use json::format_json;
pub use pdf::{generate_pdf, CommandConverter};
