//! Extractor configuration types
//!
//! The extractor needs very little configuration - just an optional date
//! filter. Rendering options live in the application layer.

use serde::{Deserialize, Serialize};

/// Configuration for a single extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Optional: only keep polls whose header date equals this string
    /// (`DD/MM/YYYY`, compared literally)
    #[serde(default)]
    pub date_filter: Option<String>,
}

impl ExtractorConfig {
    /// Create a new configuration that keeps every poll
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the date filter
    pub fn with_date_filter(mut self, date: impl Into<String>) -> Self {
        self.date_filter = Some(date.into());
        self
    }

    /// Builder method: set or clear the date filter
    pub fn with_optional_date_filter(mut self, date: Option<String>) -> Self {
        self.date_filter = date;
        self
    }

    /// Check if a poll posted on `date` should be kept
    ///
    /// No calendar normalization: `1/1/2024` does not match `01/01/2024`.
    pub fn should_include(&self, date: &str) -> bool {
        match &self.date_filter {
            Some(target) => target == date,
            None => true,
        }
    }
}
