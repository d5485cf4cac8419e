//! Core domain types for research profiles.

use serde::{Deserialize, Serialize};

/// Placeholder used for every profile field whose input is absent.
pub const UNKNOWN: &str = "Unknown";

// ---------------------------------------------------------------------------
// PaperRecord
// ---------------------------------------------------------------------------

/// One roster row: a paper and the faculty member who published it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Paper title.
    pub title: String,
    /// Author display name.
    pub author: String,
    /// Author's department.
    pub department: String,
    /// Reference link (landing page URL or direct `.pdf` URL).
    pub reference_link: String,
}

// ---------------------------------------------------------------------------
// AbstractResult
// ---------------------------------------------------------------------------

/// Outcome of abstract extraction.
///
/// Fetch, parse, and lookup faults are carried as [`AbstractResult::Failure`]
/// values rather than errors, so a pipeline run always has something to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AbstractResult {
    /// The abstract text, as published by the source.
    Text(String),
    /// Why no abstract could be produced.
    Failure(String),
}

impl AbstractResult {
    /// The abstract text, or `None` for a failure.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Failure(_) => None,
        }
    }

    /// Whether extraction failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Printable content: the abstract or the failure reason.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Failure(text) => text,
        }
    }
}

impl std::fmt::Display for AbstractResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_text())
    }
}

// ---------------------------------------------------------------------------
// ProfileRecord
// ---------------------------------------------------------------------------

/// Final profile for one paper. Every field is populated; absent inputs
/// become [`UNKNOWN`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub title_of_paper: String,
    pub expertise: String,
    pub name_of_author: String,
    pub doi: String,
    pub department: String,
}

impl ProfileRecord {
    /// Labelled fields in display order.
    pub fn labelled_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("Title of the Paper", &self.title_of_paper),
            ("Expertise", &self.expertise),
            ("Name of Author", &self.name_of_author),
            ("DOI", &self.doi),
            ("Department", &self.department),
        ]
    }
}
