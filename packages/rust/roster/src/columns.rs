//! Roster header normalization.
//!
//! Spreadsheet exports carry headers like `"Link of the\nArticle"` or
//! `"Department of the Teacher "`. Headers are normalized before lookup:
//! trim, newline to space, space to underscore, lower-case.

use researchprofile_shared::{ProfileError, Result};

pub const AUTHOR: &str = "name_of_the_author";
pub const DEPARTMENT: &str = "department_of_the_teacher";
pub const TITLE: &str = "title_of_paper";
pub const LINK: &str = "link_of_the_article";

/// Normalize one header cell.
pub fn normalize_column(raw: &str) -> String {
    raw.trim().replace('\n', " ").replace(' ', "_").to_lowercase()
}

/// Positions of the required columns within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnIndex {
    pub author: usize,
    pub department: usize,
    pub title: usize,
    pub link: usize,
}

impl ColumnIndex {
    /// Locate the required columns among `headers`.
    pub(crate) fn locate<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let normalized: Vec<String> = headers.into_iter().map(normalize_column).collect();

        let find = |name: &str| {
            normalized.iter().position(|h| h == name).ok_or_else(|| {
                ProfileError::roster(format!(
                    "missing column `{name}` (found: {})",
                    normalized.join(", ")
                ))
            })
        };

        Ok(Self {
            author: find(AUTHOR)?,
            department: find(DEPARTMENT)?,
            title: find(TITLE)?,
            link: find(LINK)?,
        })
    }
}
