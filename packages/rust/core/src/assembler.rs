//! Profile assembly from metadata and abstract text.

use researchprofile_shared::{PaperRecord, ProfileRecord, UNKNOWN};

use crate::tagger::ExpertiseTagger;

/// Optional metadata for a profile. Absent or empty values become
/// [`UNKNOWN`] in the assembled record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileFields<'a> {
    pub author_name: Option<&'a str>,
    pub doi: Option<&'a str>,
    pub department: Option<&'a str>,
    pub title_of_paper: Option<&'a str>,
}

impl<'a> From<&'a PaperRecord> for ProfileFields<'a> {
    /// The reference link stands in as the DOI.
    fn from(record: &'a PaperRecord) -> Self {
        Self {
            author_name: Some(&record.author),
            doi: Some(&record.reference_link),
            department: Some(&record.department),
            title_of_paper: Some(&record.title),
        }
    }
}

fn or_unknown(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// Build a [`ProfileRecord`]. Expertise is always derived from
/// `abstract_text`; every other field comes from `fields`.
pub fn assemble(
    tagger: &ExpertiseTagger,
    abstract_text: &str,
    fields: ProfileFields<'_>,
) -> ProfileRecord {
    ProfileRecord {
        title_of_paper: or_unknown(fields.title_of_paper),
        expertise: tagger.tag(abstract_text),
        name_of_author: or_unknown(fields.author_name),
        doi: or_unknown(fields.doi),
        department: or_unknown(fields.department),
    }
}
