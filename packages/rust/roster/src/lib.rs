//! Faculty roster loading and interactive narrowing.
//!
//! The roster is a spreadsheet (workbook or CSV export) with one row per paper. An operator narrows it
//! author → department → paper; the selected row becomes the
//! [`PaperRecord`] handed to the profile pipeline.

pub mod columns;

use std::io::Read;
use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use tracing::{debug, info, instrument};

use researchprofile_shared::{PaperRecord, ProfileError, Result};

use columns::ColumnIndex;

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// How a roster file is read, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RosterFormat {
    Workbook,
    Csv,
}

impl RosterFormat {
    fn of(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Self::Workbook,
            _ => Self::Csv,
        }
    }
}

/// All papers in a roster file, in file order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    papers: Vec<PaperRecord>,
}

impl Roster {
    /// Load a roster from disk. Spreadsheet workbooks (`.xlsx`, `.xlsm`,
    /// `.xlsb`, `.xls`, `.ods`) are read from their first sheet; anything
    /// else is parsed as CSV.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let roster = match RosterFormat::of(path) {
            RosterFormat::Workbook => Self::from_workbook(path)?,
            RosterFormat::Csv => {
                let file = std::fs::File::open(path).map_err(|e| ProfileError::io(path, e))?;
                Self::from_reader(file)?
            }
        };
        info!(papers = roster.papers.len(), "roster loaded");
        Ok(roster)
    }

    /// Parse a roster from any CSV source. The first record is the header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ProfileError::roster(format!("failed to read header row: {e}")))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record
                .map_err(|e| ProfileError::roster(format!("row {}: {e}", row + 2)))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Self::from_table(&headers, rows)
    }

    /// Parse the first sheet of a spreadsheet workbook. The first row is the
    /// header row.
    pub fn from_workbook(path: &Path) -> Result<Self> {
        let mut workbook = open_workbook_auto(path).map_err(|e| {
            ProfileError::roster(format!("failed to open workbook {}: {e}", path.display()))
        })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ProfileError::roster("workbook has no sheets"))?
            .map_err(|e| ProfileError::roster(format!("failed to read first sheet: {e}")))?;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>());
        let headers = rows
            .next()
            .ok_or_else(|| ProfileError::roster("first sheet is empty"))?;

        Self::from_table(&headers, rows.collect())
    }

    /// Build papers from a header row and raw data rows. Cells are trimmed;
    /// short rows read as empty cells.
    fn from_table(headers: &[String], rows: Vec<Vec<String>>) -> Result<Self> {
        let index = ColumnIndex::locate(headers.iter().map(String::as_str))?;
        debug!(?index, "roster columns located");

        let papers = rows
            .iter()
            .map(|row| {
                let cell = |i: usize| row.get(i).map_or("", |c| c.trim()).to_string();
                PaperRecord {
                    title: cell(index.title),
                    author: cell(index.author),
                    department: cell(index.department),
                    reference_link: cell(index.link),
                }
            })
            .collect();

        Ok(Self { papers })
    }

    /// Papers whose author contains `query`, ignoring case.
    ///
    /// Rows with an empty author never match.
    pub fn search_by_author(&self, query: &str) -> AuthorMatches<'_> {
        let needle = query.trim().to_lowercase();
        let papers = self
            .papers
            .iter()
            .filter(|p| !p.author.is_empty() && p.author.to_lowercase().contains(&needle))
            .collect();

        AuthorMatches { papers }
    }
}

// ---------------------------------------------------------------------------
// AuthorMatches
// ---------------------------------------------------------------------------

/// Result of an author search, ready to be narrowed by department.
#[derive(Debug, Clone)]
pub struct AuthorMatches<'a> {
    papers: Vec<&'a PaperRecord>,
}

impl<'a> AuthorMatches<'a> {
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Distinct departments in order of first appearance.
    pub fn departments(&self) -> Vec<&'a str> {
        let mut seen: Vec<&'a str> = Vec::new();
        for paper in &self.papers {
            if !seen.contains(&paper.department.as_str()) {
                seen.push(&paper.department);
            }
        }
        seen
    }

    /// Matched papers in exactly `department`, in roster order.
    pub fn papers_in(&self, department: &str) -> Vec<&'a PaperRecord> {
        self.papers
            .iter()
            .copied()
            .filter(|p| p.department == department)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Menu choices
// ---------------------------------------------------------------------------

/// Parse a 1-based menu choice. Returns the 0-based index, or `None` for
/// anything that is not plain digits naming a number in `1..=count`.
pub fn parse_choice(input: &str, count: usize) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let choice: usize = input.parse().ok()?;
    (1..=count).contains(&choice).then(|| choice - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_roster() -> Roster {
        Roster::load(Path::new("../../../fixtures/roster/faculty.csv")).expect("load fixture")
    }

    #[test]
    fn loads_fixture_with_messy_headers() {
        let roster = fixture_roster();
        assert_eq!(roster.papers.len(), 6);

        let first = &roster.papers[0];
        assert_eq!(first.author, "Dr. Asha Verma");
        assert_eq!(first.department, "Physics");
        assert_eq!(first.title, "Quantum Sensing with Trapped Ions");
        assert!(first.reference_link.starts_with("https://journals.example.org/"));
    }

    #[test]
    fn empty_cells_stay_empty() {
        let roster = fixture_roster();
        let survey = &roster.papers[4];
        assert_eq!(survey.department, "");
        assert_eq!(survey.reference_link, "");
    }

    #[test]
    fn author_search_is_case_insensitive_substring() {
        let roster = fixture_roster();
        assert_eq!(roster.search_by_author("asha").papers.len(), 3);
        assert_eq!(roster.search_by_author("  VERMA ").papers.len(), 3);
        assert_eq!(roster.search_by_author("mehta").papers.len(), 1);
        assert!(roster.search_by_author("nobody").is_empty());
    }

    #[test]
    fn empty_author_cells_never_match() {
        let roster = fixture_roster();
        // An empty query matches every row that has an author.
        assert_eq!(roster.search_by_author("").papers.len(), 5);
    }

    #[test]
    fn departments_are_unique_in_first_seen_order() {
        let roster = fixture_roster();
        let matches = roster.search_by_author("verma");
        assert_eq!(matches.departments(), ["Physics", "Computer Science"]);
    }

    #[test]
    fn papers_in_department_keep_roster_order() {
        let roster = fixture_roster();
        let matches = roster.search_by_author("verma");
        let titles: Vec<&str> = matches
            .papers_in("Physics")
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(
            titles,
            ["Quantum Sensing with Trapped Ions", "Nanotechnology in Photonic Sensors"]
        );
        assert!(matches.papers_in("physics").is_empty());
    }

    #[test]
    fn missing_required_column_is_roster_error() {
        let csv = "Name of the Author,Title of Paper\nDr. X,Something\n";
        let err = Roster::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ProfileError::Roster { .. }));
    }

    #[test]
    fn short_rows_are_padded_with_empty_cells() {
        let csv = "Name of the Author,Department of the Teacher,Title of Paper,Link of the Article\nDr. X,Physics\n";
        let roster = Roster::from_reader(csv.as_bytes()).expect("flexible rows");
        assert_eq!(roster.papers[0].title, "");
        assert_eq!(roster.papers[0].reference_link, "");
    }

    #[test]
    fn parse_choice_accepts_only_listed_numbers() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice(" 3 \n", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("two", 3), None);
        assert_eq!(parse_choice("-1", 3), None);
        assert_eq!(parse_choice("", 3), None);
    }

    #[test]
    fn parse_choice_rejects_signs_and_inner_spaces() {
        assert_eq!(parse_choice("+2", 3), None);
        assert_eq!(parse_choice("1 2", 3), None);
        assert_eq!(parse_choice("2.0", 3), None);
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(RosterFormat::of(Path::new("faculty.xlsx")), RosterFormat::Workbook);
        assert_eq!(RosterFormat::of(Path::new("FACULTY.XLS")), RosterFormat::Workbook);
        assert_eq!(RosterFormat::of(Path::new("faculty.ods")), RosterFormat::Workbook);
        assert_eq!(RosterFormat::of(Path::new("faculty.csv")), RosterFormat::Csv);
        assert_eq!(RosterFormat::of(Path::new("faculty")), RosterFormat::Csv);
    }

    #[test]
    fn loads_workbook_first_sheet() {
        let roster = Roster::load(Path::new("../../../fixtures/roster/faculty.xlsx"))
            .expect("load workbook fixture");
        assert_eq!(roster.papers.len(), 3);

        let first = &roster.papers[0];
        assert_eq!(first.author, "Dr. Asha Verma");
        assert_eq!(first.department, "Physics");
        assert_eq!(first.title, "Quantum Sensing with Trapped Ions");
        assert_eq!(
            first.reference_link,
            "https://journals.example.org/article/10.5555/qs.2023.001"
        );

        // Padded cells are trimmed, like CSV cells.
        assert_eq!(roster.papers[1].author, "Prof. Rahul Mehta");

        // Blank cells read as empty strings.
        assert_eq!(roster.papers[2].department, "");
        assert_eq!(roster.papers[2].reference_link, "");
    }

    #[test]
    fn workbook_and_csv_narrow_the_same_way() {
        let roster = Roster::load(Path::new("../../../fixtures/roster/faculty.xlsx"))
            .expect("load workbook fixture");
        let matches = roster.search_by_author("mehta");
        assert_eq!(matches.departments(), ["Chemistry"]);
        assert_eq!(
            matches.papers_in("Chemistry")[0].title,
            "Green Catalysts for Renewable Energy"
        );
    }

    #[test]
    fn unreadable_workbook_is_roster_error() {
        let err = Roster::from_workbook(Path::new("../../../fixtures/roster/faculty.csv"))
            .unwrap_err();
        assert!(matches!(err, ProfileError::Roster { .. }));
    }
}
