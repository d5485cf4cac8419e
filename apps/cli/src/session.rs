//! Interactive roster narrowing and console rendering.

use std::fmt::Write as _;

use color_eyre::eyre::Result;
use dialoguer::Input;

use researchprofile_core::ProfileRun;
use researchprofile_roster::{Roster, parse_choice};
use researchprofile_shared::PaperRecord;

const INVALID_CHOICE: &str = "Invalid choice. Exiting.";

pub(crate) fn prompt_author() -> Result<String> {
    let author: String = Input::new()
        .with_prompt("Enter the author's name to search")
        .allow_empty(true)
        .interact_text()?;
    Ok(author)
}

fn prompt_choice(prompt: &str, count: usize) -> Result<Option<usize>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(parse_choice(&input, count))
}

/// Narrow the roster author → department → paper.
///
/// Returns `None` after printing the reason when there is nothing to profile.
pub(crate) fn select_paper<'r>(
    roster: &'r Roster,
    author: &str,
) -> Result<Option<&'r PaperRecord>> {
    let matches = roster.search_by_author(author);
    if matches.is_empty() {
        println!("No results found for author: {author}");
        return Ok(None);
    }

    let departments = matches.departments();
    println!("\nDepartments associated with the author:");
    print!("{}", numbered(departments.iter().copied()));

    let Some(dept) = prompt_choice(
        "\nEnter the number corresponding to the department",
        departments.len(),
    )?
    else {
        println!("{INVALID_CHOICE}");
        return Ok(None);
    };

    let papers = matches.papers_in(departments[dept]);
    println!("\nPapers available:");
    print!("{}", numbered(papers.iter().map(|p| paper_line(p))));

    let Some(paper) = prompt_choice(
        "\nEnter the number corresponding to the paper you want the abstract for",
        papers.len(),
    )?
    else {
        println!("{INVALID_CHOICE}");
        return Ok(None);
    };

    Ok(Some(papers[paper]))
}

fn paper_line(paper: &PaperRecord) -> String {
    format!("{} (Link: {})", paper.title, paper.reference_link)
}

/// 1-based numbered list, one item per line.
fn numbered<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .enumerate()
        .fold(String::new(), |mut out, (i, item)| {
            let _ = writeln!(out, "{}. {}", i + 1, item.as_ref());
            out
        })
}

/// Abstract, summary, and profile blocks as printed after a run.
pub(crate) fn render_run(run: &ProfileRun) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nAbstract:\n{}", run.abstract_result);
    let _ = writeln!(out, "\nSummary:\n{}", run.summary);
    let _ = writeln!(out, "\nProfile:");
    for (label, value) in run.profile.labelled_fields() {
        let _ = writeln!(out, "{label}: {value}");
    }
    out
}
