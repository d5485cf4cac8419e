//! PDF text extraction.
//!
//! The downloaded bytes are parsed from memory with `lopdf`; nothing is
//! written to disk.

use lopdf::Document;
use tracing::debug;

use researchprofile_shared::{ProfileError, Result};

/// Concatenate the text of every page in page order, then keep the first
/// `max_chars` characters.
pub fn text_from_pdf(bytes: &[u8], max_chars: usize) -> Result<String> {
    let document = Document::load_mem(bytes)
        .map_err(|e| ProfileError::parse(format!("failed to open PDF: {e}")))?;

    // BTreeMap keyed by page number, so iteration is already in page order.
    let pages = document.get_pages();
    let mut text = String::new();

    for page_number in pages.keys() {
        let page_text = document.extract_text(&[*page_number]).map_err(|e| {
            ProfileError::parse(format!("failed to extract text from page {page_number}: {e}"))
        })?;
        text.push_str(&page_text);
    }

    debug!(pages = pages.len(), chars = text.chars().count(), "extracted PDF text");

    Ok(truncate_chars(&text, max_chars))
}

/// Keep at most `max_chars` characters (not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
