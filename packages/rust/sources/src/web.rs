//! Abstract lookup in landing-page HTML.
//!
//! Publishers expose the abstract as the `twitter:description` card. Only the
//! first meta tag with exactly that `name` is consulted; no structural
//! `<abstract>` or body heuristics are attempted.

use scraper::{Html, Selector};
use tracing::debug;

/// Meta tag `name` carrying the abstract.
pub const ABSTRACT_META_NAME: &str = "twitter:description";

/// Return the `content` of the first `twitter:description` meta tag, verbatim.
///
/// `None` when no such tag exists or the first one has no `content` attribute.
pub fn abstract_from_html(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let meta_sel = Selector::parse("meta[name]").unwrap();

    let tag = doc
        .select(&meta_sel)
        .find(|el| el.value().attr("name") == Some(ABSTRACT_META_NAME))?;

    let content = tag.value().attr("content");
    debug!(found = content.is_some(), "abstract meta tag located");
    content.map(str::to_string)
}
