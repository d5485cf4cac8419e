//! Abstract extraction: dispatch on the link's surface form.
//!
//! Links ending in `.pdf` go through download-then-parse; everything else is
//! fetched as a web page and searched for the abstract meta tag. There is no
//! fallback from one path to the other.

use tracing::{info, instrument, warn};

use researchprofile_shared::{AbstractResult, FetchConfig, Result};

use crate::fetch::SourceFetcher;
use crate::{pdf, web};

/// Failure text when a page has no `twitter:description` tag.
pub const ABSTRACT_NOT_FOUND: &str = "Abstract not found in the meta tag!";

/// Prefix for any fetch or parse failure on the PDF path.
pub const PDF_FAILURE_PREFIX: &str = "Error processing PDF: ";

/// Prefix for fetch failures on the web path.
pub const WEB_FAILURE_PREFIX: &str = "Error while fetching the URL: ";

/// Which extraction path a reference link takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    WebPage,
}

impl SourceKind {
    /// Classify a link by its literal `.pdf` suffix.
    pub fn of(link: &str) -> Self {
        if link.ends_with(".pdf") {
            Self::Pdf
        } else {
            Self::WebPage
        }
    }
}

/// Produces an [`AbstractResult`] for a reference link.
#[derive(Debug, Clone)]
pub struct AbstractExtractor {
    fetcher: SourceFetcher,
    pdf_max_chars: usize,
}

impl AbstractExtractor {
    /// Build an extractor (and its HTTP client) from the `[fetch]` config section.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            fetcher: SourceFetcher::new(config)?,
            pdf_max_chars: config.pdf_max_chars,
        })
    }

    /// Extract the abstract for `link`. Never fails: every fault becomes
    /// [`AbstractResult::Failure`].
    #[instrument(skip_all, fields(link = %link))]
    pub async fn extract(&self, link: &str) -> AbstractResult {
        let kind = SourceKind::of(link);
        info!(?kind, "extracting abstract");

        match kind {
            SourceKind::Pdf => self.extract_pdf(link).await,
            SourceKind::WebPage => self.extract_web(link).await,
        }
    }

    async fn extract_pdf(&self, link: &str) -> AbstractResult {
        let text = match self.fetcher.fetch_bytes(link).await {
            Ok(bytes) => pdf::text_from_pdf(&bytes, self.pdf_max_chars),
            Err(e) => Err(e),
        };

        match text {
            Ok(text) => AbstractResult::Text(text),
            Err(e) => {
                warn!(error = %e, "PDF abstract extraction failed");
                AbstractResult::Failure(format!("{PDF_FAILURE_PREFIX}{e}"))
            }
        }
    }

    async fn extract_web(&self, link: &str) -> AbstractResult {
        let html = match self.fetcher.fetch_page(link).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "page fetch failed");
                return AbstractResult::Failure(format!("{WEB_FAILURE_PREFIX}{e}"));
            }
        };

        match web::abstract_from_html(&html) {
            Some(text) => AbstractResult::Text(text),
            None => {
                warn!("abstract meta tag not found");
                AbstractResult::Failure(ABSTRACT_NOT_FOUND.to_string())
            }
        }
    }
}
