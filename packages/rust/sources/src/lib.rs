//! Source fetching and abstract extraction.
//!
//! This crate provides:
//! - [`fetch`]: single-attempt HTTP client with a browser-like User-Agent
//! - [`web`]: `twitter:description` meta-tag lookup in landing pages
//! - [`pdf`]: in-memory PDF text extraction
//! - [`AbstractExtractor`]: dispatches a reference link to the right path

pub mod extract;
pub mod fetch;
pub mod pdf;
pub mod web;

pub use extract::{
    ABSTRACT_NOT_FOUND, AbstractExtractor, PDF_FAILURE_PREFIX, SourceKind, WEB_FAILURE_PREFIX,
};
pub use fetch::SourceFetcher;
