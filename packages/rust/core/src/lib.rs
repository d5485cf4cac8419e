//! Core pipeline orchestration and domain logic for ResearchProfile.
//!
//! This crate ties abstract extraction, summarization, and expertise tagging
//! into a single profile run (see [`ProfilePipeline`]).

pub mod assembler;
pub mod pipeline;
pub mod summarizer;
pub mod tagger;

pub use assembler::{ProfileFields, assemble};
pub use pipeline::{ProfilePipeline, ProfileRun, ProgressReporter, SilentProgress};
pub use summarizer::{
    FETCH_FAILURE_SUMMARY, HostedSummaryModel, MODEL_FAILURE_PREFIX, Summarizer, SummaryModel,
    SummaryParams,
};
pub use tagger::{ExpertiseTagger, GENERAL_TAG};
