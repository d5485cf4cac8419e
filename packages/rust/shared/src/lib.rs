//! Shared types, error model, and configuration for ResearchProfile.
//!
//! This crate is the foundation depended on by all other ResearchProfile crates.
//! It provides:
//! - [`ProfileError`]: the unified error type
//! - Domain types ([`PaperRecord`], [`AbstractResult`], [`ProfileRecord`])
//! - Configuration ([`AppConfig`] and its sections, config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BROWSER_USER_AGENT, DEFAULT_EXPERTISE_KEYWORDS, FetchConfig, RosterConfig,
    SummarizerConfig, TaggingConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from, summarizer_api_key,
};
pub use error::{ProfileError, Result};
pub use types::{AbstractResult, PaperRecord, ProfileRecord, UNKNOWN};
