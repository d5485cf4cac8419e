//! Application configuration for ResearchProfile.
//!
//! User config lives at `~/.researchprofile/researchprofile.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "researchprofile.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".researchprofile";

/// Browser-like identification; some publishers reject default client agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Expertise vocabulary used when the config file does not override it.
pub const DEFAULT_EXPERTISE_KEYWORDS: [&str; 18] = [
    "AI",
    "machine learning",
    "data science",
    "biology",
    "physics",
    "chemistry",
    "robotics",
    "neuroscience",
    "engineering",
    "quantum computing",
    "genomics",
    "renewable energy",
    "cybersecurity",
    "nanotechnology",
    "climate science",
    "blockchain",
    "mathematics",
    "statistics",
];

// ---------------------------------------------------------------------------
// Config structs (matching researchprofile.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Source fetching.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Summarization model.
    #[serde(default)]
    pub summarizer: SummarizerConfig,

    /// Expertise vocabulary.
    #[serde(default)]
    pub tagging: TaggingConfig,

    /// Roster defaults.
    #[serde(default)]
    pub roster: RosterConfig,
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,

    /// Maximum redirects followed for a single request.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// User-Agent header sent with every source request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// PDF abstracts are cut to this many characters.
    #[serde(default = "default_pdf_max_chars")]
    pub pdf_max_chars: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            pdf_max_chars: default_pdf_max_chars(),
        }
    }
}

fn default_fetch_timeout() -> u64 {
    30
}
fn default_max_redirects() -> usize {
    5
}
fn default_user_agent() -> String {
    BROWSER_USER_AGENT.into()
}
fn default_pdf_max_chars() -> usize {
    1000
}

/// `[summarizer]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Base URL of a Hugging Face Inference-compatible server.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Pretrained summarization model ID.
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the env var holding the API token (never store the token itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Minimum summary length in tokens.
    #[serde(default = "default_min_length")]
    pub min_length: u32,

    /// Maximum summary length in tokens.
    #[serde(default = "default_max_length")]
    pub max_length: u32,

    /// Model request timeout in seconds.
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            timeout_secs: default_model_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://router.huggingface.co/hf-inference".into()
}
fn default_model() -> String {
    "t5-small".into()
}
fn default_api_key_env() -> String {
    "HF_API_TOKEN".into()
}
fn default_min_length() -> u32 {
    50
}
fn default_max_length() -> u32 {
    500
}
fn default_model_timeout() -> u64 {
    120
}

/// `[tagging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggingConfig {
    /// Expertise keywords, in the order tags are reported.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
        }
    }
}

fn default_keywords() -> Vec<String> {
    DEFAULT_EXPERTISE_KEYWORDS
        .iter()
        .map(|k| (*k).to_string())
        .collect()
}

/// `[roster]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Roster CSV used when `--roster` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.summarizer.min_length > self.summarizer.max_length {
            return Err(ProfileError::config(format!(
                "summarizer.min_length ({}) exceeds summarizer.max_length ({})",
                self.summarizer.min_length, self.summarizer.max_length
            )));
        }
        if self.fetch.timeout_secs == 0 || self.summarizer.timeout_secs == 0 {
            return Err(ProfileError::config("timeouts must be at least 1 second"));
        }
        if self.summarizer.endpoint.trim().is_empty() {
            return Err(ProfileError::config("summarizer.endpoint is empty"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.researchprofile/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ProfileError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.researchprofile/researchprofile.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ProfileError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        ProfileError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ProfileError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ProfileError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ProfileError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read the summarizer API token from the configured env var.
///
/// An unset or empty variable yields `None`; local inference servers need no token.
pub fn summarizer_api_key(config: &AppConfig) -> Option<String> {
    std::env::var(&config.summarizer.api_key_env)
        .ok()
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("t5-small"));
        assert!(toml_str.contains("HF_API_TOKEN"));
        assert!(toml_str.contains("quantum computing"));
        assert!(toml_str.contains("https://router.huggingface.co/hf-inference"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.fetch.pdf_max_chars, 1000);
        assert_eq!(parsed.summarizer.min_length, 50);
        assert_eq!(parsed.summarizer.max_length, 500);
        assert_eq!(parsed.tagging.keywords.len(), 18);
        assert_eq!(parsed.tagging.keywords[0], "AI");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let toml_str = r#"
[tagging]
keywords = ["ecology", "statistics"]

[roster]
path = "/tmp/faculty.csv"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.tagging.keywords, ["ecology", "statistics"]);
        assert_eq!(config.roster.path, Some(PathBuf::from("/tmp/faculty.csv")));
        assert_eq!(config.fetch.user_agent, BROWSER_USER_AGENT);
        assert_eq!(config.summarizer.model, "t5-small");
    }

    #[test]
    fn validate_rejects_inverted_lengths() {
        let mut config = AppConfig::default();
        config.summarizer.min_length = 600;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_length"));
    }

    #[test]
    fn missing_api_key_is_none() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.summarizer.api_key_env = "RP_TEST_NONEXISTENT_TOKEN_12345".into();
        assert!(summarizer_api_key(&config).is_none());
    }
}
