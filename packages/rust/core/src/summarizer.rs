//! Abstractive summarization of fetched abstracts.
//!
//! The model sits behind [`SummaryModel`] so the pipeline can be driven by a
//! hosted inference endpoint in production and by an in-process fake in tests.
//! A model is built once per process and lent to the [`Summarizer`].

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use researchprofile_shared::{AbstractResult, ProfileError, Result, SummarizerConfig};

/// Summary reported when the abstract could not be fetched.
pub const FETCH_FAILURE_SUMMARY: &str =
    "Cannot summarize the abstract due to an error in fetching.";

/// Prefix for summaries that failed inside the model.
pub const MODEL_FAILURE_PREFIX: &str = "Cannot summarize the abstract: ";

// ---------------------------------------------------------------------------
// Model seam
// ---------------------------------------------------------------------------

/// Generation parameters passed to the model on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SummaryParams {
    pub min_length: u32,
    pub max_length: u32,
    /// Sampling stays off; decoding is greedy.
    pub do_sample: bool,
}

impl SummaryParams {
    pub fn from_config(config: &SummarizerConfig) -> Self {
        Self {
            min_length: config.min_length,
            max_length: config.max_length,
            do_sample: false,
        }
    }
}

impl Default for SummaryParams {
    fn default() -> Self {
        Self::from_config(&SummarizerConfig::default())
    }
}

/// A text-to-text summarization model.
pub trait SummaryModel: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    /// Produce the first candidate summary for `text`.
    fn generate(
        &self,
        text: &str,
        params: &SummaryParams,
    ) -> impl Future<Output = Result<String>> + Send;
}

// ---------------------------------------------------------------------------
// Hosted inference backend
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a SummaryParams,
    options: InferenceOptions,
}

/// Block until a cold model is loaded instead of answering 503.
#[derive(Debug, serde::Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, serde::Deserialize)]
struct SummaryCandidate {
    summary_text: String,
}

/// Summarization model served over HTTP (`POST {endpoint}/models/{model}`).
#[derive(Debug, Clone)]
pub struct HostedSummaryModel {
    client: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl HostedSummaryModel {
    /// Build the client once. `api_key` is sent as a bearer token when present.
    pub fn new(config: &SummarizerConfig, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProfileError::config(format!("failed to build model client: {e}")))?;

        let url = format!(
            "{}/models/{}",
            config.endpoint.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            client,
            url,
            model: config.model.clone(),
            api_key,
        })
    }
}

impl SummaryModel for HostedSummaryModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, text: &str, params: &SummaryParams) -> Result<String> {
        let body = InferenceRequest {
            inputs: text,
            parameters: params,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProfileError::Summarization(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProfileError::Summarization(format!(
                "model returned HTTP {status}: {}",
                detail.trim()
            )));
        }

        let candidates: Vec<SummaryCandidate> = response
            .json()
            .await
            .map_err(|e| ProfileError::Summarization(format!("unexpected response: {e}")))?;

        debug!(candidates = candidates.len(), "model responded");

        candidates
            .into_iter()
            .next()
            .map(|c| c.summary_text)
            .ok_or_else(|| ProfileError::Summarization("model returned no candidates".into()))
    }
}

// ---------------------------------------------------------------------------
// Summarizer
// ---------------------------------------------------------------------------

/// Turns an [`AbstractResult`] into display text. Never fails.
#[derive(Debug)]
pub struct Summarizer<'m, M> {
    model: &'m M,
    params: SummaryParams,
}

impl<'m, M: SummaryModel> Summarizer<'m, M> {
    pub fn new(model: &'m M, params: SummaryParams) -> Self {
        Self { model, params }
    }

    /// Summarize `abstract_result`.
    ///
    /// Failures from extraction short-circuit to [`FETCH_FAILURE_SUMMARY`]
    /// without touching the model. Model errors become a
    /// [`MODEL_FAILURE_PREFIX`] message carrying the cause.
    #[instrument(skip_all, fields(model = %self.model.name()))]
    pub async fn summarize(&self, abstract_result: &AbstractResult) -> String {
        let text = match abstract_result {
            AbstractResult::Text(text) => text,
            AbstractResult::Failure(_) => {
                info!("abstract unavailable, skipping model");
                return FETCH_FAILURE_SUMMARY.to_string();
            }
        };

        match self.model.generate(text, &self.params).await {
            Ok(summary) => {
                info!(chars = summary.len(), "summary generated");
                summary
            }
            Err(e) => {
                warn!(error = %e, "summarization failed");
                format!("{MODEL_FAILURE_PREFIX}{e}")
            }
        }
    }
}
