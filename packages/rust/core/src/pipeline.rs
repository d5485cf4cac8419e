//! End-to-end profile pipeline: link → abstract → summary → profile.

use std::time::{Duration, Instant};

use tracing::{info, instrument};

use researchprofile_shared::{AbstractResult, PaperRecord, ProfileRecord};
use researchprofile_sources::AbstractExtractor;

use crate::assembler::{self, ProfileFields};
use crate::summarizer::{Summarizer, SummaryModel};
use crate::tagger::ExpertiseTagger;

/// Everything one pipeline run produced.
#[derive(Debug, Clone)]
pub struct ProfileRun {
    pub abstract_result: AbstractResult,
    pub summary: String,
    pub profile: ProfileRecord,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, run: &ProfileRun);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _run: &ProfileRun) {}
}

/// Extraction, summarization, and tagging wired together.
pub struct ProfilePipeline<'m, M> {
    extractor: AbstractExtractor,
    summarizer: Summarizer<'m, M>,
    tagger: ExpertiseTagger,
}

impl<'m, M: SummaryModel> ProfilePipeline<'m, M> {
    pub fn new(
        extractor: AbstractExtractor,
        summarizer: Summarizer<'m, M>,
        tagger: ExpertiseTagger,
    ) -> Self {
        Self {
            extractor,
            summarizer,
            tagger,
        }
    }

    /// Profile one roster paper. The reference link is also reported as the DOI.
    pub async fn run(&self, record: &PaperRecord, progress: &dyn ProgressReporter) -> ProfileRun {
        self.run_link(&record.reference_link, ProfileFields::from(record), progress)
            .await
    }

    /// Profile the paper at `link`, labelling it with `fields`.
    ///
    /// Never fails: extraction and model faults surface as text inside the
    /// returned [`ProfileRun`]. A failed abstract is tagged as empty text.
    #[instrument(skip_all, fields(link = %link))]
    pub async fn run_link(
        &self,
        link: &str,
        fields: ProfileFields<'_>,
        progress: &dyn ProgressReporter,
    ) -> ProfileRun {
        let start = Instant::now();

        progress.phase("Fetching abstract");
        let abstract_result = self.extractor.extract(link).await;

        progress.phase("Summarizing");
        let summary = self.summarizer.summarize(&abstract_result).await;

        progress.phase("Tagging expertise");
        let text = abstract_result.as_text().unwrap_or("");
        let profile = assembler::assemble(&self.tagger, text, fields);

        let run = ProfileRun {
            abstract_result,
            summary,
            profile,
            elapsed: start.elapsed(),
        };

        info!(
            failed = run.abstract_result.is_failure(),
            expertise = %run.profile.expertise,
            elapsed_ms = run.elapsed.as_millis() as u64,
            "profile complete"
        );
        progress.done(&run);
        run
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::summarizer::testing::RecordingModel;
    use crate::summarizer::{FETCH_FAILURE_SUMMARY, SummaryParams};
    use researchprofile_shared::{FetchConfig, UNKNOWN};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"<html><head>
        <meta name="twitter:description" content="We study quantum computing applications in sensing.">
        </head><body></body></html>"#;

    #[derive(Default)]
    struct RecordingProgress {
        phases: Mutex<Vec<String>>,
        finished: Mutex<bool>,
    }

    impl ProgressReporter for RecordingProgress {
        fn phase(&self, name: &str) {
            self.phases.lock().unwrap().push(name.to_string());
        }
        fn done(&self, _run: &ProfileRun) {
            *self.finished.lock().unwrap() = true;
        }
    }

    fn pipeline(model: &RecordingModel) -> ProfilePipeline<'_, RecordingModel> {
        ProfilePipeline::new(
            AbstractExtractor::new(&FetchConfig::default()).expect("extractor"),
            Summarizer::new(model, SummaryParams::default()),
            ExpertiseTagger::default(),
        )
    }

    #[tokio::test]
    async fn roster_paper_becomes_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/paper"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let link = format!("{}/paper", server.uri());
        let record = PaperRecord {
            title: "Quantum Sensing".into(),
            author: "Dr. X".into(),
            department: "Physics".into(),
            reference_link: link.clone(),
        };

        let model = RecordingModel::default();
        let progress = RecordingProgress::default();
        let run = pipeline(&model).run(&record, &progress).await;

        assert_eq!(
            run.abstract_result,
            AbstractResult::Text("We study quantum computing applications in sensing.".into())
        );
        assert_eq!(
            run.summary,
            "Summary: We study quantum computing applications in sensing."
        );
        assert_eq!(
            run.profile,
            ProfileRecord {
                title_of_paper: "Quantum Sensing".into(),
                expertise: "quantum computing".into(),
                name_of_author: "Dr. X".into(),
                doi: link,
                department: "Physics".into(),
            }
        );
        assert_eq!(model.calls(), 1);
        assert_eq!(
            *progress.phases.lock().unwrap(),
            ["Fetching abstract", "Summarizing", "Tagging expertise"]
        );
        assert!(*progress.finished.lock().unwrap());
    }

    #[tokio::test]
    async fn fetch_failure_still_produces_a_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let model = RecordingModel::default();
        let run = pipeline(&model)
            .run_link(
                &format!("{}/gone", server.uri()),
                ProfileFields {
                    author_name: Some("Dr. Y"),
                    ..ProfileFields::default()
                },
                &SilentProgress,
            )
            .await;

        assert!(run.abstract_result.is_failure());
        assert!(
            run.abstract_result
                .display_text()
                .starts_with("Error while fetching the URL:")
        );
        assert_eq!(run.summary, FETCH_FAILURE_SUMMARY);
        assert_eq!(model.calls(), 0);
        assert_eq!(run.profile.expertise, "General");
        assert_eq!(run.profile.name_of_author, "Dr. Y");
        assert_eq!(run.profile.department, UNKNOWN);
    }

    #[tokio::test]
    async fn missing_meta_tag_skips_the_model() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><head></head></html>"))
            .mount(&server)
            .await;

        let model = RecordingModel::default();
        let run = pipeline(&model)
            .run_link(&server.uri(), ProfileFields::default(), &SilentProgress)
            .await;

        assert_eq!(
            run.abstract_result,
            AbstractResult::Failure("Abstract not found in the meta tag!".into())
        );
        assert_eq!(run.summary, FETCH_FAILURE_SUMMARY);
        assert_eq!(model.calls(), 0);
    }
}
