//! Keyword-based expertise tagging.

use researchprofile_shared::{DEFAULT_EXPERTISE_KEYWORDS, TaggingConfig};

/// Tag reported when no keyword matches.
pub const GENERAL_TAG: &str = "General";

/// Matches abstract text against a fixed vocabulary.
///
/// Each keyword is checked independently as a case-insensitive substring.
/// Matches are reported in vocabulary order, not in order of appearance.
#[derive(Debug, Clone)]
pub struct ExpertiseTagger {
    keywords: Vec<String>,
    lowered: Vec<String>,
}

impl ExpertiseTagger {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        let lowered = keywords.iter().map(|k| k.to_lowercase()).collect();
        Self { keywords, lowered }
    }

    pub fn from_config(config: &TaggingConfig) -> Self {
        Self::new(config.keywords.iter().cloned())
    }

    /// Keywords present in `text`, in vocabulary order.
    pub fn matches(&self, text: &str) -> Vec<&str> {
        let haystack = text.to_lowercase();
        self.keywords
            .iter()
            .zip(&self.lowered)
            .filter(|(_, needle)| haystack.contains(needle.as_str()))
            .map(|(keyword, _)| keyword.as_str())
            .collect()
    }

    /// Matched keywords joined with `", "`, or [`GENERAL_TAG`].
    pub fn tag(&self, text: &str) -> String {
        let found = self.matches(text);
        if found.is_empty() {
            GENERAL_TAG.to_string()
        } else {
            found.join(", ")
        }
    }
}

impl Default for ExpertiseTagger {
    fn default() -> Self {
        Self::new(DEFAULT_EXPERTISE_KEYWORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_vocabulary_order_not_text_order() {
        let tagger = ExpertiseTagger::default();
        let text = "Robotics meets Machine Learning in this work.";
        assert_eq!(tagger.tag(text), "machine learning, robotics");
    }

    #[test]
    fn no_match_falls_back_to_general() {
        let tagger = ExpertiseTagger::default();
        assert_eq!(tagger.tag("A history of medieval poetry."), GENERAL_TAG);
        assert_eq!(tagger.tag(""), GENERAL_TAG);
    }

    #[test]
    fn keywords_keep_declared_spelling() {
        let tagger = ExpertiseTagger::default();
        assert_eq!(tagger.tag("explainable ai for clinicians"), "AI");
    }

    #[test]
    fn substring_containment_without_stemming() {
        let tagger = ExpertiseTagger::default();
        // "biological" contains "biolog" but not "biology".
        assert_eq!(tagger.tag("biological membranes"), GENERAL_TAG);
        // Plain containment: "physics" inside "astrophysics".
        assert_eq!(tagger.tag("astrophysics survey"), "physics");
    }

    #[test]
    fn quantum_sensing_abstract() {
        let tagger = ExpertiseTagger::default();
        assert_eq!(
            tagger.tag("We study quantum computing applications in sensing."),
            "quantum computing"
        );
    }

    #[test]
    fn custom_vocabulary_from_config() {
        let config = TaggingConfig {
            keywords: vec!["Ecology".into(), "remote sensing".into()],
        };
        let tagger = ExpertiseTagger::from_config(&config);
        assert_eq!(tagger.keywords.len(), 2);
        assert_eq!(
            tagger.tag("Remote Sensing of forest ecology"),
            "Ecology, remote sensing"
        );
    }
}
