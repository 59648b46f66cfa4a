// Density-analysis topic extractor: the default TopicExtractor.
//
// Runs the full pipeline for one page: collect weighted fragments, extract
// phrase and keyword candidates from the same fragment list, then rank.
// Every intermediate map lives on the stack of a single call, so one
// extractor can serve many pages concurrently.

use std::collections::HashMap;

use tracing::debug;

use crate::page::PageRecord;

use super::fragments::collect;
use super::keywords::{extract_keywords, KeywordCandidate};
use super::phrases::{extract_phrases, PhraseCandidate};
use super::rank::{rank, Topic};
use super::settings::{ConfigError, EngineConfig};
use super::traits::TopicExtractor;

/// Both candidate maps for a page, before ranking.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    pub phrases: HashMap<String, PhraseCandidate>,
    pub keywords: HashMap<String, KeywordCandidate>,
}

/// Weighted density topic extractor built from a validated configuration.
#[derive(Debug, Clone)]
pub struct DensityExtractor {
    config: EngineConfig,
}

impl Default for DensityExtractor {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }
}

impl DensityExtractor {
    /// Build an extractor, rejecting configurations that can't work.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run collection and both extractors without ranking.
    pub fn candidates(&self, page: &PageRecord) -> Candidates {
        let fragments = collect(page, &self.config.weights, &self.config.caps);
        let phrases = extract_phrases(&fragments, &self.config);
        let keywords = extract_keywords(&fragments, &self.config);

        debug!(
            fragments = fragments.len(),
            phrases = phrases.len(),
            keywords = keywords.len(),
            "Collected topic candidates"
        );

        Candidates { phrases, keywords }
    }
}

impl TopicExtractor for DensityExtractor {
    fn extract(&self, page: &PageRecord) -> Vec<Topic> {
        let candidates = self.candidates(page);
        rank(
            &candidates.phrases,
            &candidates.keywords,
            self.config.phrase_score_boost,
            self.config.max_topics,
        )
    }
}
