// Engine configuration: every tunable the density extractor uses.
//
// An EngineConfig is an immutable value handed to the extractor at
// construction. Nothing in the engine reads process-wide state, so two
// differently configured extractors can run side by side.

use thiserror::Error;

use super::stopwords::StopWords;

/// Where a piece of page text came from. Each kind maps to one weight tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Title,
    MetaDescription,
    MetaKeywords,
    H1,
    H2,
    H3,
    StructuredContent,
    LinkText,
    ImageAlt,
    BodyText,
}

/// Importance weight per source field, audited and tuned as one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWeights {
    pub title: u32,
    pub meta_description: u32,
    pub meta_keywords: u32,
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
    pub structured_content: u32,
    pub link_text: u32,
    pub image_alt: u32,
    pub body_text: u32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 10,
            h1: 9,
            meta_description: 8,
            structured_content: 8,
            meta_keywords: 7,
            h2: 6,
            h3: 5,
            image_alt: 4,
            link_text: 3,
            body_text: 1,
        }
    }
}

impl FieldWeights {
    /// Look up the weight for a field kind.
    pub fn weight(&self, kind: FieldKind) -> u32 {
        match kind {
            FieldKind::Title => self.title,
            FieldKind::MetaDescription => self.meta_description,
            FieldKind::MetaKeywords => self.meta_keywords,
            FieldKind::H1 => self.h1,
            FieldKind::H2 => self.h2,
            FieldKind::H3 => self.h3,
            FieldKind::StructuredContent => self.structured_content,
            FieldKind::LinkText => self.link_text,
            FieldKind::ImageAlt => self.image_alt,
            FieldKind::BodyText => self.body_text,
        }
    }
}

/// Hard truncation caps applied while collecting fragments from large pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorCaps {
    /// Only the first N links are considered (before empty-text filtering)
    pub max_links: usize,
    /// Only the first N images are considered (before empty-alt filtering)
    pub max_images: usize,
    /// Body text is cut to this many characters
    pub max_body_chars: usize,
}

impl Default for CollectorCaps {
    fn default() -> Self {
        Self {
            max_links: 50,
            max_images: 20,
            max_body_chars: 5000,
        }
    }
}

/// Everything the density extractor can be tuned with.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub stop_words: StopWords,
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub min_phrase_length: usize,
    pub max_phrase_length: usize,
    /// Multiplier applied to phrase scores before ranking
    pub phrase_score_boost: f64,
    /// Phrases whose text is shorter than this many characters are dropped
    pub min_phrase_char_length: usize,
    pub weights: FieldWeights,
    pub caps: CollectorCaps,
    /// Ceiling on the ranked topic list, applied before any caller limit
    pub max_topics: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stop_words: StopWords::builtin(),
            min_word_length: 2,
            max_word_length: 50,
            min_phrase_length: 2,
            max_phrase_length: 5,
            phrase_score_boost: 1.5,
            min_phrase_char_length: 5,
            weights: FieldWeights::default(),
            caps: CollectorCaps::default(),
            max_topics: 20,
        }
    }
}

/// A configuration that can never produce meaningful extraction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("min_word_length must be at least 1")]
    ZeroWordLength,

    #[error("min_word_length ({min}) is greater than max_word_length ({max})")]
    WordLengthRange { min: usize, max: usize },

    #[error("min_phrase_length must be at least 2 words, got {0}")]
    PhraseTooShort(usize),

    #[error("min_phrase_length ({min}) is greater than max_phrase_length ({max})")]
    PhraseLengthRange { min: usize, max: usize },

    #[error("phrase_score_boost must be a positive finite number, got {0}")]
    InvalidBoost(f64),

    #[error("max_topics must be at least 1")]
    ZeroTopics,
}

impl EngineConfig {
    /// Check the configuration once, at load time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_word_length == 0 {
            return Err(ConfigError::ZeroWordLength);
        }
        if self.min_word_length > self.max_word_length {
            return Err(ConfigError::WordLengthRange {
                min: self.min_word_length,
                max: self.max_word_length,
            });
        }
        if self.min_phrase_length < 2 {
            return Err(ConfigError::PhraseTooShort(self.min_phrase_length));
        }
        if self.min_phrase_length > self.max_phrase_length {
            return Err(ConfigError::PhraseLengthRange {
                min: self.min_phrase_length,
                max: self.max_phrase_length,
            });
        }
        if !self.phrase_score_boost.is_finite() || self.phrase_score_boost <= 0.0 {
            return Err(ConfigError::InvalidBoost(self.phrase_score_boost));
        }
        if self.max_topics == 0 {
            return Err(ConfigError::ZeroTopics);
        }
        Ok(())
    }
}
