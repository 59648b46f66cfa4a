// Single-keyword extraction.

use std::collections::HashMap;

use super::fragments::WeightedFragment;
use super::settings::EngineConfig;
use super::tokenizer::Tokenizer;

/// Accumulated evidence for one lower-cased keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordCandidate {
    pub keyword: String,
    pub score: u64,
    pub frequency: u32,
    pub first_seen: usize,
}

/// Build the keyword candidate map. Stop words and tokens outside the
/// configured length range never become candidates.
pub fn extract_keywords(
    fragments: &[WeightedFragment<'_>],
    config: &EngineConfig,
) -> HashMap<String, KeywordCandidate> {
    let tokenizer = Tokenizer::new(config.min_word_length);
    let mut keywords: HashMap<String, KeywordCandidate> = HashMap::new();

    for fragment in fragments {
        for token in tokenizer.tokenize(fragment.text) {
            let word = token.to_lowercase();
            let len = word.chars().count();
            if config.stop_words.contains(&word)
                || len < config.min_word_length
                || len > config.max_word_length
            {
                continue;
            }

            let next_index = keywords.len();
            let candidate = keywords
                .entry(word)
                .or_insert_with_key(|word| KeywordCandidate {
                    keyword: word.clone(),
                    score: 0,
                    frequency: 0,
                    first_seen: next_index,
                });
            candidate.score += u64::from(fragment.weight);
            candidate.frequency += 1;
        }
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, weight: u32) -> WeightedFragment<'_> {
        WeightedFragment { text, weight }
    }

    #[test]
    fn test_accumulates_case_insensitively() {
        let keywords = extract_keywords(
            &[fragment("Toaster", 10), fragment("the toaster TOASTER", 1)],
            &EngineConfig::default(),
        );
        let c = &keywords["toaster"];
        assert_eq!(c.keyword, "toaster");
        assert_eq!(c.score, 12);
        assert_eq!(c.frequency, 3);
    }

    #[test]
    fn test_stop_words_excluded() {
        let keywords = extract_keywords(&[fragment("the and of with", 5)], &EngineConfig::default());
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_long_tokens_excluded() {
        let config = EngineConfig {
            max_word_length: 6,
            ..EngineConfig::default()
        };
        let keywords = extract_keywords(&[fragment("short lengthiest", 1)], &config);
        assert!(keywords.contains_key("short"));
        assert!(!keywords.contains_key("lengthiest"));
    }

    #[test]
    fn test_custom_stop_words() {
        let config = EngineConfig {
            stop_words: crate::topics::stopwords::StopWords::from_words(["toaster"]),
            ..EngineConfig::default()
        };
        let keywords = extract_keywords(&[fragment("the toaster", 1)], &config);
        // "the" is no longer a stop word, "toaster" is
        assert!(keywords.contains_key("the"));
        assert!(!keywords.contains_key("toaster"));
    }

    #[test]
    fn test_first_seen_order() {
        let keywords = extract_keywords(&[fragment("alpha beta alpha gamma", 1)], &EngineConfig::default());
        assert_eq!(keywords["alpha"].first_seen, 0);
        assert_eq!(keywords["beta"].first_seen, 1);
        assert_eq!(keywords["gamma"].first_seen, 2);
    }
}
