// Phrase (n-gram) extraction with weighted density scoring.
//
// Every contiguous window of min..=max tokens in a fragment is a candidate
// phrase unless stop words make up more than half of it. Each occurrence adds
// the fragment's weight to the phrase's score. A 2-gram and a 3-gram covering
// the same words are tracked as separate candidates.

use std::collections::HashMap;

use super::fragments::WeightedFragment;
use super::settings::EngineConfig;
use super::stopwords::StopWords;
use super::tokenizer::Tokenizer;

/// Accumulated evidence for one distinct phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseCandidate {
    /// Display text as first seen (original casing)
    pub phrase: String,
    /// Sum of fragment weights across all occurrences
    pub score: u64,
    /// Number of occurrences
    pub frequency: u32,
    /// Order in which this phrase was first encountered
    pub first_seen: usize,
}

/// Build the phrase candidate map, keyed by lower-cased phrase text.
pub fn extract_phrases(
    fragments: &[WeightedFragment<'_>],
    config: &EngineConfig,
) -> HashMap<String, PhraseCandidate> {
    let tokenizer = Tokenizer::new(config.min_word_length);
    let mut phrases: HashMap<String, PhraseCandidate> = HashMap::new();

    for fragment in fragments {
        let words = tokenizer.tokenize(fragment.text);

        for n in config.min_phrase_length..=config.max_phrase_length {
            for window in words.windows(n) {
                if is_stop_word_majority(window, &config.stop_words) {
                    continue;
                }

                let phrase = window.join(" ");
                let next_index = phrases.len();
                let candidate = phrases
                    .entry(phrase.to_lowercase())
                    .or_insert_with(|| PhraseCandidate {
                        phrase,
                        score: 0,
                        frequency: 0,
                        first_seen: next_index,
                    });
                candidate.score += u64::from(fragment.weight);
                candidate.frequency += 1;
            }
        }
    }

    phrases.retain(|_, candidate| candidate.phrase.chars().count() >= config.min_phrase_char_length);
    phrases
}

/// True when strictly more than half of the window's words are stop words.
/// Exactly half (2 of 4) is still acceptable.
pub fn is_stop_word_majority(window: &[&str], stop_words: &StopWords) -> bool {
    let stop_count = window.iter().filter(|w| stop_words.contains(w)).count();
    // stop_count > n / 2, compared without integer truncation
    stop_count * 2 > window.len()
}
