// Stop-word vocabulary shared read-only by the phrase and keyword extractors.
//
// The set is built once and never mutated afterwards; clones share the same
// allocation so concurrent extractions can hold it without coordination.

use std::collections::HashSet;
use std::sync::Arc;

use stop_words::{get, LANGUAGE};

/// Built-in English vocabulary tuned for web page text (includes
/// contractions with the apostrophe stripped, and markup residue like "nbsp").
const BUILTIN: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
    "it", "its", "of", "on", "that", "the", "to", "was", "will", "with", "this", "but", "they",
    "have", "had", "what", "when", "where", "who", "which", "why", "how", "all", "each",
    "every", "both", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "just", "don",
    "should", "now", "i", "you", "your", "my", "our", "their", "his", "her", "am", "been",
    "being", "having", "does", "did", "doing", "would", "could", "ought", "im", "youre", "hes",
    "shes", "were", "theyre", "ive", "youve", "weve", "theyve", "id", "youd", "hed", "shed",
    "wed", "theyd", "ill", "youll", "hell", "shell", "well", "theyll", "isnt", "arent",
    "wasnt", "werent", "hasnt", "havent", "hadnt", "doesnt", "dont", "didnt", "wont",
    "wouldnt", "shant", "shouldnt", "cant", "cannot", "couldnt", "mustnt", "lets", "thats",
    "whos", "whats", "heres", "theres", "whens", "wheres", "whys", "hows", "get", "got",
    "also", "may", "might", "must", "need", "shall", "go", "going", "gone", "make", "made",
    "making", "see", "seen", "saw", "one", "two", "three", "four", "five", "six", "seven",
    "eight", "nine", "ten", "about", "above", "after", "again", "against", "among", "any",
    "because", "before", "below", "between", "down", "during", "further", "here", "into",
    "off", "once", "out", "over", "then", "there", "these", "those", "through", "under",
    "until", "up", "upon", "while", "within", "without", "yes", "yet", "new", "amp", "nbsp",
    "if", "or",
];

/// An immutable, case-insensitive stop-word set.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: Arc<HashSet<String>>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StopWords {
    /// The built-in English vocabulary.
    pub fn builtin() -> Self {
        Self::from_words(BUILTIN.iter().copied())
    }

    /// An empty set; nothing is treated as a stop word.
    pub fn empty() -> Self {
        Self {
            words: Arc::new(HashSet::new()),
        }
    }

    /// Build a set from an arbitrary word list. Words are lower-cased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: Arc::new(words.into_iter().map(|w| w.as_ref().to_lowercase()).collect()),
        }
    }

    /// Load the `stop-words` crate list for a language code or name.
    /// Returns None for languages the crate doesn't cover.
    pub fn from_language(language: &str) -> Option<Self> {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            _ => return None,
        };
        let words: Vec<String> = get(lang);
        Some(Self::from_words(words))
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        // Fast path above covers already-lowercased tokens
        word.chars().any(char::is_uppercase) && self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
