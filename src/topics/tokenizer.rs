// Word tokenizer for page text fragments.
//
// Anything that isn't a word character, whitespace, or a hyphen becomes a
// separator. Word characters are Unicode letters and digits (plus the
// underscore), so non-English pages tokenize instead of collapsing to nothing.
// Tokens keep their original case; the extractors fold case themselves.

/// Splits text into word tokens of at least `min_word_length` characters.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    min_word_length: usize,
}

impl Tokenizer {
    pub fn new(min_word_length: usize) -> Self {
        Self { min_word_length }
    }

    /// Tokenize a fragment. Lengths are counted in characters, not bytes.
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split(|c: char| !is_token_char(c))
            .filter(|word| !word.is_empty())
            .filter(|word| word.chars().count() >= self.min_word_length)
            .collect()
    }
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation() {
        let t = Tokenizer::new(2);
        assert_eq!(
            t.tokenize("Hello, world! It's (really) great."),
            vec!["Hello", "world", "It", "really", "great"]
        );
    }

    #[test]
    fn test_keeps_hyphens_and_case() {
        let t = Tokenizer::new(2);
        assert_eq!(
            t.tokenize("Compact 2-Slice Toaster"),
            vec!["Compact", "2-Slice", "Toaster"]
        );
    }

    #[test]
    fn test_drops_short_tokens() {
        let t = Tokenizer::new(3);
        assert_eq!(t.tokenize("an ox is big"), vec!["big"]);
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        let t = Tokenizer::new(2);
        assert_eq!(t.tokenize("  alpha \t\n beta   "), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_unicode_letters_survive() {
        let t = Tokenizer::new(2);
        assert_eq!(
            t.tokenize("Größe café — naïve «日本語»"),
            vec!["Größe", "café", "naïve", "日本語"]
        );
    }

    #[test]
    fn test_length_counts_characters() {
        // "éé" is four bytes but two characters
        let t = Tokenizer::new(3);
        assert!(t.tokenize("éé").is_empty());
        assert_eq!(Tokenizer::new(2).tokenize("éé"), vec!["éé"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(Tokenizer::new(2).tokenize("").is_empty());
        assert!(Tokenizer::new(2).tokenize("!!! ... ???").is_empty());
    }
}
