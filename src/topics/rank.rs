// Ranking and deduplication: merges phrase and keyword candidates into the
// final topic list.
//
// Candidate maps are hash maps, so their iteration order carries no meaning.
// Candidates are first laid out in first-seen order (phrases, then keywords)
// and only then stable-sorted by score, which makes tie order reproducible.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::keywords::KeywordCandidate;
use super::phrases::PhraseCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicKind {
    Keyword,
    Phrase,
}

/// One ranked topic in the output list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(rename = "topic")]
    pub text: String,
    pub score: f64,
    pub frequency: u32,
    #[serde(rename = "type")]
    pub kind: TopicKind,
}

/// Merge, boost, sort, deduplicate and truncate.
///
/// Phrase scores are multiplied by `phrase_boost` and their text title-cased;
/// keywords keep their raw score and lower-case text. A keyword is dropped
/// when an already-kept phrase with a strictly higher score contains it as a
/// case-insensitive substring, even mid-word ("art" inside "Smart Phone").
pub fn rank(
    phrases: &HashMap<String, PhraseCandidate>,
    keywords: &HashMap<String, KeywordCandidate>,
    phrase_boost: f64,
    max_topics: usize,
) -> Vec<Topic> {
    let mut phrase_list: Vec<&PhraseCandidate> = phrases.values().collect();
    phrase_list.sort_by_key(|c| c.first_seen);
    let mut keyword_list: Vec<&KeywordCandidate> = keywords.values().collect();
    keyword_list.sort_by_key(|c| c.first_seen);

    let mut topics: Vec<Topic> = Vec::with_capacity(phrase_list.len() + keyword_list.len());
    topics.extend(phrase_list.into_iter().map(|c| Topic {
        text: title_case(c.phrase.trim()),
        score: c.score as f64 * phrase_boost,
        frequency: c.frequency,
        kind: TopicKind::Phrase,
    }));
    topics.extend(keyword_list.into_iter().map(|c| Topic {
        text: c.keyword.clone(),
        score: c.score as f64,
        frequency: c.frequency,
        kind: TopicKind::Keyword,
    }));

    // Vec::sort_by is stable
    topics.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut ranked = dedupe(topics);
    ranked.truncate(max_topics);
    ranked
}

/// Single pass over a score-sorted list, keeping the first of every
/// case-insensitive duplicate and suppressing keywords subsumed by a
/// higher-scored phrase.
fn dedupe(sorted: Vec<Topic>) -> Vec<Topic> {
    let mut seen: HashSet<String> = HashSet::new();
    // Lower-cased text and score of every phrase emitted so far
    let mut kept_phrases: Vec<(String, f64)> = Vec::new();
    let mut unique = Vec::new();

    for topic in sorted {
        let normalized = topic.text.to_lowercase();
        if seen.contains(&normalized) {
            continue;
        }

        if topic.kind == TopicKind::Keyword
            && kept_phrases
                .iter()
                .any(|(phrase, score)| *score > topic.score && phrase.contains(&normalized))
        {
            continue;
        }

        if topic.kind == TopicKind::Phrase {
            kept_phrases.push((normalized.clone(), topic.score));
        }
        seen.insert(normalized);
        unique.push(topic);
    }

    unique
}

/// Lower-case a phrase, then capitalize the first letter of each word.
pub fn title_case(phrase: &str) -> String {
    phrase
        .to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    // Keep one character per key character ("ß" has no single upper case)
                    let mut upper = first.to_uppercase();
                    let head = match (upper.next(), upper.next()) {
                        (Some(single), None) => single,
                        _ => first,
                    };
                    std::iter::once(head).chain(chars).collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase(text: &str, score: u64, first_seen: usize) -> (String, PhraseCandidate) {
        (
            text.to_lowercase(),
            PhraseCandidate {
                phrase: text.to_string(),
                score,
                frequency: 1,
                first_seen,
            },
        )
    }

    fn keyword(text: &str, score: u64, first_seen: usize) -> (String, KeywordCandidate) {
        (
            text.to_string(),
            KeywordCandidate {
                keyword: text.to_string(),
                score,
                frequency: 1,
                first_seen,
            },
        )
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("SMART phone"), "Smart Phone");
        assert_eq!(title_case("2-slice toaster"), "2-slice Toaster");
        assert_eq!(title_case("éclair recipes"), "Éclair Recipes");
    }

    #[test]
    fn test_title_case_keeps_key_length() {
        let cased = title_case("ßtraße weg");
        assert_eq!(cased, "ßtraße Weg");
        assert_eq!(cased.to_lowercase(), "ßtraße weg");
    }

    #[test]
    fn test_phrase_boost_breaks_raw_tie() {
        let phrases = HashMap::from([phrase("solar power", 10, 0)]);
        let keywords = HashMap::from([keyword("battery", 10, 0)]);
        let topics = rank(&phrases, &keywords, 1.5, 20);
        assert_eq!(topics[0].text, "Solar Power");
        assert_eq!(topics[0].score, 15.0);
        assert_eq!(topics[0].kind, TopicKind::Phrase);
        assert_eq!(topics[1].text, "battery");
        assert_eq!(topics[1].score, 10.0);
    }

    #[test]
    fn test_keyword_suppressed_by_containing_phrase() {
        // Boosted phrase score is 21
        let phrases = HashMap::from([phrase("Smart Phone", 14, 0)]);
        let keywords = HashMap::from([keyword("phone", 5, 0), keyword("art", 4, 1)]);
        let topics = rank(&phrases, &keywords, 1.5, 20);
        let texts: Vec<&str> = topics.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Smart Phone"]);
    }

    #[test]
    fn test_keyword_with_equal_score_not_suppressed() {
        let phrases = HashMap::from([phrase("smart phone", 10, 0)]);
        let keywords = HashMap::from([keyword("phone", 15, 0)]);
        let topics = rank(&phrases, &keywords, 1.5, 20);
        assert_eq!(topics.len(), 2);
    }

    #[test]
    fn test_higher_keyword_survives_phrase() {
        let phrases = HashMap::from([phrase("smart phone", 2, 0)]);
        let keywords = HashMap::from([keyword("phone", 30, 0)]);
        let topics = rank(&phrases, &keywords, 1.5, 20);
        assert_eq!(topics[0].text, "phone");
        assert_eq!(topics[1].text, "Smart Phone");
    }

    #[test]
    fn test_ties_follow_first_seen_order() {
        let phrases = HashMap::from([
            phrase("gamma delta", 4, 2),
            phrase("alpha beta", 4, 0),
            phrase("beta gamma", 4, 1),
        ]);
        let topics = rank(&phrases, &HashMap::new(), 1.5, 20);
        let texts: Vec<&str> = topics.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Alpha Beta", "Beta Gamma", "Gamma Delta"]);
    }

    #[test]
    fn test_truncates_to_ceiling() {
        let keywords: HashMap<String, KeywordCandidate> = (0..30)
            .map(|i| keyword(&format!("word{i}"), 100 - i as u64, i))
            .collect();
        let topics = rank(&HashMap::new(), &keywords, 1.5, 20);
        assert_eq!(topics.len(), 20);
        assert_eq!(topics[0].text, "word0");
    }

    #[test]
    fn test_empty_inputs() {
        assert!(rank(&HashMap::new(), &HashMap::new(), 1.5, 20).is_empty());
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let topic = Topic {
            text: "Solar Power".into(),
            score: 15.0,
            frequency: 1,
            kind: TopicKind::Phrase,
        };
        let json = serde_json::to_value(&topic).unwrap();
        assert_eq!(json["topic"], "Solar Power");
        assert_eq!(json["type"], "phrase");
    }
}
