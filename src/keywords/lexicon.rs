use super::NO_KEYWORDS;

/// Fixed sentiment word list matched by the lexicon policy.
pub const SENTIMENT_LEXICON: [&str; 10] = [
    "love",
    "hate",
    "terrible",
    "great",
    "bad",
    "amazing",
    "happy",
    "sad",
    "disappointed",
    "okay",
];

/// Lexicon keyword extraction: whitespace-delimited lowercase tokens kept
/// only if they appear in [`SENTIMENT_LEXICON`], deduplicated in
/// first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct LexiconExtractor;

impl LexiconExtractor {
    pub fn extract(&self, text: &str) -> String {
        let mut matches: Vec<&str> = Vec::new();
        for word in text.split_whitespace() {
            let lowered = word.to_lowercase();
            if let Some(&hit) = SENTIMENT_LEXICON.iter().find(|&&w| w == lowered.as_str()) {
                if !matches.contains(&hit) {
                    matches.push(hit);
                }
            }
        }

        if matches.is_empty() {
            NO_KEYWORDS.to_string()
        } else {
            matches.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_lexicon_words_in_first_occurrence_order() {
        let extractor = LexiconExtractor;
        assert_eq!(extractor.extract("I love this, it is amazing"), "love, amazing");
    }

    #[test]
    fn deduplicates_repeated_matches() {
        let extractor = LexiconExtractor;
        assert_eq!(extractor.extract("bad bad BAD service"), "bad");
    }

    #[test]
    fn no_match_yields_sentinel() {
        let extractor = LexiconExtractor;
        assert_eq!(extractor.extract("a perfectly neutral sentence"), NO_KEYWORDS);
        assert_eq!(extractor.extract(""), NO_KEYWORDS);
    }
}
