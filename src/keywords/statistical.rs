use super::stopwords::is_stop_word;
use super::NO_KEYWORDS;
use std::collections::HashMap;

/// Statistical keyword extraction over a single document.
///
/// Terms are lowercased alphanumeric tokens of at least two characters with
/// English stopwords removed, ranked by descending term frequency. With only
/// one document the inverse-document-frequency factor of a tf-idf scheme is
/// constant, so the ranking degenerates to a per-document frequency ranking;
/// ties are broken by first occurrence in the document. A document with
/// fewer than `top_n` distinct terms yields all of them.
#[derive(Debug, Clone)]
pub struct TermFrequencyExtractor {
    top_n: usize,
}

impl TermFrequencyExtractor {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn extract(&self, text: &str) -> String {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return NO_KEYWORDS.to_string();
        }

        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for (position, token) in tokens.into_iter().enumerate() {
            let entry = counts.entry(token).or_insert((0, position));
            entry.0 += 1;
        }

        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(term, (count, first_seen))| (term, count, first_seen))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let keywords: Vec<String> = ranked
            .into_iter()
            .take(self.top_n)
            .map(|(term, _, _)| term)
            .collect();

        keywords.join(", ")
    }
}

impl Default for TermFrequencyExtractor {
    fn default() -> Self {
        Self::new(super::DEFAULT_TOP_N)
    }
}

fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}
