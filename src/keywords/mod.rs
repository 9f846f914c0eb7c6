//! Keyword extraction strategies.
//!
//! Each analyzed text is annotated with a short display string of
//! representative terms. Two policies exist and exactly one is active per
//! analyzer, chosen through configuration:
//!
//! - [`TermFrequencyExtractor`]: statistical ranking of a single document's
//!   non-stopword terms (the default).
//! - [`LexiconExtractor`]: membership lookup against a fixed sentiment word
//!   list.
//!
//! Extraction never fails; input with no usable terms yields [`NO_KEYWORDS`].

mod lexicon;
mod statistical;
mod stopwords;

pub use lexicon::{LexiconExtractor, SENTIMENT_LEXICON};
pub use statistical::TermFrequencyExtractor;
pub use stopwords::{is_stop_word, ENGLISH_STOP_WORDS};

/// Sentinel returned when a text yields no keywords.
pub const NO_KEYWORDS: &str = "none";

/// Default number of terms kept by the statistical policy.
pub const DEFAULT_TOP_N: usize = 5;

/// Configured keyword extraction policy.
#[derive(Debug, Clone)]
pub enum KeywordExtractor {
    Statistical(TermFrequencyExtractor),
    Lexicon(LexiconExtractor),
}

impl KeywordExtractor {
    /// Statistical term-frequency policy keeping the `top_n` best terms.
    pub fn statistical(top_n: usize) -> Self {
        KeywordExtractor::Statistical(TermFrequencyExtractor::new(top_n))
    }

    /// Fixed sentiment-lexicon policy.
    pub fn lexicon() -> Self {
        KeywordExtractor::Lexicon(LexiconExtractor)
    }

    /// Extract keywords from `text` as a `", "`-joined display string.
    pub fn extract(&self, text: &str) -> String {
        match self {
            KeywordExtractor::Statistical(extractor) => extractor.extract(text),
            KeywordExtractor::Lexicon(extractor) => extractor.extract(text),
        }
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        KeywordExtractor::statistical(DEFAULT_TOP_N)
    }
}
