use super::classifier::SentimentClassifier;
use super::record::{AnalysisRecord, Label, ResultSet};
use crate::keywords::KeywordExtractor;
use tracing::debug;

/// Batch analyzer: one classifier invocation per request, one record per
/// input text.
pub struct Analyzer<C> {
    classifier: C,
    keywords: KeywordExtractor,
}

impl<C: SentimentClassifier> Analyzer<C> {
    pub fn new(classifier: C, keywords: KeywordExtractor) -> Self {
        Self {
            classifier,
            keywords,
        }
    }

    /// Analyze all texts, preserving input order.
    ///
    /// An empty input returns an empty [`ResultSet`] without touching the
    /// classifier. Classifier failures propagate to the caller; there is no
    /// retry.
    pub fn batch_analyze(&self, texts: &[String]) -> anyhow::Result<ResultSet> {
        if texts.is_empty() {
            return Ok(ResultSet::new());
        }

        let predictions = self.classifier.classify(texts)?;
        anyhow::ensure!(
            predictions.len() == texts.len(),
            "classifier returned {} predictions for {} texts",
            predictions.len(),
            texts.len()
        );

        let mut records = Vec::with_capacity(texts.len());
        for (text, prediction) in texts.iter().zip(predictions) {
            let sentiment: Label = prediction.label.parse()?;
            records.push(AnalysisRecord {
                text: text.clone(),
                sentiment,
                confidence: round_confidence(prediction.score),
                keywords: self.keywords.extract(text),
            });
        }

        debug!(records = records.len(), "batch analysis complete");
        Ok(ResultSet::from(records))
    }
}

/// Round a confidence score to two decimal places.
fn round_confidence(score: f32) -> f32 {
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::sentiment_analysis::SentimentResult;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub classifier alternating POSITIVE/NEGATIVE, counting invocations.
    struct StubClassifier {
        calls: AtomicUsize,
    }

    impl StubClassifier {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SentimentClassifier for &StubClassifier {
        fn classify(&self, texts: &[String]) -> anyhow::Result<Vec<SentimentResult>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts
                .iter()
                .enumerate()
                .map(|(i, _)| SentimentResult {
                    label: if i % 2 == 0 { "POSITIVE" } else { "NEGATIVE" }.to_string(),
                    score: 0.987_654,
                })
                .collect())
        }
    }

    struct FailingClassifier;

    impl SentimentClassifier for FailingClassifier {
        fn classify(&self, _texts: &[String]) -> anyhow::Result<Vec<SentimentResult>> {
            anyhow::bail!("backend unavailable")
        }
    }

    struct BadLabelClassifier;

    impl SentimentClassifier for BadLabelClassifier {
        fn classify(&self, texts: &[String]) -> anyhow::Result<Vec<SentimentResult>> {
            Ok(texts
                .iter()
                .map(|_| SentimentResult {
                    label: "MIXED".to_string(),
                    score: 0.5,
                })
                .collect())
        }
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn one_record_per_input_in_order() {
        let stub = StubClassifier::new();
        let analyzer = Analyzer::new(&stub, KeywordExtractor::default());

        let input = texts(&["first text here", "second text here", "third text here"]);
        let results = analyzer.batch_analyze(&input).unwrap();

        assert_eq!(results.len(), input.len());
        for (record, text) in results.iter().zip(&input) {
            assert_eq!(&record.text, text);
        }
        assert_eq!(stub.call_count(), 1);
    }

    #[test]
    fn empty_input_skips_the_classifier() {
        let stub = StubClassifier::new();
        let analyzer = Analyzer::new(&stub, KeywordExtractor::default());

        let results = analyzer.batch_analyze(&[]).unwrap();

        assert!(results.is_empty());
        assert_eq!(stub.call_count(), 0);
    }

    #[test]
    fn confidence_is_rounded_to_two_decimals() {
        let stub = StubClassifier::new();
        let analyzer = Analyzer::new(&stub, KeywordExtractor::default());

        let results = analyzer.batch_analyze(&texts(&["anything"])).unwrap();
        let confidence = results.records[0].confidence;

        assert!((0.0..=1.0).contains(&confidence));
        assert_eq!(confidence, 0.99);
        assert_eq!(confidence, (confidence * 100.0).round() / 100.0);
    }

    #[test]
    fn classifier_failure_propagates() {
        let analyzer = Analyzer::new(FailingClassifier, KeywordExtractor::default());
        let err = analyzer.batch_analyze(&texts(&["boom"])).unwrap_err();
        assert!(err.to_string().contains("backend unavailable"));
    }

    #[test]
    fn unexpected_label_is_rejected() {
        let analyzer = Analyzer::new(BadLabelClassifier, KeywordExtractor::default());
        let err = analyzer.batch_analyze(&texts(&["whatever"])).unwrap_err();
        assert!(err.to_string().contains("MIXED"));
    }

    #[test]
    fn keywords_come_from_the_configured_policy() {
        let stub = StubClassifier::new();
        let analyzer = Analyzer::new(&stub, KeywordExtractor::lexicon());

        let results = analyzer
            .batch_analyze(&texts(&["I love this, it is amazing"]))
            .unwrap();

        assert_eq!(results.records[0].keywords, "love, amazing");
    }
}
