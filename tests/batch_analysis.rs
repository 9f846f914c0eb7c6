// Integration tests for the batch analyzer through the public API, using a
// stub classifier so no model download is needed.

use sentiscope::{
    AnalysisRecord, Analyzer, KeywordExtractor, Label, SentimentClassifier, SentimentResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};

struct StubClassifier {
    calls: AtomicUsize,
}

impl StubClassifier {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl SentimentClassifier for &StubClassifier {
    fn classify(&self, texts: &[String]) -> anyhow::Result<Vec<SentimentResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|text| SentimentResult {
                label: if text.contains("love") {
                    "POSITIVE"
                } else {
                    "NEGATIVE"
                }
                .to_string(),
                score: 0.913_372,
            })
            .collect())
    }
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn result_set_matches_input_length_and_order() {
    let stub = StubClassifier::new();
    let analyzer = Analyzer::new(&stub, KeywordExtractor::default());

    let input = texts(&[
        "I love this app!",
        "The service was terrible.",
        "I love the new design",
    ]);
    let results = analyzer.batch_analyze(&input).unwrap();

    assert_eq!(results.len(), input.len());
    for (record, text) in results.iter().zip(&input) {
        assert_eq!(&record.text, text);
    }
    assert_eq!(results.records[0].sentiment, Label::Positive);
    assert_eq!(results.records[1].sentiment, Label::Negative);
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn empty_input_returns_empty_result_set_without_classifier_call() {
    let stub = StubClassifier::new();
    let analyzer = Analyzer::new(&stub, KeywordExtractor::default());

    let results = analyzer.batch_analyze(&[]).unwrap();

    assert!(results.is_empty());
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn confidence_is_in_range_with_two_decimals() {
    let stub = StubClassifier::new();
    let analyzer = Analyzer::new(&stub, KeywordExtractor::default());

    let results = analyzer.batch_analyze(&texts(&["whatever"])).unwrap();

    for record in &results {
        assert!((0.0..=1.0).contains(&record.confidence));
        let rescaled = record.confidence * 100.0;
        assert!((rescaled - rescaled.round()).abs() < 1e-4);
    }
    assert_eq!(results.records[0].confidence, 0.91);
}

#[test]
fn statistical_keywords_exclude_stopwords() {
    let stub = StubClassifier::new();
    let analyzer = Analyzer::new(&stub, KeywordExtractor::statistical(5));

    let results = analyzer
        .batch_analyze(&texts(&["the cat sat on the mat"]))
        .unwrap();
    let keywords: Vec<&str> = results.records[0].keywords.split(", ").collect();

    assert!(keywords.len() <= 5);
    for keyword in keywords {
        assert!(
            ["cat", "sat", "mat"].contains(&keyword),
            "unexpected keyword {keyword}"
        );
    }
}

#[test]
fn lexicon_keywords_match_the_word_list() {
    let stub = StubClassifier::new();
    let analyzer = Analyzer::new(&stub, KeywordExtractor::lexicon());

    let results = analyzer
        .batch_analyze(&texts(&["I love this, it is amazing"]))
        .unwrap();

    assert_eq!(results.records[0].keywords, "love, amazing");
}

#[test]
fn records_serialize_with_uppercase_labels() {
    let record = AnalysisRecord {
        text: "I love this app!".to_string(),
        sentiment: Label::Positive,
        confidence: 0.99,
        keywords: "love, app".to_string(),
    };

    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains("\"sentiment\":\"POSITIVE\""));
    assert!(json.contains("\"confidence\":0.99"));
}
