// Integration tests for the sentiment analysis pipeline against the real
// pretrained checkpoint. These download model weights on first run, so they
// are ignored by default; run with `cargo test -- --ignored` when network
// access (or a warm Hugging Face cache) is available.

use sentiscope::pipelines::sentiment_analysis::*;
use sentiscope::{Analyzer, KeywordExtractor};

#[tokio::test]
#[ignore = "downloads the pretrained checkpoint"]
async fn basic_sentiment() -> anyhow::Result<()> {
    let pipeline = SentimentAnalysisPipelineBuilder::distilbert(DistilBertVariant::SstEnglish)
        .cpu()
        .build()
        .await?;

    let result = pipeline.predict("I love Rust!")?;
    assert!(!result.label.trim().is_empty());
    assert!((0.0..=1.0).contains(&result.score));
    Ok(())
}

#[tokio::test]
#[ignore = "downloads the pretrained checkpoint"]
async fn batch_prediction_preserves_order() -> anyhow::Result<()> {
    let pipeline = SentimentAnalysisPipelineBuilder::distilbert(DistilBertVariant::SstEnglish)
        .cpu()
        .build()
        .await?;

    let texts = vec![
        "I love this app!".to_string(),
        "The service was terrible.".to_string(),
        "It was okay, nothing special.".to_string(),
        "I'm not happy with the results.".to_string(),
    ];
    let results = pipeline.predict_batch(&texts)?;

    assert_eq!(results.len(), texts.len());
    for result in &results {
        assert!((0.0..=1.0).contains(&result.score));
    }
    Ok(())
}

#[tokio::test]
#[ignore = "downloads the pretrained checkpoint"]
async fn end_to_end_labels_differ_for_opposite_texts() -> anyhow::Result<()> {
    let pipeline = SentimentAnalysisPipelineBuilder::distilbert(DistilBertVariant::SstEnglish)
        .cpu()
        .build()
        .await?;
    let analyzer = Analyzer::new(pipeline, KeywordExtractor::default());

    let texts = vec![
        "I love this app!".to_string(),
        "The service was terrible.".to_string(),
    ];
    let results = analyzer.batch_analyze(&texts)?;

    assert_eq!(results.len(), 2);
    assert_eq!(results.records[0].text, texts[0]);
    assert_eq!(results.records[1].text, texts[1]);
    assert_ne!(results.records[0].sentiment, results.records[1].sentiment);
    Ok(())
}
