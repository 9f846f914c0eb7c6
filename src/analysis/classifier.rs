use crate::pipelines::sentiment_analysis::{
    SentimentAnalysisModel, SentimentAnalysisPipeline, SentimentResult,
};

/// Contract the analyzer consumes: classify a whole batch in one call,
/// returning one `(label, score)` per input in input order.
///
/// The pipeline implements this for real inference; tests inject stubs.
pub trait SentimentClassifier {
    fn classify(&self, texts: &[String]) -> anyhow::Result<Vec<SentimentResult>>;
}

impl<M: SentimentAnalysisModel> SentimentClassifier for SentimentAnalysisPipeline<M> {
    fn classify(&self, texts: &[String]) -> anyhow::Result<Vec<SentimentResult>> {
        self.predict_batch(texts)
    }
}
