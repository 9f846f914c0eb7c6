use super::model::SentimentAnalysisModel;
use tokenizers::Tokenizer;

/// Raw classifier output for one text: the predicted label string as the
/// checkpoint spells it, and the model's confidence in [0, 1].
#[derive(Debug, Clone)]
pub struct SentimentResult {
    pub label: String,
    pub score: f32,
}

pub struct SentimentAnalysisPipeline<M: SentimentAnalysisModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipeline<M> {
    /// Predict the sentiment of a single text.
    pub fn predict(&self, text: &str) -> anyhow::Result<SentimentResult> {
        self.model.predict(&self.tokenizer, text)
    }

    /// Predict sentiment for a whole batch with one model invocation.
    ///
    /// Returns one result per input, in input order.
    pub fn predict_batch(&self, texts: &[String]) -> anyhow::Result<Vec<SentimentResult>> {
        self.model.predict_batch(&self.tokenizer, texts)
    }

    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}
