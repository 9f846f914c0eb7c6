use super::pipeline::SentimentResult;
use tokenizers::Tokenizer;

/// Trait implemented by sentiment classification model backends.
pub trait SentimentAnalysisModel {
    type Options: std::fmt::Debug + Clone;

    fn new(options: Self::Options, device: candle_core::Device) -> anyhow::Result<Self>
    where
        Self: Sized;

    fn predict(&self, tokenizer: &Tokenizer, text: &str) -> anyhow::Result<SentimentResult>;

    /// Classify all texts with a single model invocation, preserving input
    /// order.
    fn predict_batch(
        &self,
        tokenizer: &Tokenizer,
        texts: &[String],
    ) -> anyhow::Result<Vec<SentimentResult>>;

    fn get_tokenizer(options: Self::Options) -> anyhow::Result<Tokenizer>;

    fn device(&self) -> &candle_core::Device;
}
