pub mod analysis;
pub mod cli;
pub mod core;
pub mod input;
pub mod keywords;
pub mod models;
pub mod pipelines;
pub mod report;

// Re-export the types most callers need so `use sentiscope::Analyzer;`
// works without digging through the module tree.
pub use analysis::{AnalysisRecord, Analyzer, Label, ResultSet, SentimentClassifier};
pub use keywords::KeywordExtractor;
pub use models::{DistilBertVariant, SentimentDistilBertModel};
pub use pipelines::sentiment_analysis::{
    SentimentAnalysisPipeline, SentimentAnalysisPipelineBuilder, SentimentResult,
};
