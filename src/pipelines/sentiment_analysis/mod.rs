//! Sentiment analysis pipeline for classifying text emotional tone.
//!
//! Pairs a pretrained sentiment classification model with its tokenizer and
//! exposes single-text and whole-batch prediction. The batch path issues one
//! forward pass for all inputs, which is what the dashboard's analyzer uses.
//!
//! ## Main Types
//!
//! - [`SentimentAnalysisPipeline`] - High-level interface for sentiment classification
//! - [`SentimentAnalysisPipelineBuilder`] - Builder pattern for pipeline configuration
//! - [`SentimentAnalysisModel`] - Trait for sentiment analysis model implementations
//! - [`DistilBertVariant`] - Available pretrained checkpoint options
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use sentiscope::pipelines::sentiment_analysis::*;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let pipeline = SentimentAnalysisPipelineBuilder::distilbert(DistilBertVariant::SstEnglish)
//!     .build()
//!     .await?;
//!
//! let result = pipeline.predict("I love this product!")?;
//! println!("Sentiment: {} (confidence: {:.2})", result.label, result.score);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod model;
pub mod pipeline;

pub use builder::SentimentAnalysisPipelineBuilder;
pub use model::SentimentAnalysisModel;
pub use pipeline::{SentimentAnalysisPipeline, SentimentResult};

pub use crate::models::DistilBertVariant;
