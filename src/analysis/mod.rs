//! Batch sentiment analysis over user-supplied texts.
//!
//! The analyzer pairs an injected classifier handle with a keyword
//! extraction policy and turns a list of raw texts into a [`ResultSet`] of
//! typed records, one per input, in input order. It is a pure transformation
//! per call: the only long-lived state is the loaded classifier, which is
//! owned by the pipeline layer.

mod analyzer;
mod classifier;
mod record;

pub use analyzer::Analyzer;
pub use classifier::SentimentClassifier;
pub use record::{AnalysisRecord, Label, ResultSet, UnknownLabel};
