pub mod implementations;

pub use implementations::{DistilBertVariant, SentimentDistilBertModel};
