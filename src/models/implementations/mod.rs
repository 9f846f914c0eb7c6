pub mod distilbert;

pub use distilbert::{DistilBertVariant, SentimentDistilBertModel};
