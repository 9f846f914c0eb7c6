pub mod cache;

pub use cache::{global_cache, ModelCache, ModelOptions};
