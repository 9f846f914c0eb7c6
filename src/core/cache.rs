//! Process-wide cache for loaded classifier models.
//!
//! Loading a pretrained checkpoint is by far the most expensive step of an
//! analysis session, so models are loaded once per process and reused for
//! every subsequent request. Cached models are cloned out of the cache; model
//! types share their underlying weights through `Arc`, so a clone is cheap
//! and read-only.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Trait implemented by model option types to generate a stable cache key.
pub trait ModelOptions {
    fn cache_key(&self) -> String;
}

type CacheStorage = HashMap<(TypeId, String), Arc<dyn Any + Send + Sync>>;

/// A thread-safe cache of loaded model instances, keyed by checkpoint
/// variant and device.
pub struct ModelCache {
    cache: Arc<Mutex<CacheStorage>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get a cached model, or load it with `loader` on first request.
    ///
    /// The key must uniquely identify the checkpoint variant and the device
    /// it was loaded onto.
    pub async fn get_or_create<M, F>(&self, key: &str, loader: F) -> anyhow::Result<M>
    where
        M: Clone + Send + Sync + 'static,
        F: FnOnce() -> anyhow::Result<M>,
    {
        let cache_key = (TypeId::of::<M>(), key.to_string());

        {
            let cache = self.cache.lock().await;
            if let Some(cached) = cache.get(&cache_key) {
                if let Some(model) = cached.downcast_ref::<M>() {
                    return Ok(model.clone());
                }
            }
        }

        let model = loader()?;

        {
            let mut cache = self.cache.lock().await;
            cache.insert(cache_key, Arc::new(model.clone()) as Arc<dyn Any + Send + Sync>);
        }

        Ok(model)
    }

    /// Number of cached models.
    pub async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.lock().await.is_empty()
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Global model cache instance shared by every pipeline builder in the
/// process.
static GLOBAL_MODEL_CACHE: once_cell::sync::Lazy<ModelCache> =
    once_cell::sync::Lazy::new(ModelCache::new);

pub fn global_cache() -> &'static ModelCache {
    &GLOBAL_MODEL_CACHE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestModel {
        id: String,
    }

    #[tokio::test]
    async fn cache_returns_first_loaded_instance() {
        let cache = ModelCache::new();

        let model1 = cache
            .get_or_create::<TestModel, _>("sst2-cpu", || {
                Ok(TestModel {
                    id: "original".to_string(),
                })
            })
            .await
            .unwrap();

        let model2 = cache
            .get_or_create::<TestModel, _>("sst2-cpu", || {
                // Must not be called for a cached key.
                Ok(TestModel {
                    id: "reloaded".to_string(),
                })
            })
            .await
            .unwrap();

        assert_eq!(model1.id, "original");
        assert_eq!(model2.id, "original");
        assert_eq!(cache.len().await, 1);
    }
}
