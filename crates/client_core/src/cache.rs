use std::{collections::HashMap, future::Future};

use tokio::sync::Mutex;
use tracing::debug;

struct TagEntry<T> {
    generation: u64,
    value: Option<T>,
}

impl<T> TagEntry<T> {
    fn empty() -> Self {
        Self {
            generation: 0,
            value: None,
        }
    }
}

/// Read-through cache whose entries are invalidated by tag.
///
/// Every invalidation bumps the tag's generation. A fetch only stores its
/// result if the generation it started under is still current, so a
/// response that raced with an invalidation is never served from the cache.
pub struct TagCache<T> {
    entries: Mutex<HashMap<String, TagEntry<T>>>,
}

impl<T: Clone + Send> TagCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get_or_fetch<F, Fut, E>(&self, tag: &str, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let generation = {
            let mut entries = self.entries.lock().await;
            let entry = entries
                .entry(tag.to_string())
                .or_insert_with(TagEntry::empty);
            if let Some(value) = &entry.value {
                debug!(tag, "cache hit");
                return Ok(value.clone());
            }
            entry.generation
        };

        debug!(tag, "cache miss; fetching");
        let value = fetch().await?;

        let mut entries = self.entries.lock().await;
        let entry = entries
            .entry(tag.to_string())
            .or_insert_with(TagEntry::empty);
        if entry.generation == generation {
            entry.value = Some(value.clone());
        } else {
            debug!(tag, "tag invalidated while fetching; result not cached");
        }
        Ok(value)
    }

    pub async fn invalidate(&self, tag: &str) {
        let mut entries = self.entries.lock().await;
        let entry = entries
            .entry(tag.to_string())
            .or_insert_with(TagEntry::empty);
        entry.generation = entry.generation.wrapping_add(1);
        entry.value = None;
    }

    pub async fn is_fresh(&self, tag: &str) -> bool {
        self.entries
            .lock()
            .await
            .get(tag)
            .is_some_and(|entry| entry.value.is_some())
    }
}

impl<T: Clone + Send> Default for TagCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
