use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::raster::RasterImage;

/// Explicit decoded-image cache, keyed by source URL or path.
///
/// Owned by the hosting application and passed by reference into the diff
/// and sampling layers; there is no process-wide ambient cache. Entries are
/// shared read-only handles. When a capacity is set, the least recently
/// used entry is evicted on overflow.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, Arc<RasterImage>>,
    // Most recently used at the back.
    order: VecDeque<String>,
    capacity: Option<usize>,
}

impl ImageCache {
    /// Unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `capacity` decoded images.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, image: RasterImage) -> Arc<RasterImage> {
        let key = key.into();
        let handle = Arc::new(image);
        if self.entries.insert(key.clone(), handle.clone()).is_none() {
            self.order.push_back(key);
            self.evict_over_capacity();
        } else {
            self.touch(&key);
        }
        handle
    }

    pub fn get(&mut self, key: &str) -> Option<Arc<RasterImage>> {
        let handle = self.entries.get(key).cloned()?;
        self.touch(key);
        Some(handle)
    }

    /// Fetch from the cache, or decode via `loader` and cache the result.
    pub fn get_or_load(
        &mut self,
        key: &str,
        loader: impl FnOnce() -> Result<RasterImage>,
    ) -> Result<Arc<RasterImage>> {
        if let Some(handle) = self.get(key) {
            return Ok(handle);
        }
        debug!(key, "image cache miss");
        let image = loader()?;
        Ok(self.insert(key, image))
    }

    /// Drop a single entry, e.g. when the host knows the source changed.
    pub fn invalidate(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            let key = self.order.remove(pos).expect("position is in range");
            self.order.push_back(key);
        }
    }

    fn evict_over_capacity(&mut self) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while self.entries.len() > capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            debug!(key = %oldest, "evicting cached image");
            self.entries.remove(&oldest);
        }
    }
}
