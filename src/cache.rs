use std::collections::HashMap;
use std::sync::RwLock;

/// Per-route cache of rendered page payloads.
///
/// Page handlers store their response body under the dashboard route path
/// and mutation handlers invalidate exactly the route that lists the table
/// they wrote to. Invalidation is per-path; a venue delete drops `/venues`
/// and nothing else.
#[derive(Default)]
pub struct PageCache {
    pages: RwLock<HashMap<String, serde_json::Value>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<serde_json::Value> {
        let pages = self.pages.read().ok()?;
        pages.get(path).cloned()
    }

    pub fn store(&self, path: &str, body: serde_json::Value) {
        if let Ok(mut pages) = self.pages.write() {
            pages.insert(path.to_string(), body);
        }
    }

    /// Drop the cached copy of one route. Returns whether a copy existed.
    pub fn invalidate(&self, path: &str) -> bool {
        match self.pages.write() {
            Ok(mut pages) => pages.remove(path).is_some(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_and_get() {
        let cache = PageCache::new();
        assert!(cache.get("/venues").is_none());

        cache.store("/venues", json!({"rows": 3}));
        assert_eq!(cache.get("/venues"), Some(json!({"rows": 3})));
    }

    #[test]
    fn test_invalidate_only_touches_named_path() {
        let cache = PageCache::new();
        cache.store("/venues", json!({"rows": 3}));
        cache.store("/credits", json!({"rows": 9}));

        assert!(cache.invalidate("/venues"));
        assert!(cache.get("/venues").is_none());
        assert_eq!(cache.get("/credits"), Some(json!({"rows": 9})));

        // Second invalidation finds nothing to drop.
        assert!(!cache.invalidate("/venues"));
    }
}
