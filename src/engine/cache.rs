//! Per-instance cache of query results.

use std::collections::HashMap;

use super::state::MatchSet;

/// Query results keyed on the exact normalized query text.
///
/// Entries never expire on their own. The cache lives as long as the engine
/// instance that owns it; hosts that rebind one instance to different data
/// call [`MatchCache::clear`] (through the engine) when they do.
#[derive(Debug)]
pub struct MatchCache<T> {
    entries: HashMap<String, MatchSet<T>>,
    enabled: bool,
}

impl<T> MatchCache<T> {
    /// Create a cache; a disabled cache never stores anything
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: HashMap::new(),
            enabled,
        }
    }

    /// Look up the results stored for `query`
    pub fn get(&self, query: &str) -> Option<&MatchSet<T>> {
        if !self.enabled {
            return None;
        }
        self.entries.get(query)
    }

    /// Store results for `query`, replacing any earlier entry
    pub fn put(&mut self, query: impl Into<String>, set: MatchSet<T>) {
        if self.enabled {
            self.entries.insert(query.into(), set);
        }
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(query: &str, items: &[&str]) -> MatchSet<String> {
        MatchSet {
            query: query.to_string(),
            seq: 1,
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_put_then_get() {
        let mut cache = MatchCache::new(true);
        cache.put("al", set("al", &["Alabama", "Alaska"]));

        let hit = cache.get("al").unwrap();
        assert_eq!(hit.items, vec!["Alabama", "Alaska"]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_key_is_case_sensitive() {
        let mut cache = MatchCache::new(true);
        cache.put("al", set("al", &["Alabama"]));

        assert!(cache.get("AL").is_none());
        assert!(cache.get("al").is_some());
    }

    #[test]
    fn test_disabled_cache_stores_nothing() {
        let mut cache = MatchCache::new(false);
        cache.put("al", set("al", &["Alabama"]));

        assert!(cache.get("al").is_none());
        assert!(cache.is_empty());
        assert!(!cache.is_enabled());
    }

    #[test]
    fn test_clear() {
        let mut cache = MatchCache::new(true);
        cache.put("a", set("a", &["Arizona"]));
        cache.put("b", set("b", &[]));
        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }
}
