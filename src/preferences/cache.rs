//! Caller-owned caches for parsed preferences, keyed by the raw input text.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use super::PreferenceParser;
use crate::error::PreferenceError;
use crate::models::UserPreferences;

pub trait PreferenceCache: Send + Sync {
    fn get(&self, key: &str) -> Option<UserPreferences>;
    fn put(&self, key: &str, value: &UserPreferences);
}

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, UserPreferences>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PreferenceCache for MemoryCache {
    fn get(&self, key: &str) -> Option<UserPreferences> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, value: &UserPreferences) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.insert(key.to_string(), value.clone());
        }
    }
}

/// Cache persisted as one JSON object `{ "<input text>": { ...preferences } }`.
///
/// The file is read once when opened (a missing or corrupt file starts an
/// empty cache) and rewritten after every insertion. Write failures are
/// logged and otherwise ignored: losing a cache entry only costs a re-parse.
#[derive(Debug)]
pub struct JsonFileCache {
    path: PathBuf,
    entries: Mutex<HashMap<String, UserPreferences>>,
}

impl JsonFileCache {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("ignoring corrupt preference cache {}: {}", path.display(), e);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        debug!("preference cache {} opened with {} entries", path.display(), entries.len());
        Self { path, entries: Mutex::new(entries) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, entries: &HashMap<String, UserPreferences>) {
        let result = serde_json::to_string_pretty(entries)
            .map_err(std::io::Error::other)
            .and_then(|text| std::fs::write(&self.path, text));
        if let Err(e) = result {
            warn!("could not write preference cache {}: {}", self.path.display(), e);
        }
    }
}

impl PreferenceCache for JsonFileCache {
    fn get(&self, key: &str) -> Option<UserPreferences> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, value: &UserPreferences) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.insert(key.to_string(), value.clone());
            self.save(&guard);
        }
    }
}

/// Parser decorator that answers repeated inputs from a cache.
pub struct CachedParser<P, C> {
    inner: P,
    cache: C,
}

impl<P, C> CachedParser<P, C>
where
    P: PreferenceParser,
    C: PreferenceCache,
{
    pub fn new(inner: P, cache: C) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }
}

impl<P, C> PreferenceParser for CachedParser<P, C>
where
    P: PreferenceParser,
    C: PreferenceCache,
{
    fn parse(&self, text: &str) -> Result<UserPreferences, PreferenceError> {
        if let Some(hit) = self.cache.get(text) {
            debug!("preference cache hit");
            return Ok(hit);
        }
        let parsed = self.inner.parse(text)?;
        self.cache.put(text, &parsed);
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: AtomicUsize,
    }

    impl PreferenceParser for Counting {
        fn parse(&self, _text: &str) -> Result<UserPreferences, PreferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(UserPreferences::new().with_target_credits(18))
        }
    }

    #[test]
    fn test_cached_parser_hits_once() {
        let parser = CachedParser::new(Counting { calls: AtomicUsize::new(0) }, MemoryCache::new());
        let a = parser.parse("18학점").unwrap();
        let b = parser.parse("18학점").unwrap();
        assert_eq!(a, b);
        assert_eq!(parser.inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(parser.cache().len(), 1);
    }

    #[test]
    fn test_json_file_cache_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preference_cache.json");
        let prefs = UserPreferences::new().with_no_class_days(["금"]);
        {
            let cache = JsonFileCache::open(&path);
            assert!(cache.get("금공강").is_none());
            cache.put("금공강", &prefs);
        }
        let reopened = JsonFileCache::open(&path);
        assert_eq!(reopened.get("금공강"), Some(prefs));
    }

    #[test]
    fn test_json_file_cache_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "{not json").unwrap();
        let cache = JsonFileCache::open(&path);
        assert!(cache.get("anything").is_none());
    }
}
