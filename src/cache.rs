//! Parse cache keyed by input path and validated by content digest.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::ExtractError;
use crate::parser::parse_go;
use crate::parser::syntax::SyntaxFile;

type ContentDigest = [u8; 32];

struct CacheEntry {
    digest: ContentDigest,
    syntax: Arc<SyntaxFile>,
}

/// Counters for a [`ParseCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Concurrent map from file path to its lowered syntax.
///
/// Lookups take shard read locks, so concurrent hits do not block each other.
/// The caller always re-reads the file; an entry whose digest differs from
/// the fresh content is re-parsed and replaced, so a changed file is never
/// served from a stale tree.
#[derive(Default)]
pub struct ParseCache {
    entries: DashMap<PathBuf, CacheEntry>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached syntax for `path` if `source` matches what was parsed, else parse and store.
    pub fn get_or_parse(
        &self,
        path: &Path,
        source: &str,
        file_id: &str,
    ) -> Result<Arc<SyntaxFile>, ExtractError> {
        let digest: ContentDigest = Sha256::digest(source.as_bytes()).into();

        if let Some(entry) = self.entries.get(path) {
            if entry.digest == digest {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(path = %path.display(), "parse cache hit");
                return Ok(Arc::clone(&entry.syntax));
            }
            debug!(path = %path.display(), "parse cache entry is stale");
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let syntax = Arc::new(parse_go(source, file_id)?);
        debug!(
            path = %path.display(),
            digest = %hex::encode(&digest[..8]),
            "parse cache store"
        );
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                digest,
                syntax: Arc::clone(&syntax),
            },
        );
        Ok(syntax)
    }

    /// Drop the entry for `path`. Returns whether one existed.
    pub fn invalidate(&self, path: &Path) -> bool {
        let removed = self.entries.remove(path).is_some();
        if removed {
            debug!(path = %path.display(), "parse cache invalidated");
        }
        removed
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

impl std::fmt::Debug for ParseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseCache").field("stats", &self.stats()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "package main\n\n// F doc\nfunc F() {}\n";

    #[test]
    fn test_second_lookup_hits() {
        let cache = ParseCache::new();
        let path = Path::new("/virtual/a.go");
        let first = cache.get_or_parse(path, SOURCE, "a.go").unwrap();
        let second = cache.get_or_parse(path, SOURCE, "a.go").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn test_changed_content_reparses() {
        let cache = ParseCache::new();
        let path = Path::new("/virtual/a.go");
        let first = cache.get_or_parse(path, SOURCE, "a.go").unwrap();
        let changed = format!("{SOURCE}\n// G doc\nfunc G() {{}}\n");
        let second = cache.get_or_parse(path, &changed, "a.go").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.decls.len(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_parse_error_is_not_cached() {
        let cache = ParseCache::new();
        let path = Path::new("/virtual/bad.go");
        assert!(cache.get_or_parse(path, "func {", "bad.go").is_err());
        assert!(!cache.contains(path));
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = ParseCache::new();
        cache.get_or_parse(Path::new("/v/a.go"), SOURCE, "a.go").unwrap();
        cache.get_or_parse(Path::new("/v/b.go"), SOURCE, "b.go").unwrap();
        assert!(cache.invalidate(Path::new("/v/a.go")));
        assert!(!cache.invalidate(Path::new("/v/a.go")));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
