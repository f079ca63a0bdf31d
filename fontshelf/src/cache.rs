use std::{
    fmt,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use lru::LruCache;

use crate::{
    config::{CacheConfig, PreloadEntry},
    error::{LoadError, Result},
    loader::FontLoader,
};

/// Identifies one loadable font resource.
///
/// The path is kept exactly as requested, so `"a.ttf"` and `"./a.ttf"` are
/// different keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    pub path: PathBuf,
    pub point_size: u16,
}

impl CacheKey {
    pub fn new(path: impl Into<PathBuf>, point_size: u16) -> Self {
        Self {
            path: path.into(),
            point_size,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}pt", self.path.display(), self.point_size)
    }
}

/// Counters describing how the cache has been used so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    /// Requests that called the loader, successful or not.
    pub misses: u64,
    pub loads: u64,
    pub failures: u64,
    pub evictions: u64,
}

struct State<H> {
    entries: LruCache<CacheKey, H>,
    stats: CacheStats,
}

/// Memoizes font loads by `(path, point size)`.
///
/// Lookup, load and insert for a request happen under one lock, so a key is
/// loaded at most once while it stays resident even with concurrent callers.
/// Failed loads are never cached.
pub struct FontCache<L: FontLoader> {
    loader: L,
    capacity: Option<NonZeroUsize>,
    state: Mutex<State<L::Handle>>,
}

impl<L: FontLoader> FontCache<L> {
    /// Creates an unbounded cache.
    pub fn new(loader: L) -> Self {
        Self::with_capacity(loader, None)
    }

    /// Creates a cache holding at most `capacity` fonts, evicting the least
    /// recently requested one when full.
    pub fn bounded(loader: L, capacity: NonZeroUsize) -> Self {
        Self::with_capacity(loader, Some(capacity))
    }

    pub fn with_config(loader: L, config: &CacheConfig) -> Self {
        Self::with_capacity(loader, config.capacity)
    }

    fn with_capacity(loader: L, capacity: Option<NonZeroUsize>) -> Self {
        let entries = match capacity {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        Self {
            loader,
            capacity,
            state: Mutex::new(State {
                entries,
                stats: CacheStats::default(),
            }),
        }
    }

    /// Returns the font for `path` at `point_size`, loading it on first use.
    pub fn get(&self, path: impl AsRef<Path>, point_size: u16) -> Result<L::Handle> {
        let path = path.as_ref();
        let mut guard = self.lock();
        let state = &mut *guard;

        let key = CacheKey::new(path, point_size);
        if let Some(handle) = state.entries.get(&key) {
            state.stats.hits += 1;
            tracing::trace!(%key, "font cache hit");
            return Ok(handle.clone());
        }

        state.stats.misses += 1;
        let handle = match self.loader.load(path, point_size) {
            Ok(handle) => handle,
            Err(err) => {
                state.stats.failures += 1;
                tracing::debug!(%key, "failed to load font: {err}");
                return Err(err);
            }
        };
        state.stats.loads += 1;
        tracing::debug!(%key, "loaded font");

        if let Some((evicted, _)) = state.entries.push(key, handle.clone()) {
            state.stats.evictions += 1;
            tracing::debug!(key = %evicted, "evicted font");
        }

        Ok(handle)
    }

    /// Returns true if the font is resident. Does not count as a use.
    pub fn contains(&self, path: impl AsRef<Path>, point_size: u16) -> bool {
        self.lock()
            .entries
            .contains(&CacheKey::new(path.as_ref(), point_size))
    }

    /// Returns the resident font without loading it, counting a hit, or
    /// promoting it in LRU order.
    pub fn peek(&self, path: impl AsRef<Path>, point_size: u16) -> Option<L::Handle> {
        self.lock()
            .entries
            .peek(&CacheKey::new(path.as_ref(), point_size))
            .cloned()
    }

    /// Drops the cache's reference to a font. Handles held elsewhere stay valid.
    pub fn remove(&self, path: impl AsRef<Path>, point_size: u16) -> Option<L::Handle> {
        self.lock()
            .entries
            .pop(&CacheKey::new(path.as_ref(), point_size))
    }

    /// Drops every cached font.
    pub fn clear(&self) {
        let mut state = self.lock();
        let count = state.entries.len();
        state.entries.clear();
        tracing::debug!(count, "cleared font cache");
    }

    /// Loads every listed font, collecting failures instead of stopping at the
    /// first one.
    pub fn preload(&self, entries: &[PreloadEntry]) -> Vec<(CacheKey, LoadError)> {
        let mut failures = Vec::new();
        for entry in entries {
            for &size in &entry.sizes {
                if let Err(err) = self.get(&entry.path, size) {
                    failures.push((CacheKey::new(&entry.path, size), err));
                }
            }
        }
        failures
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    /// Resident keys in sorted order.
    pub fn keys(&self) -> Vec<CacheKey> {
        let mut keys: Vec<_> = self.lock().entries.iter().map(|(k, _)| k.clone()).collect();
        keys.sort();
        keys
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    // Every update to `State` is completed before anything that can panic, so
    // a poisoned lock still guards a consistent map.
    fn lock(&self) -> MutexGuard<'_, State<L::Handle>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<L: FontLoader> fmt::Debug for FontCache<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("FontCache")
            .field("len", &state.entries.len())
            .field("capacity", &self.capacity)
            .field("stats", &state.stats)
            .finish_non_exhaustive()
    }
}
