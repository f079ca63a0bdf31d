//! A process-wide font cache for code that cannot have one passed in.
//!
//! Nothing is created implicitly: call [`init`] once at startup, then reach
//! the cache through [`instance`] or [`get`].

use std::path::Path;

use once_cell::sync::OnceCell;

use crate::{
    cache::FontCache, config::CacheConfig, error::LoadError, font::Font, loader::FileLoader,
    system::FontSystem,
};

pub type SharedCache = FontCache<FileLoader>;

static CACHE: OnceCell<SharedCache> = OnceCell::new();

#[derive(Debug, thiserror::Error)]
pub enum GlobalError {
    #[error("the global font cache is already initialized")]
    AlreadyInitialized,

    #[error("the global font cache is not initialized")]
    NotInitialized,

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Initializes the font system and the global cache from `config`.
///
/// Fails with [`GlobalError::AlreadyInitialized`] on every call after the first.
pub fn init(config: &CacheConfig) -> Result<&'static SharedCache, GlobalError> {
    let mut created = false;
    let cache = CACHE.get_or_init(|| {
        created = true;
        FontSystem::init().cache(config)
    });
    if !created {
        return Err(GlobalError::AlreadyInitialized);
    }
    tracing::debug!(capacity = ?cache.capacity(), "initialized global font cache");
    Ok(cache)
}

pub fn instance() -> Result<&'static SharedCache, GlobalError> {
    CACHE.get().ok_or(GlobalError::NotInitialized)
}

/// Shorthand for `instance()?.get(path, point_size)`.
pub fn get(path: impl AsRef<Path>, point_size: u16) -> Result<Font, GlobalError> {
    Ok(instance()?.get(path, point_size)?)
}
