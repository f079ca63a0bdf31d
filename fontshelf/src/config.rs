use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

use crate::loader::FileLoader;

/// Cache settings, usually read from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Maximum number of resident fonts; `None` never evicts.
    pub capacity: Option<NonZeroUsize>,
    pub search_dirs: Vec<PathBuf>,
    /// Resolve bare file names through the installed system fonts.
    pub system_fonts: bool,
    pub collection_index: u32,
    pub preload: Vec<PreloadEntry>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: None,
            search_dirs: Vec::new(),
            system_fonts: true,
            collection_index: 0,
            preload: Vec::new(),
        }
    }
}

/// A font file to load ahead of time at one or more sizes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreloadEntry {
    pub path: PathBuf,
    pub sizes: Vec<u16>,
}

impl CacheConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid font cache configuration")
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Builds the file loader these settings describe.
    pub fn file_loader(&self) -> FileLoader {
        FileLoader::new()
            .with_search_dirs(self.search_dirs.iter().cloned())
            .with_collection_index(self.collection_index)
    }
}
