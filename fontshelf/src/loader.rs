use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    error::{LoadError, Result},
    font::Font,
    system::FontIndex,
};

/// The capability a [`FontCache`](crate::cache::FontCache) calls on a miss.
///
/// Implementations decide what a valid path is; the cache never inspects
/// the error it gets back.
pub trait FontLoader {
    type Handle: Clone;

    fn load(&self, path: &Path, point_size: u16) -> Result<Self::Handle>;
}

impl<L: FontLoader + ?Sized> FontLoader for &L {
    type Handle = L::Handle;

    fn load(&self, path: &Path, point_size: u16) -> Result<Self::Handle> {
        (**self).load(path, point_size)
    }
}

impl<L: FontLoader + ?Sized> FontLoader for Arc<L> {
    type Handle = L::Handle;

    fn load(&self, path: &Path, point_size: u16) -> Result<Self::Handle> {
        (**self).load(path, point_size)
    }
}

/// Adapts a closure into a loader.
pub struct FnLoader<F>(pub F);

impl<F, H> FontLoader for FnLoader<F>
where
    F: Fn(&Path, u16) -> Result<H>,
    H: Clone,
{
    type Handle = H;

    fn load(&self, path: &Path, point_size: u16) -> Result<H> {
        (self.0)(path, point_size)
    }
}

/// Loads fonts from the filesystem.
///
/// Relative paths that do not exist as given are looked up in each search
/// directory in order, then bare file names in the system font index.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    search_dirs: Vec<PathBuf>,
    index: Option<Arc<FontIndex>>,
    collection_index: u32,
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn with_index(mut self, index: Arc<FontIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Face to pick from `.ttc`/`.otc` collections.
    pub fn with_collection_index(mut self, index: u32) -> Self {
        self.collection_index = index;
        self
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Resolves `path` against the search directories and the system index.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() || path.exists() {
            return Ok(path.to_path_buf());
        }

        if let Some(found) = self
            .search_dirs
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.is_file())
        {
            return Ok(found);
        }

        let bare_name = path
            .to_str()
            .filter(|_| path.parent() == Some(Path::new("")));
        bare_name
            .zip(self.index.as_deref())
            .and_then(|(name, index)| index.find(name))
            .map(Path::to_path_buf)
            .ok_or_else(|| LoadError::NotFound {
                path: path.to_path_buf(),
            })
    }
}

impl FontLoader for FileLoader {
    type Handle = Font;

    fn load(&self, path: &Path, point_size: u16) -> Result<Font> {
        if point_size == 0 {
            return Err(LoadError::InvalidPointSize(point_size));
        }

        let resolved = self.resolve(path)?;
        let data = std::fs::read(&resolved).map_err(|err| LoadError::io(&resolved, err))?;
        tracing::trace!(path = %resolved.display(), bytes = data.len(), "read font file");

        Font::from_bytes(resolved, &data, point_size, self.collection_index)
    }
}
