use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use once_cell::sync::OnceCell;

use crate::{cache::FontCache, config::CacheConfig, loader::FileLoader};

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc", "otc"];
const MAX_SCAN_DEPTH: usize = 8;

static SYSTEM: OnceCell<FontSystem> = OnceCell::new();

/// Font files found under a set of root directories, keyed by file name.
///
/// Lookups ignore ASCII case. When two roots contain the same file name the
/// one scanned first wins.
#[derive(Debug, Default)]
pub struct FontIndex {
    files: HashMap<String, PathBuf>,
}

impl FontIndex {
    pub fn scan<P: AsRef<Path>>(roots: &[P]) -> Self {
        let mut index = Self::default();
        for root in roots {
            index.scan_dir(root.as_ref(), 0);
        }
        index
    }

    fn scan_dir(&mut self, dir: &Path, depth: usize) {
        if depth > MAX_SCAN_DEPTH {
            return;
        }
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(dir = %dir.display(), "skipping font directory: {err}");
                return;
            }
        };

        // Sorted so the winner among duplicates does not depend on readdir order.
        let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.scan_dir(&path, depth + 1);
            } else if is_font_file(&path)
                && let Some(name) = path.file_name().and_then(|name| name.to_str())
            {
                self.files
                    .entry(name.to_ascii_lowercase())
                    .or_insert(path);
            }
        }
    }

    pub fn find(&self, file_name: &str) -> Option<&Path> {
        self.files
            .get(&file_name.to_ascii_lowercase())
            .map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FONT_EXTENSIONS.iter().any(|f| ext.eq_ignore_ascii_case(f)))
}

/// Directories where the platform keeps installed fonts.
pub fn default_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(user) = dirs::font_dir() {
        dirs.push(user);
    }

    #[cfg(target_os = "linux")]
    dirs.extend(
        ["/usr/share/fonts", "/usr/local/share/fonts"]
            .into_iter()
            .map(PathBuf::from),
    );

    #[cfg(target_os = "macos")]
    dirs.extend(
        ["/Library/Fonts", "/System/Library/Fonts"]
            .into_iter()
            .map(PathBuf::from),
    );

    #[cfg(target_os = "windows")]
    if let Some(windir) = std::env::var_os("WINDIR") {
        dirs.push(PathBuf::from(windir).join("Fonts"));
    }

    dirs
}

/// The font subsystem every loader built by this crate relies on.
///
/// Initialization scans the platform font directories once; bare file names
/// that are not found elsewhere resolve through that index.
#[derive(Debug)]
pub struct FontSystem {
    roots: Vec<PathBuf>,
    index: Arc<FontIndex>,
}

impl FontSystem {
    /// Initializes the process-wide font system. Later calls return the same
    /// instance without rescanning.
    pub fn init() -> &'static FontSystem {
        SYSTEM.get_or_init(|| Self::from_roots(default_font_dirs()))
    }

    /// Returns the process-wide font system if [`FontSystem::init`] has run.
    pub fn get() -> Option<&'static FontSystem> {
        SYSTEM.get()
    }

    /// Builds a font system over explicit root directories.
    pub fn from_roots(roots: Vec<PathBuf>) -> Self {
        let index = FontIndex::scan(&roots);
        tracing::info!(
            roots = roots.len(),
            fonts = index.len(),
            "initialized font system"
        );
        Self {
            roots,
            index: Arc::new(index),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn index(&self) -> &FontIndex {
        &self.index
    }

    /// A file loader using the configured search directories, falling back to
    /// this system's index when `system_fonts` is enabled.
    pub fn loader(&self, config: &CacheConfig) -> FileLoader {
        let loader = config.file_loader();
        if config.system_fonts {
            loader.with_index(Arc::clone(&self.index))
        } else {
            loader
        }
    }

    pub fn cache(&self, config: &CacheConfig) -> FontCache<FileLoader> {
        FontCache::with_config(self.loader(config), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, b"stub")
    }

    #[test]
    fn scan_finds_nested_font_files() -> anyhow::Result<()> {
        let root = tempfile::tempdir()?;
        touch(&root.path().join("truetype/dejavu/DejaVuSans.ttf"))?;
        touch(&root.path().join("opentype/Inter.OTF"))?;
        touch(&root.path().join("README.txt"))?;

        let index = FontIndex::scan(&[root.path()]);
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.find("dejavusans.ttf"),
            Some(root.path().join("truetype/dejavu/DejaVuSans.ttf").as_path())
        );
        assert!(index.find("inter.otf").is_some());
        assert!(index.find("README.txt").is_none());
        Ok(())
    }

    #[test]
    fn earlier_roots_win() -> anyhow::Result<()> {
        let user = tempfile::tempdir()?;
        let system = tempfile::tempdir()?;
        touch(&user.path().join("Mono.ttf"))?;
        touch(&system.path().join("Mono.ttf"))?;

        let index = FontIndex::scan(&[user.path(), system.path()]);
        assert_eq!(
            index.find("Mono.ttf"),
            Some(user.path().join("Mono.ttf").as_path())
        );
        Ok(())
    }

    #[test]
    fn missing_roots_are_skipped() {
        let index = FontIndex::scan(&["/nonexistent-fontshelf-root"]);
        assert!(index.is_empty());
    }

    #[test]
    fn loader_ignores_index_when_system_fonts_disabled() -> anyhow::Result<()> {
        let root = tempfile::tempdir()?;
        touch(&root.path().join("Mono.ttf"))?;
        let system = FontSystem::from_roots(vec![root.path().to_path_buf()]);

        let with_index = system.loader(&CacheConfig::default());
        assert_eq!(
            with_index.resolve(Path::new("Mono.ttf"))?,
            root.path().join("Mono.ttf")
        );

        let config = CacheConfig {
            system_fonts: false,
            ..Default::default()
        };
        assert!(system.loader(&config).resolve(Path::new("Mono.ttf")).is_err());
        Ok(())
    }
}
