use std::{path::PathBuf, sync::Arc};

/// Failure to turn a (path, point size) pair into a loaded font.
///
/// Produced by a [`FontLoader`](crate::loader::FontLoader) and handed back to
/// the caller of [`FontCache::get`](crate::cache::FontCache::get) untouched.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    #[error("font file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read font file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("failed to parse font file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("invalid point size {0}, expected a positive size")]
    InvalidPointSize(u16),

    #[error("font subsystem unavailable: {0}")]
    Subsystem(String),

    #[error("{0:#}")]
    Other(Arc<anyhow::Error>),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound { path };
        }
        Self::Io {
            path,
            source: Arc::new(source),
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<anyhow::Error> for LoadError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
