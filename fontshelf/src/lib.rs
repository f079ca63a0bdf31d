//! Memoized font loading.
//!
//! A [`FontCache`] hands out one shared handle per `(path, point size)` and
//! only calls its [`FontLoader`] the first time a key is requested. The
//! built-in [`FileLoader`] reads fonts from disk with `fontdue`; enable the
//! `sdl2` feature to load through SDL_ttf instead.

pub mod cache;
pub mod config;
pub mod error;
pub mod font;
pub mod global;
pub mod loader;
#[cfg(feature = "sdl2")]
pub mod sdl;
pub mod system;

pub use cache::{CacheKey, CacheStats, FontCache};
pub use config::{CacheConfig, PreloadEntry};
pub use error::LoadError;
pub use font::{Font, LineMetrics};
pub use loader::{FileLoader, FnLoader, FontLoader};
pub use system::{FontIndex, FontSystem};
