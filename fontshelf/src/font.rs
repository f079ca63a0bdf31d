use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use skrifa::{MetadataProvider, string::StringId};

use crate::error::{LoadError, Result};

/// Vertical metrics of a font at its loaded point size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
    /// Distance between consecutive baselines.
    pub new_line_size: f32,
}

struct FontInner {
    path: PathBuf,
    point_size: u16,
    family_name: Option<String>,
    fontdue: fontdue::Font,
}

/// A font loaded at a specific point size.
///
/// Cloning only bumps a reference count; clones of one load compare equal,
/// separate loads of the same file never do.
#[derive(Clone)]
pub struct Font {
    inner: Arc<FontInner>,
}

impl Font {
    /// Parses `data` as the face at `collection_index`, prepared for `point_size`.
    pub fn from_bytes(
        path: impl Into<PathBuf>,
        data: &[u8],
        point_size: u16,
        collection_index: u32,
    ) -> Result<Self> {
        let path = path.into();
        if point_size == 0 {
            return Err(LoadError::InvalidPointSize(point_size));
        }

        let settings = fontdue::FontSettings {
            collection_index,
            scale: f32::from(point_size),
            ..Default::default()
        };
        let fontdue =
            fontdue::Font::from_bytes(data, settings).map_err(|err| LoadError::parse(&path, err))?;

        // The name table is optional metadata; a font without one still loads.
        let family_name = skrifa::FontRef::from_index(data, collection_index)
            .ok()
            .and_then(|font| {
                font.localized_strings(StringId::FAMILY_NAME)
                    .english_or_first()
                    .map(|name| name.to_string())
            });

        Ok(Self {
            inner: Arc::new(FontInner {
                path,
                point_size,
                family_name,
                fontdue,
            }),
        })
    }

    /// The file this font was loaded from, after search-path resolution.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    pub fn point_size(&self) -> u16 {
        self.inner.point_size
    }

    pub fn family_name(&self) -> Option<&str> {
        self.inner.family_name.as_deref()
    }

    pub fn glyph_count(&self) -> u16 {
        self.inner.fontdue.glyph_count()
    }

    pub fn units_per_em(&self) -> f32 {
        self.inner.fontdue.units_per_em()
    }

    /// Horizontal line metrics scaled to the point size, if the font has them.
    pub fn line_metrics(&self) -> Option<LineMetrics> {
        self.inner
            .fontdue
            .horizontal_line_metrics(f32::from(self.inner.point_size))
            .map(|m| LineMetrics {
                ascent: m.ascent,
                descent: m.descent,
                line_gap: m.line_gap,
                new_line_size: m.new_line_size,
            })
    }

    pub fn has_glyph(&self, ch: char) -> bool {
        self.inner.fontdue.lookup_glyph_index(ch) != 0
    }

    /// Access to the parsed font for callers that rasterize on their own.
    pub fn fontdue(&self) -> &fontdue::Font {
        &self.inner.fontdue
    }

    /// Returns true if both handles come from the same load.
    pub fn ptr_eq(a: &Font, b: &Font) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        Font::ptr_eq(self, other)
    }
}

impl Eq for Font {}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("path", &self.inner.path)
            .field("point_size", &self.inner.point_size)
            .field("family_name", &self.inner.family_name)
            .finish_non_exhaustive()
    }
}
