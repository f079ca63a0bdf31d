//! SDL2_ttf backed loading, for programs that render through SDL.

use std::{path::Path, rc::Rc};

use sdl2::ttf::{Font as TtfFont, Sdl2TtfContext};

use crate::{
    error::{LoadError, Result},
    loader::{FileLoader, FontLoader},
};

/// An initialized SDL_ttf subsystem. Fonts loaded through it borrow it, so
/// it must outlive every cache built on top of it.
pub struct SdlSystem {
    context: Sdl2TtfContext,
}

impl SdlSystem {
    pub fn init() -> Result<Self> {
        let context = sdl2::ttf::init().map_err(|err| LoadError::Subsystem(err.to_string()))?;
        tracing::info!("initialized SDL_ttf");
        Ok(Self { context })
    }

    /// A loader resolving paths the same way `files` does.
    pub fn loader(&self, files: FileLoader) -> SdlLoader<'_> {
        SdlLoader {
            context: &self.context,
            files,
        }
    }
}

pub struct SdlLoader<'ttf> {
    context: &'ttf Sdl2TtfContext,
    files: FileLoader,
}

impl<'ttf> FontLoader for SdlLoader<'ttf> {
    type Handle = Rc<TtfFont<'ttf, 'static>>;

    fn load(&self, path: &Path, point_size: u16) -> Result<Self::Handle> {
        if point_size == 0 {
            return Err(LoadError::InvalidPointSize(point_size));
        }

        let resolved = self.files.resolve(path)?;
        let font = self
            .context
            .load_font(&resolved, point_size)
            .map_err(|err| LoadError::parse(&resolved, err))?;
        Ok(Rc::new(font))
    }
}
