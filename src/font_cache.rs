use std::collections::HashMap;

use parking_lot::Mutex;

use crate::font_storage::{FontHandle, FontStorage};

/// Typeface style flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("no face matches family {family:?} with style {style:?}")]
    NotFound { family: String, style: FontStyle },
    #[error("face {0:?} has no readable data")]
    FaceUnavailable(fontdb::ID),
    #[error("failed to parse face {id:?}: {reason}")]
    Parse { id: fontdb::ID, reason: String },
}

/// The expensive operation memoized by [`FontCache`].
pub trait FontLoader {
    type Font: Clone;

    fn load(&mut self, family: &str, style: FontStyle) -> Result<Self::Font, FontError>;
}

/// Source of font handles for the drawable builder.
pub trait FontProvider {
    fn font(&self, family: &str, style: FontStyle) -> Option<FontHandle>;
}

type FontKey = (String, FontStyle);

struct CacheState<L: FontLoader> {
    loader: L,
    entries: HashMap<FontKey, L::Font, fxhash::FxBuildHasher>,
}

/// Memoizes font loads by `(family, style)`.
///
/// One lock covers lookup, load and insert, so a key is loaded at most once
/// even when several threads ask for it together. Failed loads are not
/// remembered and are retried on the next call.
pub struct FontCache<L: FontLoader = FontStorage> {
    state: Mutex<CacheState<L>>,
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FontCache {
    /// Creates a cache over an empty [`FontStorage`].
    pub fn new() -> Self {
        Self::with_loader(FontStorage::new())
    }

    /// Creates a cache over a [`FontStorage`] populated with the system fonts.
    pub fn with_system_fonts() -> Self {
        let mut storage = FontStorage::new();
        storage.load_system_fonts();
        log::debug!("Registered {} system font faces", storage.len());
        Self::with_loader(storage)
    }
}

impl<L: FontLoader> FontCache<L> {
    pub fn with_loader(loader: L) -> Self {
        Self {
            state: Mutex::new(CacheState {
                loader,
                entries: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
            }),
        }
    }

    /// Returns the font for `family` and `style`, loading it on first use.
    pub fn get(&self, family: &str, style: FontStyle) -> Option<L::Font> {
        let mut state = self.state.lock();
        let key = (family.to_string(), style);
        if let Some(font) = state.entries.get(&key) {
            return Some(font.clone());
        }

        let loaded = state.loader.load(family, style);
        match loaded {
            Ok(font) => {
                log::debug!("Loaded font {:?} ({:?})", family, style);
                state.entries.insert(key, font.clone());
                Some(font)
            }
            Err(e) => {
                log::warn!("Failed to load font {:?} ({:?}): {}", family, style, e);
                None
            }
        }
    }

    pub fn contains(&self, family: &str, style: FontStyle) -> bool {
        self.state
            .lock()
            .entries
            .contains_key(&(family.to_string(), style))
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Forgets every cached font. Handles already given out stay valid.
    pub fn clear(&self) {
        self.state.lock().entries.clear();
    }

    /// Runs `f` on the loader while holding the cache lock, e.g. to register font data.
    pub fn with_loader_mut<R>(&self, f: impl FnOnce(&mut L) -> R) -> R {
        f(&mut self.state.lock().loader)
    }
}

impl<L: FontLoader<Font = FontHandle>> FontProvider for FontCache<L> {
    fn font(&self, family: &str, style: FontStyle) -> Option<FontHandle> {
        self.get(family, style)
    }
}
