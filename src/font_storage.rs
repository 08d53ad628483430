use std::{collections::HashMap, fmt, path::Path, sync::Arc};

use crate::font_cache::{FontError, FontLoader, FontStyle};

/// A loaded font face, cheap to clone.
///
/// Two handles compare equal only when they point at the same loaded face,
/// which is what the [`crate::FontCache`] guarantees for repeated lookups.
#[derive(Clone)]
pub struct FontHandle {
    id: fontdb::ID,
    font: Arc<fontdue::Font>,
}

impl FontHandle {
    pub fn id(&self) -> fontdb::ID {
        self.id
    }

    pub fn font(&self) -> &fontdue::Font {
        &self.font
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.font, &b.font)
    }

    /// Vertical metrics at `px`, in y-down convention.
    pub fn metrics(&self, px: f32) -> Option<FontMetrics> {
        let line = self.font.horizontal_line_metrics(px)?;
        Some(FontMetrics {
            ascent: -line.ascent,
            descent: -line.descent,
        })
    }
}

impl PartialEq for FontHandle {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle").field("id", &self.id).finish()
    }
}

/// Distances from the baseline with the y axis pointing down:
/// `ascent` is negative (above the baseline), `descent` positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
}

/// Resolves family names to faces using `fontdb` and rasterizable fonts using `fontdue`.
///
/// Family names follow the Android conventions: the generic families
/// (`serif`, `sans-serif`, `monospace`, `cursive`, `fantasy`) may carry a weight
/// suffix such as `sans-serif-light`; anything else is looked up as a concrete family.
pub struct FontStorage {
    font_db: fontdb::Database,
    /// Faces parsed by fontdue so far, shared by every family name resolving to them.
    loaded_font: HashMap<fontdb::ID, Arc<fontdue::Font>, fxhash::FxBuildHasher>,
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStorage {
    /// Creates a storage with no fonts registered.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            loaded_font: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
        }
    }
}

/// Registering fonts.
impl FontStorage {
    /// Registers every face found in a font file's bytes.
    pub fn load_font_binary(&mut self, data: impl Into<Vec<u8>>) {
        self.font_db.load_font_data(data.into());
    }

    /// Registers every face in the font file at `path`.
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> Result<(), std::io::Error> {
        self.font_db.load_font_file(path)
    }

    /// Registers every font file found under `dir`, recursively.
    pub fn load_fonts_dir(&mut self, dir: impl AsRef<Path>) {
        self.font_db.load_fonts_dir(dir)
    }

    /// Registers the system fonts and points any generic family with no
    /// installed face at one that is installed.
    pub fn load_system_fonts(&mut self) {
        self.font_db.load_system_fonts();
        self.assign_generic_families();
    }

    /// Checks if no face is registered.
    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Number of registered faces.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }

    /// Sets the concrete family behind `sans-serif`.
    pub fn set_sans_serif_family(&mut self, family: impl Into<String>) {
        self.font_db.set_sans_serif_family(family);
    }

    /// Sets the concrete family behind `serif`.
    pub fn set_serif_family(&mut self, family: impl Into<String>) {
        self.font_db.set_serif_family(family);
    }

    /// Sets the concrete family behind `monospace`.
    pub fn set_monospace_family(&mut self, family: impl Into<String>) {
        self.font_db.set_monospace_family(family);
    }

    /// Returns the concrete family a generic family currently maps to.
    pub fn family_name<'a>(&'a self, family: &'a fontdb::Family<'_>) -> &'a str {
        self.font_db.family_name(family)
    }

    /// Returns an iterator over all registered faces.
    pub fn faces(&self) -> impl Iterator<Item = &fontdb::FaceInfo> {
        self.font_db.faces()
    }

    /// Remaps each generic family whose configured family has no registered face.
    ///
    /// `fontdb` defaults to Arial, Times New Roman and so on, which many Linux
    /// hosts lack. The replacement is the shortest matching family name
    /// (`DejaVu Sans` over `DejaVu Sans Condensed`), or any registered family
    /// when nothing looks right. Generic families that already resolve are left alone.
    pub fn assign_generic_families(&mut self) {
        let sans = self.installed_family(fontdb::Family::SansSerif, |face, name| {
            !face.monospaced && name.contains("Sans") && !name.contains("Mono")
        });
        let serif = self.installed_family(fontdb::Family::Serif, |face, name| {
            !face.monospaced && name.contains("Serif") && !name.contains("Sans")
        });
        let monospace = self.installed_family(fontdb::Family::Monospace, |face, name| {
            face.monospaced || name.contains("Mono")
        });
        let cursive_missing = !self.has_family(&fontdb::Family::Cursive);
        let fantasy_missing = !self.has_family(&fontdb::Family::Fantasy);

        if let Some(family) = sans {
            log::debug!("Mapping sans-serif to {:?}", family);
            self.font_db.set_sans_serif_family(family);
        }
        if let Some(family) = serif {
            log::debug!("Mapping serif to {:?}", family);
            self.font_db.set_serif_family(family);
        }
        if let Some(family) = monospace {
            log::debug!("Mapping monospace to {:?}", family);
            self.font_db.set_monospace_family(family);
        }
        // no good guess for these, so they share the body face
        let body = self.family_name(&fontdb::Family::SansSerif).to_string();
        if cursive_missing {
            self.font_db.set_cursive_family(body.clone());
        }
        if fantasy_missing {
            self.font_db.set_fantasy_family(body);
        }
    }

    /// `None` when `generic` already has a face, otherwise the family to map it to.
    fn installed_family(
        &self,
        generic: fontdb::Family<'_>,
        prefer: impl Fn(&fontdb::FaceInfo, &str) -> bool,
    ) -> Option<String> {
        if self.has_family(&generic) {
            return None;
        }
        self.shortest_family(prefer)
            .or_else(|| self.shortest_family(|_, _| true))
    }

    fn shortest_family(&self, filter: impl Fn(&fontdb::FaceInfo, &str) -> bool) -> Option<String> {
        self.faces()
            .filter(|face| face.style == fontdb::Style::Normal)
            .filter_map(|face| {
                let (name, _) = face.families.first()?;
                filter(face, name).then_some(name.as_str())
            })
            .min_by_key(|name| (name.len(), *name))
            .map(str::to_string)
    }

    fn has_family(&self, family: &fontdb::Family<'_>) -> bool {
        let name = self.font_db.family_name(family);
        self.faces()
            .any(|face| face.families.iter().any(|(candidate, _)| candidate == name))
    }
}

/// Resolving faces.
impl FontStorage {
    /// Finds the face for `family` and `style` and parses it if needed.
    pub fn resolve(&mut self, family: &str, style: FontStyle) -> Result<FontHandle, FontError> {
        let (generic, weight) = parse_family(family);
        let families = [generic];
        let query = fontdb::Query {
            families: &families,
            weight: if style.is_bold() {
                fontdb::Weight::BOLD
            } else {
                weight
            },
            stretch: fontdb::Stretch::Normal,
            style: if style.is_italic() {
                fontdb::Style::Italic
            } else {
                fontdb::Style::Normal
            },
        };

        let id = self
            .font_db
            .query(&query)
            .ok_or_else(|| FontError::NotFound {
                family: family.to_string(),
                style,
            })?;

        self.font(id).map(|font| FontHandle { id, font })
    }

    /// Returns the parsed font for a face, parsing it on first use.
    pub fn font(&mut self, id: fontdb::ID) -> Result<Arc<fontdue::Font>, FontError> {
        use std::collections::hash_map::Entry;

        match self.loaded_font.entry(id) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let font_result = self
                    .font_db
                    .with_face_data(id, |data, index| {
                        fontdue::Font::from_bytes(
                            data,
                            fontdue::FontSettings {
                                collection_index: index,
                                ..Default::default()
                            },
                        )
                    })
                    .ok_or(FontError::FaceUnavailable(id))?;

                let font = font_result.map_err(|reason| FontError::Parse {
                    id,
                    reason: reason.to_string(),
                })?;
                log::debug!("Parsed font face {:?}", id);
                Ok(Arc::clone(entry.insert(Arc::new(font))))
            }
        }
    }
}

impl FontLoader for FontStorage {
    type Font = FontHandle;

    fn load(&mut self, family: &str, style: FontStyle) -> Result<FontHandle, FontError> {
        self.resolve(family, style)
    }
}

/// Splits an Android style family name into a `fontdb` family and weight.
fn parse_family(name: &str) -> (fontdb::Family<'_>, fontdb::Weight) {
    const WEIGHTS: &[(&str, fontdb::Weight)] = &[
        ("-thin", fontdb::Weight::THIN),
        ("-light", fontdb::Weight::LIGHT),
        ("-medium", fontdb::Weight::MEDIUM),
        ("-black", fontdb::Weight::BLACK),
    ];

    let (base, weight) = WEIGHTS
        .iter()
        .find_map(|(suffix, weight)| {
            name.strip_suffix(suffix)
                .filter(|base| generic_family(base).is_some())
                .map(|base| (base, *weight))
        })
        .unwrap_or((name, fontdb::Weight::NORMAL));

    let family = generic_family(base).unwrap_or(fontdb::Family::Name(base));
    (family, weight)
}

fn generic_family(name: &str) -> Option<fontdb::Family<'static>> {
    match name {
        "serif" => Some(fontdb::Family::Serif),
        "sans-serif" => Some(fontdb::Family::SansSerif),
        "monospace" => Some(fontdb::Family::Monospace),
        "cursive" => Some(fontdb::Family::Cursive),
        "fantasy" => Some(fontdb::Family::Fantasy),
        _ => None,
    }
}
