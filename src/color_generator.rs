use std::hash::Hash;

use rand::Rng;

use crate::color::Color;

const DEFAULT_PALETTE: [Color; 9] = [
    Color(0xFFF1_6364),
    Color(0xFFF5_8559),
    Color(0xFFF9_A43E),
    Color(0xFFE4_C62E),
    Color(0xFF67_BF74),
    Color(0xFF59_A2BE),
    Color(0xFF20_93CD),
    Color(0xFFAD_62A7),
    Color(0xFF80_5781),
];

const MATERIAL_PALETTE: [Color; 17] = [
    Color(0xFFE5_7373),
    Color(0xFFF0_6292),
    Color(0xFFBA_68C8),
    Color(0xFF95_75CD),
    Color(0xFF79_86CB),
    Color(0xFF64_B5F6),
    Color(0xFF4F_C3F7),
    Color(0xFF4D_D0E1),
    Color(0xFF4D_B6AC),
    Color(0xFF81_C784),
    Color(0xFFAE_D581),
    Color(0xFFFF_8A65),
    Color(0xFFD4_E157),
    Color(0xFFFF_D54F),
    Color(0xFFFF_B74D),
    Color(0xFFA1_887F),
    Color(0xFF90_A4AE),
];

/// Picks background colors from a fixed palette.
///
/// [`ColorGenerator::color_for`] is stable: the same key always maps to the
/// same color, so a contact keeps its color across redraws and runs.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorGenerator {
    colors: Vec<Color>,
}

impl ColorGenerator {
    /// Returns `None` for an empty palette.
    pub fn new(colors: impl Into<Vec<Color>>) -> Option<Self> {
        let colors = colors.into();
        (!colors.is_empty()).then_some(Self { colors })
    }

    /// Nine muted flat colors.
    pub fn default_palette() -> Self {
        Self {
            colors: DEFAULT_PALETTE.to_vec(),
        }
    }

    /// The Material Design 300 shades.
    pub fn material() -> Self {
        Self {
            colors: MATERIAL_PALETTE.to_vec(),
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn color_for<K: Hash + ?Sized>(&self, key: &K) -> Color {
        let index = fxhash::hash64(key) % self.colors.len() as u64;
        self.colors[index as usize]
    }

    pub fn random_color(&self) -> Color {
        let index = rand::rng().random_range(0..self.colors.len());
        self.colors[index]
    }
}

impl Default for ColorGenerator {
    fn default() -> Self {
        Self::default_palette()
    }
}
