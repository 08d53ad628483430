/// Factor applied to each channel of the background color to get the border color.
pub const SHADE_FACTOR: f32 = 0.9;

/// 32-bit ARGB color, laid out as `0xAARRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const GRAY: Self = Self(0xFF88_8888);
    pub const DARK_GRAY: Self = Self(0xFF44_4444);
    pub const LIGHT_GRAY: Self = Self(0xFFCC_CCCC);
    pub const RED: Self = Self(0xFFFF_0000);
    pub const GREEN: Self = Self(0xFF00_FF00);
    pub const BLUE: Self = Self(0xFF00_00FF);

    /// Opaque color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xFF, r, g, b)
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Opaque color from a `0xRRGGBB` literal. Any alpha bits are ignored.
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(0xFF00_0000 | (rgb & 0x00FF_FFFF))
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | (alpha as u32) << 24)
    }

    /// `[r, g, b, a]` bytes, the order used by [`crate::Pixmap`].
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::argb(rgba[3], rgba[0], rgba[1], rgba[2])
    }

    /// Scales every color channel by `factor`, truncating toward zero.
    ///
    /// The result is always opaque, whatever the alpha of `self`.
    pub fn shade(self, factor: f32) -> Self {
        let scale = |channel: u8| (factor * channel as f32) as u8;
        Self::rgb(scale(self.red()), scale(self.green()), scale(self.blue()))
    }

    /// The border shade used by [`crate::TextDrawable`].
    pub fn darker(self) -> Self {
        self.shade(SHADE_FACTOR)
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Self(argb)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// Post-processing applied to a paint color just before it reaches the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorFilter {
    /// Keeps the source alpha and replaces the color with the filter color (`SRC_IN`).
    SrcIn(Color),
    /// Multiplies every channel, alpha included (`MULTIPLY`).
    Multiply(Color),
}

impl ColorFilter {
    pub fn apply(self, src: Color) -> Color {
        let mul = |a: u8, b: u8| ((a as u16 * b as u16 + 127) / 255) as u8;
        match self {
            ColorFilter::SrcIn(tint) => tint.with_alpha(mul(tint.alpha(), src.alpha())),
            ColorFilter::Multiply(tint) => Color::argb(
                mul(tint.alpha(), src.alpha()),
                mul(tint.red(), src.red()),
                mul(tint.green(), src.green()),
                mul(tint.blue(), src.blue()),
            ),
        }
    }
}
