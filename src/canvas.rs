//! Painting surfaces and paint state.

mod pixmap;
mod recording;

pub use pixmap::Pixmap;
pub use recording::{DrawOp, RecordingCanvas};

use crate::color::{Color, ColorFilter};
use crate::font_storage::{FontHandle, FontMetrics};

/// Integer bounds a drawable is drawn into (left, top, right, bottom).
pub type Bounds = euclid::default::Box2D<i32>;
/// Float rectangle used for shape geometry.
pub type RectF = euclid::default::Box2D<f32>;

/// Ascent used when a paint carries no font, as a fraction of the text size.
const FALLBACK_ASCENT: f32 = -0.928;
/// Descent used when a paint carries no font, as a fraction of the text size.
const FALLBACK_DESCENT: f32 = 0.244;

/// Shorthand for `Bounds::new(point2(left, top), point2(right, bottom))`.
pub fn bounds(left: i32, top: i32, right: i32, bottom: i32) -> Bounds {
    Bounds::new(euclid::point2(left, top), euclid::point2(right, bottom))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaintStyle {
    #[default]
    Fill,
    /// Outline centered on the shape edge, `stroke_width` wide.
    Stroke,
}

/// Horizontal anchor of `draw_text`'s x coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// How a shape or a run of text gets painted.
#[derive(Clone, Debug, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    pub stroke_width: f32,
    pub anti_alias: bool,
    pub text_size: f32,
    pub text_align: TextAlign,
    pub fake_bold: bool,
    pub font: Option<FontHandle>,
    pub color_filter: Option<ColorFilter>,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            anti_alias: false,
            text_size: 12.0,
            text_align: TextAlign::Left,
            fake_bold: false,
            font: None,
            color_filter: None,
        }
    }
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke,
            stroke_width: width,
            ..Default::default()
        }
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.color = self.color.with_alpha(alpha);
    }

    /// The color that should reach the surface, after the color filter.
    pub fn resolved_color(&self) -> Color {
        match self.color_filter {
            Some(filter) => filter.apply(self.color),
            None => self.color,
        }
    }

    pub fn font_metrics(&self) -> FontMetrics {
        self.font
            .as_ref()
            .and_then(|font| font.metrics(self.text_size))
            .unwrap_or(FontMetrics {
                ascent: FALLBACK_ASCENT * self.text_size,
                descent: FALLBACK_DESCENT * self.text_size,
            })
    }

    /// Distance above the baseline; negative.
    pub fn ascent(&self) -> f32 {
        self.font_metrics().ascent
    }

    /// Distance below the baseline; positive.
    pub fn descent(&self) -> f32 {
        self.font_metrics().descent
    }

    /// Advance width of `text`, kerning included. Zero without a font.
    pub fn measure_text(&self, text: &str) -> f32 {
        let Some(font) = self.font.as_ref().map(FontHandle::font) else {
            return 0.0;
        };

        let mut width = 0.0;
        let mut prev = None;
        for ch in text.chars() {
            if let Some(kern) = prev.and_then(|p| font.horizontal_kern(p, ch, self.text_size)) {
                width += kern;
            }
            width += font.metrics(ch, self.text_size).advance_width;
            prev = Some(ch);
        }
        width
    }
}

/// A surface drawables paint onto.
pub trait Canvas {
    fn draw_rect(&mut self, rect: RectF, paint: &Paint);

    /// Ellipse inscribed in `rect`.
    fn draw_oval(&mut self, rect: RectF, paint: &Paint);

    fn draw_round_rect(&mut self, rect: RectF, rx: f32, ry: f32, paint: &Paint);

    /// Draws `text` with its baseline at `y`, anchored at `x` per `paint.text_align`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint);
}
