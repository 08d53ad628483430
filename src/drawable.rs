//! The letter drawable and the host-facing drawable contract.

pub mod builder;

pub use builder::{ConfigBuilder, ConfigError, DrawableBuilder, RenderConfig, ShapeBuilder};

use crate::canvas::{Bounds, Canvas, Paint, PaintStyle, RectF, TextAlign};
use crate::color::{Color, ColorFilter};
use crate::font_cache::FontProvider;

/// How a drawable composites with what is behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opacity {
    Opaque,
    Translucent,
    Transparent,
}

/// Something that can paint itself into a rectangular region of a canvas.
pub trait Drawable {
    fn draw(&self, canvas: &mut dyn Canvas, bounds: Bounds);

    fn set_alpha(&mut self, alpha: u8);

    fn set_color_filter(&mut self, filter: Option<ColorFilter>);

    fn opacity(&self) -> Opacity;

    /// Preferred width in pixels, `None` when the drawable fills any bounds.
    fn intrinsic_width(&self) -> Option<u32>;

    /// Preferred height in pixels, `None` when the drawable fills any bounds.
    fn intrinsic_height(&self) -> Option<u32>;
}

/// Outline used both to fill the background and to stroke the border.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    /// Ellipse inscribed in the bounds, a circle when the bounds are square.
    Circle,
    RoundedRectangle {
        radius: f32,
    },
}

impl ShapeKind {
    pub fn draw(&self, canvas: &mut dyn Canvas, rect: RectF, paint: &Paint) {
        match *self {
            ShapeKind::Rectangle => canvas.draw_rect(rect, paint),
            ShapeKind::Circle => canvas.draw_oval(rect, paint),
            ShapeKind::RoundedRectangle { radius } => {
                canvas.draw_round_rect(rect, radius, radius, paint)
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            ShapeKind::RoundedRectangle { radius } if !(radius >= 1.0 && radius.is_finite()) => {
                Err(ConfigError::InvalidRadius(radius))
            }
            _ => Ok(()),
        }
    }
}

/// A colored shape with centered text, typically a contact's initials.
///
/// Built through [`TextDrawable::builder`]; the configuration is frozen once built.
/// Only the text paint responds to [`Drawable::set_alpha`] and
/// [`Drawable::set_color_filter`].
#[derive(Clone, Debug)]
pub struct TextDrawable {
    shape: ShapeKind,
    text: String,
    width: Option<u32>,
    height: Option<u32>,
    font_size: Option<u32>,
    border_thickness: u32,
    paint: Paint,
    text_paint: Paint,
    border_paint: Paint,
}

impl TextDrawable {
    /// Starts a builder that resolves font names through `fonts`.
    pub fn builder(fonts: &dyn FontProvider) -> ShapeBuilder<'_> {
        ShapeBuilder::new(fonts)
    }

    /// Freezes `config` into a drawable of the given shape.
    pub fn new(shape: ShapeKind, config: RenderConfig) -> Result<Self, ConfigError> {
        shape.validate()?;
        config.validate()?;

        let text = if config.uppercase {
            config.text.to_uppercase()
        } else {
            config.text
        };

        let text_paint = Paint {
            color: config.text_color,
            style: PaintStyle::Fill,
            stroke_width: config.border_thickness as f32,
            anti_alias: true,
            text_align: TextAlign::Center,
            fake_bold: config.bold,
            font: config.font,
            ..Default::default()
        };
        let border_paint = Paint::stroke(config.color.darker(), config.border_thickness as f32);
        let paint = Paint {
            anti_alias: true,
            ..Paint::fill(config.color)
        };

        Ok(Self {
            shape,
            text,
            width: config.width,
            height: config.height,
            font_size: config.font_size,
            border_thickness: config.border_thickness,
            paint,
            text_paint,
            border_paint,
        })
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// The text as painted, after optional upper-casing.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Color {
        self.paint.color
    }

    pub fn text_color(&self) -> Color {
        self.text_paint.color
    }

    pub fn border_color(&self) -> Color {
        self.border_paint.color
    }

    pub fn border_thickness(&self) -> u32 {
        self.border_thickness
    }

    pub fn text_paint(&self) -> &Paint {
        &self.text_paint
    }

    fn draw_border(&self, canvas: &mut dyn Canvas, bounds: Bounds) {
        let inset = (self.border_thickness / 2) as f32;
        let rect = bounds.to_f32().inflate(-inset, -inset);
        self.shape.draw(canvas, rect, &self.border_paint);
    }
}

fn px(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl Drawable for TextDrawable {
    fn draw(&self, canvas: &mut dyn Canvas, bounds: Bounds) {
        self.shape.draw(canvas, bounds.to_f32(), &self.paint);

        if self.border_thickness > 0 {
            self.draw_border(canvas, bounds);
        }

        let width = self.width.map_or(bounds.width(), px);
        let height = self.height.map_or(bounds.height(), px);
        let font_size = self.font_size.map_or(width.min(height) / 2, px);
        if font_size <= 0 || self.text.is_empty() {
            return;
        }

        let mut text_paint = self.text_paint.clone();
        text_paint.text_size = font_size as f32;
        let x = bounds.min.x.saturating_add(width / 2) as f32;
        let y = bounds.min.y.saturating_add(height / 2) as f32
            - (text_paint.descent() + text_paint.ascent()) / 2.0;
        canvas.draw_text(&self.text, x, y, &text_paint);
    }

    fn set_alpha(&mut self, alpha: u8) {
        self.text_paint.set_alpha(alpha);
    }

    fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        self.text_paint.color_filter = filter;
    }

    fn opacity(&self) -> Opacity {
        Opacity::Translucent
    }

    fn intrinsic_width(&self) -> Option<u32> {
        self.width
    }

    fn intrinsic_height(&self) -> Option<u32> {
        self.height
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, Pixmap, RecordingCanvas, bounds};
    use crate::font_cache::FontStyle;
    use crate::font_storage::FontHandle;

    struct NoFonts;

    impl FontProvider for NoFonts {
        fn font(&self, _family: &str, _style: FontStyle) -> Option<FontHandle> {
            None
        }
    }

    fn record(drawable: &TextDrawable, area: Bounds) -> Vec<DrawOp> {
        let mut canvas = RecordingCanvas::new();
        drawable.draw(&mut canvas, area);
        canvas.take()
    }

    fn rect(l: f32, t: f32, r: f32, b: f32) -> RectF {
        RectF::new(euclid::point2(l, t), euclid::point2(r, b))
    }

    #[test]
    fn default_rect_paints_fill_then_centered_text() {
        let drawable = TextDrawable::builder(&NoFonts)
            .build("AB", Color::from_rgb(0x00FF00))
            .unwrap();

        let ops = record(&drawable, bounds(0, 0, 100, 100));
        assert_eq!(ops.len(), 2);

        let DrawOp::Rect { rect: r, paint } = &ops[0] else {
            panic!("expected a rect, got {:?}", ops[0]);
        };
        assert_eq!(*r, rect(0.0, 0.0, 100.0, 100.0));
        assert_eq!(paint.color, Color::GREEN);
        assert_eq!(paint.style, PaintStyle::Fill);

        let DrawOp::Text { text, x, y, paint } = &ops[1] else {
            panic!("expected text, got {:?}", ops[1]);
        };
        assert_eq!(text, "AB");
        assert_eq!(paint.text_size, 50.0);
        assert_eq!(paint.text_align, TextAlign::Center);
        assert_eq!(paint.color, Color::WHITE);
        assert_eq!(*x, 50.0);
        assert_eq!(*y, 50.0 - (paint.descent() + paint.ascent()) / 2.0);
    }

    #[test]
    fn bordered_round_rect_strokes_inset_outline() {
        let drawable = TextDrawable::builder(&NoFonts)
            .begin_config()
            .with_border(2)
            .unwrap()
            .end_config()
            .round_rect(10)
            .unwrap()
            .build("X", Color::from_rgb(0xFF0000))
            .unwrap();

        let ops = record(&drawable, bounds(0, 0, 100, 100));
        assert_eq!(ops.len(), 3);

        assert_eq!(
            ops[0],
            DrawOp::RoundRect {
                rect: rect(0.0, 0.0, 100.0, 100.0),
                rx: 10.0,
                ry: 10.0,
                paint: Paint {
                    anti_alias: true,
                    ..Paint::fill(Color::RED)
                },
            }
        );
        assert_eq!(
            ops[1],
            DrawOp::RoundRect {
                rect: rect(1.0, 1.0, 99.0, 99.0),
                rx: 10.0,
                ry: 10.0,
                paint: Paint::stroke(Color::rgb(229, 0, 0), 2.0),
            }
        );
        assert!(matches!(&ops[2], DrawOp::Text { text, .. } if text == "X"));
    }

    #[test]
    fn shape_selection_picks_outline() {
        let round = TextDrawable::builder(&NoFonts)
            .build_round("C", Color::BLUE)
            .unwrap();
        assert_eq!(round.shape(), ShapeKind::Circle);
        assert!(matches!(
            record(&round, bounds(0, 0, 40, 40))[0],
            DrawOp::Oval { .. }
        ));

        let rounded = TextDrawable::builder(&NoFonts)
            .build_round_rect("B", Color::BLUE, 6)
            .unwrap();
        assert_eq!(rounded.shape(), ShapeKind::RoundedRectangle { radius: 6.0 });

        let plain = TextDrawable::builder(&NoFonts)
            .round()
            .build("A", Color::BLUE)
            .unwrap();
        assert_eq!(plain.shape(), ShapeKind::Circle);
    }

    #[test]
    fn border_is_darker_shade_of_fill() {
        for argb in [0xFFF1_6364, 0xFF20_93CD, 0x8012_3456, 0xFFFF_FFFF] {
            let color = Color(argb);
            let drawable = TextDrawable::builder(&NoFonts)
                .begin_config()
                .with_border(3)
                .unwrap()
                .end_config()
                .build_rect("Q", color)
                .unwrap();
            let expected = Color::rgb(
                (0.9f32 * color.red() as f32) as u8,
                (0.9f32 * color.green() as f32) as u8,
                (0.9f32 * color.blue() as f32) as u8,
            );
            assert_eq!(drawable.border_color(), expected);
        }
    }

    #[test]
    fn odd_border_insets_by_truncated_half() {
        let drawable = TextDrawable::builder(&NoFonts)
            .begin_config()
            .with_border(3)
            .unwrap()
            .end_config()
            .build_round("O", Color::GRAY)
            .unwrap();
        let ops = record(&drawable, bounds(0, 0, 50, 50));
        let DrawOp::Oval { rect: r, paint } = &ops[1] else {
            panic!("expected an oval, got {:?}", ops[1]);
        };
        assert_eq!(*r, rect(1.0, 1.0, 49.0, 49.0));
        assert_eq!(paint.stroke_width, 3.0);
    }

    #[test]
    fn upper_case_only_when_requested() {
        let verbatim = TextDrawable::builder(&NoFonts)
            .build("ak", Color::GRAY)
            .unwrap();
        assert_eq!(verbatim.text(), "ak");

        let upper = TextDrawable::builder(&NoFonts)
            .begin_config()
            .to_upper_case()
            .end_config()
            .build("ak straße", Color::GRAY)
            .unwrap();
        assert_eq!(upper.text(), "AK STRASSE");
    }

    #[test]
    fn auto_font_size_is_half_the_smaller_side() {
        let drawable = TextDrawable::builder(&NoFonts)
            .build("A", Color::GRAY)
            .unwrap();
        let ops = record(&drawable, bounds(10, 20, 85, 61));
        let DrawOp::Text { x, paint, .. } = &ops[1] else {
            panic!("expected text");
        };
        assert_eq!(paint.text_size, 20.0);
        assert_eq!(*x, 47.0);
    }

    #[test]
    fn explicit_dimensions_override_bounds() {
        let drawable = TextDrawable::builder(&NoFonts)
            .begin_config()
            .width(30)
            .unwrap()
            .height(-1)
            .unwrap()
            .end_config()
            .build("I", Color::GRAY)
            .unwrap();
        let ops = record(&drawable, bounds(0, 0, 100, 100));
        let DrawOp::Text { x, paint, .. } = &ops[1] else {
            panic!("expected text");
        };
        assert_eq!(paint.text_size, 15.0);
        assert_eq!(*x, 15.0);

        let sized = TextDrawable::builder(&NoFonts)
            .begin_config()
            .font_size(20)
            .unwrap()
            .end_config()
            .build("AK", Color::GRAY)
            .unwrap();
        let ops = record(&sized, bounds(0, 0, 100, 100));
        assert_eq!(ops[1].paint().text_size, 20.0);
    }

    #[test]
    fn empty_text_draws_only_the_shape() {
        let drawable = TextDrawable::builder(&NoFonts)
            .build("", Color::GRAY)
            .unwrap();
        assert_eq!(record(&drawable, bounds(0, 0, 10, 10)).len(), 1);
    }

    #[test]
    fn alpha_and_filter_touch_only_the_text() {
        let mut drawable = TextDrawable::builder(&NoFonts)
            .build("A", Color::GREEN)
            .unwrap();
        drawable.set_alpha(0x40);
        drawable.set_color_filter(Some(ColorFilter::SrcIn(Color::BLACK)));

        let ops = record(&drawable, bounds(0, 0, 10, 10));
        assert_eq!(ops[0].paint().resolved_color(), Color::GREEN);
        assert_eq!(
            ops[1].paint().resolved_color(),
            Color::BLACK.with_alpha(0x40)
        );
        assert_eq!(drawable.opacity(), Opacity::Translucent);
    }

    #[test]
    fn intrinsic_size_reports_explicit_dimensions() {
        let auto = TextDrawable::builder(&NoFonts)
            .build("A", Color::GRAY)
            .unwrap();
        assert_eq!((auto.intrinsic_width(), auto.intrinsic_height()), (None, None));

        let sized = TextDrawable::builder(&NoFonts)
            .begin_config()
            .width(29)
            .unwrap()
            .height(40)
            .unwrap()
            .end_config()
            .build("A", Color::GRAY)
            .unwrap();
        assert_eq!(sized.intrinsic_width(), Some(29));
        assert_eq!(sized.intrinsic_height(), Some(40));
    }

    #[test]
    fn new_rejects_zero_sizes_and_radius() {
        let zero_width = RenderConfig {
            width: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            TextDrawable::new(ShapeKind::Rectangle, zero_width),
            Err(ConfigError::NonPositive { param: "width", .. })
        ));
        assert_eq!(
            TextDrawable::new(
                ShapeKind::RoundedRectangle { radius: 0.5 },
                RenderConfig::default()
            )
            .unwrap_err(),
            ConfigError::InvalidRadius(0.5)
        );
    }

    fn inked(pixmap: &Pixmap, background: Color) -> usize {
        (0..pixmap.height)
            .flat_map(|y| (0..pixmap.width).map(move |x| (x, y)))
            .filter(|&(x, y)| pixmap.pixel(x, y) != Some(background))
            .count()
    }

    #[test]
    fn default_font_inks_text_in_the_middle() {
        let fonts = crate::FontCache::with_system_fonts();
        let drawable = TextDrawable::builder(&fonts)
            .build("AB", Color::from_rgb(0x00FF00))
            .unwrap();
        assert!(drawable.text_paint().font.is_some());

        let mut pixmap = Pixmap::new(100, 100);
        let area = pixmap.bounds();
        drawable.draw(&mut pixmap, area);

        assert!(inked(&pixmap, Color::GREEN) > 100);
        for y in (0..25).chain(75..100) {
            for x in 0..100 {
                assert_eq!(pixmap.pixel(x, y), Some(Color::GREEN), "ink at ({x}, {y})");
            }
        }
    }

    #[test]
    fn oversized_text_still_draws_the_shape() {
        let fonts = crate::FontCache::with_system_fonts();
        for size in [20_000, 1_000_000] {
            let drawable = TextDrawable::builder(&fonts)
                .begin_config()
                .font_size(size)
                .unwrap()
                .end_config()
                .build("W", Color::from_rgb(0x0000FF))
                .unwrap();
            assert!(drawable.text_paint().font.is_some());

            let mut pixmap = Pixmap::new(100, 100);
            let area = pixmap.bounds();
            drawable.draw(&mut pixmap, area);
            assert_eq!(pixmap.pixel(0, 0), Some(Color::BLUE));
            assert_eq!(inked(&pixmap, Color::BLUE), 0);
        }
    }

    #[test]
    fn extreme_dimensions_do_not_overflow_the_origin() {
        let config = RenderConfig {
            text: "A".into(),
            width: Some(u32::MAX),
            height: Some(u32::MAX),
            font_size: Some(4),
            ..Default::default()
        };
        let drawable = TextDrawable::new(ShapeKind::Rectangle, config).unwrap();

        let ops = record(&drawable, bounds(i32::MAX - 10, i32::MAX - 10, i32::MAX, i32::MAX));
        let DrawOp::Text { x, .. } = &ops[1] else {
            panic!("expected text, got {:?}", ops[1]);
        };
        assert_eq!(*x, i32::MAX as f32);
    }

    #[test]
    fn pixmap_rendering_matches_configuration() {
        let drawable = TextDrawable::builder(&NoFonts)
            .build("AB", Color::from_rgb(0x00FF00))
            .unwrap();
        let mut pixmap = Pixmap::new(100, 100);
        let area = pixmap.bounds();
        drawable.draw(&mut pixmap, area);
        assert!(
            pixmap
                .pixels
                .chunks_exact(4)
                .all(|px| px == [0, 255, 0, 255])
        );

        let bordered = TextDrawable::builder(&NoFonts)
            .begin_config()
            .with_border(2)
            .unwrap()
            .end_config()
            .build_round_rect("X", Color::from_rgb(0xFF0000), 10)
            .unwrap();
        let mut pixmap = Pixmap::new(100, 100);
        let area = pixmap.bounds();
        bordered.draw(&mut pixmap, area);
        assert_eq!(pixmap.pixel(0, 50), Some(Color::rgb(229, 0, 0)));
        assert_eq!(pixmap.pixel(50, 1), Some(Color::rgb(229, 0, 0)));
        assert_eq!(pixmap.pixel(50, 50), Some(Color::RED));
        assert_eq!(pixmap.pixel(0, 0), Some(Color::TRANSPARENT));
    }
}
