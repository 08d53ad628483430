//! Staged builder for [`TextDrawable`].
//!
//! The stages mirror the order callers make decisions in:
//!
//! ```text
//! ShapeBuilder --begin_config--> ConfigBuilder --end_config--> ShapeBuilder
//! ShapeBuilder --rect/round/round_rect--> DrawableBuilder --build--> TextDrawable
//! ```
//!
//! `ShapeBuilder` also offers `build_rect`, `build_round` and `build_round_rect`
//! to pick a shape and build in one call.

use crate::color::Color;
use crate::font_cache::{FontProvider, FontStyle};
use crate::font_storage::FontHandle;
use crate::resources::{ResourceId, ResourceResolver};

use super::{ShapeKind, TextDrawable};

/// Family requested from the font provider when no font was configured.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif-light";

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{param} must be at least 1, got {value}")]
    NonPositive { param: &'static str, value: i64 },
    #[error("corner radius must be at least 1, got {0}")]
    InvalidRadius(f32),
    #[error("resource {0:?} could not be resolved")]
    MissingResource(ResourceId),
}

/// Everything a [`TextDrawable`] is frozen from, apart from its shape.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub text: String,
    /// Background color; the border uses its darker shade.
    pub color: Color,
    pub text_color: Color,
    /// Border width in pixels, `0` for no border.
    pub border_thickness: u32,
    /// Width used to place and size the text, `None` to follow the bounds.
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// `None` sizes the text to half of the smaller side.
    pub font_size: Option<u32>,
    pub font: Option<FontHandle>,
    pub bold: bool,
    pub uppercase: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: Color::GRAY,
            text_color: Color::WHITE,
            border_thickness: 0,
            width: None,
            height: None,
            font_size: None,
            font: None,
            bold: false,
            uppercase: false,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("width", self.width),
            ("height", self.height),
            ("font size", self.font_size),
        ];
        for (param, value) in checks {
            if value == Some(0) {
                return Err(ConfigError::NonPositive { param, value: 0 });
            }
        }
        Ok(())
    }
}

/// `< 0` leaves the value unset, `0` is rejected.
fn optional_px(param: &'static str, value: i32) -> Result<Option<u32>, ConfigError> {
    match value {
        v if v < 0 => Ok(None),
        0 => Err(ConfigError::NonPositive {
            param,
            value: value.into(),
        }),
        v => Ok(Some(v.unsigned_abs())),
    }
}

fn resolve_px(resources: &dyn ResourceResolver, id: ResourceId) -> Result<i32, ConfigError> {
    resources
        .resolve_dimension(id)
        .map(|px| px as i32)
        .ok_or(ConfigError::MissingResource(id))
}

fn resolve_color(resources: &dyn ResourceResolver, id: ResourceId) -> Result<Color, ConfigError> {
    resources
        .resolve_color(id)
        .ok_or(ConfigError::MissingResource(id))
}

#[derive(Clone)]
struct BuilderState<'a> {
    fonts: &'a dyn FontProvider,
    shape: ShapeKind,
    config: RenderConfig,
}

/// Shape selection stage, returned by [`TextDrawable::builder`].
#[derive(Clone)]
pub struct ShapeBuilder<'a> {
    state: BuilderState<'a>,
}

/// Configuration stage, entered with [`ShapeBuilder::begin_config`].
#[derive(Clone)]
pub struct ConfigBuilder<'a> {
    state: BuilderState<'a>,
}

/// Terminal stage: the shape is chosen, only text and color remain.
///
/// Building borrows the builder, so one configuration can stamp many drawables.
#[derive(Clone)]
pub struct DrawableBuilder<'a> {
    state: BuilderState<'a>,
}

impl<'a> ShapeBuilder<'a> {
    pub(super) fn new(fonts: &'a dyn FontProvider) -> Self {
        Self {
            state: BuilderState {
                fonts,
                shape: ShapeKind::Rectangle,
                config: RenderConfig::default(),
            },
        }
    }

    pub fn begin_config(self) -> ConfigBuilder<'a> {
        ConfigBuilder { state: self.state }
    }

    pub fn rect(self) -> DrawableBuilder<'a> {
        self.with_shape(ShapeKind::Rectangle)
    }

    pub fn round(self) -> DrawableBuilder<'a> {
        self.with_shape(ShapeKind::Circle)
    }

    pub fn round_rect(self, radius: i32) -> Result<DrawableBuilder<'a>, ConfigError> {
        if radius < 1 {
            return Err(ConfigError::InvalidRadius(radius as f32));
        }
        Ok(self.with_shape(ShapeKind::RoundedRectangle {
            radius: radius as f32,
        }))
    }

    pub fn round_rect_res(
        self,
        resources: &dyn ResourceResolver,
        radius: ResourceId,
    ) -> Result<DrawableBuilder<'a>, ConfigError> {
        let radius = resolve_px(resources, radius)?;
        self.round_rect(radius)
    }

    pub fn build_rect(self, text: &str, color: Color) -> Result<TextDrawable, ConfigError> {
        self.rect().build(text, color)
    }

    pub fn build_rect_res(
        self,
        text: &str,
        resources: &dyn ResourceResolver,
        color: ResourceId,
    ) -> Result<TextDrawable, ConfigError> {
        self.rect().build_res(text, resources, color)
    }

    pub fn build_round(self, text: &str, color: Color) -> Result<TextDrawable, ConfigError> {
        self.round().build(text, color)
    }

    pub fn build_round_res(
        self,
        text: &str,
        resources: &dyn ResourceResolver,
        color: ResourceId,
    ) -> Result<TextDrawable, ConfigError> {
        self.round().build_res(text, resources, color)
    }

    pub fn build_round_rect(
        self,
        text: &str,
        color: Color,
        radius: i32,
    ) -> Result<TextDrawable, ConfigError> {
        self.round_rect(radius)?.build(text, color)
    }

    pub fn build_round_rect_res(
        self,
        text: &str,
        resources: &dyn ResourceResolver,
        color: ResourceId,
        radius: ResourceId,
    ) -> Result<TextDrawable, ConfigError> {
        let color = resolve_color(resources, color)?;
        let radius = resolve_px(resources, radius)?;
        self.build_round_rect(text, color, radius)
    }

    /// Builds with the currently selected shape, a rectangle unless changed.
    pub fn build(self, text: &str, color: Color) -> Result<TextDrawable, ConfigError> {
        DrawableBuilder { state: self.state }.build(text, color)
    }

    fn with_shape(mut self, shape: ShapeKind) -> DrawableBuilder<'a> {
        self.state.shape = shape;
        DrawableBuilder { state: self.state }
    }
}

impl<'a> ConfigBuilder<'a> {
    pub fn width(mut self, width: i32) -> Result<Self, ConfigError> {
        self.state.config.width = optional_px("width", width)?;
        Ok(self)
    }

    pub fn width_res(
        self,
        resources: &dyn ResourceResolver,
        width: ResourceId,
    ) -> Result<Self, ConfigError> {
        let width = resolve_px(resources, width)?;
        self.width(width)
    }

    pub fn height(mut self, height: i32) -> Result<Self, ConfigError> {
        self.state.config.height = optional_px("height", height)?;
        Ok(self)
    }

    pub fn height_res(
        self,
        resources: &dyn ResourceResolver,
        height: ResourceId,
    ) -> Result<Self, ConfigError> {
        let height = resolve_px(resources, height)?;
        self.height(height)
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.state.config.text_color = color;
        self
    }

    pub fn text_color_res(
        self,
        resources: &dyn ResourceResolver,
        color: ResourceId,
    ) -> Result<Self, ConfigError> {
        let color = resolve_color(resources, color)?;
        Ok(self.text_color(color))
    }

    /// Border width in pixels. Negative values remove the border.
    pub fn with_border(mut self, thickness: i32) -> Result<Self, ConfigError> {
        self.state.config.border_thickness =
            optional_px("border thickness", thickness)?.unwrap_or(0);
        Ok(self)
    }

    pub fn with_border_res(
        self,
        resources: &dyn ResourceResolver,
        thickness: ResourceId,
    ) -> Result<Self, ConfigError> {
        let thickness = resolve_px(resources, thickness)?;
        self.with_border(thickness)
    }

    pub fn use_font(mut self, font: FontHandle) -> Self {
        self.state.config.font = Some(font);
        self
    }

    /// Looks the font up through the builder's [`FontProvider`].
    ///
    /// If it cannot be loaded the default family is used at build time.
    pub fn use_font_named(mut self, family: &str, style: FontStyle) -> Self {
        self.state.config.font = self.state.fonts.font(family, style);
        self
    }

    pub fn font_size(mut self, size: i32) -> Result<Self, ConfigError> {
        self.state.config.font_size = optional_px("font size", size)?;
        Ok(self)
    }

    pub fn font_size_res(
        self,
        resources: &dyn ResourceResolver,
        size: ResourceId,
    ) -> Result<Self, ConfigError> {
        let size = resolve_px(resources, size)?;
        self.font_size(size)
    }

    pub fn bold(mut self) -> Self {
        self.state.config.bold = true;
        self
    }

    pub fn to_upper_case(mut self) -> Self {
        self.state.config.uppercase = true;
        self
    }

    pub fn end_config(self) -> ShapeBuilder<'a> {
        ShapeBuilder { state: self.state }
    }
}

impl DrawableBuilder<'_> {
    pub fn build(&self, text: &str, color: Color) -> Result<TextDrawable, ConfigError> {
        let mut config = self.state.config.clone();
        if config.font.is_none() {
            config.font = self
                .state
                .fonts
                .font(DEFAULT_FONT_FAMILY, FontStyle::Normal);
        }
        config.text = text.to_string();
        config.color = color;
        TextDrawable::new(self.state.shape, config)
    }

    pub fn build_res(
        &self,
        text: &str,
        resources: &dyn ResourceResolver,
        color: ResourceId,
    ) -> Result<TextDrawable, ConfigError> {
        let color = resolve_color(resources, color)?;
        self.build(text, color)
    }

    pub fn shape(&self) -> ShapeKind {
        self.state.shape
    }

    pub fn config(&self) -> &RenderConfig {
        &self.state.config
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::Drawable;
    use crate::resources::ResourceTable;
    use std::cell::RefCell;

    /// Records every lookup and never finds a font.
    #[derive(Default)]
    struct RecordingFonts {
        requests: RefCell<Vec<(String, FontStyle)>>,
    }

    impl FontProvider for RecordingFonts {
        fn font(&self, family: &str, style: FontStyle) -> Option<FontHandle> {
            self.requests.borrow_mut().push((family.to_string(), style));
            None
        }
    }

    const WIDTH: ResourceId = ResourceId(1);
    const BORDER: ResourceId = ResourceId(2);
    const ACCENT: ResourceId = ResourceId(3);
    const RADIUS: ResourceId = ResourceId(4);
    const MISSING: ResourceId = ResourceId(99);

    fn resources() -> ResourceTable {
        let mut table = ResourceTable::new();
        table
            .insert_dimension(WIDTH, 58.5)
            .insert_dimension(BORDER, 4.0)
            .insert_dimension(RADIUS, 20.0)
            .insert_color(ACCENT, Color(0xFFF5_8559));
        table
    }

    #[test]
    fn defaults_match_documented_values() {
        let fonts = RecordingFonts::default();
        let builder = TextDrawable::builder(&fonts).rect();
        assert_eq!(builder.shape(), ShapeKind::Rectangle);
        assert_eq!(*builder.config(), RenderConfig::default());

        let drawable = TextDrawable::builder(&fonts).build("A", Color::GRAY).unwrap();
        assert_eq!(drawable.text_color(), Color::WHITE);
        assert_eq!(drawable.border_thickness(), 0);
        assert!(!drawable.text_paint().fake_bold);
    }

    #[test]
    fn zero_is_rejected_negative_is_auto() {
        let fonts = RecordingFonts::default();
        let config = || TextDrawable::builder(&fonts).begin_config();

        assert_eq!(
            config().width(0).err(),
            Some(ConfigError::NonPositive {
                param: "width",
                value: 0
            })
        );
        assert!(config().height(0).is_err());
        assert!(config().font_size(0).is_err());
        assert!(config().with_border(0).is_err());

        let drawable = config()
            .width(-1)
            .unwrap()
            .font_size(-5)
            .unwrap()
            .with_border(-1)
            .unwrap()
            .end_config()
            .build("A", Color::GRAY)
            .unwrap();
        assert_eq!(drawable.intrinsic_width(), None);
        assert_eq!(drawable.border_thickness(), 0);
    }

    #[test]
    fn radius_must_be_positive() {
        let fonts = RecordingFonts::default();
        assert_eq!(
            TextDrawable::builder(&fonts).round_rect(0).err(),
            Some(ConfigError::InvalidRadius(0.0))
        );
        assert!(
            TextDrawable::builder(&fonts)
                .build_round_rect("A", Color::GRAY, -3)
                .is_err()
        );
    }

    #[test]
    fn resource_variants_resolve_then_delegate() {
        let fonts = RecordingFonts::default();
        let res = resources();

        let drawable = TextDrawable::builder(&fonts)
            .begin_config()
            .width_res(&res, WIDTH)
            .unwrap()
            .with_border_res(&res, BORDER)
            .unwrap()
            .text_color_res(&res, ACCENT)
            .unwrap()
            .end_config()
            .build_round_rect_res("R", &res, ACCENT, RADIUS)
            .unwrap();

        assert_eq!(drawable.intrinsic_width(), Some(58));
        assert_eq!(drawable.border_thickness(), 4);
        assert_eq!(drawable.text_color(), Color(0xFFF5_8559));
        assert_eq!(drawable.color(), Color(0xFFF5_8559));
        assert_eq!(drawable.shape(), ShapeKind::RoundedRectangle { radius: 20.0 });
    }

    #[test]
    fn missing_resource_fails_at_call_site() {
        let fonts = RecordingFonts::default();
        let res = resources();

        assert_eq!(
            TextDrawable::builder(&fonts)
                .begin_config()
                .font_size_res(&res, MISSING)
                .err(),
            Some(ConfigError::MissingResource(MISSING))
        );
        assert!(
            TextDrawable::builder(&fonts)
                .build_round_res("A", &res, MISSING)
                .is_err()
        );
    }

    #[test]
    fn builder_is_reusable_across_builds() {
        let fonts = RecordingFonts::default();
        let builder = TextDrawable::builder(&fonts)
            .begin_config()
            .width(29)
            .unwrap()
            .with_border(2)
            .unwrap()
            .end_config()
            .rect();

        let left = builder.build("I", Color::RED).unwrap();
        let right = builder.build("J", Color::BLUE).unwrap();

        assert_eq!(left.text(), "I");
        assert_eq!(right.text(), "J");
        assert_eq!(right.intrinsic_width(), Some(29));
        assert_eq!(left.border_color(), Color::RED.darker());
        assert_eq!(right.border_color(), Color::BLUE.darker());
    }

    #[test]
    fn fonts_are_requested_through_the_provider() {
        let fonts = RecordingFonts::default();
        TextDrawable::builder(&fonts)
            .begin_config()
            .use_font_named("serif", FontStyle::Bold)
            .bold()
            .end_config()
            .build("F", Color::DARK_GRAY)
            .unwrap();

        assert_eq!(
            *fonts.requests.borrow(),
            vec![
                ("serif".to_string(), FontStyle::Bold),
                (DEFAULT_FONT_FAMILY.to_string(), FontStyle::Normal),
            ]
        );
    }

    #[test]
    fn config_validation_matches_setters() {
        assert!(RenderConfig::default().validate().is_ok());
        let bad = RenderConfig {
            font_size: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::NonPositive {
                param: "font size",
                ..
            })
        ));
    }
}
