//! # Monogram
//!
//! Letter avatars for Rust: a colored rectangle, rounded rectangle or circle
//! with centered text, usually someone's initials.
//!
//! ## Overview
//!
//! A [`TextDrawable`] is configured through a staged builder and then frozen.
//! It draws onto anything implementing [`Canvas`]: the CPU [`Pixmap`], a
//! [`RecordingCanvas`] display list, or a host surface.
//! Fonts are looked up by family name through a [`FontCache`], which loads each
//! `(family, style)` pair at most once.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use monogram::{ColorGenerator, Drawable, FontCache, Pixmap, TextDrawable};
//!
//! let fonts = FontCache::with_system_fonts();
//! let colors = ColorGenerator::material();
//!
//! let avatar = TextDrawable::builder(&fonts)
//!     .begin_config()
//!     .with_border(2)?
//!     .to_upper_case()
//!     .end_config()
//!     .build_round("jd", colors.color_for("John Doe"))?;
//!
//! let mut pixmap = Pixmap::new(96, 96);
//! let bounds = pixmap.bounds();
//! avatar.draw(&mut pixmap, bounds);
//! # Ok::<(), monogram::ConfigError>(())
//! ```

pub mod canvas;
pub mod color;
pub mod color_generator;
pub mod drawable;
pub mod font_cache;
pub mod font_storage;
pub mod resources;

// common re-exports
pub use canvas::{Bounds, Canvas, DrawOp, Paint, PaintStyle, Pixmap, RecordingCanvas, RectF};
pub use color::{Color, ColorFilter};
pub use color_generator::ColorGenerator;
pub use drawable::{
    ConfigBuilder, ConfigError, Drawable, DrawableBuilder, Opacity, RenderConfig, ShapeBuilder,
    ShapeKind, TextDrawable,
};
pub use font_cache::{FontCache, FontError, FontLoader, FontProvider, FontStyle};
pub use font_storage::{FontHandle, FontStorage};
pub use resources::{ResourceId, ResourceResolver, ResourceTable};

// re-export dependencies
pub use euclid;
pub use fontdb;
pub use fontdue;
pub use parking_lot;
