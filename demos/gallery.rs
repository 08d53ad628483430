//! Renders the sample avatar catalog into `debug/gallery.png`,
//! plus the countdown frames into `debug/countdown_*.png`.
//!
//! An optional argument names an extra font directory to register,
//! e.g. `cargo run --example gallery -- ~/.fonts`.

use image::RgbaImage;
use monogram::{
    Bounds, Color, ColorGenerator, ConfigError, Drawable, FontCache, FontStyle, Pixmap,
    TextDrawable, canvas::bounds,
};

/// Pixels per density-independent pixel.
const DENSITY: f32 = 2.0;
const TILE: usize = 60 * DENSITY as usize;
const COLUMNS: usize = 4;

fn to_px(dp: i32) -> i32 {
    (dp as f32 * DENSITY) as i32
}

/// One catalog entry: a label and what to paint into the tile.
struct Sample {
    label: &'static str,
    layers: Vec<(TextDrawable, Bounds)>,
}

impl Sample {
    fn single(label: &'static str, drawable: TextDrawable) -> Self {
        let full = bounds(0, 0, TILE as i32, TILE as i32);
        Self {
            label,
            layers: vec![(drawable, full)],
        }
    }
}

fn catalog(fonts: &FontCache, colors: &ColorGenerator) -> Result<Vec<Sample>, ConfigError> {
    let builder = || TextDrawable::builder(fonts);
    let bordered = || -> Result<_, ConfigError> {
        Ok(builder().begin_config().with_border(to_px(2))?.end_config())
    };

    let mut samples = vec![
        Sample::single(
            "Rectangle with Text",
            builder().build_rect("A", colors.color_for("A"))?,
        ),
        Sample::single(
            "Round Corner with Text",
            builder().build_round_rect("B", colors.color_for("B"), to_px(10))?,
        ),
        Sample::single(
            "Round with Text",
            builder().build_round("C", colors.color_for("C"))?,
        ),
        Sample::single(
            "Rectangle with Border",
            bordered()?.build_rect("D", colors.color_for("D"))?,
        ),
        Sample::single(
            "Round Corner with Border",
            bordered()?.build_round_rect("E", colors.color_for("E"), to_px(10))?,
        ),
        Sample::single(
            "Round with Border",
            bordered()?.build_round("F", colors.color_for("F"))?,
        ),
        Sample::single(
            "Support multiple letters",
            builder()
                .begin_config()
                .font_size(to_px(20))?
                .to_upper_case()
                .end_config()
                .build_rect("ak", colors.color_for("AK"))?,
        ),
        Sample::single(
            "Support variable font styles",
            builder()
                .begin_config()
                .use_font_named("sans-serif", FontStyle::Normal)
                .font_size(to_px(15))?
                .text_color(Color(0xFFF5_8559))
                .bold()
                .end_config()
                .build_rect("Bold", Color::DARK_GRAY)?,
        ),
    ];

    // two narrow drawables side by side in one tile
    let pair = builder()
        .begin_config()
        .width(to_px(29))?
        .with_border(to_px(2))?
        .end_config()
        .rect();
    let split = to_px(31);
    let tile = TILE as i32;
    samples.push(Sample {
        label: "Support for custom size",
        layers: vec![
            (
                pair.build("I", colors.color_for("I"))?,
                bounds(0, 0, tile - split, tile),
            ),
            (
                pair.build("J", colors.color_for("J"))?,
                bounds(split, 0, tile, tile),
            ),
        ],
    });

    Ok(samples)
}

fn render(layers: &[(TextDrawable, Bounds)]) -> Pixmap {
    let mut pixmap = Pixmap::new(TILE, TILE);
    for (drawable, area) in layers {
        drawable.draw(&mut pixmap, *area);
    }
    pixmap
}

fn save(pixmap: Pixmap, path: &str) {
    let image = RgbaImage::from_raw(pixmap.width as u32, pixmap.height as u32, pixmap.pixels)
        .expect("pixmap dimensions must match pixel buffer length");
    image.save(path).expect("failed to save image");
    println!("Saved {path}");
}

#[allow(clippy::unwrap_used)]
fn main() {
    let fonts = FontCache::with_system_fonts();
    if let Some(dir) = std::env::args().nth(1) {
        let added = fonts.with_loader_mut(|storage| {
            let before = storage.len();
            storage.load_fonts_dir(&dir);
            storage.len() - before
        });
        println!("Registered {added} font faces from {dir}");
    }
    let colors = ColorGenerator::default();

    let samples = catalog(&fonts, &colors).unwrap();
    std::fs::create_dir_all("debug").expect("failed to create debug directory");

    let rows = samples.len().div_ceil(COLUMNS);
    let mut sheet = RgbaImage::new((COLUMNS * TILE) as u32, (rows * TILE) as u32);
    for (i, sample) in samples.iter().enumerate() {
        let tile = render(&sample.layers);
        let tile = RgbaImage::from_raw(TILE as u32, TILE as u32, tile.pixels).unwrap();
        let (x, y) = ((i % COLUMNS) * TILE, (i / COLUMNS) * TILE);
        image::imageops::overlay(&mut sheet, &tile, x as i64, y as i64);
        println!("{:>2}: {}", i, sample.label);
    }
    sheet
        .save("debug/gallery.png")
        .expect("failed to save gallery");
    println!("Saved debug/gallery.png ({} fonts cached)", fonts.len());

    // countdown animation frames, one random color each
    let frames = TextDrawable::builder(&fonts).rect();
    for i in (1..=10).rev() {
        let frame = frames.build(&i.to_string(), colors.random_color()).unwrap();
        let full = bounds(0, 0, TILE as i32, TILE as i32);
        save(render(&[(frame, full)]), &format!("debug/countdown_{i:02}.png"));
    }
}
