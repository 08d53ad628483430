use crate::color::Color;

use super::{Bounds, Canvas, Paint, PaintStyle, RectF, TextAlign};

/// Glyph bitmaps above this many pixels are skipped rather than rasterized.
const MAX_GLYPH_PIXELS: usize = 4096 * 4096;

/// RGBA8 raster surface with straight (non-premultiplied) alpha.
///
/// Pixels are arranged in row-major order with the origin at the top-left,
/// four bytes per pixel in `r, g, b, a` order.
pub struct Pixmap {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Pixmap {
    /// Creates a fully transparent pixmap.
    pub fn new(width: usize, height: usize) -> Self {
        let len = width.saturating_mul(height).saturating_mul(4);
        Self {
            width,
            height,
            pixels: vec![0; len],
        }
    }

    /// The whole surface as drawable bounds.
    pub fn bounds(&self) -> Bounds {
        super::bounds(0, 0, self.width as i32, self.height as i32)
    }

    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let px = &self.pixels[idx..idx + 4];
        Some(Color::from_rgba([px[0], px[1], px[2], px[3]]))
    }

    /// Source-over blend of `color` at `coverage` (0.0 to 1.0) onto one pixel.
    fn blend(&mut self, x: usize, y: usize, color: Color, coverage: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let src_alpha = color.alpha() as f32 / 255.0 * coverage.clamp(0.0, 1.0);
        if src_alpha <= 0.0 {
            return;
        }

        let idx = (y * self.width + x) * 4;
        let dst = &mut self.pixels[idx..idx + 4];
        let dst_alpha = dst[3] as f32 / 255.0;
        let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);

        let src = color.to_rgba();
        for channel in 0..3 {
            let mixed = src[channel] as f32 * src_alpha
                + dst[channel] as f32 * dst_alpha * (1.0 - src_alpha);
            dst[channel] = (mixed / out_alpha).round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    /// Paints the shape described by a signed distance function (negative inside).
    fn paint_shape(&mut self, rect: RectF, paint: &Paint, distance: impl Fn(f32, f32) -> f32) {
        let half_stroke = match paint.style {
            PaintStyle::Fill => 0.0,
            // zero-width strokes are hairlines
            PaintStyle::Stroke => paint.stroke_width.max(1.0) / 2.0,
        };
        let pad = half_stroke + 1.0;
        let x0 = (rect.min.x - pad).floor().max(0.0) as usize;
        let y0 = (rect.min.y - pad).floor().max(0.0) as usize;
        let x1 = ((rect.max.x + pad).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((rect.max.y + pad).ceil().max(0.0) as usize).min(self.height);

        let color = paint.resolved_color();
        for y in y0..y1 {
            for x in x0..x1 {
                let d = distance(x as f32 + 0.5, y as f32 + 0.5);
                let d = match paint.style {
                    PaintStyle::Fill => d,
                    PaintStyle::Stroke => d.abs() - half_stroke,
                };
                let coverage = if paint.anti_alias {
                    (0.5 - d).clamp(0.0, 1.0)
                } else if d <= 0.0 {
                    1.0
                } else {
                    0.0
                };
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    /// Whether a glyph bitmap placed at `origin` touches the surface.
    fn glyph_visible(&self, origin: (f32, f32), width: usize, height: usize) -> bool {
        // one extra column for fake bold
        width > 0
            && height > 0
            && origin.0 + width as f32 + 1.0 > 0.0
            && origin.1 + height as f32 > 0.0
            && origin.0 < self.width as f32
            && origin.1 < self.height as f32
    }

    fn render_glyph(
        &mut self,
        coverage: &[u8],
        glyph_width: usize,
        glyph_height: usize,
        origin: (f32, f32),
        color: Color,
        fake_bold: bool,
    ) {
        // fake bold smears every row one pixel to the right
        let extra = usize::from(fake_bold);
        for row in 0..glyph_height {
            let y = origin.1 + row as f32;
            if y < 0.0 {
                continue;
            }
            let iy = y.floor() as usize;
            if iy >= self.height {
                continue;
            }

            for col in 0..glyph_width + extra {
                let here = coverage.get(row * glyph_width + col).filter(|_| col < glyph_width);
                let left = col
                    .checked_sub(1)
                    .filter(|_| fake_bold)
                    .and_then(|c| coverage.get(row * glyph_width + c));
                let src_alpha = here.copied().unwrap_or(0).max(left.copied().unwrap_or(0));
                if src_alpha == 0 {
                    continue;
                }

                let x = origin.0 + col as f32;
                if x < 0.0 {
                    continue;
                }
                self.blend(x.floor() as usize, iy, color, src_alpha as f32 / 255.0);
            }
        }
    }
}

/// Signed distance from `(x, y)` to an axis aligned box of half extents `(hw, hh)`
/// centered at the origin.
fn box_distance(x: f32, y: f32, hw: f32, hh: f32) -> f32 {
    let qx = x.abs() - hw;
    let qy = y.abs() - hh;
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    outside + qx.max(qy).min(0.0)
}

/// Approximate signed distance to an ellipse with radii `(a, b)` centered at the origin.
fn ellipse_distance(x: f32, y: f32, a: f32, b: f32) -> f32 {
    if a <= 0.0 || b <= 0.0 {
        return f32::INFINITY;
    }
    let k0 = (x / a).hypot(y / b);
    let k1 = (x / (a * a)).hypot(y / (b * b));
    if k1 == 0.0 {
        return -a.min(b);
    }
    k0 * (k0 - 1.0) / k1
}

impl Canvas for Pixmap {
    fn draw_rect(&mut self, rect: RectF, paint: &Paint) {
        let center = rect.center();
        let (hw, hh) = (rect.width() / 2.0, rect.height() / 2.0);
        self.paint_shape(rect, paint, |x, y| {
            box_distance(x - center.x, y - center.y, hw, hh)
        });
    }

    fn draw_oval(&mut self, rect: RectF, paint: &Paint) {
        let center = rect.center();
        let (a, b) = (rect.width() / 2.0, rect.height() / 2.0);
        self.paint_shape(rect, paint, |x, y| {
            ellipse_distance(x - center.x, y - center.y, a, b)
        });
    }

    fn draw_round_rect(&mut self, rect: RectF, rx: f32, ry: f32, paint: &Paint) {
        let center = rect.center();
        let (hw, hh) = (rect.width() / 2.0, rect.height() / 2.0);
        let radius = rx.min(ry).min(hw).min(hh).max(0.0);
        self.paint_shape(rect, paint, |x, y| {
            box_distance(x - center.x, y - center.y, hw - radius, hh - radius) - radius
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint) {
        let Some(handle) = paint.font.as_ref() else {
            log::debug!("Skipping text {:?}: paint has no font", text);
            return;
        };
        let font = handle.font();
        let size = paint.text_size;
        if size <= 0.0 || text.is_empty() {
            return;
        }

        let mut pen = match paint.text_align {
            TextAlign::Left => x,
            TextAlign::Center => x - paint.measure_text(text) / 2.0,
            TextAlign::Right => x - paint.measure_text(text),
        };
        let color = paint.resolved_color();

        let mut prev = None;
        for ch in text.chars() {
            if let Some(kern) = prev.and_then(|p| font.horizontal_kern(p, ch, size)) {
                pen += kern;
            }
            prev = Some(ch);

            let metrics = font.metrics(ch, size);
            // fontdue reports the bitmap's bottom edge relative to the baseline, y up
            let origin = (
                pen + metrics.xmin as f32,
                y - metrics.ymin as f32 - metrics.height as f32,
            );
            if self.glyph_visible(origin, metrics.width, metrics.height) {
                if metrics.width.saturating_mul(metrics.height) > MAX_GLYPH_PIXELS {
                    log::debug!(
                        "Skipping {:?} at {}px: {}x{} glyph is too large to rasterize",
                        ch,
                        size,
                        metrics.width,
                        metrics.height
                    );
                } else {
                    let (metrics, coverage) = font.rasterize(ch, size);
                    self.render_glyph(
                        &coverage,
                        metrics.width,
                        metrics.height,
                        origin,
                        color,
                        paint.fake_bold,
                    );
                }
            }
            pen += metrics.advance_width;
        }
    }
}
