use std::path::Path;

use ab_glyph::{Font as _, FontArc, PxScale, ScaleFont, point};
use anyhow::Context;
use image::{Rgb, RgbImage};

use crate::drawing::{Color, Font, Mark, Point, Primitive, ShapeKind, triangle_vertices};

/// Receives every created primitive exactly once, in creation order.
pub trait RasterSink {
    fn mirror(&mut self, primitive: &Primitive);

    /// Drops everything mirrored so far and repaints `background`.
    fn reset(&mut self, background: Color);
}

/// Records mirrored primitives verbatim.
impl RasterSink for Vec<Primitive> {
    fn mirror(&mut self, primitive: &Primitive) {
        self.push(primitive.clone());
    }

    fn reset(&mut self, _background: Color) {
        self.clear();
    }
}

/// In-memory pixel buffer that mirrors the canvas for export.
pub struct ImageMirror {
    image: RgbImage,
    face: Option<FontArc>,
}

impl ImageMirror {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(background.0)),
            face: None,
        }
    }

    /// Loads the face used for text primitives. Without one, text is skipped
    /// in the raster.
    pub fn with_font_file(mut self, path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
        let face = FontArc::try_from_vec(bytes)
            .map_err(|e| anyhow::anyhow!("loading font {}: {e}", path.display()))?;
        self.face = Some(face);
        Ok(self)
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Encodes the buffer; the format follows the file extension (png, jpg).
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        self.image
            .save(path)
            .with_context(|| format!("saving canvas to {}", path.display()))?;
        log::info!("Saved {}x{} canvas to {}", self.image.width(), self.image.height(), path.display());
        Ok(())
    }

    fn put(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, Rgb(color.0));
        }
    }

    fn fill_rect(&mut self, a: Point, b: Point, color: Color) {
        let (x0, x1) = (a[0].min(b[0]).max(0), a[0].max(b[0]).min(self.image.width() as i32 - 1));
        let (y0, y1) = (a[1].min(b[1]).max(0), a[1].max(b[1]).min(self.image.height() as i32 - 1));
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.put(x, y, color);
            }
        }
    }

    /// Stamps a `width`-wide square at each step of a Bresenham walk.
    fn line(&mut self, from: Point, to: Point, width: u32, color: Color) {
        let lo = -((width as i32 - 1) / 2);
        let hi = width as i32 / 2;
        let (mut x, mut y) = (from[0], from[1]);
        let dx = (to[0] - x).abs();
        let dy = -(to[1] - y).abs();
        let sx = if x < to[0] { 1 } else { -1 };
        let sy = if y < to[1] { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            for oy in lo..=hi {
                for ox in lo..=hi {
                    self.put(x + ox, y + oy, color);
                }
            }
            if x == to[0] && y == to[1] {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Ellipse inscribed in the box `a..b`. With `ring`, only the band of that
    /// width around the boundary is painted.
    fn ellipse(&mut self, a: Point, b: Point, ring: Option<u32>, color: Color) {
        let (min, max) = ([a[0].min(b[0]), a[1].min(b[1])], [a[0].max(b[0]), a[1].max(b[1])]);
        let rx = (max[0] - min[0]) as f32 / 2.0;
        let ry = (max[1] - min[1]) as f32 / 2.0;
        if rx < 0.5 || ry < 0.5 {
            self.line(min, max, ring.unwrap_or(1), color);
            return;
        }
        let cx = min[0] as f32 + rx;
        let cy = min[1] as f32 + ry;
        let half = ring.map(|w| w as f32 / 2.0);
        let inside = |x: f32, y: f32, grow: f32| {
            let (ex, ey) = (rx + grow, ry + grow);
            if ex <= 0.0 || ey <= 0.0 {
                return false;
            }
            ((x - cx) / ex).powi(2) + ((y - cy) / ey).powi(2) <= 1.0
        };
        let pad = half.map_or(0, |h| h.ceil() as i32);
        for y in (min[1] - pad)..=(max[1] + pad) {
            for x in (min[0] - pad)..=(max[0] + pad) {
                let (fx, fy) = (x as f32, y as f32);
                let hit = match half {
                    None => inside(fx, fy, 0.0),
                    Some(h) => inside(fx, fy, h) && !inside(fx, fy, -h),
                };
                if hit {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn text(&mut self, position: Point, content: &str, font: &Font, color: Color) {
        let Some(face) = self.face.clone() else {
            log::debug!("No raster font loaded, skipping text {content:?}");
            return;
        };
        let scaled = face.as_scaled(PxScale::from(font.size as f32));
        let width: f32 = content.chars().map(|c| scaled.h_advance(scaled.glyph_id(c))).sum();
        let height = scaled.ascent() - scaled.descent();
        let mut pen_x = position[0] as f32 - width / 2.0;
        let baseline = position[1] as f32 - height / 2.0 + scaled.ascent();

        for c in content.chars() {
            let mut glyph = scaled.scaled_glyph(c);
            glyph.position = point(pen_x, baseline);
            pen_x += scaled.h_advance(glyph.id);
            if let Some(outlined) = face.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
                outlined.draw(|x, y, coverage| {
                    if coverage >= 0.5 {
                        self.put(left + x as i32, top + y as i32, color);
                    }
                });
            }
        }
    }
}

impl RasterSink for ImageMirror {
    fn mirror(&mut self, primitive: &Primitive) {
        match &primitive.mark {
            Mark::Dot { center, radius } => {
                if let Some(fill) = primitive.fill {
                    let r = *radius;
                    self.ellipse([center[0] - r, center[1] - r], [center[0] + r, center[1] + r], None, fill);
                }
            }
            Mark::Square { center, half } | Mark::Erase { center, half } => {
                let (a, b) = ([center[0] - half, center[1] - half], [center[0] + half, center[1] + half]);
                if let Some(fill) = primitive.fill {
                    self.fill_rect(a, b, fill);
                }
            }
            Mark::Grain { from, to } => {
                if let Some(color) = primitive.stroke_color() {
                    self.line(*from, *to, 1, color);
                }
            }
            Mark::Shape {
                shape,
                start,
                end,
                width,
            } => {
                let (start, end, width) = (*start, *end, *width);
                if *shape == ShapeKind::Line {
                    if let Some(color) = primitive.stroke_color() {
                        self.line(start, end, width, color);
                    }
                    return;
                }
                if let Some(fill) = primitive.fill {
                    match shape {
                        ShapeKind::Rectangle => self.fill_rect(start, end, fill),
                        ShapeKind::Oval => self.ellipse(start, end, None, fill),
                        _ => {}
                    }
                }
                let Some(outline) = primitive.outline else {
                    return;
                };
                match shape {
                    ShapeKind::Rectangle => {
                        let corners = [start, [end[0], start[1]], end, [start[0], end[1]]];
                        for i in 0..4 {
                            self.line(corners[i], corners[(i + 1) % 4], width, outline);
                        }
                    }
                    ShapeKind::Oval => self.ellipse(start, end, Some(width), outline),
                    ShapeKind::Triangle => {
                        let corners = triangle_vertices(start, end);
                        for i in 0..3 {
                            self.line(corners[i], corners[(i + 1) % 3], width, outline);
                        }
                    }
                    ShapeKind::Line => {}
                }
            }
            Mark::Text {
                position,
                content,
                font,
            } => {
                if let Some(color) = primitive.fill {
                    self.text(*position, content, font, color);
                }
            }
        }
    }

    fn reset(&mut self, background: Color) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgb(background.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color([255, 0, 0]);

    fn pixel(mirror: &ImageMirror, x: u32, y: u32) -> [u8; 3] {
        mirror.image().get_pixel(x, y).0
    }

    #[test]
    fn outline_rectangle_leaves_interior_untouched() {
        let mut mirror = ImageMirror::new(64, 64, Color::WHITE);
        let rect = Primitive::new(
            Mark::Shape {
                shape: ShapeKind::Rectangle,
                start: [10, 10],
                end: [50, 40],
                width: 2,
            },
            None,
            Some(RED),
        );
        mirror.mirror(&rect);
        assert_eq!(pixel(&mirror, 10, 10), RED.0);
        assert_eq!(pixel(&mirror, 30, 40), RED.0);
        assert_eq!(pixel(&mirror, 30, 25), Color::WHITE.0);
    }

    #[test]
    fn dot_fills_its_disc() {
        let mut mirror = ImageMirror::new(32, 32, Color::WHITE);
        mirror.mirror(&Primitive::new(Mark::Dot { center: [16, 16], radius: 4 }, Some(RED), None));
        assert_eq!(pixel(&mirror, 16, 16), RED.0);
        assert_eq!(pixel(&mirror, 16, 12), RED.0);
        assert_eq!(pixel(&mirror, 12, 12), Color::WHITE.0);
    }

    #[test]
    fn marks_past_the_edge_are_clipped() {
        let mut mirror = ImageMirror::new(8, 8, Color::WHITE);
        mirror.mirror(&Primitive::new(Mark::Square { center: [0, 0], half: 20 }, Some(RED), None));
        assert!(mirror.image().pixels().all(|p| p.0 == RED.0));
    }

    #[test]
    fn reset_repaints_background() {
        let mut mirror = ImageMirror::new(8, 8, Color::WHITE);
        mirror.mirror(&Primitive::new(Mark::Square { center: [4, 4], half: 1 }, Some(RED), None));
        mirror.reset(Color::BLACK);
        assert!(mirror.image().pixels().all(|p| p.0 == Color::BLACK.0));
    }

    #[test]
    fn text_without_font_is_skipped() {
        let mut mirror = ImageMirror::new(16, 16, Color::WHITE);
        let text = Primitive::new(
            Mark::Text {
                position: [8, 8],
                content: "A".into(),
                font: Font::new("Arial", 12),
            },
            Some(RED),
            None,
        );
        mirror.mirror(&text);
        assert!(mirror.image().pixels().all(|p| p.0 == Color::WHITE.0));
    }

    #[test]
    fn save_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.png");
        let mirror = ImageMirror::new(4, 4, Color::WHITE);
        mirror.save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_reports_unwritable_path() {
        let mirror = ImageMirror::new(4, 4, Color::WHITE);
        let err = mirror.save(Path::new("/nonexistent/dir/canvas.png")).unwrap_err();
        assert!(err.to_string().contains("saving canvas"));
    }
}
