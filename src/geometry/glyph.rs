//! Text-to-point-cloud via an offscreen alpha surface.
//!
//! A string is drawn centred on a small alpha bitmap, the bitmap is sampled
//! on a 2px grid for covered pixels, and particles are scattered over those
//! pixels with a little jitter so the text has some depth.

use super::shapes::centered;
use font8x8::{UnicodeFonts, BASIC_FONTS, GREEK_FONTS, HIRAGANA_FONTS, LATIN_FONTS};
use rand::Rng;

/// Surface edge length in pixels
pub const SURFACE_SIZE: usize = 200;
/// Pixels with alpha above this are candidates
pub const ALPHA_THRESHOLD: u8 = 128;
/// Sampling step across the surface, both axes
const SCAN_STEP: usize = 2;
/// World units per surface pixel
const PIXEL_SCALE: f32 = 0.15;
/// Jitter span in the text plane
const PLANAR_JITTER: f32 = 0.5;
/// Jitter span along depth
const DEPTH_JITTER: f32 = 2.0;

/// Single-channel coverage bitmap
#[derive(Debug, Clone)]
pub struct GlyphSurface {
    width: usize,
    height: usize,
    alpha: Vec<u8>,
}

impl Default for GlyphSurface {
    fn default() -> Self {
        Self::new(SURFACE_SIZE, SURFACE_SIZE)
    }
}

impl GlyphSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every pixel to transparent
    pub fn clear(&mut self) {
        self.alpha.fill(0);
    }

    /// Fill a rectangle, clipped to the surface
    pub fn fill_rect(&mut self, x: i32, y: i32, w: usize, h: usize, alpha: u8) {
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = (x + w as i32).clamp(0, self.width as i32) as usize;
        let y1 = (y + h as i32).clamp(0, self.height as i32) as usize;
        for row in y0..y1 {
            let start = row * self.width;
            self.alpha[start + x0.min(x1)..start + x1].fill(alpha);
        }
    }

    pub fn alpha_at(&self, x: usize, y: usize) -> u8 {
        self.alpha[y * self.width + x]
    }

    /// Coordinates of covered pixels on the scan grid, mapped to world units
    /// with the surface centre at the origin and y pointing up.
    pub fn covered_points(&self) -> Vec<(f32, f32)> {
        let cx = self.width as f32 / 2.0;
        let cy = self.height as f32 / 2.0;
        let mut points = Vec::new();
        for y in (0..self.height).step_by(SCAN_STEP) {
            for x in (0..self.width).step_by(SCAN_STEP) {
                if self.alpha_at(x, y) > ALPHA_THRESHOLD {
                    points.push(((x as f32 - cx) * PIXEL_SCALE, -(y as f32 - cy) * PIXEL_SCALE));
                }
            }
        }
        points
    }
}

/// Something that can draw text onto a [`GlyphSurface`].
///
/// Hosts with a real font stack can supply their own implementation; the
/// default is [`BitmapTypeface`].
pub trait Typeface {
    /// Draw `text` centred on the surface with full coverage
    fn draw_centered(&self, surface: &mut GlyphSurface, text: &str);
}

/// Built-in face: 8x8 bitmap glyphs, scaled up and emboldened
#[derive(Debug, Clone, Copy)]
pub struct BitmapTypeface {
    /// Largest pixel scale for a glyph cell; short strings use this
    pub max_scale: usize,
}

impl Default for BitmapTypeface {
    fn default() -> Self {
        // 8 * 12 = 96px cells, close to a 100px bold system font
        Self { max_scale: 12 }
    }
}

impl BitmapTypeface {
    /// Row bitmaps for a character, bit 0 being the leftmost pixel
    pub fn glyph(c: char) -> Option<[u8; 8]> {
        BASIC_FONTS
            .get(c)
            .or_else(|| LATIN_FONTS.get(c))
            .or_else(|| GREEK_FONTS.get(c))
            .or_else(|| HIRAGANA_FONTS.get(c))
    }

    /// Largest scale at which `chars` glyph cells fit the surface
    fn fit_scale(&self, surface: &GlyphSurface, chars: usize) -> usize {
        let by_width = surface.width() / (8 * chars.max(1));
        let by_height = surface.height() / 8;
        by_width.min(by_height).clamp(1, self.max_scale.max(1))
    }
}

impl Typeface for BitmapTypeface {
    fn draw_centered(&self, surface: &mut GlyphSurface, text: &str) {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return;
        }

        let scale = self.fit_scale(surface, chars.len());
        // Faux bold: widen every lit cell to the right
        let bold = (scale / 4).max(1);
        let cell = 8 * scale;

        let total_width = (cell * chars.len()) as i32;
        let origin_x = (surface.width() as i32 - total_width) / 2;
        let origin_y = (surface.height() as i32 - cell as i32) / 2;

        for (i, c) in chars.iter().enumerate() {
            let Some(rows) = Self::glyph(*c) else {
                log::debug!("no bitmap glyph for {:?}", c);
                continue;
            };
            let cell_x = origin_x + (i * cell) as i32;
            for (row, bits) in rows.iter().enumerate() {
                for bit in 0..8 {
                    if bits & (1 << bit) != 0 {
                        surface.fill_rect(
                            cell_x + (bit * scale) as i32,
                            origin_y + (row * scale) as i32,
                            scale + bold,
                            scale,
                            u8::MAX,
                        );
                    }
                }
            }
        }
    }
}

/// Rasterize `text` and scatter `count` points over its covered pixels.
///
/// The surface is cleared first. If nothing is covered (empty string, or no
/// glyphs the typeface knows) the result is an all-zero buffer.
pub fn points_from_text<R: Rng>(
    surface: &mut GlyphSurface,
    typeface: &dyn Typeface,
    text: &str,
    count: usize,
    rng: &mut R,
) -> Vec<f32> {
    surface.clear();
    typeface.draw_centered(surface, text);

    let candidates = surface.covered_points();
    let mut positions = vec![0.0; count * 3];
    if candidates.is_empty() {
        log::warn!("text {:?} produced no covered pixels", text);
        return positions;
    }

    for point in positions.chunks_exact_mut(3) {
        let (x, y) = candidates[rng.random_range(0..candidates.len())];
        point[0] = x + centered(rng) * PLANAR_JITTER;
        point[1] = y + centered(rng) * PLANAR_JITTER;
        point[2] = centered(rng) * DEPTH_JITTER;
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut surface = GlyphSurface::new(10, 10);
        surface.fill_rect(-5, 8, 20, 20, 255);

        assert_eq!(surface.alpha_at(0, 8), 255);
        assert_eq!(surface.alpha_at(9, 9), 255);
        assert_eq!(surface.alpha_at(0, 7), 0);
    }

    #[test]
    fn test_fill_rect_fully_outside_is_noop() {
        let mut surface = GlyphSurface::new(10, 10);
        surface.fill_rect(20, 20, 5, 5, 255);
        surface.fill_rect(-10, 0, 5, 5, 255);
        assert!(surface.covered_points().is_empty());
    }

    #[test]
    fn test_text_is_centred() {
        let mut surface = GlyphSurface::default();
        BitmapTypeface::default().draw_centered(&mut surface, "O");

        let points = surface.covered_points();
        assert!(!points.is_empty());
        let n = points.len() as f32;
        let mean_x = points.iter().map(|p| p.0).sum::<f32>() / n;
        let mean_y = points.iter().map(|p| p.1).sum::<f32>() / n;
        assert!(mean_x.abs() < 3.0, "mean x {}", mean_x);
        assert!(mean_y.abs() < 3.0, "mean y {}", mean_y);
    }

    #[test]
    fn test_surface_is_cleared_between_texts() {
        let mut surface = GlyphSurface::default();
        let face = BitmapTypeface::default();
        let mut rng = StdRng::seed_from_u64(9);

        let _ = points_from_text(&mut surface, &face, "WWWW", 10, &mut rng);
        let empty = points_from_text(&mut surface, &face, "", 10, &mut rng);
        assert!(empty.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_unknown_glyphs_collapse_to_origin() {
        let mut surface = GlyphSurface::default();
        let mut rng = StdRng::seed_from_u64(10);
        let positions =
            points_from_text(&mut surface, &BitmapTypeface::default(), "佛", 64, &mut rng);

        assert_eq!(positions.len(), 64 * 3);
        assert!(positions.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_points_stay_on_the_surface() {
        let mut surface = GlyphSurface::default();
        let mut rng = StdRng::seed_from_u64(11);
        let positions =
            points_from_text(&mut surface, &BitmapTypeface::default(), "LOVE", 2000, &mut rng);

        let half = SURFACE_SIZE as f32 / 2.0 * PIXEL_SCALE + PLANAR_JITTER;
        for p in positions.chunks_exact(3) {
            assert!(p[0].abs() <= half && p[1].abs() <= half);
            assert!(p[2].abs() <= DEPTH_JITTER / 2.0);
        }
        // Depth jitter keeps the cloud from being flat
        assert!(positions.chunks_exact(3).any(|p| p[2].abs() > 0.1));
    }
}
