//! Software frame surface over a pixel buffer.

use line_drawing::Bresenham;
use vek::{Extent2, Vec2};

/// Mutable drawing target for one frame.
///
/// Pixels are packed as `0xAARRGGBB`.
/// All operations clamp to the surface, drawing outside it is not an error.
pub struct Canvas {
    /// Size of the surface in pixels.
    size: Extent2<usize>,
    /// The pixel buffer.
    buffer: Vec<u32>,
}

impl Canvas {
    /// Create a surface filled with fully transparent black.
    pub fn new(size: Extent2<u32>) -> Self {
        let size = size.as_::<usize>();
        let buffer = vec![0; size.product()];

        Self { size, buffer }
    }

    /// Set a single pixel, ignoring out of bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, position: Vec2<i64>, color: u32) {
        if position.x < 0
            || position.y < 0
            || position.x >= self.size.w as i64
            || position.y >= self.size.h as i64
        {
            return;
        }

        let index = position.x as usize + position.y as usize * self.size.w;
        self.buffer[index] = color;
    }

    /// Fill the whole surface with a single color.
    #[inline]
    pub fn fill(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill an axis-aligned rectangle, clamped to the surface.
    pub fn fill_rect(&mut self, position: Vec2<f32>, size: Extent2<f32>, color: u32) {
        let start_x = (position.x.floor().max(0.0) as usize).min(self.size.w);
        let start_y = (position.y.floor().max(0.0) as usize).min(self.size.h);
        // Degenerate rectangles, from a negative size or a negative viewport
        // scale, are empty
        let end_x = ((position.x + size.w).ceil().max(0.0) as usize)
            .min(self.size.w)
            .max(start_x);
        let end_y = ((position.y + size.h).ceil().max(0.0) as usize)
            .min(self.size.h)
            .max(start_y);

        for y in start_y..end_y {
            let row = y * self.size.w;
            self.buffer[(row + start_x)..(row + end_x)].fill(color);
        }
    }

    /// Draw a one pixel wide line using Bresenham's line algorithm.
    pub fn draw_line(&mut self, start: Vec2<f32>, end: Vec2<f32>, color: u32) {
        for (x, y) in Bresenham::new(
            (start.x.round() as i64, start.y.round() as i64),
            (end.x.round() as i64, end.y.round() as i64),
        ) {
            self.set_pixel(Vec2::new(x, y), color);
        }
    }

    /// Blit a whole source image with alpha blending.
    pub fn blit(&mut self, pixels: &[u32], size: Extent2<u32>, position: Vec2<f32>) {
        self.blit_region(pixels, size.w as usize, Vec2::zero(), size, position, None);
    }

    /// Blit a sub-rectangle of a source image with alpha blending.
    ///
    /// When `tint` is set the source only acts as an alpha mask and the tint
    /// supplies the color channels, which is how bitmap font glyphs are drawn.
    pub fn blit_region(
        &mut self,
        pixels: &[u32],
        stride: usize,
        source_position: Vec2<u32>,
        source_size: Extent2<u32>,
        position: Vec2<f32>,
        tint: Option<u32>,
    ) {
        let target = Vec2::new(position.x.round() as i64, position.y.round() as i64);

        for y in 0..source_size.h as i64 {
            let target_y = target.y + y;
            if target_y < 0 || target_y >= self.size.h as i64 {
                continue;
            }

            let source_row = (source_position.y as i64 + y) as usize * stride;
            let target_row = target_y as usize * self.size.w;

            for x in 0..source_size.w as i64 {
                let target_x = target.x + x;
                if target_x < 0 || target_x >= self.size.w as i64 {
                    continue;
                }

                let mut source = pixels[source_row + (source_position.x as i64 + x) as usize];
                if let Some(tint) = tint {
                    source = (source & 0xFF00_0000) | (tint & 0x00FF_FFFF);
                }

                let index = target_row + target_x as usize;
                self.buffer[index] = blend(self.buffer[index], source);
            }
        }
    }

    /// Reallocate for a new size, the surface content is reset.
    pub fn resize(&mut self, size: Extent2<u32>) {
        self.size = size.as_::<usize>();
        self.buffer = vec![0; self.size.product()];
    }

    /// Size in pixels.
    #[inline]
    pub fn size(&self) -> Extent2<u32> {
        self.size.as_()
    }

    /// The raw pixel buffer.
    #[inline]
    pub fn buffer(&self) -> &[u32] {
        &self.buffer
    }
}

/// Source-over blend two `0xAARRGGBB` pixels.
#[inline]
fn blend(below: u32, above: u32) -> u32 {
    let alpha = above >> 24;
    match alpha {
        // Fully transparent source leaves the target untouched
        0 => below,
        255 => above,
        _ => {
            let inverse = 255 - alpha;
            let channel = |shift: u32| {
                let above_channel = (above >> shift) & 0xFF;
                let below_channel = (below >> shift) & 0xFF;

                ((above_channel * alpha + below_channel * inverse) / 255) << shift
            };

            0xFF00_0000 | channel(16) | channel(8) | channel(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use vek::{Extent2, Vec2};

    use super::Canvas;

    #[test]
    fn fill_rect_clamps_to_surface() {
        let mut canvas = Canvas::new(Extent2::new(8, 8));
        canvas.fill(0xFF000000);
        canvas.fill_rect(Vec2::new(-4.0, 6.0), Extent2::new(100.0, 100.0), 0xFFFF0000);

        // Everything above the rectangle is untouched
        assert_eq!(canvas.buffer()[5 * 8 + 3], 0xFF000000);
        // The two bottom rows are filled edge to edge
        assert!(canvas.buffer()[6 * 8..].iter().all(|px| *px == 0xFFFF0000));
    }

    #[test]
    fn fill_rect_with_negative_size_is_empty() {
        let mut canvas = Canvas::new(Extent2::new(8, 8));
        canvas.fill(0xFF000000);

        canvas.fill_rect(Vec2::new(10.0, 10.0), Extent2::new(-5.0, 5.0), 0xFFFF0000);
        canvas.fill_rect(Vec2::new(4.0, 4.0), Extent2::new(-2.0, -2.0), 0xFFFF0000);

        assert!(canvas.buffer().iter().all(|px| *px == 0xFF000000));
    }

    #[test]
    fn line_endpoints_are_drawn() {
        let mut canvas = Canvas::new(Extent2::new(8, 8));
        canvas.draw_line(Vec2::new(1.0, 1.0), Vec2::new(6.0, 6.0), 0xFFFFFFFF);

        assert_eq!(canvas.buffer()[8 + 1], 0xFFFFFFFF);
        assert_eq!(canvas.buffer()[6 * 8 + 6], 0xFFFFFFFF);
        assert_eq!(canvas.buffer()[0], 0);
    }

    #[test]
    fn blit_skips_transparent_pixels() {
        let mut canvas = Canvas::new(Extent2::new(4, 1));
        canvas.fill(0xFF0000FF);

        // One opaque and one transparent source pixel
        canvas.blit(&[0xFF00FF00, 0x0000FF00], Extent2::new(2, 1), Vec2::new(1.0, 0.0));

        assert_eq!(canvas.buffer(), [0xFF0000FF, 0xFF00FF00, 0xFF0000FF, 0xFF0000FF]);
    }

    #[test]
    fn blit_blends_partial_alpha() {
        let mut canvas = Canvas::new(Extent2::new(1, 1));
        canvas.fill(0xFF000000);

        // Half transparent white over black lands in the middle
        canvas.blit(&[0x80FFFFFF], Extent2::new(1, 1), Vec2::new(0.0, 0.0));

        let pixel = canvas.buffer()[0];
        assert_eq!(pixel >> 24, 0xFF);
        let red = (pixel >> 16) & 0xFF;
        assert!((0x7E..=0x82).contains(&red));
    }

    #[test]
    fn blit_clips_at_the_edges() {
        let mut canvas = Canvas::new(Extent2::new(2, 2));
        let source = [0xFFFFFFFF; 4];

        canvas.blit(&source, Extent2::new(2, 2), Vec2::new(-1.0, -1.0));

        assert_eq!(canvas.buffer(), [0xFFFFFFFF, 0, 0, 0]);
    }
}
