//! Headless RGBA overlay canvas
//!
//! Pixel-buffer implementation of [`OverlayCanvas`] used when no UI surface
//! is wired in (tests, annotated screenshots). Boxes are 2-px outlines;
//! labels are painted as a filled tag strip above the box origin — glyph
//! rendering is left to a presentation layer.

use crate::overlay::renderer::{Color, OverlayCanvas};
use crate::source::FrameSize;

const STROKE_WIDTH: u32 = 2;
const LABEL_HEIGHT: u32 = 14;
const LABEL_CHAR_WIDTH: u32 = 7;

/// RGBA8 raster surface sized to the current frame
#[derive(Debug, Default)]
pub struct RasterOverlay {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixels, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some(Color {
            r: self.pixels[i],
            g: self.pixels[i + 1],
            b: self.pixels[i + 2],
            a: self.pixels[i + 3],
        })
    }

    fn put_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = ((y as u32 * self.width + x as u32) * 4) as usize;
        self.pixels[i] = color.r;
        self.pixels[i + 1] = color.g;
        self.pixels[i + 2] = color.b;
        self.pixels[i + 3] = color.a;
    }

    fn fill_span(&mut self, x0: i64, x1: i64, y0: i64, y1: i64, color: Color) {
        for y in y0..y1 {
            for x in x0..x1 {
                self.put_pixel(x, y, color);
            }
        }
    }
}

impl OverlayCanvas for RasterOverlay {
    fn resize(&mut self, size: FrameSize) {
        if self.width != size.width || self.height != size.height {
            self.width = size.width;
            self.height = size.height;
            self.pixels = vec![0u8; (size.width * size.height * 4) as usize];
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let (x0, y0) = (x as i64, y as i64);
        let (x1, y1) = ((x + width) as i64, (y + height) as i64);
        let s = STROKE_WIDTH as i64;

        self.fill_span(x0, x1, y0, y0 + s, color); // top
        self.fill_span(x0, x1, y1 - s, y1, color); // bottom
        self.fill_span(x0, x0 + s, y0, y1, color); // left
        self.fill_span(x1 - s, x1, y0, y1, color); // right
    }

    fn fill_label(&mut self, text: &str, x: f32, y: f32, color: Color) {
        let tag_width = (text.chars().count() as u32 * LABEL_CHAR_WIDTH).max(LABEL_CHAR_WIDTH);
        let x0 = x as i64;
        let y1 = y as i64;
        self.fill_span(x0, x0 + tag_width as i64, y1 - LABEL_HEIGHT as i64, y1, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::renderer::WARNING_COLOR;

    const BLANK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    #[test]
    fn test_resize_allocates_to_frame() {
        let mut overlay = RasterOverlay::new();
        overlay.resize(FrameSize {
            width: 8,
            height: 4,
        });
        assert_eq!(overlay.pixels().len(), 8 * 4 * 4);

        overlay.resize(FrameSize {
            width: 16,
            height: 8,
        });
        assert_eq!(overlay.pixels().len(), 16 * 8 * 4);
    }

    #[test]
    fn test_stroke_rect_outline_only() {
        let mut overlay = RasterOverlay::new();
        overlay.resize(FrameSize {
            width: 32,
            height: 32,
        });
        overlay.stroke_rect(4.0, 4.0, 20.0, 20.0, WARNING_COLOR);

        // Border painted, interior untouched.
        assert_eq!(overlay.pixel(4, 4), Some(WARNING_COLOR));
        assert_eq!(overlay.pixel(23, 23), Some(WARNING_COLOR));
        assert_eq!(overlay.pixel(14, 14), Some(BLANK));
    }

    #[test]
    fn test_clear_erases() {
        let mut overlay = RasterOverlay::new();
        overlay.resize(FrameSize {
            width: 8,
            height: 8,
        });
        overlay.stroke_rect(0.0, 0.0, 8.0, 8.0, WARNING_COLOR);
        overlay.clear();
        assert!(overlay.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_out_of_bounds_drawing_is_clipped() {
        let mut overlay = RasterOverlay::new();
        overlay.resize(FrameSize {
            width: 8,
            height: 8,
        });
        // Must not panic; off-surface spans are dropped.
        overlay.stroke_rect(-10.0, -10.0, 100.0, 100.0, WARNING_COLOR);
        overlay.fill_label("person 91%", -5.0, 2.0, WARNING_COLOR);
    }
}
