//! Frame buffer abstraction for 8-bit indexed pixels.
//!
//! Provides a safe view into a palette-indexed pixel buffer with
//! bounds-checked access.

use crate::clipper::ClipRect;

/// Width of the simulator screen in pixels, and the row stride.
pub const SCREEN_WIDTH: u32 = 320;
/// Height of the simulator screen in pixels.
pub const SCREEN_HEIGHT: u32 = 200;

/// A view into an indexed-colour pixel buffer.
///
/// Wraps a 1D slice with width/height metadata to enable safe 2D pixel
/// access. This is a borrowed view, not an owning type - it's meant to be
/// created temporarily when you need to pass the buffer + dimensions
/// together.
pub struct FrameBuffer<'a> {
    pixels: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from a pixel slice and dimensions.
    pub fn new(pixels: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width * height) as usize,
            "Pixel buffer size doesn't match dimensions"
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    /// A 320x200 view, the layout every drawing routine assumes.
    pub fn screen(pixels: &'a mut [u8]) -> Self {
        Self::new(pixels, SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        self.pixels
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Set a pixel. Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        if self.in_bounds(x, y) {
            self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
        }
    }

    /// Get the colour at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u8> {
        if self.in_bounds(x, y) {
            Some(self.pixels[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    /// Fill the inclusive run between `x1` and `x2` on row `y`, in either order.
    ///
    /// The run is clipped to the buffer.
    #[inline]
    pub fn fill_span(&mut self, y: i32, x1: i32, x2: i32, color: u8) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let (start, end) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = start.max(0);
        let end = end.min(self.width as i32 - 1);
        if start > end {
            return;
        }
        let row = (y as u32 * self.width) as usize;
        self.pixels[row + start as usize..=row + end as usize].fill(color);
    }

    /// Fill an inclusive rectangle.
    pub fn fill_rect(&mut self, rect: &ClipRect, color: u8) {
        for y in rect.ymin..=rect.ymax {
            self.fill_span(y, rect.xmin, rect.xmax, color);
        }
    }

    /// Fill the whole buffer.
    pub fn clear(&mut self, color: u8) {
        self.pixels.fill(color);
    }
}
