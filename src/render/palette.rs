//! The 256-entry colour table behind the indexed framebuffer.

use std::path::Path;

use image::{ImageResult, RgbImage};

use super::framebuffer::FrameBuffer;

pub const PALETTE_SIZE: usize = 256;

/// The sixteen standard colours at the start of the table.
const BASE_COLORS: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0xAA],
    [0x00, 0xAA, 0x00],
    [0x00, 0xAA, 0xAA],
    [0xAA, 0x00, 0x00],
    [0xAA, 0x00, 0xAA],
    [0xAA, 0x55, 0x00],
    [0xAA, 0xAA, 0xAA],
    [0x55, 0x55, 0x55],
    [0x55, 0x55, 0xFF],
    [0x55, 0xFF, 0x55],
    [0x55, 0xFF, 0xFF],
    [0xFF, 0x55, 0x55],
    [0xFF, 0x55, 0xFF],
    [0xFF, 0xFF, 0x55],
    [0xFF, 0xFF, 0xFF],
];

/// Full-brightness colour of each 16-shade ramp after the grey ramp.
const RAMP_HUES: [[u8; 3]; 14] = [
    [0xFF, 0x00, 0x00],
    [0xFF, 0x80, 0x00],
    [0xFF, 0xFF, 0x00],
    [0x80, 0xFF, 0x00],
    [0x00, 0xC0, 0x00],
    [0x00, 0xFF, 0x80],
    [0x00, 0xFF, 0xFF],
    [0x00, 0x80, 0xFF],
    [0x00, 0x00, 0xFF],
    [0x80, 0x00, 0xFF],
    [0xFF, 0x00, 0xFF],
    [0xFF, 0x00, 0x80],
    [0xC0, 0x90, 0x60],
    [0x80, 0x80, 0x60],
];

/// Maps 8-bit colour indices to RGB.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: [[u8; 3]; PALETTE_SIZE],
}

impl Default for Palette {
    /// Sixteen standard colours, a grey ramp, then fourteen hue ramps of
    /// sixteen shades each, darkest first.
    fn default() -> Self {
        let mut colors = [[0u8; 3]; PALETTE_SIZE];
        colors[..16].copy_from_slice(&BASE_COLORS);
        for shade in 0..16 {
            let level = (shade * 17) as u8;
            colors[16 + shade] = [level; 3];
        }
        for (ramp, hue) in RAMP_HUES.iter().enumerate() {
            for shade in 0..16 {
                colors[32 + ramp * 16 + shade] = hue.map(|c| scale(c, shade as u32 + 1, 16));
            }
        }
        Self { colors }
    }
}

#[inline]
fn scale(channel: u8, num: u32, den: u32) -> u8 {
    (channel as u32 * num / den) as u8
}

impl Palette {
    pub fn new(colors: [[u8; 3]; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    /// Builds a palette from packed RGB triples. Returns `None` unless
    /// exactly 768 bytes are given.
    pub fn from_rgb_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != PALETTE_SIZE * 3 {
            return None;
        }
        let mut colors = [[0u8; 3]; PALETTE_SIZE];
        for (dst, src) in colors.iter_mut().zip(bytes.chunks_exact(3)) {
            dst.copy_from_slice(src);
        }
        Some(Self { colors })
    }

    #[inline]
    pub fn rgb(&self, index: u8) -> [u8; 3] {
        self.colors[index as usize]
    }

    pub fn set(&mut self, index: u8, rgb: [u8; 3]) {
        self.colors[index as usize] = rgb;
    }

    /// Packed 0xAARRGGBB, fully opaque.
    #[inline]
    pub fn argb(&self, index: u8) -> u32 {
        let [r, g, b] = self.rgb(index);
        0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }

    /// Copy of this palette with every channel scaled by `step / steps`.
    ///
    /// Stepping `step` from 0 to `steps` fades in from black; stepping down
    /// fades out. `step` above `steps` is treated as full brightness.
    pub fn fade(&self, step: u32, steps: u32) -> Palette {
        if steps == 0 || step >= steps {
            return self.clone();
        }
        let mut colors = self.colors;
        for rgb in colors.iter_mut() {
            *rgb = rgb.map(|c| scale(c, step, steps));
        }
        Palette { colors }
    }

    /// Expand indexed pixels into ARGB8888 bytes in native order, the
    /// layout a streaming texture expects.
    pub fn expand_into(&self, indexed: &[u8], argb: &mut Vec<u8>) {
        argb.clear();
        argb.reserve(indexed.len() * 4);
        for &index in indexed {
            argb.extend_from_slice(&self.argb(index).to_ne_bytes());
        }
    }

    /// Write the framebuffer to an image file, format chosen by extension.
    pub fn save_png(&self, buffer: &FrameBuffer, path: impl AsRef<Path>) -> ImageResult<()> {
        let mut image = RgbImage::new(buffer.width(), buffer.height());
        for (pixel, &index) in image.pixels_mut().zip(buffer.pixels()) {
            pixel.0 = self.rgb(index);
        }
        image.save(path)
    }
}
