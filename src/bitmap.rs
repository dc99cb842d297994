// RGBA pixel buffer + source-over compositing
//
// pixels are stored un-premultiplied, row-major, one `Rgba` per pixel.
// `draw` is the only operation that blends; it touches scanline pixels only.

use serde::{Deserialize, Serialize};

use crate::error::{GeometrizeError, Result};
use crate::scanline::Scanline;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Rgba { a, ..self }
    }

    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// blend one 8-bit channel: (src*a + dst*(255-a)) / 255, rounded
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u32) -> u8 {
    ((src as u32 * alpha + dst as u32 * (255 - alpha) + 127) / 255) as u8
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Bitmap {
    /// bitmap filled with one color
    pub fn new(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// build from tightly packed RGBA bytes (4 per pixel, row-major).
    pub fn from_rgba(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GeometrizeError::EmptyBitmap { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(GeometrizeError::PixelCount { width, height, expected, actual: data.len() });
        }
        let pixels = data
            .chunks_exact(4)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
            .collect();
        Ok(Self { width, height, pixels })
    }

    /// packed RGBA bytes, e.g. for an encoder
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_array()).collect()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        self.pixels[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// pixels of one scanline. the line must already be trimmed to this bitmap.
    /// an inverted (empty) line yields an empty span.
    #[inline]
    pub(crate) fn row_span(&self, line: &Scanline) -> &[Rgba] {
        if line.is_empty() {
            return &[];
        }
        let start = self.index(line.x1 as u32, line.y as u32);
        &self.pixels[start..=start + (line.x2 - line.x1) as usize]
    }

    #[inline]
    fn row_span_mut(&mut self, line: &Scanline) -> &mut [Rgba] {
        if line.is_empty() {
            return &mut [];
        }
        let start = self.index(line.x1 as u32, line.y as u32);
        &mut self.pixels[start..=start + (line.x2 - line.x1) as usize]
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// per-channel mean over the whole image (truncated). transparent black when empty.
    pub fn average_color(&self) -> Rgba {
        profiling::scope!("Bitmap::average_color");
        if self.pixels.is_empty() {
            return Rgba::TRANSPARENT;
        }
        let mut sums = [0u64; 4];
        for px in &self.pixels {
            sums[0] += px.r as u64;
            sums[1] += px.g as u64;
            sums[2] += px.b as u64;
            sums[3] += px.a as u64;
        }
        let n = self.pixels.len() as u64;
        Rgba::new((sums[0] / n) as u8, (sums[1] / n) as u8, (sums[2] / n) as u8, (sums[3] / n) as u8)
    }

    /// composite `color` over every covered pixel with the source-over operator.
    /// lines must be trimmed to this bitmap (rasterizers guarantee it).
    pub fn draw(&mut self, lines: &[Scanline], color: Rgba) {
        profiling::scope!("Bitmap::draw");
        let alpha = color.a as u32;
        if alpha == 0 {
            return;
        }
        for line in lines {
            for px in self.row_span_mut(line) {
                if alpha == 255 {
                    *px = color;
                    continue;
                }
                px.r = blend_channel(color.r, px.r, alpha);
                px.g = blend_channel(color.g, px.g, alpha);
                px.b = blend_channel(color.b, px.b, alpha);
                px.a = blend_channel(255, px.a, alpha);
            }
        }
    }

    /// copy the pixels under `lines` from `source` (same size) into this bitmap.
    pub fn copy_lines(&mut self, source: &Bitmap, lines: &[Scanline]) {
        debug_assert_eq!((self.width, self.height), (source.width, source.height));
        for line in lines {
            self.row_span_mut(line).copy_from_slice(source.row_span(line));
        }
    }
}
