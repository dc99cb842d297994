use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;

/// horizontal run of pixels on row `y`, covering x1..=x2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scanline {
    pub y: i32,
    pub x1: i32,
    pub x2: i32,
}

impl Scanline {
    #[inline]
    pub const fn new(y: i32, x1: i32, x2: i32) -> Self {
        Scanline { y, x1, x2 }
    }

    /// number of pixels covered (0 for an inverted run)
    #[inline]
    pub fn len(&self) -> usize {
        if self.x1 > self.x2 { 0 } else { (self.x2 - self.x1 + 1) as usize }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x1 > self.x2
    }

    /// clamp into [min_x, max_x) x [min_y, max_y).
    /// returns None when the row is out of range or the clamped run is inverted.
    /// a run lying wholly beside the area collapses onto its edge column.
    pub fn trimmed(&self, min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Scanline> {
        if self.y < min_y || self.y >= max_y {
            return None;
        }
        let x1 = self.x1.clamp(min_x, max_x - 1);
        let x2 = self.x2.clamp(min_x, max_x - 1);
        if x1 > x2 {
            return None;
        }
        Some(Scanline { y: self.y, x1, x2 })
    }
}

/// trim every line, dropping the ones that fall outside the area.
pub fn trim_scanlines(lines: Vec<Scanline>, min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Vec<Scanline> {
    lines
        .into_iter()
        .filter_map(|line| line.trimmed(min_x, min_y, max_x, max_y))
        .collect()
}

/// total pixel coverage of a scanline set
pub fn pixel_count(lines: &[Scanline]) -> usize {
    lines.iter().map(Scanline::len).sum()
}

/// true if any pixel under the lines has alpha below `min_alpha` in `image`.
pub fn scanlines_contain_transparent_pixels(lines: &[Scanline], image: &Bitmap, min_alpha: u8) -> bool {
    let width = image.width() as i32;
    let height = image.height() as i32;
    lines
        .iter()
        .filter_map(|line| line.trimmed(0, 0, width, height))
        .any(|line| (line.x1..=line.x2).any(|x| image.get(x as u32, line.y as u32).a < min_alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Rgba;

    #[test]
    fn test_trim_clamps_into_range() {
        let line = Scanline::new(3, -5, 20);
        assert_eq!(line.trimmed(0, 0, 10, 10), Some(Scanline::new(3, 0, 9)));
    }

    #[test]
    fn test_trim_drops_rows_outside() {
        assert_eq!(Scanline::new(-1, 0, 5).trimmed(0, 0, 10, 10), None);
        assert_eq!(Scanline::new(10, 0, 5).trimmed(0, 0, 10, 10), None);
    }

    #[test]
    fn test_trim_collapses_runs_beside_the_area() {
        assert_eq!(Scanline::new(2, -8, -1).trimmed(0, 0, 10, 10), Some(Scanline::new(2, 0, 0)));
        assert_eq!(Scanline::new(2, 10, 14).trimmed(0, 0, 10, 10), Some(Scanline::new(2, 9, 9)));
    }

    #[test]
    fn test_trim_drops_inverted_runs() {
        assert_eq!(Scanline::new(2, 6, 4).trimmed(0, 0, 10, 10), None);
        assert_eq!(Scanline::new(2, 14, 10).trimmed(0, 0, 10, 10), None);
    }

    #[test]
    fn test_trim_scanlines_keeps_order() {
        let lines = vec![
            Scanline::new(0, 0, 3),
            Scanline::new(50, 0, 3),
            Scanline::new(1, 8, 12),
            Scanline::new(2, -4, -2),
        ];
        let trimmed = trim_scanlines(lines, 0, 0, 10, 10);
        assert_eq!(trimmed, vec![Scanline::new(0, 0, 3), Scanline::new(1, 8, 9), Scanline::new(2, 0, 0)]);
        assert_eq!(pixel_count(&trimmed), 7);
    }

    #[test]
    fn test_transparent_pixels_detected() {
        let mut image = Bitmap::new(4, 4, Rgba::new(255, 255, 255, 255));
        image.set(2, 1, Rgba::new(0, 0, 0, 10));
        assert!(scanlines_contain_transparent_pixels(&[Scanline::new(1, 0, 3)], &image, 128));
        assert!(!scanlines_contain_transparent_pixels(&[Scanline::new(0, 0, 3)], &image, 128));
        // the run's right end is inclusive
        assert!(scanlines_contain_transparent_pixels(&[Scanline::new(1, 0, 2)], &image, 128));
    }
}
