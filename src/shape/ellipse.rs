use serde::{Deserialize, Serialize};

use crate::geom::Bounds;
use crate::rng::SplitMix64;
use crate::scanline::Scanline;

/// axis-aligned ellipse with radii rx, ry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ellipse {
    pub x: i32,
    pub y: i32,
    pub rx: i32,
    pub ry: i32,
}

impl Ellipse {
    pub fn new(x: i32, y: i32, rx: i32, ry: i32) -> Self {
        Self { x, y, rx, ry }
    }

    pub fn setup(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        self.x = rng.next_in_range(bounds.min_x, bounds.max_x);
        self.y = rng.next_in_range(bounds.min_y, bounds.max_y);
        self.rx = rng.next_in_range(1, 32);
        self.ry = rng.next_in_range(1, 32);
    }

    pub fn mutate(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        match rng.next_in_range(0, 2) {
            0 => {
                self.x = bounds.clamp_x(self.x + rng.next_in_range(-16, 16));
                self.y = bounds.clamp_y(self.y + rng.next_in_range(-16, 16));
            }
            1 => {
                let max_rx = (bounds.width() - 1).max(1);
                self.rx = (self.rx + rng.next_in_range(-16, 16)).clamp(1, max_rx);
            }
            _ => {
                let max_ry = (bounds.height() - 1).max(1);
                self.ry = (self.ry + rng.next_in_range(-16, 16)).clamp(1, max_ry);
            }
        }
    }

    /// rows are produced in pairs mirrored around the centre; the centre row once.
    pub fn rasterize(&self, bounds: &Bounds) -> Vec<Scanline> {
        if self.rx <= 0 || self.ry <= 0 {
            return Vec::new();
        }
        let aspect = self.rx as f64 / self.ry as f64;
        let ry2 = (self.ry * self.ry) as f64;

        let mut lines = Vec::with_capacity(self.ry as usize * 2 + 1);
        for dy in 0..=self.ry {
            let s = ((ry2 - (dy * dy) as f64).sqrt() * aspect) as i32;
            lines.push(Scanline::new(self.y - dy, self.x - s, self.x + s));
            if dy > 0 {
                lines.push(Scanline::new(self.y + dy, self.x - s, self.x + s));
            }
        }
        bounds.trim(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_wide_ellipse_extents() {
        let bounds = Bounds::of_canvas(500, 500).unwrap();
        let lines = Ellipse::new(250, 250, 245, 100).rasterize(&bounds);
        assert_eq!(lines.len(), 201);
        let rows: HashSet<i32> = lines.iter().map(|l| l.y).collect();
        assert_eq!(rows.len(), lines.len());
        let centre = lines.iter().find(|l| l.y == 250).unwrap();
        assert_eq!((centre.x1, centre.x2), (5, 495));
    }

    #[test]
    fn test_partially_offscreen_is_trimmed() {
        let bounds = Bounds::of_canvas(20, 20).unwrap();
        let lines = Ellipse::new(0, 0, 8, 4).rasterize(&bounds);
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.x1 == 0 && l.y >= 0));
    }
}
