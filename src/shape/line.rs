use serde::{Deserialize, Serialize};

use crate::geom::{bresenham, points_to_scanlines, Bounds};
use crate::rng::SplitMix64;
use crate::scanline::Scanline;

/// one-pixel-wide segment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Line {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn setup(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        self.x1 = rng.next_in_range(bounds.min_x, bounds.max_x);
        self.y1 = rng.next_in_range(bounds.min_y, bounds.max_y);
        self.x2 = bounds.clamp_x(self.x1 + rng.next_in_range(-32, 32));
        self.y2 = bounds.clamp_y(self.y1 + rng.next_in_range(-32, 32));
    }

    pub fn mutate(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        match rng.next_in_range(0, 1) {
            0 => {
                self.x1 = bounds.clamp_x(self.x1 + rng.next_in_range(-16, 16));
                self.y1 = bounds.clamp_y(self.y1 + rng.next_in_range(-16, 16));
            }
            _ => {
                self.x2 = bounds.clamp_x(self.x2 + rng.next_in_range(-16, 16));
                self.y2 = bounds.clamp_y(self.y2 + rng.next_in_range(-16, 16));
            }
        }
    }

    pub fn rasterize(&self, bounds: &Bounds) -> Vec<Scanline> {
        let points = bresenham(self.x1, self.y1, self.x2, self.y2);
        bounds.trim(points_to_scanlines(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanline::pixel_count;

    #[test]
    fn test_horizontal_line_is_one_run() {
        let bounds = Bounds::of_canvas(32, 32).unwrap();
        let lines = Line::new(3, 7, 12, 7).rasterize(&bounds);
        assert_eq!(lines, vec![Scanline::new(7, 3, 12)]);
    }

    #[test]
    fn test_segment_beside_canvas_collapses_onto_edge() {
        let bounds = Bounds::of_canvas(10, 10).unwrap();
        let lines = Line::new(-6, 2, -1, 2).rasterize(&bounds);
        assert_eq!(lines, vec![Scanline::new(2, 0, 0)]);
    }

    #[test]
    fn test_diagonal_pixel_count() {
        let bounds = Bounds::of_canvas(32, 32).unwrap();
        let lines = Line::new(0, 0, 9, 9).rasterize(&bounds);
        assert_eq!(lines.len(), 10);
        assert_eq!(pixel_count(&lines), 10);
    }
}
