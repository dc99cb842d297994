use serde::{Deserialize, Serialize};

use crate::geom::{polygon_scanlines, Bounds};
use crate::rng::SplitMix64;
use crate::scanline::Scanline;

/// rectangle rotated by `angle` degrees about its centre
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RotatedRectangle {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub angle: i32,
}

impl RotatedRectangle {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, angle: i32) -> Self {
        Self { x1, y1, x2, y2, angle }
    }

    pub fn setup(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        self.x1 = rng.next_in_range(bounds.min_x, bounds.max_x);
        self.y1 = rng.next_in_range(bounds.min_y, bounds.max_y);
        self.x2 = bounds.clamp_x(self.x1 + rng.next_in_range(1, 32));
        self.y2 = bounds.clamp_y(self.y1 + rng.next_in_range(1, 32));
        self.angle = rng.next_in_range(0, 360);
    }

    pub fn mutate(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        match rng.next_in_range(0, 2) {
            0 => {
                self.x1 = bounds.clamp_x(self.x1 + rng.next_in_range(-16, 16));
                self.y1 = bounds.clamp_y(self.y1 + rng.next_in_range(-16, 16));
            }
            1 => {
                self.x2 = bounds.clamp_x(self.x2 + rng.next_in_range(-16, 16));
                self.y2 = bounds.clamp_y(self.y2 + rng.next_in_range(-16, 16));
            }
            _ => {
                self.angle = (self.angle + rng.next_in_range(-4, 4)).clamp(0, 360);
            }
        }
    }

    /// corner points after rotation, in winding order
    pub fn corners(&self) -> [(f64, f64); 4] {
        let (left, right) = (self.x1.min(self.x2) as f64, self.x1.max(self.x2) as f64);
        let (top, bottom) = (self.y1.min(self.y2) as f64, self.y1.max(self.y2) as f64);
        let cx = (left + right) / 2.0;
        let cy = (top + bottom) / 2.0;

        let (sin, cos) = (self.angle as f64).to_radians().sin_cos();
        let rotate = |x: f64, y: f64| {
            let (ox, oy) = (x - cx, y - cy);
            (ox * cos - oy * sin + cx, ox * sin + oy * cos + cy)
        };

        [
            rotate(left, top),
            rotate(right, top),
            rotate(right, bottom),
            rotate(left, bottom),
        ]
    }

    pub fn rasterize(&self, bounds: &Bounds) -> Vec<Scanline> {
        bounds.trim(polygon_scanlines(&self.corners()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_angle_matches_axis_aligned() {
        let bounds = Bounds::of_canvas(64, 64).unwrap();
        let rotated = RotatedRectangle::new(5, 5, 20, 12, 0).rasterize(&bounds);
        let plain = crate::shape::Rectangle::new(5, 5, 20, 12).rasterize(&bounds);
        assert_eq!(rotated, plain);
    }

    #[test]
    fn test_rotation_keeps_one_line_per_row() {
        let bounds = Bounds::of_canvas(64, 64).unwrap();
        let lines = RotatedRectangle::new(10, 10, 40, 20, 45).rasterize(&bounds);
        assert!(!lines.is_empty());
        for pair in lines.windows(2) {
            assert!(pair[0].y < pair[1].y);
        }
    }

    #[test]
    fn test_angle_mutation_clamped() {
        let bounds = Bounds::of_canvas(32, 32).unwrap();
        let mut rng = SplitMix64::new(11);
        let mut shape = RotatedRectangle::new(1, 1, 4, 4, 359);
        for _ in 0..300 {
            shape.mutate(&bounds, &mut rng);
            assert!((0..=360).contains(&shape.angle));
        }
    }
}
