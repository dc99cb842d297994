use serde::{Deserialize, Serialize};

use crate::geom::{bresenham, points_to_scanlines, Bounds};
use crate::rng::SplitMix64;
use crate::scanline::Scanline;

const CURVE_SEGMENTS: i32 = 20;

/// quadratic Bézier from (x1, y1) to (x2, y2) pulled toward control point (cx, cy)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuadraticBezier {
    pub cx: i32,
    pub cy: i32,
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl QuadraticBezier {
    pub fn new(cx: i32, cy: i32, x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { cx, cy, x1, y1, x2, y2 }
    }

    pub fn setup(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        self.cx = rng.next_in_range(bounds.min_x, bounds.max_x);
        self.cy = rng.next_in_range(bounds.min_y, bounds.max_y);
        self.x1 = bounds.clamp_x(self.cx + rng.next_in_range(-32, 32));
        self.y1 = bounds.clamp_y(self.cy + rng.next_in_range(-32, 32));
        self.x2 = bounds.clamp_x(self.cx + rng.next_in_range(-32, 32));
        self.y2 = bounds.clamp_y(self.cy + rng.next_in_range(-32, 32));
    }

    pub fn mutate(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        let (x, y) = match rng.next_in_range(0, 2) {
            0 => (&mut self.cx, &mut self.cy),
            1 => (&mut self.x1, &mut self.y1),
            _ => (&mut self.x2, &mut self.y2),
        };
        *x = bounds.clamp_x(*x + rng.next_in_range(-8, 8));
        *y = bounds.clamp_y(*y + rng.next_in_range(-8, 8));
    }

    /// point on the curve at t in [0, 1]
    pub fn point_at(&self, t: f64) -> (f64, f64) {
        let tp = 1.0 - t;
        let x = tp * (tp * self.x1 as f64 + t * self.cx as f64) + t * (tp * self.cx as f64 + t * self.x2 as f64);
        let y = tp * (tp * self.y1 as f64 + t * self.cy as f64) + t * (tp * self.cy as f64 + t * self.y2 as f64);
        (x, y)
    }

    pub fn rasterize(&self, bounds: &Bounds) -> Vec<Scanline> {
        let samples: Vec<(i32, i32)> = (0..=CURVE_SEGMENTS)
            .map(|i| {
                let (x, y) = self.point_at(i as f64 / CURVE_SEGMENTS as f64);
                (x.round() as i32, y.round() as i32)
            })
            .collect();

        let mut pixels = Vec::new();
        for pair in samples.windows(2) {
            pixels.extend(bresenham(pair[0].0, pair[0].1, pair[1].0, pair[1].1));
        }
        bounds.trim(points_to_scanlines(pixels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_curve_hits_endpoints() {
        let curve = QuadraticBezier::new(20, 0, 0, 20, 40, 20);
        assert_eq!(curve.point_at(0.0), (0.0, 20.0));
        assert_eq!(curve.point_at(1.0), (40.0, 20.0));
        let bounds = Bounds::of_canvas(64, 64).unwrap();
        let lines = curve.rasterize(&bounds);
        assert!(lines.iter().any(|l| l.y == 20 && l.x1 <= 0));
        assert!(lines.iter().any(|l| l.y == 20 && l.x2 >= 40));
    }

    #[test]
    fn test_no_pixel_covered_twice() {
        let curve = QuadraticBezier::new(30, 2, 2, 30, 60, 40);
        let bounds = Bounds::of_canvas(64, 64).unwrap();
        let mut seen = HashSet::new();
        for line in curve.rasterize(&bounds) {
            for x in line.x1..=line.x2 {
                assert!(seen.insert((x, line.y)));
            }
        }
    }
}
