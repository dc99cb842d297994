use serde::{Deserialize, Serialize};

use crate::geom::{bresenham, points_to_scanlines, Bounds};
use crate::rng::SplitMix64;
use crate::scanline::Scanline;

const POLYLINE_POINTS: usize = 4;

/// open chain of connected segments
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<(i32, i32)>,
}

impl Polyline {
    pub fn new(points: Vec<(i32, i32)>) -> Self {
        Self { points }
    }

    /// scatter the vertices around one random anchor
    pub fn setup(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        let start_x = rng.next_in_range(bounds.min_x, bounds.max_x);
        let start_y = rng.next_in_range(bounds.min_y, bounds.max_y);
        self.points = (0..POLYLINE_POINTS)
            .map(|_| {
                (
                    bounds.clamp_x(start_x + rng.next_in_range(-32, 32)),
                    bounds.clamp_y(start_y + rng.next_in_range(-32, 32)),
                )
            })
            .collect();
    }

    pub fn mutate(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        if self.points.is_empty() {
            return;
        }
        let i = rng.next_in_range(0, self.points.len() as i32 - 1) as usize;
        let (x, y) = self.points[i];
        self.points[i] = (
            bounds.clamp_x(x + rng.next_in_range(-64, 64)),
            bounds.clamp_y(y + rng.next_in_range(-64, 64)),
        );
    }

    /// segments share their joints, so pixels are de-duplicated before conversion
    pub fn rasterize(&self, bounds: &Bounds) -> Vec<Scanline> {
        let mut pixels = Vec::new();
        match self.points.as_slice() {
            [] => {}
            [(x, y)] => pixels.push((*x, *y)),
            points => {
                for pair in points.windows(2) {
                    pixels.extend(bresenham(pair[0].0, pair[0].1, pair[1].0, pair[1].1));
                }
            }
        }
        bounds.trim(points_to_scanlines(pixels))
    }
}
