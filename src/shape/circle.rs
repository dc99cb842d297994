use serde::{Deserialize, Serialize};

use crate::geom::Bounds;
use crate::rng::SplitMix64;
use crate::scanline::Scanline;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Circle {
    pub x: i32,
    pub y: i32,
    pub r: i32,
}

impl Circle {
    pub fn new(x: i32, y: i32, r: i32) -> Self {
        Self { x, y, r }
    }

    pub fn setup(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        self.x = rng.next_in_range(bounds.min_x, bounds.max_x);
        self.y = rng.next_in_range(bounds.min_y, bounds.max_y);
        self.r = rng.next_in_range(1, 32);
    }

    pub fn mutate(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        match rng.next_in_range(0, 1) {
            0 => {
                self.x = bounds.clamp_x(self.x + rng.next_in_range(-16, 16));
                self.y = bounds.clamp_y(self.y + rng.next_in_range(-16, 16));
            }
            _ => {
                let max_r = (bounds.width() - 1).max(1);
                self.r = (self.r + rng.next_in_range(-16, 16)).clamp(1, max_r);
            }
        }
    }

    pub fn rasterize(&self, bounds: &Bounds) -> Vec<Scanline> {
        let r = self.r.max(0);
        let lines = (-r..=r)
            .map(|dy| {
                let s = (((r * r - dy * dy) as f64).sqrt()) as i32;
                Scanline::new(self.y + dy, self.x - s, self.x + s)
            })
            .collect();
        bounds.trim(lines)
    }
}
