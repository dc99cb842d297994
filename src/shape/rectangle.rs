use serde::{Deserialize, Serialize};

use crate::geom::Bounds;
use crate::rng::SplitMix64;
use crate::scanline::Scanline;

/// axis-aligned rectangle between two inclusive corners
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rectangle {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn setup(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        self.x1 = rng.next_in_range(bounds.min_x, bounds.max_x);
        self.y1 = rng.next_in_range(bounds.min_y, bounds.max_y);
        self.x2 = bounds.clamp_x(self.x1 + rng.next_in_range(1, 32));
        self.y2 = bounds.clamp_y(self.y1 + rng.next_in_range(1, 32));
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
        let (left, right) = (self.x1.min(self.x2), self.x1.max(self.x2));
        let (top, bottom) = (self.y1.min(self.y2), self.y1.max(self.y2));
        let lines = (top..=bottom).map(|y| Scanline::new(y, left, right)).collect();
        bounds.trim(lines)
    }
}
