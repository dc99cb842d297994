// integer geometry shared by the shape rasterizers
//
// - Bounds: inclusive canvas extents that shapes are set up, mutated and clamped in
// - bresenham: pixel walk between two integer points
// - polygon and point-set conversion into duplicate-free scanlines

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{GeometrizeError, Result};
use crate::scanline::Scanline;

/// inclusive rectangle of valid pixel coordinates, normally (0, 0)..=(w-1, h-1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    /// create bounds from inclusive corners. fails if a min exceeds its max.
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Result<Self> {
        if min_x > max_x || min_y > max_y {
            return Err(GeometrizeError::InvalidBounds { min_x, min_y, max_x, max_y });
        }
        Ok(Bounds { min_x, min_y, max_x, max_y })
    }

    /// bounds covering a whole canvas. width and height must be non-zero.
    pub fn of_canvas(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GeometrizeError::EmptyBitmap { width, height });
        }
        Self::new(0, 0, width as i32 - 1, height as i32 - 1)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }

    #[inline]
    pub fn clamp_x(&self, x: i32) -> i32 {
        x.clamp(self.min_x, self.max_x)
    }

    #[inline]
    pub fn clamp_y(&self, y: i32) -> i32 {
        y.clamp(self.min_y, self.max_y)
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// trim scanlines so every pixel they cover lies inside these bounds.
    /// runs clamped onto the same edge pixels are merged so no pixel is covered twice;
    /// runs sharing a row are expected to be adjacent and ordered by x.
    pub fn trim(&self, lines: Vec<Scanline>) -> Vec<Scanline> {
        let trimmed = crate::scanline::trim_scanlines(lines, self.min_x, self.min_y, self.max_x + 1, self.max_y + 1);
        let mut merged: Vec<Scanline> = Vec::with_capacity(trimmed.len());
        for line in trimmed {
            match merged.last_mut() {
                Some(prev) if prev.y == line.y && line.x1 <= prev.x2 => prev.x2 = prev.x2.max(line.x2),
                _ => merged.push(line),
            }
        }
        merged
    }
}

/// pixels on the segment (x0, y0)-(x1, y1), endpoints included, in walk order.
pub fn bresenham(mut x0: i32, mut y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut points = Vec::with_capacity((dx.max(dy) + 1) as usize);
    loop {
        points.push((x0, y0));
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
    points
}

/// fill a closed polygon: walk every edge, then span min..=max x per row.
/// one scanline per row, ordered by y. not trimmed.
pub fn polygon_scanlines(points: &[(f64, f64)]) -> Vec<Scanline> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut rows: BTreeMap<i32, (i32, i32)> = BTreeMap::new();
    for i in 0..points.len() {
        let (ax, ay) = points[i];
        let (bx, by) = points[(i + 1) % points.len()];
        let edge = bresenham(ax.round() as i32, ay.round() as i32, bx.round() as i32, by.round() as i32);
        for (x, y) in edge {
            rows.entry(y)
                .and_modify(|span| {
                    span.0 = span.0.min(x);
                    span.1 = span.1.max(x);
                })
                .or_insert((x, x));
        }
    }

    rows.into_iter().map(|(y, (x1, x2))| Scanline::new(y, x1, x2)).collect()
}

/// collapse a pixel set into scanlines, merging horizontally adjacent pixels.
/// repeated points are counted once so overlapping segments never double-cover a pixel.
pub fn points_to_scanlines<I>(points: I) -> Vec<Scanline>
where
    I: IntoIterator<Item = (i32, i32)>,
{
    let mut rows: BTreeMap<i32, BTreeSet<i32>> = BTreeMap::new();
    for (x, y) in points {
        rows.entry(y).or_default().insert(x);
    }

    let mut lines = Vec::new();
    for (y, xs) in rows {
        let mut run: Option<(i32, i32)> = None;
        for x in xs {
            run = match run {
                Some((start, end)) if x == end + 1 => Some((start, x)),
                Some((start, end)) => {
                    lines.push(Scanline::new(y, start, end));
                    Some((x, x))
                }
                None => Some((x, x)),
            };
        }
        if let Some((start, end)) = run {
            lines.push(Scanline::new(y, start, end));
        }
    }
    lines
}
