use crate::bitmap::Bitmap;
use crate::scanline::Scanline;

use super::{compute_optimal_color, difference_partial};

/// cost of drawing a candidate's scanlines at `alpha` over `current` (lower is better).
///
/// `buffer` is a scratch bitmap owned by one candidate search. it must be the same
/// size as `current` and only the pixels under `lines` may be relied upon.
/// implementors must be `Sync`: candidates are scored in parallel.
pub trait EnergyFunction: Sync {
    fn energy(
        &self,
        lines: &[Scanline],
        alpha: u8,
        target: &Bitmap,
        current: &Bitmap,
        buffer: &mut Bitmap,
        score: f64,
    ) -> f64;
}

impl<F> EnergyFunction for F
where
    F: Fn(&[Scanline], u8, &Bitmap, &Bitmap, &mut Bitmap, f64) -> f64 + Sync,
{
    #[inline]
    fn energy(
        &self,
        lines: &[Scanline],
        alpha: u8,
        target: &Bitmap,
        current: &Bitmap,
        buffer: &mut Bitmap,
        score: f64,
    ) -> f64 {
        self(lines, alpha, target, current, buffer, score)
    }
}

/// draw the candidate with its optimal color into `buffer` and score the result
/// incrementally against `score`.
pub fn default_energy_function(
    lines: &[Scanline],
    alpha: u8,
    target: &Bitmap,
    current: &Bitmap,
    buffer: &mut Bitmap,
    score: f64,
) -> f64 {
    profiling::scope!("default_energy_function");
    // reset the lines to `current` first: the buffer still holds the previous candidate
    buffer.copy_lines(current, lines);
    let color = compute_optimal_color(target, current, lines, alpha);
    buffer.draw(lines, color);
    difference_partial(target, current, buffer, score, lines)
}
