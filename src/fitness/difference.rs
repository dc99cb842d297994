// root-mean-square difference between two RGBA bitmaps, normalized to [0, 1].
//
// score = sqrt(Σ Δc² / (w·h·4)) / 255 over all four channels.
// the partial form rebuilds Σ Δc² from a prior score, swaps in only the
// touched pixels, and re-normalizes by the full pixel count.

use crate::bitmap::{Bitmap, Rgba};
use crate::scanline::Scanline;

#[inline]
fn squared_error(a: Rgba, b: Rgba) -> i64 {
    let dr = a.r as i64 - b.r as i64;
    let dg = a.g as i64 - b.g as i64;
    let db = a.b as i64 - b.b as i64;
    let da = a.a as i64 - b.a as i64;
    dr * dr + dg * dg + db * db + da * da
}

#[inline]
fn channel_count(bitmap: &Bitmap) -> f64 {
    (bitmap.width() as f64) * (bitmap.height() as f64) * 4.0
}

#[inline]
fn score_from_total(total: f64, channels: f64) -> f64 {
    (total.max(0.0) / channels).sqrt() / 255.0
}

/// full-image score. 0 for identical bitmaps; grows with both the number
/// of differing pixels and the size of each difference.
pub fn difference_full(first: &Bitmap, second: &Bitmap) -> f64 {
    profiling::scope!("difference_full");
    debug_assert_eq!((first.width(), first.height()), (second.width(), second.height()));

    let total: i64 = first
        .pixels()
        .iter()
        .zip(second.pixels())
        .map(|(&a, &b)| squared_error(a, b))
        .sum();

    score_from_total(total as f64, channel_count(first))
}

/// incremental score after `before` became `after` under `lines`.
/// equals `difference_full(target, after)` when `score == difference_full(target, before)`
/// and the lines are duplicate-free and cover every changed pixel.
pub fn difference_partial(
    target: &Bitmap,
    before: &Bitmap,
    after: &Bitmap,
    score: f64,
    lines: &[Scanline],
) -> f64 {
    profiling::scope!("difference_partial");
    let channels = channel_count(target);
    let rms = score * 255.0;
    let mut total = rms * rms * channels;

    let mut delta = 0i64;
    for line in lines {
        let target_row = target.row_span(line);
        let before_row = before.row_span(line);
        let after_row = after.row_span(line);
        for ((&t, &b), &a) in target_row.iter().zip(before_row).zip(after_row) {
            delta -= squared_error(t, b);
            delta += squared_error(t, a);
        }
    }
    total += delta as f64;

    score_from_total(total, channels)
}
