use crate::bitmap::{Bitmap, Rgba};
use crate::scanline::Scanline;

/// least-squares blend color for drawing `lines` over `current` at a fixed alpha.
///
/// per channel: c = Σ((target - current·(1-a)) / a) / n, clamped to 0..=255, a = alpha/255.
/// with zero alpha the covered target mean is returned; with zero coverage the
/// whole-target mean. the result always carries `alpha`.
pub fn compute_optimal_color(target: &Bitmap, current: &Bitmap, lines: &[Scanline], alpha: u8) -> Rgba {
    profiling::scope!("compute_optimal_color");
    let a = alpha as f64 / 255.0;

    let mut count = 0u64;
    let mut solved = [0.0f64; 3];
    let mut target_sum = [0u64; 3];
    for line in lines {
        for (&t, &c) in target.row_span(line).iter().zip(current.row_span(line)) {
            let t_rgb = [t.r, t.g, t.b];
            let c_rgb = [c.r, c.g, c.b];
            for ch in 0..3 {
                target_sum[ch] += t_rgb[ch] as u64;
                if alpha > 0 {
                    solved[ch] += (t_rgb[ch] as f64 - c_rgb[ch] as f64 * (1.0 - a)) / a;
                }
            }
            count += 1;
        }
    }

    if count == 0 {
        return target.average_color().with_alpha(alpha);
    }
    if alpha == 0 {
        let n = count;
        return Rgba::new(
            (target_sum[0] / n) as u8,
            (target_sum[1] / n) as u8,
            (target_sum[2] / n) as u8,
            alpha,
        );
    }

    let n = count as f64;
    let channel = |sum: f64| (sum / n).round().clamp(0.0, 255.0) as u8;
    Rgba::new(channel(solved[0]), channel(solved[1]), channel(solved[2]), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_alpha_picks_target_mean() {
        let mut target = Bitmap::new(4, 1, Rgba::BLACK);
        target.set(0, 0, Rgba::new(100, 0, 0, 255));
        target.set(1, 0, Rgba::new(200, 0, 0, 255));
        let current = Bitmap::new(4, 1, Rgba::WHITE);
        let color = compute_optimal_color(&target, &current, &[Scanline::new(0, 0, 1)], 255);
        assert_eq!(color, Rgba::new(150, 0, 0, 255));
    }

    #[test]
    fn test_half_alpha_compensates_for_background() {
        // want 128 over black at a=128/255: c·a ≈ 128 → c ≈ 255
        let target = Bitmap::new(2, 2, Rgba::new(128, 128, 128, 255));
        let current = Bitmap::new(2, 2, Rgba::BLACK);
        let color = compute_optimal_color(&target, &current, &[Scanline::new(0, 0, 1)], 128);
        assert_eq!(color, Rgba::new(255, 255, 255, 128));
    }

    #[test]
    fn test_result_is_clamped() {
        let target = Bitmap::new(2, 1, Rgba::WHITE);
        let current = Bitmap::new(2, 1, Rgba::BLACK);
        let color = compute_optimal_color(&target, &current, &[Scanline::new(0, 0, 1)], 64);
        assert_eq!(color.r, 255);
    }

    #[test]
    fn test_degenerate_inputs_fall_back_to_target_average() {
        let mut target = Bitmap::new(2, 1, Rgba::new(10, 20, 30, 255));
        target.set(1, 0, Rgba::new(30, 40, 50, 255));
        let current = Bitmap::new(2, 1, Rgba::BLACK);

        let uncovered = compute_optimal_color(&target, &current, &[], 128);
        assert_eq!(uncovered, Rgba::new(20, 30, 40, 128));

        let transparent = compute_optimal_color(&target, &current, &[Scanline::new(0, 1, 1)], 0);
        assert_eq!(transparent, Rgba::new(30, 40, 50, 0));
    }

    #[test]
    fn test_solved_color_reduces_error() {
        let target = Bitmap::new(6, 6, Rgba::new(40, 180, 90, 255));
        let current = Bitmap::new(6, 6, Rgba::new(220, 10, 10, 255));
        let lines: Vec<Scanline> = (0..6).map(|y| Scanline::new(y, 0, 5)).collect();
        let color = compute_optimal_color(&target, &current, &lines, 200);
        let mut drawn = current.clone();
        drawn.draw(&lines, color);
        let before = super::super::difference_full(&target, &current);
        let after = super::super::difference_full(&target, &drawn);
        assert!(after < before);
    }
}
