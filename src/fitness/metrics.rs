//─────────────────────────────────────────────────────────────────────────────
// human-readable views of the normalized difference score (RMSE, PSNR)
//─────────────────────────────────────────────────────────────────────────────

/// peak value of an 8-bit channel
pub const PEAK_8BIT: f64 = 255.0;

/// PSNR (peak signal-to-noise ratio) in decibels.
/// higher is better; ~30 dB is acceptable, 40+ dB very good.
#[inline]
pub fn psnr_from_mse(mse: f64, peak: f64) -> f64 {
    let mse = mse.max(1e-12);
    10.0 * ((peak * peak) / mse).log10()
}

/// metrics derived from a score produced by `difference_full`/`difference_partial`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MetricsSnapshot {
    /// root-mean-square error per channel in 8-bit units
    pub rmse: f64,
    pub psnr: f64,
}

impl MetricsSnapshot {
    #[inline]
    pub fn from_score(score: f64) -> Self {
        let rmse = score * PEAK_8BIT;
        let psnr = psnr_from_mse(rmse * rmse, PEAK_8BIT);
        Self { rmse, psnr }
    }
}
