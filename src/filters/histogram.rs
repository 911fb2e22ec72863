//! Histogram primitives for the equalization filters.
//!
//! Three building blocks, composed by the equalizers in `filters::equalize`:
//! - `build_hist` - count intensity occurrences over a rectangular region
//! - `build_cdf` - prefix-sum a histogram into a cumulative distribution
//! - `clip_hist` - contrast-limit a histogram before CDF construction
//!
//! Bins and cumulative values are `f64`: counts are integral after
//! `build_hist` but become fractional once `clip_hist` redistributes excess.

use ndarray::ArrayView3;

/// Number of histogram bins. Intensities are already quantized to 0-255,
/// so bin index = raw intensity value (bin width 1).
pub const BINS: usize = 256;

// ============================================================================
// Histogram
// ============================================================================

/// Count intensity occurrences in the region `[x1, x2) × [y1, y2)`.
///
/// Reads channel 0 only. Intensities are floored and clamped into 0-255
/// before binning, so out-of-range samples land in the edge bins instead
/// of indexing out of bounds. An empty region yields an all-zero histogram,
/// which is valid input to `build_cdf` and `clip_hist`.
///
/// # Arguments
/// * `src` - Image of shape (height, width, channels), intensities 0-255
/// * `x1`, `y1` - Inclusive top-left corner of the region
/// * `x2`, `y2` - Exclusive bottom-right corner of the region
///
/// # Returns
/// 256-bin histogram; the sum of all bins equals the region's area
pub fn build_hist(src: ArrayView3<f32>, x1: usize, y1: usize, x2: usize, y2: usize) -> [f64; BINS] {
    let mut hist = [0.0f64; BINS];

    for y in y1..y2 {
        for x in x1..x2 {
            let bin = src[[y, x, 0]].clamp(0.0, 255.0) as usize;
            hist[bin] += 1.0;
        }
    }

    hist
}

// ============================================================================
// Cumulative distribution
// ============================================================================

/// Build the cumulative distribution of a histogram.
///
/// Accumulates in index order 0 → 255. With `normalize = Some(scale)` every
/// entry is rescaled so the final entry equals `scale`; a zero-total
/// histogram (empty or degenerate region) skips the rescale entirely and
/// returns all zeros rather than dividing by zero. With `normalize = None`
/// the raw prefix sums are returned (final entry = total count).
///
/// # Arguments
/// * `hist` - 256-bin histogram
/// * `normalize` - Target value for the final entry, or `None` for raw sums
///
/// # Returns
/// Non-decreasing 256-entry cumulative sequence
pub fn build_cdf(hist: &[f64; BINS], normalize: Option<f64>) -> [f64; BINS] {
    let mut cdf = [0.0f64; BINS];

    cdf[0] = hist[0];
    for i in 1..BINS {
        cdf[i] = cdf[i - 1] + hist[i];
    }

    if let Some(scale) = normalize {
        let total = cdf[BINS - 1];
        if total > 0.0 {
            let factor = scale / total;
            for v in cdf.iter_mut() {
                *v *= factor;
            }
        }
    }

    cdf
}

// ============================================================================
// Contrast limiting
// ============================================================================

/// Cap every bin at `threshold` and approximately redistribute the excess.
///
/// Single pass: the aggregate excess above the threshold is averaged over
/// all bins, bins with little headroom (above `threshold - avg`) are raised
/// to the threshold, and the rest gain the average increment. Excess that
/// the near-full bins cannot absorb is dropped, so the total count is only
/// approximately conserved. This deliberately trades exact conservation for
/// an O(bins) pass; do not replace it with an iterative redistribution, as
/// that changes output values.
///
/// Bounds the maximum slope of the derived CDF at `threshold`, which is
/// what limits local contrast amplification in the adaptive equalizer.
pub fn clip_hist(hist: &mut [f64; BINS], threshold: f64) {
    let mut total_excess = 0.0f64;
    for &count in hist.iter() {
        let excess = count - threshold;
        if excess > 0.0 {
            total_excess += excess;
        }
    }

    let avg_increment = total_excess / BINS as f64;
    let upper_limit = threshold - avg_increment;

    for count in hist.iter_mut() {
        // Bins above the threshold are flattened (their excess is already
        // in total_excess); bins above upper_limit absorb their own slack
        // up to the threshold; everything else gains the average increment.
        if *count > upper_limit {
            *count = threshold;
        } else {
            *count += avg_increment;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn gradient_image(height: usize, width: usize) -> Array3<f32> {
        let mut img = Array3::<f32>::zeros((height, width, 1));
        for y in 0..height {
            for x in 0..width {
                img[[y, x, 0]] = ((x * 7 + y * 13) % 256) as f32;
            }
        }
        img
    }

    #[test]
    fn test_hist_sum_equals_region_area() {
        let img = gradient_image(20, 30);

        let full = build_hist(img.view(), 0, 0, 30, 20);
        assert_eq!(full.iter().sum::<f64>(), (30 * 20) as f64);

        let partial = build_hist(img.view(), 5, 3, 17, 11);
        assert_eq!(partial.iter().sum::<f64>(), (12 * 8) as f64);
    }

    #[test]
    fn test_hist_empty_region_all_zero() {
        let img = gradient_image(4, 4);
        let hist = build_hist(img.view(), 2, 2, 2, 2);
        assert!(hist.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_hist_out_of_range_clamped_to_edge_bins() {
        let mut img = Array3::<f32>::zeros((1, 3, 1));
        img[[0, 0, 0]] = -10.0;
        img[[0, 1, 0]] = 300.0;
        img[[0, 2, 0]] = 128.7;

        let hist = build_hist(img.view(), 0, 0, 3, 1);
        assert_eq!(hist[0], 1.0);
        assert_eq!(hist[255], 1.0);
        assert_eq!(hist[128], 1.0);
    }

    #[test]
    fn test_cdf_non_decreasing_and_total() {
        let img = gradient_image(16, 16);
        let hist = build_hist(img.view(), 0, 0, 16, 16);

        let raw = build_cdf(&hist, None);
        for i in 1..BINS {
            assert!(raw[i] >= raw[i - 1], "raw CDF decreased at bin {i}");
        }
        assert_eq!(raw[BINS - 1], 256.0);

        let scaled = build_cdf(&hist, Some(255.0));
        for i in 1..BINS {
            assert!(scaled[i] >= scaled[i - 1], "scaled CDF decreased at bin {i}");
        }
        assert!((scaled[BINS - 1] - 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_cdf_zero_total_skips_normalization() {
        let hist = [0.0f64; BINS];
        let cdf = build_cdf(&hist, Some(255.0));
        assert!(cdf.iter().all(|&v| v == 0.0));
        assert!(cdf.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_clip_caps_bins_at_threshold() {
        let mut hist = [0.0f64; BINS];
        hist[10] = 500.0;
        hist[20] = 300.0;
        hist[30] = 50.0;

        clip_hist(&mut hist, 100.0);

        for (i, &count) in hist.iter().enumerate() {
            assert!(count <= 100.0, "bin {i} exceeds threshold: {count}");
            assert!(count >= 0.0, "bin {i} went negative: {count}");
        }
        assert_eq!(hist[10], 100.0);
        assert_eq!(hist[20], 100.0);
    }

    #[test]
    fn test_clip_redistributes_excess_to_low_bins() {
        let mut hist = [0.0f64; BINS];
        hist[0] = 356.0; // excess of 256 over the threshold -> avg 1 per bin

        clip_hist(&mut hist, 100.0);

        assert_eq!(hist[0], 100.0);
        for &count in hist.iter().skip(1) {
            assert_eq!(count, 1.0);
        }
    }

    #[test]
    fn test_clip_noop_without_excess() {
        let mut hist = [2.0f64; BINS];
        let before = hist;
        clip_hist(&mut hist, 100.0);
        assert_eq!(hist, before);
    }

    #[test]
    fn test_clip_total_bounded() {
        let mut hist = [0.0f64; BINS];
        for (i, bin) in hist.iter_mut().enumerate() {
            *bin = (i % 50) as f64 * 10.0;
        }
        let original: f64 = hist.iter().sum();

        clip_hist(&mut hist, 200.0);

        let after: f64 = hist.iter().sum();
        assert!(after >= 0.0);
        // Redistribution never adds more than the clipped excess.
        assert!(after <= original + 1e-6, "total grew: {original} -> {after}");
    }
}
