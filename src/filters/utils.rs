//! In-place elementwise utilities.
//!
//! Small pointwise helpers shared by the equalization filters and their
//! callers. All operate on every channel of the array, in place.

use ndarray::ArrayViewMut3;

/// Clamp every sample into the closed range [min, max], in place.
///
/// Both equalizers finish with this: a CDF normalized to 255 can overshoot
/// the range by a floating-point rounding error.
pub fn clamp_in_place(mut src: ArrayViewMut3<f32>, min: f32, max: f32) {
    src.map_inplace(|v| *v = v.clamp(min, max));
}

/// Round every sample to the nearest integer, in place.
///
/// Quantizes the fractional intensities left behind by equalization when
/// the caller wants 8-bit-compatible values in float storage.
pub fn round_in_place(mut src: ArrayViewMut3<f32>) {
    src.map_inplace(|v| *v = v.round());
}

/// Linearly stretch the range [lower, upper] onto [0, 255], in place.
///
/// Samples outside [lower, upper] are clamped to the range ends first, so
/// the output always lies in [0, 255]. A degenerate range (upper <= lower)
/// is a no-op rather than a division by zero.
pub fn contrast_stretch_in_place(mut src: ArrayViewMut3<f32>, lower: f32, upper: f32) {
    let range = upper - lower;
    if range <= 0.0 {
        return;
    }

    src.map_inplace(|v| *v = (v.clamp(lower, upper) - lower) * 255.0 / range);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_clamp_in_place() {
        let mut img = Array3::<f32>::zeros((1, 4, 1));
        img[[0, 0, 0]] = -5.0;
        img[[0, 1, 0]] = 0.5;
        img[[0, 2, 0]] = 255.2;
        img[[0, 3, 0]] = 127.5;

        clamp_in_place(img.view_mut(), 0.0, 255.0);

        assert_eq!(img[[0, 0, 0]], 0.0);
        assert_eq!(img[[0, 1, 0]], 0.5);
        assert_eq!(img[[0, 2, 0]], 255.0);
        assert_eq!(img[[0, 3, 0]], 127.5);
    }

    #[test]
    fn test_clamp_all_channels() {
        let mut img = Array3::<f32>::from_elem((2, 2, 3), 300.0);
        clamp_in_place(img.view_mut(), 0.0, 255.0);
        assert!(img.iter().all(|&v| v == 255.0));
    }

    #[test]
    fn test_round_in_place() {
        let mut img = Array3::<f32>::zeros((1, 3, 1));
        img[[0, 0, 0]] = 127.5;
        img[[0, 1, 0]] = 127.4;
        img[[0, 2, 0]] = 0.0;

        round_in_place(img.view_mut());

        assert_eq!(img[[0, 0, 0]], 128.0);
        assert_eq!(img[[0, 1, 0]], 127.0);
        assert_eq!(img[[0, 2, 0]], 0.0);
    }

    #[test]
    fn test_contrast_stretch() {
        let mut img = Array3::<f32>::zeros((1, 4, 1));
        img[[0, 0, 0]] = 50.0;
        img[[0, 1, 0]] = 125.0;
        img[[0, 2, 0]] = 200.0;
        img[[0, 3, 0]] = 10.0; // below the lower bound, clamps to it

        contrast_stretch_in_place(img.view_mut(), 50.0, 200.0);

        assert_eq!(img[[0, 0, 0]], 0.0);
        assert_eq!(img[[0, 1, 0]], 127.5);
        assert_eq!(img[[0, 2, 0]], 255.0);
        assert_eq!(img[[0, 3, 0]], 0.0);
    }

    #[test]
    fn test_contrast_stretch_degenerate_range() {
        let mut img = Array3::<f32>::from_elem((1, 2, 1), 80.0);
        let before = img.clone();
        contrast_stretch_in_place(img.view_mut(), 100.0, 100.0);
        assert_eq!(img, before);
    }
}
