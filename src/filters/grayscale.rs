//! RGB to luminance conversion.
//!
//! Produces the single intensity channel the equalization filters operate
//! on. Two methods:
//!
//! - **BT.601 weighted average** - the classic video luma weights
//!   (0.299 / 0.587 / 0.114), cheap and adequate for most content.
//! - **CIE L\*** - perceptual lightness via sRGB linearization, better
//!   matched to human brightness perception at the cost of two `powf`
//!   calls per pixel.
//!
//! ## Bit Depth Support
//!
//! - **u8**: values 0-255, output rounded
//! - **f32**: values 0-255 (matching the equalizers), output kept fractional
//!
//! Input must have at least 3 channels (RGB or RGBA, alpha ignored);
//! output is always (height, width, 1).

use ndarray::{Array3, ArrayView3};

/// ITU-R BT.601 luma coefficients.
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

// ============================================================================
// BT.601 weighted average
// ============================================================================

/// Extract the BT.601 luma channel - u8 version.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3 or 4), values 0-255
///
/// # Returns
/// Single-channel image (height, width, 1) with rounded luma values
pub fn rgb_to_gray_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 1));

    for y in 0..height {
        for x in 0..width {
            let r = input[[y, x, 0]] as f32;
            let g = input[[y, x, 1]] as f32;
            let b = input[[y, x, 2]] as f32;

            let gray = LUMA_R * r + LUMA_G * g + LUMA_B * b;
            output[[y, x, 0]] = gray.round().clamp(0.0, 255.0) as u8;
        }
    }

    output
}

/// Extract the BT.601 luma channel - f32 version.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3 or 4), values 0-255
///
/// # Returns
/// Single-channel image (height, width, 1), fractional luma values 0-255
pub fn rgb_to_gray_f32(input: ArrayView3<f32>) -> Array3<f32> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<f32>::zeros((height, width, 1));

    for y in 0..height {
        for x in 0..width {
            let r = input[[y, x, 0]];
            let g = input[[y, x, 1]];
            let b = input[[y, x, 2]];

            output[[y, x, 0]] = LUMA_R * r + LUMA_G * g + LUMA_B * b;
        }
    }

    output
}

// ============================================================================
// CIE L* lightness
// ============================================================================

/// sRGB gamma expansion for a channel normalized to 0-1.
fn srgb_to_linear(c: f32) -> f32 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

/// CIE L* lightness of an sRGB triple (channels 0-1), rescaled to 0-255.
fn cie_lightness(r: f32, g: f32, b: f32) -> f32 {
    // Relative luminance Y from linearized sRGB (BT.709 primaries, D65).
    let y = 0.2126 * srgb_to_linear(r) + 0.7152 * srgb_to_linear(g) + 0.0722 * srgb_to_linear(b);

    let fy = if y > 0.008856 {
        y.powf(1.0 / 3.0)
    } else {
        7.787 * y + 16.0 / 116.0
    };

    (116.0 * fy - 16.0) / 100.0 * 255.0
}

/// Extract CIE L* lightness - u8 version.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3 or 4), values 0-255
///
/// # Returns
/// Single-channel image (height, width, 1) with rounded lightness values
pub fn rgb_to_gray_cie_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 1));

    for y in 0..height {
        for x in 0..width {
            let r = input[[y, x, 0]] as f32 / 255.0;
            let g = input[[y, x, 1]] as f32 / 255.0;
            let b = input[[y, x, 2]] as f32 / 255.0;

            output[[y, x, 0]] = cie_lightness(r, g, b).round().clamp(0.0, 255.0) as u8;
        }
    }

    output
}

/// Extract CIE L* lightness - f32 version.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3 or 4), values 0-255
///
/// # Returns
/// Single-channel image (height, width, 1), fractional lightness values 0-255
pub fn rgb_to_gray_cie_f32(input: ArrayView3<f32>) -> Array3<f32> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<f32>::zeros((height, width, 1));

    for y in 0..height {
        for x in 0..width {
            let r = input[[y, x, 0]] / 255.0;
            let g = input[[y, x, 1]] / 255.0;
            let b = input[[y, x, 2]] / 255.0;

            output[[y, x, 0]] = cie_lightness(r, g, b);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_pixel(r: u8, g: u8, b: u8) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((1, 1, 4));
        img[[0, 0, 0]] = r;
        img[[0, 0, 1]] = g;
        img[[0, 0, 2]] = b;
        img[[0, 0, 3]] = 255;
        img
    }

    #[test]
    fn test_gray_bt601_weights() {
        // Pure green carries the largest weight.
        let green = rgb_to_gray_u8(rgba_pixel(0, 255, 0).view());
        assert_eq!(green[[0, 0, 0]], 150); // round(0.587 * 255)

        let red = rgb_to_gray_u8(rgba_pixel(255, 0, 0).view());
        assert_eq!(red[[0, 0, 0]], 76); // round(0.299 * 255)

        let blue = rgb_to_gray_u8(rgba_pixel(0, 0, 255).view());
        assert_eq!(blue[[0, 0, 0]], 29); // round(0.114 * 255)
    }

    #[test]
    fn test_gray_neutral_input_unchanged() {
        let gray = rgb_to_gray_u8(rgba_pixel(128, 128, 128).view());
        assert_eq!(gray[[0, 0, 0]], 128);
    }

    #[test]
    fn test_gray_output_shape() {
        let img = Array3::<u8>::zeros((3, 5, 3));
        let gray = rgb_to_gray_u8(img.view());
        assert_eq!(gray.dim(), (3, 5, 1));
    }

    #[test]
    fn test_gray_f32_matches_u8_before_rounding() {
        let mut img = Array3::<f32>::zeros((1, 1, 3));
        img[[0, 0, 0]] = 200.0;
        img[[0, 0, 1]] = 100.0;
        img[[0, 0, 2]] = 50.0;

        let gray = rgb_to_gray_f32(img.view());
        let expected = 0.299 * 200.0 + 0.587 * 100.0 + 0.114 * 50.0;
        assert!((gray[[0, 0, 0]] - expected).abs() < 1e-4);
    }

    #[test]
    fn test_cie_extremes() {
        let black = rgb_to_gray_cie_u8(rgba_pixel(0, 0, 0).view());
        assert_eq!(black[[0, 0, 0]], 0);

        // White: Y = 1, L* = 100, rescaled to 255.
        let white = rgb_to_gray_cie_u8(rgba_pixel(255, 255, 255).view());
        assert_eq!(white[[0, 0, 0]], 255);
    }

    #[test]
    fn test_cie_monotone_in_gray_levels() {
        let mut prev = 0u8;
        for v in [0u8, 32, 64, 96, 128, 160, 192, 224, 255] {
            let l = rgb_to_gray_cie_u8(rgba_pixel(v, v, v).view())[[0, 0, 0]];
            assert!(l >= prev, "lightness decreased at input {v}");
            prev = l;
        }
    }
}
