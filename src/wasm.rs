//! WebAssembly exports for the equalization filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images
//! cross the boundary as flat arrays in row-major (height, width,
//! channels) order; the equalizers touch channel 0 only.
//!
//! Clip limits are plain numbers here: pass `0` (or any non-positive
//! value) to disable clipping, since `Option` does not cross the
//! JavaScript boundary.
//!
//! ## Bit Depth Support
//!
//! - **u8**: quantized intensities 0-255, standard for canvas data
//! - **f32**: intensities 0-255 in float storage, equalized values stay
//!   fractional

use ndarray::Array3;
use wasm_bindgen::prelude::*;

use crate::filters::equalize::{
    equalize_hist, equalize_hist_adaptive_tiled, equalize_hist_adaptive_tiled_u8, equalize_hist_u8,
};
use crate::filters::grayscale::{rgb_to_gray_cie_u8, rgb_to_gray_u8};

// ============================================================================
// Global Equalization
// ============================================================================

/// Globally equalize the intensity channel (channel 0) - u8 version.
///
/// # Arguments
/// * `data` - Flat array of samples (length = width * height * channels)
/// * `width`, `height`, `channels` - Image geometry
///
/// # Returns
/// Flat array with channel 0 equalized, other channels untouched
#[wasm_bindgen]
pub fn equalize_hist_wasm(data: &[u8], width: usize, height: usize, channels: usize) -> Vec<u8> {
    let mut image = Array3::from_shape_vec((height, width, channels), data.to_vec())
        .expect("Invalid dimensions");

    equalize_hist_u8(image.view_mut());
    image.into_raw_vec_and_offset().0
}

/// Globally equalize the intensity channel (channel 0) - f32 version.
///
/// Intensities are 0-255; equalized values stay fractional.
#[wasm_bindgen]
pub fn equalize_hist_f32_wasm(
    data: &[f32],
    width: usize,
    height: usize,
    channels: usize,
) -> Vec<f32> {
    let mut image = Array3::from_shape_vec((height, width, channels), data.to_vec())
        .expect("Invalid dimensions");

    equalize_hist(image.view_mut());
    image.into_raw_vec_and_offset().0
}

// ============================================================================
// Adaptive Equalization
// ============================================================================

/// Adaptively equalize the intensity channel (channel 0) - u8 version.
///
/// # Arguments
/// * `data` - Flat array of samples (length = width * height * channels)
/// * `width`, `height`, `channels` - Image geometry
/// * `clip_limit` - Contrast cap (2.0-4.0 typical); 0 or negative disables
///   clipping
/// * `tile_width`, `tile_height` - Tile geometry in samples (64 is the
///   standard default)
#[wasm_bindgen]
pub fn equalize_hist_adaptive_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    clip_limit: f32,
    tile_width: usize,
    tile_height: usize,
) -> Vec<u8> {
    let mut image = Array3::from_shape_vec((height, width, channels), data.to_vec())
        .expect("Invalid dimensions");

    let clip = (clip_limit > 0.0).then_some(clip_limit);
    equalize_hist_adaptive_tiled_u8(image.view_mut(), clip, (tile_width, tile_height));
    image.into_raw_vec_and_offset().0
}

/// Adaptively equalize the intensity channel (channel 0) - f32 version.
#[wasm_bindgen]
pub fn equalize_hist_adaptive_f32_wasm(
    data: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    clip_limit: f32,
    tile_width: usize,
    tile_height: usize,
) -> Vec<f32> {
    let mut image = Array3::from_shape_vec((height, width, channels), data.to_vec())
        .expect("Invalid dimensions");

    let clip = (clip_limit > 0.0).then_some(clip_limit);
    equalize_hist_adaptive_tiled(image.view_mut(), clip, (tile_width, tile_height));
    image.into_raw_vec_and_offset().0
}

// ============================================================================
// Grayscale Conversion
// ============================================================================

/// Extract the BT.601 luma channel from RGB/RGBA data.
///
/// # Arguments
/// * `data` - Flat array of samples (length = width * height * channels,
///   channels must be 3 or 4)
///
/// # Returns
/// Flat single-channel array (length = width * height)
#[wasm_bindgen]
pub fn rgb_to_gray_wasm(data: &[u8], width: usize, height: usize, channels: usize) -> Vec<u8> {
    let image = Array3::from_shape_vec((height, width, channels), data.to_vec())
        .expect("Invalid dimensions");

    let result = rgb_to_gray_u8(image.view());
    result.into_raw_vec_and_offset().0
}

/// Extract CIE L* lightness from RGB/RGBA data.
#[wasm_bindgen]
pub fn rgb_to_gray_cie_wasm(data: &[u8], width: usize, height: usize, channels: usize) -> Vec<u8> {
    let image = Array3::from_shape_vec((height, width, channels), data.to_vec())
        .expect("Invalid dimensions");

    let result = rgb_to_gray_cie_u8(image.view());
    result.into_raw_vec_and_offset().0
}
