//! Histogram equalization filters: global and adaptive (contrast-limited).
//!
//! Both filters equalize the intensity channel of an image in place. They
//! read and write **channel 0 only** and assume it already holds the
//! luminance signal (see `filters::grayscale` for extraction); which channel
//! represents luminance is the caller's decision.
//!
//! ## Bit Depth Support
//!
//! - **f32**: intensities 0-255. Unlike the 0.0-1.0 convention used
//!   elsewhere in this crate's ecosystem, the equalizers keep the
//!   quantized 0-255 range in float storage so remapped values stay
//!   fractional (a pixel can become 127.5) until the caller rounds.
//! - **u8**: intensities 0-255, remapped values rounded to the nearest
//!   integer after the final clamp.
//!
//! ## Variants
//!
//! - `equalize_hist` - one histogram over the whole image, every pixel
//!   remapped through its CDF. Cheap, but a single bright or dark area
//!   dominates the mapping everywhere.
//! - `equalize_hist_adaptive` - per-tile histograms (64×64 by default),
//!   optionally contrast-limited, blended bilinearly between the four
//!   nearest tile CDFs so tile seams stay invisible.

use ndarray::{Array3, ArrayViewMut3, Zip};
use rayon::prelude::*;

use crate::filters::histogram::{build_cdf, build_hist, clip_hist, BINS};
use crate::filters::utils::clamp_in_place;

/// Default adaptive tile geometry, (width, height) in samples.
pub const DEFAULT_TILE_SIZE: (usize, usize) = (64, 64);

// ============================================================================
// Global equalization
// ============================================================================

/// Equalize the intensity channel of the whole image in place - f32 version.
///
/// Builds one 256-bin histogram over the image, derives its CDF normalized
/// to 255, and replaces every intensity with `cdf[intensity]`. The histogram
/// pass completes before any pixel is overwritten. Finishes by clamping all
/// samples into [0, 255] (normalization can overshoot by a rounding error).
///
/// # Arguments
/// * `src` - Image of shape (height, width, channels), intensities 0-255,
///   modified in place
pub fn equalize_hist(mut src: ArrayViewMut3<f32>) {
    let (height, width, _) = src.dim();

    let hist = build_hist(src.view(), 0, 0, width, height);
    let cdf = build_cdf(&hist, Some(255.0));

    for y in 0..height {
        for x in 0..width {
            let bin = src[[y, x, 0]].clamp(0.0, 255.0) as usize;
            src[[y, x, 0]] = cdf[bin] as f32;
        }
    }

    clamp_in_place(src, 0.0, 255.0);
}

/// Equalize the intensity channel of the whole image in place - u8 version.
///
/// Same pipeline as the f32 version; remapped intensities are rounded.
pub fn equalize_hist_u8(mut src: ArrayViewMut3<u8>) {
    let mut float = src.mapv(|v| v as f32);
    equalize_hist(float.view_mut());
    write_back_rounded(&float, &mut src);
}

// ============================================================================
// Adaptive (contrast-limited) equalization
// ============================================================================

/// Adaptively equalize the intensity channel in place - f32 version.
///
/// Uses the default 64×64 tile geometry. `clip_limit` caps local contrast
/// amplification: each tile histogram is clipped at
/// `max(1, clip_limit × tile_area / 256)` before its CDF is built. `None`
/// (or a non-positive value) disables clipping entirely, leaving plain
/// tiled equalization with bilinear blending.
///
/// # Arguments
/// * `src` - Image of shape (height, width, channels), intensities 0-255,
///   modified in place
/// * `clip_limit` - Contrast cap, typically 2.0-4.0; `None` disables clipping
pub fn equalize_hist_adaptive(src: ArrayViewMut3<f32>, clip_limit: Option<f32>) {
    equalize_hist_adaptive_tiled(src, clip_limit, DEFAULT_TILE_SIZE);
}

/// Adaptively equalize the intensity channel in place - u8 version.
pub fn equalize_hist_adaptive_u8(src: ArrayViewMut3<u8>, clip_limit: Option<f32>) {
    equalize_hist_adaptive_tiled_u8(src, clip_limit, DEFAULT_TILE_SIZE);
}

/// Adaptively equalize with explicit tile geometry - f32 version.
///
/// Two phases. Phase 1 partitions the image into a
/// ⌈width/tile_w⌉ × ⌈height/tile_h⌉ grid (edge tiles clipped to image
/// bounds), builds each tile's histogram, optionally clips it, and derives
/// its CDF normalized to 255. Tiles are independent, so this phase runs in
/// parallel; collecting the grid is the barrier before phase 2, which reads
/// arbitrary neighboring tiles per pixel.
///
/// Phase 2 remaps every pixel by bilinearly blending the CDF value of the
/// four tiles nearest to it, treating each tile's CDF as anchored at the
/// tile center (half-tile offset). At image borders the neighbor indices
/// clamp to the nearest valid tile instead of extrapolating, so the blend
/// degenerates toward a single tile there; the fractional weights are
/// deliberately left unclamped to match the reference output (they can
/// leave [0, 1] by up to half a tile at the borders). Images smaller than
/// one tile produce a 1×1 grid and plain per-tile equalization.
///
/// Finishes by clamping all samples into [0, 255].
///
/// # Arguments
/// * `src` - Image of shape (height, width, channels), intensities 0-255,
///   modified in place
/// * `clip_limit` - Contrast cap; `None` or non-positive disables clipping
/// * `tile_size` - Tile (width, height) in samples; see `DEFAULT_TILE_SIZE`
pub fn equalize_hist_adaptive_tiled(
    mut src: ArrayViewMut3<f32>,
    clip_limit: Option<f32>,
    tile_size: (usize, usize),
) {
    let (height, width, _) = src.dim();
    let (tile_w, tile_h) = tile_size;

    if height == 0 || width == 0 || tile_w == 0 || tile_h == 0 {
        return;
    }

    let x_tiles = width.div_ceil(tile_w);
    let y_tiles = height.div_ceil(tile_h);

    // One threshold per call, from the nominal tile area; residual edge
    // tiles use the same threshold as full tiles.
    let threshold = clip_limit
        .filter(|&limit| limit > 0.0)
        .map(|limit| (limit as f64 * (tile_w * tile_h) as f64 / BINS as f64).max(1.0));

    // Phase 1: per-tile CDFs. Each tile reads its own region of the image
    // and writes its own grid slot, so the tiles parallelize freely.
    let view = src.view();
    let cdfs: Vec<[f64; BINS]> = (0..y_tiles * x_tiles)
        .into_par_iter()
        .map(|tile| {
            let ty = tile / x_tiles;
            let tx = tile % x_tiles;

            let x1 = tx * tile_w;
            let y1 = ty * tile_h;
            let x2 = (x1 + tile_w).min(width);
            let y2 = (y1 + tile_h).min(height);

            let mut hist = build_hist(view, x1, y1, x2, y2);
            if let Some(threshold) = threshold {
                clip_hist(&mut hist, threshold);
            }
            build_cdf(&hist, Some(255.0))
        })
        .collect();

    // Phase 2: bilinear remap between the four nearest tile CDFs.
    let inv_tile_w = 1.0 / tile_w as f64;
    let inv_tile_h = 1.0 / tile_h as f64;

    for y in 0..height {
        for x in 0..width {
            let bin = src[[y, x, 0]].clamp(0.0, 255.0) as usize;

            // Tile-space position with the half-tile center offset.
            let tx = x as f64 * inv_tile_w - 0.5;
            let ty = y as f64 * inv_tile_h - 0.5;

            let xl = (tx.floor() as isize).max(0) as usize;
            let xr = (xl + 1).min(x_tiles - 1);
            let yt = (ty.floor() as isize).max(0) as usize;
            let yd = (yt + 1).min(y_tiles - 1);

            let fx = tx - xl as f64;
            let fy = ty - yt as f64;

            let cdf11 = cdfs[yt * x_tiles + xl][bin];
            let cdf12 = cdfs[yd * x_tiles + xl][bin];
            let cdf21 = cdfs[yt * x_tiles + xr][bin];
            let cdf22 = cdfs[yd * x_tiles + xr][bin];

            let blended = (1.0 - fx) * (1.0 - fy) * cdf11
                + (1.0 - fx) * fy * cdf12
                + fx * (1.0 - fy) * cdf21
                + fx * fy * cdf22;

            src[[y, x, 0]] = blended as f32;
        }
    }

    clamp_in_place(src, 0.0, 255.0);
}

/// Adaptively equalize with explicit tile geometry - u8 version.
pub fn equalize_hist_adaptive_tiled_u8(
    mut src: ArrayViewMut3<u8>,
    clip_limit: Option<f32>,
    tile_size: (usize, usize),
) {
    let mut float = src.mapv(|v| v as f32);
    equalize_hist_adaptive_tiled(float.view_mut(), clip_limit, tile_size);
    write_back_rounded(&float, &mut src);
}

/// Round a clamped f32 working buffer back into u8 storage.
fn write_back_rounded(float: &Array3<f32>, src: &mut ArrayViewMut3<u8>) {
    Zip::from(src).and(float).for_each(|out, &v| {
        *out = v.round().clamp(0.0, 255.0) as u8;
    });
}
