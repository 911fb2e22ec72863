//! Filter modules for luminance histogram equalization.
//!
//! ## Supported Formats
//!
//! The equalizers operate on the intensity channel (channel 0) of images
//! shaped (height, width, channels):
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Intensity8 | (H, W, C) | u8 | Quantized intensities, 0-255 |
//! | Intensity float | (H, W, C) | f32 | Intensities 0-255, fractional after remap |
//!
//! Extra channels are passed through untouched. The grayscale converters
//! accept RGB/RGBA input and emit the (H, W, 1) intensity channel.
//!
//! ## Architecture
//!
//! - **In-place processing** - the equalizers borrow a mutable view and
//!   rewrite channel 0; nothing is allocated beyond transient histograms
//!   and the per-tile CDF grid
//! - **Dual precision** - u8 and f32 variants of every operation
//! - **Thread-safe** - the adaptive path builds its tile grid in parallel
//!   with rayon; tiles are independent until the remap pass
//!
//! ## Module Map
//!
//! - `histogram` - histogram / CDF / contrast-clip primitives
//! - `equalize` - global and adaptive (tiled, contrast-limited) drivers
//! - `grayscale` - BT.601 and CIE L* luminance extraction
//! - `utils` - in-place clamp, round, contrast stretch

pub mod equalize;
pub mod grayscale;
pub mod histogram;
pub mod utils;
