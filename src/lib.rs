//! histeq_rust
//!
//! Luminance histogram equalization implemented in Rust with Python
//! bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! All operations work on arrays of shape (height, width, channels). The
//! equalizers read and write **channel 0** and assume it already holds the
//! luminance signal; the grayscale converters produce that channel from
//! RGB/RGBA input. Extra channels are passed through untouched.
//!
//! Both bit depths are supported:
//! - `u8`: quantized intensities (0-255)
//! - `f32`: intensities 0-255 in float storage, so equalized values stay
//!   fractional until the caller rounds
//!
//! ## Operations
//! - `equalize_hist` - global histogram equalization, one CDF for the
//!   whole image
//! - `equalize_hist_adaptive` - tiled, contrast-limited equalization
//!   (64x64 tiles by default) with bilinear blending between tile CDFs
//! - `rgb_to_gray` / `rgb_to_gray_cie` - BT.601 and CIE L* luminance
//!   extraction
//! - `contrast_stretch`, `clamp`, `round` - pointwise helpers

pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::prelude::*;

    use crate::filters::equalize as equalize_mod;
    use crate::filters::grayscale;
    use crate::filters::utils;

    // ========================================================================
    // Global Equalization
    // ========================================================================

    /// Equalize the intensity channel (channel 0) over the whole image.
    ///
    /// One histogram over the image, CDF normalized to 255, every pixel
    /// remapped through it. Output values are rounded to u8.
    #[pyfunction]
    pub fn equalize_hist<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> Bound<'py, PyArray3<u8>> {
        let mut buffer = image.as_array().to_owned();
        equalize_mod::equalize_hist_u8(buffer.view_mut());
        buffer.into_pyarray(py)
    }

    /// Equalize the intensity channel (channel 0) over the whole image.
    ///
    /// Float variant: intensities 0-255, remapped values stay fractional.
    #[pyfunction]
    pub fn equalize_hist_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
    ) -> Bound<'py, PyArray3<f32>> {
        let mut buffer = image.as_array().to_owned();
        equalize_mod::equalize_hist(buffer.view_mut());
        buffer.into_pyarray(py)
    }

    // ========================================================================
    // Adaptive Equalization
    // ========================================================================

    /// Adaptively equalize the intensity channel (channel 0).
    ///
    /// Per-tile histograms with bilinear blending between tile CDFs.
    ///
    /// # Arguments
    /// * `image` - Input image (height, width, channels)
    /// * `clip_limit` - Contrast cap, typically 2.0-4.0; `None` disables
    ///   clipping (plain tiled equalization)
    /// * `tile_width`, `tile_height` - Tile geometry in samples
    #[pyfunction]
    #[pyo3(signature = (image, clip_limit=None, tile_width=64, tile_height=64))]
    pub fn equalize_hist_adaptive<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        clip_limit: Option<f32>,
        tile_width: usize,
        tile_height: usize,
    ) -> Bound<'py, PyArray3<u8>> {
        let mut buffer = image.as_array().to_owned();
        equalize_mod::equalize_hist_adaptive_tiled_u8(
            buffer.view_mut(),
            clip_limit,
            (tile_width, tile_height),
        );
        buffer.into_pyarray(py)
    }

    /// Adaptively equalize the intensity channel (channel 0) - f32 variant.
    #[pyfunction]
    #[pyo3(signature = (image, clip_limit=None, tile_width=64, tile_height=64))]
    pub fn equalize_hist_adaptive_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
        clip_limit: Option<f32>,
        tile_width: usize,
        tile_height: usize,
    ) -> Bound<'py, PyArray3<f32>> {
        let mut buffer = image.as_array().to_owned();
        equalize_mod::equalize_hist_adaptive_tiled(
            buffer.view_mut(),
            clip_limit,
            (tile_width, tile_height),
        );
        buffer.into_pyarray(py)
    }

    // ========================================================================
    // Grayscale Conversion
    // ========================================================================

    /// Extract the BT.601 luma channel from an RGB/RGBA image.
    ///
    /// Returns a (height, width, 1) array suitable as equalizer input.
    #[pyfunction]
    pub fn rgb_to_gray<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> Bound<'py, PyArray3<u8>> {
        let result = grayscale::rgb_to_gray_u8(image.as_array());
        result.into_pyarray(py)
    }

    /// Extract the BT.601 luma channel - f32 variant (values 0-255).
    #[pyfunction]
    pub fn rgb_to_gray_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
    ) -> Bound<'py, PyArray3<f32>> {
        let result = grayscale::rgb_to_gray_f32(image.as_array());
        result.into_pyarray(py)
    }

    /// Extract CIE L* lightness from an RGB/RGBA image.
    #[pyfunction]
    pub fn rgb_to_gray_cie<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> Bound<'py, PyArray3<u8>> {
        let result = grayscale::rgb_to_gray_cie_u8(image.as_array());
        result.into_pyarray(py)
    }

    /// Extract CIE L* lightness - f32 variant (values 0-255).
    #[pyfunction]
    pub fn rgb_to_gray_cie_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
    ) -> Bound<'py, PyArray3<f32>> {
        let result = grayscale::rgb_to_gray_cie_f32(image.as_array());
        result.into_pyarray(py)
    }

    // ========================================================================
    // Pointwise Utilities
    // ========================================================================

    /// Linearly stretch intensities in [lower, upper] onto [0, 255].
    #[pyfunction]
    pub fn contrast_stretch<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
        lower: f32,
        upper: f32,
    ) -> Bound<'py, PyArray3<f32>> {
        let mut buffer = image.as_array().to_owned();
        utils::contrast_stretch_in_place(buffer.view_mut(), lower, upper);
        buffer.into_pyarray(py)
    }

    /// Clamp all samples into [min, max].
    #[pyfunction]
    #[pyo3(signature = (image, min=0.0, max=255.0))]
    pub fn clamp<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
        min: f32,
        max: f32,
    ) -> Bound<'py, PyArray3<f32>> {
        let mut buffer = image.as_array().to_owned();
        utils::clamp_in_place(buffer.view_mut(), min, max);
        buffer.into_pyarray(py)
    }

    /// Round all samples to the nearest integer.
    #[pyfunction]
    pub fn round<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
    ) -> Bound<'py, PyArray3<f32>> {
        let mut buffer = image.as_array().to_owned();
        utils::round_in_place(buffer.view_mut());
        buffer.into_pyarray(py)
    }

    #[pymodule]
    pub fn histeq_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Equalization
        m.add_function(wrap_pyfunction!(equalize_hist, m)?)?;
        m.add_function(wrap_pyfunction!(equalize_hist_f32, m)?)?;
        m.add_function(wrap_pyfunction!(equalize_hist_adaptive, m)?)?;
        m.add_function(wrap_pyfunction!(equalize_hist_adaptive_f32, m)?)?;

        // Grayscale conversion
        m.add_function(wrap_pyfunction!(rgb_to_gray, m)?)?;
        m.add_function(wrap_pyfunction!(rgb_to_gray_f32, m)?)?;
        m.add_function(wrap_pyfunction!(rgb_to_gray_cie, m)?)?;
        m.add_function(wrap_pyfunction!(rgb_to_gray_cie_f32, m)?)?;

        // Pointwise utilities
        m.add_function(wrap_pyfunction!(contrast_stretch, m)?)?;
        m.add_function(wrap_pyfunction!(clamp, m)?)?;
        m.add_function(wrap_pyfunction!(round, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::histeq_rust;
