//! Brightness, contrast and saturation adjustment.
//!
//! Adjustments run before resampling, on R, G and B only. Each one is
//! skipped when its value is exactly zero. Intermediate values are kept as
//! unclamped floats; rounding and saturation happen once, when the pixel is
//! written back into the 8-bit raster.

use crate::color::clamp_channel;
use crate::raster::Raster;

/// Luma weights used as the pivot for saturation scaling.
const LUMA_R: f64 = 0.2989;
const LUMA_G: f64 = 0.5870;
const LUMA_B: f64 = 0.1140;

/// Largest contrast magnitude; the factor has a pole at 259.
pub const MAX_CONTRAST: f64 = 255.0;

/// Color adjustment settings. Zero means "no effect" for every field.
///
/// # Example
///
/// ```
/// use pixel_quant::{Adjustments, Raster};
///
/// let mut raster = Raster::filled(1, 1, [100, 100, 100, 255]);
/// Adjustments::new().brightness(20.0).apply(&mut raster);
/// assert_eq!(raster.pixel(0, 0), [120, 120, 120, 255]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Adjustments {
    /// Added to every channel.
    pub brightness: f64,

    /// Contrast in the conventional -255..=255 range.
    ///
    /// Scales channels around 128 by `259(c + 255) / (255(259 - c))`.
    /// Values outside the range are clamped to [`MAX_CONTRAST`] when applied.
    pub contrast: f64,

    /// Saturation percentage: the distance from luma is scaled by
    /// `1 + saturation / 100` (so -100 yields grayscale).
    pub saturation: f64,
}

impl Adjustments {
    /// Adjustments with every field at zero.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the brightness offset.
    #[inline]
    pub fn brightness(mut self, value: f64) -> Self {
        self.brightness = value;
        self
    }

    /// Set the contrast amount.
    #[inline]
    pub fn contrast(mut self, value: f64) -> Self {
        self.contrast = value;
        self
    }

    /// Set the saturation percentage.
    #[inline]
    pub fn saturation(mut self, value: f64) -> Self {
        self.saturation = value;
        self
    }

    /// True when applying these adjustments cannot change any pixel.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.brightness == 0.0 && self.contrast == 0.0 && self.saturation == 0.0
    }

    /// Adjust one RGB triple without clamping.
    ///
    /// Order is fixed: brightness, then contrast, then saturation.
    pub fn adjust(&self, rgb: [f64; 3]) -> [f64; 3] {
        let [mut r, mut g, mut b] = rgb;

        if self.brightness != 0.0 {
            r += self.brightness;
            g += self.brightness;
            b += self.brightness;
        }

        if self.contrast != 0.0 {
            let c = self.contrast.clamp(-MAX_CONTRAST, MAX_CONTRAST);
            let factor = (259.0 * (c + 255.0)) / (255.0 * (259.0 - c));
            r = factor * (r - 128.0) + 128.0;
            g = factor * (g - 128.0) + 128.0;
            b = factor * (b - 128.0) + 128.0;
        }

        if self.saturation != 0.0 {
            let factor = 1.0 + self.saturation / 100.0;
            let luma = LUMA_R * r + LUMA_G * g + LUMA_B * b;
            r = luma + (r - luma) * factor;
            g = luma + (g - luma) * factor;
            b = luma + (b - luma) * factor;
        }

        [r, g, b]
    }

    /// Apply the adjustments to every pixel of `raster` in place.
    ///
    /// Alpha is left untouched.
    pub fn apply(&self, raster: &mut Raster) {
        if self.is_noop() {
            return;
        }

        for px in raster.as_bytes_mut().chunks_exact_mut(4) {
            let [r, g, b] = self.adjust([px[0] as f64, px[1] as f64, px[2] as f64]);
            px[0] = clamp_channel(r);
            px[1] = clamp_channel(g);
            px[2] = clamp_channel(b);
        }
    }
}
