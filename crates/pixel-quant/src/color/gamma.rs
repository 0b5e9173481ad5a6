//! sRGB transfer function (IEC 61966-2-1).

/// Decode one gamma-encoded sRGB channel (0.0..=1.0) to linear light.
///
/// Values outside the nominal range are passed through the same piecewise
/// curve; error diffusion can push working channels slightly past 0 or 1.
#[inline]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
