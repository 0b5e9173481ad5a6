//! Ordered (threshold matrix) dithering.

use super::matrix::ThresholdMatrix;
use super::{ALPHA_CUTOFF, BASE_DITHER_STRENGTH};
use crate::palette::PaletteMatcher;
use crate::raster::Raster;

/// Nudge every opaque pixel by the tiled matrix threshold and quantize.
///
/// The nudge is `offset(x, y) * BASE_DITHER_STRENGTH * strength / 100`,
/// added to R, G and B and clamped to 0..=255 before matching. Pixels are
/// independent of each other, so no scan order applies.
pub(crate) fn dither_ordered(
    src: &Raster,
    matcher: &PaletteMatcher,
    matrix: &ThresholdMatrix,
    strength: f64,
) -> Raster {
    let mut out = src.clone();
    let amplitude = BASE_DITHER_STRENGTH * strength / 100.0;

    for y in 0..src.height() {
        for x in 0..src.width() {
            let [r, g, b, a] = src.pixel(x, y);
            if a < ALPHA_CUTOFF {
                out.set_pixel(x, y, [r, g, b, 0]);
                continue;
            }

            let nudge = matrix.offset(x, y) * amplitude;
            let c = matcher.nearest_color(
                (r as f64 + nudge).clamp(0.0, 255.0),
                (g as f64 + nudge).clamp(0.0, 255.0),
                (b as f64 + nudge).clamp(0.0, 255.0),
            );
            out.set_pixel(x, y, [c.r, c.g, c.b, 255]);
        }
    }

    out
}
