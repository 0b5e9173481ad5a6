//! Ordered and error diffusion dithering.
//!
//! Every method maps an RGBA raster onto a palette. Alpha is binarized by
//! all of them: alpha < 128 becomes 0 and the pixel keeps its color, alpha
//! >= 128 becomes 255 and the pixel takes a palette color.
//!
//! # Families
//!
//! - **Ordered** methods add a tiled threshold offset to each pixel before
//!   matching ([`ThresholdMatrix`]). Pixels are independent.
//! - **Error diffusion** methods visit pixels in row-major order and pass
//!   the quantization error on to unvisited neighbours ([`Kernel`]).
//! - [`DitherMethod::None`] matches each pixel without any dithering.
//!
//! # Example
//!
//! ```
//! use pixel_quant::{dither, DitherMethod, Raster, Rgb};
//!
//! let palette = [Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)];
//! let src = Raster::filled(8, 8, [128, 128, 128, 255]);
//!
//! let out = dither(&src, &palette, DitherMethod::FloydSteinberg, 100.0).unwrap();
//! assert!(out.pixels().all(|p| p == [0, 0, 0, 255] || p == [255, 255, 255, 255]));
//! ```

mod diffusion;
mod kernel;
mod matrix;
mod ordered;

use std::fmt;
use std::str::FromStr;

pub use diffusion::ErrorBuffer;
pub use kernel::*;
pub use matrix::*;

use crate::api::{DitherError, UnknownMethodError};
use crate::color::Rgb;
use crate::palette::PaletteMatcher;
use crate::raster::Raster;

/// Peak-to-peak amplitude, in 8-bit channel units, of the ordered dither
/// nudge at full strength.
pub const BASE_DITHER_STRENGTH: f64 = 64.0;

/// Pixels with alpha below this are transparent for every method.
pub const ALPHA_CUTOFF: u8 = 128;

/// Dithering method selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherMethod {
    /// Plain nearest-color quantization.
    #[default]
    None,
    /// Ordered, 4×4 Bayer matrix.
    Bayer4x4,
    /// Ordered, 8×8 Bayer matrix.
    Bayer8x8,
    /// Ordered, 8×8 clustered dot.
    HalftoneDot,
    /// Ordered, diagonal line pattern.
    DiagonalLine,
    /// Ordered, crossed diagonals.
    CrossHatch,
    /// Ordered, square grid.
    Grid,
    /// Error diffusion, Floyd-Steinberg.
    FloydSteinberg,
    /// Error diffusion, Burkes.
    Burkes,
    /// Error diffusion, Stucki.
    Stucki,
    /// Error diffusion, Sierra two-row.
    Sierra2,
    /// Error diffusion, Sierra Lite.
    SierraLite,
    /// Error diffusion, Atkinson (75% propagation).
    Atkinson,
    /// Error diffusion, Jarvis-Judice-Ninke.
    JarvisJudiceNinke,
}

/// How a [`DitherMethod`] is carried out.
#[derive(Debug, Clone, Copy)]
pub enum DitherFamily {
    /// Quantize only.
    None,
    /// Threshold matrix.
    Ordered(&'static ThresholdMatrix),
    /// Error diffusion kernel.
    Diffusion(&'static Kernel),
}

impl DitherMethod {
    /// Every method, in display order.
    pub const ALL: [DitherMethod; 14] = [
        DitherMethod::None,
        DitherMethod::Bayer4x4,
        DitherMethod::Bayer8x8,
        DitherMethod::HalftoneDot,
        DitherMethod::DiagonalLine,
        DitherMethod::CrossHatch,
        DitherMethod::Grid,
        DitherMethod::FloydSteinberg,
        DitherMethod::Burkes,
        DitherMethod::Stucki,
        DitherMethod::Sierra2,
        DitherMethod::SierraLite,
        DitherMethod::Atkinson,
        DitherMethod::JarvisJudiceNinke,
    ];

    /// Wire name of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            DitherMethod::None => "none",
            DitherMethod::Bayer4x4 => "bayer-4x4",
            DitherMethod::Bayer8x8 => "bayer-8x8",
            DitherMethod::HalftoneDot => "halftone-dot",
            DitherMethod::DiagonalLine => "diagonal-line",
            DitherMethod::CrossHatch => "cross-hatch",
            DitherMethod::Grid => "grid",
            DitherMethod::FloydSteinberg => "floyd-steinberg",
            DitherMethod::Burkes => "burkes",
            DitherMethod::Stucki => "stucki",
            DitherMethod::Sierra2 => "sierra-2",
            DitherMethod::SierraLite => "sierra-lite",
            DitherMethod::Atkinson => "atkinson",
            DitherMethod::JarvisJudiceNinke => "jarvis-judice-ninke",
        }
    }

    /// Matrix or kernel behind the method.
    pub fn family(self) -> DitherFamily {
        match self {
            DitherMethod::None => DitherFamily::None,
            DitherMethod::Bayer4x4 => DitherFamily::Ordered(&BAYER_4X4),
            DitherMethod::Bayer8x8 => DitherFamily::Ordered(&BAYER_8X8),
            DitherMethod::HalftoneDot => DitherFamily::Ordered(&HALFTONE_DOT),
            DitherMethod::DiagonalLine => DitherFamily::Ordered(&DIAGONAL_LINE),
            DitherMethod::CrossHatch => DitherFamily::Ordered(&CROSS_HATCH),
            DitherMethod::Grid => DitherFamily::Ordered(&GRID),
            DitherMethod::FloydSteinberg => DitherFamily::Diffusion(&FLOYD_STEINBERG),
            DitherMethod::Burkes => DitherFamily::Diffusion(&BURKES),
            DitherMethod::Stucki => DitherFamily::Diffusion(&STUCKI),
            DitherMethod::Sierra2 => DitherFamily::Diffusion(&SIERRA_TWO_ROW),
            DitherMethod::SierraLite => DitherFamily::Diffusion(&SIERRA_LITE),
            DitherMethod::Atkinson => DitherFamily::Diffusion(&ATKINSON),
            DitherMethod::JarvisJudiceNinke => DitherFamily::Diffusion(&JARVIS_JUDICE_NINKE),
        }
    }

    /// True for every method except [`DitherMethod::None`].
    #[inline]
    pub fn needs_palette(self) -> bool {
        self != DitherMethod::None
    }
}

impl fmt::Display for DitherMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DitherMethod {
    type Err = UnknownMethodError;

    /// Case-insensitive; underscores are read as hyphens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('_', "-");
        DitherMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == name)
            .ok_or_else(|| UnknownMethodError::dither(s))
    }
}

/// Map `src` onto `palette` with the given method.
///
/// `strength` is a percentage; values outside 0..=100 are clamped. It
/// scales the ordered nudge and the diffused error alike.
///
/// # Errors
///
/// Returns [`DitherError::EmptyPalette`] when a method other than
/// [`DitherMethod::None`] gets an empty palette. `None` with an empty
/// palette only binarizes alpha.
pub fn dither(
    src: &Raster,
    palette: &[Rgb],
    method: DitherMethod,
    strength: f64,
) -> Result<Raster, DitherError> {
    let strength = strength.clamp(0.0, 100.0);

    if palette.is_empty() {
        if method.needs_palette() {
            return Err(DitherError::EmptyPalette { method });
        }
        return Ok(diffusion::diffuse(src, None, None, strength));
    }

    let matcher =
        PaletteMatcher::new(palette).map_err(|_| DitherError::EmptyPalette { method })?;

    let out = match method.family() {
        DitherFamily::None => diffusion::diffuse(src, Some(&matcher), None, strength),
        DitherFamily::Ordered(matrix) => ordered::dither_ordered(src, &matcher, matrix, strength),
        DitherFamily::Diffusion(kernel) => {
            diffusion::diffuse(src, Some(&matcher), Some(kernel), strength)
        }
    };
    Ok(out)
}
