//! Error types for method selection, dithering and the full pipeline.
//!
//! [`PipelineError`] is what [`process`](crate::process) returns; the
//! narrower types convert into it with `?`.

use thiserror::Error;

use crate::dither::DitherMethod;

/// A resampling or dithering method name that is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} method {name:?}")]
pub struct UnknownMethodError {
    kind: &'static str,
    name: String,
}

impl UnknownMethodError {
    pub(crate) fn resample(name: &str) -> Self {
        Self {
            kind: "resampling",
            name: name.to_string(),
        }
    }

    pub(crate) fn dither(name: &str) -> Self {
        Self {
            kind: "dither",
            name: name.to_string(),
        }
    }

    /// The rejected name, as given.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Error returned by [`dither`](crate::dither()).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DitherError {
    /// A palette-mapping method was given no colors
    #[error("dither method {method} needs a non-empty palette")]
    EmptyPalette {
        /// The method that was requested
        method: DitherMethod,
    },
}

/// Error returned by [`process`](crate::process).
///
/// # Example
///
/// ```
/// use pixel_quant::{process, PipelineError, PipelineSettings, Raster};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let src = Raster::filled(2, 2, [0, 0, 0, 255]);
/// let settings = PipelineSettings::new(0, 2);
/// let err = process(&src, &settings, &mut StdRng::seed_from_u64(1)).unwrap_err();
/// assert!(matches!(err, PipelineError::InvalidDimensions { width: 0, height: 2 }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Target width or height is zero
    #[error("target dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// More k-means colors were requested than the pipeline allows
    #[error("k-means colors must be at most {max}, got {requested}")]
    TooManyColors {
        /// Requested cluster count
        requested: usize,
        /// Largest accepted cluster count
        max: usize,
    },
    /// Dithering failed
    #[error(transparent)]
    Dither(#[from] DitherError),
}
