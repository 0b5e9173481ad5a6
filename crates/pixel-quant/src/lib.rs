#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! pixel-quant: palette quantization and dithering for pixel art
//!
//! This library turns an arbitrary RGBA raster into a reduced-palette,
//! pixel-art-style raster. It is pure numeric image processing: callers hand
//! in a decoded buffer and settings, and get one buffer back.
//!
//! # Quick Start
//!
//! [`process`] runs the whole pipeline:
//!
//! ```
//! use pixel_quant::{process, DitherMethod, PipelineSettings, Raster, ResampleMethod, Rgb};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let src = Raster::filled(32, 32, [128, 128, 128, 255]);
//! let settings = PipelineSettings::new(16, 16)
//!     .resample(ResampleMethod::Bilinear)
//!     .dither(DitherMethod::Bayer4x4)
//!     .palette(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]);
//!
//! let out = process(&src, &settings, &mut StdRng::seed_from_u64(0)).unwrap();
//! assert_eq!((out.width(), out.height()), (16, 16));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! RGBA raster
//!     |
//!     v
//! [Adjust]          brightness -> contrast -> saturation, alpha untouched
//!     |
//!     v
//! [Resample]        nearest | bilinear | lanczos-3
//!     |
//!     v
//! [K-means]         optional: cluster centroids become the palette
//!     |
//!     v
//! [Dither]          ordered matrix | error diffusion | none
//!     |
//!     v
//! RGBA raster       alpha is 0 or 255, opaque pixels are palette colors
//! ```
//!
//! # Color Matching
//!
//! Nearest colors are chosen by CIE76 ΔE in CIE Lab (D65), see
//! [`find_nearest_color`]. Ordered and diffusion arithmetic, k-means and
//! resampling all work on plain 0..255 sRGB values.
//!
//! # Randomness
//!
//! Only k-means draws random numbers. Every function that may run it takes
//! a `rand::Rng` so callers choose between seeded, reproducible output and
//! entropy.
//!
//! # Palette Suggestions
//!
//! [`suggest_colors`] is a separate entry point that ranks colors the image
//! uses heavily but the palette covers poorly.

pub mod api;
pub mod cluster;
pub mod color;
pub mod dither;
pub mod palette;
pub mod preprocess;
pub mod raster;
pub mod suggest;


pub use api::{
    process, DitherError, PipelineError, PipelineSettings, UnknownMethodError, KMEANS_SAMPLE_SIZE,
    MAX_KMEANS_COLORS,
};
pub use cluster::{Cluster, Clustering, KMeans};
pub use color::{delta_e, rgb_to_lab, Lab, Rgb};
pub use dither::{dither, DitherMethod};
pub use palette::{find_nearest_color, parse_palette, PaletteError, PaletteMatcher, ParseColorError};
pub use preprocess::{resample, Adjustments, ResampleMethod, MAX_CONTRAST};
pub use raster::{Raster, RasterError};
pub use suggest::suggest_colors;
