//! Color types and conversion utilities
//!
//! Pixels travel through the pipeline as 8-bit sRGB ([`Rgb`]). Perceptual
//! comparisons are made in CIE Lab ([`Lab`]), which is derived on demand and
//! never stored alongside the raster.
//!
//! # Example
//!
//! ```
//! use pixel_quant::{delta_e, rgb_to_lab, Rgb};
//!
//! let red: Rgb = "#ff0000".parse().unwrap();
//! let dark_red = Rgb::new(200, 0, 0);
//!
//! let d = delta_e(red.to_lab(), dark_red.to_lab());
//! assert!(d > 0.0);
//! assert_eq!(rgb_to_lab(255.0, 0.0, 0.0), red.to_lab());
//! ```

mod gamma;
mod lab;
mod rgb;

pub use gamma::srgb_to_linear;
pub use lab::{delta_e, rgb_to_lab, Lab};
pub use rgb::Rgb;

pub(crate) use rgb::clamp_channel;
