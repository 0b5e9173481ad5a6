//! Palette parsing and nearest-color matching
//!
//! A palette is an ordered list of [`Rgb`](crate::Rgb) colors. Matching is
//! done in CIE Lab: [`PaletteMatcher`] converts every entry once and then
//! answers nearest-color queries for a single pass over a raster.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{find_nearest_color, parse_palette, PaletteMatcher};
