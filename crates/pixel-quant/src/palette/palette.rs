//! Nearest-color matching against a fixed palette.

use super::error::PaletteError;
use crate::color::{delta_e, rgb_to_lab, Lab, Rgb};

/// A palette prepared for repeated nearest-color queries.
///
/// The Lab form of every entry is computed once at construction and lives
/// as long as the matcher. Matchers are built per pass and dropped with it;
/// nothing is cached across calls.
///
/// # Example
///
/// ```
/// use pixel_quant::{PaletteMatcher, Rgb};
///
/// let matcher = PaletteMatcher::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// assert_eq!(matcher.nearest_color(40.0, 40.0, 40.0), Rgb::new(0, 0, 0));
/// assert_eq!(matcher.nearest_color(220.0, 220.0, 220.0), Rgb::new(255, 255, 255));
/// ```
#[derive(Debug, Clone)]
pub struct PaletteMatcher {
    colors: Vec<Rgb>,
    labs: Vec<Lab>,
}

impl PaletteMatcher {
    /// Prepare a palette for matching.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] if `colors` is empty.
    /// Duplicate entries are accepted; the first occurrence wins ties.
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self {
            colors: colors.to_vec(),
            labs: colors.iter().map(|c| c.to_lab()).collect(),
        })
    }

    /// Number of palette entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`: empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Palette entries in their original order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Palette entry at `idx`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// Find the entry with the smallest ΔE to `lab`.
    ///
    /// Returns `(index, delta_e)`. Only a strictly smaller distance replaces
    /// the current best, so ties resolve to the earliest entry.
    #[inline]
    pub fn find_nearest(&self, lab: Lab) -> (usize, f64) {
        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;

        for (i, &entry) in self.labs.iter().enumerate() {
            let dist = delta_e(lab, entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx, best_dist)
    }

    /// Nearest entry to a color given as floats in the 0..255 scale.
    #[inline]
    pub fn nearest_color(&self, r: f64, g: f64, b: f64) -> Rgb {
        let (idx, _) = self.find_nearest(rgb_to_lab(r, g, b));
        self.colors[idx]
    }
}

/// Find the palette entry perceptually closest to `pixel`.
///
/// Converts the pixel and every palette entry to Lab and returns the entry
/// with minimum ΔE, preferring the earliest entry on ties. Build a
/// [`PaletteMatcher`] instead when matching many pixels.
///
/// # Errors
///
/// Returns [`PaletteError::EmptyPalette`] if `palette` is empty.
///
/// ```
/// use pixel_quant::{find_nearest_color, Rgb};
///
/// let palette = [Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)];
/// let nearest = find_nearest_color(Rgb::new(200, 30, 60), &palette).unwrap();
/// assert_eq!(nearest, Rgb::new(255, 0, 0));
/// ```
pub fn find_nearest_color(pixel: Rgb, palette: &[Rgb]) -> Result<Rgb, PaletteError> {
    let matcher = PaletteMatcher::new(palette)?;
    let (idx, _) = matcher.find_nearest(pixel.to_lab());
    Ok(matcher.color(idx))
}

/// Parse a list of hex strings into palette colors.
///
/// The list may be empty; whether an empty palette is acceptable is up to
/// the consumer.
///
/// # Errors
///
/// Returns [`PaletteError::ParseColor`] naming the first invalid entry.
pub fn parse_palette<S: AsRef<str>>(hex: &[S]) -> Result<Vec<Rgb>, PaletteError> {
    hex.iter()
        .enumerate()
        .map(|(index, s)| {
            s.as_ref()
                .parse::<Rgb>()
                .map_err(|source| PaletteError::ParseColor { index, source })
        })
        .collect()
}
