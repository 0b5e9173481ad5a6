//! CIE L*a*b* color space (D65 white point)
//!
//! Lab distances approximate perceived color difference. Palette matching
//! and gap suggestion both rank candidates by [`delta_e`].

use super::gamma::srgb_to_linear;

/// D65 reference white, scaled so that Y = 100.
const REF_X: f64 = 95.047;
const REF_Y: f64 = 100.0;
const REF_Z: f64 = 108.883;

/// Below this normalized value the cube root is replaced by a linear floor.
const EPSILON: f64 = 0.008856;

/// A color in CIE Lab space.
///
/// - `l`: lightness, 0 (black) to 100 (white)
/// - `a`: green (negative) to red (positive)
/// - `b`: blue (negative) to yellow (positive)
///
/// Values are not clamped; colors pushed out of gamut by error diffusion
/// map to Lab values outside the usual ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Create a Lab color from its components.
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Euclidean distance to another Lab color (CIE76 ΔE).
    #[inline]
    pub fn distance(self, other: Lab) -> f64 {
        delta_e(self, other)
    }
}

/// Convert sRGB channels in the 0..255 scale to Lab.
///
/// The channels are floats so that working values from error diffusion
/// (which may be fractional or slightly out of range) can be matched
/// without rounding first.
///
/// # Example
///
/// ```
/// use pixel_quant::rgb_to_lab;
///
/// let white = rgb_to_lab(255.0, 255.0, 255.0);
/// assert!((white.l - 100.0).abs() < 0.01);
/// assert!(white.a.abs() < 0.01);
/// ```
pub fn rgb_to_lab(r: f64, g: f64, b: f64) -> Lab {
    let r = srgb_to_linear(r / 255.0);
    let g = srgb_to_linear(g / 255.0);
    let b = srgb_to_linear(b / 255.0);

    let x = (r * 0.4124 + g * 0.3576 + b * 0.1805) * 100.0;
    let y = (r * 0.2126 + g * 0.7152 + b * 0.0722) * 100.0;
    let z = (r * 0.0193 + g * 0.1192 + b * 0.9505) * 100.0;

    let fx = lab_f(x / REF_X);
    let fy = lab_f(y / REF_Y);
    let fz = lab_f(z / REF_Z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t >= EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

/// Perceptual difference between two Lab colors (CIE76).
///
/// Plain Euclidean distance: no chroma or hue weighting.
///
/// ```
/// use pixel_quant::{delta_e, Lab};
///
/// let a = Lab::new(50.0, 10.0, -10.0);
/// let b = Lab::new(53.0, 14.0, -10.0);
/// assert!((delta_e(a, b) - 5.0).abs() < 1e-12);
/// ```
#[inline]
pub fn delta_e(a: Lab, b: Lab) -> f64 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    (dl * dl + da * da + db * db).sqrt()
}
