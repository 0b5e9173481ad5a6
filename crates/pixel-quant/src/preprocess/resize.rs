//! Raster resampling.
//!
//! Three interchangeable filters map a W₀×H₀ raster onto W₁×H₁. Alpha is
//! filtered exactly like the color channels.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::api::UnknownMethodError;
use crate::color::clamp_channel;
use crate::raster::Raster;

/// Lanczos lobe count.
const LANCZOS_A: i64 = 3;

/// Resampling filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleMethod {
    /// Nearest-neighbour sampling. Keeps hard pixel-art edges.
    #[default]
    Nearest,
    /// Bilinear interpolation of the four surrounding source pixels.
    Bilinear,
    /// Windowed-sinc (Lanczos, a = 3) convolution.
    Lanczos,
}

impl ResampleMethod {
    /// Wire name of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            ResampleMethod::Nearest => "nearest",
            ResampleMethod::Bilinear => "bilinear",
            ResampleMethod::Lanczos => "lanczos",
        }
    }
}

impl fmt::Display for ResampleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResampleMethod {
    type Err = UnknownMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(ResampleMethod::Nearest),
            "bilinear" => Ok(ResampleMethod::Bilinear),
            "lanczos" | "lanczos3" | "lanczos-3" => Ok(ResampleMethod::Lanczos),
            _ => Err(UnknownMethodError::resample(s)),
        }
    }
}

/// Resample `src` to `width`×`height` with the given filter.
///
/// Both target dimensions must be at least 1; callers validate this
/// before resampling.
///
/// # Example
///
/// ```
/// use pixel_quant::{resample, Raster, ResampleMethod};
///
/// let src = Raster::filled(4, 4, [10, 20, 30, 255]);
/// let out = resample(&src, 2, 2, ResampleMethod::Bilinear);
/// assert_eq!(out.pixel(1, 1), [10, 20, 30, 255]);
/// ```
pub fn resample(src: &Raster, width: usize, height: usize, method: ResampleMethod) -> Raster {
    debug_assert!(width > 0 && height > 0, "resample target must be non-empty");
    match method {
        ResampleMethod::Nearest => resize_nearest(src, width, height),
        ResampleMethod::Bilinear => resize_bilinear(src, width, height),
        ResampleMethod::Lanczos => resize_lanczos(src, width, height),
    }
}

fn resize_nearest(src: &Raster, width: usize, height: usize) -> Raster {
    let (sw, sh) = (src.width(), src.height());
    let mut out = Raster::transparent(width, height);

    for y in 0..height {
        let sy = y * sh / height;
        for x in 0..width {
            let sx = x * sw / width;
            out.set_pixel(x, y, src.pixel(sx, sy));
        }
    }

    out
}

fn resize_bilinear(src: &Raster, width: usize, height: usize) -> Raster {
    let (sw, sh) = (src.width(), src.height());
    let x_ratio = (sw - 1) as f64 / width as f64;
    let y_ratio = (sh - 1) as f64 / height as f64;
    let mut out = Raster::transparent(width, height);

    for y in 0..height {
        let fy = y as f64 * y_ratio;
        let y0 = fy.floor() as usize;
        let y1 = (y0 + 1).min(sh - 1);
        let dy = fy - y0 as f64;

        for x in 0..width {
            let fx = x as f64 * x_ratio;
            let x0 = fx.floor() as usize;
            let x1 = (x0 + 1).min(sw - 1);
            let dx = fx - x0 as f64;

            let tl = src.pixel(x0, y0);
            let tr = src.pixel(x1, y0);
            let bl = src.pixel(x0, y1);
            let br = src.pixel(x1, y1);

            let mut rgba = [0u8; 4];
            for c in 0..4 {
                let top = tl[c] as f64 * (1.0 - dx) + tr[c] as f64 * dx;
                let bottom = bl[c] as f64 * (1.0 - dx) + br[c] as f64 * dx;
                rgba[c] = clamp_channel(top * (1.0 - dy) + bottom * dy);
            }
            out.set_pixel(x, y, rgba);
        }
    }

    out
}

/// Lanczos kernel: `sinc(x) * sinc(x / a)` inside the window, zero outside.
#[inline]
fn lanczos(x: f64) -> f64 {
    let a = LANCZOS_A as f64;
    if x == 0.0 {
        1.0
    } else if x.abs() >= a {
        0.0
    } else {
        let pi_x = PI * x;
        a * pi_x.sin() * (pi_x / a).sin() / (pi_x * pi_x)
    }
}

/// Source indices and 1-D weights contributing to one destination index.
///
/// The window spans `floor(center) - (a - 1) ..= floor(center) + (a - 1)`,
/// restricted to the source bounds.
fn lanczos_taps(dest: usize, ratio: f64, src_len: usize) -> Vec<(usize, f64)> {
    let center = (dest as f64 + 0.5) * ratio - 0.5;
    let base = center.floor() as i64;
    ((base - (LANCZOS_A - 1))..=(base + (LANCZOS_A - 1)))
        .filter(|&i| i >= 0 && (i as usize) < src_len)
        .map(|i| (i as usize, lanczos(i as f64 - center)))
        .collect()
}

fn resize_lanczos(src: &Raster, width: usize, height: usize) -> Raster {
    let x_ratio = src.width() as f64 / width as f64;
    let y_ratio = src.height() as f64 / height as f64;
    let mut out = Raster::transparent(width, height);

    let columns: Vec<Vec<(usize, f64)>> = (0..width)
        .map(|x| lanczos_taps(x, x_ratio, src.width()))
        .collect();

    for y in 0..height {
        let rows = lanczos_taps(y, y_ratio, src.height());

        for (x, cols) in columns.iter().enumerate() {
            let mut acc = [0.0f64; 4];
            let mut total = 0.0;

            for &(sy, wy) in &rows {
                for &(sx, wx) in cols {
                    let w = wx * wy;
                    let p = src.pixel(sx, sy);
                    for c in 0..4 {
                        acc[c] += p[c] as f64 * w;
                    }
                    total += w;
                }
            }

            // Degenerate window: leave the pixel transparent black
            if total == 0.0 {
                continue;
            }

            out.set_pixel(
                x,
                y,
                [
                    clamp_channel(acc[0] / total),
                    clamp_channel(acc[1] / total),
                    clamp_channel(acc[2] / total),
                    clamp_channel(acc[3] / total),
                ],
            );
        }
    }

    out
}
