//! Error diffusion and plain quantization.

use super::kernel::Kernel;
use crate::palette::PaletteMatcher;
use crate::raster::Raster;

use super::ALPHA_CUTOFF;

/// Error buffer for error diffusion.
///
/// Keeps a sliding window of error rows, only as many as the kernel can
/// reach (`max_dy + 1`), instead of a full-image buffer. Error is
/// accumulated in `f64` and never rounded.
///
/// # Usage Pattern
///
/// 1. Create buffer with `new(width, row_depth)`
/// 2. For each row:
///    a. Read accumulated error with `get_accumulated(x)`
///    b. After processing pixel, distribute error with `add_error(x, dy, error)`
///    c. After row complete, call `advance_row()`
#[derive(Debug)]
pub struct ErrorBuffer {
    /// rows[0] is the current row, rows[1] the next, etc.
    rows: Vec<Vec<[f64; 3]>>,
    width: usize,
}

impl ErrorBuffer {
    /// Create a buffer for rows of `width` pixels, `row_depth` rows deep.
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0.0; 3]; width]).collect(),
            width,
        }
    }

    /// Error accumulated so far for pixel `x` of the current row.
    #[inline]
    pub fn get_accumulated(&self, x: usize) -> [f64; 3] {
        self.rows[0][x]
    }

    /// Add error to pixel `x` of the row `row_offset` rows below the
    /// current one. Out-of-range targets are ignored.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: [f64; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            let cell = &mut self.rows[row_offset][x];
            for c in 0..3 {
                cell[c] += error[c];
            }
        }
    }

    /// Move to the next row, recycling the finished row as the new last one.
    pub fn advance_row(&mut self) {
        // Rotate left: [0,1,2] -> [1,2,0]
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 3]);
        }
    }
}

/// Spread `error` from `(x, y)` to its kernel neighbours.
///
/// A neighbour receives `error * weight / divisor` only if it lies inside
/// `src` and is opaque enough to be quantized itself (alpha >= 128).
/// Error aimed at transparent pixels is dropped.
pub(crate) fn spread_error(
    buffer: &mut ErrorBuffer,
    kernel: &Kernel,
    src: &Raster,
    x: usize,
    y: usize,
    error: [f64; 3],
) {
    let divisor = kernel.divisor as f64;
    for &(dx, dy, weight) in kernel.entries {
        let tx = x as i64 + dx as i64;
        let ty = y as i64 + dy as i64;
        if tx < 0 || tx >= src.width() as i64 || ty >= src.height() as i64 {
            continue;
        }
        let (tx, ty) = (tx as usize, ty as usize);
        if src.pixel(tx, ty)[3] < ALPHA_CUTOFF {
            continue;
        }
        let w = weight as f64 / divisor;
        buffer.add_error(tx, dy as usize, [error[0] * w, error[1] * w, error[2] * w]);
    }
}

/// Quantize `src` in row-major order, optionally diffusing error.
///
/// - Pixels with alpha < 128 keep their color, get alpha 0, and neither
///   receive nor emit error.
/// - Opaque pixels are matched at `source + accumulated error` and written
///   with alpha 255.
/// - With a kernel, `(working - matched) * strength / 100` is spread to the
///   neighbours; without one every pixel is matched independently.
/// - Without a matcher only the alpha cutoff is applied.
pub(crate) fn diffuse(
    src: &Raster,
    matcher: Option<&PaletteMatcher>,
    kernel: Option<&Kernel>,
    strength: f64,
) -> Raster {
    let (width, height) = (src.width(), src.height());
    let mut out = src.clone();
    let scale = strength / 100.0;
    let depth = kernel.map_or(1, |k| k.max_dy + 1);
    let mut buffer = ErrorBuffer::new(width, depth);

    for y in 0..height {
        for x in 0..width {
            let [r, g, b, a] = src.pixel(x, y);
            if a < ALPHA_CUTOFF {
                out.set_pixel(x, y, [r, g, b, 0]);
                continue;
            }

            let Some(matcher) = matcher else {
                out.set_pixel(x, y, [r, g, b, 255]);
                continue;
            };

            let acc = buffer.get_accumulated(x);
            let working = [r as f64 + acc[0], g as f64 + acc[1], b as f64 + acc[2]];
            let matched = matcher.nearest_color(working[0], working[1], working[2]);
            out.set_pixel(x, y, [matched.r, matched.g, matched.b, 255]);

            if let Some(kernel) = kernel {
                let [mr, mg, mb] = matched.to_f64();
                let error = [
                    (working[0] - mr) * scale,
                    (working[1] - mg) * scale,
                    (working[2] - mb) * scale,
                ];
                spread_error(&mut buffer, kernel, src, x, y, error);
            }
        }
        buffer.advance_row();
    }

    out
}
