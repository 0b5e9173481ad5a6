//! RGBA raster buffer shared by every pipeline stage.

use thiserror::Error;

/// Error returned when a raster buffer does not match its dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Width or height is zero
    #[error("raster dimensions must be at least 1x1, got {width}x{height}")]
    EmptyDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// Buffer length is not `width * height * 4`
    #[error("raster buffer has {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    LengthMismatch {
        /// Raster width
        width: usize,
        /// Raster height
        height: usize,
        /// Required byte count
        expected: usize,
        /// Supplied byte count
        actual: usize,
    },
}

/// A rectangular RGBA image, 4 bytes per pixel in row-major order.
///
/// The buffer length always equals `width * height * 4`; constructors
/// enforce it and no method can break it.
///
/// # Example
///
/// ```
/// use pixel_quant::Raster;
///
/// let raster = Raster::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
/// assert_eq!(raster.pixel(1, 0), [0, 0, 255, 128]);
/// assert!(Raster::new(2, 2, vec![0; 4]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap an RGBA buffer.
    ///
    /// # Errors
    ///
    /// - [`RasterError::EmptyDimensions`] if either dimension is zero
    /// - [`RasterError::LengthMismatch`] if `data.len() != width * height * 4`
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(RasterError::LengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A raster of transparent black pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn transparent(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "raster dimensions must be non-zero");
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    /// A raster filled with one RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        assert!(width > 0 && height > 0, "raster dimensions must be non-zero");
        Self {
            width,
            height,
            data: rgba.repeat(width * height),
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA bytes. The length cannot change through a slice.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the raster and return its buffer.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Iterate over pixels as `[R, G, B, A]`.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// RGB of evenly spaced pixels whose alpha is at least `min_alpha`.
    ///
    /// Every `ceil(pixels / max_samples)`-th pixel is visited before the
    /// alpha filter, so at most `max_samples` colors come back.
    pub fn sample_rgb(&self, max_samples: usize, min_alpha: u8) -> Vec<[f64; 3]> {
        let stride = self.pixel_count().div_ceil(max_samples.max(1)).max(1);
        self.pixels()
            .step_by(stride)
            .filter(|p| p[3] >= min_alpha)
            .map(|p| [p[0] as f64, p[1] as f64, p[2] as f64])
            .collect()
    }

    /// The pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} raster",
            self.width,
            self.height
        );
        (y * self.width + x) * 4
    }
}
