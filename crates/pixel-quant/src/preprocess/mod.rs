//! Image preprocessing ahead of quantization.
//!
//! Two stages run before any palette work:
//!
//! 1. **Adjust** - brightness, contrast and saturation on the source
//!    pixels ([`Adjustments`])
//! 2. **Resample** - scale to the target dimensions with nearest, bilinear
//!    or Lanczos-3 filtering ([`resample`])
//!
//! # Processing Order
//!
//! Adjustment happens **before** resampling so that filters see the
//! adjusted values and the output dimensions are never touched by the
//! color stage. Both stages treat alpha as an ordinary channel during
//! filtering and never modify it during adjustment.
//!
//! ```
//! use pixel_quant::{resample, Adjustments, Raster, ResampleMethod};
//!
//! let mut raster = Raster::filled(4, 4, [120, 60, 30, 255]);
//! Adjustments::new().saturation(-100.0).apply(&mut raster);
//!
//! let small = resample(&raster, 2, 2, ResampleMethod::Bilinear);
//! assert_eq!((small.width(), small.height()), (2, 2));
//! let [r, g, b, a] = small.pixel(0, 0);
//! assert!(r == g && g == b);
//! assert_eq!(a, 255);
//! ```

mod adjust;
mod resize;

pub use adjust::{Adjustments, MAX_CONTRAST};
pub use resize::{resample, ResampleMethod};
