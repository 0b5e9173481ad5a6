//! The processing pipeline: adjust, resample, recolor, dither.

use rand::Rng;
use tracing::debug;

use super::error::{DitherError, PipelineError};
use crate::cluster::KMeans;
use crate::color::Rgb;
use crate::dither::{dither, DitherMethod, ALPHA_CUTOFF};
use crate::preprocess::{resample, Adjustments, ResampleMethod};
use crate::raster::Raster;

/// Largest cluster count accepted for the k-means recolor stage.
pub const MAX_KMEANS_COLORS: usize = 256;

/// Upper bound on the pixels clustered by the k-means recolor stage.
pub const KMEANS_SAMPLE_SIZE: usize = 4096;

/// Everything [`process`] needs besides the source raster.
///
/// Built with a fluent API; every stage defaults to "no effect" except
/// the dither strength, which defaults to 100.
///
/// # Example
///
/// ```
/// use pixel_quant::{DitherMethod, PipelineSettings, ResampleMethod, Rgb};
///
/// let settings = PipelineSettings::new(64, 48)
///     .resample(ResampleMethod::Lanczos)
///     .dither(DitherMethod::Atkinson)
///     .strength(80.0)
///     .palette(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]);
/// assert_eq!(settings.width, 64);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Output width in pixels.
    pub width: usize,
    /// Output height in pixels.
    pub height: usize,
    /// Resampling filter.
    pub resample: ResampleMethod,
    /// Dithering method.
    pub dither: DitherMethod,
    /// Dither strength percentage, clamped to 0..=100 when applied.
    pub strength: f64,
    /// Target palette. Replaced by cluster colors when k-means is on.
    pub palette: Vec<Rgb>,
    /// Derive the palette from this many k-means clusters. `None` or
    /// `Some(0)` keeps `palette`.
    pub kmeans_colors: Option<usize>,
    /// Color adjustments applied before resampling.
    pub adjustments: Adjustments,
}

impl PipelineSettings {
    /// Settings for a `width`×`height` output with every stage neutral.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            resample: ResampleMethod::default(),
            dither: DitherMethod::default(),
            strength: 100.0,
            palette: Vec::new(),
            kmeans_colors: None,
            adjustments: Adjustments::default(),
        }
    }

    /// Set the resampling filter.
    #[inline]
    pub fn resample(mut self, method: ResampleMethod) -> Self {
        self.resample = method;
        self
    }

    /// Set the dithering method.
    #[inline]
    pub fn dither(mut self, method: DitherMethod) -> Self {
        self.dither = method;
        self
    }

    /// Set the dither strength percentage.
    #[inline]
    pub fn strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Set the target palette.
    #[inline]
    pub fn palette(mut self, palette: Vec<Rgb>) -> Self {
        self.palette = palette;
        self
    }

    /// Derive the palette from `k` clusters of the resampled image.
    #[inline]
    pub fn kmeans(mut self, k: usize) -> Self {
        self.kmeans_colors = Some(k);
        self
    }

    /// Set the color adjustments.
    #[inline]
    pub fn adjustments(mut self, adjustments: Adjustments) -> Self {
        self.adjustments = adjustments;
        self
    }

    fn kmeans_k(&self) -> Option<usize> {
        self.kmeans_colors.filter(|&k| k > 0)
    }
}

/// Run the full pipeline over `src`.
///
/// Stages run in a fixed order, each on the output of the previous one:
///
/// 1. validate the target size and palette requirements
/// 2. apply [`Adjustments`] at source resolution
/// 3. resample to the target size
/// 4. if k-means is enabled, cluster up to [`KMEANS_SAMPLE_SIZE`] evenly
///    spaced opaque pixels (alpha >= 128) and use the rounded centroids as
///    the palette
/// 5. dither onto the palette
///
/// If the k-means sample holds no opaque pixels the configured palette is
/// kept, and if that is empty too only the alpha cutoff is applied.
///
/// # Errors
///
/// - [`PipelineError::InvalidDimensions`] if the target width or height is 0
/// - [`PipelineError::TooManyColors`] if more than [`MAX_KMEANS_COLORS`]
///   k-means colors are requested
/// - [`PipelineError::Dither`] if the method needs a palette and neither the
///   settings nor k-means provide one
pub fn process<R: Rng + ?Sized>(
    src: &Raster,
    settings: &PipelineSettings,
    rng: &mut R,
) -> Result<Raster, PipelineError> {
    let (width, height) = (settings.width, settings.height);
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidDimensions { width, height });
    }
    let kmeans_k = settings.kmeans_k();
    if let Some(requested) = kmeans_k.filter(|&k| k > MAX_KMEANS_COLORS) {
        return Err(PipelineError::TooManyColors {
            requested,
            max: MAX_KMEANS_COLORS,
        });
    }
    if kmeans_k.is_none() && settings.palette.is_empty() && settings.dither.needs_palette() {
        return Err(DitherError::EmptyPalette {
            method: settings.dither,
        }
        .into());
    }

    let adjusted;
    let source = if settings.adjustments.is_noop() {
        src
    } else {
        let mut copy = src.clone();
        settings.adjustments.apply(&mut copy);
        debug!(
            brightness = settings.adjustments.brightness,
            contrast = settings.adjustments.contrast,
            saturation = settings.adjustments.saturation,
            "adjusted colors"
        );
        adjusted = copy;
        &adjusted
    };

    let resampled = resample(source, width, height, settings.resample);
    debug!(
        from_width = src.width(),
        from_height = src.height(),
        width,
        height,
        method = %settings.resample,
        "resampled"
    );

    let mut method = settings.dither;
    let palette = match kmeans_k {
        Some(k) => {
            let derived = kmeans_palette(&resampled, k, rng);
            debug!(k, colors = derived.len(), "derived palette with k-means");
            if derived.is_empty() {
                if settings.palette.is_empty() {
                    method = DitherMethod::None;
                }
                settings.palette.clone()
            } else {
                derived
            }
        }
        None => settings.palette.clone(),
    };

    let out = dither(&resampled, &palette, method, settings.strength)?;
    debug!(method = %method, strength = settings.strength, colors = palette.len(), "dithered");
    Ok(out)
}

/// Opaque (alpha >= 128) pixel colors, stride-sampled down to
/// [`KMEANS_SAMPLE_SIZE`].
fn kmeans_points(raster: &Raster) -> Vec<[f64; 3]> {
    raster.sample_rgb(KMEANS_SAMPLE_SIZE, ALPHA_CUTOFF)
}

/// Rounded centroids of `k` clusters over the sampled opaque pixels.
fn kmeans_palette<R: Rng + ?Sized>(raster: &Raster, k: usize, rng: &mut R) -> Vec<Rgb> {
    KMeans::new(k)
        .run(&kmeans_points(raster), rng)
        .clusters
        .iter()
        .map(|c| c.color())
        .collect()
}
