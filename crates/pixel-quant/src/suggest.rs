//! Palette gap suggestion.
//!
//! Finds colors that are common in an image but poorly covered by an
//! existing palette. The image is subsampled, clustered, and each cluster
//! is scored by how far its centroid lies from the palette, weighted by
//! how many pixels it holds.

use rand::Rng;
use tracing::debug;

use crate::cluster::KMeans;
use crate::color::{rgb_to_lab, Rgb};
use crate::palette::PaletteMatcher;
use crate::raster::Raster;

/// Upper bound on the number of sampled pixels.
pub const SUGGEST_SAMPLE_SIZE: usize = 4096;

/// Upper bound on the number of clusters.
pub const SUGGEST_MAX_CLUSTERS: usize = 128;

/// Suggest up to `n` colors to add to `palette`.
///
/// Every `ceil(pixels / 4096)`-th pixel with alpha > 128 is sampled and
/// clustered into `min(128, samples)` groups. Each non-empty cluster is
/// scored as ΔE(centroid, nearest palette entry) × cluster size, and the
/// rounded centroids of the `n` highest-scoring clusters are returned,
/// best first.
///
/// An empty palette, `n == 0` or an image with no sampled pixels yields an
/// empty list.
///
/// # Example
///
/// ```
/// use pixel_quant::{suggest_colors, Raster, Rgb};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let raster = Raster::filled(16, 16, [230, 120, 20, 255]);
/// let palette = [Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)];
/// let mut rng = StdRng::seed_from_u64(9);
///
/// let colors = suggest_colors(&raster, &palette, 3, &mut rng);
/// assert_eq!(colors[0], Rgb::new(230, 120, 20));
/// ```
pub fn suggest_colors<R: Rng + ?Sized>(
    raster: &Raster,
    palette: &[Rgb],
    n: usize,
    rng: &mut R,
) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    let Ok(matcher) = PaletteMatcher::new(palette) else {
        return Vec::new();
    };

    // Strictly above half alpha
    let samples = raster.sample_rgb(SUGGEST_SAMPLE_SIZE, 129);
    if samples.is_empty() {
        return Vec::new();
    }

    let k = SUGGEST_MAX_CLUSTERS.min(samples.len());
    let clustering = KMeans::new(k).run(&samples, rng);

    let mut scored: Vec<(f64, Rgb)> = clustering
        .clusters
        .iter()
        .filter(|c| c.count > 0)
        .map(|c| {
            let [r, g, b] = c.centroid;
            let (_, distance) = matcher.find_nearest(rgb_to_lab(r, g, b));
            (distance * c.count as f64, c.color())
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    debug!(
        samples = samples.len(),
        clusters = scored.len(),
        requested = n,
        "scored palette gaps"
    );

    scored.into_iter().take(n).map(|(_, color)| color).collect()
}
