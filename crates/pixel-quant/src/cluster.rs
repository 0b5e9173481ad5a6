//! Lloyd's k-means over RGB points.
//!
//! Used twice: to derive a palette from the image itself (pipeline k-means
//! recolor) and to find dominant color groups when suggesting palette
//! additions. Distances are squared Euclidean in 0..255 RGB; no perceptual
//! weighting happens here.
//!
//! The random source is a parameter so that callers decide between
//! reproducible (seeded) and entropy-driven runs.

use rand::seq::index;
use rand::Rng;
use tracing::trace;

use crate::color::Rgb;

/// Default upper bound on Lloyd rounds.
pub const MAX_ITERATIONS: usize = 20;

/// One cluster of a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    /// Mean of the assigned points (or the reseed point if none were assigned).
    pub centroid: [f64; 3],
    /// Number of points assigned to this cluster.
    pub count: usize,
}

impl Cluster {
    /// Centroid rounded and clamped to an 8-bit color.
    #[inline]
    pub fn color(&self) -> Rgb {
        Rgb::from_f64(self.centroid)
    }
}

/// Result of a k-means run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clustering {
    /// Clusters in seed order.
    pub clusters: Vec<Cluster>,
    /// Cluster index for every input point, in input order.
    pub assignments: Vec<usize>,
}

impl Clustering {
    /// True when no clusters were produced.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

/// K-means configuration.
///
/// # Example
///
/// ```
/// use pixel_quant::KMeans;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let points = [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [250.0, 250.0, 250.0]];
/// let mut rng = StdRng::seed_from_u64(7);
/// let result = KMeans::new(2).run(&points, &mut rng);
///
/// assert_eq!(result.clusters.len(), 2);
/// assert_eq!(result.assignments[0], result.assignments[1]);
/// assert_ne!(result.assignments[0], result.assignments[2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeans {
    k: usize,
    max_iterations: usize,
}

impl KMeans {
    /// Cluster into (at most) `k` groups.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Override the round limit.
    pub fn max_iterations(mut self, rounds: usize) -> Self {
        self.max_iterations = rounds;
        self
    }

    /// Run Lloyd's algorithm over `points`.
    ///
    /// `k` is clamped to the number of points; `k == 0` or an empty input
    /// yields an empty [`Clustering`]. Initial centroids are `k` distinct
    /// input points sampled uniformly. Each round assigns every point to its
    /// nearest centroid (ties to the lower index), then moves centroids to
    /// the mean of their points. A cluster left empty is reseeded from a
    /// random input point. Iteration stops once a round leaves every
    /// centroid exactly where it was.
    pub fn run<R: Rng + ?Sized>(&self, points: &[[f64; 3]], rng: &mut R) -> Clustering {
        let k = self.k.min(points.len());
        if k == 0 {
            return Clustering::default();
        }

        let mut centroids: Vec<[f64; 3]> = index::sample(rng, points.len(), k)
            .into_iter()
            .map(|i| points[i])
            .collect();
        let mut assignments = vec![0usize; points.len()];

        for round in 0..self.max_iterations {
            let (sums, counts) = assign(points, &centroids, &mut assignments);

            let mut changed = false;
            for (c, centroid) in centroids.iter_mut().enumerate() {
                let next = if counts[c] == 0 {
                    points[rng.gen_range(0..points.len())]
                } else {
                    let n = counts[c] as f64;
                    [sums[c][0] / n, sums[c][1] / n, sums[c][2] / n]
                };
                if next != *centroid {
                    changed = true;
                    *centroid = next;
                }
            }

            if !changed {
                trace!(round, k, "k-means converged");
                break;
            }
        }

        // Final pass so that assignments and counts describe the returned
        // centroids even when the round limit cut iteration short.
        let (_, counts) = assign(points, &centroids, &mut assignments);

        Clustering {
            clusters: centroids
                .into_iter()
                .zip(counts)
                .map(|(centroid, count)| Cluster { centroid, count })
                .collect(),
            assignments,
        }
    }
}

/// Assign every point to its nearest centroid.
///
/// Returns per-cluster channel sums and point counts.
fn assign(
    points: &[[f64; 3]],
    centroids: &[[f64; 3]],
    assignments: &mut [usize],
) -> (Vec<[f64; 3]>, Vec<usize>) {
    let mut sums = vec![[0.0f64; 3]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];

    for (point, slot) in points.iter().zip(assignments.iter_mut()) {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (c, centroid) in centroids.iter().enumerate() {
            let dist = squared_distance(point, centroid);
            if dist < best_dist {
                best_dist = dist;
                best = c;
            }
        }
        *slot = best;
        counts[best] += 1;
        for ch in 0..3 {
            sums[best][ch] += point[ch];
        }
    }

    (sums, counts)
}

#[inline]
fn squared_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn test_zero_k_or_no_points_is_empty() {
        let points = [[1.0, 2.0, 3.0]];
        assert!(KMeans::new(0).run(&points, &mut rng()).is_empty());
        assert!(KMeans::new(4).run(&[], &mut rng()).is_empty());
    }

    #[test]
    fn test_single_cluster_of_identical_points() {
        let points = vec![[12.0, 200.0, 99.0]; 50];
        let result = KMeans::new(1).run(&points, &mut rng());

        assert_eq!(result.clusters.len(), 1);
        assert_eq!(result.clusters[0].centroid, [12.0, 200.0, 99.0]);
        assert_eq!(result.clusters[0].count, 50);
        assert!(result.assignments.iter().all(|&a| a == 0));
        assert_eq!(result.clusters[0].color(), Rgb::new(12, 200, 99));
    }

    #[test]
    fn test_k_clamped_to_point_count() {
        let points = [[0.0, 0.0, 0.0], [255.0, 255.0, 255.0]];
        let result = KMeans::new(10).run(&points, &mut rng());
        assert_eq!(result.clusters.len(), 2);
        assert_ne!(result.assignments[0], result.assignments[1]);
    }

    #[test]
    fn test_separates_two_groups() {
        let mut points = Vec::new();
        for i in 0..20 {
            points.push([10.0 + i as f64 * 0.5, 10.0, 10.0]);
            points.push([240.0, 240.0 - i as f64 * 0.5, 240.0]);
        }
        let result = KMeans::new(2).run(&points, &mut rng());

        let mut counts: Vec<usize> = result.clusters.iter().map(|c| c.count).collect();
        counts.sort_unstable();
        assert_eq!(counts, vec![20, 20]);

        let dark = result.assignments[0];
        for (i, &a) in result.assignments.iter().enumerate() {
            if i % 2 == 0 {
                assert_eq!(a, dark);
            } else {
                assert_ne!(a, dark);
            }
        }

        let dark_centroid = result.clusters[dark].centroid;
        assert!((dark_centroid[0] - 14.75).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_seeds_leave_spare_clusters_empty() {
        // Three identical points with k=3: every point ties to cluster 0
        let points = vec![[5.0, 5.0, 5.0]; 3];
        let result = KMeans::new(3).run(&points, &mut rng());
        assert_eq!(result.clusters[0].count, 3);
        assert_eq!(result.clusters.iter().map(|c| c.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_same_seed_same_result() {
        let points: Vec<[f64; 3]> = (0..200)
            .map(|i| {
                let v = (i * 37 % 256) as f64;
                [v, (i * 11 % 256) as f64, 255.0 - v]
            })
            .collect();
        let a = KMeans::new(5).run(&points, &mut StdRng::seed_from_u64(3));
        let b = KMeans::new(5).run(&points, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_counts_match_assignments() {
        let points: Vec<[f64; 3]> = (0..64)
            .map(|i| [(i * 4) as f64, (i % 8 * 30) as f64, 0.0])
            .collect();
        let result = KMeans::new(4).max_iterations(1).run(&points, &mut rng());
        for (c, cluster) in result.clusters.iter().enumerate() {
            let assigned = result.assignments.iter().filter(|&&a| a == c).count();
            assert_eq!(cluster.count, assigned);
        }
    }
}
