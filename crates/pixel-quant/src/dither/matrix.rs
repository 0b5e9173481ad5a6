//! Threshold matrices for ordered dithering.
//!
//! Each matrix is S×S and holds every value of `0..S²` exactly once. A pixel
//! at `(x, y)` reads `M[y % S][x % S] / S²`, giving a threshold in `[0, 1)`
//! that is recentered around zero before it nudges the color.

/// A square, tileable threshold matrix.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdMatrix {
    /// Side length S.
    pub size: usize,
    /// Row-major values, a permutation of `0..size * size`.
    pub values: &'static [u8],
}

impl ThresholdMatrix {
    /// Normalizing divisor (S²).
    #[inline]
    pub fn divisor(&self) -> usize {
        self.size * self.size
    }

    /// Centered threshold at `(x, y)`, in `[-0.5, 0.5)`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> f64 {
        let v = self.values[(y % self.size) * self.size + (x % self.size)];
        v as f64 / self.divisor() as f64 - 0.5
    }
}

/// 4×4 Bayer matrix.
///
/// ```text
///     0   8   2  10
///    12   4  14   6
///     3  11   1   9
///    15   7  13   5
/// ```
pub const BAYER_4X4: ThresholdMatrix = ThresholdMatrix {
    size: 4,
    values: &[
        0, 8, 2, 10, //
        12, 4, 14, 6, //
        3, 11, 1, 9, //
        15, 7, 13, 5,
    ],
};

/// 8×8 Bayer matrix, the recursive expansion of [`BAYER_4X4`].
pub const BAYER_8X8: ThresholdMatrix = ThresholdMatrix {
    size: 8,
    values: &[
        0, 32, 8, 40, 2, 34, 10, 42, //
        48, 16, 56, 24, 50, 18, 58, 26, //
        12, 44, 4, 36, 14, 46, 6, 38, //
        60, 28, 52, 20, 62, 30, 54, 22, //
        3, 35, 11, 43, 1, 33, 9, 41, //
        51, 19, 59, 27, 49, 17, 57, 25, //
        15, 47, 7, 39, 13, 45, 5, 37, //
        63, 31, 55, 23, 61, 29, 53, 21,
    ],
};

/// 8×8 clustered-dot matrix.
///
/// Thresholds grow outward from two dot centers per tile, so mid tones
/// render as round dots on a 45° screen instead of a dispersed pattern.
pub const HALFTONE_DOT: ThresholdMatrix = ThresholdMatrix {
    size: 8,
    values: &[
        24, 10, 12, 26, 35, 47, 49, 37, //
        8, 0, 2, 14, 45, 59, 61, 51, //
        22, 6, 4, 16, 43, 57, 63, 53, //
        30, 20, 18, 28, 33, 41, 55, 39, //
        34, 46, 48, 36, 25, 11, 13, 27, //
        44, 58, 60, 50, 9, 1, 3, 15, //
        42, 56, 62, 52, 23, 7, 5, 17, //
        32, 40, 54, 38, 31, 21, 19, 29,
    ],
};

/// 4×4 diagonal lines: `M[y][x] = ((x + y) % 4) * 4 + y`.
///
/// ```text
///     0   4   8  12
///     5   9  13   1
///    10  14   2   6
///    15   3   7  11
/// ```
pub const DIAGONAL_LINE: ThresholdMatrix = ThresholdMatrix {
    size: 4,
    values: &[
        0, 4, 8, 12, //
        5, 9, 13, 1, //
        10, 14, 2, 6, //
        15, 3, 7, 11,
    ],
};

/// 4×4 cross-hatch: both diagonals get the lowest thresholds.
///
/// ```text
///     0   8   9   4
///    10   1   5  11
///    12   6   2  13
///     7  14  15   3
/// ```
pub const CROSS_HATCH: ThresholdMatrix = ThresholdMatrix {
    size: 4,
    values: &[
        0, 8, 9, 4, //
        10, 1, 5, 11, //
        12, 6, 2, 13, //
        7, 14, 15, 3,
    ],
};

/// 4×4 grid: the first row and column get the lowest thresholds.
///
/// ```text
///     0   1   2   3
///     4   7   8   9
///     5  10  11  12
///     6  13  14  15
/// ```
pub const GRID: ThresholdMatrix = ThresholdMatrix {
    size: 4,
    values: &[
        0, 1, 2, 3, //
        4, 7, 8, 9, //
        5, 10, 11, 12, //
        6, 13, 14, 15,
    ],
};
