use nalgebra::{Matrix2, Vector2};
use serde::Serialize;

/// Running statistics of one component, and the record emitted for a stable
/// region: pixel count, spatial mean, 2×2 spatial covariance, stability
/// score, and the grey level (`age`) the record describes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComponentStats {
    pub n: u64,
    pub mean: Vector2<f32>,
    pub cov: Matrix2<f32>,
    pub stability: f32,
    pub age: u8,
}

impl ComponentStats {
    /// Statistics of an empty pixel set (the stack sentinel).
    pub(crate) fn empty() -> Self {
        Self {
            n: 0,
            mean: Vector2::zeros(),
            cov: Matrix2::zeros(),
            stability: 0.0,
            age: 0,
        }
    }

    /// Single-pixel statistics.
    pub(crate) fn point(x: f32, y: f32, age: u8) -> Self {
        Self {
            n: 1,
            mean: Vector2::new(x, y),
            cov: Matrix2::zeros(),
            stability: 0.0,
            age,
        }
    }

    /// Folds `other` into `self` with the pairwise-parallel update for the
    /// mean and covariance of two disjoint pixel sets. `stability` and `age`
    /// are left untouched.
    pub(crate) fn absorb(&mut self, other: &ComponentStats) {
        if other.n == 0 {
            return;
        }
        let total = (self.n + other.n) as f32;
        let p = other.n as f32 / total;
        let q = self.n as f32 / total;
        let d = self.mean - other.mean;
        self.cov = p * other.cov + q * self.cov + (p * q) * (d * d.transpose());
        self.mean = p * other.mean + q * self.mean;
        self.n += other.n;
    }
}
