//! Least-squares linear model.

use serde::{Deserialize, Serialize};

/// A line `y = slope * x + intercept` fit by ordinary least squares.
///
/// The prediction primitive inside the learned index: level 0 maps keys to
/// fractional segment indices, level 1 maps keys to array positions. The
/// parameters are computed once by [`LinearModel::fit`] and never change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    slope: f64,
    intercept: f64,
}

impl LinearModel {
    /// Model that predicts `value` for every input.
    pub fn constant(value: f64) -> Self {
        Self {
            slope: 0.0,
            intercept: value,
        }
    }

    /// Fits a line to `(x, y)` pairs by ordinary least squares:
    /// `slope = Σ(xᵢ-x̄)(yᵢ-ȳ) / Σ(xᵢ-x̄)²`, `intercept = ȳ - slope·x̄`.
    ///
    /// Degenerate inputs fall back to a constant model: no points predict
    /// `0`, a single point predicts its own `y`, and zero variance in `x`
    /// predicts the mean of `y` (a vertical line cannot be represented).
    pub fn fit(points: &[(f64, f64)]) -> Self {
        match points {
            [] => Self::constant(0.0),
            [(_, y)] => Self::constant(*y),
            _ => {
                let n = points.len() as f64;
                let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
                let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

                let mut numerator = 0.0;
                let mut denominator = 0.0;
                for &(x, y) in points {
                    let dx = x - mean_x;
                    numerator += dx * (y - mean_y);
                    denominator += dx * dx;
                }

                if denominator == 0.0 {
                    return Self::constant(mean_y);
                }

                let slope = numerator / denominator;
                Self {
                    slope,
                    intercept: mean_y - slope * mean_x,
                }
            }
        }
    }

    /// Predicted `y` for `x`. No bounds handling; callers clamp and round.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_fit_exact_line() {
        // y = 2x + 1 recovered exactly.
        let points: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 2.0 * i as f64 + 1.0)).collect();
        let model = LinearModel::fit(&points);
        assert_close(model.slope(), 2.0);
        assert_close(model.intercept(), 1.0);
        assert_close(model.predict(100.0), 201.0);
    }

    #[test]
    fn test_fit_noisy_points() {
        // Classic textbook sample; the least-squares line is known.
        let points = [
            (1.0, 2.0),
            (2.0, 4.0),
            (3.0, 5.0),
            (4.0, 4.0),
            (5.0, 6.0),
            (6.0, 7.0),
            (7.0, 8.0),
        ];
        let model = LinearModel::fit(&points);
        assert!((model.slope() - 0.892857).abs() < 1e-5);
        assert!((model.intercept() - 1.571428).abs() < 1e-5);
    }

    #[test]
    fn test_fit_empty_is_zero() {
        let model = LinearModel::fit(&[]);
        assert_eq!(model.slope(), 0.0);
        assert_eq!(model.intercept(), 0.0);
        assert_eq!(model.predict(123.0), 0.0);
    }

    #[test]
    fn test_fit_single_point_is_horizontal() {
        let model = LinearModel::fit(&[(3.0, 17.0)]);
        assert_eq!(model.slope(), 0.0);
        assert_eq!(model.intercept(), 17.0);
        assert_eq!(model.predict(-100.0), 17.0);
    }

    #[test]
    fn test_fit_zero_variance_uses_mean() {
        // All x equal: horizontal line through mean(y).
        let model = LinearModel::fit(&[(5.0, 1.0), (5.0, 2.0), (5.0, 6.0)]);
        assert_eq!(model.slope(), 0.0);
        assert_close(model.intercept(), 3.0);
    }

    #[test]
    fn test_constant_model() {
        let model = LinearModel::constant(42.0);
        assert_eq!(model.predict(0.0), 42.0);
        assert_eq!(model.predict(1e9), 42.0);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let points: Vec<(f64, f64)> = (0..100).map(|i| (i as f64, (i * 3) as f64)).collect();
        assert_eq!(LinearModel::fit(&points), LinearModel::fit(&points));
    }

    #[test]
    fn test_serde_roundtrip() {
        let original = LinearModel::fit(&[(0.0, 0.0), (1.0, 2.0), (2.0, 4.0)]);
        let serialized = serde_json::to_string(&original).unwrap();
        let deserialized: LinearModel = serde_json::from_str(&serialized).unwrap();
        assert_eq!(original, deserialized);
    }
}
