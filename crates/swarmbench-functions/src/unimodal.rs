//! Single-basin objectives.

use ndarray::Array1;

/// De Jong's first function (sphere).
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
pub fn de_jong(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| xi * xi).sum()
}

/// Rosenbrock's valley.
/// Global minimum: f(x) = 0 at x = (1, ..., 1)
pub fn rosenbrock(x: &Array1<f64>) -> f64 {
    crate::pairs(x)
        .map(|(a, b)| 100.0 * (b - a * a).powi(2) + (1.0 - a).powi(2))
        .sum()
}

/// Quartic function, each term weighted by its 1-based index.
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
pub fn quartic(x: &Array1<f64>) -> f64 {
    x.iter()
        .enumerate()
        .map(|(i, &xi)| (i as f64 + 1.0) * xi.powi(4))
        .sum()
}

/// Step function: plateaus of width one around every integer.
/// Global minimum: f(x) = 0 for every |x_i| < 0.5
pub fn step(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| (xi.abs() + 0.5).floor().powi(2)).sum()
}
