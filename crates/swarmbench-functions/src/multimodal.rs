//! Objectives with many regularly spaced local minima.

use ndarray::Array1;
use std::f64::consts::{E, PI};

/// Schwefel's function.
/// Global minimum: f(x) ~ 0 at x_i = 420.9687
/// Bounds: x_i in [-512, 512]
pub fn schwefel(x: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    418.9829 * n - x.iter().map(|&xi| xi * xi.abs().sqrt().sin()).sum::<f64>()
}

/// Rastrigin's function.
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
pub fn rastrigin(x: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    10.0 * n
        + x.iter()
            .map(|&xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

/// Griewank's function.
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
pub fn griewank(x: &Array1<f64>) -> f64 {
    let sum: f64 = x.iter().map(|&xi| xi * xi / 4000.0).sum();
    let product: f64 = x
        .iter()
        .enumerate()
        .map(|(i, &xi)| (xi / (i as f64 + 1.0).sqrt()).cos())
        .product();
    1.0 + sum - product
}

/// Ackley's first function over consecutive pairs.
/// Minimum depends on dimension; negative for D >= 2
pub fn ackley_one(x: &Array1<f64>) -> f64 {
    let scale = (-0.2f64).exp();
    crate::pairs(x)
        .map(|(a, b)| scale * (a * a + b * b).sqrt() + 3.0 * ((2.0 * a).cos() + (2.0 * b).sin()))
        .sum()
}

/// Ackley's second function over consecutive pairs.
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
pub fn ackley_two(x: &Array1<f64>) -> f64 {
    crate::pairs(x)
        .map(|(a, b)| {
            let radius = (0.5 * (a * a + b * b)).sqrt();
            let waves = 0.5 * ((2.0 * PI * a).cos() + (2.0 * PI * b).cos());
            20.0 + E - 20.0 * (-0.2 * radius).exp() - waves.exp()
        })
        .sum()
}

/// Michalewicz function with steepness m = 10.
/// Global minimum depends on dimension (-1.8013 for 2D, -9.66 for 10D)
/// Bounds: x_i in [0, pi]
pub fn michalewicz(x: &Array1<f64>) -> f64 {
    let m = 10.0;
    -x.iter()
        .enumerate()
        .map(|(i, &xi)| xi.sin() * ((i as f64 + 1.0) * xi * xi / PI).sin().powf(2.0 * m))
        .sum::<f64>()
}

/// Levy function.
/// Global minimum: f(x) = 0 at x = (1, ..., 1)
pub fn levy(x: &Array1<f64>) -> f64 {
    let w: Vec<f64> = x.iter().map(|&xi| 1.0 + (xi - 1.0) / 4.0).collect();
    let (first, last) = match (w.first(), w.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return 0.0,
    };

    let body: f64 = w[..w.len() - 1]
        .iter()
        .map(|&wi| (wi - 1.0).powi(2) * (1.0 + 10.0 * (PI * wi + 1.0).sin().powi(2)))
        .sum();

    (PI * first).sin().powi(2) + body + (last - 1.0).powi(2) * (1.0 + (2.0 * PI * last).sin().powi(2))
}

/// Alpine function (N.1).
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
pub fn alpine(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| (xi * xi.sin() + 0.1 * xi).abs()).sum()
}
