//! Objectives built from consecutive coordinate pairs `(x_i, x_{i+1})`.
//!
//! Every function here sums one term per pair, so a one-dimensional input
//! evaluates to 0.

use ndarray::Array1;

use crate::pairs;

/// Sine envelope sine wave.
/// Minimum: -(0.5 + sin^2(0.5)) per pair at the origin
pub fn sine_envelope_sine_wave(x: &Array1<f64>) -> f64 {
    -pairs(x)
        .map(|(a, b)| {
            let r2 = a * a + b * b;
            0.5 + (r2 - 0.5).sin().powi(2) / (1.0 + 0.001 * r2).powi(2)
        })
        .sum::<f64>()
}

/// Stretched V sine wave.
/// Global minimum: 1 per pair at the origin
pub fn stretched_v_sine_wave(x: &Array1<f64>) -> f64 {
    pairs(x)
        .map(|(a, b)| {
            let r2 = a * a + b * b;
            r2.powf(0.25) * (50.0 * r2.powf(0.1)).sin().powi(2) + 1.0
        })
        .sum()
}

/// Egg holder function.
/// Global minimum (2D): f(512, 404.2319) = -959.6407
pub fn egg_holder(x: &Array1<f64>) -> f64 {
    pairs(x)
        .map(|(a, b)| {
            -a * (a - b - 47.0).abs().sqrt().sin() - (b + 47.0) * (b + 47.0 + 0.5 * a).abs().sqrt().sin()
        })
        .sum()
}

/// Rana's function.
pub fn rana(x: &Array1<f64>) -> f64 {
    pairs(x)
        .map(|(a, b)| {
            let minus = (b - a + 1.0).abs().sqrt();
            let plus = (b + a + 1.0).abs().sqrt();
            a * minus.sin() * plus.cos() + (b + 1.0) * minus.cos() * plus.sin()
        })
        .sum()
}

/// Pathological function.
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
pub fn pathological(x: &Array1<f64>) -> f64 {
    pairs(x)
        .map(|(a, b)| {
            let numerator = (100.0 * a * a + b * b).sqrt().sin().powi(2) - 0.5;
            let denominator = 1.0 + 0.001 * (a * a - 2.0 * a * b + b * b).powi(2);
            0.5 + numerator / denominator
        })
        .sum()
}

/// Masters' cosine wave.
/// Global minimum: -1 per pair at the origin
pub fn masters_cosine_wave(x: &Array1<f64>) -> f64 {
    -pairs(x)
        .map(|(a, b)| {
            let q = a * a + b * b + 0.5 * a * b;
            (-q / 8.0).exp() * (4.0 * q.sqrt()).cos()
        })
        .sum::<f64>()
}
