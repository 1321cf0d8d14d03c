//! Random draws shared by the drivers.
//!
//! Draws whose zero value would stall an update term never return zero, so
//! drivers need no special case for it.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::common::Bounds;

/// Uniform draw on (0, 1].
pub fn unit_nonzero<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // gen() is on [0, 1)
    1.0 - rng.gen::<f64>()
}

/// Standard normal draw, never exactly zero.
pub fn normal_nonzero<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let z: f64 = rng.sample(StandardNormal);
        if z != 0.0 {
            return z;
        }
    }
}

/// Uniform draw on (-1, 1), never exactly zero.
pub fn symmetric_nonzero<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let r: f64 = rng.gen_range(-1.0..1.0);
        if r != 0.0 {
            return r;
        }
    }
}

/// Uniform draw inside `bounds`.
pub fn within<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds) -> f64 {
    rng.gen_range(bounds.lower..=bounds.upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_draws_stay_in_domain() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = Bounds::new(-2.0, 3.0);
        for _ in 0..1000 {
            let u = unit_nonzero(&mut rng);
            assert!(u > 0.0 && u <= 1.0);
            let s = symmetric_nonzero(&mut rng);
            assert!(s > -1.0 && s < 1.0 && s != 0.0);
            assert!(normal_nonzero(&mut rng) != 0.0);
            assert!(bounds.contains(within(&mut rng, &bounds)));
        }
    }
}
