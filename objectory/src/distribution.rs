//! Sample-shaping distributions.
//!
//! A [`Distribution`] reshapes one uniform draw from the factory's random
//! source into a sample in `[0, 1)`. Every bounded generator in the crate
//! is fed by exactly one of these samples, so swapping the distribution
//! changes the shape of everything downstream.

use rand::Rng;

/// Clamp ceiling strictly below 1.0; keeps every shaped sample inside
/// the half-open unit interval.
const ONE_EXCLUSIVE: f64 = 1.0 - f64::EPSILON;

/// Strategy shaping a uniform random draw into a sample in `[0, 1)`
///
/// Implementations are stateless; the only observable effect of
/// [`Distribution::sample`] is advancing the random source.
pub trait Distribution: Send + Sync {
    /// Draw a shaped sample in `[0, 1)` from the given random source
    fn sample(&self, rng: &mut dyn rand::RngCore) -> f64;
}

/// Unshaped uniform samples over `[0, 1)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl Distribution for Uniform {
    fn sample(&self, rng: &mut dyn rand::RngCore) -> f64 {
        rng.r#gen::<f64>()
    }
}

/// Bell-shaped samples centred on 0.5, derived from a standard normal
/// draw and clamped into `[0, 1)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Gaussian;

impl Distribution for Gaussian {
    fn sample(&self, rng: &mut dyn rand::RngCore) -> f64 {
        (0.5 + standard_normal(rng) / 6.0).clamp(0.0, ONE_EXCLUSIVE)
    }
}

/// Gaussian-derived skew concentrating mass near 0
#[derive(Debug, Clone, Copy, Default)]
pub struct SkewLow;

impl Distribution for SkewLow {
    fn sample(&self, rng: &mut dyn rand::RngCore) -> f64 {
        (standard_normal(rng).abs() / 3.0).clamp(0.0, ONE_EXCLUSIVE)
    }
}

/// Gaussian-derived skew concentrating mass near 1
#[derive(Debug, Clone, Copy, Default)]
pub struct SkewHigh;

impl Distribution for SkewHigh {
    fn sample(&self, rng: &mut dyn rand::RngCore) -> f64 {
        (1.0 - standard_normal(rng).abs() / 3.0).clamp(0.0, ONE_EXCLUSIVE)
    }
}

/// Standard normal draw via the Box-Muller transform
fn standard_normal(rng: &mut dyn rand::RngCore) -> f64 {
    loop {
        let u1: f64 = rng.r#gen();
        // ln(0) is -inf; redraw the degenerate sample
        if u1 > f64::EPSILON {
            let u2: f64 = rng.r#gen();
            return (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        }
    }
}
