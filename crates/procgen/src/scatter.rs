//! Uniform placement inside the cubic world bounds.

use glam::Vec3;
use rand::Rng;

/// How the height (Y) of a scattered point is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightRule {
    /// Always this height (e.g. ground level).
    Fixed(f32),
    /// Uniform in `[-half_extent, half_extent]`, like X and Z.
    Random,
    /// Uniform in `[min, max]`.
    Band { min: f32, max: f32 },
}

/// Uniform point with X and Z in `[-half_extent, half_extent]` and Y per `height`.
pub fn random_point<R: Rng + ?Sized>(rng: &mut R, half_extent: f32, height: HeightRule) -> Vec3 {
    let half = half_extent.abs();
    let y = match height {
        HeightRule::Fixed(y) => y,
        HeightRule::Random => rng.gen_range(-half..=half),
        HeightRule::Band { min, max } if min < max => rng.gen_range(min..=max),
        HeightRule::Band { min, .. } => min,
    };
    Vec3::new(rng.gen_range(-half..=half), y, rng.gen_range(-half..=half))
}

/// Uniform angle in `[0, 2π)`.
pub fn random_phase<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() * std::f32::consts::TAU
}

/// Diagonal unit-ish direction with a random sign per axis, scaled to `speed` per axis.
pub fn random_diagonal<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Vec3 {
    let mut sign = || if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    Vec3::new(sign(), sign(), sign()) * speed
}
