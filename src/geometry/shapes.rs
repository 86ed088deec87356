//! Parametric point-cloud generators.
//!
//! Each function fills a fresh `3 * count` buffer. Randomness comes only
//! from the caller's RNG so tests can seed it.

use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Base radius all shapes are scaled against
pub const RADIUS: f32 = 10.0;

/// Fraction of Saturn's points that form the planet body
const PLANET_SHARE: f32 = 0.7;
/// Ring plane tilt about the z axis
const RING_TILT: f32 = PI / 6.0;
/// Petal count of the flower rose curve
const PETALS: f32 = 5.0;

/// Uniform point on a sphere surface of radius `r`.
///
/// The polar angle comes from the inverse CDF `acos(2v - 1)` so points do
/// not bunch up at the poles.
pub fn random_sphere_point<R: Rng>(rng: &mut R, r: f32) -> Vec3 {
    let theta = TAU * rng.random::<f32>();
    let phi = (2.0 * rng.random::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(
        r * sin_phi * cos_theta,
        r * sin_phi * sin_theta,
        r * cos_phi,
    )
}

/// Uniform in [-0.5, 0.5)
#[inline]
pub(crate) fn centered<R: Rng>(rng: &mut R) -> f32 {
    rng.random::<f32>() - 0.5
}

fn collect<F>(count: usize, mut point: F) -> Vec<f32>
where
    F: FnMut() -> Vec3,
{
    let mut positions = Vec::with_capacity(count * 3);
    for _ in 0..count {
        positions.extend_from_slice(&point().to_array());
    }
    positions
}

/// Filled heart from the classic parametric heart curve
pub fn heart<R: Rng>(rng: &mut R, count: usize) -> Vec<f32> {
    collect(count, || {
        let t = rng.random::<f32>() * TAU;
        // sqrt spreads mass across the area instead of piling it at the centre
        let dist = rng.random::<f32>().sqrt() * RADIUS * 0.05;

        let x = 16.0 * t.sin().powi(3);
        let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
        let z = centered(rng) * 4.0;

        Vec3::new(x, y, z) * dist
    })
}

/// Planet body plus a thin tilted ring
pub fn saturn<R: Rng>(rng: &mut R, count: usize) -> Vec<f32> {
    let tilt = Quat::from_rotation_z(RING_TILT);
    collect(count, || {
        if rng.random::<f32>() < PLANET_SHARE {
            random_sphere_point(rng, RADIUS * 0.6)
        } else {
            let angle = rng.random::<f32>() * TAU;
            let dist = RADIUS * (1.2 + rng.random::<f32>() * 0.8);
            let ring = Vec3::new(angle.cos() * dist, centered(rng) * 0.5, angle.sin() * dist);
            tilt * ring
        }
    })
}

/// Five-petal rose curve with depth following the petal phase
pub fn flower<R: Rng>(rng: &mut R, count: usize) -> Vec<f32> {
    collect(count, || {
        let u = rng.random::<f32>() * TAU;
        let v = rng.random::<f32>();
        let r = (PETALS * u).sin() * RADIUS + RADIUS * 0.5;

        Vec3::new(
            r * v * u.cos(),
            r * v * u.sin(),
            (PETALS * u).cos() * 2.0 * (1.0 - v),
        )
    })
}

/// Small dense ball; the burst comes from the morph core at tick time
pub fn fireworks<R: Rng>(rng: &mut R, count: usize) -> Vec<f32> {
    collect(count, || random_sphere_point(rng, RADIUS * 0.1))
}

/// Fallback shape
pub fn sphere<R: Rng>(rng: &mut R, count: usize) -> Vec<f32> {
    collect(count, || random_sphere_point(rng, RADIUS))
}
