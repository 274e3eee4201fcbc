//! Random placement helpers used when seeding particle layouts.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Unit vector uniformly distributed on the sphere (inverse-CDF on the polar angle).
#[inline]
pub fn sample_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

/// Point uniformly distributed over the volume of a ball.
///
/// The cube root on the radius compensates for shell volume growing with r².
#[inline]
pub fn sample_in_ball<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let r = radius * rng.gen::<f32>().cbrt();
    sample_direction(rng) * r
}

/// Point uniformly distributed in an axis-aligned box centered on the origin.
#[inline]
pub fn sample_in_box<R: Rng + ?Sized>(rng: &mut R, extent: Vec3) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * extent.x,
        (rng.gen::<f32>() - 0.5) * extent.y,
        (rng.gen::<f32>() - 0.5) * extent.z,
    )
}

/// Vector with each component uniform in `[-half, half]`.
#[inline]
pub fn sample_symmetric<R: Rng + ?Sized>(rng: &mut R, half: f32) -> Vec3 {
    sample_in_box(rng, Vec3::splat(2.0 * half))
}

/// Point in a spherical shell `[inner, inner + depth]`, denser toward the inside.
#[inline]
pub fn sample_shell<R: Rng + ?Sized>(rng: &mut R, inner: f32, depth: f32) -> Vec3 {
    let r = inner + depth * rng.gen::<f32>();
    sample_direction(rng) * r
}
