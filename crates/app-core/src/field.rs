//! The connected-network particle field.
//!
//! Particles start collapsed around the origin, ease out to targets spread
//! through a ball during the awakening phase, then drift freely with per-axis
//! reflection at the world bound. Every tick past a short activation delay the
//! field links each pair of particles closer than the connect distance.

use crate::backdrop::Backdrop;
use crate::clock::{clamp_tick_dt, SimulationClock};
use crate::connections::{max_pairs, ConnectionSegment, SegmentBuffer};
use crate::constants::*;
use crate::error::{non_negative, ConfigError};
use crate::sampling::{sample_in_ball, sample_symmetric};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Construction-time tunables of a [`ParticleField`].
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub count: usize,
    pub world_radius: f32,
    pub connect_distance: f32,
    pub awakening_duration: f32,
    pub drift_speed: f32,
    pub world_bound: f32,
    pub dormant_radius: f32,
    pub awakening_rate: f32,
    pub connect_delay: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            world_radius: WORLD_RADIUS,
            connect_distance: CONNECT_DISTANCE,
            awakening_duration: AWAKENING_DURATION,
            drift_speed: DRIFT_SPEED,
            world_bound: WORLD_BOUND,
            dormant_radius: DORMANT_RADIUS,
            awakening_rate: AWAKENING_RATE,
            connect_delay: CONNECT_ACTIVATION_DELAY,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::EmptyField);
        }
        non_negative("world_radius", self.world_radius)?;
        non_negative("connect_distance", self.connect_distance)?;
        non_negative("awakening_duration", self.awakening_duration)?;
        non_negative("drift_speed", self.drift_speed)?;
        non_negative("world_bound", self.world_bound)?;
        non_negative("dormant_radius", self.dormant_radius)?;
        non_negative("awakening_rate", self.awakening_rate)?;
        non_negative("connect_delay", self.connect_delay)?;
        Ok(())
    }
}

/// Kinematic state of one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Where the particle settles during awakening. Never changes.
    pub target: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Awakening,
    Steady,
}

impl Phase {
    #[inline]
    fn at(elapsed: f64, awakening_duration: f32) -> Self {
        if elapsed < awakening_duration as f64 {
            Phase::Awakening
        } else {
            Phase::Steady
        }
    }
}

pub struct ParticleField {
    config: FieldConfig,
    // Struct-of-arrays so positions can be handed to the renderer as one slice.
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    targets: Vec<Vec3>,
    segments: SegmentBuffer,
    clock: SimulationClock,
    phase: Phase,
}

impl ParticleField {
    /// Seeded field: identical seeds and tick sequences give identical buffers.
    pub fn new(config: FieldConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::with_rng(config, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(config: FieldConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let particles = (0..config.count)
            .map(|_| Particle {
                position: sample_in_ball(rng, config.dormant_radius),
                velocity: sample_symmetric(rng, config.drift_speed),
                target: sample_in_ball(rng, config.world_radius),
            })
            .collect();
        let field = Self::assemble(config, particles);
        log::info!(
            "[field] particles={} connect={:.2} awakening={:.2}s",
            field.config.count,
            field.config.connect_distance,
            field.config.awakening_duration
        );
        Ok(field)
    }

    /// Field from explicit particle state. `config.count` is taken from
    /// `particles.len()`.
    pub fn from_particles(
        mut config: FieldConfig,
        particles: Vec<Particle>,
    ) -> Result<Self, ConfigError> {
        config.count = particles.len();
        config.validate()?;
        Ok(Self::assemble(config, particles))
    }

    fn assemble(config: FieldConfig, particles: Vec<Particle>) -> Self {
        let phase = Phase::at(0.0, config.awakening_duration);
        Self {
            segments: SegmentBuffer::for_particles(particles.len()),
            positions: particles.iter().map(|p| p.position).collect(),
            velocities: particles.iter().map(|p| p.velocity).collect(),
            targets: particles.iter().map(|p| p.target).collect(),
            clock: SimulationClock::new(),
            phase,
            config,
        }
    }

    /// Advance one render tick of `dt` seconds (clamped) and rebuild the
    /// connection list.
    pub fn advance(&mut self, dt: f32) {
        let dt = clamp_tick_dt(dt);
        self.clock.advance(dt);

        let phase = Phase::at(self.clock.elapsed(), self.config.awakening_duration);
        if phase != self.phase {
            log::debug!(
                "[field] awakening complete at t={:.3}s",
                self.clock.elapsed()
            );
            self.phase = phase;
        }

        match self.phase {
            Phase::Awakening => {
                let alpha = 1.0 - (-self.config.awakening_rate * dt).exp();
                for (p, t) in self.positions.iter_mut().zip(&self.targets) {
                    *p = p.lerp(*t, alpha);
                }
            }
            Phase::Steady => {
                let bound = self.config.world_bound;
                for (p, v) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
                    *p += *v * dt;
                    reflect(*p, v, bound);
                }
            }
        }

        if self.clock.elapsed() > self.config.connect_delay as f64 {
            self.segments
                .rebuild(&self.positions, self.config.connect_distance);
        } else {
            self.segments.clear();
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Current positions, one per particle.
    pub fn points(&self) -> &[Vec3] {
        &self.positions
    }

    /// Current positions as `3·N` floats.
    pub fn positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// This tick's connection endpoints as `6·k` floats.
    pub fn segments(&self) -> &[f32] {
        self.segments.as_floats()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn max_segments(&self) -> usize {
        max_pairs(self.positions.len())
    }

    pub fn connections(&self) -> impl Iterator<Item = ConnectionSegment> + '_ {
        self.segments.iter()
    }

    pub fn particle(&self, index: usize) -> Option<Particle> {
        Some(Particle {
            position: *self.positions.get(index)?,
            velocity: *self.velocities.get(index)?,
            target: *self.targets.get(index)?,
        })
    }

    /// Mean distance of all particles from the origin.
    pub fn mean_radius(&self) -> f32 {
        let sum: f32 = self.positions.iter().map(|p| p.length()).sum();
        sum / self.positions.len().max(1) as f32
    }
}

/// Flip each velocity component that is carrying its particle further past
/// `bound`. A particle already heading back in is left alone, so a crossing
/// flips exactly once however long it takes to re-enter.
#[inline]
fn reflect(position: Vec3, velocity: &mut Vec3, bound: f32) {
    for axis in 0..3 {
        let (p, v) = (position[axis], velocity[axis]);
        if (p > bound && v > 0.0) || (p < -bound && v < 0.0) {
            velocity[axis] = -v;
        }
    }
}

impl Backdrop for ParticleField {
    fn advance(&mut self, dt: f32) {
        ParticleField::advance(self, dt);
    }

    fn positions(&self) -> &[f32] {
        ParticleField::positions(self)
    }

    fn segments(&self) -> &[f32] {
        ParticleField::segments(self)
    }

    fn point_count(&self) -> usize {
        self.len()
    }

    fn max_segments(&self) -> usize {
        ParticleField::max_segments(self)
    }

    fn style(&self) -> Style {
        NETWORK_STYLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_only_outward_components() {
        let mut v = Vec3::new(1.0, -1.0, 1.0);
        reflect(Vec3::new(21.0, -21.0, 5.0), &mut v, 20.0);
        assert_eq!(v, Vec3::new(-1.0, 1.0, 1.0));

        // Already heading back in: untouched.
        reflect(Vec3::new(21.0, -21.0, 5.0), &mut v, 20.0);
        assert_eq!(v, Vec3::new(-1.0, 1.0, 1.0));
    }

    #[test]
    fn phase_boundary_is_exclusive() {
        assert_eq!(Phase::at(2.49, 2.5), Phase::Awakening);
        assert_eq!(Phase::at(2.5, 2.5), Phase::Steady);
        assert_eq!(Phase::at(0.0, 0.0), Phase::Steady);
    }
}
