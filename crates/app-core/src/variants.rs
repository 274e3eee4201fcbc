//! Simpler backgrounds sharing the [`Backdrop`] contract with the network.
//!
//! Each one moves its points with a closed-form rule, so none of them keeps
//! velocities or searches for neighbours.

use crate::backdrop::Backdrop;
use crate::clock::{clamp_tick_dt, SimulationClock};
use crate::constants::*;
use crate::sampling::{sample_in_box, sample_shell};
use glam::{EulerRot, Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Columns of points falling at individual speeds, wrapping bottom to top.
pub struct DigitalStream {
    positions: Vec<Vec3>,
    speeds: Vec<f32>, // world units per second
    half_height: f32,
}

impl DigitalStream {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let extent = Vec3::from(STREAM_EXTENT);
        let positions = (0..STREAM_COUNT)
            .map(|_| sample_in_box(&mut rng, extent))
            .collect();
        // Speeds were tuned per frame at the reference rate.
        let speeds = (0..STREAM_COUNT)
            .map(|_| rng.gen_range(STREAM_SPEED_MIN..STREAM_SPEED_MAX) * REFERENCE_TICK_HZ)
            .collect();
        Self {
            positions,
            speeds,
            half_height: extent.y * 0.5,
        }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn half_height(&self) -> f32 {
        self.half_height
    }
}

impl Backdrop for DigitalStream {
    fn advance(&mut self, dt: f32) {
        let dt = clamp_tick_dt(dt);
        for (p, speed) in self.positions.iter_mut().zip(&self.speeds) {
            p.y -= speed * dt;
            if p.y < -self.half_height {
                p.y = self.half_height;
            }
        }
    }

    fn positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    fn style(&self) -> Style {
        STREAM_STYLE
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClusterShape {
    Cube,
    Octahedron,
}

const CUBE_CORNERS: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
];
const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

const OCTA_CORNERS: [Vec3; 6] = [
    Vec3::X,
    Vec3::NEG_X,
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::NEG_Z,
];
const OCTA_EDGES: [(usize, usize); 12] = [
    (0, 2), (0, 3), (0, 4), (0, 5),
    (1, 2), (1, 3), (1, 4), (1, 5),
    (4, 2), (4, 3), (5, 2), (5, 3),
];

/// Both shapes have twelve edges.
const EDGES_PER_SHAPE: usize = 12;

impl ClusterShape {
    fn edges(self) -> impl Iterator<Item = (Vec3, Vec3)> {
        let (corners, edges): (&'static [Vec3], &'static [(usize, usize)]) = match self {
            ClusterShape::Cube => (&CUBE_CORNERS, &CUBE_EDGES),
            ClusterShape::Octahedron => (&OCTA_CORNERS, &OCTA_EDGES),
        };
        edges.iter().map(move |&(a, b)| (corners[a], corners[b]))
    }
}

#[derive(Clone, Copy, Debug)]
struct Cluster {
    center: Vec3,
    scale: f32,
    shape: ClusterShape,
    phase: f32,
}

/// Small wireframe cubes and octahedra bobbing and rocking in place.
///
/// Line geometry only, like [`Tunnel`].
pub struct FloatingClusters {
    clusters: Vec<Cluster>,
    vertices: Vec<Vec3>,
    clock: SimulationClock,
}

impl FloatingClusters {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let extent = Vec3::from(CLUSTER_EXTENT);
        let clusters: Vec<Cluster> = (0..CLUSTER_COUNT)
            .map(|_| Cluster {
                center: sample_in_box(&mut rng, extent),
                scale: rng.gen_range(CLUSTER_SCALE_MIN..CLUSTER_SCALE_MAX),
                shape: if rng.gen_bool(0.5) {
                    ClusterShape::Cube
                } else {
                    ClusterShape::Octahedron
                },
                phase: rng.gen_range(0.0..TAU),
            })
            .collect();
        let mut field = Self {
            vertices: vec![Vec3::ZERO; clusters.len() * EDGES_PER_SHAPE * 2],
            clusters,
            clock: SimulationClock::new(),
        };
        field.place();
        field
    }

    pub fn shapes(&self) -> impl Iterator<Item = ClusterShape> + '_ {
        self.clusters.iter().map(|c| c.shape)
    }

    /// Rewrite every edge for the current clock time.
    fn place(&mut self) {
        let t = self.clock.elapsed() as f32;
        let mut out = self.vertices.chunks_exact_mut(2);
        for c in &self.clusters {
            let s = t * CLUSTER_FLOAT_SPEED / 4.0 + c.phase;
            let rot = Quat::from_euler(
                EulerRot::XYZ,
                s.cos() / 8.0 * CLUSTER_ROTATION_INTENSITY,
                s.sin() / 8.0 * CLUSTER_ROTATION_INTENSITY,
                s.sin() / 20.0 * CLUSTER_ROTATION_INTENSITY,
            );
            let origin = c.center + Vec3::Y * (s.sin() / 10.0 * CLUSTER_FLOAT_INTENSITY);
            for (a, b) in c.shape.edges() {
                if let Some(pair) = out.next() {
                    pair[0] = origin + rot * (a * c.scale);
                    pair[1] = origin + rot * (b * c.scale);
                }
            }
        }
    }
}

impl Backdrop for FloatingClusters {
    fn advance(&mut self, dt: f32) {
        self.clock.advance(clamp_tick_dt(dt));
        self.place();
    }

    fn positions(&self) -> &[f32] {
        &[]
    }

    fn segments(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    fn max_segments(&self) -> usize {
        self.vertices.len() / 2
    }

    fn style(&self) -> Style {
        CLUSTER_STYLE
    }
}

/// Two interleaved strands, slowly spinning with a wobbling tilt.
pub struct DoubleHelix {
    base: Vec<Vec3>,
    positions: Vec<Vec3>,
    clock: SimulationClock,
}

impl DoubleHelix {
    pub fn new() -> Self {
        let per_strand = HELIX_COUNT / 2;
        let strand = |phase: f32| {
            (0..per_strand).map(move |i| {
                let t = i as f32 / per_strand as f32;
                let angle = t * TAU * HELIX_TURNS + phase;
                Vec3::new(
                    angle.cos() * HELIX_RADIUS,
                    (t - 0.5) * HELIX_HEIGHT,
                    angle.sin() * HELIX_RADIUS,
                )
            })
        };
        let base: Vec<Vec3> = strand(0.0).chain(strand(PI)).collect();
        let mut helix = Self {
            positions: base.clone(),
            base,
            clock: SimulationClock::new(),
        };
        helix.apply_rotation();
        helix
    }

    /// Rotation at the current clock time: spin about Y, then tilt about Z.
    pub fn rotation(&self) -> Quat {
        let t = self.clock.elapsed() as f32;
        let tilt = PI / 12.0 + (t * 0.1).sin() * 0.05;
        Quat::from_rotation_y(t * HELIX_SPIN) * Quat::from_rotation_z(tilt)
    }

    fn apply_rotation(&mut self) {
        let rot = self.rotation();
        for (p, b) in self.positions.iter_mut().zip(&self.base) {
            *p = rot * *b;
        }
    }
}

impl Default for DoubleHelix {
    fn default() -> Self {
        Self::new()
    }
}

impl Backdrop for DoubleHelix {
    fn advance(&mut self, dt: f32) {
        self.clock.advance(clamp_tick_dt(dt));
        self.apply_rotation();
    }

    fn positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    fn style(&self) -> Style {
        HELIX_STYLE
    }
}

/// Distant points in a thick spherical shell, turning about Y.
pub struct Starfield {
    base: Vec<Vec3>,
    positions: Vec<Vec3>,
    clock: SimulationClock,
}

impl Starfield {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let base: Vec<Vec3> = (0..STAR_COUNT)
            .map(|_| sample_shell(&mut rng, STAR_RADIUS, STAR_DEPTH))
            .collect();
        Self {
            positions: base.clone(),
            base,
            clock: SimulationClock::new(),
        }
    }
}

impl Backdrop for Starfield {
    fn advance(&mut self, dt: f32) {
        self.clock.advance(clamp_tick_dt(dt));
        let rot = Quat::from_rotation_y(self.clock.elapsed() as f32 * STAR_SPIN);
        for (p, b) in self.positions.iter_mut().zip(&self.base) {
            *p = rot * *b;
        }
    }

    fn positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    fn style(&self) -> Style {
        STAR_STYLE
    }
}

/// Concentric rings and inner triangles drifting toward the camera.
///
/// Pure line geometry: no points are emitted.
pub struct Tunnel {
    base: Vec<Vec3>,
    vertices: Vec<Vec3>,
    clock: SimulationClock,
}

impl Tunnel {
    pub fn new() -> Self {
        let mut base = Vec::new();
        for ring in 0..TUNNEL_RINGS {
            let z = TUNNEL_START_Z - ring as f32 * TUNNEL_SPACING;
            let twist = ring as f32;
            push_polygon(&mut base, TUNNEL_OUTER_RADIUS, TUNNEL_RING_SIDES, twist, z);
            push_polygon(&mut base, TUNNEL_INNER_RADIUS, 3, -twist, z);
        }
        Self {
            vertices: base.clone(),
            base,
            clock: SimulationClock::new(),
        }
    }

    /// Current forward offset, wrapping every ring spacing.
    pub fn offset(&self) -> f32 {
        ((self.clock.elapsed() * TUNNEL_SPEED as f64) % TUNNEL_SPACING as f64) as f32
    }
}

impl Default for Tunnel {
    fn default() -> Self {
        Self::new()
    }
}

/// Closed regular polygon in the XY plane at depth `z`, as segment endpoint pairs.
fn push_polygon(out: &mut Vec<Vec3>, radius: f32, sides: usize, rotation: f32, z: f32) {
    let corner = |k: usize| {
        let a = rotation + k as f32 / sides as f32 * TAU;
        Vec3::new(a.cos() * radius, a.sin() * radius, z)
    };
    for k in 0..sides {
        out.push(corner(k));
        out.push(corner(k + 1));
    }
}

impl Backdrop for Tunnel {
    fn advance(&mut self, dt: f32) {
        self.clock.advance(clamp_tick_dt(dt));
        let shift = Vec3::Z * self.offset();
        for (v, b) in self.vertices.iter_mut().zip(&self.base) {
            *v = *b + shift;
        }
    }

    fn positions(&self) -> &[f32] {
        &[]
    }

    fn segments(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    fn max_segments(&self) -> usize {
        self.base.len() / 2
    }

    fn style(&self) -> Style {
        TUNNEL_STYLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_wraps_to_top() {
        let mut stream = DigitalStream::new(1);
        let half = stream.half_height();
        for _ in 0..2_000 {
            stream.advance(1.0 / 60.0);
            assert!(stream.points().iter().all(|p| p.y >= -half && p.y <= half));
        }
    }

    #[test]
    fn clusters_stay_rigid_while_floating() {
        let mut clusters = FloatingClusters::new(4);
        assert_eq!(clusters.point_count(), 0);
        assert_eq!(clusters.max_segments(), CLUSTER_COUNT * 12);
        assert_eq!(clusters.segments().len(), clusters.max_segments() * 6);

        let lengths = |c: &FloatingClusters| -> Vec<f32> {
            bytemuck::cast_slice::<f32, Vec3>(c.segments())
                .chunks_exact(2)
                .map(|pair| pair[0].distance(pair[1]))
                .collect()
        };
        let before = lengths(&clusters);
        let start = clusters.segments().to_vec();
        for _ in 0..90 {
            clusters.advance(1.0 / 60.0);
        }
        assert_ne!(clusters.segments(), start.as_slice());
        for (a, b) in before.iter().zip(lengths(&clusters)) {
            assert!((a - b).abs() < 1e-4);
            assert!(*a >= CLUSTER_SCALE_MIN - 1e-4);
            assert!(*a <= CLUSTER_SCALE_MAX * 2.0_f32.sqrt() + 1e-4);
        }

        // Centers sit in the box; shapes and the bob add at most a unit.
        let half = Vec3::from(CLUSTER_EXTENT) * 0.5 + Vec3::splat(CLUSTER_SCALE_MAX + 0.25);
        for v in bytemuck::cast_slice::<f32, Vec3>(clusters.segments()) {
            assert!(v.abs().cmple(half).all(), "{v:?} outside {half:?}");
        }
    }

    #[test]
    fn clusters_mix_both_shapes() {
        let clusters = FloatingClusters::new(12);
        let cubes = clusters.shapes().filter(|s| *s == ClusterShape::Cube).count();
        assert_eq!(clusters.shapes().count(), CLUSTER_COUNT);
        assert!(cubes > 0 && cubes < CLUSTER_COUNT);
    }

    #[test]
    fn helix_keeps_radius_about_its_axis() {
        let mut helix = DoubleHelix::new();
        helix.advance(0.5);
        let inv = helix.rotation().inverse();
        for p in bytemuck::cast_slice::<f32, Vec3>(helix.positions()) {
            let local = inv * *p;
            let r = (local.x * local.x + local.z * local.z).sqrt();
            assert!((r - HELIX_RADIUS).abs() < 1e-3);
        }
    }

    #[test]
    fn tunnel_emits_only_segments() {
        let mut tunnel = Tunnel::new();
        tunnel.advance(0.25);
        assert_eq!(tunnel.point_count(), 0);
        assert_eq!(tunnel.segments().len(), tunnel.max_segments() * 6);
        assert_eq!(tunnel.max_segments(), TUNNEL_RINGS * (TUNNEL_RING_SIDES + 3));
        assert_eq!(tunnel.max_segments(), 530);
        assert!(tunnel.offset() >= 0.0 && tunnel.offset() < TUNNEL_SPACING);
    }
}
