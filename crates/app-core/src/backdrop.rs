//! The contract every animated background satisfies toward the render boundary.

use crate::constants::Style;
use crate::error::ConfigError;
use crate::field::{FieldConfig, ParticleField};
use crate::variants::{DigitalStream, DoubleHelix, FloatingClusters, Starfield, Tunnel};
use std::fmt;
use std::str::FromStr;

/// A per-frame point/segment producer.
///
/// Buffers returned by [`positions`](Backdrop::positions) and
/// [`segments`](Backdrop::segments) are overwritten by the next
/// [`advance`](Backdrop::advance); consumers copy out before then.
pub trait Backdrop {
    /// Step the simulation by `dt` seconds.
    fn advance(&mut self, dt: f32);

    /// Flat `[x, y, z, ...]` point positions.
    fn positions(&self) -> &[f32];

    /// Flat `[ax, ay, az, bx, by, bz, ...]` line endpoints. May be empty.
    fn segments(&self) -> &[f32] {
        &[]
    }

    fn point_count(&self) -> usize {
        self.positions().len() / 3
    }

    /// Most segments [`segments`](Backdrop::segments) can ever hold.
    fn max_segments(&self) -> usize {
        0
    }

    fn style(&self) -> Style;
}

/// Which background to mount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Expanding connected network (landing hero).
    #[default]
    Network,
    /// Falling data rain.
    Stream,
    /// Floating wireframe cubes and octahedra.
    Clusters,
    /// Rotating double helix.
    Helix,
    /// Slowly turning star shell.
    Starfield,
    /// Rings flowing toward the camera.
    Tunnel,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Network,
        Variant::Stream,
        Variant::Clusters,
        Variant::Helix,
        Variant::Starfield,
        Variant::Tunnel,
    ];

    /// Construct the backdrop with default tunings and a seeded layout.
    pub fn build(self, seed: u64) -> Result<Box<dyn Backdrop>, ConfigError> {
        let backdrop: Box<dyn Backdrop> = match self {
            Variant::Network => Box::new(ParticleField::new(FieldConfig::default(), seed)?),
            Variant::Stream => Box::new(DigitalStream::new(seed)),
            Variant::Clusters => Box::new(FloatingClusters::new(seed)),
            Variant::Helix => Box::new(DoubleHelix::new()),
            Variant::Starfield => Box::new(Starfield::new(seed)),
            Variant::Tunnel => Box::new(Tunnel::new()),
        };
        log::info!(
            "[backdrop] {} points={} max_segments={}",
            self,
            backdrop.point_count(),
            backdrop.max_segments()
        );
        Ok(backdrop)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Network => "network",
            Variant::Stream => "stream",
            Variant::Clusters => "clusters",
            Variant::Helix => "helix",
            Variant::Starfield => "stars",
            Variant::Tunnel => "tunnel",
        };
        f.write_str(name)
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    /// Accepts the variant names and the page each one backs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "network" | "hero" | "home" => Ok(Variant::Network),
            "stream" | "work" => Ok(Variant::Stream),
            "clusters" | "services" => Ok(Variant::Clusters),
            "helix" | "about" => Ok(Variant::Helix),
            "stars" | "starfield" | "blog" => Ok(Variant::Starfield),
            "tunnel" | "process" => Ok(Variant::Tunnel),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}
