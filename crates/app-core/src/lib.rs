pub mod backdrop;
pub mod camera;
pub mod clock;
pub mod connections;
pub mod constants;
pub mod error;
pub mod field;
#[cfg(feature = "gpu")]
pub mod render;
pub mod sampling;
pub mod scene;
pub mod variants;

pub use backdrop::{Backdrop, Variant};
pub use camera::{CameraPose, CameraRig, Projection, RigConfig, Smoothing};
pub use connections::{ConnectionSegment, SegmentBuffer};
pub use error::ConfigError;
pub use field::{FieldConfig, Particle, ParticleField, Phase};
#[cfg(feature = "gpu")]
pub use render::{NetRenderer, NET_WGSL};
pub use scene::{FrameSnapshot, HostInput, RenderBridge, Scene};
pub use variants::{ClusterShape, DigitalStream, DoubleHelix, FloatingClusters, Starfield, Tunnel};
