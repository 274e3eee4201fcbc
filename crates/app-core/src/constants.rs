use glam::Vec2;

// Shared simulation/visual tuning constants used by both web and native frontends.

// Connected network
pub const PARTICLE_COUNT: usize = 100;
pub const CONNECT_DISTANCE: f32 = 4.5; // world units between linked particles
pub const AWAKENING_DURATION: f32 = 2.5; // seconds spent expanding from the dormant cluster
pub const DRIFT_SPEED: f32 = 0.1; // max |velocity component| in world units per second
pub const WORLD_RADIUS: f32 = 15.0; // radius of the ball targets are sampled from
pub const WORLD_BOUND: f32 = 20.0; // per-axis reflection bound during steady drift
pub const DORMANT_RADIUS: f32 = 0.05; // initial cluster radius around the origin
pub const AWAKENING_RATE: f32 = 2.0; // exponential easing rate toward targets (1/s)
pub const CONNECT_ACTIVATION_DELAY: f32 = 0.5; // no connection lines before this many seconds

// Frame timing
pub const MAX_TICK_DT: f32 = 1.0 / 15.0; // clamp for tab-resume spikes
pub const REFERENCE_TICK_HZ: f32 = 60.0; // refresh rate the per-tick tunings were authored at

// Camera rig
pub const BASE_Z: f32 = 18.0;
pub const ZOOM_RANGE: f32 = 5.0; // how much closer the camera gets at full scroll
pub const PAN_RANGE: f32 = 2.0; // how much lower the camera gets at full scroll
pub const MAX_SCROLL_PROGRESS: f32 = 2.0; // in viewport heights
pub const POINTER_SCALE: f32 = 2.0; // normalized pointer [-1, 1] -> parallax [-2, 2]
pub const PARALLAX: Vec2 = Vec2::new(1.0, 0.5); // per-axis parallax weights
pub const SMOOTHING_PER_TICK: f32 = 0.05;
pub const TILT_FACTOR: f32 = 0.05; // roll radians per unit of horizontal parallax
pub const CAMERA_FOV_DEG: f32 = 35.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;

// Background variants
pub const STREAM_COUNT: usize = 1200;
pub const STREAM_EXTENT: [f32; 3] = [35.0, 40.0, 25.0]; // width, height, depth
pub const STREAM_SPEED_MIN: f32 = 0.05; // world units per reference tick
pub const STREAM_SPEED_MAX: f32 = 0.2;

pub const CLUSTER_COUNT: usize = 15;
pub const CLUSTER_EXTENT: [f32; 3] = [15.0, 10.0, 10.0]; // width, height, depth
pub const CLUSTER_SCALE_MIN: f32 = 0.2;
pub const CLUSTER_SCALE_MAX: f32 = 0.7;
pub const CLUSTER_FLOAT_SPEED: f32 = 2.0;
pub const CLUSTER_ROTATION_INTENSITY: f32 = 1.0;
pub const CLUSTER_FLOAT_INTENSITY: f32 = 2.0; // peak lift is 0.1 of this

pub const HELIX_COUNT: usize = 400;
pub const HELIX_RADIUS: f32 = 3.5;
pub const HELIX_HEIGHT: f32 = 25.0;
pub const HELIX_TURNS: f32 = 4.0;
pub const HELIX_SPIN: f32 = 0.2; // rad/s about Y

pub const STAR_COUNT: usize = 3000;
pub const STAR_RADIUS: f32 = 50.0;
pub const STAR_DEPTH: f32 = 50.0;
pub const STAR_SPIN: f32 = 0.01; // rad/s about Y

pub const TUNNEL_RINGS: usize = 10;
pub const TUNNEL_SPACING: f32 = 4.0;
pub const TUNNEL_START_Z: f32 = -10.0;
pub const TUNNEL_OUTER_RADIUS: f32 = 4.0;
pub const TUNNEL_INNER_RADIUS: f32 = 2.0;
pub const TUNNEL_RING_SIDES: usize = 50;
pub const TUNNEL_SPEED: f32 = 3.0; // world units per second toward the camera

/// Per-variant presentation passed through to the render boundary.
///
/// Colors are sRGB with straight alpha, matching how they were authored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub point_color: [f32; 4],
    pub point_size: f32,
    pub line_color: [f32; 4],
    pub fog_color: [f32; 3],
    pub fog_near: f32,
    pub fog_far: f32,
}

const OBSIDIAN: [f32; 3] = [0.0196, 0.0196, 0.0196]; // #050505
const AMBER: [f32; 3] = [0.957, 0.706, 0.0]; // #F4B400
const VIOLET: [f32; 3] = [0.427, 0.369, 0.965]; // #6D5EF6
const LAVENDER: [f32; 3] = [0.557, 0.518, 0.969]; // #8E84F7

pub const NETWORK_STYLE: Style = Style {
    point_color: [AMBER[0], AMBER[1], AMBER[2], 0.8],
    point_size: 0.15,
    line_color: [VIOLET[0], VIOLET[1], VIOLET[2], 0.15],
    fog_color: OBSIDIAN,
    fog_near: 10.0,
    fog_far: 30.0,
};

pub const STREAM_STYLE: Style = Style {
    point_color: [LAVENDER[0], LAVENDER[1], LAVENDER[2], 0.4],
    point_size: 0.08,
    line_color: [0.0; 4],
    fog_color: OBSIDIAN,
    fog_near: 8.0,
    fog_far: 45.0,
};

pub const CLUSTER_STYLE: Style = Style {
    point_color: [0.0; 4],
    point_size: 0.0,
    line_color: [AMBER[0], AMBER[1], AMBER[2], 0.3],
    fog_color: OBSIDIAN,
    fog_near: 8.0,
    fog_far: 45.0,
};

pub const HELIX_STYLE: Style = Style {
    point_color: [AMBER[0], AMBER[1], AMBER[2], 0.3],
    point_size: 0.12,
    line_color: [0.0; 4],
    fog_color: OBSIDIAN,
    fog_near: 8.0,
    fog_far: 45.0,
};

pub const STAR_STYLE: Style = Style {
    point_color: [1.0, 1.0, 1.0, 0.7],
    point_size: 0.25,
    line_color: [0.0; 4],
    fog_color: OBSIDIAN,
    fog_near: 8.0,
    fog_far: 120.0,
};

pub const TUNNEL_STYLE: Style = Style {
    point_color: [0.0; 4],
    point_size: 0.0,
    line_color: [LAVENDER[0], LAVENDER[1], LAVENDER[2], 0.35],
    fog_color: OBSIDIAN,
    fog_near: 8.0,
    fog_far: 45.0,
};
