//! LiDAR Rover - A reactive rover in a toroidal obstacle arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ray casting, avoidance, collisions, world state)
//! - `settings`: Tunables and JSON-loadable simulation config
//! - `hud`: Status lines for whatever draws the frame
//! - `error`: Configuration errors

pub mod error;
pub mod hud;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{SimConfig, Tunables, TuningCommand};

use glam::Vec2;

/// Simulation constants (defaults reproduce the reference arena)
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// LiDAR defaults
    pub const SENSOR_ANGLE_STEP_DEG: u32 = 5;
    pub const SENSOR_MAX_RANGE: f32 = 150.0;

    /// Rover body (triangle "radius")
    pub const BODY_SIZE: f32 = 10.0;
    /// Angle between the nose and each rear corner of the footprint (radians)
    pub const FOOTPRINT_REAR_SPREAD: f32 = 2.5;

    /// Frames an avoidance turn stays committed once started
    pub const AVOID_TURN_FRAMES: u32 = 30;
    /// Heading nudge applied when a forward move is blocked (degrees)
    pub const RECOVERY_TURN_DEG: f32 = 20.0;

    /// Sector bounds, as sample offsets from heading (degrees, inclusive)
    pub const FRONT_HALF_WIDTH_DEG: f32 = 30.0;
    pub const LEFT_SECTOR_DEG: (f32, f32) = (60.0, 120.0);
    pub const RIGHT_SECTOR_DEG: (f32, f32) = (240.0, 300.0);

    /// Starting pose
    pub const START_X: f32 = 400.0;
    pub const START_Y: f32 = 300.0;
    pub const START_HEADING_DEG: f32 = 0.0;

    /// Tunable defaults
    pub const DEFAULT_SPEED: f32 = 2.0;
    pub const DEFAULT_TURN_RATE: f32 = 3.0;
    pub const DEFAULT_AVOIDANCE_THRESHOLD: f32 = 60.0;

    /// Tunable valid ranges (enforced by the input side, never by `tick`)
    pub const SPEED_RANGE: (f32, f32) = (0.0, 10.0);
    pub const TURN_RATE_RANGE: (f32, f32) = (0.1, 10.0);
    pub const THRESHOLD_RANGE: (f32, f32) = (10.0, 150.0);
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector pointing along a heading given in degrees
#[inline]
pub fn heading_vector(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}
