//! Deterministic simulation module
//!
//! All rover logic lives here. This module must stay pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only (layout generation)
//! - Obstacles immutable after construction
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod layout;
pub mod policy;
pub mod sensor;
pub mod state;
pub mod tick;

pub use collision::{first_collision, footprint, is_colliding};
pub use geometry::{Rect, RayHit, cast_ray, polygon_overlaps_rect};
pub use layout::{LayoutParams, random_obstacles, reference_obstacles};
pub use policy::{
    Action, AvoidancePolicy, AvoidanceState, Decision, Sector, SectorDistances, TurnDirection,
};
pub use sensor::{RangeBand, RangeSensor, SensorReading};
pub use state::{Arena, Pose, Simulation, World};
pub use tick::{FrameResult, MotionOutcome, tick};
