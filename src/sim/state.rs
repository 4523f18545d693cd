//! World and rover state
//!
//! [`Simulation`] is the single owner of everything that changes between
//! ticks (pose, avoidance state, tick counter). Obstacles live in an
//! immutable [`World`] inside it.

use std::num::NonZeroU32;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::layout;
use super::policy::{AvoidancePolicy, AvoidanceState};
use super::sensor::RangeSensor;
use super::tick::FrameResult;
use crate::consts::{
    ARENA_HEIGHT, ARENA_WIDTH, BODY_SIZE, RECOVERY_TURN_DEG, START_HEADING_DEG, START_X, START_Y,
};
use crate::error::ConfigError;
use crate::settings::{SimConfig, Tunables};
use crate::{heading_vector, normalize_degrees};

/// Rover position and heading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    /// Degrees, always in [0, 360)
    pub heading_deg: f32,
}

impl Pose {
    pub fn new(position: Vec2, heading_deg: f32) -> Self {
        Self {
            position,
            heading_deg: normalize_degrees(heading_deg),
        }
    }

    /// Same heading, moved `distance` along it
    pub fn advanced(&self, distance: f32) -> Self {
        Self {
            position: self.position + heading_vector(self.heading_deg) * distance,
            heading_deg: self.heading_deg,
        }
    }

    /// Same position, heading rotated by `delta_deg`
    pub fn rotated(&self, delta_deg: f32) -> Self {
        Self::new(self.position, self.heading_deg + delta_deg)
    }
}

/// Toroidal arena bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Hard-snap wraparound: below 0 lands on the far edge, past the far
    /// edge lands on 0. Values in `[0, dim]` are left alone.
    pub fn wrap(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            wrap_axis(position.x, self.width),
            wrap_axis(position.y, self.height),
        )
    }

    pub fn contains(&self, position: Vec2) -> bool {
        (0.0..=self.width).contains(&position.x) && (0.0..=self.height).contains(&position.y)
    }
}

#[inline]
fn wrap_axis(value: f32, dim: f32) -> f32 {
    if value < 0.0 {
        dim
    } else if value > dim {
        0.0
    } else {
        value
    }
}

/// Arena plus its fixed obstacle set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub arena: Arena,
    obstacles: Vec<Rect>,
}

impl World {
    pub fn new(arena: Arena, obstacles: Vec<Rect>) -> Self {
        Self { arena, obstacles }
    }

    /// The reference layout: three rectangles in an 800x600 arena
    pub fn reference() -> Self {
        Self::new(
            Arena::new(ARENA_WIDTH, ARENA_HEIGHT),
            layout::reference_obstacles(),
        )
    }

    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }
}

/// Simulation context: world, sensor, policy and the rover's mutable state
#[derive(Debug, Clone)]
pub struct Simulation {
    pub world: World,
    pub sensor: RangeSensor,
    pub policy: AvoidancePolicy,
    /// Footprint size used for collision checks
    pub body_size: f32,
    /// Heading nudge applied when a forward move is blocked
    pub recovery_turn_deg: f32,
    /// Current pose
    pub pose: Pose,
    /// Current avoidance automaton state
    pub avoidance: AvoidanceState,
    /// Ticks simulated so far
    pub ticks: u64,
}

impl Simulation {
    /// Build a simulation from a validated config and a world
    pub fn new(config: &SimConfig, world: World) -> Result<Self, ConfigError> {
        config.validate()?;

        let angle_step = NonZeroU32::new(config.sensor_angle_step_deg)
            .ok_or(ConfigError::InvalidAngleStep(config.sensor_angle_step_deg))?;
        let turn_frames =
            NonZeroU32::new(config.avoid_turn_frames).ok_or(ConfigError::ZeroTurnFrames)?;

        log::info!(
            "Simulation: arena {}x{}, {} obstacles, {} rays @ {}° to {}",
            world.arena.width,
            world.arena.height,
            world.obstacles().len(),
            360 / config.sensor_angle_step_deg,
            config.sensor_angle_step_deg,
            config.sensor_max_range
        );

        Ok(Self {
            world,
            sensor: RangeSensor::new(angle_step, config.sensor_max_range),
            policy: AvoidancePolicy::new(turn_frames),
            body_size: config.body_size,
            recovery_turn_deg: config.recovery_turn_deg,
            pose: Pose::new(
                Vec2::new(config.start_x, config.start_y),
                config.start_heading_deg,
            ),
            avoidance: AvoidanceState::Idle,
            ticks: 0,
        })
    }

    /// Default config in the reference world
    pub fn reference() -> Self {
        Self {
            world: World::reference(),
            sensor: RangeSensor::default(),
            policy: AvoidancePolicy::default(),
            body_size: BODY_SIZE,
            recovery_turn_deg: RECOVERY_TURN_DEG,
            pose: Pose::new(Vec2::new(START_X, START_Y), START_HEADING_DEG),
            avoidance: AvoidanceState::Idle,
            ticks: 0,
        }
    }

    /// Advance one tick (see [`super::tick::tick`])
    pub fn tick(&mut self, tunables: &Tunables) -> FrameResult {
        super::tick::tick(self, tunables)
    }
}
