//! Footprint collision checks
//!
//! The rover's body is a triangle: a nose at `size` along the heading and two
//! rear corners at `size` along heading ± [`FOOTPRINT_REAR_SPREAD`] radians.
//! Candidate poses are rejected when that triangle overlaps the interior of
//! any obstacle.

use glam::Vec2;

use super::geometry::{Rect, polygon_overlaps_rect};
use super::state::Pose;
use crate::consts::FOOTPRINT_REAR_SPREAD;

/// Triangle vertices `[front, left, right]` for a body at `position`
pub fn footprint(position: Vec2, heading_deg: f32, size: f32) -> [Vec2; 3] {
    let rad = heading_deg.to_radians();
    let at = |theta: f32| position + Vec2::new(theta.cos(), theta.sin()) * size;
    [
        at(rad),
        at(rad + FOOTPRINT_REAR_SPREAD),
        at(rad - FOOTPRINT_REAR_SPREAD),
    ]
}

/// Index of the first obstacle the footprint overlaps, if any
pub fn first_collision(pose: &Pose, size: f32, obstacles: &[Rect]) -> Option<usize> {
    let body = footprint(pose.position, pose.heading_deg, size);
    obstacles
        .iter()
        .position(|obs| polygon_overlaps_rect(&body, obs))
}

/// Whether a body at `pose` would overlap any obstacle
pub fn is_colliding(pose: &Pose, size: f32, obstacles: &[Rect]) -> bool {
    first_collision(pose, size, obstacles).is_some()
}
