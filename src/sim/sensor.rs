//! Simulated 360° range sensor
//!
//! Casts one ray per angular sample around the rover's heading. Readings are
//! recomputed from scratch every tick; the sensor holds no history.

use std::num::NonZeroU32;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, cast_ray};
use super::state::Pose;
use crate::consts::{SENSOR_ANGLE_STEP_DEG, SENSOR_MAX_RANGE};
use crate::normalize_degrees;

/// One ray of a scan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Sample offset from heading (degrees, [0, 360))
    pub offset_deg: f32,
    /// Absolute cast angle (degrees, [0, 360))
    pub angle_deg: f32,
    pub distance: f32,
    /// Hit point, or the max-range endpoint
    pub point: Vec2,
}

/// How close a reading is relative to the avoidance threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeBand {
    /// Closer than half the threshold
    Danger,
    /// Inside the threshold
    Caution,
    Clear,
}

impl SensorReading {
    pub fn proximity(&self, threshold: f32) -> RangeBand {
        if self.distance < threshold / 2.0 {
            RangeBand::Danger
        } else if self.distance < threshold {
            RangeBand::Caution
        } else {
            RangeBand::Clear
        }
    }

    /// True when the ray stopped on an obstacle rather than at max range
    pub fn is_hit(&self, max_range: f32) -> bool {
        self.distance < max_range
    }
}

const DEFAULT_ANGLE_STEP: NonZeroU32 = NonZeroU32::new(SENSOR_ANGLE_STEP_DEG).unwrap();

/// Fixed-step LiDAR analog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSensor {
    angle_step_deg: NonZeroU32,
    max_range: f32,
}

impl Default for RangeSensor {
    fn default() -> Self {
        Self {
            angle_step_deg: DEFAULT_ANGLE_STEP,
            max_range: SENSOR_MAX_RANGE,
        }
    }
}

impl RangeSensor {
    pub fn new(angle_step_deg: NonZeroU32, max_range: f32) -> Self {
        Self {
            angle_step_deg,
            max_range,
        }
    }

    pub fn angle_step_deg(&self) -> u32 {
        self.angle_step_deg.get()
    }

    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    /// Sample offsets `0, S, 2S, ...` below 360
    pub fn sample_offsets(&self) -> impl Iterator<Item = u32> {
        (0..360).step_by(self.angle_step_deg.get() as usize)
    }

    /// Number of rays per scan
    pub fn sample_count(&self) -> usize {
        self.sample_offsets().count()
    }

    /// Cast every ray from the given pose
    pub fn scan(&self, pose: &Pose, obstacles: &[Rect]) -> Vec<SensorReading> {
        self.sample_offsets()
            .map(|offset| {
                let offset_deg = offset as f32;
                let angle_deg = normalize_degrees(pose.heading_deg + offset_deg);
                let hit = cast_ray(pose.position, angle_deg, self.max_range, obstacles);
                SensorReading {
                    offset_deg,
                    angle_deg,
                    distance: hit.distance,
                    point: hit.point,
                }
            })
            .collect()
    }
}
