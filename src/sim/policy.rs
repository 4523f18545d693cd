//! Avoidance policy: sector reduction and the committed-turn automaton
//!
//! Each tick the scan is reduced to three sector minimums (front, left,
//! right) and fed, together with the current [`AvoidanceState`], into
//! [`AvoidancePolicy::decide`]. A turn, once started, runs for a fixed number
//! of frames no matter what the sensor sees. That hysteresis keeps the rover
//! from flapping around the threshold.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::sensor::SensorReading;
use crate::consts::{AVOID_TURN_FRAMES, FRONT_HALF_WIDTH_DEG, LEFT_SECTOR_DEG, RIGHT_SECTOR_DEG};
use crate::settings::Tunables;

/// Which way a committed turn rotates the heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnDirection {
    /// Heading increases
    Left,
    /// Heading decreases
    Right,
}

impl TurnDirection {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            TurnDirection::Left => 1.0,
            TurnDirection::Right => -1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TurnDirection::Left => "left",
            TurnDirection::Right => "right",
        }
    }
}

/// Cross-frame avoidance state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AvoidanceState {
    #[default]
    Idle,
    /// Committed turn with at least one frame left
    Turning {
        direction: TurnDirection,
        frames_remaining: NonZeroU32,
    },
}

impl AvoidanceState {
    pub fn is_turning(&self) -> bool {
        matches!(self, AvoidanceState::Turning { .. })
    }

    /// State after one more turning frame has been spent
    fn after_turn_frame(direction: TurnDirection, frames_remaining: NonZeroU32) -> Self {
        match NonZeroU32::new(frames_remaining.get() - 1) {
            Some(frames_remaining) => AvoidanceState::Turning {
                direction,
                frames_remaining,
            },
            None => AvoidanceState::Idle,
        }
    }
}

/// Angular band of sample offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sector {
    Front,
    Left,
    Right,
}

impl Sector {
    /// Whether a sample offset (degrees from heading, [0, 360)) falls in this sector
    pub fn contains(self, offset_deg: f32) -> bool {
        match self {
            Sector::Front => {
                offset_deg >= 360.0 - FRONT_HALF_WIDTH_DEG || offset_deg <= FRONT_HALF_WIDTH_DEG
            }
            Sector::Left => (LEFT_SECTOR_DEG.0..=LEFT_SECTOR_DEG.1).contains(&offset_deg),
            Sector::Right => (RIGHT_SECTOR_DEG.0..=RIGHT_SECTOR_DEG.1).contains(&offset_deg),
        }
    }

    /// Minimum distance among the readings in this sector
    ///
    /// A sector with no samples reports `f32::INFINITY`: an unsampled front
    /// never triggers avoidance, and an unsampled side always looks open.
    pub fn min_distance(self, readings: &[SensorReading]) -> f32 {
        let min = readings
            .iter()
            .filter(|r| self.contains(r.offset_deg))
            .map(|r| r.distance)
            .reduce(f32::min);

        match min {
            Some(d) => d,
            None => {
                log::warn!("{:?} sector has no samples; treating it as open", self);
                f32::INFINITY
            }
        }
    }
}

/// Per-sector minimum distances for one scan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorDistances {
    pub front: f32,
    pub left: f32,
    pub right: f32,
}

impl SectorDistances {
    pub fn from_readings(readings: &[SensorReading]) -> Self {
        Self {
            front: Sector::Front.min_distance(readings),
            left: Sector::Left.min_distance(readings),
            right: Sector::Right.min_distance(readings),
        }
    }

    /// Side with more clearance; ties go right
    pub fn clearer_side(&self) -> TurnDirection {
        if self.left > self.right {
            TurnDirection::Left
        } else {
            TurnDirection::Right
        }
    }
}

/// What the rover does this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Spend one committed-turn frame: rotate, then move along the new heading
    Turn(TurnDirection),
    /// Commit to a turn; no motion until next tick
    BeginTurn(TurnDirection),
    /// Normal forward move, gated by the collision validator
    Drive,
}

/// Policy output for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub next_state: AvoidanceState,
}

const DEFAULT_TURN_FRAMES: NonZeroU32 = NonZeroU32::new(AVOID_TURN_FRAMES).unwrap();

/// Reactive avoidance with a committed turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvoidancePolicy {
    /// Length of every committed turn
    pub turn_frames: NonZeroU32,
}

impl Default for AvoidancePolicy {
    fn default() -> Self {
        Self {
            turn_frames: DEFAULT_TURN_FRAMES,
        }
    }
}

impl AvoidancePolicy {
    pub fn new(turn_frames: NonZeroU32) -> Self {
        Self { turn_frames }
    }

    pub fn decide(
        &self,
        state: AvoidanceState,
        sectors: &SectorDistances,
        tunables: &Tunables,
    ) -> Decision {
        match state {
            AvoidanceState::Turning {
                direction,
                frames_remaining,
            } => Decision {
                action: Action::Turn(direction),
                next_state: AvoidanceState::after_turn_frame(direction, frames_remaining),
            },
            AvoidanceState::Idle if sectors.front < tunables.avoidance_threshold => {
                let direction = sectors.clearer_side();
                Decision {
                    action: Action::BeginTurn(direction),
                    next_state: AvoidanceState::Turning {
                        direction,
                        frames_remaining: self.turn_frames,
                    },
                }
            }
            AvoidanceState::Idle => Decision {
                action: Action::Drive,
                next_state: AvoidanceState::Idle,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn reading(offset_deg: f32, distance: f32) -> SensorReading {
        SensorReading {
            offset_deg,
            angle_deg: offset_deg,
            distance,
            point: Vec2::ZERO,
        }
    }

    fn sectors(front: f32, left: f32, right: f32) -> SectorDistances {
        SectorDistances { front, left, right }
    }

    #[test]
    fn test_sector_membership() {
        assert!(Sector::Front.contains(0.0));
        assert!(Sector::Front.contains(30.0));
        assert!(Sector::Front.contains(330.0));
        assert!(!Sector::Front.contains(35.0));
        assert!(!Sector::Front.contains(325.0));

        assert!(Sector::Left.contains(60.0));
        assert!(Sector::Left.contains(120.0));
        assert!(!Sector::Left.contains(125.0));

        assert!(Sector::Right.contains(240.0));
        assert!(Sector::Right.contains(300.0));
        assert!(!Sector::Right.contains(180.0));
    }

    #[test]
    fn test_sector_reduction_takes_minimum() {
        let readings = [
            reading(0.0, 80.0),
            reading(350.0, 40.0),
            reading(90.0, 120.0),
            reading(100.0, 70.0),
            reading(270.0, 150.0),
            reading(180.0, 1.0), // belongs to no sector
        ];
        let s = SectorDistances::from_readings(&readings);
        assert_eq!(s.front, 40.0);
        assert_eq!(s.left, 70.0);
        assert_eq!(s.right, 150.0);
    }

    #[test]
    fn test_empty_sector_is_infinite() {
        // A 135° step never lands in [60, 120]
        let readings: Vec<_> = (0..3).map(|i| reading(i as f32 * 135.0, 50.0)).collect();
        let s = SectorDistances::from_readings(&readings);
        assert_eq!(s.front, 50.0);
        assert_eq!(s.left, f32::INFINITY);
        assert_eq!(s.right, 50.0);
        assert_eq!(s.clearer_side(), TurnDirection::Left);
    }

    #[test]
    fn test_idle_clear_front_drives() {
        let policy = AvoidancePolicy::default();
        let d = policy.decide(
            AvoidanceState::Idle,
            &sectors(60.0, 10.0, 10.0),
            &Tunables::default(),
        );
        assert_eq!(d.action, Action::Drive);
        assert_eq!(d.next_state, AvoidanceState::Idle);
    }

    #[test]
    fn test_idle_blocked_front_begins_turn_toward_clearance() {
        let policy = AvoidancePolicy::default();
        let tunables = Tunables::default();

        let d = policy.decide(AvoidanceState::Idle, &sectors(59.0, 100.0, 20.0), &tunables);
        assert_eq!(d.action, Action::BeginTurn(TurnDirection::Left));
        assert_eq!(
            d.next_state,
            AvoidanceState::Turning {
                direction: TurnDirection::Left,
                frames_remaining: NonZeroU32::new(30).unwrap(),
            }
        );

        // Ties turn right
        let d = policy.decide(AvoidanceState::Idle, &sectors(10.0, 50.0, 50.0), &tunables);
        assert_eq!(d.action, Action::BeginTurn(TurnDirection::Right));
    }

    #[test]
    fn test_turning_ignores_sensors_and_counts_down() {
        let policy = AvoidancePolicy::default();
        let tunables = Tunables::default();
        let state = AvoidanceState::Turning {
            direction: TurnDirection::Right,
            frames_remaining: NonZeroU32::new(2).unwrap(),
        };

        // Front is wide open, still turning
        let d = policy.decide(state, &sectors(150.0, 150.0, 150.0), &tunables);
        assert_eq!(d.action, Action::Turn(TurnDirection::Right));
        assert_eq!(
            d.next_state,
            AvoidanceState::Turning {
                direction: TurnDirection::Right,
                frames_remaining: NonZeroU32::new(1).unwrap(),
            }
        );

        // Last frame drops back to idle, even with an obstacle dead ahead
        let d = policy.decide(d.next_state, &sectors(1.0, 150.0, 150.0), &tunables);
        assert_eq!(d.action, Action::Turn(TurnDirection::Right));
        assert_eq!(d.next_state, AvoidanceState::Idle);
    }
}
