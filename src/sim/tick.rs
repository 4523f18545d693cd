//! Per-frame simulation tick
//!
//! Order is fixed: scan → sector reduction → policy decision → (drive only)
//! footprint check → pose commit → wraparound.

use serde::{Deserialize, Serialize};

use super::collision::first_collision;
use super::policy::{Action, AvoidanceState, SectorDistances};
use super::sensor::SensorReading;
use super::state::{Pose, Simulation};
use crate::settings::Tunables;

/// What happened to the rover this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionOutcome {
    /// Spent one frame of a committed turn
    Turned,
    /// Started a committed turn (no motion)
    TurnStarted,
    /// Moved forward normally
    Advanced,
    /// Forward move rejected; heading nudged instead
    Blocked,
}

/// Everything a renderer or HUD needs about one tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameResult {
    /// 1-based index of this tick
    pub tick: u64,
    pub pose: Pose,
    pub avoidance: AvoidanceState,
    pub readings: Vec<SensorReading>,
    pub sectors: SectorDistances,
    pub action: Action,
    pub outcome: MotionOutcome,
}

/// Advance the simulation by one frame
///
/// `tunables` are read once and trusted as-is; clamping is the caller's job.
pub fn tick(sim: &mut Simulation, tunables: &Tunables) -> FrameResult {
    let readings = sim.sensor.scan(&sim.pose, sim.world.obstacles());
    let sectors = SectorDistances::from_readings(&readings);
    let decision = sim.policy.decide(sim.avoidance, &sectors, tunables);

    let outcome = match decision.action {
        Action::Turn(direction) => {
            sim.pose = sim
                .pose
                .rotated(direction.sign() * tunables.turn_rate)
                .advanced(tunables.speed);
            MotionOutcome::Turned
        }
        Action::BeginTurn(direction) => {
            log::debug!(
                "tick {}: front {:.0} < {:.0}, turning {} for {} frames",
                sim.ticks + 1,
                sectors.front,
                tunables.avoidance_threshold,
                direction.as_str(),
                sim.policy.turn_frames
            );
            MotionOutcome::TurnStarted
        }
        Action::Drive => {
            let candidate = sim.pose.advanced(tunables.speed);
            match first_collision(&candidate, sim.body_size, sim.world.obstacles()) {
                Some(index) => {
                    log::debug!(
                        "tick {}: move to ({:.1}, {:.1}) blocked by obstacle {}",
                        sim.ticks + 1,
                        candidate.position.x,
                        candidate.position.y,
                        index
                    );
                    sim.pose = sim.pose.rotated(sim.recovery_turn_deg);
                    MotionOutcome::Blocked
                }
                None => {
                    sim.pose = candidate;
                    MotionOutcome::Advanced
                }
            }
        }
    };

    if sim.avoidance.is_turning() && !decision.next_state.is_turning() {
        log::debug!("tick {}: avoidance turn finished", sim.ticks + 1);
    }
    sim.avoidance = decision.next_state;
    sim.pose.position = sim.world.arena.wrap(sim.pose.position);
    sim.ticks += 1;

    FrameResult {
        tick: sim.ticks,
        pose: sim.pose,
        avoidance: sim.avoidance,
        readings,
        sectors,
        action: decision.action,
        outcome,
    }
}
