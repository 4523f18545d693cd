//! Simulation tunables and configuration
//!
//! `Tunables` are the three knobs an operator may change between ticks.
//! `SimConfig` holds everything fixed for a run and is persisted as JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Per-tick control parameters
///
/// Valid domains: `speed` in [0, 10], `turn_rate` in [0.1, 10] degrees/tick,
/// `avoidance_threshold` in [10, 150]. The simulation reads these as given;
/// keeping them in range is the caller's job (see [`Tunables::apply`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Forward distance per tick
    pub speed: f32,
    /// Heading change per committed-turn tick (degrees)
    pub turn_rate: f32,
    /// Front-sector distance below which a turn starts
    pub avoidance_threshold: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            turn_rate: DEFAULT_TURN_RATE,
            avoidance_threshold: DEFAULT_AVOIDANCE_THRESHOLD,
        }
    }
}

/// One step of live tuning, as issued by an input handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TuningCommand {
    SpeedUp,
    SpeedDown,
    TurnRateUp,
    TurnRateDown,
    ThresholdUp,
    ThresholdDown,
}

impl TuningCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningCommand::SpeedUp => "speed+",
            TuningCommand::SpeedDown => "speed-",
            TuningCommand::TurnRateUp => "turn+",
            TuningCommand::TurnRateDown => "turn-",
            TuningCommand::ThresholdUp => "threshold+",
            TuningCommand::ThresholdDown => "threshold-",
        }
    }

    /// Keyboard binding (W/S speed, A/D turn rate, Q/E threshold)
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(TuningCommand::SpeedUp),
            's' => Some(TuningCommand::SpeedDown),
            'd' => Some(TuningCommand::TurnRateUp),
            'a' => Some(TuningCommand::TurnRateDown),
            'e' => Some(TuningCommand::ThresholdUp),
            'q' => Some(TuningCommand::ThresholdDown),
            _ => None,
        }
    }
}

impl Tunables {
    /// Apply one tuning step, clamping to the valid domain
    pub fn apply(&mut self, command: TuningCommand) {
        match command {
            TuningCommand::SpeedUp => self.speed = clamp_to(self.speed + 0.1, SPEED_RANGE),
            TuningCommand::SpeedDown => self.speed = clamp_to(self.speed - 0.1, SPEED_RANGE),
            TuningCommand::TurnRateUp => {
                self.turn_rate = clamp_to(self.turn_rate + 0.1, TURN_RATE_RANGE)
            }
            TuningCommand::TurnRateDown => {
                self.turn_rate = clamp_to(self.turn_rate - 0.1, TURN_RATE_RANGE)
            }
            TuningCommand::ThresholdUp => {
                self.avoidance_threshold = clamp_to(self.avoidance_threshold + 1.0, THRESHOLD_RANGE)
            }
            TuningCommand::ThresholdDown => {
                self.avoidance_threshold = clamp_to(self.avoidance_threshold - 1.0, THRESHOLD_RANGE)
            }
        }
    }

    /// Copy with every field clamped into its valid domain
    pub fn clamped(&self) -> Self {
        Self {
            speed: clamp_to(self.speed, SPEED_RANGE),
            turn_rate: clamp_to(self.turn_rate, TURN_RATE_RANGE),
            avoidance_threshold: clamp_to(self.avoidance_threshold, THRESHOLD_RANGE),
        }
    }
}

#[inline]
fn clamp_to(value: f32, (lo, hi): (f32, f32)) -> f32 {
    value.clamp(lo, hi)
}

/// Fixed per-run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Sensor ===
    /// Degrees between rays; must divide 360
    pub sensor_angle_step_deg: u32,
    pub sensor_max_range: f32,

    // === Rover ===
    pub body_size: f32,
    pub start_x: f32,
    pub start_y: f32,
    pub start_heading_deg: f32,

    // === Avoidance ===
    /// Length of a committed turn in ticks
    pub avoid_turn_frames: u32,
    /// Heading nudge after a blocked move (degrees)
    pub recovery_turn_deg: f32,

    /// Initial tunables
    pub tunables: Tunables,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            sensor_angle_step_deg: SENSOR_ANGLE_STEP_DEG,
            sensor_max_range: SENSOR_MAX_RANGE,

            body_size: BODY_SIZE,
            start_x: START_X,
            start_y: START_Y,
            start_heading_deg: START_HEADING_DEG,

            avoid_turn_frames: AVOID_TURN_FRAMES,
            recovery_turn_deg: RECOVERY_TURN_DEG,

            tunables: Tunables::default(),
        }
    }
}

impl SimConfig {
    /// Check the values the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let step = self.sensor_angle_step_deg;
        if step == 0 || 360 % step != 0 {
            return Err(ConfigError::InvalidAngleStep(step));
        }
        if self.avoid_turn_frames == 0 {
            return Err(ConfigError::ZeroTurnFrames);
        }

        let lengths = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("sensor_max_range", self.sensor_max_range),
            ("body_size", self.body_size),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::non_positive(name, value));
            }
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }
}
