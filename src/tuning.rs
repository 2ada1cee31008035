//! Data-driven difficulty knobs
//!
//! Defaults reproduce the shipped game. A host page may pass a JSON document
//! to override any subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, MAX_LEVEL, PLAYER_WIDTH};
use crate::sim::level::Theme;

/// Errors raised while loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Surface ===
    /// Drawing surface width in pixels
    pub canvas_width: f32,
    /// Drawing surface height in pixels
    pub canvas_height: f32,

    // === Difficulty ===
    /// Level-1 decay rate (chance per second that a lit light goes out)
    pub light_decay_rate: f32,
    /// Decay rate grows by `1 / speed_factor` each level
    pub speed_factor: f32,
    /// Level-1 round length in seconds
    pub base_level_time: f32,
    /// Round length never drops below this
    pub min_level_time: f32,
    /// Seconds removed from the round length per level
    pub time_step_per_level: f32,
    /// Level-1 player speed in px/s
    pub base_player_speed: f32,
    /// Player speed added per level in px/s
    pub player_speed_per_level: f32,

    // === Repair ===
    /// Horizontal distance from the player center that repair reaches
    pub repair_radius: f32,
    /// Seconds a freshly repaired light is immune to decay
    pub repair_cooldown: f32,

    // === Flow ===
    /// Delay between a round ending and the next one starting
    pub restart_delay: f32,
    /// Frame deltas are clamped to this (backgrounded tabs)
    pub max_frame_dt: f32,
    /// Winning this level ends the session instead of advancing
    pub max_level: Option<u32>,
    /// Optional per-level color table (index 0 = level 1)
    pub themes: Vec<Theme>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            light_decay_rate: 0.1,
            speed_factor: 0.85,
            base_level_time: 20.0,
            min_level_time: 10.0,
            time_step_per_level: 1.5,
            base_player_speed: 400.0,
            player_speed_per_level: 50.0,

            repair_radius: 50.0,
            repair_cooldown: 0.5,

            restart_delay: 3.0,
            max_frame_dt: 0.1,
            max_level: None,
            themes: Vec::new(),
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the effective config)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }
        // Written as "is valid" checks so NaN is rejected too
        let positive = |v: f32| v > 0.0;
        let non_negative = |v: f32| v >= 0.0;

        if !positive(self.canvas_width - PLAYER_WIDTH) {
            return invalid("canvas_width", "must be wider than the player sprite");
        }
        if !positive(self.canvas_height) {
            return invalid("canvas_height", "must be positive");
        }
        if !positive(self.speed_factor) {
            return invalid("speed_factor", "must be positive");
        }
        if !non_negative(self.light_decay_rate) {
            return invalid("light_decay_rate", "must not be negative");
        }
        if !positive(self.min_level_time) {
            return invalid("min_level_time", "must be positive");
        }
        if !non_negative(self.base_level_time - self.min_level_time) {
            return invalid("base_level_time", "must be at least min_level_time");
        }
        if !non_negative(self.time_step_per_level) {
            return invalid("time_step_per_level", "must not be negative");
        }
        if !non_negative(self.base_player_speed) || !non_negative(self.player_speed_per_level) {
            return invalid("base_player_speed", "speeds must not be negative");
        }
        if !non_negative(self.repair_radius) {
            return invalid("repair_radius", "must not be negative");
        }
        if !positive(self.repair_cooldown) {
            return invalid("repair_cooldown", "must be positive");
        }
        if !non_negative(self.restart_delay) {
            return invalid("restart_delay", "must not be negative");
        }
        if !positive(self.max_frame_dt) {
            return invalid("max_frame_dt", "must be positive");
        }
        match self.max_level {
            Some(0) => return invalid("max_level", "must be at least 1"),
            Some(max) if max > MAX_LEVEL => {
                return invalid("max_level", "past the highest playable level");
            }
            _ => {}
        }
        Ok(())
    }
}
