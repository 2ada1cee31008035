//! Round state and core simulation types
//!
//! Everything a frame step or the scene builder needs lives in `RoundState`.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{LevelSettings, last_level};
use super::tree::{Tree, TreeLayout};
use crate::consts::*;
use crate::tuning::Tuning;

/// Bulb color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightColor {
    Red,
    Blue,
    Yellow,
    Green,
    Pink,
}

impl LightColor {
    pub const ALL: [LightColor; 5] = [
        LightColor::Red,
        LightColor::Blue,
        LightColor::Yellow,
        LightColor::Green,
        LightColor::Pink,
    ];

    /// CSS color used when the bulb is lit
    pub fn css(&self) -> &'static str {
        match self {
            LightColor::Red => "#ff0000",
            LightColor::Blue => "#0000ff",
            LightColor::Yellow => "#ffff00",
            LightColor::Green => "#00ff00",
            LightColor::Pink => "#ff32e4ff",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A bulb on the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub pos: Vec2,
    pub color: LightColor,
    pub on: bool,
    /// Seconds of decay immunity left after a repair
    #[serde(default)]
    pub cooldown: f32,
}

impl Light {
    pub fn new(pos: Vec2, color: LightColor, on: bool) -> Self {
        Self {
            pos,
            color,
            on,
            cooldown: 0.0,
        }
    }

    /// Relight the bulb and start its decay immunity
    pub fn repair(&mut self, cooldown: f32) {
        self.on = true;
        self.cooldown = cooldown;
    }

    pub fn is_protected(&self) -> bool {
        self.cooldown > 0.0
    }
}

/// The player sprite (moves horizontally only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed in px/s
    pub speed: f32,
}

impl Player {
    pub fn new(canvas: Vec2, speed: f32) -> Self {
        Self {
            pos: Vec2::new(canvas.x / 2.0, canvas.y - PLAYER_OFFSET_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Move by `direction * speed * dt` and keep the sprite fully on-screen
    pub fn move_horizontal(&mut self, direction: f32, dt: f32, canvas_width: f32) {
        self.pos.x += direction * self.speed * dt;
        self.clamp_to(canvas_width);
    }

    pub fn clamp_to(&mut self, canvas_width: f32) {
        let max_x = (canvas_width - self.size.x).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }

    /// Horizontal distance from the sprite center to `x`
    pub fn reach_to(&self, x: f32) -> f32 {
        (self.center_x() - x).abs()
    }
}

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Timer running
    Active,
    /// Timer expired; outcome decided
    Over(RoundOutcome),
}

/// Result of the single end-of-round evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Every light was lit when the timer crossed zero
    Won,
    /// At least one light was out
    Lost,
}

/// RNG seed wrapper for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete state of one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub settings: LevelSettings,
    /// Drawing surface size
    pub canvas: Vec2,
    pub tree: Tree,
    pub lights: Vec<Light>,
    pub player: Player,
    /// Seconds left (may go slightly negative on the final frame)
    pub timer: f32,
    pub phase: RoundPhase,
    /// End-of-round text, empty while active
    pub message: String,
    /// Frames advanced
    pub frames: u64,
    repair_radius: f32,
    repair_cooldown: f32,
    max_level: Option<u32>,
}

impl RoundState {
    /// Build a round for `level`: derive settings, lay out the tree, place the player
    pub fn new<R: Rng + ?Sized>(level: u32, tuning: &Tuning, rng: &mut R) -> Self {
        let settings = LevelSettings::for_level(level, tuning);
        let canvas = Vec2::new(tuning.canvas_width, tuning.canvas_height);
        let layout = TreeLayout::for_level(settings.level, canvas);
        let lights = layout.generate_lights(settings.level, rng);

        log::info!(
            "Level {}: {} lights, timer={:.1}s, decay={:.3}/s, speed={:.0}",
            settings.level,
            lights.len(),
            settings.timer,
            settings.decay_rate,
            settings.player_speed
        );

        Self::with_lights(settings, tuning, layout.tree, lights)
    }

    /// Build a round around an explicit set of lights
    pub fn with_lights(
        settings: LevelSettings,
        tuning: &Tuning,
        tree: Tree,
        lights: Vec<Light>,
    ) -> Self {
        let canvas = Vec2::new(tuning.canvas_width, tuning.canvas_height);
        let mut player = Player::new(canvas, settings.player_speed);
        player.clamp_to(canvas.x);

        Self {
            timer: settings.timer,
            settings,
            canvas,
            tree,
            lights,
            player,
            phase: RoundPhase::Active,
            message: String::new(),
            frames: 0,
            repair_radius: tuning.repair_radius,
            repair_cooldown: tuning.repair_cooldown,
            max_level: tuning.max_level,
        }
    }

    pub fn level(&self) -> u32 {
        self.settings.level
    }

    pub fn repair_radius(&self) -> f32 {
        self.repair_radius
    }

    pub fn repair_cooldown(&self) -> f32 {
        self.repair_cooldown
    }

    /// Level the session moves to after this round, `None` once the last level is won
    pub fn next_level(&self) -> Option<u32> {
        match self.outcome() {
            Some(RoundOutcome::Won) if self.level() >= last_level(self.max_level) => None,
            Some(RoundOutcome::Won) => Some(self.level().saturating_add(1)),
            _ => Some(self.level()),
        }
    }

    /// Text shown once the round ends
    pub fn outcome_message(&self) -> String {
        match (self.outcome(), self.next_level()) {
            (None, _) => String::new(),
            (Some(RoundOutcome::Won), Some(next)) => {
                format!("Great job, you saved christmas! Starting Level {next}...")
            }
            (Some(RoundOutcome::Won), None) => {
                format!("You saved christmas! All {} levels complete!", self.level())
            }
            (Some(RoundOutcome::Lost), _) => format!(
                "Game Over — Some lights are off! Restarting level {}...",
                self.level()
            ),
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, RoundPhase::Over(_))
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            RoundPhase::Over(outcome) => Some(outcome),
            RoundPhase::Active => None,
        }
    }

    pub fn all_lit(&self) -> bool {
        self.lights.iter().all(|l| l.on)
    }

    pub fn lit_count(&self) -> usize {
        self.lights.iter().filter(|l| l.on).count()
    }

    /// Remaining time as a fraction of the round length, in `[0, 1]`
    pub fn time_fraction(&self) -> f32 {
        if self.settings.timer <= 0.0 {
            return 0.0;
        }
        (self.timer / self.settings.timer).clamp(0.0, 1.0)
    }
}
