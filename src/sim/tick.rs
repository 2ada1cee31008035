//! Per-frame round step
//!
//! Frame order: move, repair, decay, countdown, evaluate. Repair runs before
//! decay and marks repaired bulbs as protected, so a held repair always wins
//! over a same-frame decay roll.

use rand::Rng;

use super::state::{RoundOutcome, RoundPhase, RoundState};

/// Held keys sampled at the top of a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundInput {
    pub left: bool,
    pub right: bool,
    pub repair: bool,
}

impl RoundInput {
    /// -1, 0 or +1; opposing keys cancel out
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the round by `dt` seconds.
///
/// Returns the outcome on the single frame where the timer crosses zero and
/// `None` on every other frame, including all frames after the round ended.
pub fn advance<R: Rng + ?Sized>(
    state: &mut RoundState,
    input: &RoundInput,
    dt: f32,
    rng: &mut R,
) -> Option<RoundOutcome> {
    if state.is_over() {
        return None;
    }
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    state.frames += 1;

    // Move
    let canvas_width = state.canvas.x;
    state
        .player
        .move_horizontal(input.direction(), dt, canvas_width);

    // Repair
    if input.repair {
        repair_nearby(state);
    }

    // Decay
    decay_lights(state, dt, rng);

    // Countdown
    state.timer -= dt;
    if state.timer > 0.0 {
        return None;
    }

    let outcome = if state.all_lit() {
        RoundOutcome::Won
    } else {
        RoundOutcome::Lost
    };
    state.phase = RoundPhase::Over(outcome);
    state.message = state.outcome_message();

    log::info!(
        "Level {} over after {} frames: {:?} ({}/{} lit)",
        state.level(),
        state.frames,
        outcome,
        state.lit_count(),
        state.lights.len()
    );

    Some(outcome)
}

/// Relight every bulb within reach of the player's center; returns how many changed
pub fn repair_nearby(state: &mut RoundState) -> usize {
    let radius = state.repair_radius();
    let cooldown = state.repair_cooldown();
    let player = &state.player;
    let mut relit = 0;

    for light in state
        .lights
        .iter_mut()
        .filter(|l| player.reach_to(l.pos.x) < radius)
    {
        if !light.on {
            relit += 1;
        }
        light.repair(cooldown);
    }

    relit
}

/// Roll decay for every unprotected bulb with probability `decay_rate * dt`
pub fn decay_lights<R: Rng + ?Sized>(state: &mut RoundState, dt: f32, rng: &mut R) {
    let chance = (state.settings.decay_rate * dt).clamp(0.0, 1.0);

    for light in &mut state.lights {
        if light.is_protected() {
            light.cooldown = (light.cooldown - dt).max(0.0);
            continue;
        }
        // Unlit bulbs roll too (no-op) so the RNG stream only depends on bulb count
        if rng.random::<f32>() < chance {
            light.on = false;
        }
    }
}
