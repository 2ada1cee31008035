//! Idle/demo mode - a simple bot that plays the round
//!
//! Chases the dark bulb closest to the player and holds repair whenever any
//! bulb is in reach. Used by the headless runner and the page's demo toggle.

use super::state::RoundState;
use super::tick::RoundInput;

/// Fraction of the repair radius treated as "close enough" to stop moving
const DEADBAND: f32 = 0.5;

/// Pick the input for this frame
pub fn autopilot_input(state: &RoundState) -> RoundInput {
    let player = &state.player;
    let radius = state.repair_radius();
    let center = player.center_x();

    // Nearest dark bulb, else park under the tree
    let target_x = state
        .lights
        .iter()
        .filter(|l| !l.on)
        .map(|l| l.pos.x)
        .min_by(|a, b| {
            (a - center)
                .abs()
                .partial_cmp(&(b - center).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or_else(|| state.tree.center_x());

    let dx = target_x - center;
    let deadband = (radius * DEADBAND).max(1.0);
    let in_reach = state.lights.iter().any(|l| player.reach_to(l.pos.x) < radius);

    RoundInput {
        left: dx < -deadband,
        right: dx > deadband,
        repair: in_reach,
    }
}
