//! Round simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Explicit state passed to every step
//! - Injected RNG only
//! - Stable iteration order (bulbs are never reordered)

pub mod autopilot;
pub mod level;
pub mod session;
pub mod state;
pub mod tick;
pub mod tree;

pub use autopilot::autopilot_input;
pub use level::{LevelSettings, Theme, normalize_level};
pub use session::{PendingRound, Session, SessionEvent};
pub use state::{Light, LightColor, Player, RngState, RoundOutcome, RoundPhase, RoundState};
pub use tick::{RoundInput, advance, decay_lights, repair_nearby};
pub use tree::{Tree, TreeLayout};
