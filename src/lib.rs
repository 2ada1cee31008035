//! Tree Lights - keep the tree lit before the timer runs out
//!
//! Core modules:
//! - `sim`: Round simulation (lights, player, decay, win/lose)
//! - `renderer`: Draw-command scene and Canvas 2D backend
//! - `platform`: Keyboard state and browser entry point
//! - `tuning`: Data-driven difficulty knobs

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Default canvas size in pixels
    pub const CANVAS_WIDTH: f32 = 1200.0;
    pub const CANVAS_HEIGHT: f32 = 800.0;

    /// Player sprite size (the elf)
    pub const PLAYER_WIDTH: f32 = 500.0;
    pub const PLAYER_HEIGHT: f32 = 450.0;
    /// Player top edge sits this far above the canvas bottom
    pub const PLAYER_OFFSET_Y: f32 = 500.0;

    /// Tree graphic size
    pub const TREE_WIDTH: f32 = 300.0;
    pub const TREE_HEIGHT: f32 = 400.0;
    /// Tree top edge sits this far above the canvas bottom
    pub const TREE_OFFSET_Y: f32 = 440.0;
    /// First light row starts this far below the tree top
    pub const TREE_LIGHT_MARGIN: f32 = 20.0;
    /// Base number of light rows (one more every 3 levels)
    pub const TREE_BASE_ROWS: u32 = 7;

    /// Highest playable level; requests outside `1..=MAX_LEVEL` start at level 1
    pub const MAX_LEVEL: u32 = 99;

    /// Present decoration, placed left of the tree
    pub const PRESENT_WIDTH: f32 = 150.0;
    pub const PRESENT_HEIGHT: f32 = 110.0;
    pub const PRESENT_OFFSET_X: f32 = 120.0;
    pub const PRESENT_OFFSET_Y: f32 = 150.0;

    /// Floor strip height
    pub const FLOOR_HEIGHT: f32 = 60.0;

    /// Drawn radius of a light bulb
    pub const LIGHT_RADIUS: f32 = 9.0;
    /// Glow blur for lit bulbs
    pub const LIGHT_GLOW: f32 = 10.0;

    /// Chance a light starts unlit at level L is `BASE + PER_LEVEL * L`
    pub const LIGHT_START_OFF_BASE: f32 = 0.1;
    pub const LIGHT_START_OFF_PER_LEVEL: f32 = 0.05;

    /// Timer bar (top-left HUD)
    pub const TIMER_BAR_X: f32 = 10.0;
    pub const TIMER_BAR_Y: f32 = 10.0;
    pub const TIMER_BAR_WIDTH: f32 = 200.0;
    pub const TIMER_BAR_HEIGHT: f32 = 20.0;

    /// End-of-round message box
    pub const MESSAGE_BOX_WIDTH: f32 = 400.0;
    pub const MESSAGE_BOX_HEIGHT: f32 = 80.0;
}
