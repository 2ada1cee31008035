//! Scene building - round state to an ordered list of draw commands
//!
//! Pure function of `RoundState`; the backend decides how to draw each
//! command and skips sprites whose images are not loaded yet.

use glam::Vec2;

use crate::consts::*;
use crate::sim::RoundState;

/// Colors for HUD and bulbs
pub mod colors {
    pub const LIGHT_OFF: &str = "rgba(200,200,200,0.3)";
    pub const TIMER_BACK: &str = "#222";
    pub const TIMER_FILL: &str = "#f1c40f";
    pub const TIMER_BORDER: &str = "#fff";
    pub const TEXT: &str = "#fff";
    pub const MESSAGE_BACK: &str = "rgba(0,0,0,0.6)";
}

/// Fonts for HUD text
pub mod fonts {
    pub const TIMER: &str = "16px Arial";
    pub const MESSAGE: &str = "22px sans-serif";
}

/// Raster images the page provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Tree,
    Present,
}

impl Sprite {
    pub const ALL: [Sprite; 3] = [Sprite::Player, Sprite::Tree, Sprite::Present];

    /// Image path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            Sprite::Player => "./Images/HelperElf.png",
            Sprite::Tree => "./Images/Tree.png",
            Sprite::Present => "./Images/present.png",
        }
    }
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FillRect {
        pos: Vec2,
        size: Vec2,
        color: String,
    },
    StrokeRect {
        pos: Vec2,
        size: Vec2,
        color: String,
    },
    /// Filled circle; `glow > 0` adds a same-colored shadow blur
    Circle {
        center: Vec2,
        radius: f32,
        color: String,
        glow: f32,
    },
    Image {
        sprite: Sprite,
        pos: Vec2,
        size: Vec2,
    },
    Text {
        text: String,
        pos: Vec2,
        font: &'static str,
        color: &'static str,
        align: TextAlign,
    },
}

fn fill(pos: Vec2, size: Vec2, color: &str) -> DrawCmd {
    DrawCmd::FillRect {
        pos,
        size,
        color: color.to_string(),
    }
}

/// Build the full frame for `state`, back to front
pub fn build_scene(state: &RoundState) -> Vec<DrawCmd> {
    let canvas = state.canvas;
    let theme = &state.settings.theme;
    let tree = &state.tree;
    let mut cmds = Vec::with_capacity(state.lights.len() + 16);

    // Room
    cmds.push(fill(Vec2::ZERO, canvas, &theme.background));
    cmds.push(fill(
        Vec2::new(0.0, canvas.y - FLOOR_HEIGHT),
        Vec2::new(canvas.x, FLOOR_HEIGHT),
        &theme.floor,
    ));

    // Decorations
    cmds.push(DrawCmd::Image {
        sprite: Sprite::Present,
        pos: tree.present_pos(canvas),
        size: Vec2::new(PRESENT_WIDTH, PRESENT_HEIGHT),
    });
    cmds.push(DrawCmd::Image {
        sprite: Sprite::Tree,
        pos: tree.pos,
        size: tree.size,
    });

    // Bulbs
    for light in &state.lights {
        let (color, glow) = if light.on {
            (light.color.css(), LIGHT_GLOW)
        } else {
            (colors::LIGHT_OFF, 0.0)
        };
        cmds.push(DrawCmd::Circle {
            center: light.pos,
            radius: LIGHT_RADIUS,
            color: color.to_string(),
            glow,
        });
    }

    cmds.push(DrawCmd::Image {
        sprite: Sprite::Player,
        pos: state.player.pos,
        size: state.player.size,
    });

    push_timer(&mut cmds, state);

    if state.is_over() {
        push_message(&mut cmds, canvas, &state.message);
    }

    cmds
}

fn push_timer(cmds: &mut Vec<DrawCmd>, state: &RoundState) {
    let pos = Vec2::new(TIMER_BAR_X, TIMER_BAR_Y);
    let size = Vec2::new(TIMER_BAR_WIDTH, TIMER_BAR_HEIGHT);

    cmds.push(fill(pos, size, colors::TIMER_BACK));
    cmds.push(fill(
        pos,
        Vec2::new(size.x * state.time_fraction(), size.y),
        colors::TIMER_FILL,
    ));
    cmds.push(DrawCmd::StrokeRect {
        pos,
        size,
        color: colors::TIMER_BORDER.to_string(),
    });
    cmds.push(DrawCmd::Text {
        text: format!("Time: {:.1}s", state.timer.max(0.0)),
        pos: Vec2::new(pos.x + size.x + 10.0, pos.y + 15.0),
        font: fonts::TIMER,
        color: colors::TEXT,
        align: TextAlign::Left,
    });
}

fn push_message(cmds: &mut Vec<DrawCmd>, canvas: Vec2, message: &str) {
    let center = canvas / 2.0;
    cmds.push(fill(
        Vec2::new(
            center.x - MESSAGE_BOX_WIDTH / 2.0,
            center.y - MESSAGE_BOX_HEIGHT / 2.0,
        ),
        Vec2::new(MESSAGE_BOX_WIDTH, MESSAGE_BOX_HEIGHT),
        colors::MESSAGE_BACK,
    ));
    cmds.push(DrawCmd::Text {
        text: message.to_string(),
        pos: Vec2::new(center.x, center.y + 10.0),
        font: fonts::MESSAGE,
        color: colors::TEXT,
        align: TextAlign::Center,
    });
}
