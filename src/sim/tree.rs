//! Procedural light layout on the tree
//!
//! Rows widen toward the bottom of the tree like a cone. Row `i` holds
//! `2i + 1` evenly spaced bulbs; the top and bottom rows stay empty.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::level::normalize_level;
use super::state::{Light, LightColor};
use crate::consts::*;

/// Tree graphic placement (also anchors the present decoration)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Tree {
    pub fn for_canvas(canvas: Vec2) -> Self {
        Self {
            pos: Vec2::new(canvas.x / 3.0, canvas.y - TREE_OFFSET_Y),
            size: Vec2::new(TREE_WIDTH, TREE_HEIGHT),
        }
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Top-left corner of the present drawn beside the trunk
    pub fn present_pos(&self, canvas: Vec2) -> Vec2 {
        Vec2::new(self.pos.x - PRESENT_OFFSET_X, canvas.y - PRESENT_OFFSET_Y)
    }
}

/// Row structure of the lights for one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeLayout {
    pub tree: Tree,
    pub rows: u32,
}

impl TreeLayout {
    /// One extra row every third level
    pub fn for_level(level: u32, canvas: Vec2) -> Self {
        Self {
            tree: Tree::for_canvas(canvas),
            rows: TREE_BASE_ROWS + normalize_level(level) / 3,
        }
    }

    pub fn row_spacing(&self) -> f32 {
        self.tree.size.y / self.rows as f32
    }

    /// Bulb positions, top row first, left to right
    pub fn positions(&self) -> Vec<Vec2> {
        let tree = &self.tree;
        let spacing = self.row_spacing();
        let mut out = Vec::with_capacity(self.light_count());

        for i in 1..self.rows.saturating_sub(1) {
            let y = tree.pos.y + TREE_LIGHT_MARGIN + i as f32 * spacing;
            let count = i * 2 + 1;
            let row_width =
                (i as f32 / self.rows as f32) * tree.size.x * 0.9 + tree.size.x * 0.1;
            let step = row_width / (count - 1).max(1) as f32;
            let left = tree.center_x() - row_width / 2.0;

            for j in 0..count {
                out.push(Vec2::new(left + j as f32 * step, y));
            }
        }

        out
    }

    /// Total bulbs on the tree
    pub fn light_count(&self) -> usize {
        (1..self.rows.saturating_sub(1))
            .map(|i| (i * 2 + 1) as usize)
            .sum()
    }

    /// Place bulbs with random colors; higher levels start with more of them dark
    pub fn generate_lights<R: Rng + ?Sized>(&self, level: u32, rng: &mut R) -> Vec<Light> {
        let off_chance =
            (LIGHT_START_OFF_BASE + level as f32 * LIGHT_START_OFF_PER_LEVEL).clamp(0.0, 1.0);

        self.positions()
            .into_iter()
            .map(|pos| {
                let on = rng.random::<f32>() > off_chance;
                let color = LightColor::random(rng);
                Light::new(pos, color, on)
            })
            .collect()
    }
}
