//! Rendering module
//!
//! `scene` turns a round into draw commands on every target; `canvas`
//! executes them on a browser 2D canvas.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasRenderer, SpriteSheet};
pub use scene::{DrawCmd, Sprite, TextAlign, build_scene};
