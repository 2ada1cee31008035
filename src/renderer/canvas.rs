//! Canvas 2D backend
//!
//! Executes `DrawCmd`s on a `CanvasRenderingContext2d`. Sprites are drawn only
//! once their image reports complete; until then the command is skipped.

use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::scene::{DrawCmd, Sprite};

/// Lazily loaded sprite images
pub struct SpriteSheet {
    images: HashMap<Sprite, HtmlImageElement>,
}

impl SpriteSheet {
    /// Start loading every sprite; failures leave that sprite undrawn
    pub fn load() -> Self {
        let mut images = HashMap::new();
        for sprite in Sprite::ALL {
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(sprite.path());
                    images.insert(sprite, img);
                }
                Err(e) => log::warn!("Could not create image for {:?}: {:?}", sprite, e),
            }
        }
        Self { images }
    }

    /// Loaded and decodable (a broken image is `complete` with zero width)
    pub fn ready(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        self.images
            .get(&sprite)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}

/// Draws scenes onto one canvas
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sprites: SpriteSheet,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            sprites: SpriteSheet::load(),
        })
    }

    /// Draw every command in order
    pub fn draw(&self, cmds: &[DrawCmd]) {
        for cmd in cmds {
            if let Err(e) = self.draw_one(cmd) {
                log::warn!("Draw failed: {:?}", e);
            }
        }
    }

    fn draw_one(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::FillRect { pos, size, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::StrokeRect { pos, size, color } => {
                ctx.set_stroke_style_str(color);
                ctx.stroke_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
                glow,
            } => {
                ctx.begin_path();
                ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )?;
                ctx.set_fill_style_str(color);
                if *glow > 0.0 {
                    ctx.set_shadow_blur(*glow as f64);
                    ctx.set_shadow_color(color);
                }
                ctx.fill();
                ctx.set_shadow_blur(0.0);
            }
            DrawCmd::Image { sprite, pos, size } => {
                if let Some(img) = self.sprites.ready(*sprite) {
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        pos.x as f64,
                        pos.y as f64,
                        size.x as f64,
                        size.y as f64,
                    )?;
                }
            }
            DrawCmd::Text {
                text,
                pos,
                font,
                color,
                align,
            } => {
                ctx.set_fill_style_str(color);
                ctx.set_font(font);
                ctx.set_text_align(align.as_str());
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
        Ok(())
    }
}
