//! Canvas 2D renderer
//!
//! Draws the playfield in logical 800x600 coordinates. `resize` matches the
//! backing store to the canvas's CSS size and rescales the context so the
//! logical units hold at any display size.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::{Launcher, Projectile, Target};

/// Spear shaft length in logical pixels
const SPEAR_LENGTH: f64 = 80.0;
/// Spear tip height in logical pixels
const SPEAR_TIP: f64 = 14.0;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the canvas CSS size and rescale
    pub fn resize(&self) {
        let rect = self.canvas.get_bounding_client_rect();
        let (w, h) = (rect.width(), rect.height());
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        self.canvas.set_width(w as u32);
        self.canvas.set_height(h as u32);

        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let _ = self
            .ctx
            .scale(w / FIELD_WIDTH as f64, h / FIELD_HEIGHT as f64);
    }

    pub fn clear(&self) {
        self.ctx
            .clear_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
    }

    /// Tomato disc with a gold bullseye
    pub fn draw_target(&self, target: &Target) {
        let (x, y) = (target.pos.x as f64, target.pos.y as f64);
        let r = target.radius as f64;

        self.ctx.set_fill_style_str("#ff6347");
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, r, 0.0, std::f64::consts::TAU);
        self.ctx.fill();

        self.ctx.set_fill_style_str("#ffd700");
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, r * 0.5, 0.0, std::f64::consts::TAU);
        self.ctx.fill();
    }

    pub fn draw_projectile(&self, projectile: &Projectile) {
        self.draw_spear(
            projectile.pos.x as f64,
            projectile.pos.y as f64,
            projectile.angle as f64,
            1.0,
        );
    }

    /// Ghosted preview of the next spear at the rack
    pub fn draw_launcher(&self, launcher: &Launcher) {
        self.draw_spear(
            launcher.pos.x as f64,
            launcher.pos.y as f64,
            launcher.angle as f64,
            0.8,
        );
    }

    /// A spear pointing up: shaft plus a triangular tip
    fn draw_spear(&self, x: f64, y: f64, angle: f64, alpha: f64) {
        self.ctx.save();
        let _ = self.ctx.translate(x, y);
        let _ = self.ctx.rotate(angle);
        self.ctx.set_global_alpha(alpha);

        self.ctx.set_stroke_style_str("#8b5a2b");
        self.ctx.set_line_width(4.0);
        self.ctx.begin_path();
        self.ctx.move_to(0.0, SPEAR_LENGTH / 2.0);
        self.ctx.line_to(0.0, -SPEAR_LENGTH / 2.0 + SPEAR_TIP);
        self.ctx.stroke();

        self.ctx.set_fill_style_str("#c0c0c0");
        self.ctx.begin_path();
        self.ctx.move_to(0.0, -SPEAR_LENGTH / 2.0);
        self.ctx.line_to(-5.0, -SPEAR_LENGTH / 2.0 + SPEAR_TIP);
        self.ctx.line_to(5.0, -SPEAR_LENGTH / 2.0 + SPEAR_TIP);
        self.ctx.close_path();
        self.ctx.fill();

        self.ctx.restore();
    }
}
