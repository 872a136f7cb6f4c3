use folio_core::{Rgb, Surface, Vector2D};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// CSS color string for an RGB triple at the given alpha
pub fn rgba(color: Rgb, alpha: f64) -> String {
    format!("rgba({}, {}, {}, {})", color.r, color.g, color.b, alpha)
}

/// [`Surface`] backed by a 2D canvas context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self { canvas, context })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: Vector2D, radius: f64, color: Rgb, alpha: f64) {
        self.context.begin_path();
        // arc only fails on a negative radius
        if self
            .context
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
            .is_err()
        {
            return;
        }
        self.context.set_fill_style_str(&rgba(color, alpha));
        self.context.fill();
    }

    fn stroke_line(&mut self, from: Vector2D, to: Vector2D, width: f64, color: Rgb, alpha: f64) {
        self.context.begin_path();
        self.context.set_stroke_style_str(&rgba(color, alpha));
        self.context.set_line_width(width);
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        self.context.stroke();
    }
}
