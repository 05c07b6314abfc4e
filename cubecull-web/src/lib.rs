/// CubeCull Web - canvas 2D host for the cube renderer
///
/// The page owns the timer and keyboard listeners and forwards them here:
///
/// ```js
/// const renderer = new WebRenderer("canvas");
/// setInterval(() => { renderer.tick(); renderer.render(); }, renderer.tick_ms());
/// addEventListener("keydown", (e) => { renderer.key(e.code); renderer.render(); });
/// ```
use cubecull_core::{
    apply_command, render_frame, AnimationParams, AnimationState, Command, Mesh, RenderParams,
    Rgba, Surface, Viewport,
};
use nalgebra::Point2;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// CSS colour string for a canvas fill or stroke style.
pub fn css_color(color: Rgba) -> String {
    if color.a == 255 {
        format!("rgb({}, {}, {})", color.r, color.g, color.b)
    } else {
        format!(
            "rgba({}, {}, {}, {:.3})",
            color.r,
            color.g,
            color.b,
            f32::from(color.a) / 255.0
        )
    }
}

/// `Surface` over a 2D canvas context.
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self {
            context,
            width,
            height,
        }
    }
}

impl Surface for CanvasSurface {
    fn fill_background(&mut self, color: Rgba) {
        self.context.set_fill_style_str(&css_color(color));
        self.context.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_polygon(&mut self, points: &[Point2<f32>], fill: Rgba, outline: Rgba) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let ctx = &self.context;
        ctx.begin_path();
        ctx.move_to(f64::from(first.x), f64::from(first.y));
        for p in rest {
            ctx.line_to(f64::from(p.x), f64::from(p.y));
        }
        ctx.close_path();

        ctx.set_fill_style_str(&css_color(fill));
        ctx.fill();
        ctx.set_stroke_style_str(&css_color(outline));
        ctx.stroke();
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    mesh: Mesh,
    state: AnimationState,
    render_params: RenderParams,
    animation: AnimationParams,
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the canvas element with id `canvas_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("'{canvas_id}' is not a canvas")))?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("unexpected 2d context type"))?;

        let animation = AnimationParams::default();
        let surface = CanvasSurface::new(
            context,
            f64::from(canvas.width()),
            f64::from(canvas.height()),
        );

        Ok(WebRenderer {
            mesh: Mesh::cube(animation.half_extent),
            state: AnimationState::default(),
            render_params: RenderParams::default(),
            animation,
            canvas,
            surface,
        })
    }

    /// Timer period the page should use, in milliseconds.
    pub fn tick_ms(&self) -> u32 {
        u32::try_from(self.animation.tick_interval.as_millis()).unwrap_or(u32::MAX)
    }

    /// Advance one animation tick.
    pub fn tick(&mut self) {
        self.state = self.state.tick(&self.animation);
    }

    /// Apply a key by `KeyboardEvent.code` or `.key`. Returns whether it was bound.
    pub fn key(&mut self, name: &str) -> bool {
        match Command::from_key_name(name) {
            Some(command) => {
                self.state = apply_command(command, self.state, &self.animation);
                debug!(?command, "key command");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Resize the backing canvas.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.surface.width = f64::from(width);
        self.surface.height = f64::from(height);
    }

    /// Draw one frame at the current rotation.
    pub fn render(&mut self) {
        #[allow(clippy::cast_possible_truncation)]
        let viewport = Viewport::new(self.surface.width as f32, self.surface.height as f32);
        render_frame(
            &mut self.surface,
            &self.mesh,
            &self.state.rotation,
            &viewport,
            &self.render_params,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(Rgba::BLACK), "rgb(0, 0, 0)");
        assert_eq!(
            css_color(Rgba::opaque(0, 255, 0).with_alpha(0)),
            "rgba(0, 255, 0, 0.000)"
        );
        assert_eq!(
            css_color(Rgba::opaque(255, 0, 0).with_alpha(51)),
            "rgba(255, 0, 0, 0.200)"
        );
    }
}
