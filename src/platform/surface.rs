//! Drawing surface adapter
//!
//! The engine only needs a fixed pixel size and a handful of primitive 2D
//! operations; board cell dimensions are derived from the pixel size.

/// Primitive 2D drawing operations over a fixed-size surface
pub trait DrawSurface {
    fn width_px(&self) -> u32;
    fn height_px(&self) -> u32;

    /// Fill the whole surface with a solid color (CSS color string)
    fn clear(&mut self, color: &str);
    /// Fill an axis-aligned rectangle
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
    /// Stroke an axis-aligned rectangle outline
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
    /// Fill a circle centered at (cx, cy)
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str);
}

/// HTML canvas 2D surface (wasm only)
#[cfg(target_arch = "wasm32")]
pub struct CanvasSurface {
    canvas: web_sys::HtmlCanvasElement,
    ctx: web_sys::CanvasRenderingContext2d,
}

#[cfg(target_arch = "wasm32")]
impl CanvasSurface {
    /// Wrap a canvas element. Fails when the 2d context is unobtainable,
    /// which the engine treats as a fatal construction error.
    pub fn new(canvas: web_sys::HtmlCanvasElement) -> anyhow::Result<Self> {
        use wasm_bindgen::JsCast;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<web_sys::CanvasRenderingContext2d>().ok())
            .ok_or_else(|| anyhow::anyhow!("canvas 2d context unavailable"))?;
        Ok(Self { canvas, ctx })
    }
}

#[cfg(target_arch = "wasm32")]
impl DrawSurface for CanvasSurface {
    fn width_px(&self) -> u32 {
        self.canvas.width()
    }

    fn height_px(&self) -> u32 {
        self.canvas.height()
    }

    fn clear(&mut self, color: &str) {
        self.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
            color,
        );
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.stroke_rect(x, y, w, h);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(cx, cy, radius, 0.0, std::f64::consts::TAU);
        self.ctx.fill();
    }
}

/// Recording surface for tests: remembers every call, draws nothing.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<String>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }
}

#[cfg(test)]
impl DrawSurface for RecordingSurface {
    fn width_px(&self) -> u32 {
        self.width
    }

    fn height_px(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: &str) {
        self.ops.push(format!("clear {color}"));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ops.push(format!("fill_rect {x} {y} {w} {h} {color}"));
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ops
            .push(format!("stroke_rect {x} {y} {w} {h} {color}"));
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) {
        self.ops
            .push(format!("fill_circle {cx} {cy} {radius} {color}"));
    }
}
