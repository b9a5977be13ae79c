//! Canvas 2D backend for the engine's `Surface` trait.

use std::f64::consts::TAU;

use cosmos_fx::{Color, Fill, FxError, Surface, Viewport};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::js_error;

pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    /// Acquire the 2D context of `canvas`.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, FxError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or(FxError::MissingContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FxError::MissingContext)?;
        Ok(Self { ctx })
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    fn gradient(&self, fill: &Fill) -> Option<CanvasGradient> {
        let (gradient, stops) = match fill {
            Fill::Solid(_) => return None,
            Fill::Radial { center, radius, gradient } => {
                let (x, y) = (center.x as f64, center.y as f64);
                let g = self
                    .ctx
                    .create_radial_gradient(x, y, 0.0, x, y, radius.max(0.0) as f64)
                    .ok()?;
                (g, gradient.stops())
            }
            Fill::Linear { from, to, gradient } => {
                let g = self.ctx.create_linear_gradient(
                    from.x as f64,
                    from.y as f64,
                    to.x as f64,
                    to.y as f64,
                );
                (g, gradient.stops())
            }
        };
        for stop in stops {
            if gradient
                .add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_css())
                .is_err()
            {
                return None;
            }
        }
        Some(gradient)
    }

    /// Returns false when the fill could not be applied.
    fn set_fill(&self, fill: &Fill) -> bool {
        match fill {
            Fill::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            _ => match self.gradient(fill) {
                Some(g) => self.ctx.set_fill_style_canvas_gradient(&g),
                None => {
                    log::debug!("gradient rejected by canvas; fill skipped");
                    return false;
                }
            },
        }
        true
    }

    fn set_stroke(&self, line_width: f32, color: Color) {
        self.ctx.set_line_width(line_width as f64);
        self.ctx.set_stroke_style_str(&color.to_css());
    }

    fn circle_path(&self, center: Vec2, radius: f32) -> bool {
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
    }

    fn polygon_path(&self, points: &[Vec2]) {
        self.ctx.begin_path();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            self.ctx.move_to(first.x as f64, first.y as f64);
        }
        for p in iter {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
    }
}

impl Surface for Canvas2dSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Fill) {
        if self.circle_path(center, radius) && self.set_fill(&fill) {
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color) {
        if self.circle_path(center, radius) {
            self.set_stroke(line_width, color);
            self.ctx.stroke();
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Color) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.set_stroke(line_width, color);
        self.ctx.stroke();
    }

    fn fill_polygon(&mut self, points: &[Vec2], fill: Fill) {
        if points.len() < 3 {
            return;
        }
        self.polygon_path(points);
        if self.set_fill(&fill) {
            self.ctx.fill();
        }
    }

    fn stroke_polygon(&mut self, points: &[Vec2], line_width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        self.polygon_path(points);
        self.set_stroke(line_width, color);
        self.ctx.stroke();
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        if self.ctx.translate(offset.x as f64, offset.y as f64).is_err() {
            log::debug!("canvas translate failed");
        }
    }

    fn scale(&mut self, factor: Vec2) {
        if self.ctx.scale(factor.x as f64, factor.y as f64).is_err() {
            log::debug!("canvas scale failed");
        }
    }

    fn rotate(&mut self, radians: f32) {
        if self.ctx.rotate(radians as f64).is_err() {
            log::debug!("canvas rotate failed");
        }
    }
}

/// Match the canvas backing store to its laid-out size and return that size.
pub fn fit_canvas(canvas: &HtmlCanvasElement) -> Viewport {
    let width = canvas.client_width().max(0) as u32;
    let height = canvas.client_height().max(0) as u32;
    if canvas.width() != width {
        canvas.set_width(width);
    }
    if canvas.height() != height {
        canvas.set_height(height);
    }
    Viewport::new(width as f32, height as f32)
}

/// Convert page coordinates into canvas pixels.
pub fn to_canvas(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        (client_x as f64 - rect.left()) as f32,
        (client_y as f64 - rect.top()) as f32,
    )
}
