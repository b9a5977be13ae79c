//! Immediate-mode 2D drawing surface.
//!
//! Effects render through this trait only. Implementations:
//! - [`RecordingSurface`](super::recorder::RecordingSurface): captures commands (tests, headless).
//! - `TessellatingSurface` (feature `vectors`): lyon triangles into a flat vertex buffer.
//! - `Canvas2dSurface` in `cosmos-web`: the browser Canvas 2D context.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from RGB u8 values (0-255) and a float alpha.
    pub fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Create a fully opaque color from RGB u8 values.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 1.0)
    }

    /// Same color with a replaced alpha (clamped to [0, 1]).
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// CSS `rgba(...)` string for canvas style properties.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({},{},{},{:.4})",
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            self.a.clamp(0.0, 1.0),
        )
    }

    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Near-black ink used by every effect on the light page background.
    pub const INK: Self = Self::new(10.0 / 255.0, 10.0 / 255.0, 15.0 / 255.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::INK
    }
}

/// One color stop of a gradient, `offset` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Fixed-capacity stop list so gradients stay `Copy` and never allocate per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    stops: [GradientStop; Gradient::MAX_STOPS],
    len: usize,
}

impl Gradient {
    pub const MAX_STOPS: usize = 4;

    /// Build from up to `MAX_STOPS` stops; extra stops are ignored.
    pub fn new(stops: &[GradientStop]) -> Self {
        let mut out = [GradientStop::new(0.0, Color::TRANSPARENT); Self::MAX_STOPS];
        let len = stops.len().min(Self::MAX_STOPS);
        out[..len].copy_from_slice(&stops[..len]);
        Self { stops: out, len }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops[..self.len]
    }

    /// Color at `t` by linear interpolation between neighbouring stops.
    pub fn sample(&self, t: f32) -> Color {
        let stops = self.stops();
        let Some(first) = stops.first() else {
            return Color::TRANSPARENT;
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = (b.offset - a.offset).max(f32::EPSILON);
                let k = (t - a.offset) / span;
                return Color::new(
                    a.color.r + (b.color.r - a.color.r) * k,
                    a.color.g + (b.color.g - a.color.g) * k,
                    a.color.b + (b.color.b - a.color.b) * k,
                    a.color.a + (b.color.a - a.color.a) * k,
                );
            }
        }
        stops[stops.len() - 1].color
    }
}

/// How a shape is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(Color),
    /// Concentric fade from `center` (t = 0) out to `radius` (t = 1).
    Radial { center: Vec2, radius: f32, gradient: Gradient },
    /// Fade along the segment `from` (t = 0) to `to` (t = 1).
    Linear { from: Vec2, to: Vec2, gradient: Gradient },
}

impl Fill {
    pub fn radial(center: Vec2, radius: f32, stops: &[GradientStop]) -> Self {
        Fill::Radial { center, radius, gradient: Gradient::new(stops) }
    }

    pub fn linear(from: Vec2, to: Vec2, stops: &[GradientStop]) -> Self {
        Fill::Linear { from, to, gradient: Gradient::new(stops) }
    }
}

impl From<Color> for Fill {
    fn from(color: Color) -> Self {
        Fill::Solid(color)
    }
}

/// Immediate-mode drawing contract.
///
/// Coordinates are in canvas pixels before the current transform. `save` and
/// `restore` bracket transform changes exactly like the Canvas 2D API.
pub trait Surface {
    /// Clear the whole drawing area.
    fn clear(&mut self, width: f32, height: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Fill);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color);

    fn line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Color);

    /// Fill a closed polygon. Fewer than three points draws nothing.
    fn fill_polygon(&mut self, points: &[Vec2], fill: Fill);

    /// Stroke a closed polygon outline.
    fn stroke_polygon(&mut self, points: &[Vec2], line_width: f32, color: Color);

    fn save(&mut self);

    fn restore(&mut self);

    fn translate(&mut self, offset: Vec2);

    fn scale(&mut self, factor: Vec2);

    fn rotate(&mut self, radians: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_string() {
        assert_eq!(Color::rgba8(10, 15, 30, 0.3).to_css(), "rgba(10,15,30,0.3000)");
        assert_eq!(Color::WHITE.with_alpha(2.0).to_css(), "rgba(255,255,255,1.0000)");
    }

    #[test]
    fn gradient_truncates_extra_stops() {
        let stop = GradientStop::new(0.0, Color::INK);
        let g = Gradient::new(&[stop; 6]);
        assert_eq!(g.stops().len(), Gradient::MAX_STOPS);
    }

    #[test]
    fn gradient_sample_interpolates() {
        let g = Gradient::new(&[
            GradientStop::new(0.0, Color::INK.with_alpha(0.8)),
            GradientStop::new(1.0, Color::INK.with_alpha(0.0)),
        ]);
        assert!((g.sample(0.5).a - 0.4).abs() < 1e-6);
        assert_eq!(g.sample(-1.0).a, 0.8);
        assert_eq!(g.sample(2.0).a, 0.0);
        assert_eq!(Gradient::new(&[]).sample(0.5), Color::TRANSPARENT);
    }

    #[test]
    fn color_deserializes_from_json() {
        let c: Color = serde_json::from_str(r#"{"r":1.0,"g":0.5,"b":0.0,"a":0.25}"#).unwrap();
        assert_eq!(c, Color::new(1.0, 0.5, 0.0, 0.25));
    }
}
