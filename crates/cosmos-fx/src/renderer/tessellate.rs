//! Lyon-based tessellating surface.
//!
//! Implements [`Surface`] by turning every draw call into triangles in a flat
//! `[x, y, r, g, b, a]` vertex buffer, ready for a GPU vertex upload. The
//! current transform is applied on the CPU, so non-uniform scales (ring
//! systems) come out as true ellipses.
//!
//! Gradients have no per-vertex equivalent here: radial fills are drawn as
//! concentric discs sampled from the gradient, linear fills use the
//! gradient's midpoint color.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::{Affine2, Vec2};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use super::surface::{Color, Fill, Surface};

/// Segments used to approximate a circle.
const CIRCLE_SEGMENTS: usize = 32;
/// Concentric discs used to approximate a radial gradient.
const GRADIENT_RINGS: usize = 6;

/// Per-vertex data for tessellated output.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn at(x: f32, y: f32, color: Color) -> Self {
        Self { x, y, r: color.r, g: color.g, b: color.b, a: color.a }
    }
}

struct FillVertexCtor {
    color: Color,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

struct StrokeVertexCtor {
    color: Color,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

/// Surface that tessellates into a triangle-list vertex buffer.
pub struct TessellatingSurface {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    transform: Affine2,
    stack: Vec<Affine2>,
}

impl TessellatingSurface {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(16384 * VectorVertex::FLOATS),
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
        }
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Flat float buffer, `VectorVertex::FLOATS` per vertex.
    pub fn vertices(&self) -> &[f32] {
        &self.buffer
    }

    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(bytemuck::cast_slice(std::slice::from_ref(v)));
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Average linear scale of the current transform, for stroke widths.
    fn stroke_scale(&self) -> f32 {
        self.transform.matrix2.determinant().abs().sqrt()
    }

    fn circle_points(&self, center: Vec2, radius: f32) -> Vec<Vec2> {
        (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let a = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
                self.transform
                    .transform_point2(center + Vec2::new(a.cos(), a.sin()) * radius)
            })
            .collect()
    }

    fn transformed(&self, points: &[Vec2]) -> Vec<Vec2> {
        points.iter().map(|p| self.transform.transform_point2(*p)).collect()
    }

    fn build_path(points: &[Vec2], closed: bool) -> Path {
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        if closed {
            builder.close();
        } else {
            builder.end(false);
        }
        builder.build()
    }

    /// Fill already-transformed points.
    fn fill_points(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 || color.a <= 0.0 {
            return;
        }
        let path = Self::build_path(points, true);
        let result = self.fill_tess.tessellate_path(
            &path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }

    /// Stroke already-transformed points.
    fn stroke_points(&mut self, points: &[Vec2], closed: bool, line_width: f32, color: Color) {
        if points.len() < 2 || line_width <= 0.0 || color.a <= 0.0 {
            return;
        }
        let path = Self::build_path(points, closed);
        let width = line_width * self.stroke_scale();
        let result = self.stroke_tess.tessellate_path(
            &path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }
}

impl Default for TessellatingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TessellatingSurface {
    fn clear(&mut self, _width: f32, _height: f32) {
        self.buffer.clear();
        self.transform = Affine2::IDENTITY;
        self.stack.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Fill) {
        if radius <= 0.0 {
            return;
        }
        match fill {
            Fill::Solid(color) => {
                let pts = self.circle_points(center, radius);
                self.fill_points(&pts, color);
            }
            Fill::Radial { center: g_center, radius: g_radius, gradient } => {
                // Outermost ring first so inner rings paint over it.
                for k in (1..=GRADIENT_RINGS).rev() {
                    let r = radius * k as f32 / GRADIENT_RINGS as f32;
                    let t = if g_radius > 0.0 {
                        ((center.distance(g_center) + r) / g_radius).min(1.0)
                    } else {
                        1.0
                    };
                    let pts = self.circle_points(center, r);
                    self.fill_points(&pts, gradient.sample(t));
                }
            }
            Fill::Linear { gradient, .. } => {
                let pts = self.circle_points(center, radius);
                self.fill_points(&pts, gradient.sample(0.5));
            }
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let pts = self.circle_points(center, radius);
        self.stroke_points(&pts, true, line_width, color);
    }

    fn line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Color) {
        let pts = self.transformed(&[from, to]);
        self.stroke_points(&pts, false, line_width, color);
    }

    fn fill_polygon(&mut self, points: &[Vec2], fill: Fill) {
        let color = match fill {
            Fill::Solid(color) => color,
            Fill::Radial { gradient, .. } | Fill::Linear { gradient, .. } => gradient.sample(0.5),
        };
        let pts = self.transformed(points);
        self.fill_points(&pts, color);
    }

    fn stroke_polygon(&mut self, points: &[Vec2], line_width: f32, color: Color) {
        let pts = self.transformed(points);
        self.stroke_points(&pts, true, line_width, color);
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn scale(&mut self, factor: Vec2) {
        self.transform = self.transform * Affine2::from_scale(factor);
    }

    fn rotate(&mut self, radians: f32) {
        self.transform = self.transform * Affine2::from_angle(radians);
    }
}
