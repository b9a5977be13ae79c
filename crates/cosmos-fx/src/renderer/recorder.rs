//! Command-recording surface.
//!
//! Keeps every draw call as data. Used by the test suite and by headless
//! hosts that want to inspect or replay a frame.

use glam::Vec2;

use super::surface::{Color, Fill, Surface};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    FillCircle { center: Vec2, radius: f32, fill: Fill },
    StrokeCircle { center: Vec2, radius: f32, line_width: f32, color: Color },
    Line { from: Vec2, to: Vec2, line_width: f32, color: Color },
    FillPolygon { points: Vec<Vec2>, fill: Fill },
    StrokePolygon { points: Vec<Vec2>, line_width: f32, color: Color },
    Save,
    Restore,
    Translate(Vec2),
    Scale(Vec2),
    Rotate(f32),
}

/// Surface that stores commands instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    depth: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands (keep allocation).
    pub fn reset(&mut self) {
        self.commands.clear();
        self.depth = 0;
    }

    /// Current save/restore nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Solid and gradient filled circles, in draw order.
    pub fn filled_circles(&self) -> impl Iterator<Item = (Vec2, f32, &Fill)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillCircle { center, radius, fill } => Some((*center, *radius, fill)),
            _ => None,
        })
    }

    /// Line segments, in draw order.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, color, .. } => Some((*from, *to, *color)),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Fill) {
        self.commands.push(DrawCommand::FillCircle { center, radius, fill });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle { center, radius, line_width, color });
    }

    fn line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, line_width, color });
    }

    fn fill_polygon(&mut self, points: &[Vec2], fill: Fill) {
        if points.len() < 3 {
            return;
        }
        self.commands.push(DrawCommand::FillPolygon { points: points.to_vec(), fill });
    }

    fn stroke_polygon(&mut self, points: &[Vec2], line_width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::StrokePolygon { points: points.to_vec(), line_width, color });
    }

    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn scale(&mut self, factor: Vec2) {
        self.commands.push(DrawCommand::Scale(factor));
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate(radians));
    }
}
