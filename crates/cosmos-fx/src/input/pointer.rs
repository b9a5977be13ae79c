use glam::Vec2;

use crate::api::types::Viewport;

/// Last known pointer position.
///
/// Written straight from move handlers (last write wins, no queue) and read at
/// render time. `None` until the first sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    position: Option<Vec2>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample. Non-finite coordinates are ignored.
    pub fn set(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.position = Some(Vec2::new(x, y));
        }
    }

    pub fn clear(&mut self) {
        self.position = None;
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn is_present(&self) -> bool {
        self.position.is_some()
    }

    /// Parallax offset `((x - W/2)/W, (y - H/2)/H) * factor`.
    /// Zero when the pointer is absent or the viewport is empty.
    pub fn parallax(&self, viewport: Viewport, factor: f32) -> Vec2 {
        match self.position {
            Some(p) if !viewport.is_empty() => {
                (p - viewport.center()) / Vec2::new(viewport.width, viewport.height) * factor
            }
            _ => Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_pointer_has_no_parallax() {
        let p = PointerState::new();
        assert!(!p.is_present());
        assert_eq!(p.parallax(Viewport::new(800.0, 600.0), 8.0), Vec2::ZERO);
    }

    #[test]
    fn last_write_wins() {
        let mut p = PointerState::new();
        p.set(1.0, 2.0);
        p.set(3.0, 4.0);
        p.set(f32::NAN, 0.0);
        assert_eq!(p.position(), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn parallax_scales_from_center() {
        let mut p = PointerState::new();
        p.set(800.0, 0.0);
        let off = p.parallax(Viewport::new(800.0, 600.0), 8.0);
        assert!((off.x - 4.0).abs() < 1e-6);
        assert!((off.y + 4.0).abs() < 1e-6);
        assert_eq!(p.parallax(Viewport::new(0.0, 600.0), 8.0), Vec2::ZERO);
    }
}
