use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::error::FxError;

/// Drawing area in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite in either dimension.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// `Err(EmptyViewport)` when [`is_empty`](Self::is_empty).
    pub fn validate(&self) -> Result<(), FxError> {
        if self.is_empty() {
            Err(FxError::EmptyViewport { width: self.width, height: self.height })
        } else {
            Ok(())
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Notification from an effect to its host, collected per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FxEvent {
    /// The galaxy core was hit and the explosion started.
    Supernova,
    /// The countdown reached a new step (0 = T-10).
    CountdownStep { step: u32 },
    /// Ignition: the launch sub-sequence started.
    Liftoff,
    /// The overlay began fading out. Host-drawn text should fade with it.
    FadeStarted,
    /// A one-shot sequence finished. Emitted at most once per effect instance.
    SequenceComplete,
}

impl FxEvent {
    /// Stable event name handed to the page script.
    pub fn name(&self) -> &'static str {
        match self {
            FxEvent::Supernova => "supernova",
            FxEvent::CountdownStep { .. } => "countdown-step",
            FxEvent::Liftoff => "liftoff",
            FxEvent::FadeStarted => "fade",
            FxEvent::SequenceComplete => "complete",
        }
    }

    /// Numeric payload, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            FxEvent::CountdownStep { step } => Some(*step as f64),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_viewports() {
        assert!(Viewport::new(0.0, 600.0).is_empty());
        assert!(Viewport::new(800.0, -1.0).is_empty());
        assert!(Viewport::new(f32::NAN, 600.0).is_empty());
        assert!(Viewport::default().is_empty());
        assert!(!Viewport::new(800.0, 600.0).is_empty());
        assert!(matches!(
            Viewport::new(0.0, 0.0).validate(),
            Err(FxError::EmptyViewport { .. })
        ));
    }

    #[test]
    fn geometry_helpers() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.center(), Vec2::new(400.0, 300.0));
        assert_eq!(vp.min_side(), 600.0);
        assert_eq!(vp.area(), 480_000.0);
    }

    #[test]
    fn event_names() {
        assert_eq!(FxEvent::SequenceComplete.name(), "complete");
        assert_eq!(FxEvent::CountdownStep { step: 3 }.value(), Some(3.0));
        assert_eq!(FxEvent::Liftoff.value(), None);
        assert_eq!(FxEvent::FadeStarted.name(), "fade");
        assert_eq!(FxEvent::FadeStarted.value(), None);
    }
}
