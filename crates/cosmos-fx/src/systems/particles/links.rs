//! Constellation lines between stars near the pointer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::surface::{Color, Surface};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Only stars closer than this to the pointer take part.
    pub connect_radius: f32,
    /// Pairs closer than this are linked.
    pub max_distance: f32,
    /// Alpha of a zero-length link.
    pub base_alpha: f32,
    pub line_width: f32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            connect_radius: 200.0,
            max_distance: 100.0,
            base_alpha: 0.3,
            line_width: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    pub alpha: f32,
}

/// `(1 - distance / max_distance) * base_alpha`, never negative.
pub fn link_alpha(distance: f32, max_distance: f32, base_alpha: f32) -> f32 {
    if max_distance <= 0.0 {
        return 0.0;
    }
    ((1.0 - distance / max_distance) * base_alpha).max(0.0)
}

/// Every pair among the points near `pointer` that lies within `max_distance`.
pub fn proximity_links(
    points: impl IntoIterator<Item = Vec2>,
    pointer: Vec2,
    config: &LinkConfig,
) -> Vec<Link> {
    let near: Vec<Vec2> = points
        .into_iter()
        .filter(|p| p.distance(pointer) < config.connect_radius)
        .collect();

    let mut links = Vec::new();
    for (i, a) in near.iter().enumerate() {
        for b in &near[i + 1..] {
            let d = a.distance(*b);
            if d < config.max_distance {
                links.push(Link {
                    from: *a,
                    to: *b,
                    alpha: link_alpha(d, config.max_distance, config.base_alpha),
                });
            }
        }
    }
    links
}

pub fn render_links(links: &[Link], surface: &mut dyn Surface, color: Color, line_width: f32) {
    for link in links {
        surface.line(link.from, link.to, line_width, color.with_alpha(link.alpha));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn alpha_endpoints() {
        assert_eq!(link_alpha(100.0, 100.0, 0.3), 0.0);
        assert_relative_eq!(link_alpha(0.0, 100.0, 0.3), 0.3);
        assert_eq!(link_alpha(150.0, 100.0, 0.3), 0.0);
        assert_eq!(link_alpha(10.0, 0.0, 0.3), 0.0);
    }

    #[test]
    fn only_points_near_pointer_link() {
        let config = LinkConfig::default();
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(900.0, 0.0),
            Vec2::new(950.0, 0.0),
        ];
        let links = proximity_links(points, Vec2::ZERO, &config);
        assert_eq!(links.len(), 1);
        assert_relative_eq!(links[0].alpha, 0.15);
    }

    #[test]
    fn distance_threshold_is_strict() {
        let config = LinkConfig::default();
        let links = proximity_links([Vec2::ZERO, Vec2::new(100.0, 0.0)], Vec2::ZERO, &config);
        assert!(links.is_empty());
    }

    proptest! {
        #[test]
        fn alpha_bounded_by_base(d in 0.0f32..500.0, max in 1.0f32..300.0, base in 0.0f32..1.0) {
            let a = link_alpha(d, max, base);
            prop_assert!(a >= 0.0);
            prop_assert!(a <= base + 1e-6);
        }
    }
}
