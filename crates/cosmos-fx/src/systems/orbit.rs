//! Periodic orbits for planets and their moons.
//!
//! Positions are a pure function of time: `angle(t) = angle0 + t * speed`,
//! where `t` is frames or milliseconds depending on the caller. Moons orbit the
//! parent's already-advanced position.

use std::f64::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::surface::{Color, Fill, GradientStop, Surface};

/// Extra drawing attached to a body, chosen by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoration {
    #[default]
    Plain,
    /// Foreshortened ring system.
    Ringed,
    /// Green surface patch.
    Continents,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orbit {
    /// Horizontal radius.
    pub radius: f32,
    /// Vertical radius as a fraction of `radius` (1.0 = circle).
    pub y_scale: f32,
    /// Angle at t = 0, radians.
    pub angle: f32,
    /// Radians per time unit.
    pub speed: f32,
}

impl Default for Orbit {
    fn default() -> Self {
        Self { radius: 100.0, y_scale: 1.0, angle: 0.0, speed: 0.01 }
    }
}

impl Orbit {
    pub fn new(radius: f32, speed: f32, angle: f32) -> Self {
        Self { radius, y_scale: 1.0, angle, speed }
    }

    pub fn with_y_scale(mut self, y_scale: f32) -> Self {
        self.y_scale = y_scale;
        self
    }

    /// Angle at time `t`, wrapped into [0, 2π).
    pub fn angle_at(&self, t: f64) -> f32 {
        (self.angle as f64 + t * self.speed as f64).rem_euclid(TAU) as f32
    }

    /// Offset from the orbit center at time `t`.
    pub fn offset_at(&self, t: f64) -> Vec2 {
        let a = self.angle_at(t);
        Vec2::new(a.cos() * self.radius, a.sin() * self.radius * self.y_scale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Moon {
    pub orbit: Orbit,
    pub size: f32,
}

impl Default for Moon {
    fn default() -> Self {
        Self { orbit: Orbit::new(16.0, 0.045, 0.0), size: 2.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitingBody {
    pub name: String,
    pub orbit: Orbit,
    pub size: f32,
    pub color: Color,
    /// Inner color of the halo; fades to transparent at `size * 2.5`.
    pub glow: Color,
    pub decoration: Decoration,
    pub moons: Vec<Moon>,
}

impl Default for OrbitingBody {
    fn default() -> Self {
        Self {
            name: String::new(),
            orbit: Orbit::default(),
            size: 5.0,
            color: Color::INK,
            glow: Color::INK.with_alpha(0.3),
            decoration: Decoration::Plain,
            moons: Vec::new(),
        }
    }
}

/// Colors and widths shared by every body in a system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitStyle {
    pub show_orbit: bool,
    pub orbit_color: Color,
    pub orbit_width: f32,
    pub moon_orbit_color: Color,
    pub moon_orbit_width: f32,
    pub moon_color: Color,
    pub continent_color: Color,
}

impl Default for OrbitStyle {
    fn default() -> Self {
        Self {
            show_orbit: true,
            orbit_color: Color::rgba8(240, 244, 255, 0.06),
            orbit_width: 1.0,
            moon_orbit_color: Color::rgba8(240, 244, 255, 0.08),
            moon_orbit_width: 0.5,
            moon_color: Color::rgba8(200, 210, 230, 0.85),
            continent_color: Color::rgba8(60, 160, 80, 0.7),
        }
    }
}

const GLOW_SCALE: f32 = 2.5;
const RING_Y_SCALE: f32 = 0.35;

impl OrbitingBody {
    pub fn position(&self, origin: Vec2, t: f64) -> Vec2 {
        origin + self.orbit.offset_at(t)
    }

    pub fn moon_positions(&self, origin: Vec2, t: f64) -> impl Iterator<Item = Vec2> + '_ {
        let center = self.position(origin, t);
        self.moons.iter().map(move |m| center + m.orbit.offset_at(t))
    }

    /// Orbit ring, glow, body, decoration, then each moon's ring and disc.
    pub fn render(&self, surface: &mut dyn Surface, origin: Vec2, t: f64, style: &OrbitStyle) {
        if style.show_orbit {
            stroke_ellipse(surface, origin, &self.orbit, style.orbit_width, style.orbit_color);
        }

        let pos = self.position(origin, t);
        let glow_r = self.size * GLOW_SCALE;
        surface.fill_circle(
            pos,
            glow_r,
            Fill::radial(
                pos,
                glow_r,
                &[
                    GradientStop::new(0.0, self.glow),
                    GradientStop::new(1.0, self.glow.with_alpha(0.0)),
                ],
            ),
        );

        surface.fill_circle(pos, self.size, self.color.into());

        match self.decoration {
            Decoration::Plain => {}
            Decoration::Ringed => {
                surface.save();
                surface.translate(pos);
                surface.scale(Vec2::new(1.0, RING_Y_SCALE));
                surface.stroke_circle(Vec2::ZERO, self.size * 2.4, 3.5, self.color.with_alpha(0.45));
                surface.stroke_circle(Vec2::ZERO, self.size * 2.0, 2.0, self.color.with_alpha(0.2));
                surface.restore();
            }
            Decoration::Continents => {
                surface.fill_circle(
                    pos + Vec2::new(-1.5, -1.0),
                    self.size * 0.55,
                    style.continent_color.into(),
                );
            }
        }

        for (moon, at) in self.moons.iter().zip(self.moon_positions(origin, t)) {
            surface.stroke_circle(pos, moon.orbit.radius, style.moon_orbit_width, style.moon_orbit_color);
            surface.fill_circle(at, moon.size, style.moon_color.into());
        }
    }
}

/// Stroke an orbit path. Circles go straight through; ellipses use a y-scale.
fn stroke_ellipse(surface: &mut dyn Surface, center: Vec2, orbit: &Orbit, width: f32, color: Color) {
    if orbit.y_scale == 1.0 {
        surface.stroke_circle(center, orbit.radius, width, color);
    } else {
        surface.save();
        surface.translate(center);
        surface.scale(Vec2::new(1.0, orbit.y_scale));
        surface.stroke_circle(Vec2::ZERO, orbit.radius, width, color);
        surface.restore();
    }
}

/// The six default planets with their moons.
pub fn default_planets() -> Vec<OrbitingBody> {
    fn planet(
        name: &str,
        radius: f32,
        size: f32,
        speed: f32,
        angle: f32,
        rgb: (u8, u8, u8),
        glow_alpha: f32,
    ) -> OrbitingBody {
        let color = Color::rgb8(rgb.0, rgb.1, rgb.2);
        OrbitingBody {
            name: name.to_string(),
            orbit: Orbit::new(radius, speed, angle),
            size,
            color,
            glow: color.with_alpha(glow_alpha),
            decoration: Decoration::Plain,
            moons: Vec::new(),
        }
    }

    let mut earth = planet("earth", 136.0, 7.0, 0.008, 4.2, (0x4a, 0x9e, 0xff), 0.4);
    earth.decoration = Decoration::Continents;
    earth.moons = vec![Moon { orbit: Orbit::new(16.0, 0.045, 0.0), size: 2.2 }];

    let mut jupiter = planet("jupiter", 228.0, 14.0, 0.003, 3.5, (0xc8, 0xa8, 0x78), 0.35);
    jupiter.moons = vec![
        Moon { orbit: Orbit::new(22.0, 0.04, 1.0), size: 2.5 },
        Moon { orbit: Orbit::new(30.0, 0.025, 3.0), size: 2.0 },
    ];

    let mut saturn = planet("saturn", 292.0, 12.0, 0.002, 0.4, (0xdc, 0xc8, 0x9a), 0.3);
    saturn.decoration = Decoration::Ringed;

    vec![
        planet("mercury", 60.0, 4.0, 0.018, 0.8, (0xb8, 0xbc, 0xc8), 0.4),
        planet("venus", 96.0, 6.5, 0.011, 2.1, (0xe8, 0xd5, 0xa3), 0.4),
        earth,
        planet("mars", 176.0, 5.5, 0.006, 1.0, (0xe0, 0x70, 0x50), 0.35),
        jupiter,
        saturn,
    ]
}
