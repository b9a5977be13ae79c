pub mod starfield;
pub mod solar_system;
pub mod galaxy;
pub mod launch;
pub mod cursor_ship;

pub use starfield::{StarField, StarFieldConfig};
pub use solar_system::{OrbitScale, SolarSystem, SolarSystemConfig, TimeBase};
pub use galaxy::{Galaxy, GalaxyConfig, GalaxyPhase};
pub use launch::{LaunchConfig, LaunchSequence};
pub use cursor_ship::{CursorShip, CursorShipConfig};
