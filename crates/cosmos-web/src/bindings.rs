//! JS classes for the bundled effects.

use wasm_bindgen::prelude::*;

crate::export_effect!(StarField, cosmos_fx::StarField, "star-field");
crate::export_effect!(SolarSystem, cosmos_fx::SolarSystem, "solar-system");
crate::export_effect!(
    Orrery,
    cosmos_fx::SolarSystem,
    "orrery",
    default = cosmos_fx::SolarSystem::orrery()
);
crate::export_effect!(Galaxy, cosmos_fx::Galaxy, "galaxy");
crate::export_effect!(LaunchSequence, cosmos_fx::LaunchSequence, "launch");
crate::export_effect!(CursorShip, cosmos_fx::CursorShip, "cursor-ship");
