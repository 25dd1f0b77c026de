//! Feature plugins.
//!
//! Each plugin is a collaborator of the simulation core in `crate::sim`: it either
//! pushes events into the bus or reads the published drawables.

use bevy::prelude::*;

pub mod core;
pub mod input;
pub mod presentation;
pub mod simulation;
pub mod spawner;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    simulation::plugin(app);
    input::plugin(app);
    spawner::plugin(app);
    presentation::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}
