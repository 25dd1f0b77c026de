//! Tunable gameplay constants.

use bevy::prelude::*;

use crate::sim::entities::PlayerConfig;
use crate::sim::kinematics::DEFAULT_FORWARD;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Logical field size in simulation units (y-down, origin top-left).
    pub world_size: Vec2,
    /// Fraction of each dimension kept clear between the window edge and the play field.
    pub boundary_margin: f32,
    pub player_speed: f32,
    pub player_size: f32,
    pub reticle_radius: f32,
    pub reticle_responsiveness: f32,
    /// Stick magnitudes below this read as zero.
    pub stick_deadzone: f32,
    /// Seconds between spawner waves.
    pub enemy_spawn_interval: f32,
    pub max_enemies: usize,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            world_size: Vec2::new(1280.0, 720.0),
            boundary_margin: 0.05,
            player_speed: 160.0,
            player_size: 72.0,
            reticle_radius: 150.0,
            reticle_responsiveness: 4.0,
            stick_deadzone: 0.2,
            enemy_spawn_interval: 2.0,
            max_enemies: 12,
        }
    }
}

impl Tunables {
    /// Play field: the world rectangle inset by `boundary_margin` on every side.
    pub fn bounds(&self) -> Rect {
        let inset = self.world_size * self.boundary_margin.clamp(0.0, 0.5);
        Rect::from_corners(inset, self.world_size - inset)
    }

    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            position: self.bounds().center(),
            facing: DEFAULT_FORWARD,
            speed: self.player_speed,
            size: self.player_size,
            reticle_radius: self.reticle_radius,
            reticle_responsiveness: self.reticle_responsiveness,
        }
    }
}
