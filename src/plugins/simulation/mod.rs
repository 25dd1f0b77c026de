//! Simulation plugin: owns the `Simulation` resource and steps it once per frame.
//!
//! ```text
//! OnEnter(InGame): build SimWorld from Tunables + VisualRegistry -> insert Simulation
//! Update:
//!   SimSystems::Input    input / spawner push events into the bus
//!   SimSystems::Step     advance_simulation (variable dt) -> stats log
//!   SimSystems::Present  mirror drawables into sprites
//! ```

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::core::VisualRegistry;
use crate::sim::world::{SimWorld, Simulation};

/// Frame phases around the simulation step.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSystems {
    Input,
    Step,
    Present,
}

/// Throttle for the pool occupancy log.
#[derive(Resource, Debug)]
struct StatsLog {
    timer: Timer,
}

impl Default for StatsLog {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<StatsLog>();

    app.configure_sets(
        Update,
        (SimSystems::Input, SimSystems::Step, SimSystems::Present)
            .chain()
            .run_if(in_state(GameState::InGame))
            .run_if(resource_exists::<Simulation>),
    );

    app.add_systems(OnEnter(GameState::InGame), setup_simulation);
    app.add_systems(
        Update,
        (advance_simulation, log_stats).chain().in_set(SimSystems::Step),
    );
}

fn setup_simulation(mut commands: Commands, tunables: Res<Tunables>, registry: Res<VisualRegistry>) {
    let world = SimWorld::new(&tunables.player_config(), registry.catalog());
    let bounds = tunables.bounds();
    info!(
        "simulation ready: field {}x{}",
        bounds.width(),
        bounds.height()
    );
    commands.insert_resource(Simulation::new(world, bounds));
}

fn advance_simulation(time: Res<Time>, mut sim: ResMut<Simulation>) {
    sim.step(time.delta_secs());
}

fn log_stats(time: Res<Time>, mut log: ResMut<StatsLog>, sim: Res<Simulation>) {
    if !log.timer.tick(time.delta()).just_finished() {
        return;
    }
    let s = sim.world().stats();
    debug!(
        frame = sim.frame_count(),
        bullets = s.bullets_active,
        bullet_capacity = s.bullet_capacity,
        enemies = s.enemies_active,
        enemy_capacity = s.enemy_capacity,
        "pool occupancy"
    );
}
