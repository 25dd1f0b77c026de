//! Enemy spawner: the collaborator that feeds `Spawn` events to the simulation.
//!
//! Every `interval` seconds it picks the next point on a fixed ring of inset
//! corner positions, aims at the field centre and alternates Dasher / Chaser.
//! Nothing is pushed while the live enemy count is at the cap.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::simulation::SimSystems;
use crate::sim::events::{GameEvent, SpawnEvent};
use crate::sim::kinematics::BehaviourKind;
use crate::sim::visuals::VisualCatalog;
use crate::sim::world::Simulation;

/// Distance kept between a spawn point and the field edge.
const SPAWN_INSET: f32 = SpawnEvent::DEFAULT_SIZE;

#[derive(Resource, Debug, Clone)]
pub struct EnemySpawner {
    timer: Timer,
    max_alive: usize,
    next_point: usize,
    next_kind: BehaviourKind,
}

impl EnemySpawner {
    pub fn new(interval: f32, max_alive: usize) -> Self {
        Self {
            timer: Timer::from_seconds(interval.max(f32::EPSILON), TimerMode::Repeating),
            max_alive,
            next_point: 0,
            next_kind: BehaviourKind::Dasher,
        }
    }

    #[inline]
    pub fn max_alive(&self) -> usize {
        self.max_alive
    }

    /// Build the next spawn and advance both cycles.
    pub fn next_spawn(&mut self, bounds: Rect, visuals: &VisualCatalog) -> SpawnEvent {
        let points = spawn_points(bounds);
        let position = points[self.next_point % points.len()];
        let kind = self.next_kind;

        self.next_point = (self.next_point + 1) % points.len();
        self.next_kind = match kind {
            BehaviourKind::Dasher => BehaviourKind::Chaser,
            BehaviourKind::Chaser => BehaviourKind::Dasher,
        };

        SpawnEvent::enemy(kind, position, bounds.center() - position, visuals)
    }
}

/// Clockwise from top-left, inset from each corner (clamped for tiny fields).
fn spawn_points(bounds: Rect) -> [Vec2; 4] {
    let inset = Vec2::splat(SPAWN_INSET).min(bounds.half_size());
    let min = bounds.min + inset;
    let max = bounds.max - inset;
    [
        min,
        Vec2::new(max.x, min.y),
        max,
        Vec2::new(min.x, max.y),
    ]
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, init_spawner);
    app.add_systems(Update, spawn_enemies.in_set(SimSystems::Input));
}

fn init_spawner(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(EnemySpawner::new(
        tunables.enemy_spawn_interval,
        tunables.max_enemies,
    ));
}

fn spawn_enemies(time: Res<Time>, spawner: Option<ResMut<EnemySpawner>>, mut sim: ResMut<Simulation>) {
    let Some(mut spawner) = spawner else {
        return;
    };
    if !spawner.timer.tick(time.delta()).just_finished() {
        return;
    }

    let alive = sim.world().enemies().active_count();
    if alive >= spawner.max_alive {
        trace!("spawner at cap ({alive})");
        return;
    }

    let bounds = sim.bounds();
    let visuals = *sim.world().visuals();
    let spawn = spawner.next_spawn(bounds, &visuals);
    sim.world_mut().push_event(GameEvent::Spawn(spawn));
}

#[cfg(test)]
mod tests;
