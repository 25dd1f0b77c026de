use std::time::Duration;

use bevy::prelude::*;

use super::*;
use crate::common::test_utils::run_system_once;
use crate::plugins::core::VisualRegistry;
use crate::sim::world::SimWorld;

fn bounds() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 600.0)
}

fn world(spawner: EnemySpawner, dt: f32) -> World {
    let sim = SimWorld::new(&Tunables::default().player_config(), VisualRegistry::default().catalog());
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_secs_f32(dt));

    let mut world = World::new();
    world.insert_resource(Simulation::new(sim, bounds()));
    world.insert_resource(spawner);
    world.insert_resource(time);
    world
}

fn queued_spawns(world: &World) -> usize {
    let sim = world.resource::<Simulation>();
    sim.world()
        .bus()
        .iter()
        .filter(|e| matches!(e, GameEvent::Spawn(_)))
        .count()
}

#[test]
fn spawns_cycle_points_and_alternate_kinds() {
    let mut spawner = EnemySpawner::new(1.0, 10);
    let visuals = VisualCatalog::default();

    let spawns: Vec<SpawnEvent> = (0..5).map(|_| spawner.next_spawn(bounds(), &visuals)).collect();

    assert_eq!(spawns[0].position, Vec2::new(90.0, 90.0));
    assert_eq!(spawns[1].position, Vec2::new(710.0, 90.0));
    assert_eq!(spawns[2].position, Vec2::new(710.0, 510.0));
    assert_eq!(spawns[3].position, Vec2::new(90.0, 510.0));
    assert_eq!(spawns[4].position, spawns[0].position);

    assert_eq!(spawns[0].visual, visuals.dasher);
    assert_eq!(spawns[1].visual, visuals.chaser);
    assert_eq!(spawns[2].visual, visuals.dasher);
}

#[test]
fn spawns_head_toward_the_centre() {
    let mut spawner = EnemySpawner::new(1.0, 10);
    let s = spawner.next_spawn(bounds(), &VisualCatalog::default());
    let to_centre = (bounds().center() - s.position).normalize();
    assert!(s.velocity.normalize().dot(to_centre) > 0.999);
    assert!((s.velocity.length() - BehaviourKind::Dasher.speed()).abs() < 1e-2);
}

#[test]
fn spawn_points_stay_inside_tiny_fields() {
    let tiny = Rect::new(0.0, 0.0, 40.0, 40.0);
    for p in spawn_points(tiny) {
        assert!(tiny.contains(p), "{p:?} outside {tiny:?}");
    }
}

#[test]
fn waits_for_the_interval() {
    let mut world = world(EnemySpawner::new(1.0, 10), 0.4);
    run_system_once(&mut world, spawn_enemies);
    run_system_once(&mut world, spawn_enemies);
    assert_eq!(queued_spawns(&world), 0);

    run_system_once(&mut world, spawn_enemies);
    assert_eq!(queued_spawns(&world), 1);
}

#[test]
fn respects_the_live_enemy_cap() {
    let mut world = world(EnemySpawner::new(0.1, 2), 0.1);
    for _ in 0..5 {
        run_system_once(&mut world, spawn_enemies);
        world.resource_mut::<Simulation>().world_mut().drain_events();
    }
    assert_eq!(world.resource::<Simulation>().world().enemies().active_count(), 2);
}

#[test]
fn missing_spawner_is_a_no_op() {
    let mut world = world(EnemySpawner::new(0.1, 2), 0.1);
    world.remove_resource::<EnemySpawner>();
    run_system_once(&mut world, spawn_enemies);
    assert_eq!(queued_spawns(&world), 0);
}
