use bevy::math::{Rect, Vec2};

use super::*;
use crate::sim::context::DrawableKind;
use crate::sim::entities::FireModeKind;
use crate::sim::events::{FireEvent, MoveEvent, SpawnEvent};
use crate::sim::kinematics::BehaviourKind;
use crate::sim::pool::SlotId;

fn bounds() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 600.0)
}

fn ctx(frame_count: u64) -> WorldContext {
    WorldContext {
        bounds: bounds(),
        frame_count,
    }
}

fn world() -> SimWorld {
    SimWorld::new(&PlayerConfig::default(), VisualCatalog::default())
}

fn fire(position: Vec2, velocity: Vec2, lifetime: f32) -> GameEvent {
    GameEvent::Fire(FireEvent {
        position,
        velocity,
        visual: VisualCatalog::default().bullet,
        size: FireEvent::DEFAULT_SIZE,
        lifetime,
        behaviour: Behaviour::Dasher,
    })
}

fn spawn(kind: BehaviourKind, position: Vec2, direction: Vec2) -> GameEvent {
    GameEvent::Spawn(SpawnEvent::enemy(kind, position, direction, &VisualCatalog::default()))
}

fn aim(right_stick: Vec2) -> GameEvent {
    GameEvent::Move(MoveEvent {
        left_stick: Vec2::ZERO,
        right_stick,
    })
}

// -----------------------------------------------------------------------------
// Event ordering
// -----------------------------------------------------------------------------

#[test]
fn fire_fire_release_leaves_only_the_second_bullet() {
    let mut w = world();
    w.push_event(fire(Vec2::new(10.0, 10.0), Vec2::ZERO, 1.0));
    w.push_event(fire(Vec2::new(20.0, 20.0), Vec2::ZERO, 1.0));
    w.push_event(GameEvent::Release(EntityHandle::Bullet(SlotId(0))));

    assert_eq!(w.drain_events(), 3);

    assert_eq!(w.bullets().active_count(), 1);
    let (id, b) = w.bullets().iter_active().next().expect("one bullet");
    assert_eq!(id, SlotId(1));
    assert_eq!(b.position(), Vec2::new(20.0, 20.0));
    assert!(w.bus().is_empty());
}

#[test]
fn stale_release_is_ignored() {
    let mut w = world();
    w.push_event(fire(Vec2::new(10.0, 10.0), Vec2::ZERO, 1.0));
    w.push_event(GameEvent::Release(EntityHandle::Bullet(SlotId(0))));
    w.push_event(GameEvent::Release(EntityHandle::Bullet(SlotId(0))));
    w.push_event(GameEvent::Release(EntityHandle::Enemy(SlotId(7))));
    w.drain_events();

    assert_eq!(w.bullets().active_count(), 0);
    assert_eq!(w.bullets().capacity(), 1);
    assert_eq!(w.enemies().capacity(), 0);
}

#[test]
fn queued_release_does_not_alias_a_recycled_neighbour() {
    let mut w = world();
    w.push_event(fire(Vec2::new(10.0, 10.0), Vec2::ZERO, 1.0));
    w.push_event(fire(Vec2::new(20.0, 20.0), Vec2::ZERO, 1.0));
    w.push_event(fire(Vec2::new(30.0, 30.0), Vec2::ZERO, 1.0));
    w.drain_events();

    // Release the middle slot; the last bullet must keep its handle.
    w.push_event(GameEvent::Release(EntityHandle::Bullet(SlotId(1))));
    w.push_event(GameEvent::Release(EntityHandle::Bullet(SlotId(2))));
    w.drain_events();

    let live: Vec<_> = w.bullets().iter_active().map(|(id, b)| (id, b.position())).collect();
    assert_eq!(live, vec![(SlotId(0), Vec2::new(10.0, 10.0))]);
}

#[test]
fn move_and_mode_switch_reach_the_player() {
    let mut w = world();
    w.push_event(aim(Vec2::X));
    w.push_event(GameEvent::SwitchMode(FireModeKind::Chaser));
    w.drain_events();

    assert_eq!(w.player().intent().right_stick, Vec2::X);
    assert_eq!(w.player().mode(), FireModeKind::Chaser);
}

// -----------------------------------------------------------------------------
// Ticks
// -----------------------------------------------------------------------------

#[test]
fn dasher_bullet_bounces_off_the_right_edge() {
    let mut w = world();
    w.push_event(fire(Vec2::new(790.0, 300.0), Vec2::new(100.0, 0.0), 5.0));
    w.tick(&ctx(1), 0.1);

    let (_, b) = w.bullets().iter_active().next().expect("bullet still live");
    assert!((b.position() - Vec2::new(800.0, 300.0)).length() < 1e-3);
    assert_eq!(b.velocity().x, -100.0);
}

#[test]
fn dasher_enemy_stays_in_the_field_at_low_frame_rates() {
    let mut w = world();
    w.push_event(spawn(BehaviourKind::Dasher, Vec2::new(794.0, 300.0), Vec2::X));

    let dt = 1.0 / 30.0;
    for f in 1..=60 {
        w.tick(&ctx(f), dt);
        let (_, e) = w.enemies().iter_active().next().expect("enemy still live");
        let p = e.position();
        assert!(
            p.x >= 0.0 && p.x <= 800.0 && p.y >= 0.0 && p.y <= 600.0,
            "left the field at frame {f}: {p:?}"
        );
        if f == 1 {
            // One 16.7-unit step overshoots the band; it must still turn back.
            assert!(e.body().movable.velocity.x < 0.0);
        }
    }
}

#[test]
fn tick_leaves_the_bus_empty() {
    let mut w = world();
    w.push_event(aim(Vec2::new(0.0, -1.0)));
    w.push_event(spawn(BehaviourKind::Dasher, Vec2::new(100.0, 100.0), Vec2::X));
    for f in 1..=20 {
        w.tick(&ctx(f), 0.02);
        assert!(w.bus().is_empty(), "bus not drained at frame {f}");
    }
    assert!(w.bullets().active_count() > 0);
}

#[test]
fn holding_aim_fires_rapid_pairs_on_cadence() {
    let mut w = world();
    w.push_event(aim(Vec2::new(0.0, -1.0)));

    w.tick(&ctx(1), 0.02);
    w.tick(&ctx(2), 0.02);
    assert_eq!(w.bullets().active_count(), 0);

    w.tick(&ctx(3), 0.02);
    assert_eq!(w.bullets().active_count(), 2);
    assert!((w.player().fire_mode().elapsed() - 0.01).abs() < 1e-5);
}

#[test]
fn expired_bullets_are_recycled_instead_of_reallocated() {
    let mut w = world();
    w.push_event(aim(Vec2::new(0.0, -1.0)));
    // Rapid bullets live 1 s; fire for 3 s so early slots get reused.
    for f in 1..=150 {
        w.tick(&ctx(f), 0.02);
    }
    let stats = w.stats();
    // ~20 batches/s * 2 bullets * 1 s lifetime bounds the live set.
    assert!(stats.bullets_active <= 44, "{stats:?}");
    assert!(stats.bullet_capacity <= 46, "pool kept growing: {stats:?}");
    assert!(stats.bullet_capacity >= stats.bullets_active);
}

#[test]
fn dead_entities_never_reach_the_drawable_list() {
    let mut w = world();
    // Short-lived bullet that expires during the first tick.
    w.push_event(fire(Vec2::new(100.0, 100.0), Vec2::ZERO, 0.01));
    w.tick(&ctx(1), 0.02);

    assert_eq!(w.bullets().active_count(), 0);
    assert!(w.drawables().iter().all(|d| d.kind != DrawableKind::Bullet));
}

#[test]
fn bullet_hits_damage_enemies_until_they_are_released() {
    let mut w = world();
    w.push_event(spawn(BehaviourKind::Dasher, Vec2::new(200.0, 200.0), Vec2::ZERO));
    w.tick(&ctx(1), 0.0);
    assert_eq!(w.enemies().active_count(), 1);

    for i in 0..10u64 {
        w.push_event(fire(Vec2::new(200.0, 200.0), Vec2::ZERO, 1.0));
        w.tick(&ctx(2 + i), 0.0);
    }

    assert_eq!(w.enemies().active_count(), 0, "10 hits of 1 damage should kill a 10 hp enemy");
    assert_eq!(w.bullets().active_count(), 0, "every bullet was spent on impact");
    assert!(w.drawables().iter().all(|d| d.kind != DrawableKind::Enemy));
}

#[test]
fn homing_bullet_curves_toward_the_nearest_enemy() {
    let mut w = world();
    w.push_event(spawn(BehaviourKind::Dasher, Vec2::new(600.0, 100.0), Vec2::ZERO));
    w.push_event(GameEvent::Fire(FireEvent {
        position: Vec2::new(400.0, 500.0),
        velocity: Vec2::new(0.0, -500.0),
        visual: VisualCatalog::default().bullet,
        size: FireEvent::DEFAULT_SIZE,
        lifetime: 3.0,
        behaviour: Behaviour::from_kind(BehaviourKind::Chaser),
    }));
    for f in 1..=10 {
        w.tick(&ctx(f), 0.016);
    }

    let (_, b) = w.bullets().iter_active().next().expect("bullet in flight");
    assert!(b.velocity().x > 0.0, "expected a turn toward +x, got {:?}", b.velocity());
}

#[test]
fn homing_bullet_flies_straight_without_targets() {
    let mut w = world();
    w.push_event(GameEvent::Fire(FireEvent {
        position: Vec2::new(400.0, 500.0),
        velocity: Vec2::new(0.0, -500.0),
        visual: VisualCatalog::default().bullet,
        size: FireEvent::DEFAULT_SIZE,
        lifetime: 3.0,
        behaviour: Behaviour::from_kind(BehaviourKind::Chaser),
    }));
    w.tick(&ctx(1), 0.016);

    let (_, b) = w.bullets().iter_active().next().expect("bullet in flight");
    assert_eq!(b.velocity(), Vec2::new(0.0, -500.0));
    assert!(b.position().is_finite());
}

#[test]
fn drawables_list_player_then_reticle_then_entities() {
    let mut w = world();
    w.push_event(aim(Vec2::new(0.0, -1.0)));
    w.push_event(spawn(BehaviourKind::Chaser, Vec2::new(100.0, 100.0), Vec2::X));
    w.tick(&ctx(1), 0.05);

    let kinds: Vec<_> = w.drawables().iter().map(|d| d.kind).collect();
    assert_eq!(kinds[0], DrawableKind::PlayerBody);
    assert_eq!(kinds[1], DrawableKind::Reticle);
    assert_eq!(kinds[2], DrawableKind::Enemy);
    assert_eq!(kinds.len(), 3 + w.bullets().active_count());
    assert!(kinds[3..].iter().all(|k| *k == DrawableKind::Bullet));
}

#[test]
fn reticle_is_hidden_until_the_player_aims() {
    let mut w = world();
    w.tick(&ctx(1), 0.016);
    assert_eq!(w.drawables().len(), 1);
    assert_eq!(w.drawables()[0].kind, DrawableKind::PlayerBody);
}

// -----------------------------------------------------------------------------
// Simulation loop
// -----------------------------------------------------------------------------

#[test]
fn simulation_counts_frames_and_publishes_each_step() {
    let mut sim = Simulation::new(world(), bounds());
    assert_eq!(sim.frame_count(), 0);

    let n = sim.step(0.016).len();
    assert_eq!(n, 1);
    sim.step(0.016);
    assert_eq!(sim.frame_count(), 2);
}

#[test]
fn simulation_drives_animation_from_its_frame_counter() {
    let mut sim = Simulation::new(world(), bounds());
    sim.world_mut()
        .push_event(spawn(BehaviourKind::Dasher, Vec2::new(300.0, 300.0), Vec2::ZERO));

    // Dasher: 2 frames, 30 ticks each.
    let mut frames = Vec::new();
    for _ in 0..60 {
        let drawables = sim.step(0.0);
        let enemy = drawables
            .iter()
            .find(|d| d.kind == DrawableKind::Enemy)
            .expect("enemy drawable");
        frames.push(enemy.frame);
    }
    assert_eq!(frames[0], 0);
    assert_eq!(frames[29], 1);
    assert_eq!(frames[59], 0);
}
