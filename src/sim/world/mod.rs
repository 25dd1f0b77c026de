//! World orchestration and the frame-stepped simulation loop.
//!
//! # Tick order
//! ```text
//!  (1) drain bus         Move / SwitchMode / Spawn queued by collaborators
//!  (2) player.update     body, heading, reticle lag
//!  (3) player.fire       fire mode cooldown -> Fire events (bus)
//!  (4) drain bus         Fire -> bullet pool, Spawn -> enemy pool, Release -> free
//!  (5) integrate         enemies (target: player), bullets (target: nearest enemy
//!                        for homing rounds), then bullet/enemy hits
//!  (6) reap              one Release event per dead entity, then drain again
//!  (7) publish           player body, reticle, enemies, bullets -> drawables
//! ```
//!
//! The bus is empty when a tick returns. Release events are the only way a slot
//! is freed; there is no second sweep over the pools, so nothing is released twice.

use bevy::log::trace;
use bevy::math::{Rect, Vec2};
use bevy::prelude::Resource;

use crate::sim::context::{Drawable, WorldContext};
use crate::sim::entities::{Bullet, Enemy, Player, PlayerConfig};
use crate::sim::events::{EntityHandle, EventBus, GameEvent};
use crate::sim::kinematics::{Behaviour, Movable};
use crate::sim::pool::Pool;
use crate::sim::visuals::VisualCatalog;

/// Pool occupancy, for diagnostics only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    pub bullets_active: usize,
    pub bullet_capacity: usize,
    pub enemies_active: usize,
    pub enemy_capacity: usize,
}

/// Owns the player, both pools and the bus. Single writer of pool contents.
#[derive(Debug)]
pub struct SimWorld {
    player: Player,
    bullets: Pool<Bullet>,
    enemies: Pool<Enemy>,
    bus: EventBus,
    visuals: VisualCatalog,
    drawables: Vec<Drawable>,
}

impl SimWorld {
    pub fn new(player: &PlayerConfig, visuals: VisualCatalog) -> Self {
        Self {
            player: Player::new(player, &visuals),
            bullets: Pool::new("bullet"),
            enemies: Pool::new("enemy"),
            bus: EventBus::new(),
            visuals,
            drawables: Vec::new(),
        }
    }

    /// Queue an event for the next drain.
    #[inline]
    pub fn push_event(&mut self, event: GameEvent) {
        self.bus.push(event);
    }

    #[inline]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn bullets(&self) -> &Pool<Bullet> {
        &self.bullets
    }

    #[inline]
    pub fn enemies(&self) -> &Pool<Enemy> {
        &self.enemies
    }

    #[inline]
    pub fn visuals(&self) -> &VisualCatalog {
        &self.visuals
    }

    /// Last published drawable list.
    #[inline]
    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    pub fn stats(&self) -> SimStats {
        SimStats {
            bullets_active: self.bullets.active_count(),
            bullet_capacity: self.bullets.capacity(),
            enemies_active: self.enemies.active_count(),
            enemy_capacity: self.enemies.capacity(),
        }
    }

    pub fn tick(&mut self, ctx: &WorldContext, dt: f32) {
        self.drain_events();

        self.player.update(ctx, dt);
        if self.player.trigger_held() {
            self.player.fire(dt, &mut self.bus);
        }

        self.drain_events();

        self.integrate(ctx, dt);
        self.resolve_hits();

        self.reap();
        self.drain_events();

        self.publish();
    }

    /// Apply every queued event, including any queued while applying.
    pub fn drain_events(&mut self) -> usize {
        let Self {
            bus,
            player,
            bullets,
            enemies,
            ..
        } = self;

        bus.drain_all(|event, _bus| match event {
            GameEvent::Move(intent) => player.set_intent(intent),
            GameEvent::SwitchMode(mode) => player.set_mode(mode),
            GameEvent::Fire(fire) => {
                bullets.acquire(fire);
            }
            GameEvent::Spawn(spawn) => {
                enemies.acquire(spawn);
            }
            GameEvent::Release(EntityHandle::Bullet(id)) => {
                if !bullets.release(id) {
                    trace!("stale bullet handle {id:?}");
                }
            }
            GameEvent::Release(EntityHandle::Enemy(id)) => {
                if !enemies.release(id) {
                    trace!("stale enemy handle {id:?}");
                }
            }
        })
    }

    fn integrate(&mut self, ctx: &WorldContext, dt: f32) {
        let player = self.player.movable();
        for (_, enemy) in self.enemies.iter_active_mut() {
            enemy.update(ctx, Some(player), dt);
        }

        let enemies = &self.enemies;
        for (_, bullet) in self.bullets.iter_active_mut() {
            let target = match bullet.body().behaviour {
                Behaviour::Chaser { .. } => nearest_enemy(enemies, bullet.position()),
                Behaviour::Dasher => None,
            };
            bullet.update(ctx, target, dt);
        }
    }

    /// A bullet is spent on the first live enemy it overlaps.
    fn resolve_hits(&mut self) {
        if self.enemies.active_count() == 0 {
            return;
        }

        for (_, bullet) in self.bullets.iter_active_mut() {
            if !bullet.is_alive() {
                continue;
            }
            let hit = self
                .enemies
                .iter_active_mut()
                .map(|(_, e)| e)
                .find(|e| e.is_alive() && bullet.body().overlaps(e.body()));

            if let Some(enemy) = hit {
                enemy.take_damage(bullet.damage());
                bullet.kill();
            }
        }
    }

    fn reap(&mut self) {
        let dead_bullets = self
            .bullets
            .iter_active()
            .filter(|(_, b)| !b.is_alive())
            .map(|(id, _)| GameEvent::Release(EntityHandle::Bullet(id)));
        self.bus.extend(dead_bullets);

        let dead_enemies = self
            .enemies
            .iter_active()
            .filter(|(_, e)| !e.is_alive())
            .map(|(id, _)| GameEvent::Release(EntityHandle::Enemy(id)));
        self.bus.extend(dead_enemies);
    }

    fn publish(&mut self) {
        self.drawables.clear();
        self.drawables.push(self.player.body_drawable());
        if self.player.reticle().is_active() {
            self.drawables.push(self.player.reticle_drawable());
        }

        let enemies = self.enemies.iter_active().map(|(_, e)| e).filter(|e| e.is_alive());
        self.drawables.extend(enemies.map(Enemy::drawable));

        let bullets = self.bullets.iter_active().map(|(_, b)| b).filter(|b| b.is_alive());
        self.drawables.extend(bullets.map(Bullet::drawable));
    }
}

fn nearest_enemy(enemies: &Pool<Enemy>, from: Vec2) -> Option<&Movable> {
    enemies
        .iter_active()
        .map(|(_, e)| e)
        .filter(|e| e.is_alive())
        .min_by(|a, b| {
            let da = a.position().distance_squared(from);
            let db = b.position().distance_squared(from);
            da.total_cmp(&db)
        })
        .map(|e| &e.body().movable)
}

/// The frame-stepped loop: owns the world, the bounds and the frame counter.
#[derive(Resource, Debug)]
pub struct Simulation {
    world: SimWorld,
    bounds: Rect,
    frame_count: u64,
}

impl Simulation {
    pub fn new(world: SimWorld, bounds: Rect) -> Self {
        Self {
            world,
            bounds,
            frame_count: 0,
        }
    }

    /// Advance one frame by `dt` seconds and return the fresh drawable list.
    pub fn step(&mut self, dt: f32) -> &[Drawable] {
        self.frame_count += 1;
        let ctx = WorldContext {
            bounds: self.bounds,
            frame_count: self.frame_count,
        };
        self.world.tick(&ctx, dt);
        self.world.drawables()
    }

    #[inline]
    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut SimWorld {
        &mut self.world
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests;
