use bevy::math::Vec2;

use super::Body;
use crate::sim::context::{Drawable, DrawableKind, WorldContext};
use crate::sim::events::SpawnEvent;
use crate::sim::kinematics::{Animation, Movable};
use crate::sim::pool::Poolable;

/// Pooled enemy. Lives until its health is spent.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    body: Body,
    health: f32,
}

impl Enemy {
    /// `target` is normally the player.
    pub fn update(&mut self, ctx: &WorldContext, target: Option<&Movable>, dt: f32) {
        if !self.body.alive {
            return;
        }
        self.body.step(ctx, target, dt);
        // Enemies never leave the field; bullets do and die there.
        let movable = &mut self.body.movable;
        movable.position = movable.position.clamp(ctx.bounds.min, ctx.bounds.max);
        self.set_alive();
    }

    pub fn take_damage(&mut self, amount: f32) {
        if !self.body.alive {
            return;
        }
        self.health -= amount;
        self.set_alive();
    }

    fn set_alive(&mut self) {
        self.body.alive = self.health > 0.0;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.body.alive
    }

    #[inline]
    pub fn body(&self) -> &Body {
        &self.body
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.movable.position
    }

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn drawable(&self) -> Drawable {
        self.body.drawable(DrawableKind::Enemy)
    }
}

impl Poolable for Enemy {
    type Args = SpawnEvent;

    fn create(ev: SpawnEvent) -> Self {
        let mut enemy = Self {
            body: Body::new(
                ev.position,
                ev.velocity,
                ev.behaviour,
                Animation::new(ev.frame_count, ev.frame_interval),
                ev.visual,
                ev.size,
            ),
            health: ev.health,
        };
        enemy.set_alive();
        enemy
    }

    fn rebuild(&mut self, ev: SpawnEvent) {
        let body = &mut self.body;
        body.movable = Movable::new(ev.position, ev.velocity, ev.velocity);
        body.behaviour = ev.behaviour;
        body.animation = Animation::new(ev.frame_count, ev.frame_interval);
        body.visual = ev.visual;
        body.size = ev.size;
        self.health = ev.health;
        self.set_alive();
    }
}
