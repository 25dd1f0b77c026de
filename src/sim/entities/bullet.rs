use bevy::math::Vec2;

use super::Body;
use crate::sim::context::{Drawable, DrawableKind, WorldContext};
use crate::sim::events::FireEvent;
use crate::sim::kinematics::{Animation, Movable};
use crate::sim::math::in_bounds;
use crate::sim::pool::Poolable;

/// Pooled projectile. Dies when its lifetime runs out or it leaves the field.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    body: Body,
    lifetime: f32,
    damage: f32,
}

impl Bullet {
    pub const DAMAGE: f32 = 1.0;

    pub fn update(&mut self, ctx: &WorldContext, target: Option<&Movable>, dt: f32) {
        if !self.body.alive {
            return;
        }
        self.lifetime -= dt;
        self.body.step(ctx, target, dt);
        self.set_alive(ctx);
    }

    fn set_alive(&mut self, ctx: &WorldContext) {
        let in_play = in_bounds(&ctx.bounds, self.body.movable.position);
        let timed = self.lifetime > 0.0;
        self.body.alive = in_play && timed;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.body.alive
    }

    /// Spent on impact.
    #[inline]
    pub fn kill(&mut self) {
        self.body.alive = false;
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
    pub fn velocity(&self) -> Vec2 {
        self.body.movable.velocity
    }

    #[inline]
    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    #[inline]
    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn drawable(&self) -> Drawable {
        self.body.drawable(DrawableKind::Bullet)
    }
}

impl Poolable for Bullet {
    type Args = FireEvent;

    fn create(ev: FireEvent) -> Self {
        Self {
            body: Body::new(
                ev.position,
                ev.velocity,
                ev.behaviour,
                Animation::STILL,
                ev.visual,
                ev.size,
            ),
            lifetime: ev.lifetime,
            damage: Self::DAMAGE,
        }
    }

    fn rebuild(&mut self, ev: FireEvent) {
        let body = &mut self.body;
        body.movable = Movable::new(ev.position, ev.velocity, ev.velocity);
        body.behaviour = ev.behaviour;
        body.animation = Animation::STILL;
        body.visual = ev.visual;
        body.size = ev.size;
        body.alive = true;
        self.lifetime = ev.lifetime;
        self.damage = Self::DAMAGE;
    }
}
