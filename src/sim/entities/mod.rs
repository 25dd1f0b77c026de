//! Entities: player, bullets and enemies.
//!
//! Bullets and enemies share a [`Body`]: kinematics, a behaviour copy, animation
//! phase and the alive flag. The per-tick state machine lives in [`Body::step`]:
//!
//! ```text
//!   animate (if animated) -> integrate -> edge response -> re-orthonormalize
//! ```
//!
//! Liveness is decided by each entity type right after the step. `alive = false`
//! is one-way until the pool rebuilds the slot; dead bodies are never stepped.

mod bullet;
mod enemy;
mod fire_mode;
mod player;

pub use bullet::Bullet;
pub use enemy::Enemy;
pub use fire_mode::{FireMode, FireModeKind, Muzzle};
pub use player::{Player, PlayerConfig, Reticle};

use bevy::math::Vec2;

use crate::sim::context::{Drawable, DrawableKind, WorldContext};
use crate::sim::kinematics::{Animation, Behaviour, Movable};
use crate::sim::visuals::VisualId;

/// State shared by every pooled entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub movable: Movable,
    pub behaviour: Behaviour,
    pub animation: Animation,
    pub visual: VisualId,
    pub size: f32,
    pub alive: bool,
}

impl Body {
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        behaviour: Behaviour,
        animation: Animation,
        visual: VisualId,
        size: f32,
    ) -> Self {
        Self {
            movable: Movable::new(position, velocity, velocity),
            behaviour,
            animation,
            visual,
            size,
            alive: true,
        }
    }

    /// One tick of the shared kinematic update.
    pub fn step(&mut self, ctx: &WorldContext, target: Option<&Movable>, dt: f32) {
        if !self.alive {
            return;
        }

        if self.animation.is_animated() {
            self.animation.advance(ctx.frame_count);
        }

        let accel = self.behaviour.accel(&self.movable, target);
        self.movable.integrate(accel, dt);
        self.movable.velocity =
            self.behaviour
                .bound_velocity(&ctx.bounds, self.movable.position, self.movable.velocity);

        self.movable.align_to_velocity();
        self.movable.orthonormalize();
    }

    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        let reach = 0.5 * (self.size + other.size);
        self.movable.position.distance_squared(other.movable.position) < reach * reach
    }

    pub fn drawable(&self, kind: DrawableKind) -> Drawable {
        Drawable {
            kind,
            position: self.movable.position,
            rotation: self.movable.rotation(),
            visual: self.visual,
            frame: self.animation.current_frame,
            size: self.size,
        }
    }
}
