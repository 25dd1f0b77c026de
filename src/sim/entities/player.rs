//! The player ship and its aim reticle.
//!
//! Not pooled: built once at startup. Left stick drives the body, right stick
//! turns it and pulls the reticle; holding the right stick is the trigger.

use bevy::math::Vec2;

use super::fire_mode::{FireMode, FireModeKind, Muzzle};
use crate::sim::context::{Drawable, DrawableKind, WorldContext};
use crate::sim::events::{EventBus, MoveEvent};
use crate::sim::kinematics::{DEFAULT_FORWARD, Movable};
use crate::sim::math::{approx_eq, in_bounds, normalized};
use crate::sim::visuals::{VisualCatalog, VisualId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerConfig {
    pub position: Vec2,
    pub facing: Vec2,
    /// Body speed at full stick deflection.
    pub speed: f32,
    pub size: f32,
    pub reticle_radius: f32,
    pub reticle_responsiveness: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            position: Vec2::new(400.0, 300.0),
            facing: DEFAULT_FORWARD,
            speed: 160.0,
            size: 72.0,
            reticle_radius: 150.0,
            reticle_responsiveness: 4.0,
        }
    }
}

/// Aim reticle that trails the ship's heading.
#[derive(Clone, Debug, PartialEq)]
pub struct Reticle {
    pub offset: Vec2,
    radius: f32,
    responsiveness: f32,
    active: bool,
    hide_in: f32,
}

impl Reticle {
    /// Seconds the reticle lingers after the stick is released.
    pub const LINGER: f32 = 3.0;
    /// How close to rest (in units of offset length) counts as settled.
    const SETTLED: f32 = 2.0;

    fn new(radius: f32, responsiveness: f32, forward: Vec2) -> Self {
        Self {
            offset: forward * radius,
            radius,
            responsiveness,
            active: false,
            hide_in: Self::LINGER,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn update(&mut self, aim_stick: Vec2, forward: Vec2, dt: f32) {
        let aim = normalized(aim_stick).unwrap_or(Vec2::ZERO);

        // Lag: the reticle swings less across the heading than along it.
        let parallel = forward * aim.dot(forward);
        let across = aim - parallel;
        let target = (0.5 * parallel + 0.4 * across + forward) * self.radius;
        let blend = (self.responsiveness * dt).min(1.0);
        self.offset += (target - self.offset) * blend;

        if aim_stick.length_squared() > 0.0 {
            self.active = true;
            self.hide_in = Self::LINGER;
            return;
        }

        let settled = approx_eq(self.offset.length(), self.radius, Self::SETTLED);
        if self.active && settled {
            self.hide_in -= dt;
            if self.hide_in <= 0.0 {
                self.active = false;
                self.hide_in = Self::LINGER;
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    movable: Movable,
    speed: f32,
    size: f32,
    visual: VisualId,
    reticle_visual: VisualId,
    bullet_visual: VisualId,
    intent: MoveEvent,
    reticle: Reticle,
    modes: [FireMode; 3],
    mode: FireModeKind,
}

impl Player {
    pub fn new(config: &PlayerConfig, visuals: &VisualCatalog) -> Self {
        let movable = Movable::new(config.position, Vec2::ZERO, config.facing);
        Self {
            reticle: Reticle::new(config.reticle_radius, config.reticle_responsiveness, movable.forward),
            movable,
            speed: config.speed,
            size: config.size,
            visual: visuals.player,
            reticle_visual: visuals.reticle,
            bullet_visual: visuals.bullet,
            intent: MoveEvent::default(),
            modes: FireModeKind::ALL.map(FireMode::new),
            mode: FireModeKind::default(),
        }
    }

    pub fn set_intent(&mut self, intent: MoveEvent) {
        self.intent = intent;
    }

    #[inline]
    pub fn intent(&self) -> MoveEvent {
        self.intent
    }

    pub fn set_mode(&mut self, mode: FireModeKind) {
        self.mode = mode;
    }

    #[inline]
    pub fn mode(&self) -> FireModeKind {
        self.mode
    }

    #[inline]
    pub fn fire_mode(&self) -> &FireMode {
        &self.modes[self.mode.index()]
    }

    #[inline]
    pub fn movable(&self) -> &Movable {
        &self.movable
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.movable.position
    }

    #[inline]
    pub fn forward(&self) -> Vec2 {
        self.movable.forward
    }

    #[inline]
    pub fn reticle(&self) -> &Reticle {
        &self.reticle
    }

    #[inline]
    pub fn reticle_position(&self) -> Vec2 {
        self.movable.position + self.reticle.offset
    }

    /// Aiming is firing.
    #[inline]
    pub fn trigger_held(&self) -> bool {
        self.intent.right_stick.length_squared() > 0.0
    }

    pub fn update(&mut self, ctx: &WorldContext, dt: f32) {
        self.update_body(ctx, dt);
        self.reticle.update(self.intent.right_stick, self.movable.forward, dt);
    }

    fn update_body(&mut self, ctx: &WorldContext, dt: f32) {
        if let Some(aim) = normalized(self.intent.right_stick) {
            self.movable.forward = aim;
        }
        self.movable.velocity = normalized(self.intent.left_stick).unwrap_or(Vec2::ZERO) * self.speed;

        // Moves that would leave the field are dropped, not clamped.
        let next = self.movable.position + self.movable.velocity * dt;
        if in_bounds(&ctx.bounds, next) {
            self.movable.position = next;
        }

        self.movable.orthonormalize();
    }

    /// Run the active fire mode; returns the number of bullets queued.
    pub fn fire(&mut self, dt: f32, bus: &mut EventBus) -> usize {
        let muzzle = Muzzle {
            position: self.movable.position,
            forward: self.movable.forward,
            reach: self.size,
            visual: self.bullet_visual,
        };
        self.modes[self.mode.index()].fire(&muzzle, dt, bus)
    }

    pub fn body_drawable(&self) -> Drawable {
        Drawable {
            kind: DrawableKind::PlayerBody,
            position: self.movable.position,
            rotation: self.movable.rotation(),
            visual: self.visual,
            frame: 0,
            size: self.size,
        }
    }

    pub fn reticle_drawable(&self) -> Drawable {
        Drawable {
            kind: DrawableKind::Reticle,
            position: self.reticle_position(),
            rotation: self.movable.rotation(),
            visual: self.reticle_visual,
            frame: 0,
            size: self.size * 0.5,
        }
    }
}
