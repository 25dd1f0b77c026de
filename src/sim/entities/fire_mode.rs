//! Fire modes: cooldown-gated emission rules.
//!
//! Each mode accumulates `dt` into `elapsed`. Once `elapsed >= interval`
//! (`interval = distance / muzzle_velocity`, i.e. bullet spacing in flight), it
//! emits one batch of Fire events and subtracts a single interval. The overshoot
//! carries into the next frame so the cadence does not drift with frame rate.

use bevy::math::Vec2;

use crate::sim::events::{EventBus, FireEvent, GameEvent};
use crate::sim::kinematics::{Behaviour, BehaviourKind};
use crate::sim::math::rotated_deg;
use crate::sim::visuals::VisualId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FireModeKind {
    #[default]
    Rapid,
    Spread,
    Chaser,
}

impl FireModeKind {
    pub const ALL: [Self; 3] = [Self::Rapid, Self::Spread, Self::Chaser];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Mode-switch signals arrive as a raw index; anything out of range is `None`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Where bullets leave the ship.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Muzzle {
    pub position: Vec2,
    pub forward: Vec2,
    /// Distance from the ship's centre to the gun ports.
    pub reach: f32,
    pub visual: VisualId,
}

const SPREAD_ANGLES: [f32; 5] = [-14.0, -30.0, 15.0, 30.0, 0.0];

#[derive(Clone, Debug, PartialEq)]
pub struct FireMode {
    kind: FireModeKind,
    distance: f32,
    muzzle_velocity: f32,
    lifetime: f32,
    elapsed: f32,
    /// Chaser alternates gun ports each shot.
    left_port: bool,
}

impl FireMode {
    pub fn new(kind: FireModeKind) -> Self {
        let (distance, muzzle_velocity, lifetime) = match kind {
            FireModeKind::Rapid => (50.0, 1000.0, 1.0),
            FireModeKind::Spread => (100.0, 750.0, 0.4),
            FireModeKind::Chaser => (200.0, 500.0, 3.0),
        };
        Self {
            kind,
            distance,
            muzzle_velocity,
            lifetime,
            elapsed: 0.0,
            left_port: true,
        }
    }

    #[inline]
    pub fn kind(&self) -> FireModeKind {
        self.kind
    }

    #[inline]
    pub fn interval(&self) -> f32 {
        self.distance / self.muzzle_velocity
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Bullets per batch.
    pub fn batch_size(&self) -> usize {
        match self.kind {
            FireModeKind::Rapid => 2,
            FireModeKind::Spread => SPREAD_ANGLES.len(),
            FireModeKind::Chaser => 1,
        }
    }

    /// Advance the cooldown; `true` when a batch is due.
    pub fn cooldown(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval() {
            self.elapsed -= self.interval();
            return true;
        }
        false
    }

    /// Tick the cooldown and, if due, push this mode's batch onto `bus`.
    ///
    /// Returns the number of Fire events pushed.
    pub fn fire(&mut self, muzzle: &Muzzle, dt: f32, bus: &mut EventBus) -> usize {
        if !self.cooldown(dt) {
            return 0;
        }

        match self.kind {
            FireModeKind::Rapid => {
                let velocity = muzzle.forward * self.muzzle_velocity;
                for angle in [45.0, -45.0] {
                    let port = muzzle.position + rotated_deg(muzzle.forward, angle) * muzzle.reach;
                    bus.push(self.shot(muzzle, port, velocity, Behaviour::Dasher));
                }
            }
            FireModeKind::Spread => {
                let last = SPREAD_ANGLES.len() - 1;
                for (i, angle) in SPREAD_ANGLES.into_iter().enumerate() {
                    let dir = rotated_deg(muzzle.forward, angle);
                    // The centre barrel sits further back.
                    let reach = if i == last { muzzle.reach * 0.5 } else { muzzle.reach };
                    let port = muzzle.position + dir * reach;
                    bus.push(self.shot(muzzle, port, dir * self.muzzle_velocity, Behaviour::Dasher));
                }
            }
            FireModeKind::Chaser => {
                let angle = if self.left_port { 45.0 } else { -45.0 };
                let port = muzzle.position + rotated_deg(muzzle.forward, angle) * muzzle.reach;
                let velocity = muzzle.forward * self.muzzle_velocity;
                let homing = Behaviour::from_kind(BehaviourKind::Chaser);
                bus.push(self.shot(muzzle, port, velocity, homing));
                self.left_port = !self.left_port;
            }
        }

        self.batch_size()
    }

    fn shot(&self, muzzle: &Muzzle, position: Vec2, velocity: Vec2, behaviour: Behaviour) -> GameEvent {
        GameEvent::Fire(FireEvent {
            position,
            velocity,
            visual: muzzle.visual,
            size: FireEvent::DEFAULT_SIZE,
            lifetime: self.lifetime,
            behaviour,
        })
    }
}
