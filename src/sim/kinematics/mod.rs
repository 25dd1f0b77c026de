//! Kinematic record, animation phase and the behaviour variants that drive them.
//!
//! Everything here is plain data: `Copy` value types with no references into the
//! world. Entities own one `Movable` and one `Behaviour` each.

mod behaviour;

pub use behaviour::{Behaviour, BehaviourKind, EDGE_TOLERANCE};

use bevy::math::Vec2;

use super::math::{heading, normalized};

/// Forward axis used when no better direction is known (screen "up").
pub const DEFAULT_FORWARD: Vec2 = Vec2::new(0.0, -1.0);

/// Position/velocity plus an orthonormal forward/right frame.
///
/// Invariant: after `orthonormalize` the frame is unit length and `right` is
/// `forward` rotated by 90°. Writers may leave it dirty; `orthonormalize` runs
/// once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Movable {
    pub position: Vec2,
    pub velocity: Vec2,
    pub forward: Vec2,
    pub right: Vec2,
}

impl Default for Movable {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            forward: DEFAULT_FORWARD,
            right: DEFAULT_FORWARD.perp(),
        }
    }
}

impl Movable {
    pub fn new(position: Vec2, velocity: Vec2, facing: Vec2) -> Self {
        let mut m = Self {
            position,
            velocity,
            forward: facing,
            right: Vec2::ZERO,
        };
        m.orthonormalize();
        m
    }

    /// Semi-implicit step: position uses the old velocity.
    #[inline]
    pub fn integrate(&mut self, accel: Vec2, dt: f32) {
        self.position += self.velocity * dt;
        self.velocity += accel * dt;
    }

    /// Point `forward` along the velocity, if there is one.
    #[inline]
    pub fn align_to_velocity(&mut self) {
        if let Some(dir) = normalized(self.velocity) {
            self.forward = dir;
        }
    }

    pub fn orthonormalize(&mut self) {
        self.forward = normalized(self.forward).unwrap_or(DEFAULT_FORWARD);
        self.right = self.forward.perp();
    }

    /// On-screen rotation in radians, derived from `forward`.
    #[inline]
    pub fn rotation(&self) -> f32 {
        heading(self.forward)
    }
}

/// Sprite-sheet phase: `current_frame = floor(counter / interval) mod frame_count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Animation {
    pub frame_count: u32,
    pub interval: u32,
    pub current_frame: u32,
}

impl Animation {
    pub const STILL: Self = Self {
        frame_count: 1,
        interval: 1,
        current_frame: 0,
    };

    pub fn new(frame_count: u32, interval: u32) -> Self {
        Self {
            frame_count,
            interval,
            current_frame: 0,
        }
    }

    #[inline]
    pub fn is_animated(&self) -> bool {
        self.frame_count > 1
    }

    pub fn advance(&mut self, frame_counter: u64) {
        if self.interval == 0 || self.frame_count == 0 {
            self.current_frame = 0;
            return;
        }
        let phase = (frame_counter / u64::from(self.interval)) % u64::from(self.frame_count);
        self.current_frame = phase as u32;
    }
}
