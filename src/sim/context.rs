//! Per-tick inputs from collaborators, and the drawable list handed back.

use bevy::math::{Rect, Vec2};

use crate::sim::visuals::VisualId;

/// Read-only inputs for one tick. Passed by reference, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldContext {
    /// Axis-aligned play field; static for a session.
    pub bounds: Rect,
    /// Monotonic tick counter, used only for animation phase.
    pub frame_count: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawableKind {
    PlayerBody,
    Reticle,
    Enemy,
    Bullet,
}

/// One render instruction. Rebuilt every tick; collaborators only read it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drawable {
    pub kind: DrawableKind,
    pub position: Vec2,
    /// Radians from +x, derived from the entity's forward axis.
    pub rotation: f32,
    pub visual: VisualId,
    pub frame: u32,
    pub size: f32,
}
