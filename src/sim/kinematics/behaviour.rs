//! Behaviour variants: a closed set of acceleration + boundary-response rules.
//!
//! Dispatch is an exhaustive `match`. Variants are `Copy` and carry only
//! constants, so each entity gets its own copy at spawn.

use bevy::math::{Rect, Vec2};

use super::Movable;

/// Distance from an edge at which a crossing still counts as a hit.
///
/// Positions are frame-quantized, so an exact equality test would miss most hits.
pub const EDGE_TOLERANCE: f32 = 10.0;

/// Key for the behaviour factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BehaviourKind {
    Dasher,
    Chaser,
}

impl BehaviourKind {
    /// Cruise speed for enemies built with this behaviour.
    pub fn speed(self) -> f32 {
        match self {
            Self::Dasher => 500.0,
            Self::Chaser => 100.0,
        }
    }

    pub fn frame_count(self) -> u32 {
        match self {
            Self::Dasher => 2,
            Self::Chaser => 4,
        }
    }

    /// Frames per animation step.
    pub fn frame_interval(self) -> u32 {
        match self {
            Self::Dasher => 30,
            Self::Chaser => 10,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Behaviour {
    /// Straight line, bounces off the play-field edge.
    Dasher,
    /// Turns toward its target, stops at the play-field edge.
    Chaser { homing_factor: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    Vertical,
    Horizontal,
}

impl Behaviour {
    pub const CHASER_HOMING: f32 = 500.0;

    pub fn from_kind(kind: BehaviourKind) -> Self {
        match kind {
            BehaviourKind::Dasher => Self::Dasher,
            BehaviourKind::Chaser => Self::Chaser {
                homing_factor: Self::CHASER_HOMING,
            },
        }
    }

    pub fn kind(&self) -> BehaviourKind {
        match self {
            Self::Dasher => BehaviourKind::Dasher,
            Self::Chaser { .. } => BehaviourKind::Chaser,
        }
    }

    /// Acceleration for `this`, given an optional target.
    ///
    /// Pure. Never returns NaN: coincident or absent targets yield zero.
    pub fn accel(&self, this: &Movable, target: Option<&Movable>) -> Vec2 {
        match *self {
            Self::Dasher => Vec2::ZERO,
            Self::Chaser { homing_factor } => {
                let Some(target) = target else {
                    return Vec2::ZERO;
                };
                homing(homing_factor, this, target)
            }
        }
    }

    /// Velocity after an edge check. At most one axis is corrected per call.
    pub fn bound_velocity(&self, bounds: &Rect, position: Vec2, velocity: Vec2) -> Vec2 {
        let Some(edge) = struck_edge(bounds, position, velocity) else {
            return velocity;
        };

        match (self, edge) {
            (Self::Dasher, Edge::Vertical) => Vec2::new(-velocity.x, velocity.y),
            (Self::Dasher, Edge::Horizontal) => Vec2::new(velocity.x, -velocity.y),
            (Self::Chaser { .. }, Edge::Vertical) => Vec2::new(0.0, velocity.y),
            (Self::Chaser { .. }, Edge::Horizontal) => Vec2::new(velocity.x, 0.0),
        }
    }
}

/// Turn rate grows as the target drifts off-axis and falls off with distance^1.5.
fn homing(factor: f32, this: &Movable, target: &Movable) -> Vec2 {
    let to_target = target.position - this.position;
    let distance = to_target.length();
    if !distance.is_finite() || distance <= f32::EPSILON {
        return Vec2::ZERO;
    }

    // Rounding can push `distance - along` a hair below zero.
    let along = to_target.dot(this.forward);
    let turn = factor * (distance - along).max(0.0).sqrt() / distance.powf(1.5);

    let side = if to_target.dot(this.right) > 0.0 { 1.0 } else { -1.0 };
    this.velocity.perp() * (turn * side)
}

/// Which edge is being struck while moving outward, if any.
///
/// The band is one-sided: anything within `EDGE_TOLERANCE` of an edge or past it
/// counts, so a step that overshoots the band still turns back.
fn struck_edge(bounds: &Rect, p: Vec2, v: Vec2) -> Option<Edge> {
    let at_left = p.x <= bounds.min.x + EDGE_TOLERANCE && v.x < 0.0;
    let at_right = p.x >= bounds.max.x - EDGE_TOLERANCE && v.x > 0.0;
    if at_left || at_right {
        return Some(Edge::Vertical);
    }

    let at_top = p.y <= bounds.min.y + EDGE_TOLERANCE && v.y < 0.0;
    let at_bottom = p.y >= bounds.max.y - EDGE_TOLERANCE && v.y > 0.0;
    if at_top || at_bottom {
        return Some(Edge::Horizontal);
    }

    None
}
