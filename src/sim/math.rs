//! Small float helpers shared by the kinematics and fire modes.

use bevy::math::{Rect, Vec2};

/// Equality with an absolute tolerance.
#[inline]
pub fn approx_eq(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() < tolerance
}

/// Normalize, or `None` for a zero-length (or non-finite) vector.
#[inline]
pub fn normalized(v: Vec2) -> Option<Vec2> {
    v.try_normalize()
}

/// Rotate `v` by `degrees` (counter-clockwise in a y-up frame).
#[inline]
pub fn rotated_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Angle of `v` against the +x axis, in radians.
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Inclusive containment: a point exactly on an edge is inside.
#[inline]
pub fn in_bounds(bounds: &Rect, p: Vec2) -> bool {
    p.x >= bounds.min.x && p.x <= bounds.max.x && p.y >= bounds.min.y && p.y <= bounds.max.y
}
