//! 2D vector operations with f32 precision.

use crate::engine::types::Vec2;

// ─── Vector operations ───────────────────────────────────────

#[inline(always)]
pub fn vec2_add(a: Vec2, b: Vec2) -> Vec2 {
    Vec2 { x: a.x + b.x, y: a.y + b.y }
}

#[inline(always)]
pub fn vec2_sub(a: Vec2, b: Vec2) -> Vec2 {
    Vec2 { x: a.x - b.x, y: a.y - b.y }
}

/// Component-wise product.
#[inline(always)]
pub fn vec2_mul(a: Vec2, b: Vec2) -> Vec2 {
    Vec2 { x: a.x * b.x, y: a.y * b.y }
}

#[inline(always)]
pub fn vec2_scale(v: Vec2, s: f32) -> Vec2 {
    Vec2 { x: v.x * s, y: v.y * s }
}

#[inline(always)]
pub fn vec2_abs(v: Vec2) -> Vec2 {
    Vec2 { x: v.x.abs(), y: v.y.abs() }
}

#[inline(always)]
pub fn vec2_length(v: Vec2) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

#[inline(always)]
pub fn vec2_distance(a: Vec2, b: Vec2) -> f32 {
    vec2_length(vec2_sub(a, b))
}

// ─── Reductions ──────────────────────────────────────────────

/// Smaller of the two components.
#[inline(always)]
pub fn vec2_min_element(v: Vec2) -> f32 {
    v.x.min(v.y)
}

/// Larger of the two components.
#[inline(always)]
pub fn vec2_max_element(v: Vec2) -> f32 {
    v.x.max(v.y)
}
