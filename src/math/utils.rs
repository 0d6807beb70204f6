//! Scalar helpers shared by the shading pipeline.
//!
//! Everything here follows the GPU shading-language semantics (`clamp`,
//! `step`, `smoothstep`) so the CPU path produces the same values a fragment
//! shader would.

/// Clamp f32 to [min, max].
///
/// A NaN input is returned unchanged.
#[inline(always)]
pub fn clampf(v: f32, min: f32, max: f32) -> f32 {
    if v < min { min } else if v > max { max } else { v }
}

/// Hard threshold: 0.0 below `edge`, 1.0 at or above it.
#[inline(always)]
pub fn step(edge: f32, x: f32) -> f32 {
    if x < edge { 0.0 } else { 1.0 }
}

/// Smooth step (cubic Hermite interpolation).
///
/// Collapses to [`step`] when both edges coincide instead of dividing by zero.
#[inline(always)]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return step(edge0, x);
    }
    let t = clampf((x - edge0) / (edge1 - edge0), 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Pack a float to a byte [0, 255].
#[inline(always)]
pub fn float_to_byte(v: f32) -> u8 {
    let vi = (v * 255.0) as i32;
    if vi < 0 { 0 } else if vi > 255 { 255 } else { vi as u8 }
}
