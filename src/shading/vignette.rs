//! Radial brightness falloff from the surface center.
//!
//! Distance is normalized by the horizontal resolution only, so on a
//! non-square surface the falloff is stretched along the shorter axis. The
//! result is not clamped: far enough from the center it goes negative and
//! darkens lines past black.

use crate::engine::types::Vec2;
use crate::math::vec2::{vec2_distance, vec2_scale};

/// Brightness lost per horizontal-resolution of distance from the center.
pub const VIGNETTE_FALLOFF: f32 = 0.7;

/// `1 - (|center - pixel| / resolution.x) * 0.7`, with `center = resolution / 2`.
#[inline]
pub fn radial_gradient(pixel_coord: Vec2, resolution: Vec2) -> f32 {
    let center = vec2_scale(resolution, 0.5);
    1.0 - (vec2_distance(center, pixel_coord) / resolution.x) * VIGNETTE_FALLOFF
}
