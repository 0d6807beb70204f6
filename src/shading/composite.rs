//! Final color decision and the whole per-pixel shading function.
//!
//! `shade` is the entire pipeline for one pixel:
//! mapping → fine/coarse line masks → vignette → threshold + color.
//! It holds no state, so pixels may be shaded in any order, on any thread.

use crate::engine::types::{GridConfiguration, Rgba, Vec2};
use super::field::multi_scale_mask;
use super::mapper::map_coordinate;
use super::vignette::radial_gradient;

/// Combined coverage at or below this is written as fully transparent.
pub const VISIBILITY_THRESHOLD: f32 = 0.01;

/// Turn line coverage and vignette brightness into a straight-alpha color.
///
/// Above the threshold the alpha keeps the continuous anti-aliased coverage;
/// below it the pixel contributes nothing, which lets hosts skip blending.
#[inline]
pub fn composite(combined: f32, gradient: f32, line_colour: Rgba) -> Rgba {
    if combined > VISIBILITY_THRESHOLD {
        Rgba {
            r: line_colour.r * gradient,
            g: line_colour.g * gradient,
            b: line_colour.b * gradient,
            a: combined * line_colour.a,
        }
    } else {
        Rgba::TRANSPARENT
    }
}

/// Shade an already-mapped pixel-space coordinate.
#[inline]
pub fn shade_at(pixel_coord: Vec2, footprint: f32, config: &GridConfiguration) -> Rgba {
    let masks = multi_scale_mask(pixel_coord, footprint, config);
    let gradient = radial_gradient(pixel_coord, config.resolution);
    composite(masks.combined(), gradient, config.line_colour)
}

/// Grid overlay color for surface coordinate `uv` with AA footprint `footprint`.
///
/// `config.grid_intensity` is not read. Invalid configurations are not
/// caught here; a zero resolution, for one, yields non-finite color channels.
#[inline]
pub fn shade(uv: Vec2, footprint: f32, config: &GridConfiguration) -> Rgba {
    shade_at(map_coordinate(uv, config), footprint, config)
}
