//! Grid line distance field and the two-scale line mask.
//!
//! A pixel is "on a line" when it sits close to a cell edge along either
//! axis. The distance to the nearest edge is turned into a coverage mask with
//! a smoothstep ramp whose width is the anti-aliasing footprint, so edges stay
//! sub-pixel accurate at any zoom level instead of stair-stepping.

use crate::engine::types::{GridConfiguration, Vec2};
use crate::math::utils::smoothstep;
use crate::math::vec2::vec2_min_element;

/// Coarse grid spacing as a multiple of the fine spacing.
pub const COARSE_SPACING_FACTOR: f32 = 5.0;

/// Coarse line half-width as a multiple of the fine half-width.
pub const COARSE_WIDTH_FACTOR: f32 = 2.0;

/// Wrap a coordinate into a single `space`-sized cell on each axis.
///
/// Uses floor division, so negative coordinates wrap into `[0, space)` too.
#[inline(always)]
pub fn wrap_to_cell(coord: Vec2, space: f32) -> Vec2 {
    Vec2 {
        x: coord.x - space * (coord.x / space).floor(),
        y: coord.y - space * (coord.y / space).floor(),
    }
}

/// Distance to the nearest cell edge on each axis.
#[inline(always)]
pub fn axis_edge_distance(coord: Vec2, space: f32) -> Vec2 {
    let wrapped = wrap_to_cell(coord, space);
    Vec2 {
        x: wrapped.x.min(space - wrapped.x),
        y: wrapped.y.min(space - wrapped.y),
    }
}

/// Distance to the nearest grid line of spacing `space`.
#[inline(always)]
pub fn edge_distance(coord: Vec2, space: f32) -> f32 {
    vec2_min_element(axis_edge_distance(coord, space))
}

/// Anti-aliased line coverage in [0, 1].
///
/// 1.0 within `grid_width - footprint` of a line, 0.0 beyond
/// `grid_width + footprint`, cubic ramp in between. A zero footprint gives a
/// hard edge at exactly `grid_width`.
#[inline]
pub fn grid_line_mask(coord: Vec2, space: f32, grid_width: f32, footprint: f32) -> f32 {
    let dist = edge_distance(coord, space);
    1.0 - smoothstep(grid_width - footprint, grid_width + footprint, dist)
}

/// Fine and coarse line coverage at one pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridMasks {
    pub fine: f32,
    pub coarse: f32,
}

impl GridMasks {
    /// Union of both scales. `max` keeps crossings of fine and coarse lines
    /// from adding up, so the result never leaves [0, 1].
    #[inline(always)]
    pub fn combined(&self) -> f32 {
        self.fine.max(self.coarse)
    }
}

/// Evaluate the fine grid and the coarse grid (5× spacing, 2× width).
#[inline]
pub fn multi_scale_mask(coord: Vec2, footprint: f32, config: &GridConfiguration) -> GridMasks {
    GridMasks {
        fine: grid_line_mask(coord, config.grid_size, config.line_width, footprint),
        coarse: grid_line_mask(
            coord,
            config.grid_size * COARSE_SPACING_FACTOR,
            config.line_width * COARSE_WIDTH_FACTOR,
            footprint,
        ),
    }
}
