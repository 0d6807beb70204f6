//! World ↔ cell mapping for content placed on the overlay grid.
//!
//! Hosts that snap things to the same grid the overlay draws use a
//! [`GridLayout`] for the cell math, and [`GridLayout::overlay_config`] to get
//! an overlay whose lines land where the layout expects them.

pub mod cell;

pub use cell::{CellPosition, Direction};

use crate::engine::types::{GridConfiguration, Vec2};

/// Cell size and origin of a world-space grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// World units per cell
    pub scale: f32,
    /// World position of the (0, 0) cell corner on both axes
    pub base_offset: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self { scale: 64.0, base_offset: 0.0 }
    }
}

impl GridLayout {
    pub fn new(scale: f32, base_offset: f32) -> Self {
        Self { scale, base_offset }
    }

    /// Snap a world position to the cell containing it (lower-left origin).
    pub fn world_to_cell(&self, world: Vec2) -> CellPosition {
        let px = (world.x - self.base_offset) / self.scale;
        let py = (world.y - self.base_offset) / self.scale;
        CellPosition::new(px.floor() as i64, py.floor() as i64)
    }

    /// Bottom-left corner of a cell.
    pub fn cell_corner(&self, pos: CellPosition) -> Vec2 {
        Vec2 {
            x: pos.x as f32 * self.scale + self.base_offset,
            y: pos.y as f32 * self.scale + self.base_offset,
        }
    }

    pub fn cell_center(&self, pos: CellPosition) -> Vec2 {
        let corner = self.cell_corner(pos);
        Vec2 {
            x: corner.x + self.scale / 2.0,
            y: corner.y + self.scale / 2.0,
        }
    }

    /// Overlay settings for a `width` × `height` quad drawn over this layout.
    pub fn overlay_config(&self, width: f32, height: f32) -> GridConfiguration {
        GridConfiguration {
            grid_size: self.scale / 2.0,
            offset: Vec2::splat(self.scale / 4.0),
            resolution: Vec2::new(width, height),
            ..GridConfiguration::default()
        }
    }

    /// Where the host centers the overlay quad.
    pub fn overlay_origin(&self) -> Vec2 {
        Vec2::splat(self.base_offset + self.scale / 2.0)
    }
}
