//! Core value types shared by the shading pipeline.
//!
//! All types use `#[repr(C)]` and derive `Pod` so host buffers (JS typed
//! arrays, GPU uniform blocks) can be viewed as these types without copying.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 2D vector with f32 precision.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline(always)]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }
}

/// RGBA color, straight (not premultiplied) alpha.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    #[inline(always)]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

/// Per-draw grid overlay parameters.
///
/// Field order is the host's configuration block order. The struct is built
/// once per draw and only ever read while pixels are shaded, so it is shared
/// by reference (or copied) across any number of parallel evaluators.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfiguration {
    /// Line color
    pub line_colour: Rgba,
    /// Half-thickness of a fine line in pixel units (coarse lines use twice this)
    pub line_width: f32,
    /// Fine grid spacing in pixel units, must be > 0
    pub grid_size: f32,
    /// Pixel-space origin shift
    pub offset: Vec2,
    /// Pixel-space surface dimensions, both components > 0
    pub resolution: Vec2,
    /// Carried through for the host; no shading step reads it
    pub grid_intensity: f32,
}

/// A single pixel evaluation request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelSample {
    /// Normalized surface coordinate in [0, 1]²
    pub uv: Vec2,
    /// Anti-aliasing footprint: local rate of change of the pixel coordinate
    pub footprint: f32,
}

impl PixelSample {
    pub fn new(uv: Vec2, footprint: f32) -> Self {
        Self { uv, footprint }
    }

    /// Evaluate the grid overlay color for this sample.
    pub fn shade(&self, config: &GridConfiguration) -> Rgba {
        crate::shading::shade(self.uv, self.footprint, config)
    }
}
