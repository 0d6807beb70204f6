//! Grid overlay shading, one pure function per pixel.
//!
//! - Surface coordinate to pixel-space mapping
//! - Fine and coarse grid line distance fields with smoothstep anti-aliasing
//! - Radial vignette falloff
//! - Visibility threshold and straight-alpha color output

pub mod composite;
pub mod field;
pub mod mapper;
pub mod vignette;

pub use composite::{shade, shade_at};
