//! Screen-space derivatives for the anti-aliasing footprint.
//!
//! A fragment shader gets `dpdx`/`dpdy` for free because pixels run in 2×2
//! quads. The CPU renderer evaluates pixels the same way and derives the
//! footprint from a [`DerivativeSource`]: either the analytic Jacobian of the
//! uv → pixel mapping, or coarse finite differences across the quad.

use crate::engine::scanline::Surface;
use crate::engine::types::{GridConfiguration, Vec2};
use crate::math::vec2::{vec2_abs, vec2_add, vec2_max_element, vec2_sub};
use crate::shading::mapper::{jacobian, map_coordinate};

/// Lane offsets inside a quad: top-left, top-right, bottom-left, bottom-right.
pub const QUAD_LANES: [(u32, u32); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];

/// Pixel-space coordinates of one 2×2 quad, in [`QUAD_LANES`] order.
///
/// Lanes past the right or bottom edge of the surface are still mapped, like
/// GPU helper invocations, so edge quads get full derivatives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadCoords {
    /// Top-left pixel of the quad
    pub x: u32,
    pub y: u32,
    pub coords: [Vec2; 4],
}

impl QuadCoords {
    pub fn new(surface: &Surface, config: &GridConfiguration, x: u32, y: u32) -> Self {
        let mut coords = [Vec2::ZERO; 4];
        for (coord, (dx, dy)) in coords.iter_mut().zip(QUAD_LANES) {
            *coord = map_coordinate(surface.uv(x + dx, y + dy), config);
        }
        Self { x, y, coords }
    }
}

/// Rate of change of the pixel coordinate per screen pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Derivatives {
    pub ddx: Vec2,
    pub ddy: Vec2,
}

impl Derivatives {
    /// `|ddx| + |ddy|` per axis.
    #[inline(always)]
    pub fn fwidth(&self) -> Vec2 {
        vec2_add(vec2_abs(self.ddx), vec2_abs(self.ddy))
    }

    /// Scalar AA footprint: the wider of the two axes.
    #[inline(always)]
    pub fn footprint(&self) -> f32 {
        vec2_max_element(self.fwidth())
    }
}

/// Anything that can supply the derivatives for a quad.
pub trait DerivativeSource: Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &str;

    fn derivatives(&self, quad: &QuadCoords, surface: &Surface, config: &GridConfiguration) -> Derivatives;
}

/// Constant derivatives from the mapping's Jacobian.
///
/// One pixel step moves uv by `1 / surface size`, so the pixel coordinate
/// moves by `resolution / surface size`.
pub struct AnalyticDerivatives;

impl DerivativeSource for AnalyticDerivatives {
    fn name(&self) -> &str {
        "analytic"
    }

    fn derivatives(&self, _quad: &QuadCoords, surface: &Surface, config: &GridConfiguration) -> Derivatives {
        let j = jacobian(config);
        Derivatives {
            ddx: Vec2::new(j.x / surface.width as f32, 0.0),
            ddy: Vec2::new(0.0, j.y / surface.height as f32),
        }
    }
}

/// Coarse finite differences: one `ddx`/`ddy` pair shared by the whole quad.
pub struct QuadDifferences;

impl DerivativeSource for QuadDifferences {
    fn name(&self) -> &str {
        "quad"
    }

    fn derivatives(&self, quad: &QuadCoords, _surface: &Surface, _config: &GridConfiguration) -> Derivatives {
        Derivatives {
            ddx: vec2_sub(quad.coords[1], quad.coords[0]),
            ddy: vec2_sub(quad.coords[2], quad.coords[0]),
        }
    }
}

/// Derivative source selector exposed to the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FootprintMode {
    #[default]
    Analytic,
    QuadDifferences,
}

impl FootprintMode {
    /// 0 = analytic, 1 = quad differences; anything else falls back to analytic.
    pub fn from_u32(id: u32) -> Self {
        match id {
            1 => FootprintMode::QuadDifferences,
            _ => FootprintMode::Analytic,
        }
    }

    pub fn create(&self) -> Box<dyn DerivativeSource> {
        match self {
            FootprintMode::Analytic => Box::new(AnalyticDerivatives),
            FootprintMode::QuadDifferences => Box::new(QuadDifferences),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GridConfiguration {
        GridConfiguration {
            resolution: Vec2::new(800.0, 600.0),
            offset: Vec2::new(3.0, 7.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_fwidth_and_footprint() {
        let d = Derivatives {
            ddx: Vec2::new(-1.0, 0.5),
            ddy: Vec2::new(0.25, 2.0),
        };
        assert_eq!(d.fwidth(), Vec2::new(1.25, 2.5));
        assert_eq!(d.footprint(), 2.5);
    }

    #[test]
    fn test_analytic_one_to_one() {
        let surface = Surface::new(800, 600);
        let cfg = config();
        let quad = QuadCoords::new(&surface, &cfg, 10, 10);
        let d = AnalyticDerivatives.derivatives(&quad, &surface, &cfg);
        assert_eq!(d.ddx, Vec2::new(1.0, 0.0));
        assert_eq!(d.ddy, Vec2::new(0.0, 1.0));
        assert_eq!(d.footprint(), 1.0);
    }

    #[test]
    fn test_analytic_zoomed_out() {
        // 800px of grid squeezed into 200 screen pixels: 4 grid pixels per screen pixel
        let surface = Surface::new(200, 150);
        let cfg = config();
        let quad = QuadCoords::new(&surface, &cfg, 0, 0);
        assert_eq!(AnalyticDerivatives.derivatives(&quad, &surface, &cfg).footprint(), 4.0);
    }

    #[test]
    fn test_quad_differences_match_analytic() {
        let surface = Surface::new(320, 240);
        let cfg = config();
        for (x, y) in [(0, 0), (100, 50), (318, 238)] {
            let quad = QuadCoords::new(&surface, &cfg, x, y);
            let numeric = QuadDifferences.derivatives(&quad, &surface, &cfg);
            let analytic = AnalyticDerivatives.derivatives(&quad, &surface, &cfg);
            assert!((numeric.ddx.x - analytic.ddx.x).abs() < 1e-3);
            assert!((numeric.ddy.y - analytic.ddy.y).abs() < 1e-3);
            assert!(numeric.ddx.y.abs() < 1e-3);
            assert!(numeric.ddy.x.abs() < 1e-3);
            assert!((numeric.footprint() - analytic.footprint()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_quad_lanes_past_edge_are_mapped() {
        let surface = Surface::new(3, 3);
        let cfg = config();
        let quad = QuadCoords::new(&surface, &cfg, 2, 2);
        // The right/bottom lanes sit outside the 3×3 surface but still map
        assert!(quad.coords[3].x > quad.coords[0].x);
        assert!(quad.coords[3].y > quad.coords[0].y);
    }

    #[test]
    fn test_footprint_mode_selection() {
        assert_eq!(FootprintMode::from_u32(0), FootprintMode::Analytic);
        assert_eq!(FootprintMode::from_u32(1), FootprintMode::QuadDifferences);
        assert_eq!(FootprintMode::from_u32(9), FootprintMode::Analytic);
        assert_eq!(FootprintMode::from_u32(0).create().name(), "analytic");
        assert_eq!(FootprintMode::QuadDifferences.create().name(), "quad");
    }
}
