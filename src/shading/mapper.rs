//! Surface coordinate → pixel-space mapping.

use crate::engine::types::{GridConfiguration, Vec2};
use crate::math::vec2::{vec2_add, vec2_mul};

/// `pixel = uv * resolution + offset`.
#[inline(always)]
pub fn map_coordinate(uv: Vec2, config: &GridConfiguration) -> Vec2 {
    vec2_add(vec2_mul(uv, config.resolution), config.offset)
}

/// Diagonal of d(pixel)/d(uv). The mapping is affine, so this is constant per draw.
#[inline(always)]
pub fn jacobian(config: &GridConfiguration) -> Vec2 {
    config.resolution
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_coordinate() {
        let config = GridConfiguration {
            resolution: Vec2::new(800.0, 600.0),
            offset: Vec2::new(10.0, -5.0),
            ..Default::default()
        };
        assert_eq!(map_coordinate(Vec2::ZERO, &config), Vec2::new(10.0, -5.0));
        assert_eq!(map_coordinate(Vec2::new(1.0, 1.0), &config), Vec2::new(810.0, 595.0));
        assert_eq!(map_coordinate(Vec2::new(0.0625, 0.5), &config), Vec2::new(60.0, 295.0));
    }

    #[test]
    fn test_jacobian_matches_finite_difference() {
        let config = GridConfiguration::default();
        let a = map_coordinate(Vec2::new(0.25, 0.25), &config);
        let b = map_coordinate(Vec2::new(0.75, 0.75), &config);
        let j = jacobian(&config);
        assert!(((b.x - a.x) / 0.5 - j.x).abs() < 1e-3);
        assert!(((b.y - a.y) / 0.5 - j.y).abs() < 1e-3);
    }
}
