//! Grid configuration: defaults, validation and the host encodings.
//!
//! The shading core trusts its configuration completely; a zero `grid_size`
//! or `resolution` just turns into NaN/Infinity downstream. Everything that
//! loads a configuration from outside the crate should go through
//! [`GridConfiguration::validate`] before the first pixel is shaded.

use bytemuck::{Pod, Zeroable};
use log::warn;

use super::error::{GridError, Result};
use super::types::{GridConfiguration, Rgba, Vec2};

/// Number of scalars in the flat configuration buffer.
pub const CONFIG_FLOATS: usize = 11;

/// Size of the configuration block as the host lays it out (11 × f32).
pub const CONFIG_BLOCK_BYTES: usize = std::mem::size_of::<GridConfiguration>();

impl Default for GridConfiguration {
    fn default() -> Self {
        // Faint white lines on a 32px grid, shifted by a quarter of a 64px tile
        Self {
            line_colour: Rgba::new(1.0, 1.0, 1.0, 0.1),
            line_width: 0.5,
            grid_size: 32.0,
            offset: Vec2::splat(16.0),
            resolution: Vec2::new(800.0, 600.0),
            grid_intensity: 0.7,
        }
    }
}

impl GridConfiguration {
    /// Check the invariants the shading core relies on.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("line_colour.r", self.line_colour.r),
            ("line_colour.g", self.line_colour.g),
            ("line_colour.b", self.line_colour.b),
            ("line_colour.a", self.line_colour.a),
            ("line_width", self.line_width),
            ("grid_size", self.grid_size),
            ("offset.x", self.offset.x),
            ("offset.y", self.offset.y),
            ("resolution.x", self.resolution.x),
            ("resolution.y", self.resolution.y),
            ("grid_intensity", self.grid_intensity),
        ];
        if let Some(&(field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(GridError::NonFinite { field });
        }

        if self.grid_size <= 0.0 {
            return Err(GridError::NonPositiveGridSize(self.grid_size));
        }
        if self.resolution.x <= 0.0 || self.resolution.y <= 0.0 {
            return Err(GridError::NonPositiveResolution {
                x: self.resolution.x,
                y: self.resolution.y,
            });
        }
        if self.line_width < 0.0 {
            return Err(GridError::NegativeLineWidth(self.line_width));
        }
        Ok(())
    }

    /// Build a configuration from a flat f64 parameter array.
    ///
    /// Layout: [line_r, line_g, line_b, line_a, line_width, grid_size,
    ///          offset_x, offset_y, resolution_x, resolution_y, grid_intensity]
    ///
    /// A short buffer yields the default configuration. No validation happens
    /// here; see [`GridConfiguration::from_buffer_checked`].
    pub fn from_buffer(data: &[f64]) -> Self {
        if data.len() < CONFIG_FLOATS {
            if !data.is_empty() {
                warn!(
                    "grid configuration buffer has {} values, expected {}; using defaults",
                    data.len(),
                    CONFIG_FLOATS
                );
            }
            return Self::default();
        }

        Self {
            line_colour: Rgba::new(data[0] as f32, data[1] as f32, data[2] as f32, data[3] as f32),
            line_width: data[4] as f32,
            grid_size: data[5] as f32,
            offset: Vec2::new(data[6] as f32, data[7] as f32),
            resolution: Vec2::new(data[8] as f32, data[9] as f32),
            grid_intensity: data[10] as f32,
        }
    }

    /// [`GridConfiguration::from_buffer`] followed by [`GridConfiguration::validate`].
    pub fn from_buffer_checked(data: &[f64]) -> Result<Self> {
        let config = Self::from_buffer(data);
        config.validate()?;
        Ok(config)
    }

    /// Inverse of [`GridConfiguration::from_buffer`].
    pub fn to_buffer(&self) -> [f64; CONFIG_FLOATS] {
        let scalars: &[f32] = bytemuck::cast_slice(std::slice::from_ref(self));
        let mut out = [0.0; CONFIG_FLOATS];
        for (dst, src) in out.iter_mut().zip(scalars) {
            *dst = *src as f64;
        }
        out
    }

    /// Read the host's packed configuration block (11 little-endian f32s, block order).
    pub fn from_block(bytes: &[u8]) -> Result<Self> {
        let block = bytes.get(..CONFIG_BLOCK_BYTES).ok_or(GridError::BlockTooSmall {
            expected: CONFIG_BLOCK_BYTES,
            actual: bytes.len(),
        })?;
        let config: GridConfiguration = bytemuck::pod_read_unaligned(block);
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GridConfiguration = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// GPU uniform representation, padded to a 16-byte multiple.
    pub fn to_uniform(&self) -> GridUniform {
        GridUniform {
            line_colour: [self.line_colour.r, self.line_colour.g, self.line_colour.b, self.line_colour.a],
            line_width: self.line_width,
            grid_size: self.grid_size,
            offset: [self.offset.x, self.offset.y],
            resolution: [self.resolution.x, self.resolution.y],
            grid_intensity: self.grid_intensity,
            _padding: 0.0,
        }
    }
}

/// Uniform buffer layout for hosts that shade the grid on the GPU.
///
/// Offsets: line_colour 0, line_width 16, grid_size 20, offset 24,
/// resolution 32, grid_intensity 40; 48 bytes total.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Pod, Zeroable)]
pub struct GridUniform {
    pub line_colour: [f32; 4],
    pub line_width: f32,
    pub grid_size: f32,
    pub offset: [f32; 2],
    pub resolution: [f32; 2],
    pub grid_intensity: f32,
    pub _padding: f32,
}

impl GridUniform {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_buffer() -> Vec<f64> {
        vec![0.2, 0.4, 0.6, 0.8, 1.0, 50.0, 3.0, 4.0, 800.0, 600.0, 0.7]
    }

    #[test]
    fn test_default_is_valid() {
        assert!(GridConfiguration::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_grid_size() {
        let config = GridConfiguration { grid_size: 0.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(GridError::NonPositiveGridSize(_))));
    }

    #[test]
    fn test_validate_rejects_zero_resolution() {
        let config = GridConfiguration {
            resolution: Vec2::new(800.0, 0.0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(GridError::NonPositiveResolution { .. })));
    }

    #[test]
    fn test_validate_rejects_negative_line_width() {
        let config = GridConfiguration { line_width: -1.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(GridError::NegativeLineWidth(_))));
    }

    #[test]
    fn test_validate_reports_non_finite_field() {
        let config = GridConfiguration {
            offset: Vec2::new(0.0, f32::NAN),
            ..Default::default()
        };
        match config.validate() {
            Err(GridError::NonFinite { field }) => assert_eq!(field, "offset.y"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_zero_line_width_is_valid() {
        let config = GridConfiguration { line_width: 0.0, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_buffer_layout() {
        let config = GridConfiguration::from_buffer(&sample_buffer());
        assert_eq!(config.line_colour, Rgba::new(0.2, 0.4, 0.6, 0.8));
        assert_eq!(config.line_width, 1.0);
        assert_eq!(config.grid_size, 50.0);
        assert_eq!(config.offset, Vec2::new(3.0, 4.0));
        assert_eq!(config.resolution, Vec2::new(800.0, 600.0));
        assert!((config.grid_intensity - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_from_buffer_short_uses_defaults() {
        assert_eq!(GridConfiguration::from_buffer(&[1.0, 2.0]), GridConfiguration::default());
        assert_eq!(GridConfiguration::from_buffer(&[]), GridConfiguration::default());
    }

    #[test]
    fn test_from_buffer_checked_rejects_invalid() {
        let mut data = sample_buffer();
        data[5] = 0.0;
        assert!(GridConfiguration::from_buffer_checked(&data).is_err());
    }

    #[test]
    fn test_to_buffer_matches_block_order() {
        let config = GridConfiguration::from_buffer(&sample_buffer());
        let out = config.to_buffer();
        assert_eq!(out[5], 50.0);
        assert_eq!(out[8], 800.0);
        assert_eq!(GridConfiguration::from_buffer(&out), config);
    }

    #[test]
    fn test_from_block() {
        let config = GridConfiguration::from_buffer(&sample_buffer());
        let mut bytes = bytemuck::bytes_of(&config).to_vec();
        // Trailing bytes past the block are ignored
        bytes.extend_from_slice(&[0u8; 4]);
        assert_eq!(GridConfiguration::from_block(&bytes).unwrap(), config);

        let err = GridConfiguration::from_block(&bytes[..20]).unwrap_err();
        assert!(matches!(err, GridError::BlockTooSmall { expected: 44, actual: 20 }));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = GridConfiguration::from_json(r#"{"grid_size": 50.0, "line_width": 1.0}"#).unwrap();
        assert_eq!(config.grid_size, 50.0);
        assert_eq!(config.line_width, 1.0);
        assert_eq!(config.resolution, GridConfiguration::default().resolution);
    }

    #[test]
    fn test_json_round_trip() {
        let config = GridConfiguration::from_buffer(&sample_buffer());
        let json = config.to_json().unwrap();
        assert_eq!(GridConfiguration::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(GridConfiguration::from_json("{not json"), Err(GridError::Json(_))));
        assert!(matches!(
            GridConfiguration::from_json(r#"{"grid_size": -4.0}"#),
            Err(GridError::NonPositiveGridSize(_))
        ));
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<GridUniform>(), 48);
        assert_eq!(CONFIG_BLOCK_BYTES, 44);

        let config = GridConfiguration::from_buffer(&sample_buffer());
        let uniform = config.to_uniform();
        let floats: &[f32] = bytemuck::cast_slice(uniform.as_bytes());
        assert_eq!(floats.len(), 12);
        assert_eq!(floats[4], 1.0);
        assert_eq!(floats[5], 50.0);
        assert_eq!(&floats[6..8], &[3.0, 4.0]);
        assert_eq!(&floats[8..10], &[800.0, 600.0]);
        assert_eq!(floats[11], 0.0);
    }
}
