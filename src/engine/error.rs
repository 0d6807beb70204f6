use thiserror::Error;

/// Everything that can go wrong before a pixel is shaded.
///
/// The shading core itself is infallible; these errors come from the
/// configuration layer and from render entry points checking their buffers.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid_size must be greater than zero, got {0}")]
    NonPositiveGridSize(f32),

    #[error("resolution components must be greater than zero, got ({x}, {y})")]
    NonPositiveResolution { x: f32, y: f32 },

    #[error("line_width must not be negative, got {0}")]
    NegativeLineWidth(f32),

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("invalid grid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration block needs {expected} bytes, got {actual}")]
    BlockTooSmall { expected: usize, actual: usize },

    #[error("output buffer holds {actual} values but the surface needs {expected}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("output buffer length {0} is not a whole number of RGBA pixels")]
    MisalignedBuffer(usize),
}

pub type Result<T> = std::result::Result<T, GridError>;
