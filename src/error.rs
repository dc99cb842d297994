use thiserror::Error;

/// errors a caller can trigger through the public API.
/// construction-time invariant breaks inside `Model` panic instead.
#[derive(Debug, Error)]
pub enum GeometrizeError {
    #[error("invalid bounds: min ({min_x}, {min_y}) exceeds max ({max_x}, {max_y})")]
    InvalidBounds { min_x: i32, min_y: i32, max_x: i32, max_y: i32 },

    #[error("bitmap must be at least 1x1, got {width}x{height}")]
    EmptyBitmap { width: u32, height: u32 },

    #[error("pixel data holds {actual} bytes, a {width}x{height} RGBA bitmap needs {expected}")]
    PixelCount { width: u32, height: u32, expected: usize, actual: usize },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeometrizeError>;
