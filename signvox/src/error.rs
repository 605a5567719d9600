use thiserror::Error;

/// A specification field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("text rasterization failed: {0}")]
    Failed(String),

    #[error("rasterized line {index} has {got} pixels, expected {expected}")]
    MalformedLine {
        index: usize,
        got: usize,
        expected: usize,
    },
}

#[derive(Debug, Error)]
pub enum VoxError {
    #[error("not a .vox file (magic {0:?})")]
    BadMagic([u8; 4]),

    #[error("unexpected end of data reading {0}")]
    Truncated(&'static str),

    #[error("missing required chunk {0}")]
    MissingChunk(&'static str),

    #[error("XYZI declares {declared} voxels but holds {actual}")]
    CountMismatch { declared: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum SignError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error("config error: {0}")]
    Config(String),
}
