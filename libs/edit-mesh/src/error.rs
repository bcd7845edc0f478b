//! # Mesh Errors
//!
//! Error types for mesh editing, generation and persistence.
//!
//! Out-of-range indices are programming errors and panic at the call site;
//! they never surface as a `MeshError`.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while generating, encoding or decoding meshes.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Underlying stream failure during encode/decode
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoded data violates a mesh invariant
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Procedural primitive requested with too few steps
    #[error("Invalid step count: {steps} (min: {min})")]
    InvalidSteps { steps: u32, min: u32 },

    /// Too many vertices
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    /// Too many triangles
    #[error("Too many triangles: {count} (max: {max})")]
    TooManyTriangles { count: usize, max: usize },
}

impl MeshError {
    /// Creates an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Returns true if this error came from the underlying stream.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
