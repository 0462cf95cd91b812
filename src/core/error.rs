//! Errors reported while building shapes from scene parameters.
//!
//! A failed intersection is not an error; these are malformed
//! descriptions the host either aborts on or uses to reject a scene.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A parameter without a usable default was not given.
    #[error("required parameter \"{0}\" is missing")]
    MissingParameter(&'static str),

    /// Heightfield dimensions unset or too small to form a cell.
    #[error("heightfield needs at least 2x2 samples, got nu = {nu}, nv = {nv}")]
    InvalidGridSize { nu: i32, nv: i32 },

    /// The height array does not match the grid dimensions.
    #[error("heightfield expects {expected} heights, got {found}")]
    HeightCountMismatch { expected: usize, found: usize },

    #[error("{0} vertex indices is not a multiple of 3")]
    IndexCountNotMultipleOfThree(usize),

    #[error("negative vertex index {0}")]
    NegativeVertexIndex(i32),

    #[error("vertex index {index} out of range for {n_vertices} vertices")]
    VertexIndexOutOfRange { index: usize, n_vertices: usize },

    #[error("{found} texture coordinates given for {n_vertices} vertices")]
    UvCountMismatch { found: usize, n_vertices: usize },

    #[error("shape \"{0}\" unknown")]
    UnknownShape(String),
}

pub type Result<T> = std::result::Result<T, ShapeError>;
