//! Error types for triangulation and Voronoi operations.

use thiserror::Error;

/// Errors that can occur while building a triangulation or a Voronoi diagram.
///
/// Geometric degeneracies (collinear or coincident points) are not errors:
/// they produce empty triangle lists and missing cells. Only malformed
/// numeric input is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelaunayError {
    /// A point has a NaN or infinite coordinate.
    #[error("invalid input: point {index} has a non-finite coordinate")]
    InvalidInput {
        /// Index of the offending point.
        index: usize,
    },

    /// A flat coordinate array does not hold whole `(x, y)` pairs.
    #[error("flat coordinate array has odd length {len}")]
    OddCoordinateCount {
        /// Length of the rejected array.
        len: usize,
    },

    /// Too few usable points to form a single triangle.
    ///
    /// Only reported when degenerate results are disabled in
    /// [`TriangulatorConfig`](crate::TriangulatorConfig).
    #[error("degenerate input: {usable} usable points do not form a triangle")]
    DegenerateInput {
        /// Number of finite points that took part in the build.
        usable: usize,
    },

    /// Viewport bounds are non-finite or inverted.
    #[error("invalid viewport bounds")]
    InvalidViewport,

    /// The viewport does not intersect any Voronoi cell.
    #[error("viewport does not contain any triangulation geometry")]
    ViewportTooSmall,
}
