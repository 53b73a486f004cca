//! # Error Types
//!
//! Error types for bar geometry generation. All errors are explicit and
//! provide clear debugging information.
//!
//! ## Error Policy
//!
//! - Writing past the planned capacity is refused, never truncated
//! - Degenerate but finite sizes are not errors; they build flat geometry
//! - Errors include the counts involved for debugging

use config::constants::ConfigError;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while sizing or filling a geometry buffer.
///
/// ## Example
///
/// ```rust
/// use column_mesh::{BarPlacement, ColumnError, GeometryBuffer};
///
/// let mut buffer = GeometryBuffer::new();
/// buffer.set_bar_count(0).unwrap();
/// let bar = BarPlacement::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [0.0, 0.0]);
/// match buffer.add_bar(&bar) {
///     Err(ColumnError::CapacityExceeded { .. }) => {}
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColumnError {
    /// A bar did not fit in the space left by `set_bar_count`.
    ///
    /// The buffer is left untouched when this is returned.
    #[error(
        "bar needs {needed_vertices} vertices and {needed_triangles} triangles, \
         only {available_vertices} and {available_triangles} left"
    )]
    CapacityExceeded {
        /// Vertices the bar would write
        needed_vertices: usize,
        /// Vertices left before the cursor reaches capacity
        available_vertices: usize,
        /// Triangles the bar would write
        needed_triangles: usize,
        /// Triangles left before the cursor reaches capacity
        available_triangles: usize,
    },

    /// Total buffer size does not fit in `usize`.
    #[error("{bars} bars of {per_bar} elements overflow the address space")]
    CapacityOverflow {
        /// Requested bar count
        bars: usize,
        /// Elements per bar
        per_bar: usize,
    },

    /// Bar placement with a negative or non-finite component.
    #[error("Invalid bar: {0}")]
    InvalidBarSize(String),

    /// Pixel data that does not describe an RGBA8 image.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Rejected slider settings.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for column geometry operations.
pub type ColumnResult<T> = Result<T, ColumnError>;

// =============================================================================
// TESTS
// =============================================================================
