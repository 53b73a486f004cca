//! # Bar Shape
//!
//! Resolves the bevel settings into the surface generator used for every bar
//! of a rebuild, and predicts how many vertices and triangles it emits.

use config::constants::{FLAT_BAR_TRIANGLE_COUNT, FLAT_BAR_VERTEX_COUNT};

/// Surface generator selected by the bevel settings.
///
/// # Example
///
/// ```rust
/// use column_mesh::BarShape;
///
/// assert_eq!(BarShape::from_bevel(0.0, 4), BarShape::Flat);
/// assert_eq!(BarShape::from_bevel(0.5, 0), BarShape::Flat);
/// assert_eq!(
///     BarShape::from_bevel(0.5, 2),
///     BarShape::Beveled { fraction: 0.5, segments: 2 }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarShape {
    /// Axis-aligned box with one flat normal per face.
    Flat,
    /// Rounded box: an ellipsoid octant at each corner, joined by flat walls
    /// and capped by flat rectangles.
    Beveled {
        /// Share of half the narrower footprint side used as radius
        fraction: f32,
        /// Latitude and longitude steps per quarter arc, at least 1
        segments: u32,
    },
}

impl BarShape {
    /// Picks the beveled generator only when both the fraction and the
    /// tessellation are positive.
    pub fn from_bevel(bevel_size: f32, bevel_segments: u32) -> Self {
        if bevel_size > 0.0 && bevel_segments > 0 {
            BarShape::Beveled {
                fraction: bevel_size,
                segments: bevel_segments,
            }
        } else {
            BarShape::Flat
        }
    }

    /// Vertices written per bar.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        match *self {
            BarShape::Flat => FLAT_BAR_VERTEX_COUNT,
            BarShape::Beveled { segments, .. } => beveled_vertex_count(segments),
        }
    }

    /// Triangles written per bar.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        match *self {
            BarShape::Flat => FLAT_BAR_TRIANGLE_COUNT,
            BarShape::Beveled { segments, .. } => beveled_triangle_count(segments),
        }
    }
}

/// Columns and rows of quads in the beveled body grid.
///
/// Columns run around all four quadrants; rows run from the upper pole ring
/// to the lower one.
///
/// # Example
///
/// ```rust
/// use column_mesh::shape::beveled_grid;
///
/// assert_eq!(beveled_grid(0), (3, 1));
/// assert_eq!(beveled_grid(2), (11, 5));
/// ```
#[inline]
pub fn beveled_grid(segments: u32) -> (usize, usize) {
    let segments = segments as usize;
    (segments * 4 + 3, segments * 2 + 1)
}

/// Vertices of a beveled bar: two rings of `(s + 1)` latitudes, each with
/// four quadrant arcs of `(s + 1)` longitudes.
#[inline]
pub fn beveled_vertex_count(segments: u32) -> usize {
    let steps = segments as usize + 1;
    steps * 4 * steps * 2
}

/// Triangles of a beveled bar: two per body grid cell plus two per cap.
#[inline]
pub fn beveled_triangle_count(segments: u32) -> usize {
    let (width_segments, height_segments) = beveled_grid(segments);
    (width_segments + 1) * height_segments * 2 + 4
}
