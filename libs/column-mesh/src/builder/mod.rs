//! # Bar Mesh Builder
//!
//! Appends one bar's surface to a [`GeometryBuffer`] at its write cursors.
//! The buffer's bevel settings pick between the flat box and the rounded
//! box generator; both write exactly the counts that
//! [`BarShape`](crate::shape::BarShape) predicts.

mod beveled;
mod flat;

use glam::{Vec2, Vec3};

use crate::buffer::GeometryBuffer;
use crate::error::{ColumnError, ColumnResult};
use crate::shape::BarShape;

/// Placement of a single bar.
///
/// The bar stands on `start`: it spans `size.x` and `size.z` centered on the
/// start point and rises `size.y` above it. Every vertex of the bar carries
/// the same `uv`, so the texture is sampled once per bar.
///
/// # Example
///
/// ```rust
/// use column_mesh::BarPlacement;
///
/// let bar = BarPlacement::new([1.5, 0.0, -3.0], [1.3, 4.2, 1.3], [0.25, 0.75]);
/// assert_eq!(bar.size.y, 4.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPlacement {
    /// Bottom center of the bar
    pub start: Vec3,
    /// Width, height and depth
    pub size: Vec3,
    /// Texture coordinate shared by all vertices of the bar
    pub uv: Vec2,
}

impl BarPlacement {
    /// Creates a placement from anything convertible to glam vectors.
    pub fn new(start: impl Into<Vec3>, size: impl Into<Vec3>, uv: impl Into<Vec2>) -> Self {
        Self {
            start: start.into(),
            size: size.into(),
            uv: uv.into(),
        }
    }

    /// Rejects non-finite values and negative extents.
    ///
    /// Zero extents are valid and build degenerate, flat bars.
    pub fn validate(&self) -> ColumnResult<()> {
        if !self.start.is_finite() || !self.uv.is_finite() {
            return Err(ColumnError::InvalidBarSize(format!(
                "non-finite placement: start {:?}, uv {:?}",
                self.start, self.uv
            )));
        }
        if !self.size.is_finite() || self.size.min_element() < 0.0 {
            return Err(ColumnError::InvalidBarSize(format!(
                "size must be finite and non-negative: {:?}",
                self.size
            )));
        }
        Ok(())
    }
}

/// Writes one bar into `buffer`, refusing it when it would overrun the
/// capacity planned by `set_bar_count`.
pub(crate) fn add_bar(buffer: &mut GeometryBuffer, bar: &BarPlacement) -> ColumnResult<()> {
    bar.validate()?;

    let shape = buffer.shape();
    let needed_vertices = shape.vertex_count();
    let needed_triangles = shape.triangle_count();
    let available_vertices = buffer.vertex_count().saturating_sub(buffer.vertex_offset());
    let available_triangles = buffer
        .triangle_count()
        .saturating_sub(buffer.triangle_offset());
    if needed_vertices > available_vertices || needed_triangles > available_triangles {
        return Err(ColumnError::CapacityExceeded {
            needed_vertices,
            available_vertices,
            needed_triangles,
            available_triangles,
        });
    }

    let vertex_start = buffer.vertex_offset();
    let triangle_start = buffer.triangle_offset();

    match shape {
        BarShape::Flat => flat::build(buffer, bar),
        BarShape::Beveled { fraction, segments } => beveled::build(buffer, bar, fraction, segments),
    }

    debug_assert_eq!(buffer.vertex_offset() - vertex_start, needed_vertices);
    debug_assert_eq!(buffer.triangle_offset() - triangle_start, needed_triangles);
    Ok(())
}
