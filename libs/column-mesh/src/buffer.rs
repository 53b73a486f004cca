//! # Geometry Buffer
//!
//! Shared, pre-sized vertex and index storage for every bar of a sculpture.
//!
//! A rebuild sizes the buffer once with [`GeometryBuffer::set_bar_count`],
//! rewinds the write cursors and appends bars one by one. Storage is only
//! reallocated when the total size changes, so repeated rebuilds with the same
//! bar count and bevel settings reuse the same allocations.

use config::constants::{DEFAULT_BAR_BEVEL, DEFAULT_BEVEL_SEGMENTS};
use glam::{Vec2, Vec3};
use log::debug;

use crate::builder::{self, BarPlacement};
use crate::error::{ColumnError, ColumnResult};
use crate::index::{IndexBuffer, IndexFormat};
use crate::shape::BarShape;

/// Parallel vertex attribute arrays plus a triangle index array.
///
/// # Example
///
/// ```rust
/// use column_mesh::{BarPlacement, GeometryBuffer};
///
/// let mut buffer = GeometryBuffer::with_bevel(0.0, 0);
/// buffer.set_bar_count(2).unwrap();
/// buffer.reset_offset();
///
/// buffer.add_bar(&BarPlacement::new([0.0, 0.0, 0.0], [1.0, 2.0, 1.0], [0.0, 0.0])).unwrap();
/// buffer.add_bar(&BarPlacement::new([1.5, 0.0, 0.0], [1.0, 3.0, 1.0], [1.0, 0.0])).unwrap();
///
/// assert!(buffer.is_full());
/// assert_eq!(buffer.vertex_count(), 48);
/// assert_eq!(buffer.triangle_count(), 24);
/// ```
#[derive(Debug, Clone)]
pub struct GeometryBuffer {
    /// Bevel fraction; zero or negative selects flat bars
    bevel_size: f32,
    /// Bevel tessellation level; zero selects flat bars
    bevel_segments: u32,
    /// Vertex positions
    positions: Vec<Vec3>,
    /// Unit vertex normals
    normals: Vec<Vec3>,
    /// One UV per bar, repeated on each of its vertices
    texcoords: Vec<Vec2>,
    /// Triangle indices, width chosen from the vertex count
    indices: IndexBuffer,
    /// Next vertex slot to write
    vertex_offset: usize,
    /// Next triangle slot to write
    triangle_offset: usize,
    /// Bounds over written positions, refreshed by `update_bounding_box`
    bounds: Option<(Vec3, Vec3)>,
}

impl Default for GeometryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryBuffer {
    /// Creates an empty buffer with the default bevel settings.
    pub fn new() -> Self {
        Self::with_bevel(DEFAULT_BAR_BEVEL, DEFAULT_BEVEL_SEGMENTS)
    }

    /// Creates an empty buffer with explicit bevel settings.
    pub fn with_bevel(bevel_size: f32, bevel_segments: u32) -> Self {
        Self {
            bevel_size,
            bevel_segments,
            positions: Vec::new(),
            normals: Vec::new(),
            texcoords: Vec::new(),
            indices: IndexBuffer::default(),
            vertex_offset: 0,
            triangle_offset: 0,
            bounds: None,
        }
    }

    // =========================================================================
    // BEVEL SETTINGS
    // =========================================================================

    /// Changes the bevel settings.
    ///
    /// Takes effect on the next `set_bar_count`; changing it in the middle of a
    /// pass makes the remaining bars mismatch the planned capacity.
    pub fn set_bevel(&mut self, bevel_size: f32, bevel_segments: u32) {
        self.bevel_size = bevel_size;
        self.bevel_segments = bevel_segments;
    }

    /// Returns the bevel fraction.
    #[inline]
    pub fn bevel_size(&self) -> f32 {
        self.bevel_size
    }

    /// Returns the bevel tessellation level.
    #[inline]
    pub fn bevel_segments(&self) -> u32 {
        self.bevel_segments
    }

    /// Returns the generator the current bevel settings select.
    #[inline]
    pub fn shape(&self) -> BarShape {
        BarShape::from_bevel(self.bevel_size, self.bevel_segments)
    }

    /// Vertices each `add_bar` call writes.
    #[inline]
    pub fn vertices_per_bar(&self) -> usize {
        self.shape().vertex_count()
    }

    /// Triangles each `add_bar` call writes.
    #[inline]
    pub fn triangles_per_bar(&self) -> usize {
        self.shape().triangle_count()
    }

    // =========================================================================
    // CAPACITY
    // =========================================================================

    /// Sizes the storage for exactly `bar_count` bars.
    ///
    /// Attribute arrays are reallocated only when the total vertex count
    /// changes. The index array is reallocated when the triangle count or the
    /// required index width changes; 32-bit indices are used once the total
    /// exceeds 65535 vertices.
    ///
    /// Cached bounds are dropped. Cursors are left alone; call
    /// [`reset_offset`](Self::reset_offset) before adding bars.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnError::CapacityOverflow`] when the totals do not fit
    /// the address space or a 32-bit index.
    pub fn set_bar_count(&mut self, bar_count: usize) -> ColumnResult<()> {
        let vertex_count = checked_total(bar_count, self.vertices_per_bar())?;
        let triangle_count = checked_total(bar_count, self.triangles_per_bar())?;
        if u32::try_from(vertex_count).is_err() || triangle_count.checked_mul(3).is_none() {
            return Err(ColumnError::CapacityOverflow {
                bars: bar_count,
                per_bar: self.vertices_per_bar(),
            });
        }

        if self.positions.len() != vertex_count {
            self.positions = vec![Vec3::ZERO; vertex_count];
            self.normals = vec![Vec3::ZERO; vertex_count];
            self.texcoords = vec![Vec2::ZERO; vertex_count];
            debug!("Reallocated vertex storage: {vertex_count} vertices for {bar_count} bars");
        }

        let format = IndexFormat::for_vertex_count(vertex_count);
        if self.indices.triangle_count() != triangle_count || self.indices.format() != format {
            self.indices = IndexBuffer::zeroed(format, triangle_count);
            debug!("Reallocated index storage: {triangle_count} triangles as {format:?}");
        }

        self.bounds = None;
        Ok(())
    }

    /// Rewinds both write cursors to the start of the buffer.
    pub fn reset_offset(&mut self) {
        self.vertex_offset = 0;
        self.triangle_offset = 0;
    }

    /// Allocated vertex count.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Allocated triangle count.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.triangle_count()
    }

    /// Vertex write cursor.
    #[inline]
    pub fn vertex_offset(&self) -> usize {
        self.vertex_offset
    }

    /// Triangle write cursor.
    #[inline]
    pub fn triangle_offset(&self) -> usize {
        self.triangle_offset
    }

    /// Returns true once both cursors reached the allocated capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.vertex_offset == self.vertex_count() && self.triangle_offset == self.triangle_count()
    }

    /// Returns true if no storage is allocated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    // =========================================================================
    // WRITING
    // =========================================================================

    /// Appends one bar at the write cursors.
    ///
    /// # Errors
    ///
    /// - [`ColumnError::InvalidBarSize`] for negative or non-finite values
    /// - [`ColumnError::CapacityExceeded`] when the bar does not fit; nothing
    ///   is written in that case
    pub fn add_bar(&mut self, bar: &BarPlacement) -> ColumnResult<()> {
        builder::add_bar(self, bar)
    }

    /// Writes one vertex at the vertex cursor and advances it.
    #[inline]
    pub(crate) fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) {
        let slot = self.vertex_offset;
        debug_assert!(slot < self.positions.len(), "vertex cursor past capacity");
        self.positions[slot] = position;
        self.normals[slot] = normal;
        self.texcoords[slot] = uv;
        self.vertex_offset += 1;
    }

    /// Writes one triangle at the triangle cursor and advances it.
    #[inline]
    pub(crate) fn push_triangle(&mut self, triangle: [u32; 3]) {
        let slot = self.triangle_offset;
        debug_assert!(slot < self.triangle_count(), "triangle cursor past capacity");
        self.indices.set_triangle(slot, triangle);
        self.triangle_offset += 1;
    }

    // =========================================================================
    // ACCESS
    // =========================================================================

    /// Returns all vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Returns all vertex normals.
    #[inline]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Returns all vertex texture coordinates.
    #[inline]
    pub fn texcoords(&self) -> &[Vec2] {
        &self.texcoords
    }

    /// Returns the triangle indices.
    #[inline]
    pub fn indices(&self) -> &IndexBuffer {
        &self.indices
    }

    /// Returns the index element width.
    #[inline]
    pub fn index_format(&self) -> IndexFormat {
        self.indices.format()
    }

    /// Recomputes the axis-aligned bounds over the written positions.
    pub fn update_bounding_box(&mut self) {
        let written = &self.positions[..self.vertex_offset];
        self.bounds = written.split_first().map(|(&first, rest)| {
            rest.iter()
                .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)))
        });
    }

    /// Returns the bounds computed by the last `update_bounding_box`.
    ///
    /// `None` when nothing was written or the buffer was resized since.
    #[inline]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        self.bounds
    }

    /// Exports positions as a flat [x, y, z, ...] array for GPU upload.
    pub fn positions_f32(&self) -> Vec<f32> {
        flatten3(&self.positions)
    }

    /// Exports normals as a flat [x, y, z, ...] array for GPU upload.
    pub fn normals_f32(&self) -> Vec<f32> {
        flatten3(&self.normals)
    }

    /// Exports texture coordinates as a flat [u, v, ...] array for GPU upload.
    pub fn texcoords_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.texcoords.len() * 2);
        for uv in &self.texcoords {
            result.push(uv.x);
            result.push(uv.y);
        }
        result
    }

    /// Exports the indices widened to `u32`.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.indices.to_u32()
    }
}

fn checked_total(bar_count: usize, per_bar: usize) -> ColumnResult<usize> {
    bar_count
        .checked_mul(per_bar)
        .ok_or(ColumnError::CapacityOverflow {
            bars: bar_count,
            per_bar,
        })
}

fn flatten3(values: &[Vec3]) -> Vec<f32> {
    let mut result = Vec::with_capacity(values.len() * 3);
    for v in values {
        result.push(v.x);
        result.push(v.y);
        result.push(v.z);
    }
    result
}
