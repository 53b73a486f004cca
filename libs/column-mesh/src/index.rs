//! # Index Buffer
//!
//! Triangle index storage whose element width is picked from the vertex
//! count, so small sculptures upload half the index bytes.

use config::constants::U16_INDEX_LIMIT;

/// Element width of an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    /// 16-bit indices, enough for up to 65535 vertices.
    U16,
    /// 32-bit indices.
    U32,
}

impl IndexFormat {
    /// Returns the narrowest format able to address `vertex_count` vertices.
    ///
    /// # Example
    ///
    /// ```rust
    /// use column_mesh::IndexFormat;
    ///
    /// assert_eq!(IndexFormat::for_vertex_count(65535), IndexFormat::U16);
    /// assert_eq!(IndexFormat::for_vertex_count(65536), IndexFormat::U32);
    /// ```
    pub fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count > U16_INDEX_LIMIT {
            IndexFormat::U32
        } else {
            IndexFormat::U16
        }
    }

    /// Largest index value the format can hold.
    pub fn max_index(self) -> u32 {
        match self {
            IndexFormat::U16 => u16::MAX as u32,
            IndexFormat::U32 => u32::MAX,
        }
    }
}

/// Flat triangle index array, three entries per triangle.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexBuffer {
    /// 16-bit indices
    U16(Vec<u16>),
    /// 32-bit indices
    U32(Vec<u32>),
}

impl Default for IndexBuffer {
    fn default() -> Self {
        IndexBuffer::U16(Vec::new())
    }
}

impl IndexBuffer {
    /// Allocates a zeroed buffer for `triangle_count` triangles.
    pub fn zeroed(format: IndexFormat, triangle_count: usize) -> Self {
        let len = triangle_count * 3;
        match format {
            IndexFormat::U16 => IndexBuffer::U16(vec![0; len]),
            IndexFormat::U32 => IndexBuffer::U32(vec![0; len]),
        }
    }

    /// Returns the element width.
    #[inline]
    pub fn format(&self) -> IndexFormat {
        match self {
            IndexBuffer::U16(_) => IndexFormat::U16,
            IndexBuffer::U32(_) => IndexFormat::U32,
        }
    }

    /// Number of index entries (three per triangle).
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            IndexBuffer::U16(indices) => indices.len(),
            IndexBuffer::U32(indices) => indices.len(),
        }
    }

    /// Returns true if the buffer holds no indices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of triangles the buffer holds.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.len() / 3
    }

    /// Writes one triangle at triangle slot `triangle`.
    ///
    /// Callers guarantee every index fits the format; the buffer is only
    /// created as `U16` when the vertex count allows it.
    #[inline]
    pub fn set_triangle(&mut self, triangle: usize, [a, b, c]: [u32; 3]) {
        let base = triangle * 3;
        match self {
            IndexBuffer::U16(indices) => {
                debug_assert!(a.max(b).max(c) <= u16::MAX as u32);
                indices[base] = a as u16;
                indices[base + 1] = b as u16;
                indices[base + 2] = c as u16;
            }
            IndexBuffer::U32(indices) => {
                indices[base] = a;
                indices[base + 1] = b;
                indices[base + 2] = c;
            }
        }
    }

    /// Returns the triangle at slot `triangle`, widened to `u32`.
    #[inline]
    pub fn triangle(&self, triangle: usize) -> [u32; 3] {
        let base = triangle * 3;
        match self {
            IndexBuffer::U16(indices) => [
                indices[base] as u32,
                indices[base + 1] as u32,
                indices[base + 2] as u32,
            ],
            IndexBuffer::U32(indices) => [indices[base], indices[base + 1], indices[base + 2]],
        }
    }

    /// Iterates over all triangles, widened to `u32`.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        (0..self.triangle_count()).map(move |t| self.triangle(t))
    }

    /// Exports the indices widened to `u32`.
    pub fn to_u32(&self) -> Vec<u32> {
        match self {
            IndexBuffer::U16(indices) => indices.iter().map(|&i| i as u32).collect(),
            IndexBuffer::U32(indices) => indices.clone(),
        }
    }
}
