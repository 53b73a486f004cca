//! # Sculpture Handle
//!
//! Long-lived geometry owner that JavaScript rebuilds on every slider change.

use column_mesh::{GeometryBuffer, IndexBuffer, RgbaImage};
use config::constants::ColumnConfig;
use wasm_bindgen::prelude::*;

use crate::{parse_config_internal, rebuild_internal, RebuildSummary, SculptureError};

/// Geometry buffer plus the settings it is rebuilt with.
///
/// The buffer keeps its storage between rebuilds, so dragging a slider that
/// does not change the bar count or bevel tessellation never reallocates.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const sculpture = new SculptureHandle();
/// sculpture.set_config_json(JSON.stringify({ barNumber: 60, barBevel: 0.3 }));
///
/// const { data, width, height } = ctx.getImageData(0, 0, w, h);
/// sculpture.rebuild(data, width, height);
///
/// const geometry = new THREE.BufferGeometry();
/// geometry.setAttribute('position', new THREE.BufferAttribute(sculpture.positions(), 3));
/// geometry.setAttribute('normal', new THREE.BufferAttribute(sculpture.normals(), 3));
/// geometry.setAttribute('uv', new THREE.BufferAttribute(sculpture.texcoords(), 2));
/// geometry.setIndex(new THREE.BufferAttribute(sculpture.indices(), 1));
///
/// const texture = new THREE.DataTexture(
///     sculpture.texture_pixels(), sculpture.texture_width, sculpture.texture_height);
/// texture.magFilter = texture.minFilter = THREE.NearestFilter;
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct SculptureHandle {
    buffer: GeometryBuffer,
    config: ColumnConfig,
    summary: Option<RebuildSummary>,
    /// Bar grid of the last rebuild; bar UVs index into it
    texture: RgbaImage,
}

impl Default for SculptureHandle {
    fn default() -> Self {
        Self {
            buffer: GeometryBuffer::new(),
            config: ColumnConfig::default(),
            summary: None,
            texture: RgbaImage::new(0, 0),
        }
    }
}

#[wasm_bindgen]
impl SculptureHandle {
    /// Creates an empty sculpture with the default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the settings from camelCase JSON; takes effect on the next
    /// rebuild.
    ///
    /// # Errors
    /// Rejects malformed JSON and out-of-range values, keeping the previous
    /// settings.
    pub fn set_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.set_config_internal(json)?;
        Ok(())
    }

    /// Returns the current settings as camelCase JSON.
    pub fn config_json(&self) -> String {
        serde_json::to_string(&self.config).unwrap_or_default()
    }

    /// Rebuilds the geometry from RGBA8 pixels (e.g. `ImageData.data`).
    ///
    /// Returns the number of bars written.
    ///
    /// # Errors
    /// Rejects a pixel buffer whose length does not match the size.
    pub fn rebuild(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<u32, JsValue> {
        let summary = self.rebuild_with(pixels, width, height)?;
        Ok(saturating_u32(summary.bar_count))
    }

    /// Returns the last rebuild summary as JSON, or `null`.
    pub fn summary_json(&self) -> String {
        serde_json::to_string(&self.summary).unwrap_or_default()
    }

    /// Returns the number of vertices.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> u32 {
        saturating_u32(self.buffer.vertex_count())
    }

    /// Returns the number of triangles.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> u32 {
        saturating_u32(self.buffer.triangle_count())
    }

    /// Returns true when `indices()` yields a Uint32Array.
    #[wasm_bindgen(getter)]
    pub fn uses_u32_indices(&self) -> bool {
        matches!(self.buffer.indices(), IndexBuffer::U32(_))
    }

    /// Returns the vertex positions as a Float32Array.
    ///
    /// Format: [x, y, z, x, y, z, ...]
    pub fn positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.buffer.positions_f32()[..])
    }

    /// Returns the unit vertex normals as a Float32Array.
    pub fn normals(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.buffer.normals_f32()[..])
    }

    /// Returns the per-vertex texture coordinates as a Float32Array.
    ///
    /// Format: [u, v, u, v, ...]
    pub fn texcoords(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.buffer.texcoords_f32()[..])
    }

    /// Returns the triangle indices as a Uint16Array or Uint32Array,
    /// whichever the buffer was sized for.
    pub fn indices(&self) -> JsValue {
        match self.buffer.indices() {
            IndexBuffer::U16(indices) => js_sys::Uint16Array::from(&indices[..]).into(),
            IndexBuffer::U32(indices) => js_sys::Uint32Array::from(&indices[..]).into(),
        }
    }

    /// Returns the bar-grid texture as RGBA8 bytes, row by row from the top.
    ///
    /// Sample it with nearest filtering so each bar shows its own pixel.
    pub fn texture_pixels(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.texture.as_raw().as_slice())
    }

    /// Returns the texture width in texels.
    #[wasm_bindgen(getter)]
    pub fn texture_width(&self) -> u32 {
        self.texture.width()
    }

    /// Returns the texture height in texels.
    #[wasm_bindgen(getter)]
    pub fn texture_height(&self) -> u32 {
        self.texture.height()
    }

    /// Returns `[minX, minY, minZ, maxX, maxY, maxZ]`, or an empty array
    /// for an empty sculpture.
    pub fn bounding_box(&self) -> Vec<f32> {
        self.bounds().map(|b| b.to_vec()).unwrap_or_default()
    }
}

impl SculptureHandle {
    /// Host-side settings update.
    pub fn set_config_internal(&mut self, json: &str) -> Result<(), SculptureError> {
        self.config = parse_config_internal(json)?;
        Ok(())
    }

    /// Host-side rebuild.
    pub fn rebuild_with(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<RebuildSummary, SculptureError> {
        let voxelized = rebuild_internal(&mut self.buffer, &self.config, pixels, width, height)?;
        let summary = RebuildSummary::new(&voxelized.stats, &self.buffer);
        self.summary = Some(summary);
        self.texture = voxelized.texture;
        Ok(summary)
    }

    /// Current settings.
    pub fn config(&self) -> &ColumnConfig {
        &self.config
    }

    /// Bar-grid texture of the last rebuild.
    pub fn texture(&self) -> &RgbaImage {
        &self.texture
    }

    /// Underlying geometry.
    pub fn buffer(&self) -> &GeometryBuffer {
        &self.buffer
    }

    /// Bounds flattened as min then max.
    pub fn bounds(&self) -> Option<[f32; 6]> {
        self.buffer.bounding_box().map(|(min, max)| {
            [min.x, min.y, min.z, max.x, max.y, max.z]
        })
    }
}

/// Clamps a count to the `u32` range JavaScript getters report.
#[inline]
pub(crate) fn saturating_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
