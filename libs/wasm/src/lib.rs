//! WASM-facing entry points for the column sculpture generator.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Native tests go through the `*_internal` helpers, which
//! return Rust errors instead of `JsValue`s and need no JS host.
//!
//! ```
//! let config = column_wasm::parse_config_internal(r#"{"barNumber": 40}"#).unwrap();
//! assert_eq!(config.bar_number, 40.0);
//! ```

use column_mesh::{voxelize, ColumnError, GeometryBuffer, RgbaImage, VoxelStats, Voxelized};
use config::constants::ColumnConfig;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;

mod sculpture_handle;

pub use sculpture_handle::SculptureHandle;

/// Errors surfaced to JavaScript as string messages.
#[derive(Error, Debug)]
pub enum SculptureError {
    /// Settings JSON could not be parsed.
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Geometry or settings validation failed.
    #[error(transparent)]
    Column(#[from] ColumnError),
}

impl From<SculptureError> for JsValue {
    fn from(err: SculptureError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Installs a panic hook that forwards Rust panics to the browser console,
/// and on wasm32 routes `log` records there too.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "column-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second call finds the logger already installed
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Returns the default slider settings as camelCase JSON.
///
/// # Examples
/// ```
/// let json = column_wasm::default_config_json();
/// assert!(json.contains("\"barNumber\":80"));
/// ```
#[wasm_bindgen]
pub fn default_config_json() -> String {
    serde_json::to_string(&ColumnConfig::default()).unwrap_or_default()
}

/// Parses and validates slider settings.
///
/// Missing fields fall back to their defaults.
///
/// # Errors
/// Returns [`SculptureError::Json`] for malformed JSON and
/// [`SculptureError::Column`] for out-of-range values.
pub fn parse_config_internal(json: &str) -> Result<ColumnConfig, SculptureError> {
    let config: ColumnConfig = serde_json::from_str(json)?;
    config.validate().map_err(ColumnError::from)?;
    Ok(config)
}

/// Wraps raw RGBA8 bytes in an image, checking the length.
///
/// # Errors
/// Returns [`ColumnError::InvalidImage`] when `pixels` is not exactly
/// `width * height * 4` bytes.
pub fn image_from_rgba_internal(
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<RgbaImage, SculptureError> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|texels| texels.checked_mul(4))
        .ok_or_else(|| {
            ColumnError::InvalidImage(format!("{width}x{height} RGBA image is too large"))
        })?;
    if pixels.len() != expected {
        return Err(ColumnError::InvalidImage(format!(
            "expected {expected} bytes for a {width}x{height} RGBA image, got {}",
            pixels.len()
        ))
        .into());
    }
    RgbaImage::from_raw(width, height, pixels.to_vec()).ok_or_else(|| {
        ColumnError::InvalidImage(format!("cannot wrap {width}x{height} pixel buffer")).into()
    })
}

/// Rebuilds `buffer` from raw RGBA8 bytes, returning the stats and the
/// bar-grid texture.
///
/// # Examples
/// ```
/// use column_mesh::GeometryBuffer;
/// use config::constants::ColumnConfig;
///
/// let pixels = vec![255u8; 4 * 4 * 4];
/// let config = ColumnConfig { bar_number: 4.0, ..ColumnConfig::default() };
/// let mut buffer = GeometryBuffer::new();
/// let voxelized = column_wasm::rebuild_internal(&mut buffer, &config, &pixels, 4, 4).unwrap();
/// assert_eq!(voxelized.stats.bar_count, 16);
/// assert_eq!(voxelized.texture.dimensions(), (4, 4));
/// ```
pub fn rebuild_internal(
    buffer: &mut GeometryBuffer,
    config: &ColumnConfig,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<Voxelized, SculptureError> {
    let image = image_from_rgba_internal(pixels, width, height)?;
    Ok(voxelize::voxelize(buffer, &image, config)?)
}

/// Rebuild summary handed to JavaScript as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebuildSummary {
    /// Bar grid width
    pub grid_width: u32,
    /// Bar grid height
    pub grid_height: u32,
    /// Bars written
    pub bar_count: usize,
    /// Vertices written
    pub vertex_count: usize,
    /// Triangles written
    pub triangle_count: usize,
}

impl RebuildSummary {
    fn new(stats: &VoxelStats, buffer: &GeometryBuffer) -> Self {
        Self {
            grid_width: stats.width,
            grid_height: stats.height,
            bar_count: stats.bar_count,
            vertex_count: buffer.vertex_count(),
            triangle_count: buffer.triangle_count(),
        }
    }
}
