//! # Column Mesh
//!
//! Procedural geometry for image "column sculptures": a field of vertical
//! bars, one per visible pixel, rising with luminance.
//!
//! ## Architecture
//!
//! ```text
//! RgbaImage → voxelize → GeometryBuffer::set_bar_count → add_bar (× N) → flat arrays
//!                                                          ↓
//!                                              flat box | rounded box
//! ```
//!
//! A [`GeometryBuffer`] is sized once per rebuild from the bar count and its
//! bevel settings. Bars are then written at its cursors without further
//! allocation, and the arrays are handed to the renderer as-is.
//!
//! ## Example
//!
//! ```rust
//! use column_mesh::{BarPlacement, GeometryBuffer};
//!
//! let mut buffer = GeometryBuffer::with_bevel(0.2, 2);
//! buffer.set_bar_count(2).unwrap();
//! buffer.add_bar(&BarPlacement::new([0.0, 0.0, 0.0], [1.3, 2.0, 1.3], [0.0, 0.0])).unwrap();
//! buffer.add_bar(&BarPlacement::new([1.5, 0.0, 0.0], [1.3, 0.5, 1.3], [1.0, 0.0])).unwrap();
//! buffer.update_bounding_box();
//!
//! assert!(buffer.is_full());
//! assert_eq!(buffer.vertex_count(), 2 * 72);
//! ```

pub mod buffer;
pub mod builder;
pub mod error;
pub mod index;
pub mod shape;
pub mod voxelize;

pub use buffer::GeometryBuffer;
pub use builder::BarPlacement;
pub use error::{ColumnError, ColumnResult};
pub use image::{Rgba, RgbaImage};
pub use index::{IndexBuffer, IndexFormat};
pub use shape::BarShape;
pub use voxelize::{build_bars, downsample, grid_size, luminance, VoxelStats, Voxelized};
