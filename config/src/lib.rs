//! # Config Crate
//!
//! Centralized configuration for the column sculpture pipeline.
//! Geometry constants, voxelizer tuning and slider defaults are defined here
//! so that the mesh crate and the WASM front end agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{ColumnConfig, FLAT_BAR_VERTEX_COUNT, U16_INDEX_LIMIT};
//!
//! // A flat bar is six faces of four unshared corners
//! assert_eq!(FLAT_BAR_VERTEX_COUNT, 6 * 4);
//!
//! // 16-bit indices can address up to 65535 vertices
//! assert_eq!(U16_INDEX_LIMIT, u16::MAX as usize);
//!
//! let config = ColumnConfig::default();
//! assert_eq!(config.bar_number, 80.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Validated**: Slider values pass through `ColumnConfig::new`

pub mod constants;
