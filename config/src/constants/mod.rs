//! Centralized configuration values shared across the column sculpture
//! pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// BAR GEOMETRY
// =============================================================================

/// Vertices emitted for a bar without bevel: 6 faces × 4 corners, unshared so
/// each face keeps its own flat normal.
///
/// # Examples
/// ```
/// use config::constants::FLAT_BAR_VERTEX_COUNT;
/// assert_eq!(FLAT_BAR_VERTEX_COUNT, 24);
/// ```
pub const FLAT_BAR_VERTEX_COUNT: usize = 24;

/// Triangles emitted for a bar without bevel: 6 faces × 2 triangles.
///
/// # Examples
/// ```
/// use config::constants::FLAT_BAR_TRIANGLE_COUNT;
/// assert_eq!(FLAT_BAR_TRIANGLE_COUNT, 12);
/// ```
pub const FLAT_BAR_TRIANGLE_COUNT: usize = 12;

/// Largest vertex count that a 16-bit index buffer can address.
///
/// # Examples
/// ```
/// use config::constants::U16_INDEX_LIMIT;
/// assert_eq!(U16_INDEX_LIMIT, 0xffff);
/// ```
pub const U16_INDEX_LIMIT: usize = 0xffff;

/// Tolerance under which the three bevel radii count as equal, making the
/// rounded corner a sphere octant.
///
/// # Examples
/// ```
/// use config::constants::RADIUS_EQUALITY_EPSILON;
/// assert!(RADIUS_EQUALITY_EPSILON < 1.0e-3);
/// ```
pub const RADIUS_EQUALITY_EPSILON: f32 = 1.0e-6;

/// Allowed deviation of an emitted normal from unit length.
///
/// # Examples
/// ```
/// use config::constants::NORMAL_TOLERANCE;
/// let n = [0.0_f32, 1.0, 0.0];
/// let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
/// assert!((len - 1.0).abs() < NORMAL_TOLERANCE);
/// ```
pub const NORMAL_TOLERANCE: f32 = 1.0e-5;

/// Upper bound on bevel tessellation. Vertex count grows with the square of
/// the segment count.
///
/// # Examples
/// ```
/// use config::constants::MAX_BEVEL_SEGMENTS;
/// assert!(MAX_BEVEL_SEGMENTS >= 8);
/// ```
pub const MAX_BEVEL_SEGMENTS: u32 = 32;

// =============================================================================
// VOXELIZER
// =============================================================================

/// Distance between neighbouring bar origins on the XZ grid.
///
/// # Examples
/// ```
/// use config::constants::{BAR_SPACING, DEFAULT_BAR_SIZE};
/// assert!(BAR_SPACING > DEFAULT_BAR_SIZE);
/// ```
pub const BAR_SPACING: f32 = 1.5;

/// Height of the bar built from the darkest pixel.
///
/// # Examples
/// ```
/// use config::constants::MIN_BAR_HEIGHT;
/// assert!(MIN_BAR_HEIGHT > 0.0);
/// ```
pub const MIN_BAR_HEIGHT: f32 = 0.1;

/// Pixels with alpha at or below this value produce no bar.
///
/// # Examples
/// ```
/// use config::constants::ALPHA_VISIBILITY_THRESHOLD;
/// let visible = |alpha: u8| alpha > ALPHA_VISIBILITY_THRESHOLD;
/// assert!(!visible(0));
/// assert!(visible(255));
/// ```
pub const ALPHA_VISIBILITY_THRESHOLD: u8 = 1;

/// Rec. 709 luminance weights for red, green and blue.
///
/// # Examples
/// ```
/// use config::constants::LUMINANCE_WEIGHTS;
/// let sum: f32 = LUMINANCE_WEIGHTS.iter().sum();
/// assert!((sum - 1.0).abs() < 1.0e-3);
/// ```
pub const LUMINANCE_WEIGHTS: [f32; 3] = [0.2125, 0.7154, 0.0721];

/// Largest bar grid height accepted from the slider.
///
/// # Examples
/// ```
/// use config::constants::{MAX_BAR_NUMBER, DEFAULT_BAR_NUMBER};
/// assert!(DEFAULT_BAR_NUMBER <= MAX_BAR_NUMBER);
/// ```
pub const MAX_BAR_NUMBER: f32 = 256.0;

// =============================================================================
// SLIDER DEFAULTS
// =============================================================================

/// Default number of bars along the image height.
pub const DEFAULT_BAR_NUMBER: f32 = 80.0;

/// Default bar width and depth.
pub const DEFAULT_BAR_SIZE: f32 = 1.3;

/// Default bevel fraction.
pub const DEFAULT_BAR_BEVEL: f32 = 0.1;

/// Default bevel tessellation level.
pub const DEFAULT_BEVEL_SEGMENTS: u32 = 2;

/// Default luminance-to-height scale.
pub const DEFAULT_HEIGHT_SCALE: f32 = 0.3;

/// Slider settings driving one sculpture rebuild.
///
/// Field names serialize in camelCase so the JavaScript panel can hand its
/// state over unchanged. Missing fields take their defaults.
///
/// # Examples
/// ```
/// use config::constants::ColumnConfig;
/// let config = ColumnConfig::default();
/// assert!(config.validate().is_ok());
/// assert!(config.bar_bevel > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnConfig {
    /// Bars along the image height; the width follows the aspect ratio.
    pub bar_number: f32,
    /// Width and depth of every bar.
    pub bar_size: f32,
    /// Bevel fraction in `0..=1`; zero selects sharp cubes.
    pub bar_bevel: f32,
    /// Bevel tessellation level; zero selects sharp cubes.
    pub bevel_segments: u32,
    /// Luminance-to-height scale.
    pub scale: f32,
}

impl ColumnConfig {
    /// Builds a configuration, rejecting values the geometry cannot use.
    ///
    /// # Examples
    /// ```
    /// use config::constants::ColumnConfig;
    /// let cfg = ColumnConfig::new(40.0, 1.0, 0.5, 4, 0.3).expect("valid config");
    /// assert_eq!(cfg.bevel_segments, 4);
    /// assert!(ColumnConfig::new(40.0, 1.0, 1.5, 4, 0.3).is_err());
    /// ```
    pub fn new(
        bar_number: f32,
        bar_size: f32,
        bar_bevel: f32,
        bevel_segments: u32,
        scale: f32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            bar_number,
            bar_size,
            bar_bevel,
            bevel_segments,
            scale,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every field against its accepted range.
    ///
    /// Deserialized configurations skip `new`, so callers taking JSON must
    /// run this before building.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=MAX_BAR_NUMBER).contains(&self.bar_number) {
            return Err(ConfigError::InvalidBarNumber(self.bar_number));
        }
        if !self.bar_size.is_finite() || self.bar_size < 0.0 {
            return Err(ConfigError::InvalidBarSize(self.bar_size));
        }
        if !(0.0..=1.0).contains(&self.bar_bevel) {
            return Err(ConfigError::InvalidBevel(self.bar_bevel));
        }
        if self.bevel_segments > MAX_BEVEL_SEGMENTS {
            return Err(ConfigError::InvalidSegments(self.bevel_segments));
        }
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        Ok(())
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            bar_number: DEFAULT_BAR_NUMBER,
            bar_size: DEFAULT_BAR_SIZE,
            bar_bevel: DEFAULT_BAR_BEVEL,
            bevel_segments: DEFAULT_BEVEL_SEGMENTS,
            scale: DEFAULT_HEIGHT_SCALE,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when the bar number is negative, non-finite or above the limit.
    InvalidBarNumber(f32),
    /// Raised when the bar size is negative or non-finite.
    InvalidBarSize(f32),
    /// Raised when the bevel fraction falls outside `0..=1`.
    InvalidBevel(f32),
    /// Raised when the bevel tessellation exceeds `MAX_BEVEL_SEGMENTS`.
    InvalidSegments(u32),
    /// Raised when the height scale is negative or non-finite.
    InvalidScale(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBarNumber(value) => {
                write!(f, "bar_number must be within 0..={MAX_BAR_NUMBER}: {value}")
            }
            ConfigError::InvalidBarSize(value) => {
                write!(f, "bar_size must be finite and non-negative: {value}")
            }
            ConfigError::InvalidBevel(value) => {
                write!(f, "bar_bevel must be within 0..=1: {value}")
            }
            ConfigError::InvalidSegments(value) => {
                write!(
                    f,
                    "bevel_segments must be <= {MAX_BEVEL_SEGMENTS}: {value}"
                )
            }
            ConfigError::InvalidScale(value) => {
                write!(f, "scale must be finite and non-negative: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
