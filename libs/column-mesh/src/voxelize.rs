//! # Voxelizer
//!
//! Drives a full rebuild of a [`GeometryBuffer`] from an RGBA image: one bar
//! per visible pixel of the image downsampled to the configured resolution,
//! rising with the pixel's luminance.
//!
//! The downsampled image doubles as the sculpture's texture. Each bar's UV
//! points at its own pixel of that image, so the texture must be built from
//! the same [`downsample`] call as the geometry.

use config::constants::{
    ColumnConfig, ALPHA_VISIBILITY_THRESHOLD, BAR_SPACING, LUMINANCE_WEIGHTS, MIN_BAR_HEIGHT,
};
use glam::{Vec2, Vec3};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::{trace, warn};

use crate::buffer::GeometryBuffer;
use crate::builder::BarPlacement;
use crate::error::ColumnResult;

/// Summary of a rebuild.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelStats {
    /// Bar grid width in pixels
    pub width: u32,
    /// Bar grid height in pixels
    pub height: u32,
    /// Bars written, one per visible pixel
    pub bar_count: usize,
    /// Darkest luminance in the grid, 0 for an empty grid
    pub min_luminance: f32,
    /// Brightest luminance in the grid, 0 for an empty grid
    pub max_luminance: f32,
}

/// Result of a full rebuild: the stats plus the texture the UVs index.
///
/// Upload `texture` with nearest filtering so every bar samples exactly its
/// own pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Voxelized {
    /// Rebuild summary
    pub stats: VoxelStats,
    /// Bar grid the geometry was built from, one texel per bar
    pub texture: RgbaImage,
}

/// Bar grid size for an image: `bar_number` rows and as many columns as keep
/// the aspect ratio.
///
/// # Example
///
/// ```rust
/// use column_mesh::voxelize::grid_size;
///
/// assert_eq!(grid_size(200, 100, 80.0), (160, 80));
/// assert_eq!(grid_size(0, 0, 80.0), (0, 0));
/// ```
pub fn grid_size(image_width: u32, image_height: u32, bar_number: f32) -> (u32, u32) {
    if image_width == 0 || image_height == 0 {
        return (0, 0);
    }
    let height = bar_number.round();
    let width = (bar_number / image_height as f32 * image_width as f32).round();
    (width as u32, height as u32)
}

/// Resamples `image` to the bar grid with a bilinear filter.
pub fn downsample(image: &RgbaImage, config: &ColumnConfig) -> RgbaImage {
    let (width, height) = grid_size(image.width(), image.height(), config.bar_number);
    if width == 0 || height == 0 {
        return RgbaImage::new(0, 0);
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}

/// Rec. 709 luminance of a pixel in `0..=255`, ignoring alpha.
#[inline]
pub fn luminance(pixel: &Rgba<u8>) -> f32 {
    let [r, g, b, _] = pixel.0;
    LUMINANCE_WEIGHTS[0] * r as f32 + LUMINANCE_WEIGHTS[1] * g as f32 + LUMINANCE_WEIGHTS[2] * b as f32
}

/// Returns true if the pixel is opaque enough to produce a bar.
#[inline]
pub fn is_visible(pixel: &Rgba<u8>) -> bool {
    pixel.0[3] > ALPHA_VISIBILITY_THRESHOLD
}

/// Rebuilds `buffer` from a full-resolution image and returns the
/// downsampled texture the bar UVs point into.
///
/// # Errors
///
/// Returns the configuration error for out-of-range settings.
///
/// # Example
///
/// ```rust
/// use column_mesh::{voxelize, GeometryBuffer, Rgba, RgbaImage};
/// use config::constants::ColumnConfig;
///
/// let image = RgbaImage::from_pixel(8, 4, Rgba([200, 100, 50, 255]));
/// let config = ColumnConfig { bar_number: 2.0, ..ColumnConfig::default() };
///
/// let mut buffer = GeometryBuffer::new();
/// let voxelized = voxelize::voxelize(&mut buffer, &image, &config).unwrap();
/// assert_eq!((voxelized.stats.width, voxelized.stats.height), (4, 2));
/// assert_eq!(voxelized.texture.dimensions(), (4, 2));
/// assert_eq!(voxelized.stats.bar_count, 8);
/// assert!(buffer.is_full());
/// ```
pub fn voxelize(
    buffer: &mut GeometryBuffer,
    image: &RgbaImage,
    config: &ColumnConfig,
) -> ColumnResult<Voxelized> {
    config.validate()?;
    let grid = downsample(image, config);
    if grid.width() == 0 || grid.height() == 0 {
        warn!(
            "Empty bar grid for a {}x{} image at bar number {}",
            image.width(),
            image.height(),
            config.bar_number
        );
    }
    let stats = build_bars(buffer, &grid, config)?;
    Ok(Voxelized {
        stats,
        texture: grid,
    })
}

/// Rebuilds `buffer` from an image already at bar resolution.
///
/// Sizes the buffer for the visible pixels, rewinds it, writes one bar per
/// visible pixel in row-major order and refreshes the bounds.
pub fn build_bars(
    buffer: &mut GeometryBuffer,
    grid: &RgbaImage,
    config: &ColumnConfig,
) -> ColumnResult<VoxelStats> {
    let (width, height) = grid.dimensions();

    let mut bar_count = 0;
    let mut min_luminance = f32::INFINITY;
    let mut max_luminance = f32::NEG_INFINITY;
    for pixel in grid.pixels() {
        let lum = luminance(pixel);
        min_luminance = min_luminance.min(lum);
        max_luminance = max_luminance.max(lum);
        if is_visible(pixel) {
            bar_count += 1;
        }
    }
    if width == 0 || height == 0 {
        min_luminance = 0.0;
        max_luminance = 0.0;
    }

    buffer.set_bevel(config.bar_bevel, config.bevel_segments);
    buffer.set_bar_count(bar_count)?;
    buffer.reset_offset();

    let half_width = width as f32 / 2.0;
    let half_height = height as f32 / 2.0;
    for (x, y, pixel) in grid.enumerate_pixels() {
        if !is_visible(pixel) {
            continue;
        }
        let start = Vec3::new(
            (x as f32 - half_width) * BAR_SPACING,
            0.0,
            (y as f32 - half_height) * BAR_SPACING,
        );
        let bar_height = (luminance(pixel) - min_luminance) * config.scale / 2.0 + MIN_BAR_HEIGHT;
        let uv = Vec2::new(grid_coordinate(x, width), grid_coordinate(y, height));

        buffer.add_bar(&BarPlacement::new(
            start,
            Vec3::new(config.bar_size, bar_height, config.bar_size),
            uv,
        ))?;
    }
    debug_assert!(buffer.is_full());

    buffer.update_bounding_box();
    trace!(
        "Built {bar_count} bars on a {width}x{height} grid: {} vertices, {} triangles",
        buffer.vertex_count(),
        buffer.triangle_count()
    );

    Ok(VoxelStats {
        width,
        height,
        bar_count,
        min_luminance,
        max_luminance,
    })
}

/// Maps a pixel index onto `0..=1`; a single-pixel axis maps to 0.
#[inline]
fn grid_coordinate(index: u32, extent: u32) -> f32 {
    if extent > 1 {
        index as f32 / (extent - 1) as f32
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_config() -> ColumnConfig {
        ColumnConfig {
            bar_bevel: 0.0,
            bevel_segments: 0,
            ..ColumnConfig::default()
        }
    }

    #[test]
    fn test_grid_size_keeps_aspect() {
        assert_eq!(grid_size(100, 50, 80.0), (160, 80));
        assert_eq!(grid_size(50, 100, 80.0), (40, 80));
        assert_eq!(grid_size(3, 3, 2.4), (2, 2));
        assert_eq!(grid_size(100, 100, 0.0), (0, 0));
    }

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance(&Rgba([0, 0, 0, 255])), 0.0);
        assert_relative_eq!(luminance(&Rgba([255, 255, 255, 255])), 255.0, epsilon = 0.1);
        assert_relative_eq!(luminance(&Rgba([0, 255, 0, 0])), 0.7154 * 255.0, epsilon = 1e-3);
    }

    #[test]
    fn test_visibility_threshold() {
        assert!(!is_visible(&Rgba([255, 255, 255, 0])));
        assert!(!is_visible(&Rgba([255, 255, 255, 1])));
        assert!(is_visible(&Rgba([255, 255, 255, 2])));
    }

    #[test]
    fn test_transparent_pixels_make_no_bars() {
        let mut grid = RgbaImage::from_pixel(3, 2, Rgba([10, 10, 10, 255]));
        grid.put_pixel(0, 0, Rgba([255, 255, 255, 0]));
        grid.put_pixel(2, 1, Rgba([255, 255, 255, 1]));

        let mut buffer = GeometryBuffer::new();
        let stats = build_bars(&mut buffer, &grid, &flat_config()).unwrap();
        assert_eq!(stats.bar_count, 4);
        assert_eq!(buffer.vertex_count(), 4 * 24);
        assert!(buffer.is_full());

        // First bar belongs to pixel (1, 0)
        let uv = buffer.texcoords()[0];
        assert_eq!(uv, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_heights_follow_luminance() {
        let mut grid = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        grid.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        let config = ColumnConfig {
            scale: 0.5,
            ..flat_config()
        };

        let mut buffer = GeometryBuffer::new();
        let stats = build_bars(&mut buffer, &grid, &config).unwrap();
        assert_eq!(stats.min_luminance, 0.0);
        assert_relative_eq!(stats.max_luminance, 255.0, epsilon = 0.1);

        let top = |bar: usize| {
            buffer.positions()[bar * 24..(bar + 1) * 24]
                .iter()
                .map(|p| p.y)
                .fold(f32::NEG_INFINITY, f32::max)
        };
        assert_relative_eq!(top(0), MIN_BAR_HEIGHT, epsilon = 1e-6);
        let expected = stats.max_luminance * 0.5 / 2.0 + MIN_BAR_HEIGHT;
        assert_relative_eq!(top(1), expected, epsilon = 1e-4);
    }

    #[test]
    fn test_bars_sit_on_spaced_grid() {
        let grid = RgbaImage::from_pixel(2, 2, Rgba([50, 50, 50, 255]));
        let mut buffer = GeometryBuffer::new();
        build_bars(&mut buffer, &grid, &flat_config()).unwrap();

        let (min, max) = buffer.bounding_box().unwrap();
        let half = flat_config().bar_size / 2.0;
        assert_relative_eq!(min.x, -BAR_SPACING - half, epsilon = 1e-6);
        assert_relative_eq!(max.x, half, epsilon = 1e-6);
        assert_relative_eq!(min.z, -BAR_SPACING - half, epsilon = 1e-6);
        assert_eq!(min.y, 0.0);
    }

    #[test]
    fn test_single_column_uvs_stay_finite() {
        let grid = RgbaImage::from_pixel(1, 3, Rgba([50, 50, 50, 255]));
        let mut buffer = GeometryBuffer::new();
        build_bars(&mut buffer, &grid, &ColumnConfig::default()).unwrap();
        assert!(buffer.texcoords().iter().all(|uv| uv.is_finite()));
        assert_eq!(buffer.texcoords().last().copied(), Some(Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_empty_image_gives_empty_buffer() {
        let mut buffer = GeometryBuffer::new();
        let voxelized = voxelize(&mut buffer, &RgbaImage::new(0, 0), &ColumnConfig::default()).unwrap();
        let stats = voxelized.stats;
        assert_eq!(voxelized.texture.dimensions(), (0, 0));
        assert_eq!(stats.bar_count, 0);
        assert_eq!(stats.min_luminance, 0.0);
        assert!(buffer.is_empty());
        assert!(buffer.bounding_box().is_none());
    }

    #[test]
    fn test_fully_transparent_image_keeps_luminance_range() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([20, 20, 20, 0]));
        let mut buffer = GeometryBuffer::new();
        let config = ColumnConfig {
            bar_number: 4.0,
            ..ColumnConfig::default()
        };
        let stats = voxelize(&mut buffer, &image, &config).unwrap().stats;
        assert_eq!(stats.bar_count, 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_rebuild_reuses_storage() {
        let image = RgbaImage::from_pixel(16, 16, Rgba([90, 120, 30, 255]));
        let config = ColumnConfig {
            bar_number: 8.0,
            ..ColumnConfig::default()
        };
        let mut buffer = GeometryBuffer::new();
        voxelize(&mut buffer, &image, &config).unwrap();
        let positions = buffer.positions().as_ptr();

        voxelize(&mut buffer, &image, &config).unwrap();
        assert_eq!(buffer.positions().as_ptr(), positions);
        assert!(buffer.is_full());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([90, 120, 30, 255]));
        let config = ColumnConfig {
            bar_bevel: 2.0,
            ..ColumnConfig::default()
        };
        let mut buffer = GeometryBuffer::new();
        assert!(voxelize(&mut buffer, &image, &config).is_err());
    }

    #[test]
    fn test_beveled_rebuild_fills_buffer() {
        let image = RgbaImage::from_pixel(30, 20, Rgba([200, 10, 90, 255]));
        let config = ColumnConfig {
            bar_number: 10.0,
            bar_bevel: 0.5,
            bevel_segments: 3,
            ..ColumnConfig::default()
        };
        let mut buffer = GeometryBuffer::new();
        let stats = voxelize(&mut buffer, &image, &config).unwrap().stats;
        assert_eq!((stats.width, stats.height), (15, 10));
        assert_eq!(stats.bar_count, 150);
        assert_eq!(buffer.vertex_count(), 150 * buffer.vertices_per_bar());
        assert!(buffer.is_full());
    }

    #[test]
    fn test_texture_is_the_bar_grid() {
        let mut image = RgbaImage::from_pixel(4, 2, Rgba([40, 40, 40, 255]));
        image.put_pixel(3, 1, Rgba([250, 0, 0, 255]));
        let config = ColumnConfig {
            bar_number: 2.0,
            ..flat_config()
        };

        let mut buffer = GeometryBuffer::new();
        let voxelized = voxelize(&mut buffer, &image, &config).unwrap();
        let (width, height) = voxelized.texture.dimensions();
        assert_eq!((width, height), (voxelized.stats.width, voxelized.stats.height));
        assert_eq!(voxelized.texture, downsample(&image, &config));

        // Each bar's UV lands on the texel its height was derived from
        let per_bar = buffer.vertices_per_bar();
        for bar in 0..voxelized.stats.bar_count {
            let vertices = bar * per_bar..(bar + 1) * per_bar;
            let uv = buffer.texcoords()[vertices.start];
            let x = (uv.x * (width - 1) as f32).round() as u32;
            let y = (uv.y * (height - 1) as f32).round() as u32;
            let texel = voxelized.texture.get_pixel(x, y);

            let top = buffer.positions()[vertices]
                .iter()
                .map(|p| p.y)
                .fold(f32::NEG_INFINITY, f32::max);
            let expected = (luminance(texel) - voxelized.stats.min_luminance) * config.scale / 2.0
                + MIN_BAR_HEIGHT;
            assert_relative_eq!(top, expected, epsilon = 1e-4);
        }
    }
}
