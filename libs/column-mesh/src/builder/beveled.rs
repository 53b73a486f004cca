//! Rounded bar: a box whose edges and corners are rounded by ellipsoid
//! octants.
//!
//! ## Construction
//!
//! ```text
//!            upper pole ring (i = 0)      θ: 0° → 90°
//!     ┌──────────────────────────────┐
//!     │  quadrant 1   │  quadrant 0  │    each quadrant sweeps φ over 90°
//!     ├───────────────┼──────────────┤    around its own inner-box corner
//!     │  quadrant 2   │  quadrant 3  │
//!     └──────────────────────────────┘
//!            lower pole ring (i = 1)      θ: 90° → 180°
//! ```
//!
//! Vertices are laid out ring by ring, latitude by latitude, so every latitude
//! is one row of `4 * (segments + 1)` vertices. Rows are stitched into quads
//! with horizontal wraparound; the flat walls are the quads joining the last
//! longitude of one quadrant to the first of the next. The two poles collapse
//! to the four corners of the inner box, closed by two triangles each.

use std::f32::consts::FRAC_PI_2;

use config::constants::RADIUS_EQUALITY_EPSILON;
use glam::Vec3;

use super::BarPlacement;
use crate::buffer::GeometryBuffer;
use crate::shape::beveled_grid;

/// X and Z signs of the inner-box corner each quadrant rounds.
const X_SIGNS: [f32; 4] = [1.0, -1.0, -1.0, 1.0];
const Z_SIGNS: [f32; 4] = [1.0, 1.0, -1.0, -1.0];

/// Multiples of half the inner height lifting each ring.
const RING_LIFT: [f32; 2] = [2.0, 0.0];

pub(super) fn build(buffer: &mut GeometryBuffer, bar: &BarPlacement, fraction: f32, segments: u32) {
    debug_assert!(segments > 0);

    let size = bar.size;
    let bevel_radius = size.x.min(size.z) / 2.0 * fraction;
    let inner = (size - Vec3::splat(bevel_radius * 2.0)).max(Vec3::ZERO);
    debug_assert!(inner.min_element() >= 0.0);
    let radii = (size - inner) / 2.0;
    let is_sphere = (radii.x - radii.y).abs() < RADIUS_EQUALITY_EPSILON
        && (radii.y - radii.z).abs() < RADIUS_EQUALITY_EPSILON;

    let first = buffer.vertex_offset() as u32;
    let step = FRAC_PI_2 / segments as f32;
    let mut poles = [[0u32; 4]; 2];

    for ring in 0..2 {
        for m in 0..=segments {
            let theta = m as f32 * step + FRAC_PI_2 * ring as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let is_pole = (ring == 0 && m == 0) || (ring == 1 && m == segments);

            for quadrant in 0..4 {
                if is_pole {
                    poles[ring][quadrant] = buffer.vertex_offset() as u32;
                }
                let corner = Vec3::new(
                    X_SIGNS[quadrant] * inner.x / 2.0,
                    radii.y + RING_LIFT[ring] * inner.y / 2.0,
                    Z_SIGNS[quadrant] * inner.z / 2.0,
                );

                for n in 0..=segments {
                    let phi = n as f32 * step + FRAC_PI_2 * quadrant as f32;
                    let (sin_phi, cos_phi) = phi.sin_cos();
                    let direction = Vec3::new(cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);

                    let normal = if is_sphere {
                        direction
                    } else {
                        ellipsoid_gradient(direction, radii)
                    };
                    let normal = normal.try_normalize().unwrap_or(direction);

                    buffer.push_vertex(bar.start + corner + radii * direction, normal, bar.uv);
                }
            }
        }
    }

    let (width_segments, height_segments) = beveled_grid(segments);
    let row_len = width_segments as u32 + 1;
    for row in 0..height_segments as u32 {
        for col in 0..row_len {
            let next_col = (col + 1) % row_len;
            let i1 = first + row * row_len + next_col;
            let i2 = first + row * row_len + col;
            let i3 = first + (row + 1) * row_len + col;
            let i4 = first + (row + 1) * row_len + next_col;

            buffer.push_triangle([i4, i2, i1]);
            buffer.push_triangle([i4, i3, i2]);
        }
    }

    let [upper, lower] = poles;
    buffer.push_triangle([upper[0], upper[2], upper[1]]);
    buffer.push_triangle([upper[0], upper[3], upper[2]]);
    buffer.push_triangle([lower[0], lower[1], lower[2]]);
    buffer.push_triangle([lower[0], lower[2], lower[3]]);
}

/// Surface gradient of the ellipsoid with the given radii at the point
/// `radii * direction`.
///
/// The exact gradient is `direction / radii`; it is scaled by the product of
/// the radii so a zero radius stays finite and points along its own axis.
#[inline]
fn ellipsoid_gradient(direction: Vec3, radii: Vec3) -> Vec3 {
    Vec3::new(
        direction.x * radii.y * radii.z,
        direction.y * radii.x * radii.z,
        direction.z * radii.x * radii.y,
    )
}
