//! Locating the surface (the zero level-set of the distance field) along a single ray.

use crate::core::types::{Number, Point3, Vector3};
use crate::shared::ray::Ray;
use crate::volume::VoxelVolume;

/// Marches a ray through the volume until it crosses from free space into the surface.
///
/// Samples without data never count as a crossing, and crossings from inside the surface out into
/// free space (back faces) are ignored.
///
/// # Return Value
/// The interpolated position of the first crossing, or [None] if the ray went out of bounds first
pub fn march(volume: &impl VoxelVolume, ray: &mut Ray) -> Option<Point3> {
    let mut d_last = None;
    while ray.is_in_bound() {
        let d_curr = volume.distance_at(ray.curr_location());

        if let (Some(last), Some(curr)) = (d_last, d_curr) {
            if let Some(vertex) = interpolate_crossing(ray.last_location(), last, ray.curr_location(), curr) {
                return Some(vertex);
            }
        }

        d_last = d_curr;
        ray.step();
    }
    None
}

/// Finds where the distance field crosses zero between two samples, assuming it varies linearly.
///
/// Only a front-facing crossing (`d_last >= 0`, `d_curr < 0`) counts.
///
/// `t = d_last / (d_last - d_curr)`
pub fn interpolate_crossing(last: Point3, d_last: Number, curr: Point3, d_curr: Number) -> Option<Point3> {
    if !(d_last >= 0. && d_curr < 0.) {
        return None;
    }
    let denom = d_last - d_curr;
    if denom == 0. {
        return None;
    }
    let t = d_last / denom;
    Some(last.lerp(curr, t))
}

/// Estimates the surface normal at `point` from the gradient of the distance field.
///
/// Uses central differences `(D(p + ε·axis) - D(p - ε·axis)) / 2ε` along each axis, so the
/// normal points towards increasing distance (free space).
///
/// # Return Value
/// [None] if any of the six samples has no data, or the gradient is too small to normalise
pub fn estimate_normal(volume: &impl VoxelVolume, point: Point3, epsilon: Number) -> Option<Vector3> {
    let diff = |axis: Vector3| -> Option<Number> {
        let pos = volume.distance_at(point + (axis * epsilon))?;
        let neg = volume.distance_at(point - (axis * epsilon))?;
        Some((pos - neg) / (2. * epsilon))
    };

    let gradient = Vector3::new(diff(Vector3::X)?, diff(Vector3::Y)?, diff(Vector3::Z)?);
    gradient.try_normalize()
}
