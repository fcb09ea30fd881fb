//! # Module [crate::volume]
//!
//! Sources of signed-distance data that rays are marched through.
//!
//! ## Sign Convention
//! Distances are positive in free space in front of a surface, zero on the surface,
//! and negative behind (inside) it. Every value a volume returns is clamped into
//! `-truncation_distance..=truncation_distance`.
//!
//! ## Related
//! - [VoxelVolume]
//! - [dense::DenseTsdfVolume] for a voxel grid
//! - [sdf::SdfVolume] for analytic fields

use crate::core::types::{Number, Point3};
use thiserror::Error;

pub mod dense;
pub mod sdf;

/// Read-only access to a truncated signed-distance field.
///
/// Implementors must be safe to sample from many threads at once, and must not change
/// while a cast pass is borrowing them.
pub trait VoxelVolume: Send + Sync {
    /// Samples the signed distance at a continuous position.
    ///
    /// # Return Value
    /// Returns [None] if there is no data at that position (unobserved, or outside the volume).
    /// This is *not* the same as a valid reading of zero.
    fn distance_at(&self, point: Point3) -> Option<Number>;

    /// The band that all distances are clamped into
    fn truncation_distance(&self) -> Number;

    /// Edge length of a single voxel
    fn voxel_size(&self) -> Number;
}

impl<V: VoxelVolume + ?Sized> VoxelVolume for &V {
    fn distance_at(&self, point: Point3) -> Option<Number> { V::distance_at(self, point) }

    fn truncation_distance(&self) -> Number { V::truncation_distance(self) }

    fn voxel_size(&self) -> Number { V::voxel_size(self) }
}

#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum VolumeError {
    /// Each axis needs at least two voxels, so there is always a cell to interpolate in
    #[error("volume dimensions {dims:?} are invalid (each axis needs at least 2 voxels)")]
    DimsInvalid { dims: [usize; 3] },
    #[error("voxel size must be finite and > 0 (was {voxel_size})")]
    VoxelSizeInvalid { voxel_size: Number },
    #[error("truncation distance must be finite and > 0 (was {truncation})")]
    TruncationInvalid { truncation: Number },
    #[error("voxel index {index:?} is outside the volume dimensions {dims:?}")]
    IndexOutOfBounds { index: [usize; 3], dims: [usize; 3] },
    #[error("point {point} is outside the volume")]
    PointOutOfBounds { point: Point3 },
    #[error("distance {distance} is not finite")]
    DistanceInvalid { distance: Number },
}

/// Checks the scalar parameters that every volume shares
pub(crate) fn check_params(voxel_size: Number, truncation: Number) -> Result<(), VolumeError> {
    if !(voxel_size.is_finite() && voxel_size > 0.) {
        return Err(VolumeError::VoxelSizeInvalid { voxel_size });
    }
    if !(truncation.is_finite() && truncation > 0.) {
        return Err(VolumeError::TruncationInvalid { truncation });
    }
    Ok(())
}
