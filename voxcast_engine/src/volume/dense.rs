use crate::core::targets::VOLUME;
use crate::core::types::{Number, Point3, Vector3, VoxelIndex};
use crate::volume::{check_params, VolumeError, VoxelVolume};
use derivative::Derivative;
use getset::{CopyGetters, Getters};
use itertools::iproduct;
use ndarray::Array3;
use tracing::debug;

/// A TSDF stored on a regular, dense grid of voxels.
///
/// Voxel `[i, j, k]` holds the distance sampled at the world position
/// `origin + [i, j, k] * voxel_size`. Voxels that were never written hold no data.
#[derive(CopyGetters, Getters, Derivative, Clone)]
#[derivative(Debug)]
pub struct DenseTsdfVolume {
    /// Number of voxels along each axis, stored as `[x, y, z]`
    #[get_copy = "pub"]
    dims: [usize; 3],
    /// World-space position of voxel `[0, 0, 0]`
    #[get_copy = "pub"]
    origin: Point3,
    #[get_copy = "pub"]
    voxel_size: Number,
    #[get_copy = "pub"]
    truncation: Number,
    /// The raw data for the grid
    #[derivative(Debug = "ignore")]
    #[get = "pub"]
    data: Array3<Option<Number>>,
}

// region Constructors

impl DenseTsdfVolume {
    /// Creates a new volume where none of the voxels contain any data
    pub fn new(
        dims: [usize; 3],
        voxel_size: Number,
        origin: impl Into<Point3>,
        truncation: Number,
    ) -> Result<Self, VolumeError> {
        Self::from_fn(dims, voxel_size, origin, truncation, |_| None)
    }

    /// Creates a new volume, using the provided function to calculate each voxel's distance.
    ///
    /// # Arguments
    ///
    /// * `func`: Called with the world-space position of each voxel. Returning [None] leaves that
    /// voxel without data, otherwise the distance is clamped to the truncation band.
    /// Non-finite distances are treated as [None].
    pub fn from_fn(
        dims: [usize; 3],
        voxel_size: Number,
        origin: impl Into<Point3>,
        truncation: Number,
        func: impl Fn(Point3) -> Option<Number>,
    ) -> Result<Self, VolumeError> {
        if dims.iter().any(|&n| n < 2) {
            return Err(VolumeError::DimsInvalid { dims });
        }
        check_params(voxel_size, truncation)?;
        let origin = origin.into();

        let data = Array3::from_shape_fn((dims[0], dims[1], dims[2]), |(i, j, k)| {
            let pos = Self::index_to_world_pos([i, j, k], origin, voxel_size);
            func(pos)
                .filter(|d| d.is_finite())
                .map(|d| d.clamp(-truncation, truncation))
        });

        let volume = Self {
            dims,
            origin,
            voxel_size,
            truncation,
            data,
        };
        debug!(target: VOLUME, ?dims, %origin, voxel_size, truncation, populated = volume.count_populated(), "created dense volume");
        Ok(volume)
    }
}

// endregion Constructors

// region Helper

impl DenseTsdfVolume {
    fn index_to_world_pos([i, j, k]: VoxelIndex, origin: Point3, voxel_size: Number) -> Point3 {
        origin + Vector3::new(i as Number, j as Number, k as Number) * voxel_size
    }

    /// Converts a world position into continuous grid coordinates (voxel `[i, j, k]` sits at `(i, j, k)`)
    fn world_to_grid(&self, point: Point3) -> Vector3 { (point - self.origin) / self.voxel_size }

    fn check_index(&self, index: VoxelIndex) -> Result<(), VolumeError> {
        if index.iter().zip(self.dims).all(|(&i, dim)| i < dim) {
            Ok(())
        } else {
            Err(VolumeError::IndexOutOfBounds { index, dims: self.dims })
        }
    }

    /// For a single axis, finds the lower voxel of the cell containing grid coordinate `g`, and
    /// the fractional position inside that cell.
    ///
    /// The upper bound is inclusive, so positions exactly on the last voxel stay usable.
    fn axis_cell(g: Number, dim: usize) -> Option<(usize, Number)> {
        let max = (dim - 1) as Number;
        if !(0. ..=max).contains(&g) {
            return None;
        }
        let lower = g.floor().min(max - 1.);
        Some((lower as usize, g - lower))
    }
}

// endregion Helper

// region Voxel Accessors

impl DenseTsdfVolume {
    /// World-space position of the voxel at `index`
    pub fn voxel_pos(&self, index: VoxelIndex) -> Point3 {
        Self::index_to_world_pos(index, self.origin, self.voxel_size)
    }

    /// Index of the voxel nearest to a world position, if it's inside the grid
    pub fn nearest_voxel(&self, point: Point3) -> Option<VoxelIndex> {
        let g = self.world_to_grid(point).round();
        if !g.is_finite() {
            return None;
        }
        let mut index = [0; 3];
        for (axis, (out, dim)) in index.iter_mut().zip(self.dims).enumerate() {
            let n = g[axis];
            if n < 0. || n > (dim - 1) as Number {
                return None;
            }
            *out = n as usize;
        }
        Some(index)
    }

    /// The stored distance of a single voxel, or [None] if it has no data (or is outside the grid)
    pub fn voxel(&self, [i, j, k]: VoxelIndex) -> Option<Number> { self.data.get((i, j, k)).copied().flatten() }

    /// Writes the distance of a single voxel, clamping it into the truncation band
    pub fn set_voxel(&mut self, index: VoxelIndex, distance: Number) -> Result<(), VolumeError> {
        self.check_index(index)?;
        if !distance.is_finite() {
            return Err(VolumeError::DistanceInvalid { distance });
        }
        let [i, j, k] = index;
        self.data[(i, j, k)] = Some(distance.clamp(-self.truncation, self.truncation));
        Ok(())
    }

    /// Marks a single voxel as having no data
    pub fn clear_voxel(&mut self, index: VoxelIndex) -> Result<(), VolumeError> {
        self.check_index(index)?;
        let [i, j, k] = index;
        self.data[(i, j, k)] = None;
        Ok(())
    }

    /// Writes the distance of the voxel nearest to a world position, clamping it into the truncation band
    pub fn set_distance(&mut self, point: impl Into<Point3>, distance: Number) -> Result<(), VolumeError> {
        let point = point.into();
        let index = self
            .nearest_voxel(point)
            .ok_or(VolumeError::PointOutOfBounds { point })?;
        self.set_voxel(index, distance)
    }

    /// How many voxels currently hold data
    pub fn count_populated(&self) -> usize { self.data.iter().filter(|d| d.is_some()).count() }
}

// endregion Voxel Accessors

// region VoxelVolume Impl

impl VoxelVolume for DenseTsdfVolume {
    /// Trilinearly interpolates the eight voxels surrounding `point`.
    ///
    /// If any of them has no data, so does the point.
    fn distance_at(&self, point: Point3) -> Option<Number> {
        let g = self.world_to_grid(point);
        let (x, fx) = Self::axis_cell(g.x, self.dims[0])?;
        let (y, fy) = Self::axis_cell(g.y, self.dims[1])?;
        let (z, fz) = Self::axis_cell(g.z, self.dims[2])?;

        let weight = |offset: usize, frac: Number| if offset == 0 { 1. - frac } else { frac };

        let mut distance = 0.;
        for (dx, dy, dz) in iproduct!(0..2, 0..2, 0..2) {
            let d = self.voxel([x + dx, y + dy, z + dz])?;
            distance += d * weight(dx, fx) * weight(dy, fy) * weight(dz, fz);
        }
        Some(distance)
    }

    fn truncation_distance(&self) -> Number { self.truncation }

    fn voxel_size(&self) -> Number { self.voxel_size }
}

// endregion VoxelVolume Impl
