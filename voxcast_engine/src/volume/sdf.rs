use crate::core::types::{Number, Point3};
use crate::volume::{check_params, VolumeError, VoxelVolume};
use derivative::Derivative;
use getset::{CopyGetters, Getters};

pub trait SdfFunction: Fn(Point3) -> Option<Number> + Send + Sync {}
impl<T: Fn(Point3) -> Option<Number> + Send + Sync> SdfFunction for T {}

/// A volume defined analytically by a **Signed-Distance Function** (**SDF**), rather than by voxels.
///
/// Useful for synthetic scenes where the exact surface is known.
#[derive(CopyGetters, Getters, Derivative, Clone)]
#[derivative(Debug(bound = ""))]
pub struct SdfVolume<F: SdfFunction> {
    #[derivative(Debug = "ignore")]
    #[get = "pub"]
    sdf: F,
    #[get_copy = "pub"]
    truncation: Number,
    /// Nominal voxel size. There is no real grid, this only scales step lengths and gradient offsets
    #[get_copy = "pub"]
    voxel_size: Number,
}

impl<F: SdfFunction> SdfVolume<F> {
    /// Creates a new volume from the given **SDF**
    ///
    /// # Arguments
    ///
    /// * `sdf`: Evaluated in volume-space coordinates. Return [None] where there is no data.
    /// * `truncation`: Distances returned by the SDF are clamped into `-truncation..=truncation`
    /// * `voxel_size`: See [SdfVolume::voxel_size()]
    pub fn new(sdf: F, truncation: Number, voxel_size: Number) -> Result<Self, VolumeError> {
        check_params(voxel_size, truncation)?;
        Ok(Self {
            sdf,
            truncation,
            voxel_size,
        })
    }
}

impl<F: SdfFunction> VoxelVolume for SdfVolume<F> {
    fn distance_at(&self, point: Point3) -> Option<Number> {
        (self.sdf)(point)
            .filter(|d| !d.is_nan())
            .map(|d| d.clamp(-self.truncation, self.truncation))
    }

    fn truncation_distance(&self) -> Number { self.truncation }

    fn voxel_size(&self) -> Number { self.voxel_size }
}
