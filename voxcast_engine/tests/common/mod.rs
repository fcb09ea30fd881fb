#![allow(dead_code)] // Not every test file uses every helper

use nonzero::nonzero;
use std::num::NonZeroUsize;
use tracing_subscriber::EnvFilter;
use voxcast_engine::camera::pinhole::{Intrinsics, PinholeCamera, Pose};
use voxcast_engine::core::types::*;
use voxcast_engine::raycast::raycast_opts::RaycastOpts;
use voxcast_engine::volume::dense::DenseTsdfVolume;
use voxcast_engine::volume::sdf::{SdfFunction, SdfVolume};

pub const REFERENCE_DIMS: [usize; 3] = [100, 100, 200];
pub const REFERENCE_VOXEL_SIZE: Number = 5.0;
pub const REFERENCE_TRUNCATION: Number = 50.0;
/// Depth at which the reference volume's surface lies
pub const REFERENCE_SURFACE_Z: Number = 480.0;

/// Logs go through the test writer, filtered with `RUST_LOG`
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Distance along `z` for the reference volume.
///
/// Full truncation up to `z = 450`, then falls linearly through zero at `z = 480`, going negative behind it.
pub fn reference_distance(z: Number) -> Number {
    if z < 450. {
        REFERENCE_TRUNCATION
    } else {
        ((REFERENCE_SURFACE_Z - z) * (5. / 3.)).clamp(-REFERENCE_TRUNCATION, REFERENCE_TRUNCATION)
    }
}

/// A `100x100x200` grid of 5-unit voxels, where only a thin column around the `z` axis
/// (`|x|, |y| <= 15`, `400 <= z <= 515`) has any data
pub fn reference_volume() -> DenseTsdfVolume {
    DenseTsdfVolume::from_fn(
        REFERENCE_DIMS,
        REFERENCE_VOXEL_SIZE,
        [-250., -250., 0.],
        REFERENCE_TRUNCATION,
        |p| {
            let in_column = p.x.abs() <= 15. && p.y.abs() <= 15.;
            let in_depth = (400. ..=515.).contains(&p.z);
            (in_column && in_depth).then(|| reference_distance(p.z))
        },
    )
    .expect("reference volume should be valid")
}

pub fn reference_opts() -> RaycastOpts {
    RaycastOpts {
        step_length: 2.0,
        min_distance: 10.0,
        max_distance: 1000.0,
        gradient_epsilon: REFERENCE_VOXEL_SIZE / 2.,
        num_threads: 2,
        ..Default::default()
    }
}

/// A camera whose pixel `(0, 0)` looks straight down `+z`
pub fn axis_camera(width: NonZeroUsize, height: NonZeroUsize, position: Point3) -> PinholeCamera {
    PinholeCamera::new(
        width,
        height,
        Intrinsics {
            fx: 100.,
            fy: 100.,
            cx: 0.,
            cy: 0.,
        },
        Pose {
            position,
            ..Pose::IDENTITY
        },
    )
    .expect("axis camera should be valid")
}

/// A single-pixel camera at `position`, looking down `+z`
pub fn single_px_camera(position: Point3) -> PinholeCamera { axis_camera(nonzero!(1_usize), nonzero!(1_usize), position) }

/// Wraps an analytic SDF with a truncation band of `0.1` and a nominal voxel size of `0.01`
pub fn analytic_volume<F: SdfFunction>(sdf: F) -> SdfVolume<F> {
    SdfVolume::new(sdf, 0.1, 0.01).expect("analytic volume should be valid")
}

/// A plane at `z = z0`, facing the origin
pub fn plane_sdf(z0: Number) -> impl SdfFunction + Clone { move |p: Point3| Some(z0 - p.z) }

/// A sphere, positive outside
pub fn sphere_sdf(centre: Point3, radius: Number) -> impl SdfFunction + Clone {
    move |p: Point3| Some(p.distance(centre) - radius)
}
