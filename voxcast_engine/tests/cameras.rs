use approx::assert_relative_eq;
use nonzero::nonzero;
use std::f64::consts::FRAC_PI_2;
use voxcast_engine::camera::pinhole::{CamInvalidError, Intrinsics, PinholeCamera, Pose};
use voxcast_engine::camera::Camera;
use voxcast_engine::core::types::*;

mod common;

#[test]
pub fn principal_point_looks_forwards() {
    let camera = PinholeCamera::default();
    assert_eq!((camera.width(), camera.height()), (640, 480));

    // The principal point sits between pixels, so average the four around it
    let dir = [(239, 319), (239, 320), (240, 319), (240, 320)]
        .map(|(row, col)| camera.ray_for(row, col).direction)
        .into_iter()
        .sum::<Vector3>()
        .normalize();
    assert_relative_eq!(dir, Vector3::Z, epsilon = 1e-12);
}

#[test]
pub fn axis_camera_pixel_zero_looks_down_z() {
    let position = Point3::new(1., -2., 3.);
    let camera = common::axis_camera(nonzero!(4_usize), nonzero!(4_usize), position);

    let ray = camera.ray_for(0, 0);
    assert_eq!(ray.origin, position);
    assert_relative_eq!(ray.direction, Vector3::Z);

    // Columns go along +x, rows along +y
    let ray = camera.ray_for(3, 2);
    assert_relative_eq!(ray.direction, Vector3::new(0.02, 0.03, 1.).normalize(), epsilon = 1e-12);
    assert_relative_eq!(ray.direction.length(), 1., epsilon = 1e-12);
}

#[test]
pub fn pose_rotates_rays() {
    let camera = common::single_px_camera(Point3::ZERO)
        .with_pose(Pose {
            position: Point3::new(0., 0., 10.),
            // Unnormalised on purpose, the camera should fix it
            rotation: Quaternion::from_rotation_y(FRAC_PI_2) * 2.,
        })
        .expect("pose should be valid");

    let ray = camera.ray_for(0, 0);
    assert_eq!(ray.origin, Point3::new(0., 0., 10.));
    assert_relative_eq!(ray.direction, Vector3::X, epsilon = 1e-12);
}

#[test]
pub fn invalid_cameras_are_rejected() {
    let intrinsics = Intrinsics {
        fx: 500.,
        fy: 500.,
        cx: 10.,
        cy: 10.,
    };
    let make = |intrinsics: Intrinsics, pose: Pose| {
        PinholeCamera::new(nonzero!(20_usize), nonzero!(20_usize), intrinsics, pose)
    };

    assert!(make(intrinsics, Pose::IDENTITY).is_ok());
    assert!(matches!(
        make(Intrinsics { fx: 0., ..intrinsics }, Pose::IDENTITY),
        Err(CamInvalidError::FocalLengthInvalid)
    ));
    assert!(matches!(
        make(Intrinsics { fy: Number::INFINITY, ..intrinsics }, Pose::IDENTITY),
        Err(CamInvalidError::FocalLengthInvalid)
    ));
    assert!(matches!(
        make(Intrinsics { cx: Number::NAN, ..intrinsics }, Pose::IDENTITY),
        Err(CamInvalidError::PrincipalPointInvalid)
    ));
    assert!(matches!(
        make(
            intrinsics,
            Pose {
                rotation: Quaternion::from_xyzw(0., 0., 0., 0.),
                ..Pose::IDENTITY
            }
        ),
        Err(CamInvalidError::RotationInvalid)
    ));
    assert!(matches!(
        make(
            intrinsics,
            Pose {
                position: Point3::new(Number::NAN, 0., 0.),
                ..Pose::IDENTITY
            }
        ),
        Err(CamInvalidError::PositionInvalid)
    ));
}
