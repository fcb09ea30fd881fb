use approx::{assert_abs_diff_eq, assert_relative_eq};
use voxcast_engine::core::types::*;
use voxcast_engine::shared::ray::{Ray, RayBounds, RayInvalidError};

/// Directions of wildly different magnitudes should all come out as unit vectors
#[test]
pub fn direction_is_normalised() {
    let inputs = [
        Vector3::new(0., 0., 1.),
        Vector3::new(0., 0., 1e-6),
        Vector3::new(3., 4., 12.),
        Vector3::new(-1e6, 2e5, 7.),
        Vector3::new(0.1, -0.2, 0.3),
    ];

    for input in inputs {
        let ray = Ray::new(1., 0.5, 10., input).expect("ray should be valid");
        assert_relative_eq!(ray.direction().length(), 1.0, epsilon = 1e-12);
        // Still points the same way
        assert_relative_eq!(ray.direction(), input.normalize(), epsilon = 1e-12);
    }
}

#[test]
pub fn starts_at_min_distance() {
    let ray = Ray::new(0.5, 2., 10., [0., 3., 4.]).expect("ray should be valid");
    let expected = Vector3::new(0., 0.6, 0.8) * 2.;

    assert_relative_eq!(ray.curr_location(), expected, epsilon = 1e-12);
    assert_eq!(ray.curr_location(), ray.last_location());
}

/// After `k` steps the ray should be at `dir * min + k * step * dir`
#[test]
pub fn steps_are_exact() {
    let (step, min) = (0.25, 1.5);
    let mut ray = Ray::new(step, min, 100., [1., 2., -2.]).expect("ray should be valid");
    let dir = ray.direction();

    for k in 1..=200 {
        ray.step();
        let expected = dir * min + dir * (k as Number * step);
        assert_abs_diff_eq!(ray.curr_location(), expected, epsilon = 1e-9);
        assert_abs_diff_eq!(ray.curr_location() - ray.last_location(), dir * step, epsilon = 1e-9);
    }
}

#[test]
pub fn in_bound_until_past_max_distance() {
    let mut ray = Ray::new(1., 1., 10., Vector3::Z).expect("ray should be valid");

    for _ in 0..9 {
        assert!(ray.is_in_bound(), "{:?}", ray.curr_location());
        ray.step();
    }
    // Exactly on the boundary still counts
    assert_relative_eq!(ray.curr_location().length(), 10.);
    assert!(ray.is_in_bound());

    ray.step();
    assert!(!ray.is_in_bound());
}

/// With the default bounds, distance is measured from the coordinate origin, not the ray's origin
#[test]
pub fn world_origin_bounds_ignore_ray_origin() {
    let origin = Point3::new(0., 0., -3.);
    let mut world = Ray::new_from(origin, 1., 1., 4., Vector3::Z, RayBounds::WorldOrigin).expect("ray should be valid");
    let mut local = Ray::new_from(origin, 1., 1., 4., Vector3::Z, RayBounds::RayOrigin).expect("ray should be valid");

    // Travelled 5 units, but only 2 from the coordinate origin
    for _ in 0..4 {
        world.step();
        local.step();
    }
    assert_relative_eq!(world.curr_location(), Point3::new(0., 0., 2.));
    assert!(world.is_in_bound());
    assert!(!local.is_in_bound());

    // Starting further than max distance from the origin is immediately out of bounds
    let far = Ray::new_from([0., 0., -20.], 1., 1., 4., Vector3::Z, RayBounds::WorldOrigin).expect("ray should be valid");
    assert!(!far.is_in_bound());
}

#[test]
pub fn invalid_params_fail_fast() {
    assert!(matches!(
        Ray::new(0., 0., 10., Vector3::Z),
        Err(RayInvalidError::StepLengthInvalid { .. })
    ));
    assert!(matches!(
        Ray::new(-1., 0., 10., Vector3::Z),
        Err(RayInvalidError::StepLengthInvalid { .. })
    ));
    assert!(matches!(
        Ray::new(Number::NAN, 0., 10., Vector3::Z),
        Err(RayInvalidError::StepLengthInvalid { .. })
    ));
    assert!(matches!(
        Ray::new(1., 10., 10., Vector3::Z),
        Err(RayInvalidError::DistanceRangeInvalid { .. })
    ));
    assert!(matches!(
        Ray::new(1., 11., 10., Vector3::Z),
        Err(RayInvalidError::DistanceRangeInvalid { .. })
    ));
    assert!(matches!(
        Ray::new(1., -1., 10., Vector3::Z),
        Err(RayInvalidError::DistanceRangeInvalid { .. })
    ));
    // The first sample can't sit on the ray's origin
    assert!(matches!(
        Ray::new(1., 0., 10., Vector3::Z),
        Err(RayInvalidError::DistanceRangeInvalid { .. })
    ));
    assert_eq!(
        Ray::new(1., 1., 10., Vector3::ZERO),
        Err(RayInvalidError::DirectionInvalid)
    );
    assert_eq!(
        Ray::new(1., 1., 10., Vector3::new(Number::NAN, 0., 1.)),
        Err(RayInvalidError::DirectionInvalid)
    );
    assert_eq!(
        Ray::new_from(
            [Number::NAN, 0., 0.],
            1.,
            1.,
            10.,
            Vector3::Z,
            RayBounds::WorldOrigin
        ),
        Err(RayInvalidError::OriginInvalid)
    );
}
