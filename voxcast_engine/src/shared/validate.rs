use crate::core::types::{Number, Point3, Vector3};
use crate::shared::ray::Ray;
use approx::*;
use std::borrow::Borrow;

macro_rules! debug_assert_only {
    () => {
        if cfg!(not(debug_assertions)) {
            return;
        }
    };
}

pub const EPSILON: Number = 1e-6;
pub const RELATIVE: Number = 1e-3;

#[inline(always)]
#[track_caller]
pub fn normal3(n: impl Borrow<Vector3>) {
    debug_assert_only!();
    let n = n.borrow();
    vector3(n);
    assert!(
        n.is_normalized(),
        "should be normalised; vec: {n:?}, len: {:?}",
        n.length()
    );
}

#[inline(always)]
#[track_caller]
pub fn point3(v: impl Borrow<Point3>) {
    debug_assert_only!();
    let v = v.borrow();
    assert!(!v.is_nan(), "should not be nan; vec: {v:?}");
}

#[inline(always)]
#[track_caller]
pub fn vector3(v: impl Borrow<Vector3>) {
    debug_assert_only!();
    let v = v.borrow();
    assert!(!v.is_nan(), "should not be nan; vec: {v:?}");
}

/// Asserts a ray is valid, and that it's sample positions are one step apart
#[inline(always)]
#[track_caller]
pub fn ray(r: impl Borrow<Ray>) {
    debug_assert_only!();
    let r = r.borrow();
    normal3(r.direction());
    point3(r.origin());
    point3(r.curr_location());
    point3(r.last_location());

    let gap = (r.curr_location() - r.last_location()).length();
    assert!(
        relative_eq!(gap, 0., epsilon = EPSILON)
            || relative_eq!(gap, r.step_length(), epsilon = EPSILON, max_relative = RELATIVE),
        "sample positions should be 0 or 1 steps apart; gap: {gap}, ray: {r:?}"
    );
}

/// Asserts that a surface hit was valid
#[inline(always)]
#[track_caller]
pub fn surface_point(vertex: impl Borrow<Point3>, normal: impl Borrow<Vector3>) {
    debug_assert_only!();
    point3(vertex);
    normal3(normal);
}
