use crate::core::types::{Number, Point3, Vector3};
use crate::shared::validate;
use getset::CopyGetters;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use valuable::Valuable;

/// Controls how [`Ray::is_in_bound()`] measures how far a ray has gone
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Valuable)]
pub enum RayBounds {
    /// Compares the norm of the current sample position (measured from the coordinate origin)
    /// against the max distance.
    ///
    /// # Note
    /// This ignores where the ray actually started. For a ray whose origin isn't the coordinate
    /// origin, the ray may be cut off before (or long after) it has travelled `max_distance`.
    #[default]
    WorldOrigin,
    /// Compares the distance between the current sample position and the ray's own origin
    /// against the max distance.
    RayOrigin,
}

#[derive(Error, Copy, Clone, Debug, PartialEq, Valuable)]
pub enum RayInvalidError {
    /// The step length must be strictly positive, else the ray would never advance
    #[error("the step length must be finite and > 0 (was {step_length})")]
    StepLengthInvalid { step_length: Number },
    #[error("the distance range {min_distance}..={max_distance} is invalid (requires `0 < min < max`)")]
    DistanceRangeInvalid { min_distance: Number, max_distance: Number },
    /// The provided direction was too close to zero (or not finite), and so vector normalisation failed
    #[error("the provided direction couldn't be normalised")]
    DirectionInvalid,
    #[error("the provided origin was not finite")]
    OriginInvalid,
}

/// A ray that is marched through space in fixed increments.
///
/// The ray only remembers its two most recent sample positions ([Self::curr_location()] and
/// [Self::last_location()]), which are exactly one step apart once the ray has been stepped.
#[derive(CopyGetters, Copy, Clone, PartialEq, Debug)]
#[get_copy = "pub"]
pub struct Ray {
    /// Position the ray was cast from
    origin: Point3,
    /// Direction vector of the ray, always normalised
    direction: Vector3,
    /// How far the ray advances on each call to [Ray::step()]
    step_length: Number,
    /// Distance along the ray of the first sample position
    min_distance: Number,
    max_distance: Number,
    bounds: RayBounds,
    /// The most recent sample position
    curr_location: Point3,
    /// The sample position before [Self::curr_location()]
    last_location: Point3,
}

// region Constructors

impl Ray {
    /// Creates a new ray starting from the coordinate origin.
    ///
    /// The direction is normalised, and both sample positions start at `direction * min_distance`.
    pub fn new(
        step_length: Number,
        min_distance: Number,
        max_distance: Number,
        direction: impl Into<Vector3>,
    ) -> Result<Self, RayInvalidError> {
        Self::new_from(
            Point3::ZERO,
            step_length,
            min_distance,
            max_distance,
            direction,
            RayBounds::WorldOrigin,
        )
    }

    /// Creates a new ray starting from an arbitrary `origin`.
    ///
    /// Both sample positions start at `origin + direction * min_distance`.
    ///
    /// # Errors
    /// Fails if the step length or the distance range are invalid (see [Ray::check_params()]),
    /// if the origin isn't finite, or if the direction can't be normalised.
    pub fn new_from(
        origin: impl Into<Point3>,
        step_length: Number,
        min_distance: Number,
        max_distance: Number,
        direction: impl Into<Vector3>,
        bounds: RayBounds,
    ) -> Result<Self, RayInvalidError> {
        Self::check_params(step_length, min_distance, max_distance)?;

        let origin = origin.into();
        if !origin.is_finite() {
            return Err(RayInvalidError::OriginInvalid);
        }
        let direction = direction
            .into()
            .try_normalize()
            .ok_or(RayInvalidError::DirectionInvalid)?;
        let start = origin + direction * min_distance;

        let ray = Self {
            origin,
            direction,
            step_length,
            min_distance,
            max_distance,
            bounds,
            curr_location: start,
            last_location: start,
        };
        validate::ray(&ray);
        Ok(ray)
    }

    /// Checks the marching parameters of a ray, without needing a direction
    ///
    /// # Errors
    /// The step length must be finite and `> 0`, and the distances must satisfy
    /// `0 < min_distance < max_distance` with `max_distance` finite.
    pub fn check_params(
        step_length: Number,
        min_distance: Number,
        max_distance: Number,
    ) -> Result<(), RayInvalidError> {
        if !(step_length.is_finite() && step_length > 0.) {
            return Err(RayInvalidError::StepLengthInvalid { step_length });
        }
        if !(min_distance > 0. && min_distance < max_distance && max_distance.is_finite()) {
            return Err(RayInvalidError::DistanceRangeInvalid {
                min_distance,
                max_distance,
            });
        }
        Ok(())
    }
}

// endregion Constructors

// region Marching

impl Ray {
    /// Advances the ray by a single step.
    ///
    /// The current location becomes the last location.
    pub fn step(&mut self) {
        self.last_location = self.curr_location;
        self.curr_location = self.curr_location + (self.direction * self.step_length);
    }

    /// Whether the current location is still within `max_distance`, as measured by [Self::bounds()]
    pub fn is_in_bound(&self) -> bool {
        let dist = match self.bounds {
            RayBounds::WorldOrigin => self.curr_location.length(),
            RayBounds::RayOrigin => self.curr_location.distance(self.origin),
        };
        dist <= self.max_distance
    }
}

// endregion Marching
