use crate::core::types::Number;
use crate::shared::ray::{Ray, RayBounds, RayInvalidError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use valuable::Valuable;

/// Options that control how rays are marched through a volume
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Valuable)]
#[serde(default)]
pub struct RaycastOpts {
    /// How far a ray advances between consecutive samples
    pub step_length: Number,
    /// Distance along each ray of the first sample
    pub min_distance: Number,
    /// Rays are abandoned once they go further than this (see [RaycastOpts::bounds])
    pub max_distance: Number,
    /// Offset used for the central differences when estimating normals
    pub gradient_epsilon: Number,
    /// How the `max_distance` is measured
    pub bounds: RayBounds,
    /// How many worker threads to cast with, zero picks automatically
    pub num_threads: usize,
}

#[derive(Error, Copy, Clone, Debug, PartialEq, Valuable)]
pub enum OptsInvalidError {
    #[error(transparent)]
    RayParams(#[from] RayInvalidError),
    #[error("the gradient epsilon must be finite and > 0 (was {epsilon})")]
    GradientEpsilonInvalid { epsilon: Number },
}

impl RaycastOpts {
    /// Options scaled to a volume's resolution: rays start one voxel out and step one voxel at a
    /// time, with half a voxel for gradients
    pub fn for_voxel_size(voxel_size: Number, max_distance: Number) -> Self {
        Self {
            step_length: voxel_size,
            min_distance: voxel_size,
            gradient_epsilon: voxel_size * 0.5,
            max_distance,
            ..Self::default()
        }
    }

    /// Checks that the options can be used for a cast pass
    ///
    /// # Errors
    /// - [OptsInvalidError::RayParams] if `step_length` isn't finite and `> 0`, or the distances
    /// don't satisfy `0 < min_distance < max_distance` (with a finite `max_distance`)
    /// - [OptsInvalidError::GradientEpsilonInvalid] if `gradient_epsilon` isn't finite and `> 0`
    pub fn validate(&self) -> Result<(), OptsInvalidError> {
        Ray::check_params(self.step_length, self.min_distance, self.max_distance)?;

        let epsilon = self.gradient_epsilon;
        if !(epsilon.is_finite() && epsilon > 0.) {
            return Err(OptsInvalidError::GradientEpsilonInvalid { epsilon });
        }
        Ok(())
    }
}

impl Default for RaycastOpts {
    fn default() -> Self {
        Self {
            step_length: 0.01,
            min_distance: 0.01,
            max_distance: 8.0,
            gradient_epsilon: 0.005,
            bounds: RayBounds::WorldOrigin,
            num_threads: 0,
        }
    }
}
