use crate::camera::{Camera, PixelRay};
use crate::core::targets::CAMERA;
use crate::core::types::{Number, Point3, Quaternion, Vector3};
use getset::CopyGetters;
use nonzero::nonzero;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use thiserror::Error;
use tracing::trace;
use valuable::Valuable;

/// Projection parameters of a pinhole camera, in pixels
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Valuable)]
pub struct Intrinsics {
    /// Horizontal focal length
    pub fx: Number,
    /// Vertical focal length
    pub fy: Number,
    /// Column of the principal point
    pub cx: Number,
    /// Row of the principal point
    pub cy: Number,
}

/// Where a camera is, and which way it's facing (in the volume's coordinate frame)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point3,
    /// Rotation from camera-space (`+z` forwards, `+x` along columns, `+y` along rows) into volume-space
    pub rotation: Quaternion,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Point3::ZERO,
        rotation: Quaternion::IDENTITY,
    };
}

impl Default for Pose {
    fn default() -> Self { Self::IDENTITY }
}

#[derive(Error, Copy, Clone, Debug, Valuable)]
pub enum CamInvalidError {
    /// A focal length was zero or not finite, so pixels can't be projected
    #[error("the provided focal length was not valid")]
    FocalLengthInvalid,
    #[error("the provided principal point was not valid")]
    PrincipalPointInvalid,
    /// The rotation was not finite, or too close to zero to be normalised
    #[error("the provided rotation couldn't be normalised")]
    RotationInvalid,
    #[error("the provided position was not finite")]
    PositionInvalid,
}

/// A simple pinhole camera (no distortion)
///
/// Pixel `(row, col)` looks along `rotation * ((col - cx) / fx, (row - cy) / fy, 1)`.
#[derive(CopyGetters, Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[get_copy = "pub"]
pub struct PinholeCamera {
    intrinsics: Intrinsics,
    pose: Pose,
    image_width: NonZeroUsize,
    image_height: NonZeroUsize,
}

impl Default for PinholeCamera {
    /// A VGA depth camera sitting at the origin, looking down `+z`
    fn default() -> Self {
        Self {
            intrinsics: Intrinsics {
                fx: 525.,
                fy: 525.,
                cx: 319.5,
                cy: 239.5,
            },
            pose: Pose::IDENTITY,
            image_width: nonzero!(640_usize),
            image_height: nonzero!(480_usize),
        }
    }
}

impl PinholeCamera {
    /// Creates a new camera, checking that the projection is valid
    ///
    /// # Errors
    /// See [CamInvalidError] for the different failure cases
    pub fn new(
        image_width: NonZeroUsize,
        image_height: NonZeroUsize,
        intrinsics: Intrinsics,
        pose: Pose,
    ) -> Result<Self, CamInvalidError> {
        let Intrinsics { fx, fy, cx, cy } = intrinsics;
        if [fx, fy].into_iter().any(|f| !f.is_finite() || f == 0.) {
            return Err(CamInvalidError::FocalLengthInvalid);
        }
        if !(cx.is_finite() && cy.is_finite()) {
            return Err(CamInvalidError::PrincipalPointInvalid);
        }
        if !pose.position.is_finite() {
            return Err(CamInvalidError::PositionInvalid);
        }
        if !(pose.rotation.is_finite() && pose.rotation.length() > 0.) {
            return Err(CamInvalidError::RotationInvalid);
        }

        let pose = Pose {
            rotation: pose.rotation.normalize(),
            ..pose
        };
        trace!(target: CAMERA, ?intrinsics, ?pose, %image_width, %image_height, "created pinhole camera");

        Ok(Self {
            intrinsics,
            pose,
            image_width,
            image_height,
        })
    }

    /// Moves the camera, keeping the same projection
    pub fn with_pose(self, pose: Pose) -> Result<Self, CamInvalidError> {
        Self::new(self.image_width, self.image_height, self.intrinsics, pose)
    }

    /// Direction through pixel `(row, col)` in camera-space (before rotating), with `z == 1`
    pub fn unproject(&self, row: usize, col: usize) -> Vector3 {
        let Intrinsics { fx, fy, cx, cy } = self.intrinsics;
        Vector3::new((col as Number - cx) / fx, (row as Number - cy) / fy, 1.)
    }
}

impl Camera for PinholeCamera {
    fn width(&self) -> usize { self.image_width.get() }

    fn height(&self) -> usize { self.image_height.get() }

    fn ray_for(&self, row: usize, col: usize) -> PixelRay {
        let direction = (self.pose.rotation * self.unproject(row, col)).normalize();
        PixelRay {
            origin: self.pose.position,
            direction,
        }
    }
}
