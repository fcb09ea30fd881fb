//! # Module [crate::camera]
//!
//! Sources of per-pixel view rays, expressed in the volume's coordinate frame.
//!
//! ## Related
//! - [Camera]
//! - [pinhole::PinholeCamera]

use crate::core::types::{Point3, Vector3};

pub mod pinhole;

/// Something that can produce a view ray for every pixel of an image.
///
/// Implementors must be stateless for the duration of a cast pass, as rays for different pixels
/// are requested from many threads at once.
pub trait Camera: Send + Sync {
    /// Number of columns in the image
    fn width(&self) -> usize;

    /// Number of rows in the image
    fn height(&self) -> usize;

    /// Calculates the view ray for the pixel at `(row, col)`
    fn ray_for(&self, row: usize, col: usize) -> PixelRay;
}

impl<C: Camera + ?Sized> Camera for &C {
    fn width(&self) -> usize { C::width(self) }

    fn height(&self) -> usize { C::height(self) }

    fn ray_for(&self, row: usize, col: usize) -> PixelRay { C::ray_for(self, row, col) }
}

/// The view ray through a single pixel
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelRay {
    /// Position the ray is cast from (the camera centre)
    pub origin: Point3,
    /// Direction of the ray. Should be normalised, but rays normalise it again regardless
    pub direction: Vector3,
}
