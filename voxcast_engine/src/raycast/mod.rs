//! # Module [crate::raycast]
//!
//! Turns a [crate::volume::VoxelVolume] and a [crate::camera::Camera] into a [surface::Surface].
//!
//! ## Related
//! - [raycaster::RayCasting], the entry point
//! - [zero_crossing] for the per-ray maths
//! - [raycast_opts::RaycastOpts]

pub mod raycast_opts;
pub mod raycaster;
pub mod stats;
pub mod surface;
pub mod zero_crossing;
