//! # voxcast_engine
//!
//! Reconstructs a dense surface (a vertex and normal per image pixel) by ray-casting a
//! truncated signed-distance field (TSDF).
//!
//! ## Related
//! - [raycast::raycaster::RayCasting] drives the whole process
//! - [volume::VoxelVolume] and [camera::Camera] are the inputs
//! - [raycast::surface::Surface] is the output

pub mod camera;
pub mod core;
pub mod raycast;
pub mod shared;
pub mod volume;
