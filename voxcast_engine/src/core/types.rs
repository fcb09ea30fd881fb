/// Numeric type used for most calculations in the engine
pub type Number = f64;
/// A direction (or offset) in volume-space
pub type Vector3 = glam::DVec3;
/// A position in volume-space
pub type Point3 = glam::DVec3;
pub type Quaternion = glam::DQuat;
/// Integer coordinates of a single voxel inside a grid, stored as `[x, y, z]`
pub type VoxelIndex = [usize; 3];
