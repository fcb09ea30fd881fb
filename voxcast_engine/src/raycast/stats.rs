use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct RaycastStats {
    /// How long the cast pass took
    pub duration: Duration,
    /// How many pixels were cast
    pub num_px: usize,
    /// How many of those pixels hit the surface
    pub num_hits: usize,
    /// How many threads were used in casting
    pub num_threads: usize,
}
