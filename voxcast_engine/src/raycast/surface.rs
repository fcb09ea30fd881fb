use crate::core::targets::SURFACE;
use crate::core::types::{Point3, Vector3};
use derivative::Derivative;
use getset::{CopyGetters, Getters};
use strum_macros::Display;
use thiserror::Error;
use tracing::trace;
use valuable::Valuable;

/// A point on the reconstructed surface
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfacePoint {
    /// Where the ray crossed the surface
    pub vertex: Point3,
    /// Unit normal of the surface, pointing towards free space
    pub normal: Vector3,
}

/// Which half of a [SurfaceSlot] is being referred to
#[derive(Display, Copy, Clone, Debug, PartialEq, Eq, Valuable)]
#[strum(serialize_all = "lowercase")]
pub enum SlotField {
    Vertex,
    Normal,
}

#[derive(Error, Copy, Clone, Debug, PartialEq, Valuable)]
pub enum SurfaceError {
    /// Slots are write-once, so a second, different value is never stored
    #[error("the {field} for pixel ({row}, {col}) was already set to a different value")]
    AlreadySet { row: usize, col: usize, field: SlotField },
}

/// The stored result for a single pixel. Each half can only be written once
#[derive(CopyGetters, Copy, Clone, Debug, Default, PartialEq)]
#[get_copy = "pub"]
pub struct SurfaceSlot {
    vertex: Option<Point3>,
    normal: Option<Vector3>,
}

impl SurfaceSlot {
    /// Both halves of the slot, if the pixel hit the surface
    pub fn point(&self) -> Option<SurfacePoint> {
        Some(SurfacePoint {
            vertex: self.vertex?,
            normal: self.normal?,
        })
    }

    pub fn is_hit(&self) -> bool { self.vertex.is_some() && self.normal.is_some() }

    /// Stores `value` into an empty half.
    ///
    /// Writing the exact value that's already stored is allowed, which keeps re-casting
    /// the same pixel harmless.
    fn write_once<T: PartialEq>(half: &mut Option<T>, value: T) -> bool {
        match half {
            Some(existing) => *existing == value,
            None => {
                *half = Some(value);
                true
            }
        }
    }

    pub(crate) fn set_vertex(&mut self, vertex: Point3) -> Result<(), SlotField> {
        Self::write_once(&mut self.vertex, vertex)
            .then_some(())
            .ok_or(SlotField::Vertex)
    }

    pub(crate) fn set_normal(&mut self, normal: Vector3) -> Result<(), SlotField> {
        Self::write_once(&mut self.normal, normal)
            .then_some(())
            .ok_or(SlotField::Normal)
    }

    /// Writes both halves, or neither of them if either would conflict
    pub(crate) fn set_point(&mut self, SurfacePoint { vertex, normal }: SurfacePoint) -> Result<(), SlotField> {
        if self.vertex.is_some_and(|v| v != vertex) {
            return Err(SlotField::Vertex);
        }
        if self.normal.is_some_and(|n| n != normal) {
            return Err(SlotField::Normal);
        }
        self.vertex = Some(vertex);
        self.normal = Some(normal);
        Ok(())
    }
}

/// A dense grid of (optional) surface points, one per pixel.
///
/// Slots are stored row-by-row in a flat buffer. Pixels that didn't hit anything read back
/// as [`Surface::EMPTY`] (all NaN), so that validity can be cheaply tested.
#[derive(CopyGetters, Getters, Derivative, Clone)]
#[derivative(Debug)]
pub struct Surface {
    #[get_copy = "pub"]
    width: usize,
    #[get_copy = "pub"]
    height: usize,
    /// Total number of slots (`width * height`)
    #[get_copy = "pub"]
    len: usize,
    #[derivative(Debug = "ignore")]
    #[get = "pub"]
    slots: Box<[SurfaceSlot]>,
}

// region Constructors

impl Surface {
    /// Sentinel value returned for the vertex/normal of a pixel without a hit
    pub const EMPTY: Vector3 = Vector3::NAN;

    /// Creates a new surface where no pixels have been hit
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self {
            width,
            height,
            len,
            slots: vec![SurfaceSlot::default(); len].into_boxed_slice(),
        }
    }
}

// endregion Constructors

// region Slot Accessors

impl Surface {
    fn compress_index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "invalid pixel index ({}, {}) for dims ({},{})",
            row,
            col,
            self.height,
            self.width
        );
        col + (row * self.width)
    }

    /// The slot for pixel `(row, col)`
    ///
    /// # Panics
    /// If the pixel is outside the surface
    pub fn slot(&self, row: usize, col: usize) -> &SurfaceSlot { &self.slots[self.compress_index(row, col)] }

    fn write(
        &mut self,
        row: usize,
        col: usize,
        write: impl FnOnce(&mut SurfaceSlot) -> Result<(), SlotField>,
    ) -> Result<(), SurfaceError> {
        let idx = self.compress_index(row, col);
        write(&mut self.slots[idx]).map_err(|field| {
            trace!(target: SURFACE, row, col, %field, "rejected conflicting write");
            SurfaceError::AlreadySet { row, col, field }
        })
    }

    pub fn set_vertex(&mut self, row: usize, col: usize, vertex: Point3) -> Result<(), SurfaceError> {
        self.write(row, col, |slot| slot.set_vertex(vertex))
    }

    pub fn set_normal(&mut self, row: usize, col: usize, normal: Vector3) -> Result<(), SurfaceError> {
        self.write(row, col, |slot| slot.set_normal(normal))
    }

    /// Sets both the vertex and the normal of a pixel. If either conflicts, neither is written
    pub fn set_point(&mut self, row: usize, col: usize, point: SurfacePoint) -> Result<(), SurfaceError> {
        self.write(row, col, |slot| slot.set_point(point))
    }

    /// The vertex of pixel `(row, col)`, or [`Surface::EMPTY`] if it has none
    pub fn vertex(&self, row: usize, col: usize) -> Point3 { self.slot(row, col).vertex.unwrap_or(Self::EMPTY) }

    /// The normal of pixel `(row, col)`, or [`Surface::EMPTY`] if it has none
    pub fn normal(&self, row: usize, col: usize) -> Vector3 { self.slot(row, col).normal.unwrap_or(Self::EMPTY) }

    pub fn point(&self, row: usize, col: usize) -> Option<SurfacePoint> { self.slot(row, col).point() }

    /// Whether the ray for pixel `(row, col)` hit the surface
    pub fn is_hit(&self, row: usize, col: usize) -> bool { self.slot(row, col).is_hit() }

    pub fn count_hits(&self) -> usize { self.slots.iter().filter(|s| s.is_hit()).count() }

    /// Direct mutable access to the flat slot buffer, for writing whole rows at once
    pub(crate) fn slots_mut(&mut self) -> &mut [SurfaceSlot] { &mut self.slots }
}

// endregion Slot Accessors

// region Iteration

impl Surface {
    /// Iterates over every pixel row-by-row, returning `(row, col, point)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Option<SurfacePoint>)> + '_ {
        let width = self.width.max(1);
        self.slots
            .iter()
            .enumerate()
            .map(move |(i, slot)| (i / width, i % width, slot.point()))
    }
}

// endregion Iteration
