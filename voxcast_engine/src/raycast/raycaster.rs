use crate::camera::{Camera, PixelRay};
use crate::core::targets::RAYCAST;
use crate::raycast::raycast_opts::{OptsInvalidError, RaycastOpts};
use crate::raycast::stats::RaycastStats;
use crate::raycast::surface::{Surface, SurfaceError, SurfacePoint};
use crate::raycast::zero_crossing;
use crate::shared::ray::Ray;
use crate::shared::validate;
use crate::volume::VoxelVolume;
use derivative::Derivative;
use puffin::{profile_function, profile_scope};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, trace};

/// A single ray-casting session.
///
/// Borrows the volume and camera for its whole lifetime, so neither can change while the
/// surface is being filled.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct RayCasting<'scene, V: VoxelVolume, C: Camera> {
    #[derivative(Debug = "ignore")]
    volume: &'scene V,
    #[derivative(Debug = "ignore")]
    camera: &'scene C,
    opts: RaycastOpts,
    #[derivative(Debug = "ignore")]
    surface: Surface,
    /// A thread pool used to distribute the workload
    #[derivative(Debug = "ignore")]
    thread_pool: ThreadPool,
}

#[derive(Error, Debug)]
pub enum RaycastError {
    #[error("the raycast options were invalid")]
    OptsInvalid {
        #[from]
        source: OptsInvalidError,
    },
    #[error("failed to create worker thread pool")]
    ThreadPoolError {
        #[from]
        source: ThreadPoolBuildError,
    },
    #[error("pixel ({row}, {col}) is outside the {width}x{height} image")]
    PixelOutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    #[error("couldn't store the raycast result")]
    SurfaceWrite {
        #[from]
        source: SurfaceError,
    },
}

// region Constructors

impl<'scene, V: VoxelVolume, C: Camera> RayCasting<'scene, V, C> {
    /// Starts a new session, with an empty surface the size of the camera's image
    ///
    /// # Errors
    /// Fails straight away if the options are invalid, rather than degrading every pixel to a miss
    pub fn new(volume: &'scene V, camera: &'scene C, opts: RaycastOpts) -> Result<Self, RaycastError> {
        opts.validate()?;

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(opts.num_threads)
            .thread_name(|id| format!("RayCasting::worker_{id}"))
            .build()?;

        let (width, height) = (camera.width(), camera.height());
        debug!(target: RAYCAST, ?opts, width, height, "created raycasting session");

        Ok(Self {
            volume,
            camera,
            opts,
            surface: Surface::new(width, height),
            thread_pool,
        })
    }
}

// endregion Constructors

// region Accessors

impl<'scene, V: VoxelVolume, C: Camera> RayCasting<'scene, V, C> {
    pub fn opts(&self) -> &RaycastOpts { &self.opts }

    pub fn volume(&self) -> &'scene V { self.volume }

    pub fn camera(&self) -> &'scene C { self.camera }

    /// The surface, as filled so far
    pub fn surface(&self) -> &Surface { &self.surface }

    /// Ends the session, keeping the surface
    pub fn into_surface(self) -> Surface { self.surface }
}

// endregion Accessors

// region Casting

impl<'scene, V: VoxelVolume, C: Camera> RayCasting<'scene, V, C> {
    /// Casts the ray for pixel `(row, col)` without storing the result.
    ///
    /// This is a pure function of the volume, camera and options, so it's safe to call from
    /// many threads at once.
    pub fn cast_pixel(&self, row: usize, col: usize) -> Option<SurfacePoint> {
        Self::cast(self.volume, self.camera, &self.opts, row, col)
    }

    /// Casts the ray for pixel `(row, col)`, and stores any hit in the surface
    ///
    /// # Errors
    /// - [RaycastError::PixelOutOfBounds] if the pixel is outside the image, whether or not it would hit
    /// - [RaycastError::SurfaceWrite] if the pixel was already filled with a *different* result.
    /// Filling it again with the same result is fine.
    pub fn fill_pixel(&mut self, row: usize, col: usize) -> Result<Option<SurfacePoint>, RaycastError> {
        let (width, height) = (self.surface.width(), self.surface.height());
        if row >= height || col >= width {
            return Err(RaycastError::PixelOutOfBounds { row, col, width, height });
        }

        let hit = self.cast_pixel(row, col);
        if let Some(point) = hit {
            self.surface.set_point(row, col, point)?;
        }
        Ok(hit)
    }

    /// Fills every pixel of the surface, distributing rows across the thread pool
    pub fn cast_all(&mut self) -> Result<RaycastStats, RaycastError> {
        profile_function!();

        let Self {
            volume,
            camera,
            opts,
            surface,
            thread_pool,
        } = self;
        let (volume, camera, opts) = (*volume, *camera, *opts);
        let width = surface.width();
        let num_px = surface.len();
        let num_threads = thread_pool.current_num_threads();

        let start = puffin::now_ns();
        if num_px > 0 {
            let slots = surface.slots_mut();
            thread_pool.install(|| {
                slots
                    .par_chunks_mut(width)
                    .enumerate()
                    .try_for_each(|(row, slots)| {
                        profile_scope!("row");
                        for (col, slot) in slots.iter_mut().enumerate() {
                            if let Some(point) = Self::cast(volume, camera, &opts, row, col) {
                                slot.set_point(point)
                                    .map_err(|field| SurfaceError::AlreadySet { row, col, field })?;
                            }
                        }
                        Ok::<(), SurfaceError>(())
                    })
            })?;
        }
        let end = puffin::now_ns();

        let stats = RaycastStats {
            duration: Duration::from_nanos(end.abs_diff(start)),
            num_px,
            num_hits: surface.count_hits(),
            num_threads,
        };
        info!(target: RAYCAST, num_hits = stats.num_hits, num_px, num_threads, duration = ?stats.duration, "cast all pixels");
        Ok(stats)
    }

    /// Casts a single pixel's ray through the volume
    fn cast(volume: &V, camera: &C, opts: &RaycastOpts, row: usize, col: usize) -> Option<SurfacePoint> {
        let PixelRay { origin, direction } = camera.ray_for(row, col);
        let mut ray = match Ray::new_from(
            origin,
            opts.step_length,
            opts.min_distance,
            opts.max_distance,
            direction,
            opts.bounds,
        ) {
            Ok(ray) => ray,
            Err(err) => {
                trace!(target: RAYCAST, row, col, ?err, "couldn't create view ray, treating as a miss");
                return None;
            }
        };

        let vertex = zero_crossing::march(volume, &mut ray)?;
        let Some(normal) = zero_crossing::estimate_normal(volume, vertex, opts.gradient_epsilon) else {
            trace!(target: RAYCAST, row, col, %vertex, "couldn't estimate normal at crossing, treating as a miss");
            return None;
        };

        validate::surface_point(vertex, normal);
        Some(SurfacePoint { vertex, normal })
    }
}

// endregion Casting
