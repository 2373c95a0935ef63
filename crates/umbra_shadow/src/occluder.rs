//! Light-direction-gated dispatch over an external box-occlusion rasterizer.
//!
//! The rasterizer supplies eight (clear-test, occluded-test, draw) triples,
//! one per sign combination of the light vector. The matching triple is
//! selected once per light-vector change, so the per-box path is a plain
//! function-pointer call with no direction branching.

use glam::Vec3;
use tracing::trace;

use crate::boxes::PackedBox;

/// Components closer to zero than this contribute no direction bit.
const DIRECTION_EPSILON: f32 = 1.0e-5;

const EAST: usize = 1;
const SOUTH: usize = 2;
const UP: usize = 4;

/// Box test supplied by the rasterizer: six unpacked coordinates in, verdict
/// out.
pub type BoxTestFn<R> = fn(&mut R, i32, i32, i32, i32, i32, i32) -> bool;

/// Box draw supplied by the rasterizer: marks the box as an occluder.
pub type BoxDrawFn<R> = fn(&mut R, i32, i32, i32, i32, i32, i32);

/// One direction variant's capability triple.
pub struct DirectionOps<R> {
    pub clear_test: BoxTestFn<R>,
    pub occluded_test: BoxTestFn<R>,
    pub draw: BoxDrawFn<R>,
}

impl<R> Copy for DirectionOps<R> {}

impl<R> Clone for DirectionOps<R> {
    fn clone(&self) -> Self {
        *self
    }
}

/// External box-occlusion rasterizer boundary: eight direction-indexed
/// capability triples over the rasterizer's own state.
pub trait BoxRasterizer: Sized {
    fn direction_ops() -> [DirectionOps<Self>; 8];
}

/// Counts of rasterizer calls issued since the last reset.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct GateStats {
    pub clear_tests: u32,
    pub occluded_tests: u32,
    pub draws: u32,
}

/// Per-box visibility front end over a [`BoxRasterizer`].
pub struct VisibilityGate<R: BoxRasterizer> {
    raster: R,
    tables: [DirectionOps<R>; 8],
    ops: DirectionOps<R>,
    light_code: usize,
    stats: GateStats,
}

impl<R: BoxRasterizer> VisibilityGate<R> {
    /// Starts with the all-near-zero direction selected.
    pub fn new(raster: R) -> Self {
        let tables = R::direction_ops();

        Self {
            raster,
            tables,
            ops: tables[0],
            light_code: 0,
            stats: GateStats::default(),
        }
    }

    /// Reselects the capability triple for the given light vector. Cached
    /// until the vector changes again.
    pub fn set_light_vector(&mut self, light_vector: Vec3) {
        let mut code = 0;

        if light_vector.x > DIRECTION_EPSILON {
            code |= EAST;
        }

        if light_vector.z > DIRECTION_EPSILON {
            code |= SOUTH;
        }

        if light_vector.y > DIRECTION_EPSILON {
            code |= UP;
        }

        if code != self.light_code {
            trace!(code, "light direction changed");
        }

        self.light_code = code;
        self.ops = self.tables[code];
    }

    /// Direction code currently selected, in `0..8`.
    pub fn light_code(&self) -> usize {
        self.light_code
    }

    /// True when the box would be drawn: at least partially clear.
    pub fn is_box_visible(&mut self, packed: PackedBox) -> bool {
        self.stats.clear_tests += 1;
        (self.ops.clear_test)(
            &mut self.raster,
            packed.x0(),
            packed.y0(),
            packed.z0(),
            packed.x1(),
            packed.y1(),
            packed.z1(),
        )
    }

    /// True when the box is partially or fully occluded.
    pub fn is_box_occluded(&mut self, packed: PackedBox) -> bool {
        self.stats.occluded_tests += 1;
        (self.ops.occluded_test)(
            &mut self.raster,
            packed.x0(),
            packed.y0(),
            packed.z0(),
            packed.x1(),
            packed.y1(),
            packed.z1(),
        )
    }

    /// Marks the box as an occluder for subsequent tests.
    pub fn occlude_box(&mut self, packed: PackedBox) {
        self.stats.draws += 1;
        (self.ops.draw)(
            &mut self.raster,
            packed.x0(),
            packed.y0(),
            packed.z0(),
            packed.x1(),
            packed.y1(),
            packed.z1(),
        );
    }

    pub fn stats(&self) -> GateStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = GateStats::default();
    }

    pub fn raster(&self) -> &R {
        &self.raster
    }

    pub fn raster_mut(&mut self) -> &mut R {
        &mut self.raster
    }
}
