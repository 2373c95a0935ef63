//! Terrain occlusion primitives for a 16x16 chunk-section slice: the static
//! catalog of every axis-aligned rectangle on the grid, a bit-packed coverage
//! representation of each rectangle, and constant-time set-relation tests
//! against accumulated occlusion samples.

pub mod area;
pub mod coverage;
pub mod printer;
pub mod sample;

pub use area::{catalog, AreaCatalog, AreaKey, AREA_COUNT, SECTION_COUNT};
pub use sample::SampleMask;
