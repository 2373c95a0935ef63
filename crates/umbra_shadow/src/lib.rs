//! Shadow-cascade culling for terrain regions: per-region cascade assignment
//! from light-space sphere tests, and a light-direction-gated dispatch layer
//! over an external box-occlusion rasterizer.

pub mod boxes;
pub mod cascade;
pub mod occluder;

pub use boxes::PackedBox;
pub use cascade::{CascadeSelector, CascadeSphere, RegionOrigin, ShadowLightSource};
pub use occluder::{BoxRasterizer, DirectionOps, GateStats, VisibilityGate};
