//! Per-region shadow cascade assignment.
//!
//! Cascade geometry comes from an external light/frustum provider as four
//! bounding spheres in light space. Cascade 0 is the widest sphere and bounds
//! every other cascade; cascade 3 is the tightest and highest-resolution.
//! Selection returns the tightest cascade whose light-space slab still
//! contains the region, so each region renders into the cheapest map that can
//! hold its shadow.

use glam::{DVec3, Mat4, Vec3};
use tracing::trace;

/// One cascade's bounding sphere in light space.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct CascadeSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// External light/frustum provider boundary. Implemented by whatever owns the
/// shadow matrices for the frame.
pub trait ShadowLightSource {
    fn shadow_view_matrix(&self) -> Mat4;
    fn shadow_proj_matrix(&self) -> Mat4;
    /// Sphere 0 must bound spheres 1..4.
    fn cascade_spheres(&self) -> [CascadeSphere; 4];
    /// Largest bounding radius any terrain region can have, in light space.
    fn max_region_extent(&self) -> f32;
    fn camera_pos(&self) -> DVec3;
    /// Monotonically increasing; bumps whenever the light or camera moved.
    fn view_version(&self) -> u64;
}

/// A terrain region as seen by the culling pass: camera-relative center plus
/// a distance rank consumed by the external draw-order scheduler.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RegionOrigin {
    pub camera_relative_center: Vec3,
    pub shadow_distance_rank: i32,
}

/// Snapshot of the frame's shadow geometry plus the cascade test.
#[derive(Clone, Debug)]
pub struct CascadeSelector {
    view_matrix: Mat4,
    proj_matrix: Mat4,
    spheres: [CascadeSphere; 4],
    max_region_extent: f32,
    last_camera_pos: DVec3,
    last_view_version: u64,
}

impl Default for CascadeSelector {
    fn default() -> Self {
        Self {
            view_matrix: Mat4::IDENTITY,
            proj_matrix: Mat4::IDENTITY,
            spheres: [CascadeSphere::default(); 4],
            max_region_extent: 0.0,
            last_camera_pos: DVec3::ZERO,
            last_view_version: 0,
        }
    }
}

impl CascadeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the provider's current matrices, spheres, extent, camera
    /// position and view version. A pure snapshot; never fails.
    pub fn refresh(&mut self, source: &impl ShadowLightSource) {
        self.view_matrix = source.shadow_view_matrix();
        self.proj_matrix = source.shadow_proj_matrix();
        self.spheres = source.cascade_spheres();
        self.max_region_extent = source.max_region_extent();
        self.last_camera_pos = source.camera_pos();
        self.last_view_version = source.view_version();
        trace!(view_version = self.last_view_version, "refreshed shadow snapshot");
    }

    /// Tightest cascade on which a region at the given origin can cast a
    /// shadow, or `None` when it cannot reach the shadow map at all.
    pub fn cascade(&self, region: &RegionOrigin) -> Option<usize> {
        let center = self.view_matrix.transform_point3(region.camera_relative_center);
        let extent = self.max_region_extent;

        // Slab distances: <= extent means at least partially in,
        // > extent (or dz < -extent) means out.
        let (dx, dy, dz) = self.slab_distances(center, 0);

        if dx > extent || dy > extent || dz < -extent {
            // Outside the superset bound, so outside every cascade.
            return None;
        }

        for cascade in (1..4).rev() {
            let (dx, dy, dz) = self.slab_distances(center, cascade);

            if dx <= extent && dy <= extent && dz >= -extent {
                return Some(cascade);
            }
        }

        Some(0)
    }

    #[inline]
    fn slab_distances(&self, center: Vec3, cascade: usize) -> (f32, f32, f32) {
        let sphere = &self.spheres[cascade];
        (
            (center.x - sphere.center.x).abs() - sphere.radius,
            (center.y - sphere.center.y).abs() - sphere.radius,
            (center.z - sphere.center.z) + sphere.radius,
        )
    }

    pub fn max_region_extent(&self) -> f32 {
        self.max_region_extent
    }

    pub fn shadow_proj_matrix(&self) -> Mat4 {
        self.proj_matrix
    }

    pub fn last_camera_pos(&self) -> DVec3 {
        self.last_camera_pos
    }

    pub fn view_version(&self) -> u64 {
        self.last_view_version
    }
}

#[cfg(test)]
mod tests {
    use glam::{DVec3, Mat4, Vec3};

    use super::{CascadeSelector, CascadeSphere, RegionOrigin, ShadowLightSource};

    struct StubLight {
        view_matrix: Mat4,
        spheres: [CascadeSphere; 4],
        max_region_extent: f32,
        camera_pos: DVec3,
        view_version: u64,
    }

    impl StubLight {
        /// Concentric spheres at the light-space origin; cascade 0 bounds the
        /// rest, cascade 3 is tightest.
        fn concentric() -> Self {
            let radii = [40.0, 20.0, 10.0, 5.0];
            let spheres = radii.map(|radius| CascadeSphere {
                center: Vec3::ZERO,
                radius,
            });

            Self {
                view_matrix: Mat4::IDENTITY,
                spheres,
                max_region_extent: 1.0,
                camera_pos: DVec3::new(8.0, 64.0, -8.0),
                view_version: 7,
            }
        }
    }

    impl ShadowLightSource for StubLight {
        fn shadow_view_matrix(&self) -> Mat4 {
            self.view_matrix
        }

        fn shadow_proj_matrix(&self) -> Mat4 {
            Mat4::IDENTITY
        }

        fn cascade_spheres(&self) -> [CascadeSphere; 4] {
            self.spheres
        }

        fn max_region_extent(&self) -> f32 {
            self.max_region_extent
        }

        fn camera_pos(&self) -> DVec3 {
            self.camera_pos
        }

        fn view_version(&self) -> u64 {
            self.view_version
        }
    }

    fn region_at(x: f32, y: f32, z: f32) -> RegionOrigin {
        RegionOrigin {
            camera_relative_center: Vec3::new(x, y, z),
            shadow_distance_rank: 0,
        }
    }

    fn selector(light: &StubLight) -> CascadeSelector {
        let mut selector = CascadeSelector::new();
        selector.refresh(light);
        selector
    }

    #[test]
    fn region_outside_the_superset_bound_casts_no_shadow() {
        let selector = selector(&StubLight::concentric());

        assert_eq!(selector.cascade(&region_at(100.0, 100.0, 100.0)), None);
        assert_eq!(selector.cascade(&region_at(42.0, 0.0, 0.0)), None);
        // Behind the superset sphere's far boundary.
        assert_eq!(selector.cascade(&region_at(0.0, 0.0, -42.0)), None);
    }

    #[test]
    fn region_near_the_origin_takes_the_tightest_cascade() {
        let selector = selector(&StubLight::concentric());
        assert_eq!(selector.cascade(&region_at(0.0, 0.0, -3.0)), Some(3));
    }

    #[test]
    fn region_only_inside_the_widest_sphere_falls_back_to_cascade_zero() {
        let selector = selector(&StubLight::concentric());
        // Past cascade 1-3's slabs (dz_i < -extent) but inside cascade 0's.
        assert_eq!(selector.cascade(&region_at(0.0, 0.0, -35.0)), Some(0));
    }

    #[test]
    fn intermediate_cascades_are_chosen_when_the_tighter_ones_fail() {
        let selector = selector(&StubLight::concentric());
        // dz3 = -8 + 5 < -1 rules out 3; dz2 = -8 + 10 passes.
        assert_eq!(selector.cascade(&region_at(0.0, 0.0, -8.0)), Some(2));
        // dz2 = -18 + 10 < -1 rules out 2; dz1 = -18 + 20 passes.
        assert_eq!(selector.cascade(&region_at(0.0, 0.0, -18.0)), Some(1));
    }

    #[test]
    fn extent_widens_every_slab_test() {
        let mut light = StubLight::concentric();
        light.max_region_extent = 4.0;
        let selector = selector(&light);

        // dx3 = 8 - 5 = 3 is within the widened extent.
        assert_eq!(selector.cascade(&region_at(8.0, 0.0, 0.0)), Some(3));
        // dx0 = 43 - 40 = 3 keeps the gate open; only cascade 0 fits.
        assert_eq!(selector.cascade(&region_at(43.0, 0.0, 0.0)), Some(0));
    }

    #[test]
    fn region_centers_transform_through_the_stored_view_matrix() {
        let mut light = StubLight::concentric();
        light.view_matrix = Mat4::from_translation(Vec3::new(-50.0, 0.0, 0.0));
        let selector = selector(&light);

        // World x = 50 lands at the light-space origin.
        assert_eq!(selector.cascade(&region_at(50.0, 0.0, 0.0)), Some(3));
        assert_eq!(selector.cascade(&region_at(0.0, 0.0, 0.0)), None);
    }

    #[test]
    fn refresh_snapshots_the_provider_state() {
        let light = StubLight::concentric();
        let selector = selector(&light);

        assert_eq!(selector.max_region_extent(), 1.0);
        assert_eq!(selector.view_version(), 7);
        assert_eq!(selector.last_camera_pos(), DVec3::new(8.0, 64.0, -8.0));
    }
}
