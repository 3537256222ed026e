use glam::{IVec2, Vec2};

use crate::rng::{seed_for_cell, SeedStream};

// Min/max bounds for each random corner draw, stored as (low, high) pairs.
#[derive(Copy, Clone, Debug)]
pub struct CornerFeatures {
    pub value: Vec2,
    pub slope_x: Vec2,
    pub slope_z: Vec2,
    pub twist: Vec2,
}

#[derive(Copy, Clone, Debug)]
pub struct PatchFeatures {
    pub corners: [CornerFeatures; 4],
}

impl PatchFeatures {
    pub const fn uniform(corner: CornerFeatures) -> Self {
        Self {
            corners: [corner; 4],
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct CornerSample {
    value: f32,
    slope_x: f32,
    slope_z: f32,
    twist: f32,
}

/// Tensor-product cubic Hermite surface whose corner data is drawn from
/// streams seeded by absolute corner position. Corner order follows the
/// anchor: (0, 0), (size.x, 0), (size.x, size.y), (0, size.y).
#[derive(Clone, Debug)]
pub struct BicubicPatch {
    corners: [CornerSample; 4],
}

impl BicubicPatch {
    pub fn new(world_seed: u64, anchor: IVec2, size: IVec2, features: &PatchFeatures) -> Self {
        assert!(size.x > 0 && size.y > 0, "patch size must be positive: {size}");

        let offsets = [
            IVec2::new(0, 0),
            IVec2::new(size.x, 0),
            IVec2::new(size.x, size.y),
            IVec2::new(0, size.y),
        ];

        let corners = std::array::from_fn(|index| {
            let mut stream = SeedStream::new(seed_for_cell(world_seed, anchor + offsets[index]));
            let ranges = &features.corners[index];
            CornerSample {
                value: stream.next_f32(ranges.value.x, ranges.value.y),
                slope_x: stream.next_f32(ranges.slope_x.x, ranges.slope_x.y),
                slope_z: stream.next_f32(ranges.slope_z.x, ranges.slope_z.y),
                twist: stream.next_f32(ranges.twist.x, ranges.twist.y),
            }
        });

        Self { corners }
    }

    // Values along an edge depend only on the two corners it connects, so
    // neighboring patches built from the same seed agree across whole edges.
    pub fn interpolate(&self, at: Vec2) -> f32 {
        assert!(
            (0.0..=1.0).contains(&at.x) && (0.0..=1.0).contains(&at.y),
            "patch sample {at} outside the unit square"
        );

        let [c00, c10, c11, c01] = self.corners;

        let value_near = hermite(at.x, c00.value, c10.value, c00.slope_x, c10.slope_x);
        let value_far = hermite(at.x, c01.value, c11.value, c01.slope_x, c11.slope_x);
        let slope_near = hermite(at.x, c00.slope_z, c10.slope_z, c00.twist, c10.twist);
        let slope_far = hermite(at.x, c01.slope_z, c11.slope_z, c01.twist, c11.twist);

        hermite(at.y, value_near, value_far, slope_near, slope_far)
    }
}

fn hermite(t: f32, start: f32, end: f32, start_tangent: f32, end_tangent: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    start * (2.0 * t3 - 3.0 * t2 + 1.0)
        + start_tangent * (t3 - 2.0 * t2 + t)
        + end * (3.0 * t2 - 2.0 * t3)
        + end_tangent * (t3 - t2)
}

#[cfg(test)]
mod tests {
    use glam::{IVec2, Vec2};

    use super::{BicubicPatch, CornerFeatures, PatchFeatures};

    fn test_features() -> PatchFeatures {
        PatchFeatures::uniform(CornerFeatures {
            value: Vec2::new(0.0, 128.0),
            slope_x: Vec2::new(-64.0, 64.0),
            slope_z: Vec2::new(-64.0, 64.0),
            twist: Vec2::new(-64.0, 64.0),
        })
    }

    #[test]
    fn interpolation_reproduces_seeded_corner_values() {
        let features = test_features();
        let patch = BicubicPatch::new(99, IVec2::new(-128, 256), IVec2::new(128, 128), &features);

        assert_eq!(patch.interpolate(Vec2::new(0.0, 0.0)), patch.corners[0].value);
        assert_eq!(patch.interpolate(Vec2::new(1.0, 0.0)), patch.corners[1].value);
        assert_eq!(patch.interpolate(Vec2::new(1.0, 1.0)), patch.corners[2].value);
        assert_eq!(patch.interpolate(Vec2::new(0.0, 1.0)), patch.corners[3].value);
    }

    #[test]
    fn neighboring_patches_share_corner_draws() {
        let features = test_features();
        let size = IVec2::new(128, 128);
        let left = BicubicPatch::new(7, IVec2::new(0, 0), size, &features);
        let right = BicubicPatch::new(7, IVec2::new(128, 0), size, &features);

        assert_eq!(left.corners[1].value, right.corners[0].value);
        assert_eq!(left.corners[1].slope_z, right.corners[0].slope_z);
        assert_eq!(left.corners[2].value, right.corners[3].value);
        assert_eq!(left.corners[2].twist, right.corners[3].twist);
    }

    #[test]
    fn shared_edges_interpolate_identically() {
        let features = test_features();
        let size = IVec2::new(128, 128);
        let left = BicubicPatch::new(3, IVec2::new(0, 0), size, &features);
        let right = BicubicPatch::new(3, IVec2::new(128, 0), size, &features);
        let below = BicubicPatch::new(3, IVec2::new(0, 128), size, &features);

        for step in 0..=32 {
            let t = step as f32 / 32.0;
            assert_eq!(
                left.interpolate(Vec2::new(1.0, t)),
                right.interpolate(Vec2::new(0.0, t)),
                "x-edge mismatch at t={t}"
            );
            assert_eq!(
                left.interpolate(Vec2::new(t, 1.0)),
                below.interpolate(Vec2::new(t, 0.0)),
                "z-edge mismatch at t={t}"
            );
        }
    }

    #[test]
    fn different_seeds_produce_different_surfaces() {
        let features = test_features();
        let size = IVec2::new(64, 64);
        let a = BicubicPatch::new(11, IVec2::new(0, 0), size, &features);
        let b = BicubicPatch::new(12, IVec2::new(0, 0), size, &features);

        assert_ne!(
            a.interpolate(Vec2::new(0.5, 0.5)),
            b.interpolate(Vec2::new(0.5, 0.5))
        );
    }

    #[test]
    #[should_panic(expected = "outside the unit square")]
    fn out_of_range_sample_panics() {
        let features = test_features();
        let patch = BicubicPatch::new(0, IVec2::new(0, 0), IVec2::new(64, 64), &features);
        let _ = patch.interpolate(Vec2::new(1.5, 0.0));
    }

    #[test]
    #[should_panic(expected = "patch size must be positive")]
    fn zero_size_patch_panics() {
        let features = test_features();
        let _ = BicubicPatch::new(0, IVec2::new(0, 0), IVec2::new(0, 64), &features);
    }
}
