use glam::{IVec2, IVec3};

use gabbro_shared::coords::{RegionPos, REGION_SIZE};

use crate::lattice::TrilinearBox;
use crate::patch::{BicubicPatch, PatchFeatures};

pub const OCTAVE_CELL_EDGE: i32 = REGION_SIZE / 2;
pub const DENSITY_BOX_HEIGHT: i32 = 256;
pub const DENSITY_BOX_PERIOD: i32 = 32;
pub const DENSITY_BOX_SIZE: IVec3 = IVec3::new(REGION_SIZE, DENSITY_BOX_HEIGHT, REGION_SIZE);

// Salts decorrelate the streams that share one world seed.
pub const OCTAVE_FIELD_SALT: u64 = 0x3C6EF372FE94F82B;
pub const CAVE_FIELD_SALT: u64 = 0x61C8864680B583EB;

/// All random fields one region needs: the region-wide fundamental height
/// patch, a 2x2 grid of octave patches at half the region edge, and two
/// density boxes spanning the full build height.
pub struct RegionFeatures {
    region: RegionPos,
    fundamental: BicubicPatch,
    octaves: [[BicubicPatch; 2]; 2],
    density: [TrilinearBox; 2],
}

impl RegionFeatures {
    pub fn new(
        world_seed: u64,
        region: RegionPos,
        fundamental_features: &PatchFeatures,
        octave_features: &PatchFeatures,
    ) -> Self {
        let origin = IVec2::new(region.x, region.z);

        let fundamental = BicubicPatch::new(
            world_seed,
            origin,
            IVec2::splat(REGION_SIZE),
            fundamental_features,
        );

        let octave_seed = world_seed ^ OCTAVE_FIELD_SALT;
        let octaves: [[BicubicPatch; 2]; 2] = std::array::from_fn(|cell_x| {
            std::array::from_fn(|cell_z| {
                let offset = IVec2::new(cell_x as i32, cell_z as i32) * OCTAVE_CELL_EDGE;
                BicubicPatch::new(
                    octave_seed,
                    origin + offset,
                    IVec2::splat(OCTAVE_CELL_EDGE),
                    octave_features,
                )
            })
        });

        let box_anchor = IVec3::new(region.x, 0, region.z);
        let density = [
            TrilinearBox::new(world_seed, box_anchor, DENSITY_BOX_SIZE, DENSITY_BOX_PERIOD),
            TrilinearBox::new(
                world_seed ^ CAVE_FIELD_SALT,
                box_anchor,
                DENSITY_BOX_SIZE,
                DENSITY_BOX_PERIOD,
            ),
        ];

        Self {
            region,
            fundamental,
            octaves,
            density,
        }
    }

    pub fn region(&self) -> RegionPos {
        self.region
    }

    pub fn fundamental_patch(&self) -> &BicubicPatch {
        &self.fundamental
    }

    pub fn octave_patch(&self, cell: IVec2) -> &BicubicPatch {
        assert!(
            (0..2).contains(&cell.x) && (0..2).contains(&cell.y),
            "octave cell {cell} outside the 2x2 grid"
        );
        &self.octaves[cell.x as usize][cell.y as usize]
    }

    pub fn density_box(&self, field: usize) -> &TrilinearBox {
        assert!(field < 2, "density field index {field} out of range");
        &self.density[field]
    }
}
