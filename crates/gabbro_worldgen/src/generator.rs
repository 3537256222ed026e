use std::time::Instant;

use glam::{IVec2, Vec2, Vec3};
use tracing::debug;

use gabbro_shared::chunk::Chunk;
use gabbro_shared::coords::{
    ColumnPos, RegionPos, CHUNKS_PER_REGION_EDGE, CHUNK_SIZE, REGION_SIZE,
};
use gabbro_shared::material::BlockMaterial;

use crate::column::{ChunkColumn, ChunkHeightmap};
use crate::features::{RegionFeatures, DENSITY_BOX_HEIGHT, OCTAVE_CELL_EDGE};
use crate::patch::{CornerFeatures, PatchFeatures};
use crate::vegetation;

const HEIGHT_OFFSET: f32 = 32.0;

// Cells are carved to air only when both density fields fall strictly
// inside this window.
pub const CARVE_WINDOW_LOW: f32 = 0.45;
pub const CARVE_WINDOW_HIGH: f32 = 0.55;

pub const FUNDAMENTAL_PATCH_FEATURES: PatchFeatures = PatchFeatures::uniform(CornerFeatures {
    value: Vec2::new(0.0, 128.0),
    slope_x: Vec2::new(-64.0, 64.0),
    slope_z: Vec2::new(-64.0, 64.0),
    twist: Vec2::new(-64.0, 64.0),
});

pub const OCTAVE_PATCH_FEATURES: PatchFeatures = PatchFeatures::uniform(CornerFeatures {
    value: Vec2::new(-32.0, 32.0),
    slope_x: Vec2::new(-64.0, 64.0),
    slope_z: Vec2::new(-64.0, 64.0),
    twist: Vec2::new(-64.0, 64.0),
});

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSettings {
    /// Fold the octave field to its absolute value before subtracting it,
    /// which turns its zero crossings into sharp ridge lines.
    pub ridged_octaves: bool,
    pub trees_per_column: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            ridged_octaves: true,
            trees_per_column: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorldGenerator {
    pub seed: u64,
    settings: GeneratorSettings,
}

impl WorldGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, GeneratorSettings::default())
    }

    pub fn with_settings(seed: u64, settings: GeneratorSettings) -> Self {
        Self { seed, settings }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Produces every chunk of one region, column by column from its low
    /// corner, with each column's chunks ordered bottom-up.
    pub fn generate_region(&self, region: RegionPos) -> Vec<Chunk> {
        let started = Instant::now();
        let features = RegionFeatures::new(
            self.seed,
            region,
            &FUNDAMENTAL_PATCH_FEATURES,
            &OCTAVE_PATCH_FEATURES,
        );

        let mut chunks = Vec::new();
        for cell_x in 0..CHUNKS_PER_REGION_EDGE {
            for cell_z in 0..CHUNKS_PER_REGION_EDGE {
                let column_pos = region.column(cell_x, cell_z);
                let (mut column, heights) = self.generate_column(&features, column_pos);
                vegetation::populate_trees(
                    self.seed,
                    &self.settings,
                    column_pos,
                    &mut column,
                    &heights,
                );
                chunks.extend(column.into_chunks());
            }
        }

        debug!(
            "Generated region ({}, {}): {} chunks in {:.2?}",
            region.x,
            region.z,
            chunks.len(),
            started.elapsed()
        );

        chunks
    }

    fn generate_column(
        &self,
        features: &RegionFeatures,
        column_pos: ColumnPos,
    ) -> (ChunkColumn, ChunkHeightmap) {
        let region = features.region();
        let mut column = ChunkColumn::new(column_pos);
        let mut heights = ChunkHeightmap::new();

        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let relative = IVec2::new(
                    column_pos.x - region.x + x as i32,
                    column_pos.z - region.z + z as i32,
                );

                let fundamental = features
                    .fundamental_patch()
                    .interpolate(relative.as_vec2() / REGION_SIZE as f32);

                let cell = relative / OCTAVE_CELL_EDGE;
                let local = (relative % OCTAVE_CELL_EDGE).as_vec2() / OCTAVE_CELL_EDGE as f32;
                let octave = features.octave_patch(cell).interpolate(local);
                let octave_height = if self.settings.ridged_octaves {
                    octave.abs()
                } else {
                    octave
                };

                let total_height = HEIGHT_OFFSET + fundamental - octave_height;
                let top = self.layer_column(features, relative, x, z, total_height, &mut column);
                heights.set(x, z, top);
            }
        }

        (column, heights)
    }

    // Fills one cell's bands bottom to top and returns the height of the
    // topmost block that stayed solid. Adjacent bands share their boundary
    // block; the later band wins.
    fn layer_column(
        &self,
        features: &RegionFeatures,
        relative: IVec2,
        x: usize,
        z: usize,
        total_height: f32,
        column: &mut ChunkColumn,
    ) -> i32 {
        let mut bottom = 0;
        for (material, top) in band_plan(total_height) {
            for y in bottom..=top {
                let block = if material != BlockMaterial::MAGMA
                    && self.is_carved(features, relative, y)
                {
                    BlockMaterial::AIR
                } else {
                    material
                };
                column.set_block(x, y, z, block);
            }
            bottom = top;
        }

        // Carving can hollow out the top of the column; the heightmap must
        // point at a cell that survived.
        let mut surface = bottom;
        while surface > 0 && column.block(x, surface, z) == BlockMaterial::AIR {
            surface -= 1;
        }
        surface
    }

    fn is_carved(&self, features: &RegionFeatures, relative: IVec2, y: i32) -> bool {
        let at = Vec3::new(
            relative.x as f32 / REGION_SIZE as f32,
            y as f32 / DENSITY_BOX_HEIGHT as f32,
            relative.y as f32 / REGION_SIZE as f32,
        );

        let primary = features.density_box(0).interpolate(at);
        if primary <= CARVE_WINDOW_LOW || primary >= CARVE_WINDOW_HIGH {
            return false;
        }

        let secondary = features.density_box(1).interpolate(at);
        secondary > CARVE_WINDOW_LOW && secondary < CARVE_WINDOW_HIGH
    }
}

// Absolute top height for each band given the column's total height. Targets
// are clamped so every band ends at least one block above the previous one
// and no band escapes the density box.
fn band_plan(total_height: f32) -> [(BlockMaterial, i32); 6] {
    let targets = [
        (BlockMaterial::MAGMA, 1.0),
        (BlockMaterial::BEDROCK, 20.0 + total_height * 0.25),
        (BlockMaterial::STONE, 52.0 + total_height),
        (BlockMaterial::CLAY, 58.0 + total_height),
        (BlockMaterial::DIRT, 62.0 + total_height),
        (BlockMaterial::GRASS, 63.0 + total_height),
    ];

    let mut bottom = 0;
    targets.map(|(material, target)| {
        let top = (target.max((bottom + 1) as f32).round() as i32).min(DENSITY_BOX_HEIGHT - 1);
        bottom = top;
        (material, top)
    })
}
