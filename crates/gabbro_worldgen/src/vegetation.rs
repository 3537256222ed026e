use glam::IVec2;

use gabbro_shared::coords::{ColumnPos, CHUNK_SIZE};
use gabbro_shared::material::BlockMaterial;

use crate::column::{ChunkColumn, ChunkHeightmap};
use crate::generator::GeneratorSettings;
use crate::rng::{seed_for_cell, SeedStream};

pub const MIN_TREE_RADIUS: i32 = 3;
pub const MAX_TREE_RADIUS: i32 = 5;
pub const MIN_TREE_HEIGHT: i32 = 8;
pub const MAX_TREE_HEIGHT: i32 = 24;

pub const TREE_STREAM_SALT: u64 = 0x1D8E4E27C47D124F;

/// Scatters trees over one column's grass surface. Every attempt draws its
/// placement from the column stream even when the surface check rejects it,
/// so the outcome depends only on the seed and the column position.
pub fn populate_trees(
    world_seed: u64,
    settings: &GeneratorSettings,
    column_pos: ColumnPos,
    column: &mut ChunkColumn,
    heights: &ChunkHeightmap,
) {
    let edge = CHUNK_SIZE as i32;
    let mut stream = SeedStream::new(seed_for_cell(
        world_seed ^ TREE_STREAM_SALT,
        IVec2::new(column_pos.x, column_pos.z),
    ));

    for _ in 0..settings.trees_per_column {
        let x = stream.next_i32_inclusive(MAX_TREE_RADIUS, edge - MAX_TREE_RADIUS - 1);
        let z = stream.next_i32_inclusive(MAX_TREE_RADIUS, edge - MAX_TREE_RADIUS - 1);
        let height = stream.next_i32_inclusive(MIN_TREE_HEIGHT, MAX_TREE_HEIGHT);
        let radius = stream.next_i32_inclusive(MIN_TREE_RADIUS, MAX_TREE_RADIUS);

        let surface = heights.get(x as usize, z as usize);
        if column.block(x as usize, surface, z as usize) != BlockMaterial::GRASS {
            continue;
        }

        place_tree(column, IVec2::new(x, z), surface, height, radius);
    }
}

// Trunk from one block above the surface, with a leaf cone tapering over the
// top radius + 1 trunk blocks. Leaves never replace existing blocks.
fn place_tree(column: &mut ChunkColumn, foot: IVec2, surface: i32, height: i32, radius: i32) {
    for dy in 1..height {
        let y = surface + dy;
        column.set_block(foot.x as usize, y, foot.y as usize, BlockMaterial::TREE_TRUNK);

        let ring = dy - (height - radius - 1);
        if ring < 0 {
            continue;
        }
        let span = radius - ring;
        for u in -span..=span {
            for v in -span..=span {
                if u == 0 && v == 0 {
                    continue;
                }
                let leaf_x = (foot.x + u) as usize;
                let leaf_z = (foot.y + v) as usize;
                if column.block(leaf_x, y, leaf_z) == BlockMaterial::AIR {
                    column.set_block(leaf_x, y, leaf_z, BlockMaterial::TREE_LEAF);
                }
            }
        }
    }
}
