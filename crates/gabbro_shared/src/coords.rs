use std::ops::{Add, AddAssign, Sub, SubAssign};

use glam::IVec3;
use serde::{Deserialize, Serialize};

pub const CHUNK_SIZE: usize = 16;
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

pub const REGION_SIZE: i32 = 128;
pub const CHUNKS_PER_REGION_EDGE: i32 = REGION_SIZE / CHUNK_SIZE as i32;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalPos {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

// Block-unit origin of a region; always a multiple of REGION_SIZE on both axes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionPos {
    pub x: i32,
    pub z: i32,
}

impl RegionPos {
    pub fn new(x: i32, z: i32) -> Self {
        assert!(
            x % REGION_SIZE == 0 && z % REGION_SIZE == 0,
            "region origin ({x}, {z}) is not aligned to the region size {REGION_SIZE}"
        );
        Self { x, z }
    }

    pub fn from_grid(grid_x: i32, grid_z: i32) -> Self {
        Self {
            x: grid_x * REGION_SIZE,
            z: grid_z * REGION_SIZE,
        }
    }

    pub fn column(&self, cell_x: i32, cell_z: i32) -> ColumnPos {
        assert!(
            (0..CHUNKS_PER_REGION_EDGE).contains(&cell_x)
                && (0..CHUNKS_PER_REGION_EDGE).contains(&cell_z),
            "column cell ({cell_x}, {cell_z}) outside the region grid"
        );
        ColumnPos::new(
            self.x + cell_x * CHUNK_SIZE as i32,
            self.z + cell_z * CHUNK_SIZE as i32,
        )
    }
}

// Block-unit origin of one vertical chunk stack; aligned to CHUNK_SIZE.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnPos {
    pub x: i32,
    pub z: i32,
}

impl ColumnPos {
    pub fn new(x: i32, z: i32) -> Self {
        let size = CHUNK_SIZE as i32;
        assert!(
            x % size == 0 && z % size == 0,
            "column origin ({x}, {z}) is not aligned to the chunk size {size}"
        );
        Self { x, z }
    }
}

impl Add for ChunkPos {
    type Output = ChunkPos;

    fn add(self, rhs: Self) -> Self::Output {
        ChunkPos {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl AddAssign for ChunkPos {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for ChunkPos {
    type Output = ChunkPos;

    fn sub(self, rhs: Self) -> Self::Output {
        ChunkPos {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl SubAssign for ChunkPos {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

fn div_rem_floor(value: i32, divisor: i32) -> (i32, i32) {
    let mut q = value / divisor;
    let mut r = value % divisor;
    if r < 0 {
        q -= 1;
        r += divisor;
    }
    (q, r)
}

pub fn world_to_chunk(world_pos: IVec3) -> (ChunkPos, LocalPos) {
    let size = CHUNK_SIZE as i32;

    let (chunk_x, local_x) = div_rem_floor(world_pos.x, size);
    let (chunk_y, local_y) = div_rem_floor(world_pos.y, size);
    let (chunk_z, local_z) = div_rem_floor(world_pos.z, size);

    (
        ChunkPos {
            x: chunk_x,
            y: chunk_y,
            z: chunk_z,
        },
        LocalPos {
            x: local_x as u8,
            y: local_y as u8,
            z: local_z as u8,
        },
    )
}

pub fn chunk_to_world(chunk_pos: ChunkPos, local: LocalPos) -> IVec3 {
    let size = CHUNK_SIZE as i32;
    IVec3::new(
        chunk_pos.x * size + i32::from(local.x),
        chunk_pos.y * size + i32::from(local.y),
        chunk_pos.z * size + i32::from(local.z),
    )
}

pub fn world_to_region(world_x: i32, world_z: i32) -> RegionPos {
    let (grid_x, _) = div_rem_floor(world_x, REGION_SIZE);
    let (grid_z, _) = div_rem_floor(world_z, REGION_SIZE);
    RegionPos::from_grid(grid_x, grid_z)
}

pub fn column_to_chunk(column: ColumnPos, level: i32) -> ChunkPos {
    let size = CHUNK_SIZE as i32;
    ChunkPos {
        x: column.x / size,
        y: level,
        z: column.z / size,
    }
}

pub fn local_to_index(local: LocalPos) -> usize {
    usize::from(local.x)
        + usize::from(local.z) * CHUNK_SIZE
        + usize::from(local.y) * CHUNK_SIZE * CHUNK_SIZE
}

pub fn index_to_local(index: usize) -> LocalPos {
    assert!(index < CHUNK_VOLUME, "chunk index out of bounds: {index}");

    let y = index / (CHUNK_SIZE * CHUNK_SIZE);
    let rem = index % (CHUNK_SIZE * CHUNK_SIZE);
    let z = rem / CHUNK_SIZE;
    let x = rem % CHUNK_SIZE;

    LocalPos {
        x: x as u8,
        y: y as u8,
        z: z as u8,
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec3;

    use super::{
        chunk_to_world, column_to_chunk, index_to_local, local_to_index, world_to_chunk,
        world_to_region, ChunkPos, ColumnPos, LocalPos, RegionPos, CHUNKS_PER_REGION_EDGE,
        CHUNK_SIZE, REGION_SIZE,
    };

    #[test]
    fn local_to_index_round_trips_back_to_local_coords() {
        for y in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                for x in 0..CHUNK_SIZE {
                    let local = LocalPos {
                        x: x as u8,
                        y: y as u8,
                        z: z as u8,
                    };
                    let index = local_to_index(local);
                    assert_eq!(index_to_local(index), local);
                }
            }
        }
    }

    #[test]
    fn chunk_pos_arithmetic_is_component_wise() {
        let a = ChunkPos { x: 10, y: -2, z: 4 };
        let b = ChunkPos { x: -3, y: 8, z: 1 };

        assert_eq!(a + b, ChunkPos { x: 7, y: 6, z: 5 });
        assert_eq!(a - b, ChunkPos { x: 13, y: -10, z: 3 });

        let mut c = a;
        c += b;
        assert_eq!(c, ChunkPos { x: 7, y: 6, z: 5 });
        c -= b;
        assert_eq!(c, a);
    }

    #[test]
    fn world_to_chunk_handles_negative_and_positive_coordinates() {
        let (chunk0, local0) = world_to_chunk(IVec3::new(-1, -1, -1));
        assert_eq!(chunk0, ChunkPos { x: -1, y: -1, z: -1 });
        assert_eq!(
            local0,
            LocalPos {
                x: (CHUNK_SIZE - 1) as u8,
                y: (CHUNK_SIZE - 1) as u8,
                z: (CHUNK_SIZE - 1) as u8,
            }
        );

        let (chunk1, local1) = world_to_chunk(IVec3::new(16, 32, 0));
        assert_eq!(chunk1, ChunkPos { x: 1, y: 2, z: 0 });
        assert_eq!(local1, LocalPos { x: 0, y: 0, z: 0 });

        let world = IVec3::new(-17, 47, 33);
        let (chunk2, local2) = world_to_chunk(world);
        assert_eq!(chunk_to_world(chunk2, local2), world);
    }

    #[test]
    fn region_grid_and_column_cells_cover_block_space() {
        let region = RegionPos::from_grid(-1, 2);
        assert_eq!(region, RegionPos { x: -128, z: 256 });
        assert_eq!(world_to_region(-1, 256), region);
        assert_eq!(world_to_region(-128, 383), region);

        let first = region.column(0, 0);
        assert_eq!(first, ColumnPos { x: -128, z: 256 });

        let last = region.column(CHUNKS_PER_REGION_EDGE - 1, CHUNKS_PER_REGION_EDGE - 1);
        assert_eq!(
            last,
            ColumnPos {
                x: -128 + REGION_SIZE - CHUNK_SIZE as i32,
                z: 256 + REGION_SIZE - CHUNK_SIZE as i32,
            }
        );
    }

    #[test]
    fn column_to_chunk_keeps_grid_alignment() {
        let column = ColumnPos::new(-32, 48);
        assert_eq!(column_to_chunk(column, 0), ChunkPos { x: -2, y: 0, z: 3 });
        assert_eq!(column_to_chunk(column, 5), ChunkPos { x: -2, y: 5, z: 3 });
    }

    #[test]
    #[should_panic(expected = "not aligned to the region size")]
    fn misaligned_region_origin_panics() {
        let _ = RegionPos::new(64, 0);
    }

    #[test]
    #[should_panic(expected = "outside the region grid")]
    fn column_cell_outside_region_grid_panics() {
        let region = RegionPos::from_grid(0, 0);
        let _ = region.column(CHUNKS_PER_REGION_EDGE, 0);
    }
}
