use gabbro_shared::chunk::Chunk;
use gabbro_shared::coords::{column_to_chunk, ColumnPos, LocalPos, CHUNK_SIZE};
use gabbro_shared::material::BlockMaterial;

// Final surface height for each of the 16x16 cells of one chunk column.
#[derive(Clone, Debug, Default)]
pub struct ChunkHeightmap {
    heights: [[i32; CHUNK_SIZE]; CHUNK_SIZE],
}

impl ChunkHeightmap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, x: usize, z: usize) -> i32 {
        self.heights[z][x]
    }

    pub fn set(&mut self, x: usize, z: usize, height: i32) {
        self.heights[z][x] = height;
    }
}

/// Vertical stack of chunks over one column footprint. Chunks are allocated
/// lazily from the bottom: writing above the current top extends the stack
/// with air-filled chunks whose grid positions match their level.
pub struct ChunkColumn {
    base: ColumnPos,
    chunks: Vec<Chunk>,
}

impl ChunkColumn {
    pub fn new(base: ColumnPos) -> Self {
        Self {
            base,
            chunks: Vec::new(),
        }
    }

    pub fn base(&self) -> ColumnPos {
        self.base
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    // Reads above the allocated stack are air.
    pub fn block(&self, x: usize, height: i32, z: usize) -> BlockMaterial {
        assert!(height >= 0, "column height must be non-negative, got {height}");
        let level = height as usize / CHUNK_SIZE;
        match self.chunks.get(level) {
            Some(chunk) => chunk.get(column_local(x, height, z)),
            None => BlockMaterial::AIR,
        }
    }

    pub fn set_block(&mut self, x: usize, height: i32, z: usize, material: BlockMaterial) {
        assert!(height >= 0, "column height must be non-negative, got {height}");
        let level = height as usize / CHUNK_SIZE;
        while self.chunks.len() <= level {
            let pos = column_to_chunk(self.base, self.chunks.len() as i32);
            self.chunks.push(Chunk::new_empty(pos));
        }
        self.chunks[level].set(column_local(x, height, z), material);
    }

    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }
}

fn column_local(x: usize, height: i32, z: usize) -> LocalPos {
    assert!(
        x < CHUNK_SIZE && z < CHUNK_SIZE,
        "column cell ({x}, {z}) outside the chunk footprint"
    );
    LocalPos {
        x: x as u8,
        y: (height as usize % CHUNK_SIZE) as u8,
        z: z as u8,
    }
}
