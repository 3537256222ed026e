use glam::IVec3;
use rustc_hash::FxHashMap;
use tracing::debug;

use gabbro_shared::chunk::Chunk;
use gabbro_shared::coords::{world_to_chunk, ChunkPos};
use gabbro_shared::material::BlockMaterial;

/// Chunk lookup keyed by position. Regions arrive as chunk batches from the
/// worker; single blocks are read back through world coordinates.
#[derive(Default)]
pub struct ChunkStore {
    chunks: FxHashMap<ChunkPos, Chunk>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_region(&mut self, chunks: Vec<Chunk>) {
        debug!("Storing {} generated chunks", chunks.len());
        for chunk in chunks {
            self.chunks.insert(chunk.pos, chunk);
        }
    }

    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    pub fn block_at(&self, world_pos: IVec3) -> Option<BlockMaterial> {
        let (chunk_pos, local) = world_to_chunk(world_pos);
        self.chunks.get(&chunk_pos).map(|chunk| chunk.get(local))
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.chunks.keys().copied()
    }
}
