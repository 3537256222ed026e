use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::coords::{local_to_index, ChunkPos, LocalPos, CHUNK_VOLUME};
use crate::material::BlockMaterial;

#[derive(Clone, Debug)]
pub struct Chunk {
    pub pos: ChunkPos,
    pub blocks: Box<[BlockMaterial; CHUNK_VOLUME]>,
}

impl Chunk {
    pub fn new_empty(pos: ChunkPos) -> Self {
        Self {
            pos,
            blocks: Box::new([BlockMaterial::AIR; CHUNK_VOLUME]),
        }
    }

    pub fn new_filled(pos: ChunkPos, material: BlockMaterial) -> Self {
        Self {
            pos,
            blocks: Box::new([material; CHUNK_VOLUME]),
        }
    }

    pub fn get(&self, local: LocalPos) -> BlockMaterial {
        self.blocks[local_to_index(local)]
    }

    pub fn set(&mut self, local: LocalPos, material: BlockMaterial) {
        let index = local_to_index(local);
        self.blocks[index] = material;
    }

    pub fn get_index(&self, index: usize) -> BlockMaterial {
        self.blocks[index]
    }

    pub fn set_index(&mut self, index: usize, material: BlockMaterial) {
        self.blocks[index] = material;
    }

    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(|block| *block == BlockMaterial::AIR)
    }
}

impl Serialize for Chunk {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.pos, self.blocks.as_slice()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Chunk {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (pos, blocks) = <(ChunkPos, Vec<BlockMaterial>)>::deserialize(deserializer)?;
        if blocks.len() != CHUNK_VOLUME {
            return Err(de::Error::custom(format!(
                "expected {CHUNK_VOLUME} blocks, got {}",
                blocks.len()
            )));
        }

        let blocks: [BlockMaterial; CHUNK_VOLUME] = blocks
            .try_into()
            .map_err(|_| de::Error::custom("failed to deserialize chunk block array"))?;

        Ok(Self {
            pos,
            blocks: Box::new(blocks),
        })
    }
}
