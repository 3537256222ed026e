use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

#[repr(transparent)]
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Pod,
    Zeroable,
)]
pub struct BlockMaterial(pub u8);

impl BlockMaterial {
    pub const AIR: Self = Self(0);
    pub const MAGMA: Self = Self(1);
    pub const BEDROCK: Self = Self(2);
    pub const STONE: Self = Self(3);
    pub const CLAY: Self = Self(4);
    pub const DIRT: Self = Self(5);
    pub const GRASS: Self = Self(6);
    pub const TREE_TRUNK: Self = Self(7);
    pub const TREE_LEAF: Self = Self(8);
}

// The six stratified materials, ordered bottom band to top band.
pub const TERRAIN_BANDS: [BlockMaterial; 6] = [
    BlockMaterial::MAGMA,
    BlockMaterial::BEDROCK,
    BlockMaterial::STONE,
    BlockMaterial::CLAY,
    BlockMaterial::DIRT,
    BlockMaterial::GRASS,
];

pub fn is_terrain_material(material: BlockMaterial) -> bool {
    (BlockMaterial::MAGMA.0..=BlockMaterial::GRASS.0).contains(&material.0)
}

pub fn is_tree_material(material: BlockMaterial) -> bool {
    material == BlockMaterial::TREE_TRUNK || material == BlockMaterial::TREE_LEAF
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialProperties {
    pub name: String,
    pub solid: bool,
    pub transparent: bool,
}

#[derive(Default, Debug, Clone)]
pub struct MaterialRegistry {
    properties: Vec<MaterialProperties>,
    by_name: HashMap<String, BlockMaterial>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn register(&mut self, props: MaterialProperties) -> BlockMaterial {
        if let Some(existing) = self.by_name.get(props.name.as_str()) {
            return *existing;
        }

        let next_index = self.properties.len();
        let material = BlockMaterial(
            u8::try_from(next_index)
                .expect("material registry exceeded BlockMaterial capacity (u8::MAX)"),
        );

        self.by_name.insert(props.name.clone(), material);
        self.properties.push(props);
        material
    }

    pub fn get_properties(&self, material: BlockMaterial) -> &MaterialProperties {
        self.properties
            .get(material.0 as usize)
            .or_else(|| self.properties.get(BlockMaterial::AIR.0 as usize))
            .expect("material registry is empty; call register_default_materials() first")
    }

    pub fn get_by_name(&self, name: &str) -> Option<BlockMaterial> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

pub fn register_default_materials() -> MaterialRegistry {
    fn material(name: &str, solid: bool, transparent: bool) -> MaterialProperties {
        MaterialProperties {
            name: name.to_string(),
            solid,
            transparent,
        }
    }

    let mut registry = MaterialRegistry::new();

    let defaults = [
        material("air", false, true),
        material("magma", true, false),
        material("bedrock", true, false),
        material("stone", true, false),
        material("clay", true, false),
        material("dirt", true, false),
        material("grass", true, false),
        material("tree_trunk", true, false),
        material("tree_leaf", true, true),
    ];

    for (index, props) in defaults.into_iter().enumerate() {
        let id = registry.register(props);
        debug_assert_eq!(id.0 as usize, index, "default material IDs must be stable");
    }

    registry
}
