use std::env;
use std::sync::Arc;

use glam::IVec3;

use gabbro_shared::coords::{RegionPos, REGION_SIZE};
use gabbro_shared::material::{register_default_materials, BlockMaterial};
use gabbro_world::store::ChunkStore;
use gabbro_world::worker::RegionWorker;
use gabbro_worldgen::features::DENSITY_BOX_HEIGHT;
use gabbro_worldgen::generator::WorldGenerator;

fn main() {
    let _ = tracing_subscriber::fmt().with_target(false).try_init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(seed_arg) = args.first() else {
        eprintln!("Usage: region_inspector <seed> [grid_x grid_z]");
        std::process::exit(2);
    };

    let Ok(seed) = parse_seed(seed_arg) else {
        eprintln!("invalid seed '{seed_arg}': expected a decimal or 0x-prefixed value");
        std::process::exit(2);
    };

    let (grid_x, grid_z) = match (args.get(1), args.get(2)) {
        (None, None) => (0, 0),
        (Some(x), Some(z)) => {
            let (Ok(grid_x), Ok(grid_z)) = (x.parse::<i32>(), z.parse::<i32>()) else {
                eprintln!("invalid region grid cell ({x}, {z})");
                std::process::exit(2);
            };
            (grid_x, grid_z)
        }
        _ => {
            eprintln!("Usage: region_inspector <seed> [grid_x grid_z]");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(seed, grid_x, grid_z) {
        eprintln!("region_inspector error: {err}");
        std::process::exit(1);
    }
}

fn parse_seed(raw: &str) -> Result<u64, std::num::ParseIntError> {
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        raw.parse()
    }
}

fn run(seed: u64, grid_x: i32, grid_z: i32) -> Result<(), String> {
    let registry = register_default_materials();
    let region = RegionPos::from_grid(grid_x, grid_z);

    let generator = Arc::new(WorldGenerator::new(seed));
    let worker = RegionWorker::new(generator);
    worker.submit(region);
    let (_, chunks) = worker.recv();

    let mut store = ChunkStore::new();
    store.insert_region(chunks);

    println!("Seed: {seed:#x}");
    println!("Region origin: ({}, {})", region.x, region.z);
    println!("Chunk count: {}", store.chunk_count());

    let all_air = store
        .positions()
        .filter(|pos| store.chunk(*pos).is_some_and(|chunk| chunk.is_all_air()))
        .count();
    println!("All-air chunks: {all_air}");

    let mut counts = vec![0u64; registry.len()];
    for pos in store.positions().collect::<Vec<_>>() {
        let Some(chunk) = store.chunk(pos) else {
            continue;
        };
        for block in chunk.blocks.iter() {
            counts[block.0 as usize] += 1;
        }
    }

    println!("Block histogram:");
    for (id, count) in counts.iter().enumerate() {
        if *count == 0 {
            continue;
        }
        let name = &registry.get_properties(BlockMaterial(id as u8)).name;
        println!("  {name:<12} {count}");
    }

    let mut lowest = i32::MAX;
    let mut highest = i32::MIN;
    for x in region.x..region.x + REGION_SIZE {
        for z in region.z..region.z + REGION_SIZE {
            if let Some(surface) = surface_height(&store, x, z) {
                lowest = lowest.min(surface);
                highest = highest.max(surface);
            }
        }
    }
    if lowest <= highest {
        println!("Surface height range: {lowest}..={highest}");
    }

    let center_x = region.x + REGION_SIZE / 2;
    let center_z = region.z + REGION_SIZE / 2;
    let surface = surface_height(&store, center_x, center_z)
        .ok_or_else(|| format!("no solid surface in column ({center_x}, {center_z})"))?;
    let block = store
        .block_at(IVec3::new(center_x, surface, center_z))
        .ok_or_else(|| format!("missing chunk under column ({center_x}, {center_z})"))?;
    println!(
        "Center column surface: y = {surface} ({})",
        registry.get_properties(block).name
    );

    Ok(())
}

fn surface_height(store: &ChunkStore, x: i32, z: i32) -> Option<i32> {
    (0..DENSITY_BOX_HEIGHT).rev().find(|y| {
        store
            .block_at(IVec3::new(x, *y, z))
            .is_some_and(|block| block != BlockMaterial::AIR)
    })
}
