use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use gabbro_shared::chunk::Chunk;
use gabbro_shared::coords::RegionPos;
use gabbro_worldgen::generator::WorldGenerator;

pub struct RegionWorker {
    generator: Arc<WorldGenerator>,
    pool: ThreadPool,
    completed_rx: Receiver<(RegionPos, Vec<Chunk>)>,
    completed_tx: Sender<(RegionPos, Vec<Chunk>)>,
}

impl RegionWorker {
    pub fn new(generator: Arc<WorldGenerator>) -> Self {
        let available = std::thread::available_parallelism()
            .map(|parallelism| parallelism.get())
            .unwrap_or(4);
        let worker_threads = available.saturating_sub(1).max(2).min(8);
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_threads)
            .thread_name(|index| format!("region-worker-{index}"))
            .build()
            .expect("failed to create region worker thread pool");
        let (completed_tx, completed_rx) = mpsc::channel();

        Self {
            generator,
            pool,
            completed_rx,
            completed_tx,
        }
    }

    pub fn submit(&self, region: RegionPos) {
        let generator = Arc::clone(&self.generator);
        let completed_tx = self.completed_tx.clone();
        self.pool.spawn(move || {
            let chunks = generator.generate_region(region);
            let _ = completed_tx.send((region, chunks));
        });
    }

    pub fn poll(&self) -> Vec<(RegionPos, Vec<Chunk>)> {
        let mut completed = Vec::new();
        while let Ok(result) = self.completed_rx.try_recv() {
            completed.push(result);
        }
        completed
    }

    /// Blocks until one submitted region finishes.
    pub fn recv(&self) -> (RegionPos, Vec<Chunk>) {
        self.completed_rx
            .recv()
            .expect("region worker channel closed")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gabbro_shared::coords::RegionPos;
    use gabbro_worldgen::generator::WorldGenerator;

    use super::RegionWorker;
    use crate::store::ChunkStore;

    const SEED: u64 = 0xEAAFA35AAA8EAFDF;

    #[test]
    fn background_generation_matches_synchronous_output() {
        let generator = Arc::new(WorldGenerator::new(SEED));
        let worker = RegionWorker::new(Arc::clone(&generator));
        let region = RegionPos::from_grid(0, 0);

        worker.submit(region);
        let (finished_region, chunks) = worker.recv();
        assert_eq!(finished_region, region);

        let expected = generator.generate_region(region);
        assert_eq!(chunks.len(), expected.len());
        for (lhs, rhs) in chunks.iter().zip(&expected) {
            assert_eq!(lhs.pos, rhs.pos);
            assert_eq!(lhs.blocks.as_slice(), rhs.blocks.as_slice());
        }
    }

    #[test]
    fn completed_regions_feed_the_store() {
        let generator = Arc::new(WorldGenerator::new(SEED));
        let worker = RegionWorker::new(generator);
        let mut store = ChunkStore::new();

        worker.submit(RegionPos::from_grid(0, 0));
        worker.submit(RegionPos::from_grid(1, 0));

        for _ in 0..2 {
            let (_, chunks) = worker.recv();
            store.insert_region(chunks);
        }

        assert!(worker.poll().is_empty());
        assert!(store.chunk_count() > 0);
    }
}
