use glam::{IVec3, Vec3};

use crate::rng::{seed_for_vertex, SeedStream};

/// Density field interpolated from a lattice of seeded vertices spaced
/// `period` blocks apart. Vertex values are pure functions of the seed and
/// the vertex's absolute position, so boxes whose lattices line up agree
/// on every shared plane.
#[derive(Clone, Debug)]
pub struct TrilinearBox {
    vertices: Vec<f32>,
    vertex_dims: IVec3,
}

impl TrilinearBox {
    pub fn new(world_seed: u64, anchor: IVec3, size: IVec3, period: i32) -> Self {
        assert!(period > 0, "lattice period must be positive, got {period}");
        assert!(
            size.x > 0 && size.y > 0 && size.z > 0,
            "box size must be positive: {size}"
        );
        assert!(
            size.x % period == 0 && size.y % period == 0 && size.z % period == 0,
            "box size {size} must be a multiple of the lattice period {period}"
        );

        let vertex_dims = size / period + IVec3::ONE;
        let mut vertices =
            Vec::with_capacity((vertex_dims.x * vertex_dims.y * vertex_dims.z) as usize);
        for y in 0..vertex_dims.y {
            for z in 0..vertex_dims.z {
                for x in 0..vertex_dims.x {
                    let world = anchor + IVec3::new(x, y, z) * period;
                    let mut stream = SeedStream::new(seed_for_vertex(world_seed, world));
                    vertices.push(stream.next_f32(0.0, 1.0));
                }
            }
        }

        Self {
            vertices,
            vertex_dims,
        }
    }

    fn vertex(&self, index: IVec3) -> f32 {
        let dims = self.vertex_dims;
        self.vertices[(index.x + index.z * dims.x + index.y * dims.x * dims.z) as usize]
    }

    pub fn interpolate(&self, at: Vec3) -> f32 {
        assert!(
            (0.0..=1.0).contains(&at.x)
                && (0.0..=1.0).contains(&at.y)
                && (0.0..=1.0).contains(&at.z),
            "box sample {at} outside the unit cube"
        );

        let cells = (self.vertex_dims - IVec3::ONE).as_vec3();
        let scaled = at * cells;
        // Samples exactly on the far faces fold into the last cell.
        let cell = scaled
            .floor()
            .as_ivec3()
            .min(self.vertex_dims - IVec3::splat(2));
        let t = scaled - cell.as_vec3();

        let p000 = self.vertex(cell);
        let p100 = self.vertex(cell + IVec3::X);
        let p010 = self.vertex(cell + IVec3::Y);
        let p110 = self.vertex(cell + IVec3::new(1, 1, 0));
        let p001 = self.vertex(cell + IVec3::Z);
        let p101 = self.vertex(cell + IVec3::new(1, 0, 1));
        let p011 = self.vertex(cell + IVec3::new(0, 1, 1));
        let p111 = self.vertex(cell + IVec3::ONE);

        let x00 = lerp(p000, p100, t.x);
        let x10 = lerp(p010, p110, t.x);
        let x01 = lerp(p001, p101, t.x);
        let x11 = lerp(p011, p111, t.x);

        let z0 = lerp(x00, x01, t.z);
        let z1 = lerp(x10, x11, t.z);

        lerp(z0, z1, t.y)
    }
}

// Endpoint-exact form: t=0 returns start and t=1 returns end bit-for-bit.
fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}
