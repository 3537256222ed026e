pub mod column;
pub mod features;
pub mod generator;
pub mod lattice;
pub mod patch;
pub mod rng;
pub mod vegetation;
