pub mod chunk;
pub mod coords;
pub mod material;
