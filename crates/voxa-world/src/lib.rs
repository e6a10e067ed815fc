//! Chunk addressing, terrain noise, and procedural chunk generation.
#![forbid(unsafe_code)]

mod chunk_coord;
pub mod generation;
mod noise;
pub mod worldgen;

pub use chunk_coord::ChunkCoord;
pub use generation::ChunkGenerator;
pub use noise::HeightNoise;
pub use worldgen::{ConfigError, WorldGenConfig, WorldGenMode, WorldGenParams};

/// Columns per chunk edge.
pub const CHUNK_SIZE: i32 = 16;
