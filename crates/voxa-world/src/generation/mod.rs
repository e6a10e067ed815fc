mod surface;
mod trees;
mod water;

use hashbrown::HashSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voxa_blocks::{Block, BlockType};
use voxa_geom::IVec3;

use crate::noise::HeightNoise;
use crate::worldgen::{WorldGenMode, WorldGenParams};
use crate::{CHUNK_SIZE, ChunkCoord};

use self::surface::layer_block;
use self::trees::grow_tree;
use self::water::fill_water;

/// Ordered block output for one chunk. The first write to a cell wins.
pub(crate) struct ChunkWriter {
    blocks: Vec<Block>,
    seen: HashSet<IVec3>,
}

impl ChunkWriter {
    fn with_capacity(n: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(n),
            seen: HashSet::with_capacity(n),
        }
    }

    /// Returns false when the cell was already written.
    #[inline]
    pub fn push(&mut self, cell: IVec3, kind: BlockType) -> bool {
        if !self.seen.insert(cell) {
            return false;
        }
        self.blocks.push(Block::at_cell(cell, kind));
        true
    }

    fn finish(self) -> Vec<Block> {
        self.blocks
    }
}

/// Deterministic terrain plus independently-drawn tree placement.
pub struct ChunkGenerator {
    params: WorldGenParams,
    noise: HeightNoise,
}

impl ChunkGenerator {
    pub fn new(params: WorldGenParams) -> Self {
        let noise = HeightNoise::new(params.seed, &params.height);
        Self { params, noise }
    }

    #[inline]
    pub fn params(&self) -> &WorldGenParams {
        &self.params
    }

    #[inline]
    pub fn noise(&self) -> &HeightNoise {
        &self.noise
    }

    /// Terrain column height at `(x, z)` for the configured mode.
    pub fn column_height(&self, x: i32, z: i32) -> i32 {
        match self.params.mode {
            WorldGenMode::Normal => self.noise.height(x, z),
            WorldGenMode::Flat { thickness } => thickness,
        }
    }

    /// Random source for tree placement in `coord`.
    ///
    /// With a configured tree seed each chunk derives its own stream so load order does
    /// not matter; otherwise every call draws fresh entropy and trees vary between runs.
    pub fn tree_rng(&self, coord: ChunkCoord) -> StdRng {
        match self.params.trees.seed {
            Some(seed) => StdRng::seed_from_u64(mix_chunk_seed(seed, coord)),
            None => StdRng::from_entropy(),
        }
    }

    /// Generates `coord` using its own tree random source.
    pub fn generate(&self, coord: ChunkCoord) -> Vec<Block> {
        let mut rng = self.tree_rng(coord);
        self.generate_with(coord, &mut rng)
    }

    pub fn generate_with<R: Rng>(&self, coord: ChunkCoord, rng: &mut R) -> Vec<Block> {
        let columns = (CHUNK_SIZE * CHUNK_SIZE) as usize;
        let mut out = ChunkWriter::with_capacity(columns * 8);
        let base_x = coord.base_x();
        let base_z = coord.base_z();
        for lx in 0..CHUNK_SIZE {
            for lz in 0..CHUNK_SIZE {
                let x = base_x + lx;
                let z = base_z + lz;
                match self.params.mode {
                    WorldGenMode::Normal => self.normal_column(&mut out, x, z, rng),
                    WorldGenMode::Flat { thickness } => flat_column(&mut out, x, z, thickness),
                }
            }
        }
        let blocks = out.finish();
        log::debug!(
            target: "worldgen",
            "generated chunk ({},{}) with {} blocks",
            coord.cx,
            coord.cz,
            blocks.len()
        );
        blocks
    }

    fn normal_column<R: Rng>(&self, out: &mut ChunkWriter, x: i32, z: i32, rng: &mut R) {
        let height = self.noise.height(x, z);
        for y in 0..height {
            out.push(IVec3::new(x, y, z), layer_block(y, height));
        }
        fill_water(out, x, z, height, self.params.sea_level);
        grow_tree(out, &self.params.trees, x, z, height, rng);
    }
}

fn flat_column(out: &mut ChunkWriter, x: i32, z: i32, thickness: i32) {
    for y in 0..thickness {
        let kind = if y == 0 {
            BlockType::Bedrock
        } else {
            BlockType::Stone
        };
        out.push(IVec3::new(x, y, z), kind);
    }
}

fn mix_chunk_seed(seed: u64, coord: ChunkCoord) -> u64 {
    let mut h = seed ^ 0x9E37_79B9_7F4A_7C15;
    h ^= (coord.cx as u32 as u64).wrapping_mul(0x85EB_CA6B);
    h = h.rotate_left(31);
    h ^= (coord.cz as u32 as u64).wrapping_mul(0xC2B2_AE35);
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    h ^= h >> 33;
    h
}
