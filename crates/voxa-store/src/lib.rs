//! Authoritative block collection, chunk residency, and selection.
#![forbid(unsafe_code)]

mod stream;

pub use stream::StreamReport;

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use voxa_blocks::{Block, BlockId, BlockType};
use voxa_geom::{IVec3, Vec3};
use voxa_world::{ChunkCoord, ChunkGenerator, WorldGenParams};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub blocks: usize,
    pub loaded_chunks: usize,
    pub per_type: [usize; BlockType::COUNT],
    pub revision: u64,
}

impl StoreStats {
    #[inline]
    pub fn count(&self, kind: BlockType) -> usize {
        self.per_type[kind.index()]
    }
}

/// Sole owner and writer of the live world.
///
/// Every mutation that changes the block collection bumps `revision`, which derived
/// views use as their invalidation stamp.
pub struct WorldStore {
    generator: Arc<ChunkGenerator>,
    blocks: Vec<Block>,
    // id -> slot in `blocks`
    index: HashMap<BlockId, usize>,
    loaded: HashSet<ChunkCoord>,
    selected: Option<BlockId>,
    revision: u64,
    next_placed: u64,
}

impl WorldStore {
    /// New world with the origin chunk already generated.
    pub fn new(params: WorldGenParams) -> Self {
        Self::with_generator(Arc::new(ChunkGenerator::new(params)))
    }

    pub fn with_generator(generator: Arc<ChunkGenerator>) -> Self {
        let mut store = Self {
            generator,
            blocks: Vec::new(),
            index: HashMap::new(),
            loaded: HashSet::new(),
            selected: None,
            revision: 0,
            next_placed: 0,
        };
        store.load_chunk(ChunkCoord::new(0, 0));
        store
    }

    #[inline]
    pub fn generator(&self) -> &Arc<ChunkGenerator> {
        &self.generator
    }

    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.index.get(&id).map(|&i| &self.blocks[i])
    }

    #[inline]
    pub fn contains(&self, id: BlockId) -> bool {
        self.index.contains_key(&id)
    }

    #[inline]
    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.loaded.contains(&coord)
    }

    /// Whether the chunk owning `cell` is resident.
    #[inline]
    pub fn is_cell_loaded(&self, cell: IVec3) -> bool {
        self.is_loaded(ChunkCoord::of_cell(cell))
    }

    pub fn loaded_chunks(&self) -> Vec<ChunkCoord> {
        let mut v: Vec<_> = self.loaded.iter().copied().collect();
        v.sort_unstable();
        v
    }

    /// Lattice cells currently holding at least one block.
    pub fn occupied_cells(&self) -> HashSet<IVec3> {
        self.blocks.iter().map(Block::cell).collect()
    }

    pub fn stats(&self) -> StoreStats {
        let mut per_type = [0usize; BlockType::COUNT];
        for b in &self.blocks {
            per_type[b.kind.index()] += 1;
        }
        StoreStats {
            blocks: self.blocks.len(),
            loaded_chunks: self.loaded.len(),
            per_type,
            revision: self.revision,
        }
    }

    #[inline]
    fn bump(&mut self) -> u64 {
        self.revision = self.revision.wrapping_add(1).max(1);
        self.revision
    }

    /// Appends `block` unless its id is already present. Does not bump.
    fn insert_new(&mut self, block: Block) -> bool {
        if self.index.contains_key(&block.id) {
            return false;
        }
        self.index.insert(block.id, self.blocks.len());
        self.blocks.push(block);
        true
    }

    /// Inserts a block with a fresh id. Overlap with an existing block is not checked.
    pub fn add_block(&mut self, position: Vec3, kind: BlockType) -> BlockId {
        self.next_placed += 1;
        let id = BlockId::Placed(self.next_placed);
        self.insert_new(Block { id, position, kind });
        let rev = self.bump();
        log::trace!(target: "edit", "add {kind} at {} as {id} (rev {rev})", position.cell());
        id
    }

    /// Places the default type (dirt).
    pub fn add_default_block(&mut self, position: Vec3) -> BlockId {
        self.add_block(position, BlockType::default())
    }

    /// Removes the block if present; absent ids are ignored.
    pub fn remove_block(&mut self, id: BlockId) -> Option<Block> {
        let slot = self.index.remove(&id)?;
        let removed = self.blocks.swap_remove(slot);
        if let Some(moved) = self.blocks.get(slot) {
            self.index.insert(moved.id, slot);
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        let rev = self.bump();
        log::trace!(target: "edit", "remove {} {id} (rev {rev})", removed.kind);
        Some(removed)
    }

    /// Sets the ephemeral selection. Returns whether it changed.
    pub fn select(&mut self, id: Option<BlockId>) -> bool {
        if self.selected == id {
            return false;
        }
        self.selected = id;
        true
    }

    #[inline]
    pub fn selected(&self) -> Option<BlockId> {
        self.selected
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Generates and merges one chunk. Returns the number of blocks added.
    pub fn load_chunk(&mut self, coord: ChunkCoord) -> usize {
        if self.loaded.contains(&coord) {
            return 0;
        }
        let mut blocks = self.generator.generate(coord);
        // Crowns spilling into chunks that are not resident are not kept.
        blocks.retain(|b| {
            let c = ChunkCoord::of_position(b.position);
            c == coord || self.loaded.contains(&c)
        });
        let added = self.merge_chunk(coord, blocks);
        self.bump();
        added
    }

    /// Drops every block whose lattice position maps to `coord`.
    pub fn unload_chunk(&mut self, coord: ChunkCoord) -> usize {
        if !self.loaded.remove(&coord) {
            return 0;
        }
        let removed = self.retain_chunks(|c| c != coord);
        self.bump();
        removed
    }

    fn merge_chunk(&mut self, coord: ChunkCoord, blocks: impl IntoIterator<Item = Block>) -> usize {
        self.loaded.insert(coord);
        let mut added = 0;
        for b in blocks {
            if self.insert_new(b) {
                added += 1;
            }
        }
        added
    }

    /// Keeps only blocks whose chunk satisfies `keep`. Returns the number dropped.
    fn retain_chunks(&mut self, keep: impl Fn(ChunkCoord) -> bool) -> usize {
        let before = self.blocks.len();
        self.blocks
            .retain(|b| keep(ChunkCoord::of_position(b.position)));
        let removed = before - self.blocks.len();
        if removed > 0 {
            self.reindex();
        }
        removed
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, b) in self.blocks.iter().enumerate() {
            self.index.insert(b.id, i);
        }
        if let Some(id) = self.selected {
            if !self.index.contains_key(&id) {
                self.selected = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat() -> WorldStore {
        WorldStore::new(WorldGenParams::flat(1))
    }

    #[test]
    fn new_world_has_origin_chunk() {
        let store = flat();
        assert_eq!(store.loaded_chunks(), vec![ChunkCoord::new(0, 0)]);
        assert_eq!(store.len(), 256);
        assert!(store.revision() > 0);
    }

    #[test]
    fn placed_ids_are_unique_even_at_same_position() {
        let mut store = flat();
        let p = Vec3::new(1.0, 1.5, 1.0);
        let a = store.add_block(p, BlockType::Stone);
        let b = store.add_block(p, BlockType::Sand);
        assert_ne!(a, b);
        assert_eq!(store.get(a).map(|b| b.kind), Some(BlockType::Stone));
        assert_eq!(store.get(b).map(|b| b.kind), Some(BlockType::Sand));
    }

    #[test]
    fn swap_remove_keeps_index_consistent() {
        let mut store = flat();
        let first = store.blocks()[0].id;
        let last = store.blocks()[store.len() - 1].id;
        assert!(store.remove_block(first).is_some());
        assert_eq!(store.get(last).map(|b| b.id), Some(last));
        for (i, b) in store.blocks().iter().enumerate() {
            assert_eq!(store.index[&b.id], i);
        }
    }

    #[test]
    fn removing_absent_id_changes_nothing() {
        let mut store = flat();
        let rev = store.revision();
        assert!(store.remove_block(BlockId::Placed(999)).is_none());
        assert_eq!(store.revision(), rev);
    }

    #[test]
    fn removing_selected_block_clears_selection() {
        let mut store = flat();
        let id = store.add_default_block(Vec3::new(3.0, 1.5, 3.0));
        assert_eq!(store.get(id).map(|b| b.kind), Some(BlockType::Dirt));
        assert!(store.select(Some(id)));
        assert!(!store.select(Some(id)));
        store.remove_block(id);
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn unload_drops_placed_blocks_in_chunk() {
        let mut store = flat();
        store.load_chunk(ChunkCoord::new(1, 0));
        let id = store.add_block(Vec3::new(17.0, 1.5, 2.0), BlockType::Wood);
        assert_eq!(store.unload_chunk(ChunkCoord::new(1, 0)), 257);
        assert!(!store.contains(id));
        assert_eq!(store.len(), 256);
    }

    #[test]
    fn stats_count_types() {
        let mut store = WorldStore::new(WorldGenParams::flat(2));
        store.add_block(Vec3::new(0.0, 2.5, 0.0), BlockType::Water);
        let stats = store.stats();
        assert_eq!(stats.blocks, 513);
        assert_eq!(stats.count(BlockType::Bedrock), 256);
        assert_eq!(stats.count(BlockType::Stone), 256);
        assert_eq!(stats.count(BlockType::Water), 1);
        assert_eq!(stats.loaded_chunks, 1);
    }
}
