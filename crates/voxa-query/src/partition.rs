use hashbrown::HashMap;
use voxa_blocks::{Block, BlockId, BlockType};
use voxa_geom::{IVec3, Vec3};
use voxa_store::WorldStore;

/// Render batch a block is drawn in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BatchKey {
    /// Grass on layer 0; static and drawn separately from the grass batch.
    Ground,
    Type(BlockType),
}

impl BatchKey {
    pub const COUNT: usize = BlockType::COUNT + 1;

    #[inline]
    pub fn of(block: &Block) -> Self {
        if block.kind == BlockType::Grass && block.cell().y == 0 {
            BatchKey::Ground
        } else {
            BatchKey::Type(block.kind)
        }
    }

    #[inline]
    fn slot(self) -> usize {
        match self {
            BatchKey::Ground => 0,
            BatchKey::Type(t) => 1 + t.index(),
        }
    }

    fn all() -> impl Iterator<Item = BatchKey> {
        std::iter::once(BatchKey::Ground).chain(BlockType::ALL.into_iter().map(BatchKey::Type))
    }
}

/// One instanced draw unit. `ids[i]` is the block drawn at instance `i`.
#[derive(Clone, Debug)]
pub struct Batch {
    pub key: BatchKey,
    pub ids: Vec<BlockId>,
    pub positions: Vec<Vec3>,
}

impl Batch {
    fn empty(key: BatchKey) -> Self {
        Self {
            key,
            ids: Vec::new(),
            positions: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    pub fn id_at(&self, index: usize) -> Option<BlockId> {
        self.ids.get(index).copied()
    }
}

/// What a ray struck, as reported by whoever owns the drawn geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Instance { batch: BatchKey, index: usize },
    Object { id: BlockId },
}

/// Type partition, instance map, and cell lookup, rebuilt lazily when the store's
/// revision moves.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    stamp: Option<u64>,
    batches: Vec<Batch>,
    // Duplicate placements at one cell resolve to the latest in store order.
    cells: HashMap<IVec3, (BatchKey, usize)>,
    rebuilds: u64,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the index up to date with `store`. Returns true when it rebuilt.
    pub fn refresh(&mut self, store: &WorldStore) -> bool {
        if self.stamp == Some(store.revision()) {
            return false;
        }
        self.rebuild(store.blocks());
        self.stamp = Some(store.revision());
        self.rebuilds += 1;
        log::trace!(
            target: "select",
            "spatial index rebuilt at rev {} ({} blocks)",
            store.revision(),
            self.cells.len()
        );
        true
    }

    fn rebuild(&mut self, blocks: &[Block]) {
        let mut batches: Vec<Batch> = BatchKey::all().map(Batch::empty).collect();
        self.cells.clear();
        self.cells.reserve(blocks.len());
        for b in blocks {
            let key = BatchKey::of(b);
            let batch = &mut batches[key.slot()];
            self.cells.insert(b.cell(), (key, batch.ids.len()));
            batch.ids.push(b.id);
            batch.positions.push(b.position);
        }
        self.batches = batches;
    }

    #[inline]
    pub fn stamp(&self) -> Option<u64> {
        self.stamp
    }

    #[inline]
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// All batches in fixed order: ground first, then one per block type.
    #[inline]
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn batch(&self, key: BatchKey) -> Option<&Batch> {
        self.batches.get(key.slot())
    }

    /// Batch slot drawn at `cell`, if any.
    #[inline]
    pub fn at_cell(&self, cell: IVec3) -> Option<(BatchKey, usize)> {
        self.cells.get(&cell).copied()
    }

    /// Maps a hit back to the block id it was built from.
    pub fn resolve(&self, hit: HitTarget) -> Option<BlockId> {
        match hit {
            HitTarget::Instance { batch, index } => self.batch(batch)?.id_at(index),
            HitTarget::Object { id } => Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_bucket_takes_layer_zero_grass_only() {
        let ground = Block::at_cell(IVec3::new(0, 0, 0), BlockType::Grass);
        let raised = Block::at_cell(IVec3::new(0, 1, 0), BlockType::Grass);
        let bedrock = Block::at_cell(IVec3::new(1, 0, 0), BlockType::Bedrock);
        assert_eq!(BatchKey::of(&ground), BatchKey::Ground);
        assert_eq!(BatchKey::of(&raised), BatchKey::Type(BlockType::Grass));
        assert_eq!(BatchKey::of(&bedrock), BatchKey::Type(BlockType::Bedrock));
    }

    #[test]
    fn slots_are_distinct_and_dense() {
        let mut slots: Vec<_> = BatchKey::all().map(BatchKey::slot).collect();
        slots.sort_unstable();
        assert_eq!(slots, (0..BatchKey::COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn out_of_range_instance_resolves_to_none() {
        let index = SpatialIndex::new();
        let hit = HitTarget::Instance {
            batch: BatchKey::Ground,
            index: 3,
        };
        assert_eq!(index.resolve(hit), None);
        let id = BlockId::Placed(4);
        assert_eq!(index.resolve(HitTarget::Object { id }), Some(id));
    }
}
