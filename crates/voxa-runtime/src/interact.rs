use voxa_blocks::{BlockId, BlockType};
use voxa_geom::{IVec3, Vec3};
use voxa_store::WorldStore;

use crate::inventory::Inventory;

/// Places `kind` at `position` if the inventory hands one over.
pub fn place<I: Inventory + ?Sized>(
    store: &mut WorldStore,
    inventory: &mut I,
    position: Vec3,
    kind: BlockType,
) -> Option<BlockId> {
    if !inventory.consume(kind) {
        log::debug!(target: "edit", "inventory refused {kind}");
        return None;
    }
    let id = store.add_block(position, kind);
    log::debug!(target: "edit", "placed {kind} {id} at {}", position.cell());
    Some(id)
}

/// Places the selected type on the face of `target` given by `normal`.
pub fn place_against<I: Inventory + ?Sized>(
    store: &mut WorldStore,
    inventory: &mut I,
    target: BlockId,
    normal: IVec3,
) -> Option<BlockId> {
    let base = store.get(target)?.position;
    let position = base + Vec3::new(normal.x as f32, normal.y as f32, normal.z as f32);
    let kind = inventory.selected();
    place(store, inventory, position, kind)
}

/// Mines `id`. Returns whether a block was removed.
pub fn remove(store: &mut WorldStore, id: BlockId) -> bool {
    match store.remove_block(id) {
        Some(b) => {
            log::debug!(target: "edit", "removed {} {id}", b.kind);
            true
        }
        None => false,
    }
}
