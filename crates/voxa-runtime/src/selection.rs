use voxa_blocks::BlockId;
use voxa_geom::Vec3;
use voxa_query::{RayHit, SpatialIndex, pick};
use voxa_store::WorldStore;

/// Re-picks the looked-at block every `every_n_frames` frames and writes the store's
/// selection only when the resolved id changes.
#[derive(Clone, Debug)]
pub struct SelectionTracker {
    every_n_frames: u32,
    reach: f32,
    frame: u64,
    last_hit: Option<RayHit>,
}

impl SelectionTracker {
    pub fn new(every_n_frames: u32, reach: f32) -> Self {
        Self {
            every_n_frames: every_n_frames.max(1),
            reach,
            frame: 0,
            last_hit: None,
        }
    }

    /// Hit from the most recent pick; carries the face normal for placement.
    #[inline]
    pub fn last_hit(&self) -> Option<RayHit> {
        self.last_hit
    }

    /// Returns `Some(new_selection)` when the selection changed this frame.
    pub fn update(
        &mut self,
        store: &mut WorldStore,
        index: &SpatialIndex,
        eye: Vec3,
        look: Vec3,
    ) -> Option<Option<BlockId>> {
        self.frame += 1;
        if self.frame % u64::from(self.every_n_frames) != 0 {
            return None;
        }
        self.last_hit = pick(index, eye, look, self.reach);
        let next = self.last_hit.and_then(|h| index.resolve(h.target));
        if !store.select(next) {
            return None;
        }
        match next {
            Some(id) => log::trace!(target: "select", "selected {id}"),
            None => log::trace!(target: "select", "selection cleared"),
        }
        Some(next)
    }
}
