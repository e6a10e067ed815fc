use hashbrown::HashSet;
use rayon::prelude::*;
use voxa_world::ChunkCoord;

use crate::WorldStore;

/// Outcome of one `ensure_chunks` call. Chunk lists are sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamReport {
    pub loaded: Vec<ChunkCoord>,
    pub unloaded: Vec<ChunkCoord>,
    pub blocks_added: usize,
    pub blocks_removed: usize,
}

impl StreamReport {
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.loaded.is_empty() && self.unloaded.is_empty()
    }
}

impl WorldStore {
    /// Makes the loaded set equal to the Chebyshev window of `radius` around `(cx, cz)`.
    ///
    /// Missing chunks are generated in parallel and merged in ascending key order,
    /// skipping ids already present. Afterwards no block lies outside the window.
    /// Calling again with the same arguments does nothing.
    pub fn ensure_chunks(&mut self, cx: i32, cz: i32, radius: i32) -> StreamReport {
        let center = ChunkCoord::new(cx, cz);
        let wanted: HashSet<ChunkCoord> = center.window(radius).into_iter().collect();

        let mut to_load: Vec<ChunkCoord> = wanted
            .iter()
            .filter(|c| !self.loaded.contains(*c))
            .copied()
            .collect();
        let mut to_unload: Vec<ChunkCoord> = self
            .loaded
            .iter()
            .filter(|c| !wanted.contains(*c))
            .copied()
            .collect();
        if to_load.is_empty() && to_unload.is_empty() {
            return StreamReport::default();
        }
        to_load.sort_unstable();
        to_unload.sort_unstable();

        let generator = self.generator.clone();
        let generated: Vec<_> = to_load
            .par_iter()
            .map(|&c| (c, generator.generate(c)))
            .collect();

        let mut report = StreamReport::default();
        for (coord, blocks) in generated {
            let inside = blocks
                .into_iter()
                .filter(|b| wanted.contains(&ChunkCoord::of_position(b.position)));
            report.blocks_added += self.merge_chunk(coord, inside);
        }

        for c in &to_unload {
            self.loaded.remove(c);
        }
        // Everything outside the window goes, including crowns and placements that
        // spilled into chunks that were never loaded.
        report.blocks_removed = self.retain_chunks(|c| wanted.contains(&c));

        let rev = self.bump();
        log::info!(
            target: "stream",
            "window ({},{}) r={}: +{} chunks (+{} blocks), -{} chunks (-{} blocks), rev {}",
            cx,
            cz,
            radius,
            to_load.len(),
            report.blocks_added,
            to_unload.len(),
            report.blocks_removed,
            rev
        );
        report.loaded = to_load;
        report.unloaded = to_unload;
        report
    }
}
