use voxa_geom::Vec3;
use voxa_store::{StreamReport, WorldStore};
use voxa_world::ChunkCoord;

/// Calls `ensure_chunks` only when the player enters a different chunk.
#[derive(Clone, Debug)]
pub struct StreamDriver {
    view_radius: i32,
    last: Option<ChunkCoord>,
}

impl StreamDriver {
    pub fn new(view_radius: i32) -> Self {
        Self {
            view_radius,
            last: None,
        }
    }

    #[inline]
    pub fn view_radius(&self) -> i32 {
        self.view_radius
    }

    #[inline]
    pub fn last_chunk(&self) -> Option<ChunkCoord> {
        self.last
    }

    pub fn update(&mut self, store: &mut WorldStore, player: Vec3) -> Option<StreamReport> {
        let chunk = ChunkCoord::of_point(player);
        if self.last == Some(chunk) {
            return None;
        }
        self.last = Some(chunk);
        Some(store.ensure_chunks(chunk.cx, chunk.cz, self.view_radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxa_world::WorldGenParams;

    #[test]
    fn fires_on_first_call_and_on_chunk_change_only() {
        let mut store = WorldStore::new(WorldGenParams::flat(1));
        let mut driver = StreamDriver::new(1);
        let first = driver.update(&mut store, Vec3::new(0.0, 2.0, 0.0)).unwrap();
        assert_eq!(first.loaded.len(), 8);
        assert!(driver.update(&mut store, Vec3::new(7.0, 2.0, 3.0)).is_none());
        let crossed = driver.update(&mut store, Vec3::new(16.0, 2.0, 3.0)).unwrap();
        assert_eq!(crossed.loaded.len(), 3);
        assert_eq!(crossed.unloaded.len(), 3);
        assert_eq!(driver.last_chunk(), Some(ChunkCoord::new(1, 0)));
    }

    #[test]
    fn boundary_is_the_floored_chunk_edge() {
        let mut store = WorldStore::new(WorldGenParams::flat(1));
        let mut driver = StreamDriver::new(0);
        driver.update(&mut store, Vec3::new(1.0, 2.0, 1.0));
        assert!(driver.update(&mut store, Vec3::new(15.7, 2.0, 1.0)).is_none());
        assert!(driver.update(&mut store, Vec3::new(16.0, 2.0, 1.0)).is_some());
        assert!(driver.update(&mut store, Vec3::new(15.9, 2.0, 1.0)).is_some());
        assert_eq!(driver.last_chunk(), Some(ChunkCoord::new(0, 0)));
    }
}
