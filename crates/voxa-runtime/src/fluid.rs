use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voxa_blocks::{BlockId, BlockType};
use voxa_geom::{IVec3, Vec3};
use voxa_query::nearby;
use voxa_store::WorldStore;

use crate::config::FluidConfig;

const LATERAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FluidReport {
    /// Water blocks considered this tick.
    pub active: usize,
    pub fell: usize,
    pub spread: usize,
}

impl FluidReport {
    #[inline]
    pub fn changed(&self) -> bool {
        self.fell + self.spread > 0
    }
}

/// Timer-driven water automaton around the player.
///
/// Each tick water falls into an empty loaded cell below it, otherwise tries one random
/// horizontal neighbour and spreads a new block there. Targets are claimed as they are
/// chosen so two sources never fill the same cell in one tick.
pub struct FluidSim {
    interval: Duration,
    radius: f32,
    since_tick: Duration,
    rng: StdRng,
    ticks: u64,
}

impl FluidSim {
    pub fn new(cfg: &FluidConfig) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(cfg.interval(), cfg.radius, rng)
    }

    pub fn with_rng(interval: Duration, radius: f32, rng: StdRng) -> Self {
        Self {
            interval,
            radius,
            since_tick: Duration::ZERO,
            rng,
            ticks: 0,
        }
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Accumulates `dt` and runs at most one tick once the interval has elapsed.
    pub fn advance(&mut self, store: &mut WorldStore, player: Vec3, dt: Duration) -> Option<FluidReport> {
        self.since_tick += dt;
        if self.since_tick < self.interval {
            return None;
        }
        self.since_tick = (self.since_tick - self.interval).min(self.interval);
        Some(self.tick(store, player))
    }

    pub fn tick(&mut self, store: &mut WorldStore, player: Vec3) -> FluidReport {
        self.ticks += 1;
        let mut occupied = store.occupied_cells();
        let water: Vec<(BlockId, IVec3)> = nearby(store.blocks(), player, self.radius)
            .filter(|b| b.kind == BlockType::Water)
            .map(|b| (b.id, b.cell()))
            .collect();

        let free = |cell: IVec3, occupied: &hashbrown::HashSet<IVec3>| {
            cell.y >= 0 && !occupied.contains(&cell) && store.is_cell_loaded(cell)
        };

        let mut falls = Vec::new();
        let mut spreads = Vec::new();
        for &(id, cell) in &water {
            let below = cell.offset(0, -1, 0);
            if free(below, &occupied) {
                occupied.insert(below);
                falls.push((id, below));
                continue;
            }
            let (dx, dz) = LATERAL[self.rng.gen_range(0..LATERAL.len())];
            let side = cell.offset(dx, 0, dz);
            if free(side, &occupied) {
                occupied.insert(side);
                spreads.push(side);
            }
        }

        for &(id, to) in &falls {
            store.remove_block(id);
            store.add_block(to.center(), BlockType::Water);
        }
        for &cell in &spreads {
            store.add_block(cell.center(), BlockType::Water);
        }

        let report = FluidReport {
            active: water.len(),
            fell: falls.len(),
            spread: spreads.len(),
        };
        if report.changed() {
            log::debug!(
                target: "fluid",
                "tick {}: {} water, {} fell, {} spread",
                self.ticks,
                report.active,
                report.fell,
                report.spread
            );
        }
        report
    }
}
