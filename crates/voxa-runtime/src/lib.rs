//! Per-frame driver tying the store to streaming, fluid, selection, and interaction.
#![forbid(unsafe_code)]

pub mod config;
mod fluid;
pub mod interact;
mod inventory;
mod selection;
mod stream;

pub use config::{ConfigError, RuntimeConfig, load_runtime_config};
pub use fluid::{FluidReport, FluidSim};
pub use inventory::{CreativeInventory, Inventory};
pub use selection::SelectionTracker;
pub use stream::StreamDriver;

use std::time::Duration;

use voxa_blocks::{Block, BlockId};
use voxa_geom::{IVec3, Vec3};
use voxa_query::{Heightfield, PhysicsBody, PhysicsOptions, SpatialIndex, physics_bodies};
use voxa_store::{StreamReport, WorldStore};

/// Player state and edge-triggered buttons for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub player: Vec3,
    pub eye: Vec3,
    pub look: Vec3,
    pub mine: bool,
    pub place: bool,
}

#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    pub streamed: Option<StreamReport>,
    pub mined: Option<BlockId>,
    pub placed: Option<BlockId>,
    pub fluid: Option<FluidReport>,
    pub selection: Option<Option<BlockId>>,
    pub physics_bodies: usize,
}

/// Owns the world store and runs every mutation and read in one pass per frame.
pub struct Runtime<I: Inventory = CreativeInventory> {
    store: WorldStore,
    index: SpatialIndex,
    streaming: StreamDriver,
    fluid: FluidSim,
    selection: SelectionTracker,
    inventory: I,
    physics_radius: f32,
    physics_opts: PhysicsOptions,
    frames: u64,
}

impl Runtime<CreativeInventory> {
    pub fn new(store: WorldStore, cfg: &RuntimeConfig) -> Self {
        let mut inventory = CreativeInventory::new();
        if !inventory.select(cfg.inventory.selected) {
            log::warn!(
                target: "edit",
                "{} is not on the hotbar, starting with {}",
                cfg.inventory.selected,
                inventory.selected()
            );
        }
        Self::with_inventory(store, cfg, inventory)
    }
}

impl<I: Inventory> Runtime<I> {
    pub fn with_inventory(store: WorldStore, cfg: &RuntimeConfig, inventory: I) -> Self {
        Self::with_fluid(store, cfg, inventory, FluidSim::new(&cfg.fluid))
    }

    pub fn with_fluid(store: WorldStore, cfg: &RuntimeConfig, inventory: I, fluid: FluidSim) -> Self {
        Self {
            store,
            index: SpatialIndex::new(),
            streaming: StreamDriver::new(cfg.streaming.view_radius),
            fluid,
            selection: SelectionTracker::new(cfg.selection.every_n_frames, cfg.selection.reach),
            inventory,
            physics_radius: cfg.physics.radius,
            physics_opts: PhysicsOptions {
                skip_ground_layer: cfg.physics.skip_ground_layer,
            },
            frames: 0,
        }
    }

    #[inline]
    pub fn store(&self) -> &WorldStore {
        &self.store
    }

    #[inline]
    pub fn store_mut(&mut self) -> &mut WorldStore {
        &mut self.store
    }

    #[inline]
    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    #[inline]
    pub fn inventory_mut(&mut self) -> &mut I {
        &mut self.inventory
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn fluid_ticks(&self) -> u64 {
        self.fluid.ticks()
    }

    /// Highlighted block, if the selection still exists.
    pub fn selected_block(&self) -> Option<&Block> {
        self.store.selected_block()
    }

    pub fn physics_bodies(&self, reference: Vec3) -> Vec<PhysicsBody> {
        physics_bodies(
            self.store.blocks(),
            reference,
            self.physics_radius,
            self.physics_opts,
        )
    }

    pub fn heightfield(&self) -> Heightfield {
        Heightfield::from_blocks(self.store.blocks())
    }

    /// Sphere-center height for spawning a body of `radius` on column `(x, z)`.
    pub fn spawn_height(&self, x: i32, z: i32, radius: f32) -> f32 {
        voxa_query::spawn_height(self.store.blocks(), x, z, radius)
    }

    pub fn frame(&mut self, input: &FrameInput, dt: Duration) -> FrameReport {
        self.frames += 1;
        let mut report = FrameReport {
            streamed: self.streaming.update(&mut self.store, input.player),
            ..FrameReport::default()
        };

        if input.mine {
            if let Some(id) = self.store.selected() {
                if interact::remove(&mut self.store, id) {
                    report.mined = Some(id);
                }
            }
        }
        if input.place {
            report.placed = self.place_on_selection();
        }

        report.fluid = self.fluid.advance(&mut self.store, input.player, dt);

        self.index.refresh(&self.store);
        report.selection = self
            .selection
            .update(&mut self.store, &self.index, input.eye, input.look);
        report.physics_bodies = self.physics_bodies(input.player).len();
        report
    }

    fn place_on_selection(&mut self) -> Option<BlockId> {
        let target = self.store.selected()?;
        let hit = self.selection.last_hit()?;
        if hit.normal == IVec3::default() {
            return None;
        }
        interact::place_against(&mut self.store, &mut self.inventory, target, hit.normal)
    }
}
