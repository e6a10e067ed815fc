use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use voxa_blocks::{BlockType, HOTBAR};
use voxa_geom::Vec3;
use voxa_runtime::{FrameInput, Inventory, Runtime, RuntimeConfig, load_runtime_config};
use voxa_store::WorldStore;
use voxa_world::worldgen::{Mode, load_config_from_path};
use voxa_world::{WorldGenConfig, WorldGenParams};

const BODY_RADIUS: f32 = 0.5;
const CAMERA_HEIGHT: f32 = 2.0;

/// Walks a simulated player across a procedurally generated voxel world without a window.
#[derive(Parser, Debug)]
#[command(name = "voxa", version, about)]
struct Args {
    /// TOML config with optional [worldgen], [streaming], [physics], [fluid], [selection] tables
    #[arg(long)]
    config: Option<PathBuf>,
    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// Simulated frame time in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Walking speed along +x in blocks per second
    #[arg(long, default_value_t = 4.0)]
    speed: f32,
    /// Override the terrain noise seed
    #[arg(long)]
    seed: Option<u32>,
    /// Generate a flat world instead of noise terrain
    #[arg(long)]
    flat: bool,
    /// Place the selected hotbar type every N frames (0 disables)
    #[arg(long, default_value_t = 0)]
    place_every: u64,
    /// Mine the selected block every N frames (0 disables)
    #[arg(long, default_value_t = 0)]
    mine_every: u64,
    /// Hotbar slot to build with (1-based); overrides [inventory] selected
    #[arg(long)]
    slot: Option<usize>,
}

#[derive(Default)]
struct Totals {
    chunks_loaded: usize,
    chunks_unloaded: usize,
    placed: usize,
    mined: usize,
    selection_changes: usize,
    max_physics_bodies: usize,
}

fn load_configs(args: &Args) -> Result<(WorldGenConfig, RuntimeConfig), Box<dyn Error>> {
    let (mut world, runtime) = match &args.config {
        Some(path) => (load_config_from_path(path)?, load_runtime_config(path)?),
        None => (WorldGenConfig::default(), RuntimeConfig::default()),
    };
    if let Some(seed) = args.seed {
        world.seed = Some(seed);
    }
    if args.flat {
        world.mode = Mode::Flat;
    }
    Ok((world, runtime))
}

fn on(every: u64, frame: u64) -> bool {
    every > 0 && frame % every == 0
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let (world_cfg, runtime_cfg) = load_configs(&args)?;
    let params = WorldGenParams::from_config(&world_cfg);
    log::info!(
        target: "voxa",
        "world seed {} mode {:?}, view radius {}",
        params.seed,
        params.mode,
        runtime_cfg.streaming.view_radius
    );

    let mut rt = Runtime::new(WorldStore::new(params), &runtime_cfg);
    if let Some(slot) = args.slot {
        if !rt.inventory_mut().select_slot(slot) {
            log::warn!(
                target: "voxa",
                "hotbar slot {} out of range 1..={}, keeping {}",
                slot,
                HOTBAR.len(),
                rt.inventory_mut().selected()
            );
        }
    }

    let dt = Duration::from_millis(args.frame_ms);
    let step = args.speed * dt.as_secs_f32();
    let mut player = Vec3::new(0.0, rt.spawn_height(0, 0, BODY_RADIUS), 0.0);
    log::info!(target: "voxa", "spawned at {:.1},{:.1},{:.1}", player.x, player.y, player.z);

    let look = Vec3::new(1.0, -1.0, 0.0);
    let mut totals = Totals::default();
    for frame in 1..=args.frames {
        player.x += step;
        let column = player.cell();
        player.y = rt.spawn_height(column.x, column.z, BODY_RADIUS);

        let input = FrameInput {
            player,
            eye: player + Vec3::new(0.0, CAMERA_HEIGHT, 0.0),
            look,
            mine: on(args.mine_every, frame),
            place: on(args.place_every, frame),
        };
        let report = rt.frame(&input, dt);

        if let Some(s) = &report.streamed {
            totals.chunks_loaded += s.loaded.len();
            totals.chunks_unloaded += s.unloaded.len();
        }
        totals.placed += usize::from(report.placed.is_some());
        totals.mined += usize::from(report.mined.is_some());
        totals.selection_changes += usize::from(report.selection.is_some());
        totals.max_physics_bodies = totals.max_physics_bodies.max(report.physics_bodies);
    }

    let stats = rt.store().stats();
    log::info!(
        target: "voxa",
        "{} frames, player at {:.1},{:.1},{:.1}",
        rt.frames(),
        player.x,
        player.y,
        player.z
    );
    log::info!(
        target: "voxa",
        "chunks: {} loaded now, {} loads, {} unloads",
        stats.loaded_chunks,
        totals.chunks_loaded,
        totals.chunks_unloaded
    );
    log::info!(
        target: "voxa",
        "edits: {} placed, {} mined; {} selection changes; {} fluid ticks; peak {} physics bodies",
        totals.placed,
        totals.mined,
        totals.selection_changes,
        rt.fluid_ticks(),
        totals.max_physics_bodies
    );
    let per_type: Vec<String> = BlockType::ALL
        .iter()
        .map(|&t| format!("{t}={}", stats.count(t)))
        .collect();
    log::info!(
        target: "voxa",
        "{} blocks at rev {}: {}",
        stats.blocks,
        stats.revision,
        per_type.join(" ")
    );
    Ok(())
}
