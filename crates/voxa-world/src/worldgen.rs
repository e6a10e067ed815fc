use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// `[worldgen]` table of the config document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub mode: Mode,
    /// Noise seed; a fresh random seed is drawn per process when absent.
    #[serde(default)]
    pub seed: Option<u32>,
    #[serde(default)]
    pub height: Height,
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
    #[serde(default)]
    pub flat: Flat,
    #[serde(default)]
    pub trees: Trees,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Flat,
}

fn default_sea_level() -> i32 {
    3
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    #[serde(default = "default_height_scale")]
    pub scale: f32,
    #[serde(default = "default_height_min")]
    pub min: i32,
    #[serde(default = "default_height_max")]
    pub max: i32,
}
fn default_height_scale() -> f32 {
    25.0
}
fn default_height_min() -> i32 {
    1
}
fn default_height_max() -> i32 {
    6
}
impl Default for Height {
    fn default() -> Self {
        Self {
            scale: default_height_scale(),
            min: default_height_min(),
            max: default_height_max(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Flat {
    #[serde(default = "default_flat_thickness")]
    pub thickness: i32,
}
fn default_flat_thickness() -> i32 {
    1
}
impl Default for Flat {
    fn default() -> Self {
        Self {
            thickness: default_flat_thickness(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Trees {
    #[serde(default = "default_tree_prob")]
    pub probability: f32,
    #[serde(default = "default_trunk_min")]
    pub trunk_min: i32,
    #[serde(default = "default_trunk_max")]
    pub trunk_max: i32,
    #[serde(default = "default_crown_radius")]
    pub crown_radius: i32,
    #[serde(default = "default_crown_reach")]
    pub crown_reach: i32,
    /// Seeds tree placement; unseeded (entropy) when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}
fn default_tree_prob() -> f32 {
    0.04
}
fn default_trunk_min() -> i32 {
    3
}
fn default_trunk_max() -> i32 {
    4
}
fn default_crown_radius() -> i32 {
    2
}
fn default_crown_reach() -> i32 {
    3
}
impl Default for Trees {
    fn default() -> Self {
        Self {
            probability: default_tree_prob(),
            trunk_min: default_trunk_min(),
            trunk_max: default_trunk_max(),
            crown_radius: default_crown_radius(),
            crown_reach: default_crown_reach(),
            seed: None,
        }
    }
}

#[derive(Deserialize)]
struct ConfigDoc {
    #[serde(default)]
    worldgen: WorldGenConfig,
}

impl WorldGenConfig {
    /// Parses the `[worldgen]` table out of a full config document; other tables are ignored.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let doc: ConfigDoc = toml::from_str(s)?;
        Ok(doc.worldgen)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldGenConfig, ConfigError> {
    let s = fs::read_to_string(path)?;
    WorldGenConfig::from_toml_str(&s)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WorldGenMode {
    Normal,
    Flat { thickness: i32 },
}

#[derive(Clone, Debug)]
pub struct HeightParams {
    pub scale: f32,
    pub min: i32,
    pub max: i32,
}

#[derive(Clone, Debug)]
pub struct TreeParams {
    pub probability: f64,
    pub trunk_min: i32,
    pub trunk_max: i32,
    pub crown_radius: i32,
    pub crown_reach: i32,
    pub seed: Option<u64>,
}

/// Resolved generation parameters; the noise seed is fixed here once per process.
#[derive(Clone, Debug)]
pub struct WorldGenParams {
    pub mode: WorldGenMode,
    pub seed: u32,
    pub height: HeightParams,
    pub sea_level: i32,
    pub trees: TreeParams,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        let mode = match cfg.mode {
            Mode::Normal => WorldGenMode::Normal,
            Mode::Flat => WorldGenMode::Flat {
                thickness: cfg.flat.thickness.max(0),
            },
        };
        let trunk_min = cfg.trees.trunk_min.max(1);
        Self {
            mode,
            seed: cfg.seed.unwrap_or_else(rand::random),
            height: HeightParams {
                scale: cfg.height.scale,
                min: cfg.height.min.max(1),
                max: cfg.height.max.max(cfg.height.min.max(1)),
            },
            sea_level: cfg.sea_level,
            trees: TreeParams {
                probability: unit_probability(cfg.trees.probability),
                trunk_min,
                trunk_max: cfg.trees.trunk_max.max(trunk_min),
                crown_radius: cfg.trees.crown_radius.max(0),
                crown_reach: cfg.trees.crown_reach.max(0),
                seed: cfg.trees.seed,
            },
        }
    }

    /// Flat world of the given thickness with a fixed seed; handy for tests and tools.
    pub fn flat(thickness: i32) -> Self {
        let cfg = WorldGenConfig {
            mode: Mode::Flat,
            seed: Some(0),
            flat: Flat { thickness },
            ..WorldGenConfig::default()
        };
        Self::from_config(&cfg)
    }
}

/// Clamps into `[0, 1]`; NaN and infinities become 0.
fn unit_probability(p: f32) -> f64 {
    let p = f64::from(p);
    if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 }
}
