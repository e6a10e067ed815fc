use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use voxa_blocks::BlockType;
pub use voxa_world::ConfigError;

/// Non-worldgen tables of the config document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub streaming: StreamingConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub fluid: FluidConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StreamingConfig {
    #[serde(default = "default_view_radius")]
    pub view_radius: i32,
}
fn default_view_radius() -> i32 {
    2
}
impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            view_radius: default_view_radius(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PhysicsConfig {
    #[serde(default = "default_physics_radius")]
    pub radius: f32,
    #[serde(default)]
    pub skip_ground_layer: bool,
}
fn default_physics_radius() -> f32 {
    6.0
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            radius: default_physics_radius(),
            skip_ground_layer: false,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct FluidConfig {
    #[serde(default = "default_fluid_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_fluid_radius")]
    pub radius: f32,
    /// Seeds lateral spread; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}
fn default_fluid_interval_ms() -> u64 {
    500
}
fn default_fluid_radius() -> f32 {
    16.0
}
impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_fluid_interval_ms(),
            radius: default_fluid_radius(),
            seed: None,
        }
    }
}

impl FluidConfig {
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_every_n_frames")]
    pub every_n_frames: u32,
    #[serde(default = "default_reach")]
    pub reach: f32,
}
fn default_every_n_frames() -> u32 {
    2
}
fn default_reach() -> f32 {
    8.0
}
impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            every_n_frames: default_every_n_frames(),
            reach: default_reach(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct InventoryConfig {
    /// Type selected at startup; must be on the hotbar.
    #[serde(default)]
    pub selected: BlockType,
}

impl RuntimeConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

pub fn load_runtime_config(path: &Path) -> Result<RuntimeConfig, ConfigError> {
    let s = fs::read_to_string(path)?;
    RuntimeConfig::from_toml_str(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = RuntimeConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.streaming.view_radius, 2);
        assert_eq!(cfg.physics.radius, 6.0);
        assert!(!cfg.physics.skip_ground_layer);
        assert_eq!(cfg.fluid.interval(), Duration::from_millis(500));
        assert_eq!(cfg.fluid.radius, 16.0);
        assert_eq!(cfg.selection.every_n_frames, 2);
        assert_eq!(cfg.inventory.selected, BlockType::Dirt);
    }

    #[test]
    fn inventory_type_by_name() {
        let cfg = RuntimeConfig::from_toml_str("[inventory]\nselected = \"leaves\"").unwrap();
        assert_eq!(cfg.inventory.selected, BlockType::Leaves);
        assert!(RuntimeConfig::from_toml_str("[inventory]\nselected = \"lava\"").is_err());
    }

    #[test]
    fn worldgen_table_is_ignored() {
        let cfg = RuntimeConfig::from_toml_str(
            r#"
            [worldgen]
            mode = "flat"

            [streaming]
            view_radius = 5

            [fluid]
            interval_ms = 0
            seed = 4
            "#,
        )
        .unwrap();
        assert_eq!(cfg.streaming.view_radius, 5);
        assert_eq!(cfg.fluid.interval(), Duration::from_millis(1));
        assert_eq!(cfg.fluid.seed, Some(4));
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let err = RuntimeConfig::from_toml_str("[streaming]\nview_radius = \"far\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
