use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::parallax::ScrollDirection;
use crate::window::WindowConfig;

/// Everything tunable about a run, loaded from JSON.
///
/// Every section and field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub assets: AssetPaths,
    pub gameplay: GameplayConfig,
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Asset file names, relative to `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub root: PathBuf,
    pub landing: String,
    pub menu_background: String,
    pub help: String,
    pub font_texture: String,
    pub font_data: String,
    pub player: String,
    pub enemy: String,
    pub bullet: String,
    pub background: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            root: PathBuf::from("images"),
            landing: "landing_page.png".to_owned(),
            menu_background: "menu_background.png".to_owned(),
            help: "help.png".to_owned(),
            font_texture: "retro_deco.png".to_owned(),
            font_data: "retro_deco.fnt".to_owned(),
            player: "player.png".to_owned(),
            enemy: "mon.png".to_owned(),
            bullet: "b.png".to_owned(),
            background: "prlx.jpg".to_owned(),
        }
    }
}

impl AssetPaths {
    /// `file` joined onto the asset root.
    pub fn resolve(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub bullet_pool: usize,
    pub enemy_count: usize,
    /// World units per second.
    pub player_speed: f32,
    /// Player sprite sheet as `[columns, rows]`.
    pub player_sheet: [u32; 2],
    pub enemy_sheet: [u32; 2],
    pub player_frame_ms: u64,
    pub enemy_frame_ms: u64,
    pub scroll_step: f32,
    pub scroll_interval_ms: u64,
    pub scroll_direction: ScrollDirection,
    pub bullet_step: f32,
    pub bullet_interval_ms: u64,
    pub bullet_ceiling: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            bullet_pool: 10,
            enemy_count: 2,
            player_speed: 0.6,
            player_sheet: [4, 2],
            enemy_sheet: [1, 1],
            player_frame_ms: 70,
            enemy_frame_ms: 120,
            scroll_step: 0.005,
            scroll_interval_ms: 50,
            scroll_direction: ScrollDirection::Left,
            bullet_step: 0.04,
            bullet_interval_ms: 16,
            bullet_ceiling: 1.0,
        }
    }
}
