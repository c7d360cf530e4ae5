//! Game configuration: the player roster and engine settings.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;
use turnflow::{EngineConfig, Player};

use crate::game::PlayerInfo;

/// Game configuration (TOML).
///
/// ```toml
/// [[players]]
/// id = "x"
/// mark = "X"
///
/// [[players]]
/// id = "o"
/// mark = "O"
///
/// [engine]
/// max_auto_advance = 10000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub players: Vec<PlayerEntry>,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PlayerEntry {
    pub id: String,
    pub mark: char,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: vec![
                PlayerEntry {
                    id: "x".to_string(),
                    mark: 'X',
                },
                PlayerEntry {
                    id: "o".to_string(),
                    mark: 'O',
                },
            ],
            engine: EngineConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.players.len() < 2 {
            bail!("at least 2 players required, got {}", self.players.len());
        }
        let mut ids = HashSet::new();
        let mut marks = HashSet::new();
        for player in &self.players {
            if player.id.trim().is_empty() {
                bail!("player id must not be empty");
            }
            if player.mark.is_whitespace() {
                bail!("player '{}': mark must not be whitespace", player.id);
            }
            if !ids.insert(player.id.as_str()) {
                bail!("duplicate player id '{}'", player.id);
            }
            if !marks.insert(player.mark) {
                bail!("player '{}': mark '{}' already taken", player.id, player.mark);
            }
        }
        self.engine.validate()
    }

    /// Players in turn order.
    pub fn roster(&self) -> Vec<Player<PlayerInfo>> {
        self.players
            .iter()
            .map(|entry| Player::new(entry.id.clone(), PlayerInfo { mark: entry.mark }))
            .collect()
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `GameConfig::default()`.
pub fn load_config(path: &Path) -> Result<GameConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        return Ok(GameConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: GameConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
