//! Content factory for building battles from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tactics_core::{GameConfig, GameEngine};

use crate::loaders::{ConfigLoader, LoadResult, SkirmishLoader, SkirmishSpec};

/// Loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── skirmishes/
///     ├── duel.ron
///     └── ambush.ron
/// ```
///
/// `config.toml` is optional; defaults apply when it is absent.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the layout `skirmishes/<name>.ron`.
    pub fn load_skirmish(&self, name: &str) -> LoadResult<SkirmishSpec> {
        let path = self.data_dir.join("skirmishes").join(format!("{name}.ron"));
        SkirmishLoader::load(&path)
    }

    /// Loads the config and the named layout and places both rosters.
    pub fn build_skirmish(&self, name: &str) -> LoadResult<GameEngine> {
        let config = self.load_config()?;
        let engine = self
            .load_skirmish(name)?
            .into_builder(config)
            .build()
            .with_context(|| format!("Failed to set up skirmish {name}"))?;
        Ok(engine)
    }
}
