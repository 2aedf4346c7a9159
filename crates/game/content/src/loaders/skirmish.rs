//! Skirmish layout loader.

use std::path::Path;

use tactics_core::{GameConfig, Side};

use crate::loaders::{LoadResult, read_file};
use crate::skirmish::{Placement, SkirmishBuilder};

/// Board size and both rosters, as stored in a RON file.
///
/// ```ron
/// (
///     width: 8,
///     height: 8,
///     first: [(class: Warrior, name: "Aldric", position: (x: 0, y: 0))],
///     second: [(class: Rogue, name: "Vex", position: (x: 7, y: 7))],
/// )
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SkirmishSpec {
    pub width: u32,
    pub height: u32,
    pub first: Vec<Placement>,
    pub second: Vec<Placement>,
}

impl SkirmishSpec {
    /// Turns the layout into a builder using `config`.
    pub fn into_builder(self, config: GameConfig) -> SkirmishBuilder {
        let builder = SkirmishBuilder::new(self.width, self.height).config(config);
        let builder = self
            .first
            .into_iter()
            .fold(builder, |b, p| b.placement(Side::First, p));
        self.second
            .into_iter()
            .fold(builder, |b, p| b.placement(Side::Second, p))
    }
}

/// Loader for skirmish layouts from RON files.
pub struct SkirmishLoader;

impl SkirmishLoader {
    pub fn load(path: &Path) -> LoadResult<SkirmishSpec> {
        let content = read_file(path)?;
        Self::from_ron_str(&content).map_err(|e| e.context(format!("in {}", path.display())))
    }

    pub fn from_ron_str(content: &str) -> LoadResult<SkirmishSpec> {
        let spec: SkirmishSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skirmish RON: {}", e))?;
        Ok(spec)
    }
}
