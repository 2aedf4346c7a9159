//! Battle setup: two rosters placed on a board.

use tactics_core::{
    Board, CharacterClass, CharacterId, GameConfig, GameEngine, Position, SetupError, Side,
};

use crate::archetypes::Archetype;

/// One unit to place at battle start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub class: CharacterClass,
    pub name: String,
    pub position: Position,
}

impl Placement {
    pub fn new(class: CharacterClass, name: impl Into<String>, position: Position) -> Self {
        Self {
            class,
            name: name.into(),
            position,
        }
    }
}

/// Builds a ready-to-run [`GameEngine`] from two rosters.
///
/// Placement is all-or-nothing: the first duplicate name, out-of-bounds or
/// overlapping position aborts the build.
#[derive(Clone, Debug)]
pub struct SkirmishBuilder {
    board: Board,
    config: GameConfig,
    rosters: [Vec<Placement>; 2],
}

impl SkirmishBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            board: Board::new(width, height),
            config: GameConfig::default(),
            rosters: [Vec::new(), Vec::new()],
        }
    }

    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn unit(
        mut self,
        side: Side,
        class: CharacterClass,
        name: impl Into<String>,
        position: Position,
    ) -> Self {
        self.rosters[side.index()].push(Placement::new(class, name, position));
        self
    }

    #[must_use]
    pub fn placement(mut self, side: Side, placement: Placement) -> Self {
        self.rosters[side.index()].push(placement);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn roster(&self, side: Side) -> &[Placement] {
        &self.rosters[side.index()]
    }

    pub fn build(self) -> Result<GameEngine, SetupError> {
        self.build_with_ids().map(|(engine, _)| engine)
    }

    /// Like [`SkirmishBuilder::build`], also returning the ids assigned to
    /// each roster in placement order.
    pub fn build_with_ids(self) -> Result<(GameEngine, [Vec<CharacterId>; 2]), SetupError> {
        let mut engine = GameEngine::new(self.board, self.config);
        let mut ids = [Vec::new(), Vec::new()];

        for side in Side::BOTH {
            for placement in &self.rosters[side.index()] {
                let character = Archetype::of(placement.class).build(placement.name.as_str());
                let id = engine.add_character(side, character, placement.position)?;
                ids[side.index()].push(id);
            }
        }

        tracing::info!(
            width = self.board.width(),
            height = self.board.height(),
            first = ids[0].len(),
            second = ids[1].len(),
            "skirmish ready"
        );
        Ok((engine, ids))
    }
}
