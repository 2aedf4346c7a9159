//! Authoritative battle state.
//!
//! [`GameState`] owns every [`Character`], the position index and the turn
//! state. It is the single writer of positions: a character's own
//! `position()` is a projection refreshed through [`GameState::relocate`].

mod board;
mod character;
mod common;
mod stats;
mod status;

use std::collections::BTreeMap;

pub use board::Board;
pub use character::{
    Character, CharacterClass, CharacterState, Housekeeping, ManaPool, TurnBudget,
};
pub use common::{CharacterId, Position, Side, TurnState};
pub use stats::Stats;
pub use status::{StatusEffect, StatusEffectKind, StatusEffects, StatusTick};

use crate::error::SetupError;

/// Registry of all characters, their positions and the two rosters.
///
/// Dead characters stay in the roster; alive-only views filter them out.
#[derive(Debug, Default)]
pub struct GameState {
    characters: Vec<Character>,
    positions: BTreeMap<CharacterId, Position>,
    rosters: [Vec<CharacterId>; 2],
    turn: TurnState,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a character to `side` at `position`.
    ///
    /// Names must be unique within a roster because history snapshots are
    /// keyed by name. Bounds are the caller's concern; occupancy is checked
    /// against living characters.
    pub fn add(
        &mut self,
        side: Side,
        mut character: Character,
        position: Position,
    ) -> Result<CharacterId, SetupError> {
        if self.find(side, character.name()).is_some() {
            return Err(SetupError::DuplicateName {
                side,
                name: character.name().to_owned(),
            });
        }
        if self.occupant_at(position).is_some() {
            return Err(SetupError::Occupied { position });
        }

        let id = CharacterId(self.characters.len() as u32);
        character.assign(id, side, position);
        self.characters.push(character);
        self.positions.insert(id, position);
        self.rosters[side.index()].push(id);
        Ok(id)
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.0 as usize)
    }

    pub(crate) fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id.0 as usize)
    }

    /// Looks a character up by name within one roster.
    pub fn find(&self, side: Side, name: &str) -> Option<&Character> {
        self.roster(side).find(|c| c.name() == name)
    }

    /// Every character on `side` in insertion order, dead ones included.
    pub fn roster(&self, side: Side) -> impl Iterator<Item = &Character> + '_ {
        self.rosters[side.index()]
            .iter()
            .filter_map(move |id| self.character(*id))
    }

    /// Living characters on `side` in insertion order.
    pub fn alive(&self, side: Side) -> impl Iterator<Item = &Character> + '_ {
        self.roster(side).filter(|c| c.is_alive())
    }

    pub fn has_living(&self, side: Side) -> bool {
        self.alive(side).next().is_some()
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    /// Authoritative position of a character.
    pub fn position_of(&self, id: CharacterId) -> Option<Position> {
        self.positions.get(&id).copied()
    }

    /// Living character standing on `position`, if any.
    pub fn occupant_at(&self, position: Position) -> Option<CharacterId> {
        self.positions
            .iter()
            .filter(|(_, pos)| **pos == position)
            .map(|(id, _)| *id)
            .find(|id| self.character(*id).is_some_and(Character::is_alive))
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub(crate) fn set_turn(&mut self, turn: TurnState) {
        self.turn = turn;
    }

    /// Moves a character in the index and refreshes its projection.
    pub(crate) fn relocate(&mut self, id: CharacterId, position: Position) -> bool {
        let Some(character) = self.characters.get_mut(id.0 as usize) else {
            return false;
        };
        character.sync_position(position);
        self.positions.insert(id, position);
        true
    }
}
