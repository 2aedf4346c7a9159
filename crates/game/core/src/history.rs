//! Undo/redo snapshots of the battle.
//!
//! A [`GameMemento`] is a deep, by-name copy of both rosters' mutable
//! attributes plus the turn state. [`GameCaretaker`] keeps two bounded stacks
//! of them. Snapshots hold no references into the live state, so restoring
//! one never aliases it.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};

use crate::state::{GameState, Position, Side, Stats, StatusEffect, TurnState};

/// Captured attributes of one character.
///
/// Ability cooldowns are not part of the snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSnapshot {
    pub position: Position,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub range: u32,
    pub mana: u32,
    pub temporary_defense: u32,
    pub temporary_evasion: u32,
    pub status_effects: Vec<StatusEffect>,
}

impl CharacterSnapshot {
    fn stats(&self) -> Stats {
        let mut stats = Stats::new(self.max_hp, self.attack, self.defense, self.range);
        stats.set_hp(self.hp);
        stats
    }
}

/// Immutable snapshot of both rosters and the turn state.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameMemento {
    rosters: [BTreeMap<String, CharacterSnapshot>; 2],
    turn: TurnState,
    created_at: DateTime<Utc>,
}

impl GameMemento {
    pub fn capture(state: &GameState) -> Self {
        let roster = |side: Side| {
            state
                .roster(side)
                .map(|character| {
                    let stats = character.stats();
                    let snapshot = CharacterSnapshot {
                        position: state
                            .position_of(character.id())
                            .unwrap_or(character.position()),
                        hp: stats.hp(),
                        max_hp: stats.max_hp(),
                        attack: stats.attack(),
                        defense: stats.defense(),
                        range: stats.range(),
                        mana: character.mana().current(),
                        temporary_defense: character.temporary_defense(),
                        temporary_evasion: character.temporary_evasion(),
                        status_effects: character.status_effects().iter().copied().collect(),
                    };
                    (character.name().to_owned(), snapshot)
                })
                .collect()
        };

        Self {
            rosters: [roster(Side::First), roster(Side::Second)],
            turn: state.turn(),
            created_at: Utc::now(),
        }
    }

    /// Writes the snapshot back into `state`.
    ///
    /// Characters are matched by side and name; characters missing from the
    /// snapshot are left untouched. Life state follows the restored HP and
    /// no events are emitted.
    pub(crate) fn restore(&self, state: &mut GameState) {
        for side in Side::BOTH {
            let targets: Vec<_> = state
                .roster(side)
                .filter_map(|c| Some((c.id(), self.character(side, c.name())?)))
                .collect();

            for (id, snapshot) in targets {
                state.relocate(id, snapshot.position);
                if let Some(character) = state.character_mut(id) {
                    character.restore(snapshot.stats(), snapshot.mana);
                    character.restore_effects(
                        snapshot.temporary_defense,
                        snapshot.temporary_evasion,
                        &snapshot.status_effects,
                    );
                }
            }
        }
        state.set_turn(self.turn);
    }

    pub fn roster(&self, side: Side) -> &BTreeMap<String, CharacterSnapshot> {
        &self.rosters[side.index()]
    }

    pub fn character(&self, side: Side, name: &str) -> Option<&CharacterSnapshot> {
        self.rosters[side.index()].get(name)
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Compares captured state, ignoring the timestamp.
    pub fn same_state_as(&self, other: &GameMemento) -> bool {
        self.rosters == other.rosters && self.turn == other.turn
    }
}

/// Bounded undo and redo stacks.
///
/// Pushing a new snapshot clears the redo stack; past `capacity` the oldest
/// entry is evicted.
#[derive(Clone, Debug)]
pub struct GameCaretaker {
    undo: VecDeque<GameMemento>,
    redo: VecDeque<GameMemento>,
    capacity: usize,
}

impl GameCaretaker {
    pub fn new(capacity: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records the state before a new action.
    pub fn push(&mut self, memento: GameMemento) {
        Self::push_bounded(&mut self.undo, memento, self.capacity);
        self.redo.clear();
    }

    /// Pops the latest snapshot, stashing `current` for redo.
    pub fn undo(&mut self, current: GameMemento) -> Option<GameMemento> {
        let memento = self.undo.pop_back()?;
        Self::push_bounded(&mut self.redo, current, self.capacity);
        Some(memento)
    }

    /// Mirror of [`GameCaretaker::undo`].
    pub fn redo(&mut self, current: GameMemento) -> Option<GameMemento> {
        let memento = self.redo.pop_back()?;
        Self::push_bounded(&mut self.undo, current, self.capacity);
        Some(memento)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    fn push_bounded(stack: &mut VecDeque<GameMemento>, memento: GameMemento, capacity: usize) {
        if capacity == 0 {
            return;
        }
        while stack.len() >= capacity {
            stack.pop_front();
        }
        stack.push_back(memento);
    }
}

impl Default for GameCaretaker {
    fn default() -> Self {
        Self::new(crate::GameConfig::DEFAULT_HISTORY_DEPTH)
    }
}
