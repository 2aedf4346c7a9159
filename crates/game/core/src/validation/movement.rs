//! Tile-level movement checks.

use crate::error::InvalidAction;
use crate::state::{Board, CharacterId, GameState, Position};

/// Checks and commits moves on one board.
///
/// A move is legal when the mover is alive, the destination is on the board
/// and free of living characters, the Chebyshev distance is within the
/// class allowance, and every tile passed on the way is on the board and
/// free.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovementValidator {
    board: Board,
}

impl MovementValidator {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the first rule the move breaks, if any.
    pub fn check(
        &self,
        state: &GameState,
        id: CharacterId,
        destination: Position,
    ) -> Result<(), InvalidAction> {
        let character = state.character(id).ok_or(InvalidAction::UnknownCharacter)?;
        character.state().ensure_can_act(character.name())?;

        if !self.board.contains(destination) {
            return Err(InvalidAction::OutOfBounds { destination });
        }
        if self.board.occupant(state, destination).is_some() {
            return Err(InvalidAction::Occupied { destination });
        }

        let origin = state.position_of(id).unwrap_or(character.position());
        let distance = origin.distance_to(destination);
        let allowance = character.movement_allowance();
        if distance > allowance {
            return Err(InvalidAction::TooFar {
                distance,
                allowance,
            });
        }

        if let Some(at) = origin
            .path_to(destination)
            .find(|tile| !self.board.contains(*tile) || self.board.is_occupied(state, *tile))
        {
            return Err(InvalidAction::PathBlocked { at });
        }

        Ok(())
    }

    pub fn can_move(&self, state: &GameState, id: CharacterId, destination: Position) -> bool {
        self.check(state, id, destination).is_ok()
    }

    /// Checks the move and commits it to the position index.
    ///
    /// Returns `false` and leaves `state` untouched when the move is illegal.
    pub fn validate_and_move(
        &self,
        state: &mut GameState,
        id: CharacterId,
        destination: Position,
    ) -> bool {
        if let Err(error) = self.check(state, id, destination) {
            tracing::debug!(character = %id, %destination, %error, "move rejected");
            return false;
        }
        state.relocate(id, destination)
    }
}
