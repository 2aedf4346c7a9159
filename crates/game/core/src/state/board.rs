use super::{CharacterId, GameState, Position};

/// Rectangular battle grid.
///
/// The board stores no occupancy of its own; every occupancy query is derived
/// from the live roster so it can never go stale after a move or a death.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    width: u32,
    height: u32,
}

impl Board {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if `position` lies on the grid.
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// Living character standing on `position`, if any.
    pub fn occupant(&self, state: &GameState, position: Position) -> Option<CharacterId> {
        state.occupant_at(position)
    }

    pub fn is_occupied(&self, state: &GameState, position: Position) -> bool {
        self.occupant(state, position).is_some()
    }

    /// Iterates every tile, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }
}
