use std::fmt;

/// Identifier of a character within one battle.
///
/// Ids are handed out by [`GameState`](super::GameState) in insertion order
/// and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (chessboard) distance: `max(|dx|, |dy|)`.
    ///
    /// Used for movement, attack range and adjacency alike, so a diagonal
    /// step always costs the same as an orthogonal one.
    pub fn distance_to(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    pub fn is_adjacent(self, other: Position) -> bool {
        self.distance_to(other) == 1
    }

    /// Tiles strictly between `self` and `to` along the straight or diagonal
    /// line joining them, nearest first.
    ///
    /// Off-axis lines are rasterised by rounding each step half away from
    /// zero.
    pub fn path_to(self, to: Position) -> impl Iterator<Item = Position> {
        let steps = self.distance_to(to) as i32;
        let (dx, dy) = (to.x - self.x, to.y - self.y);
        (1..steps.max(1)).map(move |i| {
            Position::new(
                self.x + scaled(dx, i, steps),
                self.y + scaled(dy, i, steps),
            )
        })
    }
}

fn scaled(delta: i32, step: i32, steps: i32) -> i32 {
    let n = delta * step;
    (2 * n + n.signum() * steps) / (2 * steps)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the two opposing sides of a battle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    #[strum(to_string = "first side")]
    First,
    #[strum(to_string = "second side")]
    Second,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    /// Side in control on the given turn number.
    pub const fn for_turn(turn: u64) -> Self {
        Self::BOTH[(turn % 2) as usize]
    }

    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// Turn counter and the side currently in control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Completed turns so far. Only grows during a battle; undo may rewind it.
    pub number: u64,
    pub active: Side,
}

impl TurnState {
    pub const fn new() -> Self {
        Self {
            number: 0,
            active: Side::First,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
