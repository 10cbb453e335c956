//! Common types for the board engine: errors and shot outcomes.

use core::fmt;

/// Result of a shot fired at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// The shot landed on a ship cell.
    Hit,
    /// The shot landed on an empty cell.
    Miss,
}

/// Why a game refused a mutation in its current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateReason {
    /// Ships can only be placed while the game is in setup.
    NotInSetup,
    /// The game is finished; nothing may change.
    AlreadyEnded,
    /// At least one shot has been fired.
    AlreadyStarted,
}

impl StateReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            StateReason::NotInSetup => "not-in-setup",
            StateReason::AlreadyEnded => "already-ended",
            StateReason::AlreadyStarted => "already-started",
        }
    }
}

impl fmt::Display for StateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the board engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// A cell lies outside the board.
    OutOfBounds { x: i32, y: i32 },
    /// A cell is already taken by another ship.
    Overlap { x: i32, y: i32 },
    /// A shot was already fired at this cell.
    DuplicateShot { x: i32, y: i32 },
    /// The game's phase forbids the operation.
    State(StateReason),
    /// Random placement found no free spot.
    UnableToPlaceShip,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OutOfBounds { x, y } => {
                write!(f, "Can't place outside the game board [{}, {}]", x, y)
            }
            GameError::Overlap { x, y } => {
                write!(f, "Position [{}, {}] already contains a ship", x, y)
            }
            GameError::DuplicateShot { x, y } => {
                write!(f, "Position [{}, {}] was already shot", x, y)
            }
            GameError::State(reason) => write!(f, "Invalid game state: {}", reason),
            GameError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// A character that is not a known ship kind, direction or cell symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownSymbol(pub char);

impl fmt::Display for UnknownSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown symbol {:?}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownSymbol {}
