//! The N×N grid of cell states for one game.
//!
//! The grid is indexed `[x][y]`. Placement is validated over the whole
//! cell sequence before anything is written, so a failed placement never
//! leaves partial marks behind.

use core::fmt;
use rand::Rng;

use crate::common::{GameError, ShotOutcome, UnknownSymbol};
use crate::config::{in_bounds, BOARD_SIZE, PLACEMENT_ATTEMPTS};
use crate::ship::{Direction, Ship, ShipKind};

const N: usize = BOARD_SIZE as usize;

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "char", try_from = "char")
)]
pub enum Cell {
    #[default]
    Empty,
    /// Unhit segment of a ship of this kind.
    Ship(ShipKind),
    Hit,
    Miss,
}

impl Cell {
    pub const EMPTY_SYMBOL: char = '*';
    pub const HIT_SYMBOL: char = 'X';
    pub const MISS_SYMBOL: char = ' ';

    pub const fn symbol(self) -> char {
        match self {
            Cell::Empty => Self::EMPTY_SYMBOL,
            Cell::Ship(kind) => kind.symbol(),
            Cell::Hit => Self::HIT_SYMBOL,
            Cell::Miss => Self::MISS_SYMBOL,
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            Self::EMPTY_SYMBOL => Some(Cell::Empty),
            Self::HIT_SYMBOL => Some(Cell::Hit),
            Self::MISS_SYMBOL => Some(Cell::Miss),
            other => ShipKind::from_symbol(other).map(Cell::Ship),
        }
    }

    /// Whether a shot has already landed here.
    pub const fn is_shot(self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss)
    }

    /// Outcome of the shot that marked this cell, if any.
    pub const fn outcome(self) -> Option<ShotOutcome> {
        match self {
            Cell::Hit => Some(ShotOutcome::Hit),
            Cell::Miss => Some(ShotOutcome::Miss),
            _ => None,
        }
    }
}

impl From<Cell> for char {
    fn from(cell: Cell) -> Self {
        cell.symbol()
    }
}

impl TryFrom<char> for Cell {
    type Error = UnknownSymbol;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Cell::from_symbol(symbol).ok_or(UnknownSymbol(symbol))
    }
}

/// Square grid of cells.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Board {
    cells: [[Cell; N]; N],
}

impl Board {
    /// Create a board with every cell empty.
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; N]; N],
        }
    }

    /// Build a board from a grid indexed `[x][y]`.
    pub fn from_cells(cells: [[Cell; N]; N]) -> Self {
        Board { cells }
    }

    /// Cell at `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Result<Cell, GameError> {
        let (cx, cy) = Self::index(x, y)?;
        Ok(self.cells[cx][cy])
    }

    /// Grid indexed `[x][y]`.
    pub fn rows(&self) -> &[[Cell; N]; N] {
        &self.cells
    }

    /// Returns `true` while any ship segment is still unhit.
    pub fn ships_afloat(&self) -> bool {
        self.unhit_cells() > 0
    }

    /// Number of cells still holding an unhit ship segment.
    pub fn unhit_cells(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| matches!(c, Cell::Ship(_)))
            .count()
    }

    /// Check that every cell of `ship` is on the board and empty.
    pub fn check_placement(&self, ship: &Ship) -> Result<(), GameError> {
        for (x, y) in ship.cells() {
            if self.get(x, y)? != Cell::Empty {
                return Err(GameError::Overlap { x, y });
            }
        }
        Ok(())
    }

    /// Mark every cell of `ship` with its kind. Nothing is written on error.
    pub fn place(&mut self, ship: &Ship) -> Result<(), GameError> {
        self.check_placement(ship)?;
        for (x, y) in ship.cells() {
            self.cells[x as usize][y as usize] = Cell::Ship(ship.kind);
        }
        Ok(())
    }

    /// Reset every cell of `ship` to empty, whatever it holds.
    pub fn clear(&mut self, ship: &Ship) -> Result<(), GameError> {
        for (x, y) in ship.cells() {
            Self::index(x, y)?;
        }
        for (x, y) in ship.cells() {
            self.cells[x as usize][y as usize] = Cell::Empty;
        }
        Ok(())
    }

    /// Resolve a shot at `(x, y)`, marking the cell hit or miss.
    pub fn shoot(&mut self, x: i32, y: i32) -> Result<ShotOutcome, GameError> {
        let (cx, cy) = Self::index(x, y)?;
        let cell = &mut self.cells[cx][cy];
        match *cell {
            Cell::Hit | Cell::Miss => Err(GameError::DuplicateShot { x, y }),
            Cell::Empty => {
                *cell = Cell::Miss;
                Ok(ShotOutcome::Miss)
            }
            Cell::Ship(_) => {
                *cell = Cell::Hit;
                Ok(ShotOutcome::Hit)
            }
        }
    }

    /// Reset a single cell to empty.
    pub fn reset(&mut self, x: i32, y: i32) -> Result<(), GameError> {
        let (cx, cy) = Self::index(x, y)?;
        self.cells[cx][cy] = Cell::Empty;
        Ok(())
    }

    /// Pick a random anchor and direction for `kind` that fits the board.
    pub fn random_ship<R: Rng>(&self, rng: &mut R, kind: ShipKind) -> Result<Ship, GameError> {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            let x = rng.random_range(0..BOARD_SIZE as i32);
            let y = rng.random_range(0..BOARD_SIZE as i32);
            let ship = Ship::new(kind, x, y, direction);
            if self.check_placement(&ship).is_ok() {
                return Ok(ship);
            }
        }
        Err(GameError::UnableToPlaceShip)
    }

    fn index(x: i32, y: i32) -> Result<(usize, usize), GameError> {
        if in_bounds(x, y) {
            Ok((x as usize, y as usize))
        } else {
            Err(GameError::OutOfBounds { x, y })
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for line in self.cells.iter() {
            write!(f, "  ")?;
            for cell in line {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

/// Text view: one line per `x`, cells separated by a space.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.cells.iter().enumerate() {
            for (j, cell) in line.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.symbol())?;
            }
            if i + 1 < N {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
