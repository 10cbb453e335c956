//! Ship kinds, directions and the cells a placed ship occupies.

use core::fmt;

use crate::common::UnknownSymbol;

/// The five fixed ship categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "char", try_from = "char")
)]
pub enum ShipKind {
    AircraftCarrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipKind {
    /// Single-letter symbol used on the board and on the wire.
    pub const fn symbol(self) -> char {
        match self {
            ShipKind::AircraftCarrier => 'a',
            ShipKind::Battleship => 'b',
            ShipKind::Cruiser => 'c',
            ShipKind::Submarine => 's',
            ShipKind::Destroyer => 'd',
        }
    }

    /// Number of cells the ship occupies.
    pub const fn length(self) -> usize {
        match self {
            ShipKind::AircraftCarrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser | ShipKind::Submarine => 3,
            ShipKind::Destroyer => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::AircraftCarrier => "Aircraft Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'a' => Some(ShipKind::AircraftCarrier),
            'b' => Some(ShipKind::Battleship),
            'c' => Some(ShipKind::Cruiser),
            's' => Some(ShipKind::Submarine),
            'd' => Some(ShipKind::Destroyer),
            _ => None,
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ShipKind> for char {
    fn from(kind: ShipKind) -> Self {
        kind.symbol()
    }
}

impl TryFrom<char> for ShipKind {
    type Error = UnknownSymbol;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        ShipKind::from_symbol(symbol).ok_or(UnknownSymbol(symbol))
    }
}

/// Which way a ship extends from its anchor.
///
/// `North`/`South` walk along `y`, `East`/`West` along `x`. `North` and
/// `West` head toward decreasing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "char", try_from = "char")
)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const fn letter(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::South => 's',
            Direction::East => 'e',
            Direction::West => 'w',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'n' => Some(Direction::North),
            's' => Some(Direction::South),
            'e' => Some(Direction::East),
            'w' => Some(Direction::West),
            _ => None,
        }
    }

    /// Unit step `(dx, dy)` taken per ship segment.
    pub const fn step(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

impl From<Direction> for char {
    fn from(direction: Direction) -> Self {
        direction.letter()
    }
}

impl TryFrom<char> for Direction {
    type Error = UnknownSymbol;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        Direction::from_letter(letter).ok_or(UnknownSymbol(letter))
    }
}

/// A ship's geometry: kind, anchor cell and direction.
///
/// Coordinates are signed so that a ship hanging off the board can be
/// described and rejected by the engine instead of wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    pub kind: ShipKind,
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

impl Ship {
    pub const fn new(kind: ShipKind, x: i32, y: i32, direction: Direction) -> Self {
        Self {
            kind,
            x,
            y,
            direction,
        }
    }

    pub fn anchor(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Ordered cells starting at the anchor, one step per segment.
    pub fn cells(&self) -> Cells {
        let (dx, dy) = self.direction.step();
        Cells {
            x: self.x,
            y: self.y,
            dx,
            dy,
            remaining: self.kind.length(),
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.cells().any(|cell| cell == (x, y))
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) heading {}",
            self.kind,
            self.x,
            self.y,
            self.direction.letter()
        )
    }
}

/// Iterator over the `(x, y)` cells of a ship.
#[derive(Debug, Clone)]
pub struct Cells {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    remaining: usize,
}

impl Iterator for Cells {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let cell = (self.x, self.y);
        self.remaining -= 1;
        if self.remaining > 0 {
            // saturated cells are off the board anyway
            self.x = self.x.saturating_add(self.dx);
            self.y = self.y.saturating_add(self.dy);
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Cells {}
