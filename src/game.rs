use crate::{
    board::Board,
    common::{GameError, ShotOutcome, StateReason},
    ship::Ship,
};

/// Lifecycle phase of a game. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// No shot fired yet; ships may be added and removed.
    #[default]
    Setup,
    /// Shots are being fired; the ship layout is frozen.
    Active,
    /// Every ship cell has been hit.
    Finished,
}

/// A shot record as the engine needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Shot {
    pub x: i32,
    pub y: i32,
}

impl Shot {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Board engine for one game: the grid plus its phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    board: Board,
    phase: Phase,
}

impl Game {
    /// A fresh game in setup with an empty board.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            phase: Phase::Setup,
        }
    }

    /// Rebuild a game from stored parts.
    pub fn from_parts(board: Board, phase: Phase) -> Self {
        Self { board, phase }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `true` once the first shot has been fired.
    pub fn started(&self) -> bool {
        self.phase != Phase::Setup
    }

    /// `true` once every ship cell has been hit.
    pub fn ended(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Place `ship` on the board. Only allowed during setup.
    pub fn place_ship(&mut self, ship: &Ship) -> Result<&Board, GameError> {
        match self.phase {
            Phase::Setup => {}
            Phase::Active => return Err(GameError::State(StateReason::NotInSetup)),
            Phase::Finished => return Err(GameError::State(StateReason::AlreadyEnded)),
        }
        self.board.place(ship)?;
        Ok(&self.board)
    }

    /// Clear the cells of `ship`. Only allowed during setup.
    pub fn remove_ship(&mut self, ship: &Ship) -> Result<&Board, GameError> {
        self.ensure_setup()?;
        self.board.clear(ship)?;
        Ok(&self.board)
    }

    /// Fire at `(x, y)`. The first valid shot starts the game, the shot
    /// that hits the last ship segment ends it.
    pub fn fire_shot(&mut self, x: i32, y: i32) -> Result<ShotOutcome, GameError> {
        if self.phase == Phase::Finished {
            return Err(GameError::State(StateReason::AlreadyEnded));
        }
        let outcome = self.board.shoot(x, y)?;
        if self.phase == Phase::Setup {
            self.phase = Phase::Active;
        }
        if outcome == ShotOutcome::Hit && !self.board.ships_afloat() {
            self.phase = Phase::Finished;
        }
        Ok(outcome)
    }

    /// Reset the cell of `shot`. Refused once the game has started.
    pub fn remove_shot(&mut self, shot: &Shot) -> Result<&Board, GameError> {
        self.ensure_setup()?;
        self.board.reset(shot.x, shot.y)?;
        Ok(&self.board)
    }

    fn ensure_setup(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::Setup => Ok(()),
            Phase::Active => Err(GameError::State(StateReason::AlreadyStarted)),
            Phase::Finished => Err(GameError::State(StateReason::AlreadyEnded)),
        }
    }
}
