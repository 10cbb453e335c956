//! Records exchanged between the store and its callers.

use serde::{Deserialize, Serialize};

use crate::{Board, Game, Ship, ShotOutcome};

pub type GameId = u64;
pub type ShipId = u64;
pub type ShotId = u64;

/// Listing entry for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: GameId,
    pub started: bool,
    pub ended: bool,
}

/// Full view of a game including its board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDetail {
    pub id: GameId,
    pub board: Board,
    pub started: bool,
    pub ended: bool,
}

impl GameDetail {
    pub fn new(id: GameId, game: &Game) -> Self {
        Self {
            id,
            board: *game.board(),
            started: game.started(),
            ended: game.ended(),
        }
    }
}

impl From<&GameDetail> for GameSummary {
    fn from(detail: &GameDetail) -> Self {
        GameSummary {
            id: detail.id,
            started: detail.started,
            ended: detail.ended,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipRecord {
    pub id: ShipId,
    pub ship: Ship,
}

/// A fired shot and what it hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotRecord {
    pub id: ShotId,
    pub x: i32,
    pub y: i32,
    pub outcome: ShotOutcome,
}
