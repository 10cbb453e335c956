//! In-memory registry of games with their ship and shot records.
//!
//! Every game record sits behind its own async mutex. An operation locks
//! the record, lets the engine validate and commit, and only then touches
//! the ship/shot records, so a rejected call persists nothing and two
//! calls on the same game never interleave.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::SHIP_KINDS;
use crate::domain::{GameDetail, GameId, GameSummary, ShipId, ShipRecord, ShotId, ShotRecord};
use crate::{Game, GameError, Phase, Ship, Shot};

/// Errors returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    UnknownGame(GameId),
    UnknownShip { game: GameId, ship: ShipId },
    UnknownShot { game: GameId, shot: ShotId },
    /// The engine rejected the operation.
    Game(GameError),
    /// The game map lock was poisoned by a panicking writer.
    Poisoned,
}

impl From<GameError> for StoreError {
    fn from(err: GameError) -> Self {
        StoreError::Game(err)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UnknownGame(id) => write!(f, "Game {} does not exist", id),
            StoreError::UnknownShip { game, ship } => {
                write!(f, "Ship {} does not exist on game {}", ship, game)
            }
            StoreError::UnknownShot { game, shot } => {
                write!(f, "Shot {} does not exist on game {}", shot, game)
            }
            StoreError::Game(e) => write!(f, "{}", e),
            StoreError::Poisoned => write!(f, "Game registry lock poisoned"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Game(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GameRecord {
    id: GameId,
    game: Game,
    ships: BTreeMap<ShipId, Ship>,
    shots: BTreeMap<ShotId, Shot>,
}

impl GameRecord {
    fn new(id: GameId, game: Game) -> Self {
        Self {
            id,
            game,
            ships: BTreeMap::new(),
            shots: BTreeMap::new(),
        }
    }

    /// Shot record with its outcome read off the board.
    fn shot_record(&self, id: ShotId, shot: Shot) -> Option<ShotRecord> {
        let outcome = self.game.board().get(shot.x, shot.y).ok()?.outcome()?;
        Some(ShotRecord {
            id,
            x: shot.x,
            y: shot.y,
            outcome,
        })
    }

    fn summary(&self) -> GameSummary {
        GameSummary {
            id: self.id,
            started: self.game.started(),
            ended: self.game.ended(),
        }
    }
}

/// Serialized form of the whole store.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    next_game: u64,
    next_ship: u64,
    next_shot: u64,
    games: Vec<GameRecord>,
}

type SharedRecord = Arc<Mutex<GameRecord>>;

/// Registry of games. Ids are allocated per record type, starting at 1.
pub struct GameStore {
    games: RwLock<BTreeMap<GameId, SharedRecord>>,
    next_game: AtomicU64,
    next_ship: AtomicU64,
    next_shot: AtomicU64,
}

impl GameStore {
    pub fn new() -> Self {
        Self {
            games: RwLock::new(BTreeMap::new()),
            next_game: AtomicU64::new(1),
            next_ship: AtomicU64::new(1),
            next_shot: AtomicU64::new(1),
        }
    }

    fn record(&self, id: GameId) -> Result<SharedRecord, StoreError> {
        let games = self.games.read().map_err(|_| StoreError::Poisoned)?;
        games.get(&id).cloned().ok_or(StoreError::UnknownGame(id))
    }

    fn all_records(&self) -> Result<Vec<SharedRecord>, StoreError> {
        let games = self.games.read().map_err(|_| StoreError::Poisoned)?;
        Ok(games.values().rev().cloned().collect())
    }

    fn insert(&self, record: GameRecord) -> Result<GameSummary, StoreError> {
        let summary = record.summary();
        let mut games = self.games.write().map_err(|_| StoreError::Poisoned)?;
        games.insert(record.id, Arc::new(Mutex::new(record)));
        Ok(summary)
    }

    /// Create an empty game in setup.
    pub async fn create_game(&self) -> Result<GameSummary, StoreError> {
        let id = self.next_game.fetch_add(1, Ordering::SeqCst);
        let summary = self.insert(GameRecord::new(id, Game::new()))?;
        info!("created game {}", id);
        Ok(summary)
    }

    /// Create a game with one ship of each kind at random positions.
    /// A fixed `seed` makes the layout reproducible.
    pub async fn random_game(&self, seed: Option<u64>) -> Result<GameSummary, StoreError> {
        let mut rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let id = self.next_game.fetch_add(1, Ordering::SeqCst);
        let mut record = GameRecord::new(id, Game::new());
        for kind in SHIP_KINDS {
            let ship = record.game.board().random_ship(&mut rng, kind)?;
            record.game.place_ship(&ship)?;
            let ship_id = self.next_ship.fetch_add(1, Ordering::SeqCst);
            record.ships.insert(ship_id, ship);
        }
        let summary = self.insert(record)?;
        info!("created random game {} (seed {:?})", id, seed);
        Ok(summary)
    }

    /// All games, newest first.
    pub async fn list_games(&self) -> Result<Vec<GameSummary>, StoreError> {
        let mut out = Vec::new();
        for record in self.all_records()? {
            out.push(record.lock().await.summary());
        }
        Ok(out)
    }

    pub async fn game(&self, id: GameId) -> Result<GameDetail, StoreError> {
        let record = self.record(id)?;
        let record = record.lock().await;
        Ok(GameDetail::new(record.id, &record.game))
    }

    /// Text view of the board, one line per `x`.
    pub async fn board_view(&self, id: GameId) -> Result<String, StoreError> {
        let record = self.record(id)?;
        let record = record.lock().await;
        Ok(record.game.board().to_string())
    }

    /// Delete a game together with its ships and shots.
    pub async fn delete_game(&self, id: GameId) -> Result<(), StoreError> {
        let removed = {
            let mut games = self.games.write().map_err(|_| StoreError::Poisoned)?;
            games.remove(&id)
        };
        match removed {
            Some(_) => {
                info!("deleted game {}", id);
                Ok(())
            }
            None => Err(StoreError::UnknownGame(id)),
        }
    }

    pub async fn add_ship(&self, id: GameId, ship: Ship) -> Result<ShipRecord, StoreError> {
        let record = self.record(id)?;
        let mut record = record.lock().await;
        if let Err(e) = record.game.place_ship(&ship) {
            debug!("game {}: rejected {}: {}", id, ship, e);
            return Err(e.into());
        }
        let ship_id = self.next_ship.fetch_add(1, Ordering::SeqCst);
        record.ships.insert(ship_id, ship);
        debug!("game {}: placed ship {} ({})", id, ship_id, ship);
        Ok(ShipRecord { id: ship_id, ship })
    }

    /// Ships of a game, newest first.
    pub async fn ships(&self, id: GameId) -> Result<Vec<ShipRecord>, StoreError> {
        let record = self.record(id)?;
        let record = record.lock().await;
        Ok(record
            .ships
            .iter()
            .rev()
            .map(|(&ship_id, &ship)| ShipRecord { id: ship_id, ship })
            .collect())
    }

    pub async fn ship(&self, id: GameId, ship_id: ShipId) -> Result<ShipRecord, StoreError> {
        let record = self.record(id)?;
        let record = record.lock().await;
        record
            .ships
            .get(&ship_id)
            .map(|&ship| ShipRecord { id: ship_id, ship })
            .ok_or(StoreError::UnknownShip { game: id, ship: ship_id })
    }

    pub async fn remove_ship(&self, id: GameId, ship_id: ShipId) -> Result<(), StoreError> {
        let record = self.record(id)?;
        let mut record = record.lock().await;
        let ship = *record
            .ships
            .get(&ship_id)
            .ok_or(StoreError::UnknownShip { game: id, ship: ship_id })?;
        if let Err(e) = record.game.remove_ship(&ship) {
            debug!("game {}: refused to remove ship {}: {}", id, ship_id, e);
            return Err(e.into());
        }
        record.ships.remove(&ship_id);
        debug!("game {}: removed ship {}", id, ship_id);
        Ok(())
    }

    /// Fire at `(x, y)` and record the shot.
    pub async fn fire(&self, id: GameId, x: i32, y: i32) -> Result<ShotRecord, StoreError> {
        let record = self.record(id)?;
        let mut record = record.lock().await;
        let before = record.game.phase();
        let outcome = match record.game.fire_shot(x, y) {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!("game {}: rejected shot at ({}, {}): {}", id, x, y, e);
                return Err(e.into());
            }
        };
        let after = record.game.phase();
        if before != after {
            info!("game {}: {:?} -> {:?}", id, before, after);
        }
        let shot_id = self.next_shot.fetch_add(1, Ordering::SeqCst);
        record.shots.insert(shot_id, Shot::new(x, y));
        let shot = ShotRecord {
            id: shot_id,
            x,
            y,
            outcome,
        };
        debug!("game {}: shot {} at ({}, {}) {:?}", id, shot_id, x, y, outcome);
        Ok(shot)
    }

    /// Shots of a game, newest first.
    pub async fn shots(&self, id: GameId) -> Result<Vec<ShotRecord>, StoreError> {
        let record = self.record(id)?;
        let record = record.lock().await;
        Ok(record
            .shots
            .iter()
            .rev()
            .filter_map(|(&shot_id, &shot)| record.shot_record(shot_id, shot))
            .collect())
    }

    pub async fn shot(&self, id: GameId, shot_id: ShotId) -> Result<ShotRecord, StoreError> {
        let record = self.record(id)?;
        let record = record.lock().await;
        record
            .shots
            .get(&shot_id)
            .and_then(|&shot| record.shot_record(shot_id, shot))
            .ok_or(StoreError::UnknownShot { game: id, shot: shot_id })
    }

    pub async fn remove_shot(&self, id: GameId, shot_id: ShotId) -> Result<(), StoreError> {
        let record = self.record(id)?;
        let mut record = record.lock().await;
        let shot = *record
            .shots
            .get(&shot_id)
            .ok_or(StoreError::UnknownShot { game: id, shot: shot_id })?;
        if let Err(e) = record.game.remove_shot(&shot) {
            debug!("game {}: refused to remove shot {}: {}", id, shot_id, e);
            return Err(e.into());
        }
        record.shots.remove(&shot_id);
        Ok(())
    }

    /// Phase of a game, for callers that only need the lifecycle.
    pub async fn phase(&self, id: GameId) -> Result<Phase, StoreError> {
        let record = self.record(id)?;
        let phase = record.lock().await.game.phase();
        Ok(phase)
    }

    /// Encode every game record with bincode.
    pub async fn snapshot(&self) -> anyhow::Result<Vec<u8>> {
        let mut games = Vec::new();
        for record in self.all_records()?.into_iter().rev() {
            games.push(record.lock().await.clone());
        }
        let snapshot = Snapshot {
            next_game: self.next_game.load(Ordering::SeqCst),
            next_ship: self.next_ship.load(Ordering::SeqCst),
            next_shot: self.next_shot.load(Ordering::SeqCst),
            games,
        };
        Ok(bincode::serialize(&snapshot)?)
    }

    /// Rebuild a store from bytes produced by [`GameStore::snapshot`].
    pub fn restore(bytes: &[u8]) -> anyhow::Result<Self> {
        let snapshot: Snapshot = bincode::deserialize(bytes)?;
        let games = snapshot
            .games
            .into_iter()
            .map(|record| (record.id, Arc::new(Mutex::new(record))))
            .collect();
        Ok(Self {
            games: RwLock::new(games),
            next_game: AtomicU64::new(snapshot.next_game),
            next_ship: AtomicU64::new(snapshot.next_ship),
            next_shot: AtomicU64::new(snapshot.next_shot),
        })
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}
