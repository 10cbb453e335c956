use serde::{Deserialize, Serialize};

use crate::domain::*;
use crate::store::GameStore;
use crate::Ship;

/// Messages exchanged between the service and a client.
///
/// Requests and responses share one enum. On the wire each message is a
/// JSON object `{"type": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Message {
    CreateGame,
    RandomGame { seed: Option<u64> },
    ListGames,
    GetGame { game_id: GameId },
    BoardView { game_id: GameId },
    DeleteGame { game_id: GameId },
    AddShip { game_id: GameId, ship: Ship },
    ListShips { game_id: GameId },
    GetShip { game_id: GameId, ship_id: ShipId },
    RemoveShip { game_id: GameId, ship_id: ShipId },
    Fire { game_id: GameId, x: i32, y: i32 },
    ListShots { game_id: GameId },
    GetShot { game_id: GameId, shot_id: ShotId },
    RemoveShot { game_id: GameId, shot_id: ShotId },

    Game(GameSummary),
    Games(Vec<GameSummary>),
    Detail(GameDetail),
    View(String),
    Ship(ShipRecord),
    Ships(Vec<ShipRecord>),
    Shot(ShotRecord),
    Shots(Vec<ShotRecord>),
    /// Generic acknowledgement.
    Ack,
    /// The request failed; carries a message for the user.
    Error { error: String },
}

impl Message {
    /// Returns `true` for messages a client sends.
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Message::CreateGame
                | Message::RandomGame { .. }
                | Message::ListGames
                | Message::GetGame { .. }
                | Message::BoardView { .. }
                | Message::DeleteGame { .. }
                | Message::AddShip { .. }
                | Message::ListShips { .. }
                | Message::GetShip { .. }
                | Message::RemoveShip { .. }
                | Message::Fire { .. }
                | Message::ListShots { .. }
                | Message::GetShot { .. }
                | Message::RemoveShot { .. }
        )
    }
}

/// Operations a thin service layer offers on top of the board engine.
#[async_trait::async_trait]
pub trait GameApi: Send + Sync {
    async fn create_game(&self) -> anyhow::Result<GameSummary>;
    async fn random_game(&self, seed: Option<u64>) -> anyhow::Result<GameSummary>;
    async fn list_games(&self) -> anyhow::Result<Vec<GameSummary>>;
    async fn game(&self, game_id: GameId) -> anyhow::Result<GameDetail>;
    async fn board_view(&self, game_id: GameId) -> anyhow::Result<String>;
    async fn delete_game(&self, game_id: GameId) -> anyhow::Result<()>;
    async fn add_ship(&self, game_id: GameId, ship: Ship) -> anyhow::Result<ShipRecord>;
    async fn ships(&self, game_id: GameId) -> anyhow::Result<Vec<ShipRecord>>;
    async fn ship(&self, game_id: GameId, ship_id: ShipId) -> anyhow::Result<ShipRecord>;
    async fn remove_ship(&self, game_id: GameId, ship_id: ShipId) -> anyhow::Result<()>;
    async fn fire(&self, game_id: GameId, x: i32, y: i32) -> anyhow::Result<ShotRecord>;
    async fn shots(&self, game_id: GameId) -> anyhow::Result<Vec<ShotRecord>>;
    async fn shot(&self, game_id: GameId, shot_id: ShotId) -> anyhow::Result<ShotRecord>;
    async fn remove_shot(&self, game_id: GameId, shot_id: ShotId) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
impl GameApi for GameStore {
    async fn create_game(&self) -> anyhow::Result<GameSummary> {
        Ok(GameStore::create_game(self).await?)
    }

    async fn random_game(&self, seed: Option<u64>) -> anyhow::Result<GameSummary> {
        Ok(GameStore::random_game(self, seed).await?)
    }

    async fn list_games(&self) -> anyhow::Result<Vec<GameSummary>> {
        Ok(GameStore::list_games(self).await?)
    }

    async fn game(&self, game_id: GameId) -> anyhow::Result<GameDetail> {
        Ok(GameStore::game(self, game_id).await?)
    }

    async fn board_view(&self, game_id: GameId) -> anyhow::Result<String> {
        Ok(GameStore::board_view(self, game_id).await?)
    }

    async fn delete_game(&self, game_id: GameId) -> anyhow::Result<()> {
        Ok(GameStore::delete_game(self, game_id).await?)
    }

    async fn add_ship(&self, game_id: GameId, ship: Ship) -> anyhow::Result<ShipRecord> {
        Ok(GameStore::add_ship(self, game_id, ship).await?)
    }

    async fn ships(&self, game_id: GameId) -> anyhow::Result<Vec<ShipRecord>> {
        Ok(GameStore::ships(self, game_id).await?)
    }

    async fn ship(&self, game_id: GameId, ship_id: ShipId) -> anyhow::Result<ShipRecord> {
        Ok(GameStore::ship(self, game_id, ship_id).await?)
    }

    async fn remove_ship(&self, game_id: GameId, ship_id: ShipId) -> anyhow::Result<()> {
        Ok(GameStore::remove_ship(self, game_id, ship_id).await?)
    }

    async fn fire(&self, game_id: GameId, x: i32, y: i32) -> anyhow::Result<ShotRecord> {
        Ok(GameStore::fire(self, game_id, x, y).await?)
    }

    async fn shots(&self, game_id: GameId) -> anyhow::Result<Vec<ShotRecord>> {
        Ok(GameStore::shots(self, game_id).await?)
    }

    async fn shot(&self, game_id: GameId, shot_id: ShotId) -> anyhow::Result<ShotRecord> {
        Ok(GameStore::shot(self, game_id, shot_id).await?)
    }

    async fn remove_shot(&self, game_id: GameId, shot_id: ShotId) -> anyhow::Result<()> {
        Ok(GameStore::remove_shot(self, game_id, shot_id).await?)
    }
}
