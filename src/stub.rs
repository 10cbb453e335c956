use anyhow::anyhow;
use tokio::sync::Mutex;

use crate::domain::{
    GameDetail, GameId, GameSummary, ShipId, ShipRecord, ShotId, ShotRecord,
};
use crate::{protocol::GameApi, protocol::Message, transport::Transport, Ship};

/// Client side: a [`GameApi`] forwarding every call over a transport.
pub struct Stub<T: Transport> {
    transport: Mutex<T>,
}

impl<T: Transport> Stub<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Mutex::new(transport),
        }
    }

    /// Send a request and wait for its reply. A [`Message::Error`] reply
    /// becomes an `Err`.
    async fn call(&self, request: Message) -> anyhow::Result<Message> {
        let mut transport = self.transport.lock().await;
        transport.send(request).await?;
        match transport.recv().await? {
            Message::Error { error } => Err(anyhow!(error)),
            reply => Ok(reply),
        }
    }

    async fn ack(&self, request: Message) -> anyhow::Result<()> {
        match self.call(request).await? {
            Message::Ack => Ok(()),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(msg: Message) -> anyhow::Error {
    anyhow!("Unexpected message: {:?}", msg)
}

#[async_trait::async_trait]
impl<T: Transport> GameApi for Stub<T> {
    async fn create_game(&self) -> anyhow::Result<GameSummary> {
        match self.call(Message::CreateGame).await? {
            Message::Game(game) => Ok(game),
            other => Err(unexpected(other)),
        }
    }

    async fn random_game(&self, seed: Option<u64>) -> anyhow::Result<GameSummary> {
        match self.call(Message::RandomGame { seed }).await? {
            Message::Game(game) => Ok(game),
            other => Err(unexpected(other)),
        }
    }

    async fn list_games(&self) -> anyhow::Result<Vec<GameSummary>> {
        match self.call(Message::ListGames).await? {
            Message::Games(games) => Ok(games),
            other => Err(unexpected(other)),
        }
    }

    async fn game(&self, game_id: GameId) -> anyhow::Result<GameDetail> {
        match self.call(Message::GetGame { game_id }).await? {
            Message::Detail(detail) => Ok(detail),
            other => Err(unexpected(other)),
        }
    }

    async fn board_view(&self, game_id: GameId) -> anyhow::Result<String> {
        match self.call(Message::BoardView { game_id }).await? {
            Message::View(view) => Ok(view),
            other => Err(unexpected(other)),
        }
    }

    async fn delete_game(&self, game_id: GameId) -> anyhow::Result<()> {
        self.ack(Message::DeleteGame { game_id }).await
    }

    async fn add_ship(&self, game_id: GameId, ship: Ship) -> anyhow::Result<ShipRecord> {
        match self.call(Message::AddShip { game_id, ship }).await? {
            Message::Ship(record) => Ok(record),
            other => Err(unexpected(other)),
        }
    }

    async fn ships(&self, game_id: GameId) -> anyhow::Result<Vec<ShipRecord>> {
        match self.call(Message::ListShips { game_id }).await? {
            Message::Ships(ships) => Ok(ships),
            other => Err(unexpected(other)),
        }
    }

    async fn ship(&self, game_id: GameId, ship_id: ShipId) -> anyhow::Result<ShipRecord> {
        match self.call(Message::GetShip { game_id, ship_id }).await? {
            Message::Ship(record) => Ok(record),
            other => Err(unexpected(other)),
        }
    }

    async fn remove_ship(&self, game_id: GameId, ship_id: ShipId) -> anyhow::Result<()> {
        self.ack(Message::RemoveShip { game_id, ship_id }).await
    }

    async fn fire(&self, game_id: GameId, x: i32, y: i32) -> anyhow::Result<ShotRecord> {
        match self.call(Message::Fire { game_id, x, y }).await? {
            Message::Shot(shot) => Ok(shot),
            other => Err(unexpected(other)),
        }
    }

    async fn shots(&self, game_id: GameId) -> anyhow::Result<Vec<ShotRecord>> {
        match self.call(Message::ListShots { game_id }).await? {
            Message::Shots(shots) => Ok(shots),
            other => Err(unexpected(other)),
        }
    }

    async fn shot(&self, game_id: GameId, shot_id: ShotId) -> anyhow::Result<ShotRecord> {
        match self.call(Message::GetShot { game_id, shot_id }).await? {
            Message::Shot(shot) => Ok(shot),
            other => Err(unexpected(other)),
        }
    }

    async fn remove_shot(&self, game_id: GameId, shot_id: ShotId) -> anyhow::Result<()> {
        self.ack(Message::RemoveShot { game_id, shot_id }).await
    }
}
