use log::{debug, warn};

use crate::{protocol::GameApi, protocol::Message, transport::Transport};

/// Server side: answers requests arriving on a transport with a [`GameApi`].
pub struct Skeleton<E: GameApi, T: Transport> {
    api: E,
    transport: T,
}

impl<E: GameApi, T: Transport> Skeleton<E, T> {
    pub fn new(api: E, transport: T) -> Self {
        Self { api, transport }
    }

    pub fn api(&self) -> &E {
        &self.api
    }

    pub fn into_inner(self) -> (E, T) {
        (self.api, self.transport)
    }

    /// Serve until the transport closes.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        while let Ok(msg) = self.transport.recv().await {
            let reply = respond(&self.api, msg).await;
            self.transport.send(reply).await?;
        }
        debug!("transport closed, skeleton stopping");
        Ok(())
    }
}

/// Answer one message with `api`. Failures become [`Message::Error`].
pub async fn respond<E: GameApi + ?Sized>(api: &E, msg: Message) -> Message {
    match dispatch(api, msg).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("request failed: {}", e);
            Message::Error {
                error: e.to_string(),
            }
        }
    }
}

async fn dispatch<E: GameApi + ?Sized>(api: &E, msg: Message) -> anyhow::Result<Message> {
    let reply = match msg {
        Message::CreateGame => Message::Game(api.create_game().await?),
        Message::RandomGame { seed } => Message::Game(api.random_game(seed).await?),
        Message::ListGames => Message::Games(api.list_games().await?),
        Message::GetGame { game_id } => Message::Detail(api.game(game_id).await?),
        Message::BoardView { game_id } => Message::View(api.board_view(game_id).await?),
        Message::DeleteGame { game_id } => {
            api.delete_game(game_id).await?;
            Message::Ack
        }
        Message::AddShip { game_id, ship } => Message::Ship(api.add_ship(game_id, ship).await?),
        Message::ListShips { game_id } => Message::Ships(api.ships(game_id).await?),
        Message::GetShip { game_id, ship_id } => {
            Message::Ship(api.ship(game_id, ship_id).await?)
        }
        Message::RemoveShip { game_id, ship_id } => {
            api.remove_ship(game_id, ship_id).await?;
            Message::Ack
        }
        Message::Fire { game_id, x, y } => Message::Shot(api.fire(game_id, x, y).await?),
        Message::ListShots { game_id } => Message::Shots(api.shots(game_id).await?),
        Message::GetShot { game_id, shot_id } => {
            Message::Shot(api.shot(game_id, shot_id).await?)
        }
        Message::RemoveShot { game_id, shot_id } => {
            api.remove_shot(game_id, shot_id).await?;
            Message::Ack
        }
        other => return Err(anyhow::anyhow!("Unexpected message: {:?}", other)),
    };
    Ok(reply)
}
