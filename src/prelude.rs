//! Commonly used types and utilities for ease of import.

pub use crate::{
    Board, Cell, Direction, Game, GameError, Phase, Ship, ShipKind, Shot, ShotOutcome,
    StateReason, BOARD_SIZE, SHIP_KINDS,
};

#[cfg(feature = "std")]
pub use crate::{GameApi, GameStore, Message, Skeleton, StoreError, Stub};

#[cfg(feature = "std")]
pub use crate::transport::{in_memory::InMemoryTransport, lines::LinesTransport, Transport};
