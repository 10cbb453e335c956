#![cfg_attr(not(feature = "std"), no_std)]

mod board;
mod common;
mod config;
mod game;
mod ship;
#[cfg(feature = "std")]
pub mod domain;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod skeleton;
#[cfg(feature = "std")]
pub mod store;
#[cfg(feature = "std")]
pub mod stub;
#[cfg(feature = "std")]
pub mod transport;
pub mod prelude;

pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_at, level_from_env, LOG_ENV};
#[cfg(feature = "std")]
pub use protocol::{GameApi, Message};
#[cfg(feature = "std")]
pub use skeleton::Skeleton;
#[cfg(feature = "std")]
pub use store::{GameStore, StoreError};
#[cfg(feature = "std")]
pub use stub::Stub;
