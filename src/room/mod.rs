//! Rooms: pairing two connections and owning the match they play.

pub mod manager;
pub mod session;

pub use manager::RoomManager;
pub use session::{Outbox, Room};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomError {
    #[error("room not found")]
    NotFound,
    #[error("room full")]
    Full,
    #[error("waiting for an opponent")]
    NotReady,
    #[error("match has not started")]
    NotStarted,
    #[error("player is not seated in this room")]
    NotSeated,
}
