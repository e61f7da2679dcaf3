//! Registry of rooms and matchmaking.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;
use ulid::Ulid;

use crate::game::{GameConfig, Role};
use crate::protocol::ServerMessage;

use super::{Outbox, Room};

/// Owns every live room. The engine never sees this map; it only gets the
/// match a room hands it.
#[derive(Debug)]
pub struct RoomManager {
    rooms: DashMap<String, Arc<Room>>,
    /// Room holding a single player, if any.
    waiting: Mutex<Option<String>>,
    config: GameConfig,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RoomStats {
    pub rooms: usize,
    pub waiting: bool,
}

impl RoomManager {
    pub fn new(config: GameConfig) -> Self {
        Self { rooms: DashMap::new(), waiting: Mutex::new(None), config }
    }

    /// Seats a new connection: pairs it with the waiting player if there is
    /// one and starts their match, otherwise opens a room and waits.
    pub fn join(&self, tx: Outbox) -> (Arc<Room>, Role) {
        let mut waiting = self.waiting.lock();
        if let Some(room) = waiting.take().and_then(|id| self.get(&id)) {
            if let Ok(role) = room.seat(tx.clone()) {
                if let Err(err) = room.start() {
                    tracing::warn!(room = %room.id, error = %err, "could not start match");
                }
                return (room, role);
            }
        }

        let room = Arc::new(Room::new(new_room_id(), self.config.clone()));
        // a fresh room always has seat A free
        let role = room.seat(tx).unwrap_or(Role::A);
        room.send_to(role, ServerMessage::Waiting);
        self.rooms.insert(room.id.clone(), room.clone());
        *waiting = Some(room.id.clone());
        tracing::info!(room = %room.id, "room created, waiting for opponent");
        (room, role)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Room>> {
        self.rooms.get(id).map(|r| r.clone())
    }

    /// Tears down a room after one of its players left.
    pub fn leave(&self, id: &str, role: Role) {
        {
            let mut waiting = self.waiting.lock();
            if waiting.as_deref() == Some(id) {
                *waiting = None;
            }
        }
        if let Some((_, room)) = self.rooms.remove(id) {
            room.close(role);
        }
    }

    pub fn stats(&self) -> RoomStats {
        RoomStats { rooms: self.rooms.len(), waiting: self.waiting.lock().is_some() }
    }
}

fn new_room_id() -> String {
    format!("room-{}", Ulid::new().to_string().to_lowercase())
}
