//! WebSocket message shapes.

use serde::{Deserialize, Serialize};

use crate::game::{Action, Card, Role, StateView};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ClientMessage {
    CellClick {
        #[serde(rename = "cellId")]
        cell_id: usize,
    },
    PlayCard {
        #[serde(rename = "cardId")]
        card_id: Card,
    },
    Restart,
    Ping,
}

impl ClientMessage {
    pub fn action(self) -> Option<Action> {
        match self {
            ClientMessage::CellClick { cell_id } => Some(Action::CellClick { cell_id }),
            ClientMessage::PlayCard { card_id } => Some(Action::PlayCard { card_id }),
            ClientMessage::Restart | ClientMessage::Ping => None,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Waiting,
    GameStart { role: Role, state: StateView },
    State { state: StateView },
    OpponentDisconnected,
    Error { message: String },
    Pong,
}
