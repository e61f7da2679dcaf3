use serde::{Deserialize, Serialize};

use super::cards::Card;

/// Inbound player action. The acting role is attached by the session, never by the client.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    CellClick {
        #[serde(rename = "cellId")]
        cell_id: usize,
    },
    PlayCard {
        #[serde(rename = "cardId")]
        card_id: Card,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_actions() {
        let click: Action = serde_json::from_str(r#"{"type":"cellClick","payload":{"cellId":17}}"#).unwrap();
        assert_eq!(click, Action::CellClick { cell_id: 17 });
        let play: Action = serde_json::from_str(r#"{"type":"playCard","payload":{"cardId":"shield"}}"#).unwrap();
        assert_eq!(play, Action::PlayCard { card_id: Card::Shield });
    }

    #[test]
    fn unknown_tags_do_not_parse() {
        assert!(serde_json::from_str::<Action>(r#"{"type":"flagCell","payload":{"cellId":1}}"#).is_err());
        assert!(serde_json::from_str::<Action>(r#"{"type":"playCard","payload":{"cardId":"nuke"}}"#).is_err());
    }
}
