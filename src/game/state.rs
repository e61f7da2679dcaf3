//! The per-match aggregate mutated by the dispatcher.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::{Board, Cell};
use super::cards::Card;
use super::error::EngineError;
use super::rules::GameConfig;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role { A, B }

impl Role {
    pub fn other(self) -> Role {
        match self {
            Role::A => Role::B,
            Role::B => Role::A,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::A => f.write_str("A"),
            Role::B => f.write_str("B"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[serde(rename = "PLACING")]
    Placing,
    #[serde(rename = "TURN")]
    Turn,
    #[serde(rename = "GAMEOVER")]
    GameOver,
    #[serde(rename = "TIE")]
    Tie,
}

impl Phase {
    pub fn is_finished(self) -> bool { matches!(self, Phase::GameOver | Phase::Tie) }
}

/// Multi-click interactions pending inside a turn.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionState {
    #[default]
    None,
    Targeting { card: Card, player: Role, prompt: String },
    Relocating { player: Role, prompt: String },
}

/// Forces `player` to survive `remaining_steps` more steps before the turn passes.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DoubleJeopardy {
    pub player: Role,
    pub remaining_steps: u8,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Player {
    pub hand: Vec<Card>,
    pub shield: u32,
}

impl Player {
    /// Adds `card` unless the hand is already at `cap`.
    pub fn draw(&mut self, card: Card, cap: usize) -> bool {
        if self.hand.len() >= cap { return false; }
        self.hand.push(card);
        true
    }

    /// Removes one copy of `card`, reporting whether it was held.
    pub fn take(&mut self, card: Card) -> bool {
        match self.hand.iter().position(|c| *c == card) {
            Some(idx) => { self.hand.remove(idx); true }
            None => false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Players {
    #[serde(rename = "A")]
    pub a: Player,
    #[serde(rename = "B")]
    pub b: Player,
}

impl Players {
    pub fn get(&self, role: Role) -> &Player {
        match role {
            Role::A => &self.a,
            Role::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, role: Role) -> &mut Player {
        match role {
            Role::A => &mut self.a,
            Role::B => &mut self.b,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub phase: Phase,
    pub turn: Role,
    pub action_state: ActionState,
    pub double_jeopardy: Option<DoubleJeopardy>,
    /// Blackout waiting for its target's next turn.
    pub blackout_for: Option<Role>,
    /// Player whose current turn is under a consumed Blackout.
    pub blacked_out: Option<Role>,
    pub mine_placement_count: usize,
    pub processing: bool,
    pub wormhole_in_flight: bool,
    pub prompt: Option<String>,
    pub board: Board,
    pub players: Players,
}

impl SessionState {
    /// Fresh match: generated board, both hands dealt, placement phase.
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let board = Board::generate(config, rng);
        let mut players = Players::default();
        for _ in 0..config.initial_hand {
            // the opening deal ignores the hand cap
            players.a.hand.push(Card::random(rng));
            players.b.hand.push(Card::random(rng));
        }
        Self {
            phase: Phase::Placing,
            turn: Role::A,
            action_state: ActionState::None,
            double_jeopardy: None,
            blackout_for: None,
            blacked_out: None,
            mine_placement_count: 0,
            processing: false,
            wormhole_in_flight: false,
            prompt: None,
            board,
            players,
        }
    }

    pub fn player(&self, role: Role) -> &Player { self.players.get(role) }

    pub fn player_mut(&mut self, role: Role) -> &mut Player { self.players.get_mut(role) }

    pub fn cell(&self, id: usize) -> Result<&Cell, EngineError> {
        self.board.get(id).ok_or(EngineError::UnknownCell(id))
    }

    pub fn cell_mut(&mut self, id: usize) -> Result<&mut Cell, EngineError> {
        self.board.get_mut(id).ok_or(EngineError::UnknownCell(id))
    }

    /// Appends to the prompt shown after this action.
    pub fn push_prompt(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.prompt = Some(match self.prompt.take() {
            Some(prev) => format!("{prev} {text}"),
            None => text,
        });
    }

    /// Unrevealed cells that are not mines. Reaching zero is a tie.
    pub fn unrevealed_safe_cells(&self) -> usize {
        self.board.count_where(|c| !c.is_mine && !c.is_revealed)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn new_match_starts_in_placement() {
        let config = GameConfig::default();
        let state = SessionState::new(&config, &mut StdRng::seed_from_u64(1));
        assert_eq!(state.phase, Phase::Placing);
        assert_eq!(state.turn, Role::A);
        assert_eq!(state.action_state, ActionState::None);
        for role in [Role::A, Role::B] {
            assert_eq!(state.player(role).hand.len(), config.initial_hand);
            assert_eq!(state.player(role).shield, 0);
        }
    }

    #[test]
    fn draw_respects_cap() {
        let mut player = Player::default();
        for _ in 0..5 { assert!(player.draw(Card::Skip, 5)); }
        assert!(!player.draw(Card::Shield, 5));
        assert_eq!(player.hand.len(), 5);
    }

    #[test]
    fn take_removes_a_single_copy() {
        let mut player = Player { hand: vec![Card::Skip, Card::Shield, Card::Skip], shield: 0 };
        assert!(player.take(Card::Skip));
        assert_eq!(player.hand, vec![Card::Shield, Card::Skip]);
        assert!(!player.take(Card::Decoy));
    }

    #[test]
    fn snapshot_uses_wire_names() {
        let config = GameConfig::default();
        let state = SessionState::new(&config, &mut StdRng::seed_from_u64(1));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["phase"], "PLACING");
        assert_eq!(json["actionState"]["type"], "none");
        assert!(json["players"]["A"]["hand"].is_array());
        assert_eq!(json["board"][0]["isRevealed"], false);
    }
}
