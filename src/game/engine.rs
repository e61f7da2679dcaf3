//! Action validation and dispatch.

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::action::Action;
use super::error::EngineError;
use super::rules::GameConfig;
use super::state::{ActionState, Phase, Role, SessionState};
use super::view::StateView;

/// What the session has to do after an action was handled.
///
/// Every outcome is followed by a broadcast, including rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Turn, phase or guard check failed; nothing changed.
    Rejected,
    Applied,
    /// A wormhole was entered. The guard stays held until
    /// [`Game::complete_transit`] is called with `entry`.
    Transit { entry: usize },
}

/// One match: its state plus the rng and parameters that drive it.
#[derive(Debug, Clone)]
pub struct Game {
    pub(super) config: GameConfig,
    pub(super) rng: StdRng,
    pub(super) state: SessionState,
}

impl Game {
    pub fn new(config: GameConfig, mut rng: StdRng) -> Self {
        let state = SessionState::new(&config, &mut rng);
        Self { config, rng, state }
    }

    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: GameConfig) -> Self {
        Self::new(config, StdRng::from_entropy())
    }

    /// Replaces the match wholesale with a freshly generated one.
    pub fn restart(&mut self) {
        self.state = SessionState::new(&self.config, &mut self.rng);
    }

    pub fn config(&self) -> &GameConfig { &self.config }

    pub fn state(&self) -> &SessionState { &self.state }

    /// Direct access for arranging scenarios; normal play goes through [`Game::handle`].
    pub fn state_mut(&mut self) -> &mut SessionState { &mut self.state }

    pub fn view(&self, role: Role) -> StateView { StateView::for_role(&self.state, role) }

    /// Validates and applies one action from `role`.
    ///
    /// Faults inside a handler are logged and the action completes as a
    /// no-op; whatever was mutated before the fault stays.
    pub fn handle(&mut self, role: Role, action: Action) -> Outcome {
        let state = &self.state;
        if state.processing {
            tracing::debug!(%role, ?action, "rejected: another action is in progress");
            return Outcome::Rejected;
        }
        if state.phase.is_finished() {
            tracing::debug!(%role, ?action, phase = ?state.phase, "rejected: match is over");
            return Outcome::Rejected;
        }
        if role != state.turn {
            tracing::debug!(%role, ?action, "rejected: not this player's turn");
            return Outcome::Rejected;
        }

        self.state.prompt = None;
        self.state.processing = true;
        let outcome = match self.dispatch(role, action) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(%role, ?action, error = %err, "action faulted, completing as no-op");
                self.state.wormhole_in_flight = false;
                Outcome::Applied
            }
        };
        if !self.state.wormhole_in_flight {
            self.state.processing = false;
        }
        outcome
    }

    fn dispatch(&mut self, role: Role, action: Action) -> Result<Outcome, EngineError> {
        match action {
            Action::CellClick { cell_id } => {
                let revealed = self.state.cell(cell_id)?.is_revealed;
                match self.state.action_state.clone() {
                    ActionState::Targeting { card, player, .. } => self.resolve_target(player, card, cell_id),
                    ActionState::Relocating { player, .. } => self.resolve_relocation(player, cell_id),
                    ActionState::None => match self.state.phase {
                        Phase::Placing => self.place_mine(role, cell_id),
                        Phase::Turn if !revealed => self.step(role, cell_id),
                        _ => Ok(Outcome::Applied),
                    },
                }
            }
            Action::PlayCard { card_id } => {
                if self.state.action_state != ActionState::None {
                    return Ok(Outcome::Applied);
                }
                if self.state.phase != Phase::Turn {
                    self.state.push_prompt("Cards can only be played once every mine is buried.");
                    return Ok(Outcome::Applied);
                }
                self.play_card(role, card_id)
            }
        }
    }

    /// Second half of a wormhole transit: picks the landing cell, resolves
    /// it, completes the step and releases the guard.
    pub fn complete_transit(&mut self, entry: usize) -> Result<(), EngineError> {
        if !self.state.wormhole_in_flight {
            return Err(EngineError::NoTransit);
        }
        let result = self.land(entry);
        self.abort_transit();
        result
    }

    /// Releases the guard held by a transit without landing.
    pub fn abort_transit(&mut self) {
        self.state.wormhole_in_flight = false;
        self.state.processing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::Card;

    fn game() -> Game { Game::seeded(GameConfig::default(), 11) }

    fn plain_cells(game: &Game) -> Vec<usize> {
        game.state().board.ids_where(|c| c.is_plain_terrain() && !c.is_mine)
    }

    #[test]
    fn wrong_player_is_rejected() {
        let mut game = game();
        let before = game.state().clone();
        let id = plain_cells(&game)[0];
        assert_eq!(game.handle(Role::B, Action::CellClick { cell_id: id }), Outcome::Rejected);
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn held_guard_rejects() {
        let mut game = game();
        game.state_mut().processing = true;
        let id = plain_cells(&game)[0];
        assert_eq!(game.handle(Role::A, Action::CellClick { cell_id: id }), Outcome::Rejected);
        assert_eq!(game.state().mine_placement_count, 0);
    }

    #[test]
    fn finished_match_rejects() {
        let mut game = game();
        game.state_mut().phase = Phase::Tie;
        assert_eq!(game.handle(Role::A, Action::CellClick { cell_id: 0 }), Outcome::Rejected);
    }

    #[test]
    fn out_of_range_cell_is_a_no_op_that_releases_the_guard() {
        let mut game = game();
        let before = game.state().clone();
        assert_eq!(game.handle(Role::A, Action::CellClick { cell_id: 10_000 }), Outcome::Applied);
        assert!(!game.state().processing);
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn cards_wait_for_the_turn_phase() {
        let mut game = game();
        game.state_mut().players.a.hand = vec![Card::Shield];
        game.handle(Role::A, Action::PlayCard { card_id: Card::Shield });
        assert_eq!(game.state().players.a.hand, vec![Card::Shield]);
        assert_eq!(game.state().players.a.shield, 0);
        assert!(game.state().prompt.is_some());
    }

    #[test]
    fn complete_transit_without_transit_is_an_error() {
        let mut game = game();
        assert_eq!(game.complete_transit(0), Err(EngineError::NoTransit));
    }

    #[test]
    fn restart_replaces_the_match() {
        let mut game = game();
        let id = plain_cells(&game)[0];
        game.handle(Role::A, Action::CellClick { cell_id: id });
        assert_eq!(game.state().mine_placement_count, 1);
        game.restart();
        assert_eq!(game.state().mine_placement_count, 0);
        assert_eq!(game.state().phase, Phase::Placing);
    }
}
