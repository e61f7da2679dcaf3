//! Turn completion, end-turn and match-end checks.

use super::board::Revealer;
use super::state::{ActionState, Phase, Role, SessionState};

pub const DOUBLE_JEOPARDY_STEPS: u8 = 2;

impl SessionState {
    /// Runs after a step that did not end the match. Double Jeopardy holds
    /// the turn until its steps are used up; otherwise the turn passes.
    pub fn complete_step(&mut self) {
        match self.double_jeopardy {
            Some(mut dj) if dj.player == self.turn => {
                dj.remaining_steps = dj.remaining_steps.saturating_sub(1);
                if dj.remaining_steps == 0 {
                    self.double_jeopardy = None;
                    self.end_turn();
                } else {
                    self.double_jeopardy = Some(dj);
                    self.push_prompt(format!(
                        "Double Jeopardy! Player {} must step {} more time(s).",
                        dj.player, dj.remaining_steps
                    ));
                }
            }
            _ => self.end_turn(),
        }
    }

    /// Hands the turn to the other player without touching Double Jeopardy.
    pub fn end_turn(&mut self) {
        self.action_state = ActionState::None;
        self.blacked_out = None;
        self.turn = self.turn.other();
        if self.blackout_for == Some(self.turn) {
            self.blackout_for = None;
            self.blacked_out = Some(self.turn);
        }
    }

    pub fn game_over(&mut self, winner: Role) {
        self.phase = Phase::GameOver;
        self.turn = winner;
        self.action_state = ActionState::None;
        for cell in self.board.iter_mut().filter(|c| c.is_mine && !c.is_revealed) {
            cell.reveal(Revealer::Mine);
        }
    }

    /// Declares a tie once every non-mine cell has been uncovered.
    pub fn check_tie(&mut self) {
        if self.phase == Phase::Turn && self.unrevealed_safe_cells() == 0 {
            self.phase = Phase::Tie;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::game::rules::GameConfig;
    use crate::game::state::DoubleJeopardy;

    fn in_turn() -> SessionState {
        let mut state = SessionState::new(&GameConfig::default(), &mut StdRng::seed_from_u64(5));
        state.phase = Phase::Turn;
        state
    }

    #[test]
    fn plain_completion_passes_the_turn() {
        let mut state = in_turn();
        state.complete_step();
        assert_eq!(state.turn, Role::B);
    }

    #[test]
    fn double_jeopardy_holds_the_turn() {
        let mut state = in_turn();
        state.double_jeopardy = Some(DoubleJeopardy { player: Role::A, remaining_steps: DOUBLE_JEOPARDY_STEPS });
        state.complete_step();
        assert_eq!(state.turn, Role::A);
        assert_eq!(state.double_jeopardy.map(|dj| dj.remaining_steps), Some(1));
        assert!(state.prompt.is_some());
        state.complete_step();
        assert_eq!(state.turn, Role::B);
        assert_eq!(state.double_jeopardy, None);
    }

    #[test]
    fn double_jeopardy_for_the_other_player_is_ignored() {
        let mut state = in_turn();
        let dj = DoubleJeopardy { player: Role::B, remaining_steps: 2 };
        state.double_jeopardy = Some(dj);
        state.complete_step();
        assert_eq!(state.turn, Role::B);
        assert_eq!(state.double_jeopardy, Some(dj));
    }

    #[test]
    fn blackout_lasts_one_turn() {
        let mut state = in_turn();
        state.blackout_for = Some(Role::B);
        state.end_turn();
        assert_eq!(state.blackout_for, None);
        assert_eq!(state.blacked_out, Some(Role::B));
        state.end_turn();
        assert_eq!(state.blacked_out, None);
        assert_eq!(state.turn, Role::A);
    }

    #[test]
    fn game_over_reveals_every_mine() {
        let mut state = in_turn();
        for id in [1, 2, 3] {
            state.board.get_mut(id).unwrap().is_mine = true;
        }
        state.board.get_mut(1).unwrap().reveal(Revealer::A);
        state.game_over(Role::B);
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.turn, Role::B);
        assert_eq!(state.board.get(1).unwrap().revealed_by, Some(Revealer::A));
        assert_eq!(state.board.get(2).unwrap().revealed_by, Some(Revealer::Mine));
        assert!(state.board.iter().filter(|c| c.is_mine).all(|c| c.is_revealed));
    }

    #[test]
    fn tie_only_when_every_safe_cell_is_revealed() {
        let mut state = in_turn();
        state.board.get_mut(0).unwrap().is_mine = true;
        for cell in state.board.iter_mut().skip(2) {
            cell.reveal(Revealer::A);
        }
        state.check_tie();
        assert_eq!(state.phase, Phase::Turn);
        state.board.get_mut(1).unwrap().reveal(Revealer::B);
        state.check_tie();
        assert_eq!(state.phase, Phase::Tie);
    }

    #[test]
    fn tie_never_overrides_game_over() {
        let mut state = in_turn();
        for cell in state.board.iter_mut() {
            cell.reveal(Revealer::A);
        }
        state.game_over(Role::A);
        state.check_tie();
        assert_eq!(state.phase, Phase::GameOver);
    }
}
