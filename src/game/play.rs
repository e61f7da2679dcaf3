//! Card play, immediate card effects and targeted resolution.

use rand::seq::SliceRandom;

use super::cards::Card;
use super::engine::{Game, Outcome};
use super::error::EngineError;
use super::state::{ActionState, DoubleJeopardy, Role};
use super::turn::DOUBLE_JEOPARDY_STEPS;

impl Game {
    pub(super) fn play_card(&mut self, role: Role, card: Card) -> Result<Outcome, EngineError> {
        if !self.state.player_mut(role).take(card) {
            tracing::debug!(%role, ?card, "card not in hand");
            return Ok(Outcome::Applied);
        }
        let def = card.def();
        tracing::debug!(%role, ?card, "card played");
        if def.is_immediate() {
            self.apply_immediate(role, card)?;
            if def.ends_turn {
                self.state.end_turn();
            }
        } else {
            self.state.action_state = ActionState::Targeting {
                card,
                player: role,
                prompt: format!("Player {role} played {}, choose a target.", def.name),
            };
        }
        Ok(Outcome::Applied)
    }

    fn apply_immediate(&mut self, role: Role, card: Card) -> Result<(), EngineError> {
        let opponent = role.other();
        match card {
            Card::Shield => {
                self.state.player_mut(role).shield += 1;
                self.state.push_prompt(format!("Player {role} raised a shield!"));
            }
            Card::Skip => self.state.push_prompt(format!("Player {role} skipped their turn.")),
            Card::MineShift => self.shift_mine(),
            Card::DoubleJeopardy => {
                self.state.double_jeopardy = Some(DoubleJeopardy { player: opponent, remaining_steps: DOUBLE_JEOPARDY_STEPS });
                self.state.push_prompt(format!("Double Jeopardy! Player {opponent} must step twice next turn."));
            }
            Card::Blackout => {
                self.state.blackout_for = Some(opponent);
                self.state.push_prompt(format!("Blackout! Player {opponent}'s next turn will be shrouded in darkness."));
            }
            Card::Premonition | Card::Relocate | Card::Decoy => return Err(EngineError::TargetedCard(card)),
        }
        Ok(())
    }

    /// Swaps one hidden mine with one hidden plain cell.
    fn shift_mine(&mut self) {
        let board = &self.state.board;
        let mines = board.ids_where(|c| !c.is_revealed && c.is_mine);
        let safe = board.ids_where(|c| !c.is_revealed && !c.is_mine && !c.is_decoy && c.is_plain_terrain());
        let (Some(&from), Some(&to)) = (mines.choose(&mut self.rng), safe.choose(&mut self.rng)) else {
            self.state.push_prompt("The mines refused to move.");
            return;
        };
        tracing::trace!(from, to, "mine shifted");
        if let Some(cell) = self.state.board.get_mut(from) { cell.is_mine = false; }
        if let Some(cell) = self.state.board.get_mut(to) { cell.is_mine = true; }
        self.state.push_prompt("The mines have quietly shifted!");
    }

    pub(super) fn resolve_target(&mut self, player: Role, card: Card, id: usize) -> Result<Outcome, EngineError> {
        let cell = self.state.cell(id)?;
        let (revealed, revealed_by, hazard) = (cell.is_revealed, cell.revealed_by, cell.is_mine || cell.is_wormhole);

        match card {
            Card::Premonition => {
                self.state.action_state = ActionState::None;
                self.state.push_prompt(if hazard {
                    "Premonition: that cell feels very dangerous."
                } else {
                    "Premonition: that cell seems safe."
                });
            }
            Card::Decoy if !revealed => {
                self.state.cell_mut(id)?.is_decoy = true;
                self.state.push_prompt("Decoy planted!");
                self.state.end_turn();
            }
            Card::Decoy => {
                self.state.action_state = ActionState::None;
                self.state.push_prompt("A decoy cannot go on a revealed cell!");
            }
            Card::Relocate if revealed && revealed_by == Some(player.into()) => {
                self.state.cell_mut(id)?.conceal();
                self.state.action_state = ActionState::Relocating {
                    player,
                    prompt: format!("Player {player}, choose where to redeploy."),
                };
            }
            Card::Relocate => {
                self.state.action_state = ActionState::None;
                self.state.push_prompt("You can only pick one of your own marks!");
            }
            Card::Shield | Card::Skip | Card::MineShift | Card::DoubleJeopardy | Card::Blackout => {
                self.state.action_state = ActionState::None;
                return Err(EngineError::UntargetedCard(card));
            }
        }
        Ok(Outcome::Applied)
    }

    pub(super) fn resolve_relocation(&mut self, player: Role, id: usize) -> Result<Outcome, EngineError> {
        if self.state.cell(id)?.is_revealed {
            self.state.push_prompt("You cannot redeploy onto a revealed cell!");
            return Ok(Outcome::Applied);
        }
        self.state.cell_mut(id)?.reveal(player.into());
        self.state.end_turn();
        self.state.check_tie();
        Ok(Outcome::Applied)
    }
}
