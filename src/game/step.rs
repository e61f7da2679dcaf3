//! Mine placement, stepping on cells and wormhole transit.

use rand::seq::SliceRandom;

use super::board::{Layer, Revealer};
use super::cards::Card;
use super::engine::{Game, Outcome};
use super::error::EngineError;
use super::state::{Phase, Role};

/// How the player reached the cell being uncovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrival { Step, Wormhole }

impl Game {
    pub(super) fn place_mine(&mut self, role: Role, id: usize) -> Result<Outcome, EngineError> {
        let cell = self.state.cell(id)?;
        let (plain, mined) = (cell.is_plain_terrain(), cell.is_mine);
        if !plain {
            self.state.push_prompt("Mines cannot be buried on special terrain!");
            return Ok(Outcome::Applied);
        }
        if mined {
            self.state.push_prompt("Something is already buried there.");
            return Ok(Outcome::Applied);
        }

        self.state.cell_mut(id)?.is_mine = true;
        self.state.mine_placement_count += 1;
        if self.state.mine_placement_count >= self.config.total_mines() {
            tracing::debug!("all mines placed, turns begin");
            self.state.phase = Phase::Turn;
            self.state.turn = Role::A;
        } else {
            self.state.turn = role.other();
        }
        Ok(Outcome::Applied)
    }

    pub(super) fn step(&mut self, role: Role, id: usize) -> Result<Outcome, EngineError> {
        if self.state.cell(id)?.is_wormhole {
            return self.enter_wormhole(role, id);
        }
        if self.uncover(role, id, Arrival::Step)? {
            self.state.complete_step();
            self.state.check_tie();
        }
        Ok(Outcome::Applied)
    }

    /// Reveals `id` for `role`, applying mines and decoys. Returns `false`
    /// when the cell ended the match.
    ///
    /// A mine under a decoy still goes off. A wormhole reached by landing is
    /// only uncovered: no card is drawn and there is no second transit.
    fn uncover(&mut self, role: Role, id: usize, via: Arrival) -> Result<bool, EngineError> {
        let cell = self.state.cell(id)?;
        let (is_mine, is_decoy, is_stairway, layer) = (cell.is_mine, cell.is_decoy, cell.is_stairway, cell.layer);

        if is_mine {
            if self.state.player(role).shield == 0 {
                self.state.cell_mut(id)?.reveal(role.into());
                tracing::debug!(%role, cell = id, "stepped on a mine");
                self.state.game_over(role.other());
                return Ok(false);
            }
            self.state.player_mut(role).shield -= 1;
            self.state.cell_mut(id)?.reveal(Revealer::Shield);
            self.state.push_prompt(match via {
                Arrival::Step => format!("Player {role}'s shield absorbed a mine!"),
                Arrival::Wormhole => "Lucky! Your shield absorbed a mine at the landing site!".to_string(),
            });
            return Ok(true);
        }

        self.state.cell_mut(id)?.reveal(role.into());
        if is_decoy {
            self.state.push_prompt("Ha! That was only a decoy!");
        } else if via == Arrival::Wormhole {
            self.state.push_prompt(if is_stairway {
                "You landed on a stairway..."
            } else {
                "You landed somewhere that looks safe..."
            });
        } else if is_stairway {
            self.state.push_prompt(match layer {
                Layer::Ground => "Taking the stairway up to the highland!",
                Layer::Highland => "Taking the stairway down to the ground!",
            });
        }
        Ok(true)
    }

    fn enter_wormhole(&mut self, role: Role, id: usize) -> Result<Outcome, EngineError> {
        self.state.cell_mut(id)?.reveal(role.into());
        let card = Card::random(&mut self.rng);
        let cap = self.config.hand_cap;
        if self.state.player_mut(role).draw(card, cap) {
            self.state.push_prompt("You dove into a wormhole and picked up a new card on the way!");
        } else {
            self.state.push_prompt("You dove into a wormhole!");
        }
        self.state.wormhole_in_flight = true;
        tracing::debug!(%role, cell = id, "wormhole entered");
        Ok(Outcome::Transit { entry: id })
    }

    /// Landing half of the transit. The caller releases the guard.
    pub(super) fn land(&mut self, entry: usize) -> Result<(), EngineError> {
        let role = self.state.turn;
        let candidates = self.state.board.ids_where(|c| !c.is_revealed && c.id != entry);
        match candidates.choose(&mut self.rng).copied() {
            Some(landing) => {
                tracing::debug!(%role, entry, landing, "wormhole landing");
                if !self.uncover(role, landing, Arrival::Wormhole)? {
                    return Ok(());
                }
            }
            None => tracing::debug!(%role, entry, "nowhere to land"),
        }
        self.state.complete_step();
        self.state.check_tie();
        Ok(())
    }
}
