//! Per-player snapshots sent to clients.
//!
//! Hidden information never leaves the engine: an unrevealed cell does not
//! say whether it holds a mine or a wormhole, and the opponent's hand is
//! reduced to its size. A player under Blackout also loses the terrain of
//! every unrevealed cell for that turn.

use serde::Serialize;

use super::board::{Cell, Layer, Revealer};
use super::cards::Card;
use super::state::{ActionState, DoubleJeopardy, Phase, Role, SessionState};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub id: usize,
    pub row: usize,
    pub col: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<Layer>,
    pub is_stairway: bool,
    pub is_mine: bool,
    pub is_wormhole: bool,
    pub is_decoy: bool,
    pub is_revealed: bool,
    pub revealed_by: Option<Revealer>,
}

impl CellView {
    fn of(cell: &Cell, dark: bool) -> Self {
        let shown = cell.is_revealed;
        let terrain = shown || !dark;
        Self {
            id: cell.id,
            row: cell.row,
            col: cell.col,
            layer: terrain.then_some(cell.layer),
            is_stairway: terrain && cell.is_stairway,
            is_mine: shown && cell.is_mine,
            is_wormhole: shown && cell.is_wormhole,
            is_decoy: cell.is_decoy,
            is_revealed: cell.is_revealed,
            revealed_by: cell.revealed_by,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OpponentView {
    pub hand_size: usize,
    pub shield: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    pub you: Role,
    pub phase: Phase,
    pub turn: Role,
    pub action_state: ActionState,
    pub double_jeopardy: Option<DoubleJeopardy>,
    /// This player's view is darkened for the current turn.
    pub blackout: bool,
    pub mine_placement_count: usize,
    pub wormhole_in_flight: bool,
    pub prompt: Option<String>,
    pub board: Vec<CellView>,
    pub hand: Vec<Card>,
    pub shield: u32,
    pub opponent: OpponentView,
}

impl StateView {
    pub fn for_role(state: &SessionState, you: Role) -> Self {
        let dark = state.blacked_out == Some(you) && state.turn == you && !state.phase.is_finished();
        let me = state.player(you);
        let them = state.player(you.other());
        Self {
            you,
            phase: state.phase,
            turn: state.turn,
            action_state: state.action_state.clone(),
            double_jeopardy: state.double_jeopardy,
            blackout: dark,
            mine_placement_count: state.mine_placement_count,
            wormhole_in_flight: state.wormhole_in_flight,
            prompt: state.prompt.clone(),
            board: state.board.iter().map(|c| CellView::of(c, dark)).collect(),
            hand: me.hand.clone(),
            shield: me.shield,
            opponent: OpponentView { hand_size: them.hand.len(), shield: them.shield },
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::game::rules::GameConfig;

    fn state() -> SessionState {
        let mut state = SessionState::new(&GameConfig::default(), &mut StdRng::seed_from_u64(9));
        state.phase = Phase::Turn;
        state
    }

    #[test]
    fn hidden_hazards_stay_hidden() {
        let mut state = state();
        let id = state.board.ids_where(|c| c.is_plain_terrain())[0];
        state.board.get_mut(id).unwrap().is_mine = true;
        let view = StateView::for_role(&state, Role::A);
        assert!(view.board.iter().all(|c| !c.is_mine && !c.is_wormhole));

        state.board.get_mut(id).unwrap().reveal(Revealer::B);
        let view = StateView::for_role(&state, Role::A);
        assert!(view.board[id].is_mine);
    }

    #[test]
    fn opponent_hand_is_only_counted() {
        let state = state();
        let view = StateView::for_role(&state, Role::B);
        assert_eq!(view.hand, state.players.b.hand);
        assert_eq!(view.opponent.hand_size, state.players.a.hand.len());
    }

    #[test]
    fn decoys_look_the_same_over_mines_and_safe_cells() {
        let mut state = state();
        let plain = state.board.ids_where(|c| c.is_plain_terrain());
        let (over_mine, over_safe) = (plain[0], plain[1]);
        let wormhole = state.board.ids_where(|c| c.is_wormhole)[0];
        state.board.get_mut(over_mine).unwrap().is_mine = true;
        for id in [over_mine, over_safe, wormhole] {
            state.board.get_mut(id).unwrap().is_decoy = true;
        }

        for role in [Role::A, Role::B] {
            let view = StateView::for_role(&state, role);
            let mine = &view.board[over_mine];
            let safe = &view.board[over_safe];
            let hole = &view.board[wormhole];
            assert!(mine.is_decoy && safe.is_decoy && hole.is_decoy);
            assert_eq!((mine.is_mine, mine.is_wormhole), (safe.is_mine, safe.is_wormhole));
            assert_eq!((hole.is_mine, hole.is_wormhole), (safe.is_mine, safe.is_wormhole));
            // nothing but position and terrain tells the two apart on the wire
            let strip = |c: &CellView| {
                serde_json::to_value(CellView { id: 0, row: 0, col: 0, layer: None, ..c.clone() }).unwrap()
            };
            assert_eq!(strip(mine), strip(safe));
        }
    }

    #[test]
    fn blackout_darkens_only_its_target() {
        let mut state = state();
        state.blacked_out = Some(Role::A);
        let dark = StateView::for_role(&state, Role::A);
        assert!(dark.blackout);
        assert!(dark.board.iter().all(|c| c.layer.is_none() && !c.is_stairway));

        let lit = StateView::for_role(&state, Role::B);
        assert!(!lit.blackout);
        assert!(lit.board.iter().all(|c| c.layer.is_some()));
    }
}
