//! Board cells and the randomized board generator.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::rules::GameConfig;
use super::state::Role;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Layer { Ground, Highland }

/// Who or what uncovered a cell.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Revealer {
    A,
    B,
    #[serde(rename = "shield")]
    Shield,
    /// Uncovered by the end-of-match mine reveal.
    #[serde(rename = "mine")]
    Mine,
}

impl From<Role> for Revealer {
    fn from(role: Role) -> Self {
        match role {
            Role::A => Revealer::A,
            Role::B => Revealer::B,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub id: usize,
    pub row: usize,
    pub col: usize,
    pub layer: Layer,
    pub is_mine: bool,
    pub is_wormhole: bool,
    pub is_decoy: bool,
    pub is_stairway: bool,
    pub is_revealed: bool,
    pub revealed_by: Option<Revealer>,
}

impl Cell {
    fn new(id: usize, grid_size: usize) -> Self {
        Self {
            id,
            row: id / grid_size,
            col: id % grid_size,
            layer: Layer::Ground,
            is_mine: false,
            is_wormhole: false,
            is_decoy: false,
            is_stairway: false,
            is_revealed: false,
            revealed_by: None,
        }
    }

    /// Neither stairway nor wormhole.
    pub fn is_plain_terrain(&self) -> bool { !self.is_stairway && !self.is_wormhole }

    /// Uncovers the cell. A decoy does not survive being uncovered.
    pub fn reveal(&mut self, by: Revealer) {
        self.is_revealed = true;
        self.is_decoy = false;
        self.revealed_by = Some(by);
    }

    pub fn conceal(&mut self) {
        self.is_revealed = false;
        self.revealed_by = None;
    }
}

/// Row-major square grid.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    /// A board of ground cells with nothing on it.
    pub fn blank(grid_size: usize) -> Self {
        let cells = (0..grid_size * grid_size).map(|id| Cell::new(id, grid_size)).collect();
        Self { cells }
    }

    /// Lays out terrain, stairways and wormholes. Mines are left to the players.
    ///
    /// Stairways are drawn per layer: `stairways_per_layer` ground cells and as
    /// many highland cells. Wormholes are then drawn from the remaining cells.
    pub fn generate<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let mut board = Self::blank(config.grid_size);

        let mut ids: Vec<usize> = (0..board.len()).collect();
        ids.shuffle(rng);
        for &id in ids.iter().take(config.highland_cells) {
            board.cells[id].layer = Layer::Highland;
        }

        for layer in [Layer::Ground, Layer::Highland] {
            let mut on_layer = board.ids_where(|c| c.layer == layer);
            on_layer.shuffle(rng);
            for &id in on_layer.iter().take(config.stairways_per_layer) {
                board.cells[id].is_stairway = true;
            }
        }

        let mut open = board.ids_where(|c| !c.is_stairway);
        open.shuffle(rng);
        for &id in open.iter().take(config.wormholes) {
            board.cells[id].is_wormhole = true;
        }

        tracing::trace!(
            cells = board.len(),
            highland = config.highland_cells,
            stairways = config.total_stairways(),
            wormholes = config.wormholes,
            "board generated"
        );
        board
    }

    pub fn len(&self) -> usize { self.cells.len() }

    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    pub fn get(&self, id: usize) -> Option<&Cell> { self.cells.get(id) }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut Cell> { self.cells.get_mut(id) }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> { self.cells.iter() }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> { self.cells.iter_mut() }

    pub fn ids_where(&self, pred: impl Fn(&Cell) -> bool) -> Vec<usize> {
        self.cells.iter().filter(|c| pred(c)).map(|c| c.id).collect()
    }

    pub fn count_where(&self, pred: impl Fn(&Cell) -> bool) -> usize {
        self.cells.iter().filter(|c| pred(c)).count()
    }
}
