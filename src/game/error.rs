//! Error types for the game engine.

use super::cards::Card;

/// Faults raised while handling an action.
///
/// These never reach a client as errors: the dispatcher logs them and
/// completes the action as a no-op. Ordinary rule violations (wrong cell,
/// card not held) are reported through the state prompt instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("cell {0} is outside the board")]
    UnknownCell(usize),
    #[error("card {0:?} does not take a target")]
    UntargetedCard(Card),
    #[error("card {0:?} needs a target")]
    TargetedCard(Card),
    #[error("no wormhole transit is in flight")]
    NoTransit,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(usize),
    #[error("{highland} highland cells do not fit a board of {cells}")]
    TooMuchHighland { highland: usize, cells: usize },
    #[error("{per_layer} stairways per layer need at least that many ground and highland cells")]
    TooManyStairways { per_layer: usize },
    #[error("{wormholes} wormholes do not fit the {free} cells left after stairways")]
    TooManyWormholes { wormholes: usize, free: usize },
    #[error("{mines} mines do not fit the {free} plain cells")]
    TooManyMines { mines: usize, free: usize },
    #[error("hand cap must be at least 1")]
    ZeroHandCap,
}
