//! The authoritative game engine: board generation, card catalog, session
//! state and the action dispatcher.

pub mod action;
pub mod board;
pub mod cards;
pub mod engine;
pub mod error;
pub mod rules;
pub mod state;
pub mod view;

mod play;
mod step;
mod turn;

pub use action::Action;
pub use board::{Board, Cell, Layer, Revealer};
pub use cards::{Card, CardDef, Category, Target};
pub use engine::{Game, Outcome};
pub use error::{ConfigError, EngineError};
pub use rules::GameConfig;
pub use state::{ActionState, DoubleJeopardy, Phase, Player, Role, SessionState};
pub use turn::DOUBLE_JEOPARDY_STEPS;
pub use view::StateView;
