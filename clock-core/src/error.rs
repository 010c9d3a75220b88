use thiserror::Error;

use crate::game::{GameState, PlayerId};

/// A state change the game refused to make. The game is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot enter {target} without an active player")]
    NoActivePlayer { target: GameState },
}

/// Saved values that cannot be turned back into a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    #[error("unknown game state name {0:?}")]
    UnknownState(String),

    #[error("unknown player id {0}")]
    UnknownPlayer(u8),

    #[error("a running game must be paused before it is restored")]
    RunningState,

    #[error("state {state} does not match active player {active:?}")]
    ActiveMismatch {
        state: GameState,
        active: Option<PlayerId>,
    },

    #[error("snapshot data is truncated")]
    Truncated,
}
