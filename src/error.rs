//! Error types for content loading and player actions.

use thiserror::Error;

/// Problems found while loading mansion content. These are authoring
/// mistakes, so they only ever surface at startup.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("malformed content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("room `{0}` is defined more than once")]
    DuplicateRoom(String),

    #[error("room `{room}` has an exit to unknown room `{exit}`")]
    DanglingExit { room: String, exit: String },

    #[error("start room `{0}` does not exist")]
    UnknownStartRoom(String),

    #[error("ending room `{0}` does not exist")]
    UnknownEndingRoom(String),
}

/// Why a player action was not carried out. None of these are fatal and
/// none of them change the game state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("no room named `{0}`")]
    UnknownRoom(String),

    #[error("the player is not in any room yet")]
    NoCurrentRoom,

    #[error("waiting for the player to acknowledge an unlock")]
    AwaitingAcknowledgment,

    #[error("there is nothing to acknowledge")]
    NothingToAcknowledge,

    #[error("the game is over")]
    GameOver,
}
