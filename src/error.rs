use thiserror::Error;

/// Everything that can go wrong handling a client event.
///
/// No variant is allowed to crash the process; each one degrades to either an
/// `error` reply to the initiating client or a silent no-op.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Room not found")]
    RoomNotFound,
    #[error("Player not found")]
    PlayerNotFound,
    #[error("Room is full")]
    RoomFull,
    #[error("Host is disconnected, cannot join mid-game")]
    HostUnavailable,
    /// Non-host issuing a host command, non-judge judging. Deliberately not
    /// reported back, so unauthorized actors learn nothing about room state.
    #[error("Not authorized")]
    Unauthorized,
    /// Operation doesn't apply in the current phase, or references a card
    /// nobody played. Treated as a stale client UI.
    #[error("Invalid transition")]
    InvalidTransition,
}

impl GameError {
    /// Silent errors are dropped; the rest become an `error` reply.
    pub fn is_silent(&self) -> bool {
        matches!(self, GameError::Unauthorized | GameError::InvalidTransition)
    }

    pub fn code(&self) -> &'static str {
        match self {
            GameError::RoomNotFound => "ROOM_NOT_FOUND",
            GameError::PlayerNotFound => "PLAYER_NOT_FOUND",
            GameError::RoomFull => "ROOM_FULL",
            GameError::HostUnavailable => "HOST_UNAVAILABLE",
            GameError::Unauthorized => "UNAUTHORIZED",
            GameError::InvalidTransition => "INVALID_TRANSITION",
        }
    }
}
