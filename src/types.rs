use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type PlayerId = String;
pub type ConnectionId = String;
pub type RoomCode = String;
pub type RequestId = String;
pub type CardText = String;

/// Maximum players per room.
pub const MAX_PLAYERS: usize = 8;
/// Response cards held by an active player.
pub const HAND_SIZE: usize = 7;
pub const DEFAULT_TURN_LIMIT: u32 = 3;
pub const MIN_TURN_LIMIT: u32 = 1;
pub const MAX_TURN_LIMIT: u32 = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GamePhase {
    Lobby,
    InGame,
    GameOver,
}

/// Sub-phase of a round, meaningful only while `GamePhase::InGame`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnPhase {
    Playing,
    Judging,
    Winner,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    /// Stable identity, survives reconnects.
    pub player_id: PlayerId,
    /// Transient transport identity; `None` while disconnected.
    pub connection_id: Option<ConnectionId>,
    pub name: String,
    pub score: u32,
    pub is_host: bool,
    /// Approved mid-round; waits for the next round boundary to participate.
    pub is_spectating: bool,
    pub hand: Vec<CardText>,
}

impl Player {
    pub fn new(name: String, connection_id: ConnectionId, is_host: bool) -> Self {
        Self {
            player_id: ulid::Ulid::new().to_string(),
            connection_id: Some(connection_id),
            name,
            score: 0,
            is_host,
            is_spectating: false,
            hand: Vec::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection_id.is_some()
    }
}

/// A mid-game join awaiting the host's approve/deny decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingJoin {
    pub request_id: RequestId,
    pub connection_id: ConnectionId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LastWinner {
    pub name: String,
    pub prompt_card: CardText,
    pub response_card: CardText,
}
