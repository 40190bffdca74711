use crate::room::RoomSnapshot;
use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    CreateGame {
        player_name: String,
    },
    JoinGame {
        room_code: RoomCode,
        player_name: String,
    },
    /// Reconnection token is the (player_id, room_code) pair the client held
    /// on to; opaque to the server beyond lookup.
    RejoinGame {
        room_code: RoomCode,
        player_id: PlayerId,
    },
    StartGame {
        room_code: RoomCode,
    },
    HostUpdateSettings {
        room_code: RoomCode,
        turn_limit: u32,
    },
    HostDecision {
        room_code: RoomCode,
        request_id: RequestId,
        approved: bool,
    },
    HostKickPlayer {
        room_code: RoomCode,
        target_player_id: PlayerId,
    },
    HostForceContinue {
        room_code: RoomCode,
    },
    HostSkipRound {
        room_code: RoomCode,
    },
    HostPlayAgain {
        room_code: RoomCode,
    },
    PlayResponseCard {
        room_code: RoomCode,
        card_text: CardText,
    },
    JudgeSelectWinner {
        room_code: RoomCode,
        card_text: CardText,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    GameCreated {
        state: RoomSnapshot,
        player_id: PlayerId,
    },
    JoinedGame {
        state: RoomSnapshot,
        player_id: PlayerId,
    },
    /// Mid-game join queued; the requester waits for the host's decision.
    WaitingForHost,
    /// Sent to the host only.
    JoinRequest {
        name: String,
        request_id: RequestId,
    },
    YouWereKicked,
    GameUpdate {
        state: RoomSnapshot,
    },
    Error {
        code: String,
        msg: String,
    },
}

impl ServerMessage {
    pub fn error(err: &crate::error::GameError) -> Self {
        ServerMessage::Error {
            code: err.code().to_string(),
            msg: err.to_string(),
        }
    }
}
