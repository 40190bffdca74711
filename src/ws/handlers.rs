//! Session gateway dispatch.
//!
//! Maps each client event to one room operation, then fans the updated
//! snapshot out to the room. The return value is the direct reply to the
//! initiating connection (if any); everything else goes through `Fanout`.
//! Silent errors (unauthorized, stale UI) produce neither.

use crate::error::GameError;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::reconcile;
use crate::room::{HostDecisionOutcome, JoinOutcome, RoomSnapshot, RoundAdvance};
use crate::state::AppState;
use std::sync::Arc;

/// Handle one client message and return the optional direct reply.
pub async fn handle_message(
    msg: ClientMessage,
    connection_id: &str,
    state: &Arc<AppState>,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::CreateGame { player_name } => {
            handle_create_game(state, connection_id, player_name).await
        }
        ClientMessage::JoinGame {
            room_code,
            player_name,
        } => handle_join_game(state, connection_id, &room_code, player_name).await,
        ClientMessage::RejoinGame {
            room_code,
            player_id,
        } => handle_rejoin_game(state, connection_id, &room_code, &player_id).await,
        ClientMessage::StartGame { room_code } => {
            let result = state
                .registry
                .with_room(&room_code, |room| room.start(connection_id))
                .await
                .and_then(|r| r);
            broadcast_or_reply(state, &room_code, result).await
        }
        ClientMessage::HostUpdateSettings {
            room_code,
            turn_limit,
        } => {
            let result = state
                .registry
                .with_room(&room_code, |room| {
                    room.update_settings(connection_id, turn_limit)
                })
                .await
                .and_then(|r| r);
            broadcast_or_reply(state, &room_code, result).await
        }
        ClientMessage::HostDecision {
            room_code,
            request_id,
            approved,
        } => handle_host_decision(state, connection_id, &room_code, &request_id, approved).await,
        ClientMessage::HostKickPlayer {
            room_code,
            target_player_id,
        } => handle_kick(state, connection_id, &room_code, &target_player_id).await,
        ClientMessage::HostForceContinue { room_code } => {
            let result = state
                .registry
                .with_room(&room_code, |room| room.force_continue(connection_id))
                .await
                .and_then(|r| r);
            broadcast_or_reply(state, &room_code, result).await
        }
        ClientMessage::HostSkipRound { room_code } => {
            handle_skip_round(state, connection_id, &room_code).await
        }
        ClientMessage::HostPlayAgain { room_code } => {
            let result = state
                .registry
                .with_room(&room_code, |room| room.play_again(connection_id))
                .await
                .and_then(|r| r);
            broadcast_or_reply(state, &room_code, result).await
        }
        ClientMessage::PlayResponseCard {
            room_code,
            card_text,
        } => {
            let result = state
                .registry
                .with_room(&room_code, |room| {
                    room.play_response_card(connection_id, &card_text)
                })
                .await
                .and_then(|r| r)
                .map(|_| ());
            broadcast_or_reply(state, &room_code, result).await
        }
        ClientMessage::JudgeSelectWinner {
            room_code,
            card_text,
        } => handle_judge_select_winner(state, connection_id, &room_code, &card_text).await,
    }
}

async fn handle_create_game(
    state: &Arc<AppState>,
    connection_id: &str,
    player_name: String,
) -> Option<ServerMessage> {
    let room = state
        .registry
        .create(player_name, connection_id.to_string())
        .await;
    state.fanout.join_room(&room.code, connection_id).await;
    tracing::info!(room = %room.code, "room created");
    Some(ServerMessage::GameCreated {
        state: room.snapshot(),
        player_id: room.players[0].player_id.clone(),
    })
}

async fn handle_join_game(
    state: &Arc<AppState>,
    connection_id: &str,
    room_code: &str,
    player_name: String,
) -> Option<ServerMessage> {
    let result = state
        .registry
        .with_room(room_code, |room| {
            let outcome = room.join(player_name, connection_id.to_string())?;
            let host_connection = room.host().and_then(|h| h.connection_id.clone());
            Ok((outcome, host_connection, room.snapshot()))
        })
        .await
        .and_then(|r| r);

    match result {
        Ok((JoinOutcome::Joined(player_id), _, snapshot)) => {
            state.fanout.join_room(room_code, connection_id).await;
            broadcast(state, room_code, snapshot.clone()).await;
            Some(ServerMessage::JoinedGame {
                state: snapshot,
                player_id,
            })
        }
        Ok((JoinOutcome::Pending(request_id), host_connection, snapshot)) => {
            // Only the host learns who is knocking.
            if let Some(host_connection) = host_connection {
                let name = snapshot
                    .pending_joins
                    .iter()
                    .find(|r| r.request_id == request_id)
                    .map(|r| r.name.clone())
                    .unwrap_or_default();
                state
                    .fanout
                    .send_to(&host_connection, ServerMessage::JoinRequest { name, request_id })
                    .await;
            }
            Some(ServerMessage::WaitingForHost)
        }
        Err(err) => reply_error(err),
    }
}

async fn handle_rejoin_game(
    state: &Arc<AppState>,
    connection_id: &str,
    room_code: &str,
    player_id: &str,
) -> Option<ServerMessage> {
    let result = state
        .registry
        .with_room(room_code, |room| {
            room.rejoin(player_id, connection_id.to_string())?;
            Ok(room.snapshot())
        })
        .await
        .and_then(|r| r);

    match result {
        Ok(snapshot) => {
            state.cancel_grace_timer(player_id).await;
            state.fanout.join_room(room_code, connection_id).await;
            tracing::info!(room = %room_code, player = %player_id, "player reconnected");
            broadcast(state, room_code, snapshot.clone()).await;
            Some(ServerMessage::GameUpdate { state: snapshot })
        }
        Err(err) => reply_error(err),
    }
}

async fn handle_host_decision(
    state: &Arc<AppState>,
    connection_id: &str,
    room_code: &str,
    request_id: &str,
    approved: bool,
) -> Option<ServerMessage> {
    let result = state
        .registry
        .with_room(room_code, |room| {
            let outcome = room.host_decision(connection_id, request_id, approved)?;
            Ok((outcome, room.snapshot()))
        })
        .await
        .and_then(|r| r);

    match result {
        Ok((
            HostDecisionOutcome::Approved {
                player_id,
                connection_id: requester,
            },
            snapshot,
        )) => {
            state.fanout.join_room(room_code, &requester).await;
            state
                .fanout
                .send_to(
                    &requester,
                    ServerMessage::JoinedGame {
                        state: snapshot.clone(),
                        player_id,
                    },
                )
                .await;
            broadcast(state, room_code, snapshot).await;
            None
        }
        Ok((HostDecisionOutcome::Denied { connection_id: requester }, _)) => {
            state
                .fanout
                .send_to(
                    &requester,
                    ServerMessage::Error {
                        code: "JOIN_DENIED".to_string(),
                        msg: "The host denied your request to join".to_string(),
                    },
                )
                .await;
            None
        }
        Err(err) => reply_error(err),
    }
}

async fn handle_kick(
    state: &Arc<AppState>,
    connection_id: &str,
    room_code: &str,
    target_player_id: &str,
) -> Option<ServerMessage> {
    // Kick can empty the room, so it works on the map directly instead of
    // going through `with_room`.
    let result = {
        let mut rooms = state.registry.rooms.write().await;
        let Some(room) = rooms.get_mut(room_code) else {
            return reply_error(GameError::RoomNotFound);
        };
        match room.kick(connection_id, target_player_id) {
            Ok(outcome) => {
                let snapshot = (!outcome.room_empty).then(|| room.snapshot());
                if outcome.room_empty {
                    rooms.remove(room_code);
                }
                Ok((outcome, snapshot))
            }
            Err(err) => Err(err),
        }
    };

    match result {
        Ok((outcome, snapshot)) => {
            // A kick while the grace timer is pending must not remove twice.
            state.cancel_grace_timer(target_player_id).await;
            tracing::info!(room = %room_code, player = %outcome.removed.name, "player kicked");

            if let Some(kicked_connection) = outcome.removed.connection_id {
                state
                    .fanout
                    .send_to(&kicked_connection, ServerMessage::YouWereKicked)
                    .await;
                state.fanout.leave_room(room_code, &kicked_connection).await;
            }
            if let Some(snapshot) = snapshot {
                broadcast(state, room_code, snapshot).await;
            }
            None
        }
        Err(err) => reply_error(err),
    }
}

async fn handle_skip_round(
    state: &Arc<AppState>,
    connection_id: &str,
    room_code: &str,
) -> Option<ServerMessage> {
    let result = state
        .registry
        .with_room(room_code, |room| {
            let advance = room.skip_round(connection_id)?;
            Ok((advance, room.snapshot()))
        })
        .await
        .and_then(|r| r);

    match result {
        Ok((advance, snapshot)) => {
            if advance == RoundAdvance::RoomEmpty {
                state.registry.remove(room_code).await;
                return None;
            }
            broadcast(state, room_code, snapshot).await;
            None
        }
        Err(err) => reply_error(err),
    }
}

async fn handle_judge_select_winner(
    state: &Arc<AppState>,
    connection_id: &str,
    room_code: &str,
    card_text: &str,
) -> Option<ServerMessage> {
    let result = state
        .registry
        .with_room(room_code, |room| {
            room.judge_select_winner(connection_id, card_text)?;
            Ok((room.round_serial, room.snapshot()))
        })
        .await
        .and_then(|r| r);

    match result {
        Ok((round_serial, snapshot)) => {
            broadcast(state, room_code, snapshot).await;
            // Winner stays on screen for a beat, then the round advances on
            // its own. Skip preempts this; the serial makes it stale.
            reconcile::schedule_round_advance(state.clone(), room_code.to_string(), round_serial);
            None
        }
        Err(err) => reply_error(err),
    }
}

async fn broadcast(state: &Arc<AppState>, room_code: &str, snapshot: RoomSnapshot) {
    state
        .fanout
        .send_room(room_code, ServerMessage::GameUpdate { state: snapshot })
        .await;
}

/// Broadcast the updated snapshot on success, or map the error to a reply.
async fn broadcast_or_reply(
    state: &Arc<AppState>,
    room_code: &str,
    result: Result<(), GameError>,
) -> Option<ServerMessage> {
    match result {
        Ok(()) => {
            let snapshot = state
                .registry
                .with_room(room_code, |room| room.snapshot())
                .await
                .ok()?;
            broadcast(state, room_code, snapshot).await;
            None
        }
        Err(err) => reply_error(err),
    }
}

fn reply_error(err: GameError) -> Option<ServerMessage> {
    if err.is_silent() {
        tracing::debug!(error = %err, "ignoring invalid client event");
        None
    } else {
        Some(ServerMessage::error(&err))
    }
}
