//! Disconnect reconciliation and deferred round advancement.
//!
//! Two timer families mutate room state outside client events, and both
//! funnel through the registry lock like everything else:
//!
//! - per-player disconnect-grace timers, keyed by player id and replaced
//!   (never stacked) on repeat disconnects; a rejoin aborts them, and a timer
//!   that fires after a rejoin re-checks and no-ops;
//! - the per-round winner-presentation timer, tagged with the round serial it
//!   was scheduled under so a `skip_round` that preempted it leaves the timer
//!   stale and harmless.

use crate::protocol::ServerMessage;
use crate::room::{DisconnectOutcome, RoundAdvance};
use crate::state::AppState;
use crate::types::{GamePhase, PlayerId, RoomCode, TurnPhase};
use std::sync::Arc;

/// Transport-level disconnect callback. Resolves the connection to a room,
/// unbinds the player (or drops a pending join), broadcasts the new state,
/// and arms the grace timer that will eventually remove the player for good.
pub async fn handle_disconnect(state: &Arc<AppState>, connection_id: &str) {
    let located = {
        let mut rooms = state.registry.rooms.write().await;
        let mut located = None;
        for (code, room) in rooms.iter_mut() {
            match room.handle_disconnect(connection_id) {
                DisconnectOutcome::NotAMember => continue,
                outcome => {
                    located = Some((code.clone(), outcome, room.snapshot()));
                    break;
                }
            }
        }
        located
    };

    let Some((room_code, outcome, snapshot)) = located else {
        return;
    };

    match outcome {
        DisconnectOutcome::PendingDropped => {
            tracing::info!(room = %room_code, "pending join requester disconnected");
        }
        DisconnectOutcome::PlayerDisconnected { player_id, advance } => {
            tracing::info!(room = %room_code, player = %player_id, ?advance, "player disconnected, grace period started");
            arm_grace_timer(state, &room_code, &player_id).await;
        }
        DisconnectOutcome::NotAMember => unreachable!(),
    }

    state
        .fanout
        .send_room(&room_code, ServerMessage::GameUpdate { state: snapshot })
        .await;
}

/// Arm (or replace) the grace timer that removes a disconnected player once
/// the grace period elapses without a rejoin.
pub async fn arm_grace_timer(state: &Arc<AppState>, room_code: &str, player_id: &str) {
    let handle = tokio::spawn(grace_task(
        state.clone(),
        room_code.to_string(),
        player_id.to_string(),
    ));
    state.arm_grace_timer(player_id.to_string(), handle).await;
}

async fn grace_task(state: Arc<AppState>, room_code: RoomCode, player_id: PlayerId) {
    tokio::time::sleep(state.config.grace_period).await;

    let broadcast = {
        let mut rooms = state.registry.rooms.write().await;
        match rooms.get_mut(&room_code) {
            Some(room) => match room.grace_expired(&player_id) {
                Some(outcome) if outcome.room_empty => {
                    tracing::info!(room = %room_code, "last player removed, deleting room");
                    rooms.remove(&room_code);
                    None
                }
                Some(outcome) => {
                    tracing::info!(
                        room = %room_code,
                        player = %outcome.removed.name,
                        "grace period expired, player removed"
                    );
                    Some(room.snapshot())
                }
                // Player rejoined (or was already removed); stale timer.
                None => None,
            },
            // Room vanished while the timer was pending.
            None => None,
        }
    };

    if let Some(snapshot) = broadcast {
        state
            .fanout
            .send_room(&room_code, ServerMessage::GameUpdate { state: snapshot })
            .await;
    }

    state.grace_timers.lock().await.remove(&player_id);
}

/// Schedule the deferred advance out of the winner display. Purely a
/// presentation pause; correctness does not depend on it firing.
pub fn schedule_round_advance(state: Arc<AppState>, room_code: RoomCode, round_serial: u64) {
    tokio::spawn(async move {
        tokio::time::sleep(state.config.winner_delay).await;

        let snapshot = {
            let mut rooms = state.registry.rooms.write().await;
            let Some(room) = rooms.get_mut(&room_code) else {
                return;
            };
            // Stale guard: a skip or a removal-driven advance already moved
            // this room past the round the timer belonged to. The phase check
            // covers advances that ended the game, which leave the serial and
            // turn phase as they were.
            if room.phase != GamePhase::InGame
                || room.round_serial != round_serial
                || room.turn_phase != TurnPhase::Winner
            {
                return;
            }
            let advance = room.start_next_round();
            if advance == RoundAdvance::RoomEmpty {
                rooms.remove(&room_code);
                return;
            }
            room.snapshot()
        };

        state
            .fanout
            .send_room(&room_code, ServerMessage::GameUpdate { state: snapshot })
            .await;
    });
}
