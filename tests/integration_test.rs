use cardroom::config::ServerConfig;
use cardroom::protocol::{ClientMessage, ServerMessage};
use cardroom::reconcile;
use cardroom::room::Room;
use cardroom::state::AppState;
use cardroom::types::{GamePhase, TurnPhase, HAND_SIZE};
use cardroom::ws::handlers::handle_message;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Test config with millisecond timers so grace/winner races run fast.
fn test_state() -> Arc<AppState> {
    Arc::new(AppState::new(ServerConfig {
        port: 0,
        grace_period: Duration::from_millis(40),
        winner_delay: Duration::from_millis(40),
    }))
}

/// Register a fake connection and return its outbound message stream.
async fn connect(state: &Arc<AppState>, id: &str) -> mpsc::UnboundedReceiver<ServerMessage> {
    let (tx, rx) = mpsc::unbounded_channel();
    state.fanout.register(id.to_string(), tx).await;
    rx
}

/// Simulate the transport dropping a connection.
async fn disconnect(state: &Arc<AppState>, id: &str) {
    state.fanout.unregister(id).await;
    reconcile::handle_disconnect(state, id).await;
}

async fn room_clone(state: &Arc<AppState>, code: &str) -> Room {
    state
        .registry
        .with_room(code, |room| room.clone())
        .await
        .expect("room should exist")
}

async fn room_exists(state: &Arc<AppState>, code: &str) -> bool {
    state.registry.with_room(code, |_| ()).await.is_ok()
}

/// Create a room plus `extra` players joined in the lobby.
/// Connection ids are "c0" (host) through "cN"; returns (code, player ids).
async fn setup_room(state: &Arc<AppState>, extra: usize) -> (String, Vec<String>) {
    let created = handle_message(
        ClientMessage::CreateGame {
            player_name: "Ana".to_string(),
        },
        "c0",
        state,
    )
    .await;
    let (code, host_id) = match created {
        Some(ServerMessage::GameCreated {
            state: snapshot,
            player_id,
        }) => (snapshot.room_code, player_id),
        other => panic!("expected game_created, got {:?}", other),
    };

    let mut player_ids = vec![host_id];
    let names = ["Ben", "Cleo", "Dana", "Eli", "Fay", "Gus", "Hana"];
    for i in 0..extra {
        let reply = handle_message(
            ClientMessage::JoinGame {
                room_code: code.clone(),
                player_name: names[i].to_string(),
            },
            &format!("c{}", i + 1),
            state,
        )
        .await;
        match reply {
            Some(ServerMessage::JoinedGame { player_id, .. }) => player_ids.push(player_id),
            other => panic!("expected joined_game, got {:?}", other),
        }
    }
    (code, player_ids)
}

async fn start_game(state: &Arc<AppState>, code: &str) {
    let reply = handle_message(
        ClientMessage::StartGame {
            room_code: code.to_string(),
        },
        "c0",
        state,
    )
    .await;
    assert!(reply.is_none(), "start should broadcast, not reply: {:?}", reply);
}

/// Every connected non-judge participant plays their first card.
async fn play_all_non_judges(state: &Arc<AppState>, code: &str) {
    let room = room_clone(state, code).await;
    for player in &room.players {
        if room.is_judge(&player.player_id) || player.is_spectating {
            continue;
        }
        let Some(conn) = player.connection_id.clone() else {
            continue;
        };
        let card = player.hand[0].clone();
        handle_message(
            ClientMessage::PlayResponseCard {
                room_code: code.to_string(),
                card_text: card,
            },
            &conn,
            state,
        )
        .await;
    }
}

#[tokio::test]
async fn full_game_flow_to_game_over() {
    let state = test_state();
    let _rx0 = connect(&state, "c0").await;
    let _rx1 = connect(&state, "c1").await;
    let _rx2 = connect(&state, "c2").await;

    let (code, players) = setup_room(&state, 2).await;
    handle_message(
        ClientMessage::HostUpdateSettings {
            room_code: code.clone(),
            turn_limit: 1,
        },
        "c0",
        &state,
    )
    .await;
    start_game(&state, &code).await;

    let room = room_clone(&state, &code).await;
    assert_eq!(room.phase, GamePhase::InGame);
    assert_eq!(room.judge_id.as_deref(), Some(players[0].as_str()));
    assert!(room.players.iter().all(|p| p.hand.len() == HAND_SIZE));

    // One full judge rotation: Ana, Ben, Cleo each judge once.
    for _ in 0..3 {
        play_all_non_judges(&state, &code).await;
        let room = room_clone(&state, &code).await;
        assert_eq!(room.turn_phase, TurnPhase::Judging);

        let judge_conn = room.judge().unwrap().connection_id.clone().unwrap();
        let winning_card = room.played_cards.values().next().unwrap().clone();
        handle_message(
            ClientMessage::JudgeSelectWinner {
                room_code: code.clone(),
                card_text: winning_card,
            },
            &judge_conn,
            &state,
        )
        .await;

        let room = room_clone(&state, &code).await;
        if room.phase == GamePhase::GameOver {
            break;
        }
        assert_eq!(room.turn_phase, TurnPhase::Winner);
        assert!(room.last_winner.is_some());

        // Host skips the winner display instead of waiting it out.
        handle_message(
            ClientMessage::HostSkipRound {
                room_code: code.clone(),
            },
            "c0",
            &state,
        )
        .await;
    }

    // Let any preempted winner timer fire; it must not resurrect the game.
    tokio::time::sleep(Duration::from_millis(80)).await;
    let room = room_clone(&state, &code).await;
    assert_eq!(room.phase, GamePhase::GameOver);
    assert_eq!(room.rounds_played, 1);
    assert!(!room.game_winners().is_empty());
}

#[tokio::test]
async fn winner_timer_advances_round_on_its_own() {
    let state = test_state();
    let _rx0 = connect(&state, "c0").await;
    let _rx1 = connect(&state, "c1").await;
    let _rx2 = connect(&state, "c2").await;

    let (code, _players) = setup_room(&state, 2).await;
    start_game(&state, &code).await;
    play_all_non_judges(&state, &code).await;

    let room = room_clone(&state, &code).await;
    let serial = room.round_serial;
    let card = room.played_cards.values().next().unwrap().clone();
    handle_message(
        ClientMessage::JudgeSelectWinner {
            room_code: code.clone(),
            card_text: card,
        },
        "c0",
        &state,
    )
    .await;

    tokio::time::sleep(Duration::from_millis(80)).await;
    let room = room_clone(&state, &code).await;
    assert_eq!(room.turn_phase, TurnPhase::Playing);
    assert_eq!(room.round_serial, serial + 1);
    assert!(room.last_winner.is_none());
    assert_ne!(room.judge_id.as_deref(), Some(room.players[0].player_id.as_str()));
}

#[tokio::test]
async fn skip_round_preempts_winner_timer_without_double_advance() {
    let state = test_state();
    let _rx0 = connect(&state, "c0").await;
    let _rx1 = connect(&state, "c1").await;
    let _rx2 = connect(&state, "c2").await;

    let (code, _players) = setup_room(&state, 2).await;
    start_game(&state, &code).await;
    play_all_non_judges(&state, &code).await;

    let room = room_clone(&state, &code).await;
    let card = room.played_cards.values().next().unwrap().clone();
    handle_message(
        ClientMessage::JudgeSelectWinner {
            room_code: code.clone(),
            card_text: card,
        },
        "c0",
        &state,
    )
    .await;

    // Skip immediately; the pending winner timer is now stale.
    handle_message(
        ClientMessage::HostSkipRound {
            room_code: code.clone(),
        },
        "c0",
        &state,
    )
    .await;
    let serial_after_skip = room_clone(&state, &code).await.round_serial;
    let judge_after_skip = room_clone(&state, &code).await.judge_id.clone();

    tokio::time::sleep(Duration::from_millis(80)).await;
    let room = room_clone(&state, &code).await;
    assert_eq!(room.round_serial, serial_after_skip, "stale timer must no-op");
    assert_eq!(room.judge_id, judge_after_skip);
}

#[tokio::test]
async fn rejoin_within_grace_period_keeps_the_seat() {
    let state = test_state();
    let _rx0 = connect(&state, "c0").await;
    let _rx1 = connect(&state, "c1").await;
    let _rx2 = connect(&state, "c2").await;

    let (code, players) = setup_room(&state, 2).await;
    start_game(&state, &code).await;

    disconnect(&state, "c1").await;
    let room = room_clone(&state, &code).await;
    assert!(!room.player(&players[1]).unwrap().is_connected());

    let _rx1b = connect(&state, "c1b").await;
    let reply = handle_message(
        ClientMessage::RejoinGame {
            room_code: code.clone(),
            player_id: players[1].clone(),
        },
        "c1b",
        &state,
    )
    .await;
    assert!(matches!(reply, Some(ServerMessage::GameUpdate { .. })));

    // Outlive the grace period: the cancelled timer must not remove anyone.
    tokio::time::sleep(Duration::from_millis(80)).await;
    let room = room_clone(&state, &code).await;
    assert_eq!(room.players.len(), 3);
    assert!(room.player(&players[1]).unwrap().is_connected());
}

#[tokio::test]
async fn grace_expiry_removes_player_permanently() {
    let state = test_state();
    let _rx0 = connect(&state, "c0").await;
    let _rx1 = connect(&state, "c1").await;
    let _rx2 = connect(&state, "c2").await;

    let (code, players) = setup_room(&state, 2).await;
    start_game(&state, &code).await;

    disconnect(&state, "c1").await;
    tokio::time::sleep(Duration::from_millis(80)).await;

    let room = room_clone(&state, &code).await;
    assert_eq!(room.players.len(), 2);
    assert!(room.player(&players[1]).is_none());
}

#[tokio::test]
async fn disconnected_player_does_not_block_round_and_removal_does_not_double_advance() {
    let state = test_state();
    let _rx0 = connect(&state, "c0").await;
    let _rx1 = connect(&state, "c1").await;
    let _rx2 = connect(&state, "c2").await;

    let (code, _players) = setup_room(&state, 2).await;
    start_game(&state, &code).await;

    // Ben plays; Cleo goes silent with her card unplayed.
    let room = room_clone(&state, &code).await;
    let ben_card = room.players[1].hand[0].clone();
    handle_message(
        ClientMessage::PlayResponseCard {
            room_code: code.clone(),
            card_text: ben_card,
        },
        "c1",
        &state,
    )
    .await;
    assert_eq!(room_clone(&state, &code).await.turn_phase, TurnPhase::Playing);

    disconnect(&state, "c2").await;
    let room = room_clone(&state, &code).await;
    assert_eq!(room.turn_phase, TurnPhase::Judging);
    let serial = room.round_serial;

    // Permanent removal after the grace period must not advance again.
    tokio::time::sleep(Duration::from_millis(80)).await;
    let room = room_clone(&state, &code).await;
    assert_eq!(room.players.len(), 2);
    assert_eq!(room.turn_phase, TurnPhase::Judging);
    assert_eq!(room.round_serial, serial);
}

#[tokio::test]
async fn judge_disconnect_advances_exactly_once() {
    let state = test_state();
    let _rx0 = connect(&state, "c0").await;
    let _rx1 = connect(&state, "c1").await;
    let _rx2 = connect(&state, "c2").await;

    let (code, players) = setup_room(&state, 2).await;
    start_game(&state, &code).await;

    let before = room_clone(&state, &code).await.round_serial;
    disconnect(&state, "c0").await; // Ana is host and judge

    let room = room_clone(&state, &code).await;
    assert_eq!(room.round_serial, before + 1, "disconnect advances the round");
    let judge = room.judge().unwrap();
    assert!(judge.is_connected());
    assert_ne!(judge.player_id, players[0]);

    // Timer-driven removal promotes a new host but must not advance again.
    tokio::time::sleep(Duration::from_millis(80)).await;
    let room = room_clone(&state, &code).await;
    assert_eq!(room.players.len(), 2);
    assert_eq!(room.round_serial, before + 1);
    assert_eq!(room.players.iter().filter(|p| p.is_host).count(), 1);
    assert!(room.players[0].is_host);
}

#[tokio::test]
async fn second_disconnect_replaces_grace_timer_instead_of_stacking() {
    let state = test_state();
    let _rx0 = connect(&state, "c0").await;
    let _rx1 = connect(&state, "c1").await;
    let _rx2 = connect(&state, "c2").await;

    let (code, players) = setup_room(&state, 2).await;
    start_game(&state, &code).await;

    disconnect(&state, "c1").await;

    // Rejoin and drop again just before the first timer would have fired.
    tokio::time::sleep(Duration::from_millis(25)).await;
    let _rx1b = connect(&state, "c1b").await;
    handle_message(
        ClientMessage::RejoinGame {
            room_code: code.clone(),
            player_id: players[1].clone(),
        },
        "c1b",
        &state,
    )
    .await;
    disconnect(&state, "c1b").await;

    // Past the first deadline but within the second: still seated.
    tokio::time::sleep(Duration::from_millis(25)).await;
    assert!(room_clone(&state, &code).await.player(&players[1]).is_some());

    // Past the second deadline: removed.
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert!(room_clone(&state, &code).await.player(&players[1]).is_none());
}

#[tokio::test]
async fn room_is_deleted_when_last_grace_period_expires() {
    let state = test_state();
    let _rx0 = connect(&state, "c0").await;

    let (code, _players) = setup_room(&state, 0).await;
    start_game(&state, &code).await;

    disconnect(&state, "c0").await;
    assert!(room_exists(&state, &code).await);

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(!room_exists(&state, &code).await);
}

#[tokio::test]
async fn kick_notifies_target_and_survives_pending_grace_timer() {
    let state = test_state();
    let _rx0 = connect(&state, "c0").await;
    let mut rx1 = connect(&state, "c1").await;
    let _rx2 = connect(&state, "c2").await;

    let (code, players) = setup_room(&state, 2).await;
    start_game(&state, &code).await;

    handle_message(
        ClientMessage::HostKickPlayer {
            room_code: code.clone(),
            target_player_id: players[1].clone(),
        },
        "c0",
        &state,
    )
    .await;

    let mut saw_kick = false;
    while let Ok(msg) = rx1.try_recv() {
        if matches!(msg, ServerMessage::YouWereKicked) {
            saw_kick = true;
        }
    }
    assert!(saw_kick);
    assert!(room_clone(&state, &code).await.player(&players[1]).is_none());

    // Kicking a player whose grace timer is pending cancels the timer.
    disconnect(&state, "c2").await;
    handle_message(
        ClientMessage::HostKickPlayer {
            room_code: code.clone(),
            target_player_id: players[2].clone(),
        },
        "c0",
        &state,
    )
    .await;
    tokio::time::sleep(Duration::from_millis(80)).await;
    let room = room_clone(&state, &code).await;
    assert_eq!(room.players.len(), 1);
    assert!(room.players[0].is_host);
}

#[tokio::test]
async fn join_full_room_is_rejected() {
    let state = test_state();
    for i in 0..9 {
        let _rx = connect(&state, &format!("c{}", i)).await;
    }
    let (code, _players) = setup_room(&state, 7).await;

    let reply = handle_message(
        ClientMessage::JoinGame {
            room_code: code.clone(),
            player_name: "Iris".to_string(),
        },
        "c8",
        &state,
    )
    .await;
    match reply {
        Some(ServerMessage::Error { code, .. }) => assert_eq!(code, "ROOM_FULL"),
        other => panic!("expected error reply, got {:?}", other),
    }
}

#[tokio::test]
async fn join_of_unknown_room_is_an_error() {
    let state = test_state();
    let _rx = connect(&state, "c0").await;
    let reply = handle_message(
        ClientMessage::JoinGame {
            room_code: "0000".to_string(),
            player_name: "Ana".to_string(),
        },
        "c0",
        &state,
    )
    .await;
    match reply {
        Some(ServerMessage::Error { code, .. }) => assert_eq!(code, "ROOM_NOT_FOUND"),
        other => panic!("expected error reply, got {:?}", other),
    }
}

#[tokio::test]
async fn midgame_join_needs_host_approval() {
    let state = test_state();
    let mut rx0 = connect(&state, "c0").await;
    let _rx1 = connect(&state, "c1").await;
    let mut rx3 = connect(&state, "c3").await;

    let (code, _players) = setup_room(&state, 1).await;
    start_game(&state, &code).await;

    let reply = handle_message(
        ClientMessage::JoinGame {
            room_code: code.clone(),
            player_name: "Dana".to_string(),
        },
        "c3",
        &state,
    )
    .await;
    assert!(matches!(reply, Some(ServerMessage::WaitingForHost)));

    // The host (and only the host) gets the knock.
    let mut request_id = None;
    while let Ok(msg) = rx0.try_recv() {
        if let ServerMessage::JoinRequest { name, request_id: id } = msg {
            assert_eq!(name, "Dana");
            request_id = Some(id);
        }
    }
    let request_id = request_id.expect("host should receive join_request");

    handle_message(
        ClientMessage::HostDecision {
            room_code: code.clone(),
            request_id,
            approved: true,
        },
        "c0",
        &state,
    )
    .await;

    // The requester is now seated as a spectator with a full hand.
    let mut dana_id = None;
    while let Ok(msg) = rx3.try_recv() {
        if let ServerMessage::JoinedGame { player_id, .. } = msg {
            dana_id = Some(player_id);
        }
    }
    let dana_id = dana_id.expect("requester should receive joined_game");

    let room = room_clone(&state, &code).await;
    let dana = room.player(&dana_id).unwrap();
    assert!(dana.is_spectating);
    assert_eq!(dana.hand.len(), HAND_SIZE);

    // Spectators become full participants at the next round boundary.
    handle_message(
        ClientMessage::HostForceContinue {
            room_code: code.clone(),
        },
        "c0",
        &state,
    )
    .await;
    handle_message(
        ClientMessage::HostSkipRound {
            room_code: code.clone(),
        },
        "c0",
        &state,
    )
    .await;
    let room = room_clone(&state, &code).await;
    assert!(!room.player(&dana_id).unwrap().is_spectating);
}

#[tokio::test]
async fn denied_midgame_join_informs_the_requester() {
    let state = test_state();
    let mut rx0 = connect(&state, "c0").await;
    let _rx1 = connect(&state, "c1").await;
    let mut rx3 = connect(&state, "c3").await;

    let (code, _players) = setup_room(&state, 1).await;
    start_game(&state, &code).await;

    handle_message(
        ClientMessage::JoinGame {
            room_code: code.clone(),
            player_name: "Dana".to_string(),
        },
        "c3",
        &state,
    )
    .await;
    let request_id = loop {
        match rx0.try_recv() {
            Ok(ServerMessage::JoinRequest { request_id, .. }) => break request_id,
            Ok(_) => continue,
            Err(_) => panic!("host should receive join_request"),
        }
    };

    handle_message(
        ClientMessage::HostDecision {
            room_code: code.clone(),
            request_id,
            approved: false,
        },
        "c0",
        &state,
    )
    .await;

    let mut denied = false;
    while let Ok(msg) = rx3.try_recv() {
        if matches!(&msg, ServerMessage::Error { code, .. } if code == "JOIN_DENIED") {
            denied = true;
        }
    }
    assert!(denied);
    assert_eq!(room_clone(&state, &code).await.players.len(), 2);
}

#[tokio::test]
async fn unauthorized_host_commands_are_silently_ignored() {
    let state = test_state();
    let _rx0 = connect(&state, "c0").await;
    let _rx1 = connect(&state, "c1").await;

    let (code, players) = setup_room(&state, 1).await;

    // Non-host tries host-only commands: no reply, no state change.
    let reply = handle_message(
        ClientMessage::StartGame {
            room_code: code.clone(),
        },
        "c1",
        &state,
    )
    .await;
    assert!(reply.is_none());
    assert!(!room_clone(&state, &code).await.started);

    let reply = handle_message(
        ClientMessage::HostKickPlayer {
            room_code: code.clone(),
            target_player_id: players[0].clone(),
        },
        "c1",
        &state,
    )
    .await;
    assert!(reply.is_none());
    assert_eq!(room_clone(&state, &code).await.players.len(), 2);
}

#[tokio::test]
async fn play_again_returns_the_table_to_the_lobby() {
    let state = test_state();
    let _rx0 = connect(&state, "c0").await;
    let _rx1 = connect(&state, "c1").await;
    let _rx2 = connect(&state, "c2").await;

    let (code, _players) = setup_room(&state, 2).await;
    handle_message(
        ClientMessage::HostUpdateSettings {
            room_code: code.clone(),
            turn_limit: 1,
        },
        "c0",
        &state,
    )
    .await;
    start_game(&state, &code).await;

    // Burn through the single rotation via host skips.
    for _ in 0..3 {
        if room_clone(&state, &code).await.phase == GamePhase::GameOver {
            break;
        }
        handle_message(
            ClientMessage::HostForceContinue {
                room_code: code.clone(),
            },
            "c0",
            &state,
        )
        .await;
        handle_message(
            ClientMessage::HostSkipRound {
                room_code: code.clone(),
            },
            "c0",
            &state,
        )
        .await;
    }
    assert_eq!(room_clone(&state, &code).await.phase, GamePhase::GameOver);

    handle_message(
        ClientMessage::HostPlayAgain {
            room_code: code.clone(),
        },
        "c0",
        &state,
    )
    .await;
    let room = room_clone(&state, &code).await;
    assert_eq!(room.phase, GamePhase::Lobby);
    assert!(!room.started);
    assert!(room.players.iter().all(|p| p.score == 0 && p.hand.is_empty()));
}
