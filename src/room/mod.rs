//! Per-room game state and the operations that mutate it.
//!
//! Everything in here is synchronous and free of I/O: the gateway (`ws`) and
//! the reconciler (`reconcile`) serialize access through the registry lock,
//! mutate via these operations, and handle broadcasting and timers themselves.

mod ops;
mod snapshot;

pub use ops::{
    DisconnectOutcome, HostDecisionOutcome, JoinOutcome, RemovalOutcome, RoundAdvance,
};
pub use snapshot::{PendingJoinView, PlayerView, RoomSnapshot};

use crate::deck;
use crate::types::*;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Room {
    pub code: RoomCode,
    /// Join order; doubles as the judge-rotation order.
    pub players: Vec<Player>,
    pub pending_joins: Vec<PendingJoin>,
    pub started: bool,
    pub phase: GamePhase,
    pub turn_phase: TurnPhase,
    pub turn_limit: u32,
    pub rounds_played: u32,
    /// The judge is tracked by stable id, not index, so player removal can't
    /// leave it dangling. Resolved to a position only for rotation/snapshots.
    pub judge_id: Option<PlayerId>,
    pub current_prompt_card: Option<CardText>,
    pub played_cards: HashMap<PlayerId, CardText>,
    pub last_winner: Option<LastWinner>,
    pub prompt_deck: Vec<CardText>,
    pub response_deck: Vec<CardText>,
    /// Bumped every time a round starts. Deferred round-advance timers carry
    /// the serial they were scheduled under and no-op if it has moved on.
    pub round_serial: u64,
}

impl Room {
    /// A fresh room in lobby phase with its creator as sole player and host.
    pub fn new(code: RoomCode, host_name: String, connection_id: ConnectionId) -> Self {
        Self {
            code,
            players: vec![Player::new(host_name, connection_id, true)],
            pending_joins: Vec::new(),
            started: false,
            phase: GamePhase::Lobby,
            turn_phase: TurnPhase::Playing,
            turn_limit: DEFAULT_TURN_LIMIT,
            rounds_played: 0,
            judge_id: None,
            current_prompt_card: None,
            played_cards: HashMap::new(),
            last_winner: None,
            prompt_deck: Vec::new(),
            response_deck: Vec::new(),
            round_serial: 0,
        }
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    pub fn player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.player_id == player_id)
    }

    pub fn player_by_connection(&self, connection_id: &str) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.connection_id.as_deref() == Some(connection_id))
    }

    pub fn host(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_host)
    }

    pub fn judge(&self) -> Option<&Player> {
        self.judge_id.as_deref().and_then(|id| self.player(id))
    }

    /// Position of the current judge in the players sequence.
    pub fn judge_index(&self) -> Option<usize> {
        let judge_id = self.judge_id.as_deref()?;
        self.players.iter().position(|p| p.player_id == judge_id)
    }

    pub fn is_judge(&self, player_id: &str) -> bool {
        self.judge_id.as_deref() == Some(player_id)
    }

    /// Connected, non-spectating players: the ones a round rotates through.
    pub fn active_participants(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.is_connected() && !p.is_spectating)
            .collect()
    }

    /// Active participants minus the judge: the set expected to play a card.
    pub fn non_judge_active_count(&self) -> usize {
        self.active_participants()
            .iter()
            .filter(|p| !self.is_judge(&p.player_id))
            .count()
    }

    pub fn draw_prompt_card(&mut self) -> CardText {
        if self.prompt_deck.is_empty() {
            self.prompt_deck = deck::new_prompt_deck();
        }
        // Replenished above; a fresh deck is never empty.
        self.prompt_deck.pop().unwrap_or_default()
    }

    /// Top up one player's hand to `HAND_SIZE`, replenishing the response
    /// deck as needed. Recycled decks can contain cards still held, so draws
    /// that would duplicate a card in this hand are discarded.
    pub fn top_up_hand(&mut self, player_index: usize) {
        while self.players[player_index].hand.len() < HAND_SIZE {
            if self.response_deck.is_empty() {
                self.response_deck = deck::new_response_deck();
            }
            if let Some(card) = self.response_deck.pop() {
                if !self.players[player_index].hand.contains(&card) {
                    self.players[player_index].hand.push(card);
                }
            }
        }
    }

    /// Advance to judging once every reachable non-judge participant has
    /// played. Used both on card play and when a disconnect shrinks the set
    /// of players the round is waiting on.
    pub fn maybe_advance_to_judging(&mut self) -> bool {
        if self.phase == GamePhase::InGame
            && self.turn_phase == TurnPhase::Playing
            && self.played_cards.len() >= self.non_judge_active_count()
        {
            self.turn_phase = TurnPhase::Judging;
            return true;
        }
        false
    }
}
