//! Full-state broadcast model: every change re-sends the entire room.
//! Deliberately no incremental diffing; rooms hold at most eight players.

use super::Room;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub player_id: PlayerId,
    pub name: String,
    pub score: u32,
    pub is_host: bool,
    pub is_spectating: bool,
    pub connected: bool,
    pub hand: Vec<CardText>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingJoinView {
    pub request_id: RequestId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub room_code: RoomCode,
    pub started: bool,
    pub phase: GamePhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_phase: Option<TurnPhase>,
    pub turn_limit: u32,
    pub rounds_played: u32,
    pub players: Vec<PlayerView>,
    pub pending_joins: Vec<PendingJoinView>,
    pub current_judge: Option<PlayerId>,
    pub current_judge_index: Option<usize>,
    pub current_prompt_card: Option<CardText>,
    pub played_cards: HashMap<PlayerId, CardText>,
    pub last_winner: Option<LastWinner>,
    pub prompt_deck_remaining: usize,
    pub response_deck_remaining: usize,
    /// Names tied for the top score; populated once the game is over.
    pub game_winners: Vec<String>,
}

impl Room {
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_code: self.code.clone(),
            started: self.started,
            phase: self.phase,
            turn_phase: match self.phase {
                GamePhase::Lobby => None,
                _ => Some(self.turn_phase),
            },
            turn_limit: self.turn_limit,
            rounds_played: self.rounds_played,
            players: self
                .players
                .iter()
                .map(|p| PlayerView {
                    player_id: p.player_id.clone(),
                    name: p.name.clone(),
                    score: p.score,
                    is_host: p.is_host,
                    is_spectating: p.is_spectating,
                    connected: p.is_connected(),
                    hand: p.hand.clone(),
                })
                .collect(),
            pending_joins: self
                .pending_joins
                .iter()
                .map(|r| PendingJoinView {
                    request_id: r.request_id.clone(),
                    name: r.name.clone(),
                })
                .collect(),
            current_judge: self.judge_id.clone(),
            current_judge_index: self.judge_index(),
            current_prompt_card: self.current_prompt_card.clone(),
            played_cards: self.played_cards.clone(),
            last_winner: self.last_winner.clone(),
            prompt_deck_remaining: self.prompt_deck.len(),
            response_deck_remaining: self.response_deck.len(),
            game_winners: if self.phase == GamePhase::GameOver {
                self.game_winners()
            } else {
                Vec::new()
            },
        }
    }

    /// Every player holding the top score, in seat order.
    pub fn game_winners(&self) -> Vec<String> {
        let Some(top) = self.players.iter().map(|p| p.score).max() else {
            return Vec::new();
        };
        self.players
            .iter()
            .filter(|p| p.score == top)
            .map(|p| p.name.clone())
            .collect()
    }
}
