//! Room state machine operations.
//!
//! Each operation validates authorization and preconditions up front and
//! returns a `GameError` instead of mutating on violation. Outcome enums tell
//! the caller which side effects (broadcasts, timers, room deletion) to run;
//! nothing in here performs I/O.

use super::Room;
use crate::deck;
use crate::error::GameError;
use crate::types::*;

/// Result of a join attempt against a room.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinOutcome {
    /// Joined the lobby directly.
    Joined(PlayerId),
    /// Game already started; queued for host approval.
    Pending(RequestId),
}

/// Result of the host ruling on a pending join.
#[derive(Debug, Clone, PartialEq)]
pub enum HostDecisionOutcome {
    Approved {
        player_id: PlayerId,
        connection_id: ConnectionId,
    },
    Denied {
        connection_id: ConnectionId,
    },
}

/// What happened when a round tried to advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAdvance {
    /// New judge assigned, cards dealt, next round underway.
    Continued,
    /// Turn limit reached; the room is showing final scores.
    GameOver,
    /// Nobody active to rotate through; the room sits idle.
    Idle,
    /// No players left at all; the caller must delete the room.
    RoomEmpty,
}

/// Result of permanently removing a player (kick or grace expiry).
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalOutcome {
    pub removed: Player,
    /// Set when the removal forced a round advance (the judge left).
    pub advance: Option<RoundAdvance>,
    pub room_empty: bool,
}

/// Result of a transport-level disconnect landing on this room.
#[derive(Debug, Clone)]
pub enum DisconnectOutcome {
    /// The connection belonged to a queued join request; it was dropped.
    PendingDropped,
    /// A player went unreachable; the caller arms their grace timer.
    PlayerDisconnected {
        player_id: PlayerId,
        advance: Option<RoundAdvance>,
    },
    /// The connection wasn't part of this room.
    NotAMember,
}

impl Room {
    /// Join before the game starts, or queue for host approval after.
    pub fn join(&mut self, name: String, connection_id: ConnectionId) -> Result<JoinOutcome, GameError> {
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::RoomFull);
        }

        if self.started {
            // Mid-game joins need a reachable host to rule on them.
            if !self.host().map(Player::is_connected).unwrap_or(false) {
                return Err(GameError::HostUnavailable);
            }
            let request = PendingJoin {
                request_id: ulid::Ulid::new().to_string(),
                connection_id,
                name,
            };
            let request_id = request.request_id.clone();
            self.pending_joins.push(request);
            return Ok(JoinOutcome::Pending(request_id));
        }

        let player = Player::new(name, connection_id, false);
        let player_id = player.player_id.clone();
        self.players.push(player);
        Ok(JoinOutcome::Joined(player_id))
    }

    /// Host rules on a queued mid-game join. Approved players enter as
    /// spectators with a full hand and activate at the next round boundary.
    pub fn host_decision(
        &mut self,
        caller_connection: &str,
        request_id: &str,
        approved: bool,
    ) -> Result<HostDecisionOutcome, GameError> {
        self.require_host(caller_connection)?;

        let index = self
            .pending_joins
            .iter()
            .position(|r| r.request_id == request_id)
            .ok_or(GameError::InvalidTransition)?;
        let request = self.pending_joins.remove(index);

        if !approved {
            return Ok(HostDecisionOutcome::Denied {
                connection_id: request.connection_id,
            });
        }

        let mut player = Player::new(request.name, request.connection_id.clone(), false);
        player.is_spectating = true;
        let player_id = player.player_id.clone();
        self.players.push(player);
        let index = self.players.len() - 1;
        self.top_up_hand(index);

        Ok(HostDecisionOutcome::Approved {
            player_id,
            connection_id: request.connection_id,
        })
    }

    /// Host starts the game from the lobby.
    pub fn start(&mut self, caller_connection: &str) -> Result<(), GameError> {
        self.require_host(caller_connection)?;
        if self.started {
            return Err(GameError::InvalidTransition);
        }

        let (prompts, responses) = deck::new_decks();
        self.prompt_deck = prompts;
        self.response_deck = responses;

        self.started = true;
        self.phase = GamePhase::InGame;
        self.turn_phase = TurnPhase::Playing;
        self.rounds_played = 0;
        self.round_serial += 1;
        self.played_cards.clear();
        self.last_winner = None;
        // The creator's slot judges first.
        self.judge_id = Some(self.players[0].player_id.clone());
        self.current_prompt_card = Some(self.draw_prompt_card());

        for player in &mut self.players {
            player.score = 0;
            player.hand.clear();
            player.is_spectating = false;
        }
        for index in 0..self.players.len() {
            self.top_up_hand(index);
        }
        Ok(())
    }

    /// A non-judge participant plays a response card from their hand.
    /// Returns true when this submission tipped the round into judging.
    pub fn play_response_card(
        &mut self,
        caller_connection: &str,
        card_text: &str,
    ) -> Result<bool, GameError> {
        if self.phase != GamePhase::InGame || self.turn_phase != TurnPhase::Playing {
            return Err(GameError::InvalidTransition);
        }

        let player = self
            .player_by_connection(caller_connection)
            .ok_or(GameError::Unauthorized)?;
        if player.is_spectating || self.is_judge(&player.player_id) {
            return Err(GameError::Unauthorized);
        }
        let player_id = player.player_id.clone();

        if self.played_cards.contains_key(&player_id) {
            return Err(GameError::InvalidTransition);
        }

        let player = self.player_mut(&player_id).ok_or(GameError::Unauthorized)?;
        let card_index = player
            .hand
            .iter()
            .position(|c| c == card_text)
            .ok_or(GameError::InvalidTransition)?;
        // Removed from hand atomically with being recorded as played.
        let card = player.hand.remove(card_index);
        self.played_cards.insert(player_id, card);

        Ok(self.maybe_advance_to_judging())
    }

    /// The judge picks the winning card. Moves the round to the winner
    /// display; the caller schedules the deferred advance to the next round.
    pub fn judge_select_winner(
        &mut self,
        caller_connection: &str,
        card_text: &str,
    ) -> Result<(), GameError> {
        if self.phase != GamePhase::InGame || self.turn_phase != TurnPhase::Judging {
            return Err(GameError::InvalidTransition);
        }
        let caller = self
            .player_by_connection(caller_connection)
            .ok_or(GameError::Unauthorized)?;
        if !self.is_judge(&caller.player_id) {
            return Err(GameError::Unauthorized);
        }

        let winner_id = self
            .played_cards
            .iter()
            .find(|(_, card)| card.as_str() == card_text)
            .map(|(id, _)| id.clone())
            .ok_or(GameError::InvalidTransition)?;

        let prompt_card = self.current_prompt_card.clone().unwrap_or_default();
        let winner = self
            .player_mut(&winner_id)
            .ok_or(GameError::InvalidTransition)?;
        winner.score += 1;
        let winner_name = winner.name.clone();

        self.turn_phase = TurnPhase::Winner;
        self.last_winner = Some(LastWinner {
            name: winner_name,
            prompt_card,
            response_card: card_text.to_string(),
        });
        Ok(())
    }

    /// Advance to the next round: activate spectators, rotate the judge
    /// through the currently-active participants, count completed rotations,
    /// and redeal. A full rotation wrapping back to slot 0 ends the game once
    /// the turn limit is reached.
    pub fn start_next_round(&mut self) -> RoundAdvance {
        for player in &mut self.players {
            player.is_spectating = false;
        }

        let active_ids: Vec<PlayerId> = self
            .active_participants()
            .iter()
            .map(|p| p.player_id.clone())
            .collect();
        if active_ids.is_empty() {
            if self.players.is_empty() {
                return RoundAdvance::RoomEmpty;
            }
            return RoundAdvance::Idle;
        }

        // A judge no longer in the active list (disconnected or removed)
        // counts as the rotation wrapping.
        let next_index = match self
            .judge_id
            .as_deref()
            .and_then(|id| active_ids.iter().position(|a| a == id))
        {
            Some(current) => (current + 1) % active_ids.len(),
            None => 0,
        };

        if next_index == 0 {
            self.rounds_played += 1;
            if self.rounds_played >= self.turn_limit {
                self.phase = GamePhase::GameOver;
                return RoundAdvance::GameOver;
            }
        }

        self.judge_id = Some(active_ids[next_index].clone());
        self.current_prompt_card = Some(self.draw_prompt_card());
        self.played_cards.clear();
        self.turn_phase = TurnPhase::Playing;
        self.phase = GamePhase::InGame;
        self.last_winner = None;
        self.round_serial += 1;

        for index in 0..self.players.len() {
            if self.players[index].is_connected() && !self.players[index].is_spectating {
                self.top_up_hand(index);
            }
        }
        RoundAdvance::Continued
    }

    /// Host adjusts the number of judge rotations the game runs for.
    pub fn update_settings(&mut self, caller_connection: &str, turn_limit: u32) -> Result<(), GameError> {
        self.require_host(caller_connection)?;
        self.turn_limit = turn_limit.clamp(MIN_TURN_LIMIT, MAX_TURN_LIMIT);
        Ok(())
    }

    /// Host escape valve for a stalled round: force judging regardless of
    /// how many cards came in.
    pub fn force_continue(&mut self, caller_connection: &str) -> Result<(), GameError> {
        self.require_host(caller_connection)?;
        if self.phase != GamePhase::InGame || self.turn_phase != TurnPhase::Playing {
            return Err(GameError::InvalidTransition);
        }
        self.turn_phase = TurnPhase::Judging;
        Ok(())
    }

    /// Host skips an unresolved judge decision or the winner display,
    /// advancing immediately. The preempted winner timer goes stale via the
    /// serial bump inside `start_next_round`.
    pub fn skip_round(&mut self, caller_connection: &str) -> Result<RoundAdvance, GameError> {
        self.require_host(caller_connection)?;
        if self.phase != GamePhase::InGame
            || !matches!(self.turn_phase, TurnPhase::Judging | TurnPhase::Winner)
        {
            return Err(GameError::InvalidTransition);
        }
        Ok(self.start_next_round())
    }

    /// Host removes a player (never themselves).
    pub fn kick(
        &mut self,
        caller_connection: &str,
        target_player_id: &str,
    ) -> Result<RemovalOutcome, GameError> {
        let host = self.require_host(caller_connection)?;
        if host == target_player_id {
            return Err(GameError::Unauthorized);
        }
        self.remove_player(target_player_id)
            .ok_or(GameError::InvalidTransition)
    }

    /// Permanently remove a player; shared by kick and grace-period expiry.
    /// Handles host promotion and judge failover in the same operation so the
    /// room is never observed with a dangling judge or no host.
    pub fn remove_player(&mut self, player_id: &str) -> Option<RemovalOutcome> {
        let index = self.players.iter().position(|p| p.player_id == player_id)?;
        let was_judge = self.is_judge(player_id);
        let removed = self.players.remove(index);

        if self.players.is_empty() {
            return Some(RemovalOutcome {
                removed,
                advance: None,
                room_empty: true,
            });
        }

        if removed.is_host {
            // Prefer someone reachable; fall back to seat order.
            let new_host_id = self
                .players
                .iter()
                .find(|p| p.is_connected())
                .or_else(|| self.players.first())
                .map(|p| p.player_id.clone());
            if let Some(id) = new_host_id {
                if let Some(p) = self.player_mut(&id) {
                    p.is_host = true;
                }
            }
        }

        let mut advance = None;
        if self.phase == GamePhase::InGame {
            if was_judge {
                advance = Some(self.start_next_round());
            } else {
                // One fewer participant may be all the round was waiting on.
                self.maybe_advance_to_judging();
            }
        }

        Some(RemovalOutcome {
            removed,
            advance,
            room_empty: false,
        })
    }

    /// Back to the lobby for another game with the same table.
    pub fn play_again(&mut self, caller_connection: &str) -> Result<(), GameError> {
        self.require_host(caller_connection)?;
        if self.phase != GamePhase::GameOver {
            return Err(GameError::InvalidTransition);
        }

        self.started = false;
        self.phase = GamePhase::Lobby;
        self.turn_phase = TurnPhase::Playing;
        self.rounds_played = 0;
        self.round_serial += 1;
        self.judge_id = None;
        self.current_prompt_card = None;
        self.played_cards.clear();
        self.last_winner = None;
        for player in &mut self.players {
            player.score = 0;
            player.hand.clear();
            player.is_spectating = false;
        }
        Ok(())
    }

    /// A returning player rebinds their seat to a live connection.
    pub fn rejoin(&mut self, player_id: &str, connection_id: ConnectionId) -> Result<(), GameError> {
        let player = self.player_mut(player_id).ok_or(GameError::PlayerNotFound)?;
        player.connection_id = Some(connection_id);
        Ok(())
    }

    /// A transport connection dropped. The bound player keeps their seat but
    /// goes unreachable; if they were holding up the round (as judge, or as
    /// the last card the round was waiting on) the round moves without them.
    pub fn handle_disconnect(&mut self, connection_id: &str) -> DisconnectOutcome {
        if let Some(index) = self
            .pending_joins
            .iter()
            .position(|r| r.connection_id == connection_id)
        {
            self.pending_joins.remove(index);
            return DisconnectOutcome::PendingDropped;
        }

        let Some(player_id) = self
            .player_by_connection(connection_id)
            .map(|p| p.player_id.clone())
        else {
            return DisconnectOutcome::NotAMember;
        };
        if let Some(player) = self.player_mut(&player_id) {
            player.connection_id = None;
        }

        let mut advance = None;
        if self.phase == GamePhase::InGame {
            if self.judge().is_none() || self.is_judge(&player_id) {
                // Judge gone or slot unresolvable: advance rather than stall.
                advance = Some(self.start_next_round());
            } else {
                self.maybe_advance_to_judging();
            }
        }

        DisconnectOutcome::PlayerDisconnected { player_id, advance }
    }

    /// Grace period expired. Removes the player only if they are still
    /// unreachable; a rejoin that raced the timer wins.
    pub fn grace_expired(&mut self, player_id: &str) -> Option<RemovalOutcome> {
        let player = self.player(player_id)?;
        if player.is_connected() {
            return None;
        }
        self.remove_player(player_id)
    }

    /// Resolve the caller to a player and check the host flag.
    /// Returns the caller's player id.
    fn require_host(&self, caller_connection: &str) -> Result<PlayerId, GameError> {
        let caller = self
            .player_by_connection(caller_connection)
            .ok_or(GameError::Unauthorized)?;
        if !caller.is_host {
            return Err(GameError::Unauthorized);
        }
        Ok(caller.player_id.clone())
    }
}
