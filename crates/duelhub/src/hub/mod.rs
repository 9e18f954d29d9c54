//! The hub: all shared matchmaking and battle state, and the handlers
//! that change it.
//!
//! A `Hub` is plain data plus synchronous methods. It is never shared
//! between tasks; the hub actor owns the only instance and feeds it one
//! command at a time, so handlers never interleave.
//!
//! Handlers are split by concern:
//! - `lobby`: waiting room and challenges
//! - `battle`: ready handshake and turn relay
//! - `supervisor`: unwinding after a dropped connection

mod battle;
mod lobby;
mod supervisor;


use duelhub_battle::BattleBook;
use duelhub_protocol::{ClientMessage, PlayerId};
use duelhub_session::{ChallengeBook, PlayerRegistry, PlayerSender};

/// Counters describing the hub at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HubStats {
    /// Connected players, joined or not.
    pub players: usize,
    /// Players listed in the waiting room.
    pub waiting: usize,
    /// Outstanding challenges.
    pub challenges: usize,
    /// Live battles.
    pub battles: usize,
}

/// Owns every player record, pending challenge and live battle.
#[derive(Debug, Default)]
pub struct Hub {
    players: PlayerRegistry,
    challenges: ChallengeBook,
    battles: BattleBook,
}

impl Hub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new connection. The player is greeted with
    /// `connected` before anything else is sent to it.
    pub fn connect(&mut self, sender: PlayerSender) -> PlayerId {
        self.players.register(sender)
    }

    /// Handles one decoded client message.
    ///
    /// Requests that reference an unknown player, address, challenge or
    /// battle are logged and dropped; the client is never told.
    pub fn handle(&mut self, player_id: &PlayerId, msg: ClientMessage) {
        let kind = msg.kind();
        tracing::debug!(%player_id, kind, "handling message");

        let result = match msg {
            ClientMessage::JoinWaitingRoom { address, agent } => {
                self.join_waiting_room(player_id, address, agent)
            }
            ClientMessage::LeaveWaitingRoom => {
                self.leave_waiting_room(player_id)
            }
            ClientMessage::SendChallenge { opponent_address } => {
                self.send_challenge(player_id, opponent_address)
            }
            ClientMessage::AcceptChallenge { challenger_address } => {
                self.accept_challenge(player_id, challenger_address)
            }
            ClientMessage::DeclineChallenge { challenger_address } => {
                self.decline_challenge(player_id, challenger_address)
            }
            ClientMessage::BattleReady { battle_id } => {
                self.battle_ready(player_id, battle_id)
            }
            ClientMessage::BattleAction { action } => {
                self.battle_action(player_id, action)
            }
        };

        match result {
            Ok(()) => {}
            Err(e) if e.is_referential_miss() => {
                tracing::info!(%player_id, kind, error = %e, "request dropped");
            }
            Err(e) => {
                tracing::warn!(%player_id, kind, error = %e, "request failed");
            }
        }
    }

    /// Current counters.
    pub fn stats(&self) -> HubStats {
        HubStats {
            players: self.players.len(),
            waiting: self.players.waiting_roster().len(),
            challenges: self.challenges.len(),
            battles: self.battles.len(),
        }
    }

    /// Read access to the player registry.
    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    /// Read access to the pending challenges.
    pub fn challenges(&self) -> &ChallengeBook {
        &self.challenges
    }

    /// Read access to the live battles.
    pub fn battles(&self) -> &BattleBook {
        &self.battles
    }
}
