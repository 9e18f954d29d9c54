//! One duel's authoritative state.
//!
//! The server owns health; clients own everything else. Damage arrives
//! already computed and is applied as-is, and nothing checks that the
//! attacker actually holds the turn.

use std::collections::HashSet;

use duelhub_protocol::{BattleAction, BattleId, PlayerId, RelayedAction};

use crate::{BattleError, BattlePhase};

/// Starting (and maximum) health for each participant.
pub const MAX_HEALTH: u32 = 100;

/// What happened when a participant signalled readiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyOutcome {
    /// Both participants are now ready; the battle just became active.
    Started,
    /// Still waiting on the other participant, who should be told.
    Pending { notify: PlayerId },
    /// The battle was already active; nothing changed.
    AlreadyStarted,
}

/// The result of applying one action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    /// The participant who took the damage.
    pub defender: PlayerId,
    /// The attacker's health (unchanged by its own action).
    pub attacker_health: u32,
    /// The defender's health after the damage.
    pub defender_health: u32,
    /// The action with defaults filled in, as the defender will see it.
    pub relayed: RelayedAction,
}

/// A two-player battle.
#[derive(Debug, Clone)]
pub struct Battle {
    id: BattleId,
    player_one: PlayerId,
    player_two: PlayerId,
    current_turn: PlayerId,
    phase: BattlePhase,
    ready: HashSet<PlayerId>,
    player_one_health: u32,
    player_two_health: u32,
    last_action: Option<RelayedAction>,
}

impl Battle {
    /// Creates a battle with both participants at full health.
    ///
    /// `player_one` moves first once the battle starts.
    ///
    /// # Errors
    /// Returns [`BattleError::SameParticipant`] if both slots name the
    /// same player.
    pub fn new(
        id: BattleId,
        player_one: PlayerId,
        player_two: PlayerId,
    ) -> Result<Self, BattleError> {
        if player_one == player_two {
            return Err(BattleError::SameParticipant(player_one));
        }
        Ok(Self {
            id,
            current_turn: player_one.clone(),
            player_one,
            player_two,
            phase: BattlePhase::AwaitingReady,
            ready: HashSet::new(),
            player_one_health: MAX_HEALTH,
            player_two_health: MAX_HEALTH,
            last_action: None,
        })
    }

    pub fn id(&self) -> &BattleId {
        &self.id
    }

    pub fn player_one(&self) -> &PlayerId {
        &self.player_one
    }

    pub fn player_two(&self) -> &PlayerId {
        &self.player_two
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// The participant whose turn it is.
    pub fn current_turn(&self) -> &PlayerId {
        &self.current_turn
    }

    /// The most recent action applied, if any.
    pub fn last_action(&self) -> Option<&RelayedAction> {
        self.last_action.as_ref()
    }

    /// Returns `true` if `player` has sent `battle_ready`.
    pub fn is_ready(&self, player: &PlayerId) -> bool {
        self.ready.contains(player)
    }

    /// Returns `true` once either participant has reached zero health.
    pub fn is_decided(&self) -> bool {
        self.player_one_health == 0 || self.player_two_health == 0
    }

    /// The other participant.
    ///
    /// # Errors
    /// Returns [`BattleError::NotParticipant`] for an outsider.
    pub fn opponent_of(
        &self,
        player: &PlayerId,
    ) -> Result<&PlayerId, BattleError> {
        if *player == self.player_one {
            Ok(&self.player_two)
        } else if *player == self.player_two {
            Ok(&self.player_one)
        } else {
            Err(self.not_participant(player))
        }
    }

    /// A participant's current health.
    ///
    /// # Errors
    /// Returns [`BattleError::NotParticipant`] for an outsider.
    pub fn health_of(&self, player: &PlayerId) -> Result<u32, BattleError> {
        if *player == self.player_one {
            Ok(self.player_one_health)
        } else if *player == self.player_two {
            Ok(self.player_two_health)
        } else {
            Err(self.not_participant(player))
        }
    }

    /// Records that `player` is ready.
    ///
    /// When the second participant becomes ready the battle turns
    /// [`BattlePhase::Active`] and the turn goes to player one.
    ///
    /// # Errors
    /// Returns [`BattleError::NotParticipant`] for an outsider.
    pub fn mark_ready(
        &mut self,
        player: &PlayerId,
    ) -> Result<ReadyOutcome, BattleError> {
        let opponent = self.opponent_of(player)?.clone();

        if self.phase.is_active() {
            return Ok(ReadyOutcome::AlreadyStarted);
        }

        self.ready.insert(player.clone());

        if self.ready.contains(&opponent) {
            self.phase = BattlePhase::Active;
            self.current_turn = self.player_one.clone();
            tracing::info!(battle_id = %self.id, "battle started");
            Ok(ReadyOutcome::Started)
        } else {
            Ok(ReadyOutcome::Pending { notify: opponent })
        }
    }

    /// Applies `attacker`'s action to the other participant.
    ///
    /// Health never drops below zero. The turn passes to the defender
    /// only while both participants are still standing.
    ///
    /// # Errors
    /// Returns [`BattleError::NotParticipant`] for an outsider.
    pub fn apply_action(
        &mut self,
        attacker: &PlayerId,
        action: BattleAction,
    ) -> Result<ActionOutcome, BattleError> {
        let defender = self.opponent_of(attacker)?.clone();
        let relayed = RelayedAction::from(action);

        let defender_health = if defender == self.player_one {
            &mut self.player_one_health
        } else {
            &mut self.player_two_health
        };
        *defender_health = defender_health.saturating_sub(relayed.damage);
        let defender_health = *defender_health;

        self.last_action = Some(relayed.clone());

        if !self.is_decided() {
            self.current_turn = defender.clone();
        }

        tracing::debug!(
            battle_id = %self.id,
            %attacker,
            damage = relayed.damage,
            defender_health,
            "action applied"
        );

        Ok(ActionOutcome {
            attacker_health: self.health_of(attacker)?,
            defender,
            defender_health,
            relayed,
        })
    }

    fn not_participant(&self, player: &PlayerId) -> BattleError {
        BattleError::NotParticipant {
            battle_id: self.id.clone(),
            player_id: player.clone(),
        }
    }
}
