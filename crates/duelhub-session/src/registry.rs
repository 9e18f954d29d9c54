//! The player registry: every live connection and its player record.
//!
//! The registry is also the waiting pool. A player is "in the pool"
//! exactly when its status is [`PlayerStatus::Waiting`], so the roster is
//! derived on demand instead of being kept as a second set that could
//! drift out of sync.

use std::collections::HashMap;

use duelhub_protocol::{
    Address, BattleId, CombatProfile, PlayerId, PlayerSummary, ServerMessage,
};

use crate::{Player, PlayerSender, PlayerStatus, SessionError};

/// All connected players, keyed by identifier.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: HashMap<PlayerId, Player>,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new connection and queues its `connected` greeting.
    ///
    /// The greeting is the first message the connection will ever see.
    pub fn register(&mut self, sender: PlayerSender) -> PlayerId {
        let player_id = PlayerId::generate();
        let player = Player::new(player_id.clone(), sender);
        player.send(ServerMessage::Connected {
            player_id: player_id.clone(),
        });
        self.players.insert(player_id.clone(), player);

        tracing::info!(%player_id, players = self.players.len(), "player registered");
        player_id
    }

    /// Removes a player record, returning it if it existed.
    pub fn remove(&mut self, player_id: &PlayerId) -> Option<Player> {
        let removed = self.players.remove(player_id);
        if removed.is_some() {
            tracing::info!(%player_id, players = self.players.len(), "player removed");
        }
        removed
    }

    /// Looks up a player.
    pub fn get(&self, player_id: &PlayerId) -> Result<&Player, SessionError> {
        self.players
            .get(player_id)
            .ok_or_else(|| SessionError::UnknownPlayer(player_id.clone()))
    }

    fn get_mut(
        &mut self,
        player_id: &PlayerId,
    ) -> Result<&mut Player, SessionError> {
        self.players
            .get_mut(player_id)
            .ok_or_else(|| SessionError::UnknownPlayer(player_id.clone()))
    }

    /// Returns `true` if the player is still connected.
    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.players.contains_key(player_id)
    }

    /// Number of tracked players, joined or not.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` if nobody is connected.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Attaches an address and profile and puts the player in the pool.
    ///
    /// Joining again overwrites the address and profile. A player coming
    /// back from a battle loses its battle reference; the battle itself
    /// is left alone.
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownPlayer`] if there is no such player.
    pub fn join(
        &mut self,
        player_id: &PlayerId,
        address: Address,
        profile: CombatProfile,
    ) -> Result<(), SessionError> {
        let player = self.get_mut(player_id)?;
        if let Some(battle_id) = player.status.battle() {
            tracing::debug!(%player_id, %battle_id, "player left battle to rejoin");
        }

        tracing::info!(%player_id, %address, "player joined waiting room");
        player.address = Some(address);
        player.profile = profile;
        player.status = PlayerStatus::Waiting;
        Ok(())
    }

    /// Takes the player out of the pool.
    ///
    /// Returns `true` if the player was waiting. A player in a battle is
    /// left untouched.
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownPlayer`] if there is no such player.
    pub fn leave(&mut self, player_id: &PlayerId) -> Result<bool, SessionError> {
        let player = self.get_mut(player_id)?;
        if !player.status.is_waiting() {
            return Ok(false);
        }
        player.status = PlayerStatus::Idle;
        tracing::info!(%player_id, "player left waiting room");
        Ok(true)
    }

    /// Marks the player as fighting in `battle_id`.
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownPlayer`] if there is no such player.
    pub fn enter_battle(
        &mut self,
        player_id: &PlayerId,
        battle_id: BattleId,
    ) -> Result<(), SessionError> {
        self.get_mut(player_id)?.status = PlayerStatus::InBattle(battle_id);
        Ok(())
    }

    /// Drops the player's battle reference and returns it to the pool.
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownPlayer`] if there is no such player.
    pub fn return_to_pool(
        &mut self,
        player_id: &PlayerId,
    ) -> Result<(), SessionError> {
        self.get_mut(player_id)?.status = PlayerStatus::Waiting;
        Ok(())
    }

    /// Finds a joined player by address.
    ///
    /// Addresses are not unique; if several connections claim the same
    /// one, whichever the scan meets first wins.
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownAddress`] if nobody claims it.
    pub fn find_by_address(
        &self,
        address: &Address,
    ) -> Result<&Player, SessionError> {
        self.players
            .values()
            .find(|p| p.address.as_ref() == Some(address))
            .ok_or_else(|| SessionError::UnknownAddress(address.clone()))
    }

    /// The `{address, agent}` view of a joined player.
    ///
    /// # Errors
    /// - [`SessionError::UnknownPlayer`]: no such player
    /// - [`SessionError::NotJoined`]: the player has no address yet
    pub fn summary(
        &self,
        player_id: &PlayerId,
    ) -> Result<PlayerSummary, SessionError> {
        self.get(player_id)?
            .summary()
            .ok_or_else(|| SessionError::NotJoined(player_id.clone()))
    }

    /// Best-effort send to one player.
    ///
    /// Never blocks. A missing player or a closed connection is logged at
    /// trace level; the transport's own close notification will clean up.
    pub fn send(&self, player_id: &PlayerId, msg: ServerMessage) {
        let kind = msg.kind();
        match self.players.get(player_id) {
            Some(player) => {
                if !player.send(msg) {
                    tracing::trace!(%player_id, kind, "send to closed connection dropped");
                }
            }
            None => {
                tracing::trace!(%player_id, kind, "send to unknown player dropped");
            }
        }
    }

    /// Every player currently waiting for an opponent.
    pub fn waiting_roster(&self) -> Vec<PlayerSummary> {
        self.players
            .values()
            .filter(|p| p.status.is_waiting())
            .filter_map(Player::summary)
            .collect()
    }

    /// Sends the current roster to every tracked player, whatever their
    /// status.
    pub fn broadcast_roster(&self) {
        let players = self.waiting_roster();
        tracing::debug!(
            waiting = players.len(),
            recipients = self.players.len(),
            "broadcasting waiting room"
        );
        let msg = ServerMessage::WaitingRoomUpdate { players };
        for player in self.players.values() {
            player.send(msg.clone());
        }
    }
}
