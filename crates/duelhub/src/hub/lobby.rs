//! Waiting room and challenge handlers.

use duelhub_protocol::{Address, CombatProfile, PlayerId, ServerMessage};
use duelhub_session::SessionError;

use super::Hub;
use crate::DuelhubError;

impl Hub {
    pub(super) fn join_waiting_room(
        &mut self,
        player_id: &PlayerId,
        address: Address,
        agent: CombatProfile,
    ) -> Result<(), DuelhubError> {
        self.players.join(player_id, address, agent)?;
        self.players.broadcast_roster();
        Ok(())
    }

    /// Leaving is a no-op for a player who isn't waiting, but the roster
    /// goes out regardless.
    pub(super) fn leave_waiting_room(
        &mut self,
        player_id: &PlayerId,
    ) -> Result<(), DuelhubError> {
        self.players.leave(player_id)?;
        self.players.broadcast_roster();
        Ok(())
    }

    /// Offers a duel to whoever holds `opponent_address`. Only the
    /// opponent hears about it.
    pub(super) fn send_challenge(
        &mut self,
        player_id: &PlayerId,
        opponent_address: Address,
    ) -> Result<(), DuelhubError> {
        let challenger = self.players.summary(player_id)?;
        if challenger.address == opponent_address {
            return Err(SessionError::SelfChallenge(opponent_address).into());
        }
        let opponent_id = self.players.find_by_address(&opponent_address)?.id.clone();

        self.challenges
            .offer(challenger.address.clone(), opponent_address.clone());
        tracing::info!(
            challenger = %challenger.address,
            target = %opponent_address,
            "challenge sent"
        );

        self.players
            .send(&opponent_id, ServerMessage::ChallengeReceived { challenger });
        Ok(())
    }

    /// Turns the pending challenge from `challenger_address` into a
    /// battle. The challenger becomes player one.
    ///
    /// A participant still pointing at an earlier battle is moved to the
    /// new one; the earlier battle stays in the book.
    ///
    /// On any failure the challenge stays pending.
    pub(super) fn accept_challenge(
        &mut self,
        player_id: &PlayerId,
        challenger_address: Address,
    ) -> Result<(), DuelhubError> {
        let acceptor = self.players.summary(player_id)?;
        if self
            .challenges
            .get(&challenger_address, &acceptor.address)
            .is_none()
        {
            return Err(SessionError::ChallengeNotFound {
                challenger: challenger_address,
                target: acceptor.address,
            }
            .into());
        }

        let challenger_id =
            self.players.find_by_address(&challenger_address)?.id.clone();
        let challenger = self.players.summary(&challenger_id)?;

        let battle_id = self
            .battles
            .create(challenger_id.clone(), player_id.clone())?;
        self.challenges
            .take(&challenger_address, &acceptor.address)?;
        self.players.enter_battle(&challenger_id, battle_id.clone())?;
        self.players.enter_battle(player_id, battle_id.clone())?;

        self.players.send(
            &challenger_id,
            ServerMessage::BattleCreated {
                battle_id: battle_id.clone(),
                opponent: acceptor,
            },
        );
        self.players.send(
            player_id,
            ServerMessage::BattleCreated {
                battle_id,
                opponent: challenger,
            },
        );

        self.players.broadcast_roster();
        Ok(())
    }

    /// Withdraws the pending challenge from `challenger_address` and tells
    /// the challenger, if it is still connected.
    pub(super) fn decline_challenge(
        &mut self,
        player_id: &PlayerId,
        challenger_address: Address,
    ) -> Result<(), DuelhubError> {
        let target = self.players.summary(player_id)?.address;
        let challenge = self.challenges.take(&challenger_address, &target)?;
        tracing::info!(
            challenger = %challenge.challenger,
            target = %challenge.target,
            "challenge declined"
        );

        let challenger_id =
            self.players.find_by_address(&challenge.challenger)?.id.clone();
        self.players.send(
            &challenger_id,
            ServerMessage::ChallengeDeclined {
                opponent_address: target,
            },
        );
        Ok(())
    }
}
