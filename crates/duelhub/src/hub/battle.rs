//! Ready handshake and turn relay.

use duelhub_battle::{Battle, BattleError, ReadyOutcome};
use duelhub_protocol::{BattleAction, BattleId, PlayerId, ServerMessage};

use super::Hub;
use crate::DuelhubError;

impl Hub {
    /// Records readiness. The first ready participant only alerts the
    /// other one; the second starts the battle for both.
    pub(super) fn battle_ready(
        &mut self,
        player_id: &PlayerId,
        battle_id: BattleId,
    ) -> Result<(), DuelhubError> {
        let outcome = self.battles.get_mut(&battle_id)?.mark_ready(player_id)?;

        match outcome {
            ReadyOutcome::Started => {
                let battle = self.battles.get(&battle_id)?;
                let first = self.start_message(battle, battle.player_one())?;
                let second = self.start_message(battle, battle.player_two())?;
                self.players.send(battle.player_one(), first);
                self.players.send(battle.player_two(), second);
            }
            ReadyOutcome::Pending { notify } => {
                tracing::debug!(%battle_id, %player_id, "waiting for opponent to ready up");
                self.players
                    .send(&notify, ServerMessage::OpponentReady { battle_id });
            }
            ReadyOutcome::AlreadyStarted => {
                tracing::debug!(%battle_id, %player_id, "battle already started");
            }
        }
        Ok(())
    }

    /// Applies the caller's action to its current battle and reports the
    /// new health to both sides.
    pub(super) fn battle_action(
        &mut self,
        player_id: &PlayerId,
        action: BattleAction,
    ) -> Result<(), DuelhubError> {
        let battle_id = self
            .players
            .get(player_id)?
            .status
            .battle()
            .cloned()
            .ok_or_else(|| BattleError::NotInBattle(player_id.clone()))?;

        let battle = self.battles.get_mut(&battle_id)?;
        let outcome = battle.apply_action(player_id, action)?;
        let decided = battle.is_decided();

        self.players.send(
            &outcome.defender,
            ServerMessage::OpponentAction {
                battle_id: battle_id.clone(),
                action: outcome.relayed,
                my_health: outcome.defender_health,
                opponent_health: outcome.attacker_health,
            },
        );
        self.players.send(
            player_id,
            ServerMessage::ActionConfirmed {
                battle_id: battle_id.clone(),
                my_health: outcome.attacker_health,
                opponent_health: outcome.defender_health,
            },
        );

        if decided {
            tracing::info!(%battle_id, "a fighter reached zero health");
        }
        Ok(())
    }

    /// The `battle_start` message as `player` should see it.
    fn start_message(
        &self,
        battle: &Battle,
        player: &PlayerId,
    ) -> Result<ServerMessage, DuelhubError> {
        let opponent = battle.opponent_of(player)?;
        Ok(ServerMessage::BattleStart {
            opponent: self.players.summary(opponent)?,
            battle_id: battle.id().clone(),
            is_first_turn: player == battle.player_one(),
            my_health: battle.health_of(player)?,
            opponent_health: battle.health_of(opponent)?,
        })
    }
}
