//! Cleanup after a dropped connection.

use duelhub_protocol::{BattleId, PlayerId, ServerMessage};

use super::Hub;

impl Hub {
    /// Forgets a disconnected player and unwinds whatever it was doing.
    ///
    /// If the player was fighting, the battle is deleted and the opponent
    /// gets one `opponent_disconnected` and goes back to the waiting room.
    /// All of that happens before the roster goes out, so the broadcast
    /// already lists the released opponent. The roster is broadcast in
    /// every case. Unknown players are ignored.
    ///
    /// An opponent that has since rejoined the pool or moved on to
    /// another battle is left alone.
    pub fn disconnect(&mut self, player_id: &PlayerId) {
        let Some(player) = self.players.remove(player_id) else {
            tracing::debug!(%player_id, "disconnect for unknown player");
            return;
        };

        if let Some(battle_id) = player.status.battle() {
            match self.battles.remove(battle_id) {
                Some(battle) => {
                    if let Ok(opponent) = battle.opponent_of(player_id) {
                        self.release_opponent(opponent, battle_id);
                    }
                    tracing::info!(%battle_id, %player_id, "battle ended by disconnect");
                }
                None => {
                    tracing::debug!(%battle_id, %player_id, "battle already gone");
                }
            }
        }

        self.players.broadcast_roster();
    }

    fn release_opponent(&mut self, opponent: &PlayerId, battle_id: &BattleId) {
        let still_fighting = self
            .players
            .get(opponent)
            .is_ok_and(|p| p.status.battle() == Some(battle_id));
        if !still_fighting {
            return;
        }
        self.players.send(opponent, ServerMessage::OpponentDisconnected);
        if let Err(e) = self.players.return_to_pool(opponent) {
            tracing::debug!(%opponent, error = %e, "could not return opponent to pool");
        }
    }
}
