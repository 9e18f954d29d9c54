//! Error types for the battle layer.

use duelhub_protocol::{BattleId, PlayerId};

/// Errors that can occur during battle operations.
#[derive(Debug, thiserror::Error)]
pub enum BattleError {
    /// The battle does not exist (never did, or a participant left).
    #[error("battle {0} not found")]
    NotFound(BattleId),

    /// The player is not one of the battle's two participants.
    #[error("player {player_id} is not in battle {battle_id}")]
    NotParticipant {
        battle_id: BattleId,
        player_id: PlayerId,
    },

    /// The player holds no battle reference.
    #[error("player {0} is not in a battle")]
    NotInBattle(PlayerId),

    /// Both participant slots name the same player.
    #[error("player {0} cannot fight itself")]
    SameParticipant(PlayerId),
}
