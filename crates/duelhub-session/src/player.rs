//! The per-connection player record.

use std::fmt;

use duelhub_protocol::{
    Address, BattleId, CombatProfile, PlayerId, PlayerSummary, ServerMessage,
};
use tokio::sync::mpsc;

/// Channel sender for delivering outbound messages to a player's
/// connection handler.
///
/// Unbounded so that a send never blocks the hub.
pub type PlayerSender = mpsc::UnboundedSender<ServerMessage>;

// ---------------------------------------------------------------------------
// PlayerStatus
// ---------------------------------------------------------------------------

/// What a connected player is currently doing.
///
/// ```text
///   Idle ──(join)──→ Waiting ──(accept)──→ InBattle
///    ↑                │  ↑                    │
///    └────(leave)─────┘  └─(opponent drops)───┘
/// ```
///
/// The battle reference lives inside `InBattle`, so a player holds one
/// exactly when it is fighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Connected but not seeking an opponent.
    Idle,
    /// Listed in the waiting roster.
    Waiting,
    /// Participating in the given battle.
    InBattle(BattleId),
}

impl PlayerStatus {
    /// Returns `true` if the player appears in the waiting roster.
    pub fn is_waiting(&self) -> bool {
        matches!(self, Self::Waiting)
    }

    /// Returns the battle this player is in, if any.
    pub fn battle(&self) -> Option<&BattleId> {
        match self {
            Self::InBattle(battle_id) => Some(battle_id),
            _ => None,
        }
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Waiting => write!(f, "Waiting"),
            Self::InBattle(battle_id) => write!(f, "InBattle({battle_id})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The server's record of one connected player.
///
/// `address` and `profile` stay empty until the first `join_waiting_room`.
#[derive(Debug)]
pub struct Player {
    /// Server-generated identifier.
    pub id: PlayerId,
    /// Caller-supplied address, set on join.
    pub address: Option<Address>,
    /// Opaque combat profile, set on join.
    pub profile: CombatProfile,
    /// Current status.
    pub status: PlayerStatus,
    sender: PlayerSender,
}

impl Player {
    /// Creates an unattached, idle player.
    pub fn new(id: PlayerId, sender: PlayerSender) -> Self {
        Self {
            id,
            address: None,
            profile: CombatProfile::default(),
            status: PlayerStatus::Idle,
            sender,
        }
    }

    /// The `{address, agent}` view of this player, or `None` if it has
    /// not joined yet.
    pub fn summary(&self) -> Option<PlayerSummary> {
        let address = self.address.clone()?;
        Some(PlayerSummary {
            address,
            agent: self.profile.clone(),
        })
    }

    /// Queues a message for this player's connection.
    ///
    /// Returns `false` if the connection handler is already gone.
    pub fn send(&self, msg: ServerMessage) -> bool {
        self.sender.send(msg).is_ok()
    }
}
