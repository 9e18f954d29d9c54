//! Wire types: identifiers, roster entries, and the two message enums.
//!
//! Every message is a JSON object with a string `type` tag and camelCase
//! fields, e.g. `{"type":"send_challenge","opponentAddress":"0xab"}`.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Codec, ProtocolError};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Server-generated identifier for one connected player.
///
/// Stable for the lifetime of the connection and never reused. Serialized
/// as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wraps an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Allocates a fresh random identifier.
    pub fn generate() -> Self {
        Self(generate_id())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-generated identifier for one battle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BattleId(String);

impl BattleId {
    /// Wraps an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Allocates a fresh random identifier.
    pub fn generate() -> Self {
        Self(generate_id())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The caller-supplied, human-facing identity of a player (a wallet
/// address in practice). Challenges are keyed by it.
///
/// Nothing verifies it: two connections may claim the same address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wraps an address string.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Stats and move set computed by the client-side agent builder.
///
/// Opaque to the server: stored on join, echoed to other players, never
/// inspected. Missing on the wire means `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombatProfile(pub Value);

/// One entry of the waiting-room roster, also used to describe an
/// opponent or a challenger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    /// The player's address.
    pub address: Address,
    /// The player's combat profile, under its wire name.
    pub agent: CombatProfile,
}

/// Generates a random 32-character hex string (128 bits).
fn generate_id() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// ---------------------------------------------------------------------------
// Battle actions
// ---------------------------------------------------------------------------

/// A turn action as sent by the attacking client.
///
/// `damage` is computed client-side and trusted. Any JSON number is
/// accepted; [`BattleAction::damage`] turns it into whole health points.
/// Fields the server doesn't model are kept in `extra` and relayed
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleAction {
    /// Name of the move used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_name: Option<String>,
    /// Damage dealt to the defender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<f64>,
    /// Status effects attached to the move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<Value>>,
    /// Any other fields the client attached.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BattleAction {
    /// Damage to apply in whole health points.
    ///
    /// Fractions are truncated. Missing or negative values count as zero
    /// and anything past `u32::MAX` saturates.
    pub fn damage(&self) -> u32 {
        // float-to-int `as` saturates and maps NaN to 0
        self.damage.map_or(0, |d| d as u32)
    }
}

/// A [`BattleAction`] as forwarded to the defender, with `damage` and
/// `effects` filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayedAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_name: Option<String>,
    pub damage: u32,
    pub effects: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<BattleAction> for RelayedAction {
    fn from(action: BattleAction) -> Self {
        Self {
            damage: action.damage(),
            move_name: action.move_name,
            effects: action.effects.unwrap_or_default(),
            extra: action.extra,
        }
    }
}

// ---------------------------------------------------------------------------
// Client -> server
// ---------------------------------------------------------------------------

/// Commands a client can send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    /// Attach an address and combat profile and enter the waiting pool.
    JoinWaitingRoom {
        address: Address,
        #[serde(default)]
        agent: CombatProfile,
    },

    /// Leave the waiting pool.
    LeaveWaitingRoom,

    /// Offer a duel to the player with this address.
    SendChallenge { opponent_address: Address },

    /// Accept the challenge this address sent us.
    AcceptChallenge { challenger_address: Address },

    /// Decline the challenge this address sent us.
    DeclineChallenge { challenger_address: Address },

    /// Signal readiness for the given battle.
    BattleReady { battle_id: BattleId },

    /// Play a turn in the caller's current battle.
    BattleAction { action: BattleAction },
}

impl ClientMessage {
    /// Every tag [`ClientMessage`] understands.
    pub const KINDS: [&'static str; 7] = [
        "join_waiting_room",
        "leave_waiting_room",
        "send_challenge",
        "accept_challenge",
        "decline_challenge",
        "battle_ready",
        "battle_action",
    ];

    /// The wire tag of this message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::JoinWaitingRoom { .. } => "join_waiting_room",
            Self::LeaveWaitingRoom => "leave_waiting_room",
            Self::SendChallenge { .. } => "send_challenge",
            Self::AcceptChallenge { .. } => "accept_challenge",
            Self::DeclineChallenge { .. } => "decline_challenge",
            Self::BattleReady { .. } => "battle_ready",
            Self::BattleAction { .. } => "battle_action",
        }
    }

    /// Decodes one inbound frame with `codec`.
    ///
    /// The frame is read into a generic value first so the tag can be
    /// checked and classified; see [`ClientMessage::from_value`].
    ///
    /// # Errors
    /// [`ProtocolError::Decode`] if the codec can't parse the frame, plus
    /// everything [`ClientMessage::from_value`] returns.
    pub fn decode_with<C: Codec>(codec: &C, data: &[u8]) -> Result<Self, ProtocolError> {
        codec.decode::<Value>(data).and_then(Self::from_value)
    }

    /// Builds a command from an already-parsed frame.
    ///
    /// Older clients put the command name in an `action` field instead of
    /// `type`; a string `action` is accepted as the tag when `type` is
    /// absent.
    ///
    /// # Errors
    /// - [`ProtocolError::InvalidMessage`]: not an object, or no tag
    /// - [`ProtocolError::UnknownMessageType`]: a tag we don't handle
    /// - [`ProtocolError::Decode`]: the fields don't fit the command
    pub fn from_value(mut value: Value) -> Result<Self, ProtocolError> {
        let Some(object) = value.as_object_mut() else {
            return Err(ProtocolError::InvalidMessage(
                "frame is not a JSON object".into(),
            ));
        };

        if !object.contains_key("type")
            && object.get("action").is_some_and(Value::is_string)
        {
            if let Some(tag) = object.remove("action") {
                object.insert("type".to_owned(), tag);
            }
        }

        let tag = match object.get("type") {
            Some(Value::String(tag)) => tag.clone(),
            Some(_) => {
                return Err(ProtocolError::InvalidMessage(
                    "`type` must be a string".into(),
                ));
            }
            None => {
                return Err(ProtocolError::InvalidMessage(
                    "missing `type` field".into(),
                ));
            }
        };

        if !Self::KINDS.contains(&tag.as_str()) {
            return Err(ProtocolError::UnknownMessageType(tag));
        }

        serde_json::from_value(value).map_err(ProtocolError::Decode)
    }
}

// ---------------------------------------------------------------------------
// Server -> client
// ---------------------------------------------------------------------------

/// Notifications the server pushes to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    /// First message on every connection.
    Connected { player_id: PlayerId },

    /// The full list of players currently waiting for an opponent.
    WaitingRoomUpdate { players: Vec<PlayerSummary> },

    /// Someone challenged the recipient.
    ChallengeReceived { challenger: PlayerSummary },

    /// The recipient's challenge was declined by `opponent_address`.
    ChallengeDeclined { opponent_address: Address },

    /// A challenge was accepted and a battle now exists.
    BattleCreated {
        battle_id: BattleId,
        opponent: PlayerSummary,
    },

    /// Both sides are ready; turns may begin.
    BattleStart {
        opponent: PlayerSummary,
        battle_id: BattleId,
        is_first_turn: bool,
        my_health: u32,
        opponent_health: u32,
    },

    /// The opponent is ready, the recipient is not yet.
    OpponentReady { battle_id: BattleId },

    /// The opponent played a turn against the recipient.
    OpponentAction {
        battle_id: BattleId,
        action: RelayedAction,
        my_health: u32,
        opponent_health: u32,
    },

    /// The recipient's own turn was applied.
    ActionConfirmed {
        battle_id: BattleId,
        my_health: u32,
        opponent_health: u32,
    },

    /// The opponent's connection dropped; the battle is gone.
    OpponentDisconnected,
}

impl ServerMessage {
    /// The wire tag of this message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::WaitingRoomUpdate { .. } => "waiting_room_update",
            Self::ChallengeReceived { .. } => "challenge_received",
            Self::ChallengeDeclined { .. } => "challenge_declined",
            Self::BattleCreated { .. } => "battle_created",
            Self::BattleStart { .. } => "battle_start",
            Self::OpponentReady { .. } => "opponent_ready",
            Self::OpponentAction { .. } => "opponent_action",
            Self::ActionConfirmed { .. } => "action_confirmed",
            Self::OpponentDisconnected => "opponent_disconnected",
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
