//! Error types for the session layer.

use duelhub_protocol::{Address, PlayerId};

/// Errors raised by the registry and challenge book.
///
/// None of these reach a client. The hub logs them and drops the request.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No player record exists for this identifier.
    #[error("player {0} not found")]
    UnknownPlayer(PlayerId),

    /// The player never sent `join_waiting_room`, so it has no address.
    #[error("player {0} has not joined yet")]
    NotJoined(PlayerId),

    /// No attached player claims this address.
    #[error("no player with address {0}")]
    UnknownAddress(Address),

    /// No outstanding challenge for this ordered pair.
    #[error("no challenge from {challenger} to {target}")]
    ChallengeNotFound {
        challenger: Address,
        target: Address,
    },

    /// A player tried to challenge their own address.
    #[error("{0} cannot challenge itself")]
    SelfChallenge(Address),
}
