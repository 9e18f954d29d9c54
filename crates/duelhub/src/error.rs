//! Unified error type for duelhub.

use duelhub_battle::BattleError;
use duelhub_protocol::ProtocolError;
use duelhub_session::SessionError;
use duelhub_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum DuelhubError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, unknown message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A registry or challenge error (unknown player, no challenge).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A battle error (not found, not a participant).
    #[error(transparent)]
    Battle(#[from] BattleError),

    /// The hub task has stopped and no longer accepts commands.
    #[error("hub is unavailable")]
    HubUnavailable,

    /// The command line named a port that isn't a valid `u16`.
    #[error("invalid port: {0}")]
    InvalidPort(String),
}

impl DuelhubError {
    /// Returns `true` for a request that named something that doesn't
    /// exist or doesn't apply to the caller. These are dropped quietly.
    pub fn is_referential_miss(&self) -> bool {
        matches!(self, Self::Session(_) | Self::Battle(_))
    }
}
