//! Error types for the protocol layer.
//!
//! Decoding failures are split by cause so the connection handler can log
//! a malformed frame differently from a well-formed frame naming a
//! command the server doesn't know.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, wrong field types,
    /// or missing required fields.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The frame is a well-formed object whose `type` names no known
    /// command.
    #[error("unknown message type: {0}")]
    UnknownMessageType(String),

    /// The frame passed JSON parsing but violates protocol rules,
    /// e.g. it carries no `type` tag at all.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

impl ProtocolError {
    /// Returns `true` for an unrecognised command tag, as opposed to a
    /// frame that couldn't be parsed at all.
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, Self::UnknownMessageType(_))
    }
}
