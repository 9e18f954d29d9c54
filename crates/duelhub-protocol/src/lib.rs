//! Wire protocol for duelhub.
//!
//! - **Types** ([`ClientMessage`], [`ServerMessage`], identifiers): the
//!   JSON objects that travel over each connection.
//! - **Codec** ([`Codec`], [`JsonCodec`]): bytes in, bytes out.
//! - **Errors** ([`ProtocolError`]): what can go wrong while decoding.
//!
//! ```text
//! Transport (frames) → Protocol (ClientMessage) → Hub (player context)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use types::{
    Address, BattleAction, BattleId, ClientMessage, CombatProfile, PlayerId,
    PlayerSummary, RelayedAction, ServerMessage,
};
