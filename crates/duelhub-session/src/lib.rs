//! Player bookkeeping for duelhub.
//!
//! This crate knows who is connected and what they are doing:
//!
//! 1. **Registry**: one [`Player`] record per live connection, plus the
//!    best-effort send primitive every other layer uses ([`PlayerRegistry`])
//! 2. **Waiting roster**: the players currently looking for an opponent,
//!    derived from [`PlayerStatus::Waiting`]
//! 3. **Challenges**: outstanding one-to-one duel offers ([`ChallengeBook`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Hub (above)  ← routes commands, owns one registry and one challenge book
//!     ↕
//! Session Layer (this crate)  ← player records, roster, challenge offers
//!     ↕
//! Protocol Layer (below)  ← provides PlayerId, Address, ServerMessage
//! ```
//!
//! Nothing here is thread-safe on its own. The hub owns these structures
//! inside a single task.

mod challenge;
mod error;
mod player;
mod registry;

pub use challenge::{Challenge, ChallengeBook};
pub use error::SessionError;
pub use player::{Player, PlayerSender, PlayerStatus};
pub use registry::PlayerRegistry;
