//! Battle sessions for duelhub.
//!
//! A battle is the authoritative record of one duel: two participants,
//! their health, whose turn it is, and the ready handshake that has to
//! complete before turns begin.
//!
//! # Key types
//!
//! - [`Battle`]: one duel's state and its transitions
//! - [`BattlePhase`]: `AwaitingReady` → `Active`
//! - [`BattleBook`]: every live battle, keyed by [`BattleId`](duelhub_protocol::BattleId)
//!
//! Battles never end on their own. A health of zero is visible to the
//! clients, but the battle stays in the book until a participant
//! disconnects.

mod battle;
mod book;
mod error;
mod phase;

pub use battle::{ActionOutcome, Battle, MAX_HEALTH, ReadyOutcome};
pub use book::BattleBook;
pub use error::BattleError;
pub use phase::BattlePhase;
