//! Battle lifecycle state.

use std::fmt;

/// The lifecycle phase of a battle.
///
/// ```text
/// AwaitingReady → Active
/// ```
///
/// - **AwaitingReady**: created on challenge acceptance; zero or one
///   participant has sent `battle_ready`.
/// - **Active**: both participants are ready and the first turn has been
///   assigned. Actions are relayed from here on.
///
/// There is no terminal phase. A battle ends by being removed from the
/// [`BattleBook`](crate::BattleBook) when a participant disconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BattlePhase {
    #[default]
    AwaitingReady,
    Active,
}

impl BattlePhase {
    /// Returns `true` once both participants are ready.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingReady => write!(f, "AwaitingReady"),
            Self::Active => write!(f, "Active"),
        }
    }
}
