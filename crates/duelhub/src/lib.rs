//! # duelhub
//!
//! Matchmaking and battle-sync server for two-player turn-based duels.
//!
//! Clients connect over WebSocket, join a waiting room, challenge each
//! other, and once a challenge is accepted the server keeps the
//! authoritative health of both fighters while relaying their turns.
//!
//! ```text
//! connection task ──frames──→ HubHandle ──HubCommand──→ hub task (Hub)
//!        ↑                                                   │
//!        └──────────── PlayerSender (ServerMessage) ─────────┘
//! ```
//!
//! Every connection has its own receive loop, but all state changes run
//! one at a time inside the single hub task.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use duelhub::prelude::*;
//!
//! # async fn run() -> Result<(), DuelhubError> {
//! let server = DuelhubServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod actor;
mod error;
mod handler;
mod hub;
mod server;

pub use actor::{HubHandle, spawn_hub};
pub use error::DuelhubError;
pub use hub::{Hub, HubStats};
pub use server::{DEFAULT_HUB_CHANNEL_SIZE, DuelhubServer, DuelhubServerBuilder};

pub mod prelude {
    //! Common imports for running and testing a duelhub server.

    pub use crate::{
        DuelhubError, DuelhubServer, DuelhubServerBuilder, Hub, HubHandle,
        HubStats,
    };
    pub use duelhub_battle::{BattleError, BattlePhase, MAX_HEALTH};
    pub use duelhub_protocol::{
        Address, BattleAction, BattleId, ClientMessage, Codec, CombatProfile,
        JsonCodec, PlayerId, PlayerSummary, ProtocolError, RelayedAction,
        ServerMessage,
    };
    pub use duelhub_session::{PlayerSender, PlayerStatus, SessionError};
    pub use duelhub_transport::TransportError;
}
