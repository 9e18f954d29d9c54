//! Hub actor: the single task that owns the [`Hub`].
//!
//! Connection tasks never touch hub state directly. They send
//! [`HubCommand`]s through a bounded channel and the actor applies them
//! one at a time, which is what keeps handlers from interleaving.

use duelhub_protocol::{ClientMessage, PlayerId};
use duelhub_session::PlayerSender;
use tokio::sync::{mpsc, oneshot};

use crate::{DuelhubError, Hub, HubStats};

/// Commands sent to the hub actor through its channel.
pub(crate) enum HubCommand {
    /// Register a new connection and reply with its player id.
    Connect {
        sender: PlayerSender,
        reply: oneshot::Sender<PlayerId>,
    },

    /// Deliver a decoded client message.
    Message {
        player_id: PlayerId,
        msg: ClientMessage,
    },

    /// The player's connection is gone.
    Disconnect { player_id: PlayerId },

    /// Request the current counters.
    Stats { reply: oneshot::Sender<HubStats> },
}

/// Handle to the running hub actor.
///
/// Cheap to clone; every connection task holds one.
#[derive(Clone)]
pub struct HubHandle {
    sender: mpsc::Sender<HubCommand>,
}

impl HubHandle {
    /// Registers a connection whose outbound messages go to `sender`.
    pub async fn connect(
        &self,
        sender: PlayerSender,
    ) -> Result<PlayerId, DuelhubError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(HubCommand::Connect {
            sender,
            reply: reply_tx,
        })
        .await?;
        reply_rx.await.map_err(|_| DuelhubError::HubUnavailable)
    }

    /// Forwards a client message (fire-and-forget).
    pub async fn send_message(
        &self,
        player_id: PlayerId,
        msg: ClientMessage,
    ) -> Result<(), DuelhubError> {
        self.send(HubCommand::Message { player_id, msg }).await
    }

    /// Reports a closed connection.
    pub async fn disconnect(
        &self,
        player_id: PlayerId,
    ) -> Result<(), DuelhubError> {
        self.send(HubCommand::Disconnect { player_id }).await
    }

    /// Requests the current counters.
    pub async fn stats(&self) -> Result<HubStats, DuelhubError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(HubCommand::Stats { reply: reply_tx }).await?;
        reply_rx.await.map_err(|_| DuelhubError::HubUnavailable)
    }

    async fn send(&self, cmd: HubCommand) -> Result<(), DuelhubError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| DuelhubError::HubUnavailable)
    }
}

struct HubActor {
    hub: Hub,
    receiver: mpsc::Receiver<HubCommand>,
}

impl HubActor {
    /// Runs until every [`HubHandle`] has been dropped.
    async fn run(mut self) {
        tracing::info!("hub actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                HubCommand::Connect { sender, reply } => {
                    let player_id = self.hub.connect(sender);
                    let _ = reply.send(player_id);
                }
                HubCommand::Message { player_id, msg } => {
                    self.hub.handle(&player_id, msg);
                }
                HubCommand::Disconnect { player_id } => {
                    self.hub.disconnect(&player_id);
                }
                HubCommand::Stats { reply } => {
                    let _ = reply.send(self.hub.stats());
                }
            }
        }

        tracing::info!("hub actor stopped");
    }
}

/// Spawns the hub actor task and returns a handle to it.
///
/// `channel_size` bounds the command queue; when it fills, connection
/// tasks wait before forwarding more frames.
pub fn spawn_hub(channel_size: usize) -> HubHandle {
    let (tx, rx) = mpsc::channel(channel_size);
    let actor = HubActor {
        hub: Hub::new(),
        receiver: rx,
    };
    tokio::spawn(actor.run());
    HubHandle { sender: tx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duelhub_protocol::{Address, CombatProfile, ServerMessage};

    #[tokio::test]
    async fn test_connect_replies_with_greeted_player_id() {
        let hub = spawn_hub(8);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let player_id = hub.connect(tx).await.unwrap();

        match rx.recv().await.unwrap() {
            ServerMessage::Connected { player_id: greeted } => {
                assert_eq!(greeted, player_id);
            }
            other => panic!("expected Connected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_commands_are_applied_in_order() {
        let hub = spawn_hub(8);
        let (tx, _rx) = mpsc::unbounded_channel();
        let player_id = hub.connect(tx).await.unwrap();

        hub.send_message(
            player_id.clone(),
            ClientMessage::JoinWaitingRoom {
                address: Address::from("0xa"),
                agent: CombatProfile::default(),
            },
        )
        .await
        .unwrap();
        let stats = hub.stats().await.unwrap();
        assert_eq!(stats.players, 1);
        assert_eq!(stats.waiting, 1);

        hub.disconnect(player_id).await.unwrap();
        let stats = hub.stats().await.unwrap();
        assert_eq!(stats, HubStats::default());
    }

    #[tokio::test]
    async fn test_disconnect_drops_outbound_sender() {
        let hub = spawn_hub(8);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let player_id = hub.connect(tx).await.unwrap();
        hub.disconnect(player_id).await.unwrap();

        // Greeting, then the channel closes once the hub forgets us.
        assert!(matches!(rx.recv().await, Some(ServerMessage::Connected { .. })));
        while let Some(msg) = rx.recv().await {
            assert!(matches!(msg, ServerMessage::WaitingRoomUpdate { .. }));
        }
    }
}
