//! Per-connection handler: register, relay frames, clean up.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Register with the hub → get a `PlayerId` (greeting is queued)
//!   2. Spawn a writer that drains the player's outbound channel
//!   3. Loop: receive frames → decode → forward to the hub
//!   4. On close, report the disconnect

use std::sync::Arc;

use duelhub_protocol::{ClientMessage, Codec, PlayerId, ServerMessage};
use duelhub_transport::{Connection, TransportError, WebSocketConnection};
use tokio::sync::mpsc;

use crate::{DuelhubError, HubHandle};

/// Reports the disconnect when the handler exits, even by panic.
///
/// `Drop` is synchronous, so the async send runs on a spawned task. No
/// runtime means the hub is gone too, so there is nothing to report.
struct DisconnectGuard {
    player_id: PlayerId,
    hub: HubHandle,
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        let player_id = self.player_id.clone();
        let hub = self.hub.clone();
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(async move {
                let _ = hub.disconnect(player_id).await;
            });
        }
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    hub: HubHandle,
    codec: Arc<C>,
) -> Result<(), DuelhubError> {
    let conn = Arc::new(conn);
    let conn_id = conn.id();

    let (tx, rx) = mpsc::unbounded_channel();
    let player_id = hub.connect(tx).await?;
    let _guard = DisconnectGuard {
        player_id: player_id.clone(),
        hub: hub.clone(),
    };
    tracing::info!(%conn_id, %player_id, peer = %conn.peer_addr(), "player connected");

    // The writer ends by itself once the hub drops this player's sender.
    tokio::spawn(write_loop(
        Arc::clone(&conn),
        rx,
        Arc::clone(&codec),
        player_id.clone(),
    ));

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%player_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "recv error");
                break;
            }
        };

        match ClientMessage::decode_with(codec.as_ref(), &data) {
            Ok(msg) => hub.send_message(player_id.clone(), msg).await?,
            Err(e) if e.is_unknown_type() => {
                tracing::warn!(%player_id, error = %e, "ignoring unknown message type");
            }
            Err(e) => {
                tracing::warn!(%player_id, error = %e, "dropping malformed frame");
            }
        }
    }

    // _guard drops here → hub forgets the player.
    Ok(())
}

/// Encodes and writes every queued message, then closes the socket.
async fn write_loop<C: Codec>(
    conn: Arc<WebSocketConnection>,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
    codec: Arc<C>,
    player_id: PlayerId,
) {
    while let Some(msg) = rx.recv().await {
        let bytes = match codec.encode(&msg) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(%player_id, kind = msg.kind(), error = %e, "encode failed");
                continue;
            }
        };
        match conn.send(&bytes).await {
            Ok(()) => {}
            Err(TransportError::ConnectionClosed(_)) => {
                tracing::trace!(%player_id, kind = msg.kind(), "peer already closed, stopping writer");
                break;
            }
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "send failed, stopping writer");
                break;
            }
        }
    }

    let _ = conn.close().await;
    tracing::debug!(%player_id, "writer stopped");
}
