//! `DuelhubServer` builder and accept loop.
//!
//! This ties the layers together: transport → protocol → hub.

use std::sync::Arc;

use duelhub_protocol::{Codec, JsonCodec};
use duelhub_transport::{Transport, WebSocketTransport};

use crate::actor::spawn_hub;
use crate::handler::handle_connection;
use crate::{DuelhubError, HubHandle};

/// Default capacity of the hub's command queue.
pub const DEFAULT_HUB_CHANNEL_SIZE: usize = 1024;

/// Builder for configuring and starting a duelhub server.
///
/// # Example
///
/// ```rust,ignore
/// let server = DuelhubServer::builder()
///     .bind("0.0.0.0:8080")
///     .build()
///     .await?;
/// server.run().await
/// ```
#[derive(Debug, Clone)]
pub struct DuelhubServerBuilder {
    bind_addr: String,
    hub_channel_size: usize,
}

impl DuelhubServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            hub_channel_size: DEFAULT_HUB_CHANNEL_SIZE,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the capacity of the hub's command queue. Values below 1 are
    /// raised to 1.
    pub fn hub_channel_size(mut self, size: usize) -> Self {
        self.hub_channel_size = size.max(1);
        self
    }

    /// Binds the listener and starts the hub.
    ///
    /// Uses `JsonCodec` and `WebSocketTransport`.
    pub async fn build(self) -> Result<DuelhubServer, DuelhubError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;
        let hub = spawn_hub(self.hub_channel_size);

        Ok(DuelhubServer {
            transport,
            hub,
            codec: Arc::new(JsonCodec),
        })
    }
}

impl Default for DuelhubServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running duelhub server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct DuelhubServer<C: Codec = JsonCodec> {
    transport: WebSocketTransport,
    hub: HubHandle,
    codec: Arc<C>,
}

impl DuelhubServer {
    /// Creates a new builder.
    pub fn builder() -> DuelhubServerBuilder {
        DuelhubServerBuilder::new()
    }
}

impl<C: Codec> DuelhubServer<C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Returns a handle to the hub, e.g. for reading stats.
    pub fn handle(&self) -> HubHandle {
        self.hub.clone()
    }

    /// Runs the accept loop.
    ///
    /// Spawns a handler task per connection. Runs until the process is
    /// terminated; a failed accept is logged and skipped.
    pub async fn run(mut self) -> Result<(), DuelhubError> {
        tracing::info!(addr = ?self.local_addr().ok(), "duelhub server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let hub = self.hub.clone();
                    let codec = Arc::clone(&self.codec);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, hub, codec).await
                        {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) if e.is_per_connection() => {
                    tracing::debug!(error = %e, "handshake failed");
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
