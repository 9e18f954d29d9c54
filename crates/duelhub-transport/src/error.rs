/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection was closed.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// Sending a frame failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving a frame failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// Binding the listener or accepting a connection failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),

    /// The WebSocket upgrade on an accepted TCP stream failed.
    #[error("handshake with {addr} failed: {source}")]
    HandshakeFailed {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

impl TransportError {
    /// Returns `true` if the listener itself is still usable after this
    /// error, i.e. only a single inbound connection was lost.
    pub fn is_per_connection(&self) -> bool {
        matches!(self, Self::HandshakeFailed { .. })
    }
}
