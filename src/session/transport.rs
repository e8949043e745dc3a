use crate::{protocol::backendbound::BackendboundPacket, session::error::TransportError};

/// Outbound half of the side-channel transport.
///
/// Implementations own the socket and the wire codec; the session only hands
/// them structured packets. Sends happen from the per-session game-loop
/// context while the transport's receive side runs elsewhere, so
/// implementations must be `Send + Sync`.
pub trait BackendSender: Send + Sync {
    fn send(&self, packet: BackendboundPacket) -> Result<(), TransportError>;

    /// Releases the underlying connection. Called once, on session close.
    fn close(&self);
}
