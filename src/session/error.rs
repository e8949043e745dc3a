use thiserror::Error;

/// Errors that can occur on the transport seam underneath a channel session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The transport could not deliver an outbound packet
    #[error("Failed to send packet over side channel: {reason}")]
    SendFailed { reason: String },

    /// The transport dropped out from under the session
    #[error("Side channel transport disconnected: {reason}")]
    Disconnected { reason: String },
}

/// Errors that can occur during channel session operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Attempted to send while the channel is not bound to a transport
    #[error("Side channel unavailable in state {state}; cannot send")]
    ChannelUnavailable { state: &'static str },

    /// Attempted to bind a transport while one is already bound
    #[error("Side channel is already bound to a transport")]
    AlreadyBound,

    /// Transport error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}
