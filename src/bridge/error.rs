use thiserror::Error;

use crate::session::error::SessionError;

/// Errors that can occur on the synchronous world-query surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// No side channel is bound and no fallback world source is configured
    #[error("No backend available to answer world queries")]
    NoBackend,

    /// The channel session rejected or failed the request send
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}
