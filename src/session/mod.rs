pub mod channel_session;
pub mod error;
pub mod transport;
