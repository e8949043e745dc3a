pub mod event_relay;
pub mod executor;
pub mod piston;
pub mod session_state;
pub mod sink;
