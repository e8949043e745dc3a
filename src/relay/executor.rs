use crate::relay::session_state::SessionState;

pub type SessionTask = Box<dyn FnOnce(&mut SessionState) + Send>;

/// Hand-off point from the network-receiving context onto a session's
/// single-threaded game/event loop.
///
/// `SessionState` is not safe for concurrent mutation, so gameplay effects
/// triggered by inbound packets are enqueued here as tasks rather than
/// applied inline. Implementations run each task exactly once, on the
/// session's own thread, with exclusive access to that session's state.
pub trait SessionExecutor: Send + Sync {
    fn execute(&self, task: SessionTask);
}
